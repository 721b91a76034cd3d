//! Curated optimization tips keyed by framework and feature flags.
//!
//! Independent of per-file diagnostics: the advisor maps the detected
//! `FrameworkInfo` to a deduplicated, deterministically ordered list of tips.

use std::collections::BTreeSet;

use super::{FrameworkInfo, FrameworkName};

/// A plain advisory string; generated on demand, no independent lifecycle.
pub type Tip = String;

/// Tip table. A row applies when the framework name matches and, if a feature
/// tag is given, that feature was detected. Declaration order is emission
/// order.
const TIPS: &[(FrameworkName, Option<&str>, &str)] = &[
    (
        FrameworkName::Next,
        Some("app-router"),
        "Prefer server components in the app router: client components re-render on state \
         changes while server components render once per request.",
    ),
    (
        FrameworkName::Next,
        Some("rsc"),
        "Mark only interactive leaves with \"use client\" and keep data fetching in server \
         components to shrink the client bundle and its re-render surface.",
    ),
    (
        FrameworkName::Next,
        Some("pages-router"),
        "Use next/dynamic for below-the-fold components to cut initial render work.",
    ),
    (
        FrameworkName::Next,
        None,
        "Use next/image instead of <img> to avoid layout shifts that force re-layout of \
         surrounding components.",
    ),
    (
        FrameworkName::Remix,
        None,
        "Remix revalidates loaders after every mutation; scope loaders narrowly so a form \
         submit does not refetch and re-render unrelated routes.",
    ),
    (
        FrameworkName::Vite,
        Some("hmr"),
        "Fast-refresh preserves state only for modules that export components exclusively; \
         keep non-component exports in separate files.",
    ),
    (
        FrameworkName::Vite,
        None,
        "Split rarely-used routes with dynamic import() so the initial bundle only carries \
         the components the first render needs.",
    ),
    (
        FrameworkName::Cra,
        None,
        "react-scripts builds do not tree-shake aggressively; import submodules directly \
         instead of whole component libraries.",
    ),
    (
        FrameworkName::Gatsby,
        Some("ssg"),
        "Pages are pre-rendered at build time; keep client-side state in leaf components so \
         hydration does not re-render whole page trees.",
    ),
];

/// Tips applicable to the detected framework, in table order, deduplicated.
pub fn tips_for(framework: &FrameworkInfo) -> Vec<Tip> {
    let mut seen = BTreeSet::new();
    let mut tips = Vec::new();

    for (name, feature, text) in TIPS {
        if *name != framework.name {
            continue;
        }
        if let Some(feature) = feature {
            if !framework.features.contains(*feature) {
                continue;
            }
        }
        if seen.insert(*text) {
            tips.push((*text).to_string());
        }
    }

    tips
}
