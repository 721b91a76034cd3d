//! Framework detection from project manifest metadata.
//!
//! Reads `package.json` once per scan and probes for framework-specific
//! config files. Signatures are evaluated in a fixed priority order (config
//! file presence, then dependency name, then fallback bundler dependency) so
//! a project carrying several frameworks' dependencies is always classified
//! the same way: a Vite + React project reports `vite`, not `unknown`.

pub mod tips;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::error::{Error, Result};

/// Rendering frameworks this tool knows how to advise on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameworkName {
    Next,
    Remix,
    Vite,
    Cra,
    Gatsby,
    Unknown,
}

impl std::fmt::Display for FrameworkName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FrameworkName::Next => "next",
            FrameworkName::Remix => "remix",
            FrameworkName::Vite => "vite",
            FrameworkName::Cra => "cra",
            FrameworkName::Gatsby => "gatsby",
            FrameworkName::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

/// Detected framework: name, version, and additive feature tags.
#[derive(Debug, Clone, Serialize)]
pub struct FrameworkInfo {
    pub name: FrameworkName,
    /// Semantic version string; empty when undetectable.
    pub version: String,
    /// Feature tags such as `app-router`, `rsc`, `hmr`.
    pub features: BTreeSet<String>,
}

/// The subset of package.json this tool reads.
#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    dependencies: BTreeMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: BTreeMap<String, String>,
}

impl Manifest {
    fn dependency(&self, name: &str) -> Option<&str> {
        self.dependencies
            .get(name)
            .or_else(|| self.dev_dependencies.get(name))
            .map(String::as_str)
    }
}

/// Config file probes, in priority order. First hit wins.
const CONFIG_PROBES: &[(FrameworkName, &[&str])] = &[
    (
        FrameworkName::Next,
        &["next.config.js", "next.config.mjs", "next.config.ts"],
    ),
    (FrameworkName::Remix, &["remix.config.js"]),
    (
        FrameworkName::Gatsby,
        &["gatsby-config.js", "gatsby-config.ts"],
    ),
    (
        FrameworkName::Vite,
        &[
            "vite.config.js",
            "vite.config.ts",
            "vite.config.mjs",
            "vite.config.mts",
        ],
    ),
];

/// Dependency signatures, in priority order.
const DEPENDENCY_PROBES: &[(FrameworkName, &[&str])] = &[
    (FrameworkName::Next, &["next"]),
    (FrameworkName::Remix, &["@remix-run/react", "@remix-run/node"]),
    (FrameworkName::Gatsby, &["gatsby"]),
    (FrameworkName::Cra, &["react-scripts"]),
];

/// Detect the rendering framework used by the project at `project_dir`.
///
/// The manifest is read exactly once and treated as immutable for the run.
/// A missing or unparseable `package.json` is a [`Error::ManifestRead`]; the
/// engine absorbs that into `framework = None` and the scan proceeds.
pub fn detect(project_dir: &Path) -> Result<FrameworkInfo> {
    let manifest_path = project_dir.join("package.json");
    let content = std::fs::read_to_string(&manifest_path)
        .map_err(|e| Error::manifest(&manifest_path, e.to_string()))?;
    let manifest: Manifest =
        serde_json::from_str(&content).map_err(|e| Error::manifest(&manifest_path, e.to_string()))?;

    let name = classify(project_dir, &manifest);
    let version = version_of(name, &manifest);
    let features = features_of(name, project_dir, &manifest);

    Ok(FrameworkInfo {
        name,
        version,
        features,
    })
}

fn classify(project_dir: &Path, manifest: &Manifest) -> FrameworkName {
    for (name, files) in CONFIG_PROBES {
        if files.iter().any(|f| project_dir.join(f).exists()) {
            return *name;
        }
    }
    for (name, deps) in DEPENDENCY_PROBES {
        if deps.iter().any(|d| manifest.dependency(d).is_some()) {
            return *name;
        }
    }
    // Fallback bundler match.
    if manifest.dependency("vite").is_some() {
        return FrameworkName::Vite;
    }
    FrameworkName::Unknown
}

fn version_of(name: FrameworkName, manifest: &Manifest) -> String {
    let dep = match name {
        FrameworkName::Next => "next",
        FrameworkName::Remix => "@remix-run/react",
        FrameworkName::Vite => "vite",
        FrameworkName::Cra => "react-scripts",
        FrameworkName::Gatsby => "gatsby",
        FrameworkName::Unknown => return String::new(),
    };
    manifest
        .dependency(dep)
        .map(|v| v.trim_start_matches(&['^', '~', '>', '<', '=', ' '][..]).to_string())
        .unwrap_or_default()
}

/// Feature flags are additive signals; the absence of a signal never removes
/// an inferred framework name.
fn features_of(name: FrameworkName, project_dir: &Path, manifest: &Manifest) -> BTreeSet<String> {
    let mut features = BTreeSet::new();
    match name {
        FrameworkName::Next => {
            if project_dir.join("app").is_dir() || project_dir.join("src/app").is_dir() {
                features.insert("app-router".to_string());
                features.insert("rsc".to_string());
            }
            if project_dir.join("pages").is_dir() || project_dir.join("src/pages").is_dir() {
                features.insert("pages-router".to_string());
            }
        }
        FrameworkName::Vite => {
            features.insert("hmr".to_string());
            if manifest.dependency("@vitejs/plugin-react-swc").is_some() {
                features.insert("swc".to_string());
            }
        }
        FrameworkName::Gatsby => {
            features.insert("ssg".to_string());
        }
        FrameworkName::Remix | FrameworkName::Cra | FrameworkName::Unknown => {}
    }
    features
}
