mod jsx;
pub mod list_rules;
pub mod prop_rules;
pub mod registry;
pub mod render_rules;

use crate::engine::AnalysisContext;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Diagnostic emitted by the engine when a file cannot be read or parsed.
pub const PARSE_FAILURE: &str = "parse-failure";

/// Diagnostic emitted by the engine when a rule panics on a unit.
pub const RULE_INTERNAL_ERROR: &str = "rule-internal-error";

/// Severity levels for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" | "deny" => Ok(Severity::Error),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

impl clap::ValueEnum for Severity {
    fn value_variants<'a>() -> &'a [Self] {
        &[Severity::Info, Severity::Warning, Severity::Error]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Severity::Info => Some(clap::builder::PossibleValue::new("info")),
            Severity::Warning => Some(clap::builder::PossibleValue::new("warning")),
            Severity::Error => Some(clap::builder::PossibleValue::new("error")),
        }
    }
}

/// A diagnostic reported by a rule
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub rule_id: &'static str,
    pub severity: Severity,
    pub message: String,
    pub file_path: PathBuf,
    pub line: usize,
    pub column: usize,
    pub suggestion: Option<String>,
}

/// The Rule trait - implement this to add new checks.
///
/// Rules are pure structural matches over a unit's `Node` tree: they must not
/// mutate the unit, and scanning with rules in any order yields the same
/// diagnostic set (the aggregator applies the final sort).
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule (e.g., "missing-list-key")
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Description of what this rule checks
    fn description(&self) -> &'static str;

    /// Default severity level
    fn default_severity(&self) -> Severity;

    /// Run the check and return diagnostics
    fn check(&self, ctx: &AnalysisContext) -> Vec<Diagnostic>;
}
