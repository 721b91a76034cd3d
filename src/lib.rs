//! renderlint: static rendering-performance analysis for React projects
//!
//! Catch re-render anti-patterns before they reach production.

pub mod config;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod framework;
pub mod report;
pub mod reporter;
pub mod rules;
pub mod suppression;

pub use config::Config;
pub use engine::{AnalysisContext, Engine};
pub use error::Error;
pub use framework::{FrameworkInfo, FrameworkName};
pub use report::{Outcome, ScanReport};
pub use rules::{Diagnostic, Rule, Severity};

/// Run a scan of a project directory (or single file)
pub fn scan(path: &std::path::Path, config: Config) -> anyhow::Result<ScanReport> {
    let engine = Engine::new(config)?;
    Ok(engine.scan(path)?)
}
