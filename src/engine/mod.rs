//! Analysis engine - coordinates file discovery, parsing, and rule execution.

mod context;
pub mod node;
pub mod parser;

pub use context::AnalysisContext;
pub use node::{Node, NodeKind, SourceUnit};
pub use parser::parse_source;

use rayon::prelude::*;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use crate::discovery::{discover_source_files, DiscoveryOptions};
use crate::error::Result;
use crate::framework::{self, tips};
use crate::report::{aggregate, ScanReport};
use crate::rules::registry::RuleCatalog;
use crate::rules::{Diagnostic, Severity, PARSE_FAILURE, RULE_INTERNAL_ERROR};
use crate::suppression::SuppressionIndex;
use crate::Config;

pub struct Engine {
    config: Config,
    catalog: RuleCatalog,
}

impl Engine {
    /// Build an engine for one scan. Fails fast on a configuration that
    /// names unknown or reserved rule IDs.
    pub fn new(config: Config) -> Result<Self> {
        let catalog = RuleCatalog::from_config(&config)?;
        Ok(Self { config, catalog })
    }

    /// Scan the tree (or single file) at `path` and aggregate the report.
    ///
    /// Files are scanned in parallel; per-file failures become diagnostics
    /// rather than aborting the run. Framework detection failure degrades to
    /// `framework: None` with a warning on stderr.
    pub fn scan(&self, path: &Path) -> Result<ScanReport> {
        let files = discover_source_files(path, &DiscoveryOptions::secure());

        let project_dir = if path.is_file() {
            path.parent().unwrap_or(path)
        } else {
            path
        };
        let framework = match framework::detect(project_dir) {
            Ok(info) => Some(info),
            Err(e) => {
                eprintln!("Warning: framework detection skipped: {}", e);
                None
            }
        };
        let tips = framework.as_ref().map(tips::tips_for).unwrap_or_default();

        let diagnostics: Vec<Diagnostic> = files
            .par_iter()
            .flat_map(|file| self.scan_file(file))
            .collect();

        Ok(aggregate(diagnostics, framework, tips, files.len()))
    }

    /// Scan one file. Never fails: read and parse errors are reported as a
    /// `parse-failure` diagnostic, and a panicking rule is reported as
    /// `rule-internal-error` without poisoning the other rules.
    fn scan_file(&self, file_path: &Path) -> Vec<Diagnostic> {
        let source = match std::fs::read_to_string(file_path) {
            Ok(source) => source,
            Err(e) => {
                return vec![parse_failure(
                    file_path,
                    crate::error::Error::io(file_path, e).to_string(),
                )];
            }
        };

        let unit = match parser::parse_source(file_path, &source) {
            Ok(unit) => unit,
            Err(e) => return vec![parse_failure(file_path, e.to_string())],
        };

        let suppressions = SuppressionIndex::new(&source);
        let ctx = AnalysisContext::new(file_path, &unit);

        let mut diagnostics = Vec::new();
        for rule in self.catalog.rules() {
            let Some(severity) = self
                .config
                .rule_severity(rule.id(), rule.default_severity())
            else {
                continue;
            };

            let result = catch_unwind(AssertUnwindSafe(|| rule.check(&ctx)));
            match result {
                Ok(rule_diagnostics) => {
                    for mut diagnostic in rule_diagnostics {
                        // A configured override beats whatever the rule chose,
                        // including escalation.
                        if self.config.has_override(rule.id()) {
                            diagnostic.severity = severity;
                        }
                        if !suppressions.is_suppressed(diagnostic.rule_id, diagnostic.line) {
                            diagnostics.push(diagnostic);
                        }
                    }
                }
                Err(_) => {
                    eprintln!(
                        "Warning: rule '{}' panicked on {}",
                        rule.id(),
                        file_path.display()
                    );
                    diagnostics.push(Diagnostic {
                        rule_id: RULE_INTERNAL_ERROR,
                        severity: Severity::Warning,
                        message: format!("rule '{}' failed on this file", rule.id()),
                        file_path: file_path.to_path_buf(),
                        line: 1,
                        column: 1,
                        suggestion: None,
                    });
                }
            }
        }

        diagnostics
    }
}

fn parse_failure(file_path: &Path, message: String) -> Diagnostic {
    Diagnostic {
        rule_id: PARSE_FAILURE,
        severity: Severity::Warning,
        message,
        file_path: PathBuf::from(file_path),
        line: 1,
        column: 1,
        suggestion: None,
    }
}
