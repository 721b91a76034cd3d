//! Report aggregation: deterministic ordering, severity counts, and the scan
//! outcome that drives the exit-code contract.

use serde::Serialize;

use crate::framework::tips::Tip;
use crate::framework::FrameworkInfo;
use crate::rules::{Diagnostic, Severity};

/// Aggregate classification of one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// No diagnostics at all.
    Clean,
    /// Only Info diagnostics.
    Advisory,
    /// At least one Warning, no Errors.
    Attention,
    /// At least one Error.
    Failing,
    /// No files were scanned; the report carries no verdict.
    NoInput,
}

impl Outcome {
    /// Exit code consumed by the CLI.
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Clean | Outcome::Advisory => 0,
            Outcome::Attention => 1,
            Outcome::Failing => 2,
            Outcome::NoInput => 3,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Outcome::Clean => "clean",
            Outcome::Advisory => "advisory",
            Outcome::Attention => "attention",
            Outcome::Failing => "failing",
            Outcome::NoInput => "no-input",
        };
        write!(f, "{s}")
    }
}

/// Per-severity diagnostic counts; always partitions the diagnostic list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.infos
    }
}

/// The aggregate result of one scan invocation. Read-only once built.
#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub diagnostics: Vec<Diagnostic>,
    pub framework: Option<FrameworkInfo>,
    pub tips: Vec<Tip>,
    pub summary: Summary,
    pub outcome: Outcome,
    pub files_scanned: usize,
}

/// Merge diagnostics and advisory tips into one ordered report.
///
/// Diagnostics are sorted by file path, line, column, and rule ID as the
/// final tie-break, so output is byte-identical across runs on unchanged
/// input regardless of worker scheduling.
pub fn aggregate(
    mut diagnostics: Vec<Diagnostic>,
    framework: Option<FrameworkInfo>,
    tips: Vec<Tip>,
    files_scanned: usize,
) -> ScanReport {
    diagnostics.sort_by(|a, b| {
        a.file_path
            .cmp(&b.file_path)
            .then(a.line.cmp(&b.line))
            .then(a.column.cmp(&b.column))
            .then(a.rule_id.cmp(b.rule_id))
    });

    let mut summary = Summary::default();
    for diagnostic in &diagnostics {
        match diagnostic.severity {
            Severity::Error => summary.errors += 1,
            Severity::Warning => summary.warnings += 1,
            Severity::Info => summary.infos += 1,
        }
    }

    let outcome = if files_scanned == 0 {
        Outcome::NoInput
    } else if summary.errors > 0 {
        Outcome::Failing
    } else if summary.warnings > 0 {
        Outcome::Attention
    } else if summary.infos > 0 {
        Outcome::Advisory
    } else {
        Outcome::Clean
    };

    ScanReport {
        diagnostics,
        framework,
        tips,
        summary,
        outcome,
        files_scanned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn diag(file: &str, line: usize, column: usize, severity: Severity) -> Diagnostic {
        Diagnostic {
            rule_id: "missing-list-key",
            severity,
            message: "test".to_string(),
            file_path: PathBuf::from(file),
            line,
            column,
            suggestion: None,
        }
    }

    #[test]
    fn test_sort_is_path_line_column() {
        let report = aggregate(
            vec![
                diag("b.jsx", 1, 1, Severity::Info),
                diag("a.jsx", 9, 2, Severity::Info),
                diag("a.jsx", 2, 8, Severity::Info),
                diag("a.jsx", 2, 3, Severity::Info),
            ],
            None,
            vec![],
            2,
        );
        let order: Vec<_> = report
            .diagnostics
            .iter()
            .map(|d| (d.file_path.to_string_lossy().into_owned(), d.line, d.column))
            .collect();
        assert_eq!(
            order,
            vec![
                ("a.jsx".to_string(), 2, 3),
                ("a.jsx".to_string(), 2, 8),
                ("a.jsx".to_string(), 9, 2),
                ("b.jsx".to_string(), 1, 1),
            ]
        );
    }

    #[test]
    fn test_rule_id_is_final_tie_break() {
        let mut a = diag("a.jsx", 1, 1, Severity::Warning);
        a.rule_id = "unstable-callback";
        let mut b = diag("a.jsx", 1, 1, Severity::Warning);
        b.rule_id = "index-as-key";

        let report = aggregate(vec![a, b], None, vec![], 1);
        assert_eq!(report.diagnostics[0].rule_id, "index-as-key");
        assert_eq!(report.diagnostics[1].rule_id, "unstable-callback");
    }

    #[test]
    fn test_summary_partitions_diagnostics() {
        let report = aggregate(
            vec![
                diag("a.jsx", 1, 1, Severity::Error),
                diag("a.jsx", 2, 1, Severity::Warning),
                diag("a.jsx", 3, 1, Severity::Warning),
                diag("a.jsx", 4, 1, Severity::Info),
            ],
            None,
            vec![],
            1,
        );
        assert_eq!(report.summary.errors, 1);
        assert_eq!(report.summary.warnings, 2);
        assert_eq!(report.summary.infos, 1);
        assert_eq!(report.summary.total(), report.diagnostics.len());
    }

    #[test]
    fn test_outcome_ladder() {
        assert_eq!(aggregate(vec![], None, vec![], 1).outcome, Outcome::Clean);
        assert_eq!(
            aggregate(vec![diag("a.jsx", 1, 1, Severity::Info)], None, vec![], 1).outcome,
            Outcome::Advisory
        );
        assert_eq!(
            aggregate(vec![diag("a.jsx", 1, 1, Severity::Warning)], None, vec![], 1).outcome,
            Outcome::Attention
        );
        assert_eq!(
            aggregate(vec![diag("a.jsx", 1, 1, Severity::Error)], None, vec![], 1).outcome,
            Outcome::Failing
        );
    }

    #[test]
    fn test_no_files_is_no_input() {
        let report = aggregate(vec![], None, vec![], 0);
        assert_eq!(report.outcome, Outcome::NoInput);
        assert_eq!(report.outcome.exit_code(), 3);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Outcome::Clean.exit_code(), 0);
        assert_eq!(Outcome::Advisory.exit_code(), 0);
        assert_eq!(Outcome::Attention.exit_code(), 1);
        assert_eq!(Outcome::Failing.exit_code(), 2);
    }
}
