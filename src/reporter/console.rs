use crate::report::{Outcome, ScanReport};
use crate::rules::{Diagnostic, Severity};
use colored::Colorize;

pub fn report(report: &ScanReport) {
    if report.outcome == Outcome::NoInput {
        println!("{}", "No source files found.".yellow());
        return;
    }

    if let Some(framework) = &report.framework {
        let version = if framework.version.is_empty() {
            String::new()
        } else {
            format!(" {}", framework.version)
        };
        println!(
            "{} {}{}",
            "Framework:".bold(),
            framework.name,
            version.dimmed()
        );
        println!();
    }

    for diagnostic in &report.diagnostics {
        print_diagnostic(diagnostic);
    }

    if !report.tips.is_empty() {
        println!("{}", "Tips".bold().underline());
        for tip in &report.tips {
            println!("  {} {}", "*".cyan(), tip);
        }
        println!();
    }

    if report.diagnostics.is_empty() {
        println!("{}", "No rendering issues found.".green());
        return;
    }

    print!("Found ");
    let summary = &report.summary;
    if summary.errors > 0 {
        print!("{}", format!("{} error(s)", summary.errors).red());
    }
    if summary.warnings > 0 {
        if summary.errors > 0 {
            print!(", ");
        }
        print!("{}", format!("{} warning(s)", summary.warnings).yellow());
    }
    if summary.infos > 0 {
        if summary.errors > 0 || summary.warnings > 0 {
            print!(", ");
        }
        print!("{}", format!("{} info(s)", summary.infos).blue());
    }
    println!(
        " across {} file(s)",
        report.files_scanned
    );
}

fn print_diagnostic(d: &Diagnostic) {
    let severity_str = match d.severity {
        Severity::Error => "error".red().bold(),
        Severity::Warning => "warning".yellow().bold(),
        Severity::Info => "info".blue().bold(),
    };

    let rule_id = format!("[{}]", d.rule_id).dimmed();

    println!("{}{} {} {}", severity_str, ":".bold(), d.message, rule_id);

    println!(
        "  {} {}:{}:{}",
        "-->".blue(),
        d.file_path.display(),
        d.line,
        d.column,
    );

    if let Some(suggestion) = &d.suggestion {
        println!("  {} {}", "help:".cyan(), suggestion);
    }

    println!();
}

/// Format a diagnostic as a plain text string (no colors) for testing.
#[cfg(test)]
fn format_diagnostic_plain(d: &Diagnostic) -> String {
    let severity = match d.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "info",
    };

    let mut result = format!(
        "{}: {} [{}]\n  --> {}:{}:{}\n",
        severity,
        d.message,
        d.rule_id,
        d.file_path.display(),
        d.line,
        d.column
    );

    if let Some(suggestion) = &d.suggestion {
        result.push_str(&format!("  help: {}\n", suggestion));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn make_diagnostic(
        rule_id: &'static str,
        severity: Severity,
        suggestion: Option<&str>,
    ) -> Diagnostic {
        Diagnostic {
            rule_id,
            message: format!("Test message for {}", rule_id),
            severity,
            file_path: PathBuf::from("App.jsx"),
            line: 10,
            column: 5,
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_format_diagnostic_error() {
        let diag = make_diagnostic("missing-list-key", Severity::Error, None);
        let result = format_diagnostic_plain(&diag);

        assert!(result.contains("error:"));
        assert!(result.contains("[missing-list-key]"));
        assert!(result.contains("App.jsx:10:5"));
    }

    #[test]
    fn test_format_diagnostic_with_suggestion() {
        let diag = make_diagnostic(
            "unstable-callback",
            Severity::Warning,
            Some("Wrap the handler in useCallback"),
        );
        let result = format_diagnostic_plain(&diag);

        assert!(result.contains("warning:"));
        assert!(result.contains("help: Wrap the handler in useCallback"));
    }

    #[test]
    fn test_format_diagnostic_without_suggestion() {
        let diag = make_diagnostic("unstable-literal-prop", Severity::Info, None);
        let result = format_diagnostic_plain(&diag);

        assert!(result.contains("info:"));
        assert!(!result.contains("help:"));
    }
}
