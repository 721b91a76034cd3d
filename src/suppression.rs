//! Inline suppression support for renderlint diagnostics.
//!
//! A `// renderlint-ignore: rule-id` comment suppresses matching diagnostics
//! on its own line and on the line below it, so both trailing comments and
//! comment-above-the-offender styles work. `// renderlint-ignore` with no
//! rule list (or with `all`) suppresses every rule.

use std::collections::{HashMap, HashSet};

const IGNORE_MARKER: &str = "renderlint-ignore";

/// Per-file suppression index, built once from the raw source text.
pub struct SuppressionIndex {
    /// Suppressed rule IDs by line number. "all" suppresses everything.
    line_suppressions: HashMap<usize, HashSet<String>>,
}

impl SuppressionIndex {
    pub fn new(source: &str) -> Self {
        let mut line_suppressions: HashMap<usize, HashSet<String>> = HashMap::new();

        for (line_num, line) in source.lines().enumerate() {
            let line_num = line_num + 1; // 1-indexed

            let Some(idx) = line.find(IGNORE_MARKER) else {
                continue;
            };
            let rest = &line[idx + IGNORE_MARKER.len()..];
            let rest = rest.trim_start_matches(':').trim();

            let mut rules = HashSet::new();
            if rest.is_empty() || rest == "all" {
                rules.insert("all".to_string());
            } else {
                for rule in rest.split(',') {
                    let rule = rule.trim();
                    if !rule.is_empty() {
                        rules.insert(rule.to_string());
                    }
                }
            }

            // Same line for trailing comments, next line for standalone ones.
            for target in [line_num, line_num + 1] {
                line_suppressions
                    .entry(target)
                    .or_default()
                    .extend(rules.iter().cloned());
            }
        }

        Self { line_suppressions }
    }

    /// Check if a diagnostic at the given line should be suppressed.
    pub fn is_suppressed(&self, rule_id: &str, line: usize) -> bool {
        match self.line_suppressions.get(&line) {
            Some(rules) => rules.contains("all") || rules.contains(rule_id),
            None => false,
        }
    }
}
