use super::jsx::is_list_item_root;
use super::{Diagnostic, Rule, Severity};
use crate::engine::node::NodeKind;
use crate::engine::AnalysisContext;

/// Detects elements produced by a mapping callback without a `key` attribute.
/// Without a stable key the reconciler falls back to positional matching and
/// re-renders (or remounts) entries on any reorder, insert, or delete.
pub struct MissingListKeyRule;

impl Rule for MissingListKeyRule {
    fn id(&self) -> &'static str {
        "missing-list-key"
    }

    fn name(&self) -> &'static str {
        "Missing List Key"
    }

    fn description(&self) -> &'static str {
        "Detects list elements rendered without a stable key attribute"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        ctx.unit.root.walk(&mut |node, ancestors| {
            if node.kind != NodeKind::JsxElement || !is_list_item_root(ancestors) {
                return;
            }
            if node.attributes.contains_key("key") {
                return;
            }
            diagnostics.push(Diagnostic {
                rule_id: "missing-list-key",
                severity: Severity::Error,
                message: format!(
                    "`<{}>` is produced by a mapping expression but has no `key` attribute",
                    node.name_str()
                ),
                file_path: ctx.file_path.to_path_buf(),
                line: node.line,
                column: node.column,
                suggestion: Some(
                    "Add a `key` derived from stable entry data (an id, not the array index)"
                        .to_string(),
                ),
            });
        });

        diagnostics
    }
}

/// Key names that mean "the iteration index" in a mapping callback.
const INDEX_NAMES: &[&str] = &["index", "idx", "i"];

/// Detects list elements keyed by the iteration index. An index key is stable
/// only while the collection never reorders; otherwise it silently remaps
/// state between entries.
pub struct IndexAsKeyRule;

impl Rule for IndexAsKeyRule {
    fn id(&self) -> &'static str {
        "index-as-key"
    }

    fn name(&self) -> &'static str {
        "Index Used as Key"
    }

    fn description(&self) -> &'static str {
        "Detects list elements keyed by the iteration index"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        ctx.unit.root.walk(&mut |node, ancestors| {
            if node.kind != NodeKind::JsxElement || !is_list_item_root(ancestors) {
                return;
            }
            let Some(value) = node.attribute_value("key") else {
                return;
            };
            if value.kind != NodeKind::Other || !INDEX_NAMES.contains(&value.name_str()) {
                return;
            }
            diagnostics.push(Diagnostic {
                rule_id: "index-as-key",
                severity: Severity::Warning,
                message: format!(
                    "`<{}>` is keyed by the iteration index `{}`",
                    node.name_str(),
                    value.name_str()
                ),
                file_path: ctx.file_path.to_path_buf(),
                line: node.line,
                column: node.column,
                suggestion: Some(
                    "Key by stable entry data so reorders do not remap component state".to_string(),
                ),
            });
        });

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::parser::parse_source;
    use std::path::PathBuf;

    fn check(rule: &dyn Rule, source: &str) -> Vec<Diagnostic> {
        let path = PathBuf::from("test.jsx");
        let unit = parse_source(&path, source).expect("valid source");
        let ctx = AnalysisContext::new(&path, &unit);
        rule.check(&ctx)
    }

    #[test]
    fn test_flags_unkeyed_list_element() {
        let diags = check(
            &MissingListKeyRule,
            "const L = ({ items }) => <ul>{items.map(item => <li>{item.name}</li>)}</ul>;",
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule_id, "missing-list-key");
        assert_eq!(diags[0].severity, Severity::Error);
    }

    #[test]
    fn test_keyed_list_element_is_clean() {
        let diags = check(
            &MissingListKeyRule,
            "const L = ({ items }) => <ul>{items.map(item => <li key={item.id}>{item.name}</li>)}</ul>;",
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn test_nested_children_do_not_need_keys() {
        let diags = check(
            &MissingListKeyRule,
            "const L = ({ items }) => <ul>{items.map(i => <li key={i.id}><span>{i.name}</span></li>)}</ul>;",
        );
        assert!(diags.is_empty(), "nested <span> flagged: {:?}", diags);
    }

    #[test]
    fn test_element_outside_map_needs_no_key() {
        let diags = check(&MissingListKeyRule, "const A = () => <li>static</li>;");
        assert!(diags.is_empty());
    }

    #[test]
    fn test_flat_map_is_a_list_context_too() {
        let diags = check(
            &MissingListKeyRule,
            "const L = ({ groups }) => <ul>{groups.flatMap(g => <li>{g.name}</li>)}</ul>;",
        );
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn test_flags_index_key() {
        let diags = check(
            &IndexAsKeyRule,
            "const L = ({ items }) => <ul>{items.map((item, index) => <li key={index}>{item}</li>)}</ul>;",
        );
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("`index`"));
    }

    #[test]
    fn test_stable_key_is_clean() {
        let diags = check(
            &IndexAsKeyRule,
            "const L = ({ items }) => <ul>{items.map(item => <li key={item.id}>{item.name}</li>)}</ul>;",
        );
        assert!(diags.is_empty());
    }
}
