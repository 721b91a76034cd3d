use super::jsx::{component_table, in_list_context, is_component_element, is_stable_hook_call};
use super::{Diagnostic, Rule, Severity};
use crate::engine::node::{Node, NodeKind};
use crate::engine::AnalysisContext;

/// Detects function-valued props whose identity changes on every render.
///
/// Escalates from Warning to Error when the receiving element is itself an
/// unmemoized locally declared component rendered per list entry, because the
/// fresh callback identity then defeats any future memoization and compounds
/// the re-render cost. The co-occurrence condition is recomputed here rather
/// than shared with the list rule, so catalog order stays irrelevant.
pub struct UnstableCallbackRule;

fn is_unstable_function_value(value: &Node) -> bool {
    match value.kind {
        NodeKind::ArrowFunction => true,
        NodeKind::CallExpression => !is_stable_hook_call(value.name_str()),
        _ => false,
    }
}

impl Rule for UnstableCallbackRule {
    fn id(&self) -> &'static str {
        "unstable-callback"
    }

    fn name(&self) -> &'static str {
        "Unstable Callback Identity"
    }

    fn description(&self) -> &'static str {
        "Detects inline functions passed as props to component elements"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let table = component_table(&ctx.unit.root);
        let mut diagnostics = Vec::new();

        ctx.unit.root.walk(&mut |node, ancestors| {
            if node.kind != NodeKind::JsxElement || !is_component_element(node) {
                return;
            }
            let compounds_list_rerender =
                in_list_context(ancestors) && table.get(node.name_str()) == Some(&false);

            for (attr_name, prop) in &node.attributes {
                if attr_name == "key" {
                    continue;
                }
                let Some(value) = prop.children.first() else {
                    continue;
                };
                if !is_unstable_function_value(value) {
                    continue;
                }

                let (severity, message) = if compounds_list_rerender {
                    (
                        Severity::Error,
                        format!(
                            "inline function passed as `{}` to `<{}>`, which already re-renders \
                             for every list entry",
                            attr_name,
                            node.name_str()
                        ),
                    )
                } else {
                    (
                        Severity::Warning,
                        format!(
                            "inline function passed as `{}` to `<{}>` gets a new identity every render",
                            attr_name,
                            node.name_str()
                        ),
                    )
                };

                diagnostics.push(Diagnostic {
                    rule_id: "unstable-callback",
                    severity,
                    message,
                    file_path: ctx.file_path.to_path_buf(),
                    line: prop.line,
                    column: prop.column,
                    suggestion: Some(
                        "Hoist the handler or wrap it in `useCallback` so the prop keeps a stable identity"
                            .to_string(),
                    ),
                });
            }
        });

        diagnostics
    }
}

/// Detects inline object/array literals passed as props: a fresh allocation
/// (and therefore a fresh identity) on every render.
pub struct UnstableLiteralPropRule;

impl Rule for UnstableLiteralPropRule {
    fn id(&self) -> &'static str {
        "unstable-literal-prop"
    }

    fn name(&self) -> &'static str {
        "Unstable Literal Prop"
    }

    fn description(&self) -> &'static str {
        "Detects inline object/array literals passed as JSX attribute values"
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn check(&self, ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        ctx.unit.root.walk(&mut |node, _| {
            if node.kind != NodeKind::JsxElement {
                return;
            }
            for (attr_name, prop) in &node.attributes {
                let Some(value) = prop.children.first() else {
                    continue;
                };
                let literal = match value.kind {
                    NodeKind::ObjectLiteral => "object",
                    NodeKind::ArrayLiteral => "array",
                    _ => continue,
                };
                diagnostics.push(Diagnostic {
                    rule_id: "unstable-literal-prop",
                    severity: Severity::Info,
                    message: format!(
                        "inline {} literal passed as `{}` to `<{}>` is reallocated every render",
                        literal,
                        attr_name,
                        node.name_str()
                    ),
                    file_path: ctx.file_path.to_path_buf(),
                    line: prop.line,
                    column: prop.column,
                    suggestion: Some(
                        "Hoist the literal to module scope or memoize it with `useMemo`".to_string(),
                    ),
                });
            }
        });

        diagnostics
    }
}

/// Detects context providers whose `value` is built inline. Every render of
/// the provider then invalidates every consumer, however deep.
pub struct UnstableContextValueRule;

impl Rule for UnstableContextValueRule {
    fn id(&self) -> &'static str {
        "unstable-context-value"
    }

    fn name(&self) -> &'static str {
        "Unstable Context Value"
    }

    fn description(&self) -> &'static str {
        "Detects context providers with inline literal or function values"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        ctx.unit.root.walk(&mut |node, _| {
            if node.kind != NodeKind::JsxElement {
                return;
            }
            let name = node.name_str();
            if !(name == "Provider" || name.ends_with(".Provider")) {
                return;
            }
            let Some(prop) = node.attributes.get("value") else {
                return;
            };
            let Some(value) = prop.children.first() else {
                return;
            };
            if !matches!(
                value.kind,
                NodeKind::ObjectLiteral | NodeKind::ArrayLiteral | NodeKind::ArrowFunction
            ) {
                return;
            }
            diagnostics.push(Diagnostic {
                rule_id: "unstable-context-value",
                severity: Severity::Warning,
                message: format!(
                    "`<{}>` value is recreated on every render, invalidating all consumers",
                    name
                ),
                file_path: ctx.file_path.to_path_buf(),
                line: prop.line,
                column: prop.column,
                suggestion: Some(
                    "Memoize the context value with `useMemo` so consumers only re-render on real changes"
                        .to_string(),
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
    fn test_inline_arrow_prop_is_warning() {
        let diags = check(
            &UnstableCallbackRule,
            "const A = () => <Item onSelect={() => pick(1)} />;",
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Warning);
        assert!(diags[0].message.contains("onSelect"));
    }

    #[test]
    fn test_arrow_prop_on_host_element_is_clean() {
        // Inline handlers on DOM elements are idiomatic and cheap.
        let diags = check(
            &UnstableCallbackRule,
            "const A = () => <button onClick={() => save()}>Save</button>;",
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn test_use_callback_prop_is_clean() {
        let diags = check(
            &UnstableCallbackRule,
            "const A = ({ fn }) => <Item onSelect={useCallback(fn, [fn])} />;",
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn test_escalates_to_error_on_unmemoized_list_component() {
        let diags = check(
            &UnstableCallbackRule,
            r#"
function Item({ onPick }) { return <li onClick={onPick} />; }
const List = ({ items }) =>
  <ul>{items.map(item => <Item key={item.id} onPick={() => pick(item)} />)}</ul>;
"#,
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Error);
    }

    #[test]
    fn test_memoized_receiver_stays_warning() {
        let diags = check(
            &UnstableCallbackRule,
            r#"
const Item = memo(({ onPick }) => <li onClick={onPick} />);
const List = ({ items }) =>
  <ul>{items.map(item => <Item key={item.id} onPick={() => pick(item)} />)}</ul>;
"#,
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Warning);
    }

    #[test]
    fn test_object_literal_prop_is_info() {
        let diags = check(
            &UnstableLiteralPropRule,
            "const A = () => <Chart options={{ animate: true }} series={[1, 2]} />;",
        );
        assert_eq!(diags.len(), 2);
        assert!(diags.iter().all(|d| d.severity == Severity::Info));
    }

    #[test]
    fn test_hoisted_reference_prop_is_clean() {
        let diags = check(
            &UnstableLiteralPropRule,
            "const A = ({ opts }) => <Chart options={opts} />;",
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn test_provider_object_value_is_flagged() {
        let diags = check(
            &UnstableContextValueRule,
            "const App = () => <Theme.Provider value={{ dark: true }}><Page /></Theme.Provider>;",
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule_id, "unstable-context-value");
    }

    #[test]
    fn test_provider_identifier_value_is_clean() {
        let diags = check(
            &UnstableContextValueRule,
            "const App = ({ theme }) => <Theme.Provider value={theme}><Page /></Theme.Provider>;",
        );
        assert!(diags.is_empty());
    }
}
