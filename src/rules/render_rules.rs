use super::jsx::{component_table, in_list_context};
use super::{Diagnostic, Rule, Severity};
use crate::engine::node::NodeKind;
use crate::engine::AnalysisContext;

/// Detects locally declared components rendered per list entry without a
/// memoization boundary.
pub struct UnmemoizedListComponentRule;

impl Rule for UnmemoizedListComponentRule {
    fn id(&self) -> &'static str {
        "unmemoized-list-component"
    }

    fn name(&self) -> &'static str {
        "Unmemoized List Component"
    }

    fn description(&self) -> &'static str {
        "Detects components instantiated once per list entry without memo()"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let table = component_table(&ctx.unit.root);
        let mut diagnostics = Vec::new();

        ctx.unit.root.walk(&mut |node, ancestors| {
            if node.kind != NodeKind::JsxElement || !in_list_context(ancestors) {
                return;
            }
            if table.get(node.name_str()) != Some(&false) {
                return; // unknown component or already memoized
            }
            diagnostics.push(Diagnostic {
                rule_id: "unmemoized-list-component",
                severity: Severity::Warning,
                message: format!(
                    "`<{}>` is rendered once per list entry but `{}` is not wrapped in `memo`",
                    node.name_str(),
                    node.name_str()
                ),
                file_path: ctx.file_path.to_path_buf(),
                line: node.line,
                column: node.column,
                suggestion: Some(format!(
                    "Wrap `{}` in `React.memo` so unchanged entries skip re-rendering",
                    node.name_str()
                )),
            });
        });

        diagnostics
    }
}

/// Detects a component declared inside another component's render body.
/// The inner declaration gets a fresh identity on every render, so React
/// unmounts and remounts its whole subtree each time.
pub struct ComponentInRenderRule;

impl Rule for ComponentInRenderRule {
    fn id(&self) -> &'static str {
        "component-in-render"
    }

    fn name(&self) -> &'static str {
        "Component Declared in Render"
    }

    fn description(&self) -> &'static str {
        "Detects component declarations nested inside another component's body"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        ctx.unit.root.walk(&mut |node, ancestors| {
            if node.kind != NodeKind::FunctionComponentDecl {
                return;
            }
            let Some(enclosing) = ancestors
                .iter()
                .rev()
                .find(|a| a.kind == NodeKind::FunctionComponentDecl)
            else {
                return;
            };
            diagnostics.push(Diagnostic {
                rule_id: "component-in-render",
                severity: Severity::Warning,
                message: format!(
                    "`{}` is declared inside `{}`; it is remounted on every render of `{}`",
                    node.name_str(),
                    enclosing.name_str(),
                    enclosing.name_str()
                ),
                file_path: ctx.file_path.to_path_buf(),
                line: node.line,
                column: node.column,
                suggestion: Some(format!(
                    "Move `{}` to module scope and pass what it needs as props",
                    node.name_str()
                )),
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
    fn test_flags_unmemoized_component_in_map() {
        let diags = check(
            &UnmemoizedListComponentRule,
            r#"
function Item({ id }) { return <li>{id}</li>; }
const List = ({ items }) => <ul>{items.map(item => <Item key={item.id} id={item.id} />)}</ul>;
"#,
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule_id, "unmemoized-list-component");
        assert_eq!(diags[0].severity, Severity::Warning);
        assert_eq!(diags[0].line, 3);
    }

    #[test]
    fn test_memoized_component_is_clean() {
        let diags = check(
            &UnmemoizedListComponentRule,
            r#"
const Item = memo(({ id }) => <li>{id}</li>);
const List = ({ items }) => <ul>{items.map(item => <Item key={item.id} id={item.id} />)}</ul>;
"#,
        );
        assert!(diags.is_empty(), "memoized component flagged: {:?}", diags);
    }

    #[test]
    fn test_component_outside_list_is_clean() {
        let diags = check(
            &UnmemoizedListComponentRule,
            r#"
function Item({ id }) { return <li>{id}</li>; }
const Page = () => <Item id={1} />;
"#,
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn test_imported_component_is_not_flagged() {
        // `Row` is not declared in this unit; left undetected rather than guessed.
        let diags = check(
            &UnmemoizedListComponentRule,
            "const List = ({ items }) => <ul>{items.map(i => <Row key={i} v={i} />)}</ul>;",
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn test_flags_nested_component_declaration() {
        let diags = check(
            &ComponentInRenderRule,
            r#"
function Page({ user }) {
  const Avatar = () => <img src={user.avatar} />;
  return <div><Avatar /></div>;
}
"#,
        );
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("`Avatar` is declared inside `Page`"));
    }

    #[test]
    fn test_top_level_components_are_clean() {
        let diags = check(
            &ComponentInRenderRule,
            r#"
const Avatar = ({ src }) => <img src={src} />;
function Page() { return <Avatar src="x.png" />; }
"#,
        );
        assert!(diags.is_empty());
    }
}
