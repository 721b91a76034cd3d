//! Source parser for renderlint.
//!
//! Wraps the tree-sitter TSX grammar (which accepts plain JS/JSX as well) and
//! lowers the concrete syntax tree into the framework-neutral [`Node`] model.
//! Lowering is purely structural: interesting CST nodes become `Node`s, every
//! other interior node is spliced out so its interesting descendants attach to
//! the nearest kept ancestor. No imports, types, or cross-file references are
//! resolved.

use std::path::Path;

use tree_sitter::{Node as TsNode, Parser as TsParser};

use super::node::{Node, NodeKind, SourceUnit};
use crate::error::{Error, Result};

/// Parse file text into a [`SourceUnit`].
///
/// A source whose parse tree contains syntax errors is rejected with
/// [`Error::Parse`]; the scanner records that as a `parse-failure` diagnostic
/// and moves on.
pub fn parse_source(path: &Path, source: &str) -> Result<SourceUnit> {
    let mut parser = TsParser::new();
    parser
        .set_language(&tree_sitter_typescript::LANGUAGE_TSX.into())
        .map_err(|e| Error::parse(path, e.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| Error::parse(path, "parser produced no tree"))?;

    let root = tree.root_node();
    if root.has_error() {
        let line = first_error_line(root).unwrap_or(1);
        return Err(Error::parse(path, format!("syntax error near line {line}")));
    }

    let mut unit_root = Node::new(NodeKind::Other, 1, 1);
    lower_children(root, source, &mut unit_root.children);

    Ok(SourceUnit {
        path: path.to_path_buf(),
        root: unit_root,
    })
}

fn first_error_line(ts: TsNode) -> Option<usize> {
    if ts.is_error() || ts.is_missing() {
        return Some(ts.start_position().row + 1);
    }
    for i in 0..ts.child_count() {
        if let Some(line) = ts.child(i).and_then(first_error_line) {
            return Some(line);
        }
    }
    None
}

fn text<'s>(ts: TsNode, src: &'s str) -> &'s str {
    ts.utf8_text(src.as_bytes()).unwrap_or("")
}

fn pos(ts: TsNode) -> (usize, usize) {
    let p = ts.start_position();
    (p.row + 1, p.column + 1)
}

fn is_component_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

/// Calls whose result carries a memoization or ref boundary; a capitalized
/// declarator initialized with one of these is still a component declaration.
fn is_component_wrapper_call(callee: &str) -> bool {
    matches!(
        callee,
        "memo" | "React.memo" | "forwardRef" | "React.forwardRef"
    )
}

fn lower_children(ts: TsNode, src: &str, out: &mut Vec<Node>) {
    for i in 0..ts.named_child_count() {
        if let Some(child) = ts.named_child(i) {
            lower_into(child, src, out);
        }
    }
}

/// Lower one CST node, pushing zero or more `Node`s onto `out`.
fn lower_into(ts: TsNode, src: &str, out: &mut Vec<Node>) {
    match ts.kind() {
        "function_declaration" | "generator_function_declaration" => {
            let name = ts
                .child_by_field_name("name")
                .map(|n| text(n, src).to_string())
                .unwrap_or_default();
            let kind = if is_component_name(&name) {
                NodeKind::FunctionComponentDecl
            } else {
                NodeKind::Other
            };
            let (line, column) = pos(ts);
            let mut node = Node::named(kind, name, line, column);
            if let Some(body) = ts.child_by_field_name("body") {
                lower_children(body, src, &mut node.children);
            }
            out.push(node);
        }
        "variable_declarator" => lower_declarator(ts, src, out),
        "jsx_element" | "jsx_self_closing_element" => out.push(lower_jsx_element(ts, src)),
        "call_expression" => out.push(lower_call(ts, src)),
        "arrow_function" | "function_expression" => out.push(lower_function_like(ts, src)),
        "object" => out.push(lower_object(ts, src)),
        "array" => out.push(lower_array(ts, src)),
        // Everything else is structural noise: splice its children upward.
        _ => lower_children(ts, src, out),
    }
}

/// `const Item = ...` declarators. Capitalized names initialized with a
/// function, arrow, or memo/forwardRef call become component declarations;
/// anything else is spliced through.
fn lower_declarator(ts: TsNode, src: &str, out: &mut Vec<Node>) {
    let name = ts
        .child_by_field_name("name")
        .map(|n| text(n, src).to_string())
        .unwrap_or_default();
    let Some(value) = ts.child_by_field_name("value") else {
        return;
    };

    let is_component = is_component_name(&name)
        && match value.kind() {
            "arrow_function" | "function_expression" => true,
            "call_expression" => value
                .child_by_field_name("function")
                .map(|f| is_component_wrapper_call(text(f, src)))
                .unwrap_or(false),
            _ => false,
        };

    if is_component {
        let (line, column) = pos(ts);
        let mut node = Node::named(NodeKind::FunctionComponentDecl, name, line, column);
        lower_into(value, src, &mut node.children);
        out.push(node);
    } else {
        lower_into(value, src, out);
    }
}

fn lower_function_like(ts: TsNode, src: &str) -> Node {
    let (line, column) = pos(ts);
    let mut node = Node::new(NodeKind::ArrowFunction, line, column);
    if let Some(body) = ts.child_by_field_name("body") {
        // Expression bodies lower directly; statement blocks splice through.
        lower_into(body, src, &mut node.children);
    }
    node
}

fn lower_call(ts: TsNode, src: &str) -> Node {
    let (line, column) = pos(ts);
    let callee = ts
        .child_by_field_name("function")
        .map(|f| text(f, src).to_string())
        .unwrap_or_default();
    let mut node = Node::named(NodeKind::CallExpression, callee, line, column);
    if let Some(args) = ts.child_by_field_name("arguments") {
        for i in 0..args.named_child_count() {
            if let Some(arg) = args.named_child(i) {
                if let Some(lowered) = lower_value(arg, src) {
                    node.children.push(lowered);
                }
            }
        }
    }
    node
}

fn lower_object(ts: TsNode, src: &str) -> Node {
    let (line, column) = pos(ts);
    let mut node = Node::new(NodeKind::ObjectLiteral, line, column);
    for i in 0..ts.named_child_count() {
        let Some(entry) = ts.named_child(i) else {
            continue;
        };
        match entry.kind() {
            "pair" => {
                let key = entry
                    .child_by_field_name("key")
                    .map(|k| text(k, src).to_string())
                    .unwrap_or_default();
                let (el, ec) = pos(entry);
                let mut prop = Node::named(NodeKind::PropAssignment, key, el, ec);
                if let Some(value) = entry.child_by_field_name("value") {
                    if let Some(lowered) = lower_value(value, src) {
                        prop.children.push(lowered);
                    }
                }
                node.children.push(prop);
            }
            "shorthand_property_identifier" => {
                let (el, ec) = pos(entry);
                node.children.push(Node::named(
                    NodeKind::PropAssignment,
                    text(entry, src),
                    el,
                    ec,
                ));
            }
            _ => {}
        }
    }
    node
}

fn lower_array(ts: TsNode, src: &str) -> Node {
    let (line, column) = pos(ts);
    let mut node = Node::new(NodeKind::ArrayLiteral, line, column);
    for i in 0..ts.named_child_count() {
        if let Some(el) = ts.named_child(i) {
            if let Some(lowered) = lower_value(el, src) {
                node.children.push(lowered);
            }
        }
    }
    node
}

/// Lower a CST node appearing in value position (call argument, attribute or
/// object-entry value). Unlike statement-level lowering, bare identifiers and
/// member accesses are kept as named `Other` leaves so rules can see what is
/// being referenced.
fn lower_value(ts: TsNode, src: &str) -> Option<Node> {
    let (line, column) = pos(ts);
    match ts.kind() {
        "identifier" | "member_expression" | "property_identifier"
        | "shorthand_property_identifier" => {
            Some(Node::named(NodeKind::Other, text(ts, src), line, column))
        }
        "string" | "number" | "true" | "false" | "null" | "undefined" => {
            let raw = text(ts, src).trim_matches(&['"', '\'', '`'][..]).to_string();
            Some(Node::named(NodeKind::Other, raw, line, column))
        }
        "jsx_expression" | "parenthesized_expression" => {
            ts.named_child(0).and_then(|inner| lower_value(inner, src))
        }
        "arrow_function" | "function_expression" => Some(lower_function_like(ts, src)),
        "call_expression" => Some(lower_call(ts, src)),
        "object" => Some(lower_object(ts, src)),
        "array" => Some(lower_array(ts, src)),
        "jsx_element" | "jsx_self_closing_element" => Some(lower_jsx_element(ts, src)),
        _ => {
            // Compound expressions (ternaries, binary ops, templates): keep
            // their interesting parts under an anonymous wrapper.
            let mut wrapper = Node::new(NodeKind::Other, line, column);
            lower_children(ts, src, &mut wrapper.children);
            Some(wrapper)
        }
    }
}

fn lower_jsx_element(ts: TsNode, src: &str) -> Node {
    let (line, column) = pos(ts);
    let mut node = Node::new(NodeKind::JsxElement, line, column);

    if ts.kind() == "jsx_self_closing_element" {
        if let Some(name) = ts.child_by_field_name("name") {
            node.name = Some(text(name, src).to_string());
        }
        lower_attributes(ts, src, &mut node);
        return node;
    }

    for i in 0..ts.named_child_count() {
        let Some(child) = ts.named_child(i) else {
            continue;
        };
        match child.kind() {
            "jsx_opening_element" => {
                if let Some(name) = child.child_by_field_name("name") {
                    node.name = Some(text(name, src).to_string());
                }
                lower_attributes(child, src, &mut node);
            }
            "jsx_closing_element" => {}
            _ => lower_into(child, src, &mut node.children),
        }
    }
    node
}

fn lower_attributes(opening: TsNode, src: &str, element: &mut Node) {
    for i in 0..opening.named_child_count() {
        let Some(attr) = opening.named_child(i) else {
            continue;
        };
        if attr.kind() != "jsx_attribute" {
            continue; // spread attributes carry no stable name to match on
        }
        let Some(name_node) = attr.named_child(0) else {
            continue;
        };
        let attr_name = text(name_node, src).to_string();
        let (line, column) = pos(attr);
        let mut prop = Node::named(NodeKind::PropAssignment, attr_name.clone(), line, column);
        if let Some(value) = attr.named_child(1) {
            if let Some(lowered) = lower_value(value, src) {
                prop.children.push(lowered);
            }
        }
        element.attributes.insert(attr_name, prop);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse(source: &str) -> SourceUnit {
        parse_source(&PathBuf::from("test.jsx"), source).expect("valid source")
    }

    fn find<'a>(root: &'a Node, pred: &dyn Fn(&Node) -> bool) -> Option<&'a Node> {
        let mut found: Option<&'a Node> = None;
        root.walk(&mut |n, _| {
            if found.is_none() && pred(n) {
                found = Some(n);
            }
        });
        found
    }

    #[test]
    fn test_function_component_declaration() {
        let unit = parse("function App() { return <div className=\"x\" />; }");
        let comp = find(&unit.root, &|n| n.kind == NodeKind::FunctionComponentDecl).unwrap();
        assert_eq!(comp.name_str(), "App");
        let el = find(&unit.root, &|n| n.kind == NodeKind::JsxElement).unwrap();
        assert_eq!(el.name_str(), "div");
        assert!(el.attributes.contains_key("className"));
    }

    #[test]
    fn test_lowercase_function_is_not_component() {
        let unit = parse("function helper() { return 1; }");
        assert!(find(&unit.root, &|n| n.kind == NodeKind::FunctionComponentDecl).is_none());
    }

    #[test]
    fn test_arrow_component_declarator() {
        let unit = parse("const Card = (props) => <section>{props.title}</section>;");
        let comp = find(&unit.root, &|n| n.kind == NodeKind::FunctionComponentDecl).unwrap();
        assert_eq!(comp.name_str(), "Card");
        assert_eq!(comp.children[0].kind, NodeKind::ArrowFunction);
    }

    #[test]
    fn test_memo_wrapped_declarator() {
        let unit = parse("const Item = memo(function Item({ id }) { return <li>{id}</li>; });");
        let comp = find(&unit.root, &|n| n.kind == NodeKind::FunctionComponentDecl).unwrap();
        assert_eq!(comp.name_str(), "Item");
        let call = find(comp, &|n| n.kind == NodeKind::CallExpression).unwrap();
        assert_eq!(call.name_str(), "memo");
    }

    #[test]
    fn test_arrow_attribute_value_kind() {
        let unit = parse("const A = () => <Item onSelect={() => save()} />;");
        let el = find(&unit.root, &|n| n.name_str() == "Item").unwrap();
        assert_eq!(
            el.attribute_value("onSelect").unwrap().kind,
            NodeKind::ArrowFunction
        );
    }

    #[test]
    fn test_object_literal_attribute_value_kind() {
        let unit = parse("const A = () => <Item style={{ color: 'red' }} tags={[1, 2]} />;");
        let el = find(&unit.root, &|n| n.name_str() == "Item").unwrap();
        assert_eq!(
            el.attribute_value("style").unwrap().kind,
            NodeKind::ObjectLiteral
        );
        assert_eq!(
            el.attribute_value("tags").unwrap().kind,
            NodeKind::ArrayLiteral
        );
    }

    #[test]
    fn test_map_call_with_keyed_element() {
        let unit = parse(
            "const List = ({ items }) => <ul>{items.map(item => <li key={item.id}>{item.name}</li>)}</ul>;",
        );
        let call = find(&unit.root, &|n| n.kind == NodeKind::CallExpression).unwrap();
        assert_eq!(call.name_str(), "items.map");
        let li = find(call, &|n| n.name_str() == "li").unwrap();
        assert_eq!(li.attribute_value("key").unwrap().name_str(), "item.id");
    }

    #[test]
    fn test_positions_are_one_based() {
        let unit = parse("const A = () => <div />;\n");
        let el = find(&unit.root, &|n| n.kind == NodeKind::JsxElement).unwrap();
        assert_eq!(el.line, 1);
        assert_eq!(el.column, 17);
    }

    #[test]
    fn test_syntax_error_is_rejected() {
        let err = parse_source(&PathBuf::from("bad.jsx"), "const = <div ((( ;").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }
}
