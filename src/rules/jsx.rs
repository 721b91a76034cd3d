//! Shared structural helpers for the rendering rules.
//!
//! All detection is exact structural matching over the `Node` tree; ambiguous
//! shapes are deliberately left undetected rather than guessed.

use std::collections::BTreeMap;

use crate::engine::node::{Node, NodeKind};

/// Calls that establish a memoization boundary around a component value.
pub(crate) fn is_memo_call(name: &str) -> bool {
    matches!(name, "memo" | "React.memo")
}

/// Hook calls whose result already has a stable identity across renders.
pub(crate) fn is_stable_hook_call(name: &str) -> bool {
    matches!(
        name,
        "useCallback" | "React.useCallback" | "useMemo" | "React.useMemo"
    )
}

/// A call expression that produces one element per collection entry.
pub(crate) fn is_map_call(node: &Node) -> bool {
    if node.kind != NodeKind::CallExpression {
        return false;
    }
    let name = node.name_str();
    name == "map" || name.ends_with(".map") || name.ends_with(".flatMap")
}

/// True when the node sits anywhere inside a mapping callback.
pub(crate) fn in_list_context(ancestors: &[&Node]) -> bool {
    ancestors.iter().any(|a| is_map_call(a))
}

/// True when the node is the element a mapping callback produces directly,
/// i.e. no other JSX element sits between it and the nearest `.map` call.
/// This is the element that needs a `key`.
pub(crate) fn is_list_item_root(ancestors: &[&Node]) -> bool {
    for ancestor in ancestors.iter().rev() {
        if is_map_call(ancestor) {
            return true;
        }
        if ancestor.kind == NodeKind::JsxElement {
            return false;
        }
    }
    false
}

/// True for elements that instantiate a component rather than a host (DOM)
/// element: capitalized names and member names like `Ctx.Provider`.
pub(crate) fn is_component_element(element: &Node) -> bool {
    let name = element.name_str();
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase()) || name.contains('.')
}

/// Components declared in this unit, mapped to whether they sit behind a
/// memoization boundary.
///
/// A component counts as memoized when its own declaration wraps a
/// `memo(...)` call, or when any `memo(X)` call in the unit references it by
/// name (`const MemoItem = memo(Item)` marks both `MemoItem` and `Item`).
pub(crate) fn component_table(root: &Node) -> BTreeMap<String, bool> {
    let mut table: BTreeMap<String, bool> = BTreeMap::new();

    root.walk(&mut |node, _| match node.kind {
        NodeKind::FunctionComponentDecl => {
            let directly_memoized = node
                .children
                .iter()
                .any(|c| c.kind == NodeKind::CallExpression && is_memo_call(c.name_str()));
            let entry = table.entry(node.name_str().to_string()).or_insert(false);
            *entry |= directly_memoized;
        }
        NodeKind::CallExpression if is_memo_call(node.name_str()) => {
            for arg in &node.children {
                if arg.kind == NodeKind::Other && !arg.name_str().is_empty() {
                    table.insert(arg.name_str().to_string(), true);
                }
            }
        }
        _ => {}
    });

    table
}
