//! Structural tree model produced by the parser and consumed by rules.
//!
//! The tree is a strict single-owner hierarchy: a parent owns its children
//! and attribute values exclusively, and there are no back-pointers. Rules
//! that need enclosing context receive the ancestor chain as an explicit
//! parameter during traversal.

use std::collections::BTreeMap;

/// Structural classification of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A capitalized function declaration or `const X = ...` component.
    FunctionComponentDecl,
    /// A JSX element (including self-closing elements).
    JsxElement,
    /// A call expression; `name` holds the callee text (e.g. `items.map`).
    CallExpression,
    /// An arrow function or anonymous function expression.
    ArrowFunction,
    /// A named value slot: a JSX attribute or an object literal entry.
    PropAssignment,
    /// An inline `{ ... }` object literal.
    ObjectLiteral,
    /// An inline `[ ... ]` array literal.
    ArrayLiteral,
    /// Anything else worth keeping (named identifiers in value position,
    /// non-component function declarations, the unit root).
    Other,
}

/// One structural element of a parsed source file.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub name: Option<String>,
    /// 1-based line of the node's start.
    pub line: usize,
    /// 1-based column of the node's start.
    pub column: usize,
    pub children: Vec<Node>,
    /// For JSX elements: attribute name to its `PropAssignment` node.
    pub attributes: BTreeMap<String, Node>,
}

impl Node {
    pub fn new(kind: NodeKind, line: usize, column: usize) -> Self {
        Self {
            kind,
            name: None,
            line,
            column,
            children: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn named(kind: NodeKind, name: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(kind, line, column)
        }
    }

    /// Name as a `&str`, empty if unnamed.
    pub fn name_str(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// The attribute value expression, if the attribute exists and has one.
    ///
    /// Attributes map to `PropAssignment` wrappers; the value (when present)
    /// is the wrapper's single child.
    pub fn attribute_value(&self, name: &str) -> Option<&Node> {
        self.attributes.get(name).and_then(|p| p.children.first())
    }

    /// Depth-first traversal over children and attribute values, calling
    /// `f(node, ancestors)` with the ancestor chain ordered root-first.
    pub fn walk<'a, F>(&'a self, f: &mut F)
    where
        F: FnMut(&'a Node, &[&'a Node]),
    {
        let mut stack: Vec<&'a Node> = Vec::new();
        self.walk_inner(&mut stack, f);
    }

    fn walk_inner<'a, F>(&'a self, stack: &mut Vec<&'a Node>, f: &mut F)
    where
        F: FnMut(&'a Node, &[&'a Node]),
    {
        f(self, stack);
        stack.push(self);
        for attr in self.attributes.values() {
            attr.walk_inner(stack, f);
        }
        for child in &self.children {
            child.walk_inner(stack, f);
        }
        stack.pop();
    }
}

/// One analyzed file: path plus the lowered structural tree.
///
/// Immutable once parsed; owned by the scanner for the duration of the
/// per-file rule pass and discarded afterwards.
#[derive(Debug)]
pub struct SourceUnit {
    pub path: std::path::PathBuf,
    pub root: Node,
}
