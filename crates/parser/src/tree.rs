//! Lowered PHP syntax tree
//!
//! Nodes live in a single arena owned by [`SyntaxTree`]. A node owns its children through the
//! [`NodeId`]s stored in its [`NodeKind`]; the `parent` link is a plain back-index filled in
//! once while lowering and never used to mutate anything.
//!
//! Ids are handed out in pre-order, so iterating the arena visits nodes in source order.

use serde::Serialize;

use crate::namespace::NamespaceContext;

/// Index of a node in its [`SyntaxTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

/// Source location of a node. Lines are 1-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Span {
  pub start_byte: usize,
  pub end_byte: usize,
  pub start_line: u32,
  pub end_line: u32,
}

/// A source comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
  pub text: String,
  pub span: Span,
}

impl Comment {
  /// `/**` followed by whitespace, the same rule the PHP lexer uses for doc comments
  pub fn is_doc_comment(&self) -> bool {
    is_doc_comment(&self.text)
  }
}

pub(crate) fn is_doc_comment(text: &str) -> bool {
  text
    .strip_prefix("/**")
    .and_then(|rest| rest.chars().next())
    .is_some_and(char::is_whitespace)
}

/// One argument of a call expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
  pub value: NodeId,
  /// Named argument label (`foo(name: $x)`)
  pub name: Option<String>,
  /// Spread argument (`foo(...$args)`)
  pub unpack: bool,
  pub by_ref: bool,
}

/// The closed set of node shapes the extractor distinguishes.
///
/// Everything the extractor has no use for is lowered to [`NodeKind::Other`], which keeps the
/// tree-sitter kind and the lowered children so parent links stay intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
  // --- statements ---
  ExpressionStatement(NodeId),
  Return(Option<NodeId>),
  /// Statements of the `if` block are branches directly; `else` clauses stay `Other`
  If {
    condition: NodeId,
    branches: Vec<NodeId>,
  },
  /// Functions, methods, closures and arrow functions
  Function {
    name: Option<String>,
    body: Vec<NodeId>,
  },
  Namespace {
    name: Option<String>,
    body: Vec<NodeId>,
  },

  // --- expressions ---
  /// String literal with escapes decoded
  String(String),
  /// Double quoted string containing interpolated expressions
  Interpolated(Vec<NodeId>),
  /// Literal text between interpolations
  Fragment(String),
  Concat {
    left: NodeId,
    right: NodeId,
  },
  /// `$name`
  Variable(String),
  /// `$object->property`
  PropertyFetch {
    object: NodeId,
    property: NodeId,
  },
  /// `$base[dim]`, `dim` is absent for `$base[]`
  Index {
    base: NodeId,
    dim: Option<NodeId>,
  },
  /// `Class::CONSTANT`
  ClassConstant {
    class: NodeId,
    constant: NodeId,
  },
  Call {
    callee: NodeId,
    args: Vec<Argument>,
  },
  MethodCall {
    object: NodeId,
    method: NodeId,
    args: Vec<Argument>,
  },
  /// Bare constant such as `MY_HOOK`
  ConstFetch(NodeId),
  /// Function, class or namespace name
  Name {
    segments: Vec<String>,
    fully_qualified: bool,
  },
  /// Property, method or constant identifier
  Identifier(String),
  /// Plain `=` assignment
  Assign {
    target: NodeId,
    value: NodeId,
  },
  Cast {
    ty: String,
    value: NodeId,
  },
  Other {
    syntax: &'static str,
    children: Vec<NodeId>,
  },
}

impl NodeKind {
  /// Short kind name used in diagnostics
  pub fn name(&self) -> &'static str {
    match self {
      NodeKind::ExpressionStatement(_) => "expression_statement",
      NodeKind::Return(_) => "return",
      NodeKind::If { .. } => "if",
      NodeKind::Function { .. } => "function",
      NodeKind::Namespace { .. } => "namespace",
      NodeKind::String(_) => "string",
      NodeKind::Interpolated(_) => "interpolated_string",
      NodeKind::Fragment(_) => "string_fragment",
      NodeKind::Concat { .. } => "concat",
      NodeKind::Variable(_) => "variable",
      NodeKind::PropertyFetch { .. } => "property_fetch",
      NodeKind::Index { .. } => "index",
      NodeKind::ClassConstant { .. } => "class_constant",
      NodeKind::Call { .. } => "call",
      NodeKind::MethodCall { .. } => "method_call",
      NodeKind::ConstFetch(_) => "const_fetch",
      NodeKind::Name { .. } => "name",
      NodeKind::Identifier(_) => "identifier",
      NodeKind::Assign { .. } => "assign",
      NodeKind::Cast { .. } => "cast",
      NodeKind::Other { syntax, .. } => *syntax,
    }
  }

  /// Direct children in source order
  pub fn children(&self) -> Vec<NodeId> {
    match self {
      NodeKind::ExpressionStatement(expr) | NodeKind::ConstFetch(expr) => vec![*expr],
      NodeKind::Return(expr) => expr.iter().copied().collect(),
      NodeKind::If { condition, branches } => std::iter::once(*condition).chain(branches.iter().copied()).collect(),
      NodeKind::Function { body, .. } | NodeKind::Namespace { body, .. } => body.clone(),
      NodeKind::Interpolated(parts) => parts.clone(),
      NodeKind::Other { children, .. } => children.clone(),
      NodeKind::Concat { left, right } => vec![*left, *right],
      NodeKind::PropertyFetch { object, property } => vec![*object, *property],
      NodeKind::Index { base, dim } => std::iter::once(*base).chain(dim.iter().copied()).collect(),
      NodeKind::ClassConstant { class, constant } => vec![*class, *constant],
      NodeKind::Call { callee, args } => std::iter::once(*callee).chain(args.iter().map(|a| a.value)).collect(),
      NodeKind::MethodCall { object, method, args } => [*object, *method]
        .into_iter()
        .chain(args.iter().map(|a| a.value))
        .collect(),
      NodeKind::Assign { target, value } => vec![*target, *value],
      NodeKind::Cast { value, .. } => vec![*value],
      NodeKind::String(_)
      | NodeKind::Fragment(_)
      | NodeKind::Variable(_)
      | NodeKind::Name { .. }
      | NodeKind::Identifier(_) => Vec::new(),
    }
  }
}

/// A lowered node
#[derive(Debug, Clone)]
pub struct Node {
  pub kind: NodeKind,
  pub span: Span,
  pub parent: Option<NodeId>,
  pub(crate) doc_comment: Option<usize>,
  pub(crate) scope: usize,
}

/// A parsed PHP file
#[derive(Debug, Clone)]
pub struct SyntaxTree {
  pub(crate) source: String,
  pub(crate) nodes: Vec<Node>,
  pub(crate) roots: Vec<NodeId>,
  pub(crate) comments: Vec<Comment>,
  pub(crate) scopes: Vec<NamespaceContext>,
}

impl SyntaxTree {
  pub fn source(&self) -> &str {
    &self.source
  }

  /// Top-level statements
  pub fn roots(&self) -> &[NodeId] {
    &self.roots
  }

  pub fn node(&self, id: NodeId) -> &Node {
    &self.nodes[id.index()]
  }

  pub fn kind(&self, id: NodeId) -> &NodeKind {
    &self.node(id).kind
  }

  pub fn parent(&self, id: NodeId) -> Option<NodeId> {
    self.node(id).parent
  }

  /// Walk parent links up to the root, starting with the direct parent
  pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    std::iter::successors(self.parent(id), move |&p| self.parent(p))
  }

  /// All nodes in source (pre-)order
  pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
    self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i as u32), n))
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// The doc comment directly preceding the node's first token, if any
  pub fn doc_comment(&self, id: NodeId) -> Option<&Comment> {
    self.node(id).doc_comment.map(|i| &self.comments[i])
  }

  /// Namespace and `use` imports in effect at the node
  pub fn namespace_context(&self, id: NodeId) -> &NamespaceContext {
    &self.scopes[self.node(id).scope]
  }

  /// Raw source text of the node
  pub fn text(&self, id: NodeId) -> &str {
    let span = self.node(id).span;
    &self.source[span.start_byte..span.end_byte]
  }

  pub fn comments(&self) -> &[Comment] {
    &self.comments
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_is_doc_comment() {
    assert!(is_doc_comment("/** Summary. */"));
    assert!(is_doc_comment("/**\n * Summary.\n */"));
    assert!(!is_doc_comment("/* plain */"));
    assert!(!is_doc_comment("/***/"));
    assert!(!is_doc_comment("// line"));
  }

  #[test]
  fn test_kind_children_order() {
    let kind = NodeKind::Call {
      callee: NodeId(1),
      args: vec![
        Argument {
          value: NodeId(2),
          name: None,
          unpack: false,
          by_ref: false,
        },
        Argument {
          value: NodeId(3),
          name: None,
          unpack: false,
          by_ref: false,
        },
      ],
    };
    assert_eq!(kind.children(), vec![NodeId(1), NodeId(2), NodeId(3)]);
    assert_eq!(kind.name(), "call");
  }
}
