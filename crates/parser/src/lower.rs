//! Lowering of tree-sitter PHP trees into [`SyntaxTree`]
//!
//! Lowering reserves each node's id before visiting its children, so ids come out in
//! pre-order. Parenthesized expressions produce no node of their own, the same way a PHP AST
//! has no node for parentheses.

use tree_sitter::Node as TsNode;

use crate::namespace::{NamespaceContext, parse_use_declaration};
use crate::tree::{Argument, Comment, Node, NodeId, NodeKind, Span, SyntaxTree, is_doc_comment};

pub(crate) struct Lowerer<'a> {
  source: &'a str,
  nodes: Vec<Node>,
  comments: Vec<Comment>,
  /// Byte ranges of every non-comment leaf token, in document order
  tokens: Vec<(usize, usize)>,
  scopes: Vec<NamespaceContext>,
  scope: usize,
}

/// A piece of a double quoted string before it becomes a node
enum Part<'t> {
  Literal { text: String, span: Span },
  Expr(TsNode<'t>),
}

impl<'a> Lowerer<'a> {
  pub(crate) fn new(source: &'a str) -> Self {
    Self {
      source,
      nodes: Vec::new(),
      comments: Vec::new(),
      tokens: Vec::new(),
      scopes: vec![NamespaceContext::global()],
      scope: 0,
    }
  }

  pub(crate) fn lower_program(mut self, root: TsNode<'_>) -> SyntaxTree {
    self.collect_tokens(root);

    let mut roots = Vec::new();
    for child in named_children(root) {
      if child.kind() == "php_tag" {
        continue;
      }
      roots.push(self.lower(child, None));
    }

    SyntaxTree {
      source: self.source.to_string(),
      nodes: self.nodes,
      roots,
      comments: self.comments,
      scopes: self.scopes,
    }
  }

  // ==========================================================================
  // Tokens and comments
  // ==========================================================================

  fn collect_tokens(&mut self, root: TsNode<'_>) {
    let mut cursor = root.walk();
    loop {
      let node = cursor.node();
      let is_comment = node.kind() == "comment";

      if is_comment {
        self.comments.push(Comment {
          text: self.text(node).to_string(),
          span: span_of(node),
        });
      } else if node.child_count() == 0 && node.start_byte() < node.end_byte() {
        self.tokens.push((node.start_byte(), node.end_byte()));
      }

      if !is_comment && cursor.goto_first_child() {
        continue;
      }

      loop {
        if cursor.goto_next_sibling() {
          break;
        }
        if !cursor.goto_parent() {
          return;
        }
      }
    }
  }

  /// The last doc comment between the previous token and `start`
  fn doc_comment_before(&self, start: usize) -> Option<usize> {
    let idx = self.tokens.partition_point(|&(s, _)| s < start);
    let prev_end = if idx == 0 { 0 } else { self.tokens[idx - 1].1 };

    let lo = self.comments.partition_point(|c| c.span.start_byte < prev_end);
    let hi = self.comments.partition_point(|c| c.span.end_byte <= start);

    (lo..hi).rev().find(|&i| is_doc_comment(&self.comments[i].text))
  }

  // ==========================================================================
  // Node construction
  // ==========================================================================

  fn push_node(&mut self, kind: NodeKind, span: Span, parent: Option<NodeId>) -> NodeId {
    let id = NodeId(self.nodes.len() as u32);
    let doc_comment = self.doc_comment_before(span.start_byte);
    self.nodes.push(Node {
      kind,
      span,
      parent,
      doc_comment,
      scope: self.scope,
    });
    id
  }

  /// Reserve an id for `node`; the kind is filled in by [`Lowerer::finish`]
  fn reserve(&mut self, node: TsNode<'_>, parent: Option<NodeId>) -> NodeId {
    let placeholder = NodeKind::Other {
      syntax: node.kind(),
      children: Vec::new(),
    };
    self.push_node(placeholder, span_of(node), parent)
  }

  fn finish(&mut self, id: NodeId, kind: NodeKind) -> NodeId {
    self.nodes[id.index()].kind = kind;
    id
  }

  fn leaf(&mut self, node: TsNode<'_>, parent: Option<NodeId>, kind: NodeKind) -> NodeId {
    self.push_node(kind, span_of(node), parent)
  }

  fn text(&self, node: TsNode<'_>) -> &'a str {
    self.source.get(node.start_byte()..node.end_byte()).unwrap_or("")
  }

  // ==========================================================================
  // Lowering
  // ==========================================================================

  fn lower(&mut self, node: TsNode<'_>, parent: Option<NodeId>) -> NodeId {
    match node.kind() {
      "parenthesized_expression" => match named_children(node).first() {
        Some(&inner) => self.lower(inner, parent),
        None => self.lower_other(node, parent),
      },
      "expression_statement" => self.lower_expression_statement(node, parent),
      "return_statement" => {
        let id = self.reserve(node, parent);
        let expr = named_children(node).first().map(|&c| self.lower(c, Some(id)));
        self.finish(id, NodeKind::Return(expr))
      }
      "if_statement" => self.lower_if(node, parent),
      "function_definition"
      | "method_declaration"
      | "anonymous_function"
      | "anonymous_function_creation_expression"
      | "arrow_function" => self.lower_function(node, parent),
      "namespace_definition" => self.lower_namespace(node, parent),
      "namespace_use_declaration" => {
        for (alias, fqn) in parse_use_declaration(self.text(node)) {
          self.scopes[self.scope].add_alias(&alias, &fqn);
        }
        self.reserve(node, parent)
      }
      "string" => {
        let value = decode_string_literal(self.text(node));
        self.leaf(node, parent, NodeKind::String(value))
      }
      "encapsed_string" => self.lower_interpolated(node, parent),
      "heredoc" | "nowdoc" => self.lower_heredoc(node, parent),
      "dynamic_variable_name" => self.lower_dynamic_variable(node, parent),
      "binary_expression" => self.lower_binary(node, parent),
      "variable_name" => {
        let name = self.text(node).trim().trim_start_matches('$').to_string();
        self.leaf(node, parent, NodeKind::Variable(name))
      }
      "member_access_expression" => self.lower_member_access(node, parent),
      "subscript_expression" => self.lower_subscript(node, parent, false),
      "class_constant_access_expression" => self.lower_class_constant(node, parent),
      "function_call_expression" => self.lower_call(node, parent),
      "member_call_expression" => self.lower_method_call(node, parent),
      "assignment_expression" => self.lower_assignment(node, parent),
      "cast_expression" => self.lower_cast(node, parent),
      "name" | "qualified_name" => {
        let id = self.reserve(node, parent);
        let name = self.leaf(node, Some(id), self.name_kind(node));
        self.finish(id, NodeKind::ConstFetch(name))
      }
      "relative_scope" => self.leaf(node, parent, self.name_kind(node)),
      _ => self.lower_other(node, parent),
    }
  }

  fn lower_other(&mut self, node: TsNode<'_>, parent: Option<NodeId>) -> NodeId {
    let id = self.reserve(node, parent);
    let children = named_children(node)
      .into_iter()
      .map(|child| self.lower(child, Some(id)))
      .collect();
    self.finish(
      id,
      NodeKind::Other {
        syntax: node.kind(),
        children,
      },
    )
  }

  fn lower_expression_statement(&mut self, node: TsNode<'_>, parent: Option<NodeId>) -> NodeId {
    let Some(&expr) = named_children(node).first() else {
      return self.lower_other(node, parent);
    };
    let id = self.reserve(node, parent);
    let expr = self.lower(expr, Some(id));
    self.finish(id, NodeKind::ExpressionStatement(expr))
  }

  fn lower_if(&mut self, node: TsNode<'_>, parent: Option<NodeId>) -> NodeId {
    let children = named_children(node);
    let condition_node = node.child_by_field_name("condition").or_else(|| children.first().copied());

    let id = self.reserve(node, parent);
    let mut condition = None;
    let mut branches = Vec::new();
    for child in children {
      if condition.is_none() && condition_node.is_some_and(|c| c.id() == child.id()) {
        condition = Some(self.lower(child, Some(id)));
      } else if matches!(child.kind(), "compound_statement" | "colon_block") {
        // Statements of the `if` block hang off the `if` itself; `else` clauses stay wrapped
        for stmt in named_children(child) {
          branches.push(self.lower(stmt, Some(id)));
        }
      } else {
        branches.push(self.lower(child, Some(id)));
      }
    }

    match condition {
      Some(condition) => self.finish(id, NodeKind::If { condition, branches }),
      None => self.finish(
        id,
        NodeKind::Other {
          syntax: node.kind(),
          children: branches,
        },
      ),
    }
  }

  fn lower_function(&mut self, node: TsNode<'_>, parent: Option<NodeId>) -> NodeId {
    let name_node = node.child_by_field_name("name");
    let name = name_node.map(|n| self.text(n).to_string());

    let id = self.reserve(node, parent);
    let mut body = Vec::new();
    for child in named_children(node) {
      if name_node.is_some_and(|n| n.id() == child.id()) {
        continue;
      }
      if child.kind() == "compound_statement" {
        for stmt in named_children(child) {
          body.push(self.lower(stmt, Some(id)));
        }
      } else {
        body.push(self.lower(child, Some(id)));
      }
    }

    self.finish(id, NodeKind::Function { name, body })
  }

  fn lower_namespace(&mut self, node: TsNode<'_>, parent: Option<NodeId>) -> NodeId {
    let name = node
      .child_by_field_name("name")
      .map(|n| self.text(n).split_whitespace().collect::<String>());
    let body_node = node
      .child_by_field_name("body")
      .or_else(|| named_children(node).into_iter().find(|c| c.kind() == "compound_statement"));

    let previous = self.scope;
    self.scopes.push(NamespaceContext::new(name.clone().unwrap_or_default()));
    self.scope = self.scopes.len() - 1;

    let id = self.reserve(node, parent);
    let mut body = Vec::new();
    if let Some(body_node) = body_node {
      for stmt in named_children(body_node) {
        body.push(self.lower(stmt, Some(id)));
      }
      // A braced namespace ends with its block; `namespace Foo;` runs to the next declaration
      self.scope = previous;
    }

    self.finish(id, NodeKind::Namespace { name, body })
  }

  fn lower_binary(&mut self, node: TsNode<'_>, parent: Option<NodeId>) -> NodeId {
    let children = named_children(node);
    let operator = node
      .child_by_field_name("operator")
      .or_else(|| all_children(node).into_iter().find(|c| !c.is_named()))
      .map(|op| self.text(op).trim());
    let left = node.child_by_field_name("left").or_else(|| children.first().copied());
    let right = node.child_by_field_name("right").or_else(|| children.get(1).copied());

    match (operator, left, right) {
      (Some("."), Some(left), Some(right)) => {
        let id = self.reserve(node, parent);
        let left = self.lower(left, Some(id));
        let right = self.lower(right, Some(id));
        self.finish(id, NodeKind::Concat { left, right })
      }
      _ => self.lower_other(node, parent),
    }
  }

  fn lower_member_access(&mut self, node: TsNode<'_>, parent: Option<NodeId>) -> NodeId {
    let children = named_children(node);
    let object = node.child_by_field_name("object").or_else(|| children.first().copied());
    let property = node.child_by_field_name("name").or_else(|| children.get(1).copied());

    let (Some(object), Some(property)) = (object, property) else {
      return self.lower_other(node, parent);
    };

    let id = self.reserve(node, parent);
    let object = self.lower(object, Some(id));
    let property = self.lower_member_name(property, id);
    self.finish(id, NodeKind::PropertyFetch { object, property })
  }

  /// Property and method names are identifiers, not constant lookups
  fn lower_member_name(&mut self, node: TsNode<'_>, parent: NodeId) -> NodeId {
    if node.kind() == "name" {
      let name = self.text(node).to_string();
      self.leaf(node, Some(parent), NodeKind::Identifier(name))
    } else {
      self.lower(node, Some(parent))
    }
  }

  /// Class references (`Foo`, `\Foo\Bar`, `self`) are names, not constant lookups
  fn lower_class_ref(&mut self, node: TsNode<'_>, parent: NodeId) -> NodeId {
    match node.kind() {
      "name" | "qualified_name" | "relative_scope" => self.leaf(node, Some(parent), self.name_kind(node)),
      _ => self.lower(node, Some(parent)),
    }
  }

  /// `bare_keys` handles `"$arr[key]"` inside strings, where the unquoted key is a string
  fn lower_subscript(&mut self, node: TsNode<'_>, parent: Option<NodeId>, bare_keys: bool) -> NodeId {
    let children = named_children(node);
    let Some(&base) = children.first() else {
      return self.lower_other(node, parent);
    };

    let id = self.reserve(node, parent);
    let base = self.lower(base, Some(id));
    let dim = children.get(1).map(|&dim| {
      if bare_keys && dim.kind() == "name" {
        let key = self.text(dim).to_string();
        self.leaf(dim, Some(id), NodeKind::String(key))
      } else {
        self.lower(dim, Some(id))
      }
    });
    self.finish(id, NodeKind::Index { base, dim })
  }

  fn lower_class_constant(&mut self, node: TsNode<'_>, parent: Option<NodeId>) -> NodeId {
    let children = named_children(node);
    let (Some(&class), Some(&constant)) = (children.first(), children.get(1)) else {
      return self.lower_other(node, parent);
    };

    let id = self.reserve(node, parent);
    let class = self.lower_class_ref(class, id);
    let constant = self.lower_member_name(constant, id);
    self.finish(id, NodeKind::ClassConstant { class, constant })
  }

  fn lower_call(&mut self, node: TsNode<'_>, parent: Option<NodeId>) -> NodeId {
    let children = named_children(node);
    let Some(callee) = node.child_by_field_name("function").or_else(|| children.first().copied()) else {
      return self.lower_other(node, parent);
    };
    let arguments = node
      .child_by_field_name("arguments")
      .or_else(|| children.iter().copied().find(|c| c.kind() == "arguments"));

    let id = self.reserve(node, parent);
    let callee = match callee.kind() {
      "name" | "qualified_name" => self.leaf(callee, Some(id), self.name_kind(callee)),
      _ => self.lower(callee, Some(id)),
    };
    let args = self.lower_arguments(arguments, id);
    self.finish(id, NodeKind::Call { callee, args })
  }

  fn lower_method_call(&mut self, node: TsNode<'_>, parent: Option<NodeId>) -> NodeId {
    let object = node.child_by_field_name("object");
    let method = node.child_by_field_name("name");
    let arguments = node.child_by_field_name("arguments");

    let (Some(object), Some(method)) = (object, method) else {
      return self.lower_other(node, parent);
    };

    let id = self.reserve(node, parent);
    let object = self.lower(object, Some(id));
    let method = self.lower_member_name(method, id);
    let args = self.lower_arguments(arguments, id);
    self.finish(id, NodeKind::MethodCall { object, method, args })
  }

  fn lower_arguments(&mut self, arguments: Option<TsNode<'_>>, call: NodeId) -> Vec<Argument> {
    let Some(arguments) = arguments else {
      return Vec::new();
    };

    let mut lowered = Vec::new();
    for child in named_children(arguments) {
      match child.kind() {
        "argument" => {
          let parts = named_children(child);
          let Some(&value) = parts.last() else {
            continue;
          };

          let name = child
            .child_by_field_name("name")
            .filter(|n| n.id() != value.id())
            .map(|n| self.text(n).to_string());
          let by_ref = parts.iter().any(|p| p.kind() == "reference_modifier");
          let (value, unpack) = if value.kind() == "variadic_unpacking" {
            (named_children(value).first().copied().unwrap_or(value), true)
          } else {
            (value, false)
          };

          let value = self.lower(value, Some(call));
          lowered.push(Argument {
            value,
            name,
            unpack,
            by_ref,
          });
        }
        "variadic_placeholder" => {}
        _ => {
          let value = self.lower(child, Some(call));
          lowered.push(Argument {
            value,
            name: None,
            unpack: false,
            by_ref: false,
          });
        }
      }
    }
    lowered
  }

  fn lower_assignment(&mut self, node: TsNode<'_>, parent: Option<NodeId>) -> NodeId {
    let children = named_children(node);
    let target = node.child_by_field_name("left").or_else(|| children.first().copied());
    let value = node.child_by_field_name("right").or_else(|| children.last().copied());

    let (Some(target), Some(value)) = (target, value) else {
      return self.lower_other(node, parent);
    };

    let id = self.reserve(node, parent);
    let target = self.lower(target, Some(id));
    let value = self.lower(value, Some(id));
    self.finish(id, NodeKind::Assign { target, value })
  }

  fn lower_cast(&mut self, node: TsNode<'_>, parent: Option<NodeId>) -> NodeId {
    let children = named_children(node);
    let ty = node.child_by_field_name("type").or_else(|| children.first().copied());
    let value = node.child_by_field_name("value").or_else(|| children.last().copied());

    let (Some(ty), Some(value)) = (ty, value) else {
      return self.lower_other(node, parent);
    };

    let ty = self
      .text(ty)
      .trim_matches(|c: char| c == '(' || c == ')' || c.is_whitespace())
      .to_string();

    let id = self.reserve(node, parent);
    let value = self.lower(value, Some(id));
    self.finish(id, NodeKind::Cast { ty, value })
  }

  fn lower_interpolated(&mut self, node: TsNode<'_>, parent: Option<NodeId>) -> NodeId {
    let mut parts: Vec<Part<'_>> = Vec::new();

    for child in all_children(node) {
      let text = self.text(child);
      let literal = match child.kind() {
        "comment" => continue,
        _ if !child.is_named() => {
          if matches!(text, "\"" | "b\"" | "B\"" | "{" | "}" | "${") {
            continue;
          }
          decode_double_quoted(text)
        }
        "escape_sequence" | "string_content" | "string_value" | "string" | "text" => decode_double_quoted(text),
        _ => {
          parts.push(Part::Expr(child));
          continue;
        }
      };

      match parts.last_mut() {
        Some(Part::Literal { text, span }) => {
          text.push_str(&literal);
          span.end_byte = child.end_byte();
          span.end_line = child.end_position().row as u32 + 1;
        }
        _ => parts.push(Part::Literal {
          text: literal,
          span: span_of(child),
        }),
      }
    }

    self.finish_parts(node, parent, parts)
  }

  /// `<<<EOT` and `<<<'EOT'` bodies, with the closing marker's indentation removed
  fn lower_heredoc(&mut self, node: TsNode<'_>, parent: Option<NodeId>) -> NodeId {
    let text = self.text(node);
    let (Some(open), Some(close)) = (text.find('\n'), text.rfind('\n')) else {
      return self.lower_other(node, parent);
    };
    let nowdoc = node.kind() == "nowdoc";
    let closing = &text[close + 1..];
    let indent = closing.len() - closing.trim_start_matches([' ', '\t']).len();

    let mut body_end = node.start_byte() + close;
    if text[..close].ends_with('\r') {
      body_end -= 1;
    }
    let body_start = (node.start_byte() + open + 1).min(body_end);

    let mut exprs = Vec::new();
    if !nowdoc {
      collect_interpolations(node, body_start, body_end, &mut exprs);
    }

    let mut parts: Vec<Part<'_>> = Vec::new();
    let mut cursor = body_start;
    let mut line_start = true;
    for expr in exprs {
      let mut gap_end = expr.start_byte();
      let braced = self.source[cursor..gap_end].ends_with('{');
      if braced {
        gap_end -= 1;
      }
      self.push_heredoc_literal(&mut parts, cursor, gap_end, indent, line_start, nowdoc);
      parts.push(Part::Expr(expr));

      cursor = expr.end_byte();
      if braced && self.source[cursor..body_end].starts_with('}') {
        cursor += 1;
      }
      line_start = false;
    }
    self.push_heredoc_literal(&mut parts, cursor, body_end, indent, line_start, nowdoc);

    self.finish_parts(node, parent, parts)
  }

  fn push_heredoc_literal(
    &self,
    parts: &mut Vec<Part<'_>>,
    start: usize,
    end: usize,
    indent: usize,
    line_start: bool,
    nowdoc: bool,
  ) {
    if start >= end {
      return;
    }
    let raw = dedent(&self.source[start..end], indent, line_start);
    let text = if nowdoc { raw } else { decode_double_quoted(&raw) };
    parts.push(Part::Literal {
      text,
      span: self.span_between(start, end),
    });
  }

  /// `${name}` is the variable `$name`; `$$name` and `${expr}` stay opaque
  fn lower_dynamic_variable(&mut self, node: TsNode<'_>, parent: Option<NodeId>) -> NodeId {
    let children = named_children(node);
    match children.as_slice() {
      [name] if name.kind() == "name" && self.text(node).starts_with("${") => {
        let name = self.text(*name).to_string();
        self.leaf(node, parent, NodeKind::Variable(name))
      }
      _ => self.lower_other(node, parent),
    }
  }

  fn span_between(&self, start: usize, end: usize) -> Span {
    let line_of = |byte: usize| self.source[..byte].matches('\n').count() as u32 + 1;
    Span {
      start_byte: start,
      end_byte: end,
      start_line: line_of(start),
      end_line: line_of(end),
    }
  }

  /// A string node when every part is literal, otherwise an `Interpolated` node
  fn finish_parts(&mut self, node: TsNode<'_>, parent: Option<NodeId>, parts: Vec<Part<'_>>) -> NodeId {
    if parts.iter().all(|p| matches!(p, Part::Literal { .. })) {
      let value = parts
        .into_iter()
        .map(|p| match p {
          Part::Literal { text, .. } => text,
          Part::Expr(_) => String::new(),
        })
        .collect();
      return self.leaf(node, parent, NodeKind::String(value));
    }

    let id = self.reserve(node, parent);
    let mut lowered = Vec::with_capacity(parts.len());
    for part in parts {
      let part_id = match part {
        Part::Literal { text, span } => self.push_node(NodeKind::Fragment(text), span, Some(id)),
        Part::Expr(expr) if expr.kind() == "subscript_expression" => self.lower_subscript(expr, Some(id), true),
        Part::Expr(expr) => self.lower(expr, Some(id)),
      };
      lowered.push(part_id);
    }
    self.finish(id, NodeKind::Interpolated(lowered))
  }

  fn name_kind(&self, node: TsNode<'_>) -> NodeKind {
    let text: String = self.text(node).split_whitespace().collect();
    NodeKind::Name {
      fully_qualified: text.starts_with('\\'),
      segments: text
        .split('\\')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect(),
    }
  }
}

// ============================================================================
// Helpers
// ============================================================================

fn span_of(node: TsNode<'_>) -> Span {
  Span {
    start_byte: node.start_byte(),
    end_byte: node.end_byte(),
    start_line: node.start_position().row as u32 + 1,
    end_line: node.end_position().row as u32 + 1,
  }
}

/// Expressions interpolated into a heredoc body, in source order
fn collect_interpolations<'t>(node: TsNode<'t>, start: usize, end: usize, out: &mut Vec<TsNode<'t>>) {
  for child in named_children(node) {
    if child.end_byte() <= start || child.start_byte() >= end {
      continue;
    }
    match child.kind() {
      "string_content" | "string_value" | "escape_sequence" | "text" | "heredoc_start" | "heredoc_end" => {}
      "heredoc_body" => collect_interpolations(child, start, end, out),
      _ => out.push(child),
    }
  }
}

/// Strip up to `indent` leading blanks from each line
fn dedent(text: &str, indent: usize, at_line_start: bool) -> String {
  if indent == 0 {
    return text.to_string();
  }
  let mut out = String::with_capacity(text.len());
  for (i, line) in text.split('\n').enumerate() {
    if i > 0 {
      out.push('\n');
    }
    if i > 0 || at_line_start {
      let blanks = line.len() - line.trim_start_matches([' ', '\t']).len();
      out.push_str(&line[blanks.min(indent)..]);
    } else {
      out.push_str(line);
    }
  }
  out
}

fn named_children<'t>(node: TsNode<'t>) -> Vec<TsNode<'t>> {
  let mut cursor = node.walk();
  node
    .named_children(&mut cursor)
    .filter(|c| c.kind() != "comment")
    .collect()
}

fn all_children<'t>(node: TsNode<'t>) -> Vec<TsNode<'t>> {
  let mut cursor = node.walk();
  node.children(&mut cursor).collect()
}

/// Decode a quoted PHP string literal, with or without a binary `b` prefix
fn decode_string_literal(text: &str) -> String {
  let text = text.strip_prefix(['b', 'B']).unwrap_or(text);
  if let Some(inner) = text.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')) {
    decode_single_quoted(inner)
  } else if let Some(inner) = text.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
    decode_double_quoted(inner)
  } else {
    text.to_string()
  }
}

/// Single quoted strings only know `\\` and `\'`
fn decode_single_quoted(raw: &str) -> String {
  let mut out = String::with_capacity(raw.len());
  let mut chars = raw.chars().peekable();
  while let Some(c) = chars.next() {
    if c == '\\'
      && let Some(&next) = chars.peek()
      && (next == '\\' || next == '\'')
    {
      out.push(next);
      chars.next();
      continue;
    }
    out.push(c);
  }
  out
}

/// Decode double quoted escape sequences. Unknown escapes are kept verbatim, as PHP does.
pub(crate) fn decode_double_quoted(raw: &str) -> String {
  let chars: Vec<char> = raw.chars().collect();
  let mut out = String::with_capacity(raw.len());
  let mut i = 0;

  while i < chars.len() {
    let c = chars[i];
    if c != '\\' || i + 1 >= chars.len() {
      out.push(c);
      i += 1;
      continue;
    }

    let next = chars[i + 1];
    let simple = match next {
      'n' => Some('\n'),
      't' => Some('\t'),
      'r' => Some('\r'),
      'v' => Some('\u{0B}'),
      'e' => Some('\u{1B}'),
      'f' => Some('\u{0C}'),
      '\\' => Some('\\'),
      '$' => Some('$'),
      '"' => Some('"'),
      _ => None,
    };
    if let Some(decoded) = simple {
      out.push(decoded);
      i += 2;
      continue;
    }

    if next.is_digit(8) {
      let digits: String = chars[i + 1..].iter().take(3).take_while(|c| c.is_digit(8)).collect();
      let value = u32::from_str_radix(&digits, 8).unwrap_or(0) & 0xFF;
      out.push(char::from(value as u8));
      i += 1 + digits.len();
      continue;
    }

    if next == 'x' {
      let digits: String = chars[i + 2..].iter().take(2).take_while(|c| c.is_ascii_hexdigit()).collect();
      if !digits.is_empty() {
        let value = u8::from_str_radix(&digits, 16).unwrap_or(0);
        out.push(char::from(value));
        i += 2 + digits.len();
        continue;
      }
    }

    if next == 'u' && chars.get(i + 2) == Some(&'{') {
      let digits: String = chars[i + 3..].iter().take_while(|c| c.is_ascii_hexdigit()).collect();
      if chars.get(i + 3 + digits.len()) == Some(&'}')
        && let Some(decoded) = u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32)
      {
        out.push(decoded);
        i += 4 + digits.len();
        continue;
      }
    }

    out.push(c);
    i += 1;
  }

  out
}
