//! Pretty printing of lowered expressions back to PHP source
//!
//! Used for argument text and diagnostics. Output is normalized: single quoted strings,
//! single spaces around operators, no source formatting preserved.

use crate::tree::{Argument, NodeId, NodeKind, SyntaxTree};

/// Render an expression as PHP code
pub fn print_expr(tree: &SyntaxTree, id: NodeId) -> String {
  let mut out = String::new();
  write_expr(tree, id, &mut out);
  out
}

fn write_expr(tree: &SyntaxTree, id: NodeId, out: &mut String) {
  match tree.kind(id) {
    NodeKind::String(value) => write_single_quoted(value, out),
    NodeKind::Fragment(text) => out.push_str(&escape_double_quoted(text)),
    NodeKind::Interpolated(parts) => {
      out.push('"');
      for &part in parts {
        match tree.kind(part) {
          NodeKind::Fragment(text) => out.push_str(&escape_double_quoted(text)),
          _ => {
            out.push('{');
            write_expr(tree, part, out);
            out.push('}');
          }
        }
      }
      out.push('"');
    }
    NodeKind::Concat { left, right } => {
      write_expr(tree, *left, out);
      out.push_str(" . ");
      write_expr(tree, *right, out);
    }
    NodeKind::Variable(name) => {
      out.push('$');
      out.push_str(name);
    }
    NodeKind::PropertyFetch { object, property } => {
      write_expr(tree, *object, out);
      out.push_str("->");
      write_member(tree, *property, out);
    }
    NodeKind::Index { base, dim } => {
      write_expr(tree, *base, out);
      out.push('[');
      if let Some(dim) = dim {
        write_expr(tree, *dim, out);
      }
      out.push(']');
    }
    NodeKind::ClassConstant { class, constant } => {
      write_expr(tree, *class, out);
      out.push_str("::");
      write_member(tree, *constant, out);
    }
    NodeKind::Call { callee, args } => {
      write_expr(tree, *callee, out);
      write_args(tree, args, out);
    }
    NodeKind::MethodCall { object, method, args } => {
      write_expr(tree, *object, out);
      out.push_str("->");
      write_member(tree, *method, out);
      write_args(tree, args, out);
    }
    NodeKind::ConstFetch(name) => write_expr(tree, *name, out),
    NodeKind::Name {
      segments,
      fully_qualified,
    } => {
      if *fully_qualified {
        out.push('\\');
      }
      out.push_str(&segments.join("\\"));
    }
    NodeKind::Identifier(name) => out.push_str(name),
    NodeKind::Assign { target, value } => {
      write_expr(tree, *target, out);
      out.push_str(" = ");
      write_expr(tree, *value, out);
    }
    NodeKind::Cast { ty, value } => {
      out.push('(');
      out.push_str(ty);
      out.push_str(") ");
      write_expr(tree, *value, out);
    }
    NodeKind::ExpressionStatement(_)
    | NodeKind::Return(_)
    | NodeKind::If { .. }
    | NodeKind::Function { .. }
    | NodeKind::Namespace { .. }
    | NodeKind::Other { .. } => write_source(tree, id, out),
  }
}

/// Dynamic member names (`$obj->$prop`, `$obj->{'x'}`) print as expressions
fn write_member(tree: &SyntaxTree, id: NodeId, out: &mut String) {
  match tree.kind(id) {
    NodeKind::Identifier(name) => out.push_str(name),
    NodeKind::Variable(_) => write_expr(tree, id, out),
    _ => {
      out.push('{');
      write_expr(tree, id, out);
      out.push('}');
    }
  }
}

fn write_args(tree: &SyntaxTree, args: &[Argument], out: &mut String) {
  out.push('(');
  for (i, arg) in args.iter().enumerate() {
    if i > 0 {
      out.push_str(", ");
    }
    if let Some(name) = &arg.name {
      out.push_str(name);
      out.push_str(": ");
    }
    if arg.unpack {
      out.push_str("...");
    }
    if arg.by_ref {
      out.push('&');
    }
    write_expr(tree, arg.value, out);
  }
  out.push(')');
}

/// Nodes without a dedicated printer fall back to their source, whitespace collapsed
fn write_source(tree: &SyntaxTree, id: NodeId, out: &mut String) {
  let mut first = true;
  for word in tree.text(id).split_whitespace() {
    if !first {
      out.push(' ');
    }
    out.push_str(word);
    first = false;
  }
}

fn write_single_quoted(value: &str, out: &mut String) {
  out.push('\'');
  for c in value.chars() {
    if c == '\'' || c == '\\' {
      out.push('\\');
    }
    out.push(c);
  }
  out.push('\'');
}

fn escape_double_quoted(text: &str) -> String {
  let mut escaped = String::with_capacity(text.len());
  for c in text.chars() {
    match c {
      '\n' => escaped.push_str("\\n"),
      '\t' => escaped.push_str("\\t"),
      '\r' => escaped.push_str("\\r"),
      '"' => escaped.push_str("\\\""),
      '\\' => escaped.push_str("\\\\"),
      '$' => escaped.push_str("\\$"),
      _ => escaped.push(c),
    }
  }
  escaped
}
