//! Tag resolution: turn the first argument of a hook call into a display name
//!
//! Dynamic parts become placeholders instead of being evaluated, so
//! `'save_' . $post->post_type` resolves to `save_{$post->post_type}`.

use parser::{NodeId, NodeKind, SyntaxTree, print_expr};

/// The expression cannot be turned into a tag name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedExpression {
  /// Kind of the offending node, e.g. `method_call`
  pub kind: &'static str,
  /// Offending node printed as PHP
  pub printed: String,
}

/// Resolve a tag expression into its display string
pub fn resolve_tag(tree: &SyntaxTree, id: NodeId) -> Result<String, UnsupportedExpression> {
  let mut out = String::new();
  write_tag(tree, id, &mut out)?;
  Ok(out)
}

fn write_tag(tree: &SyntaxTree, id: NodeId, out: &mut String) -> Result<(), UnsupportedExpression> {
  match tree.kind(id) {
    NodeKind::String(value) | NodeKind::Fragment(value) => out.push_str(value),
    NodeKind::Concat { left, right } => {
      write_tag(tree, *left, out)?;
      write_tag(tree, *right, out)?;
    }
    NodeKind::Interpolated(parts) => {
      for &part in parts {
        write_tag(tree, part, out)?;
      }
    }
    NodeKind::Variable(name) => {
      out.push_str("{$");
      out.push_str(name);
      out.push('}');
    }
    NodeKind::PropertyFetch { object, property } => match (tree.kind(*object), tree.kind(*property)) {
      (NodeKind::Variable(var), NodeKind::Identifier(prop)) => {
        out.push_str("{$");
        out.push_str(var);
        out.push_str("->");
        out.push_str(prop);
        out.push('}');
      }
      _ => return Err(unsupported(tree, id)),
    },
    NodeKind::Index { base, dim } => {
      let Some(dim) = dim else {
        return Err(unsupported(tree, id));
      };
      write_tag(tree, *base, out)?;
      out.push('[');
      write_tag(tree, *dim, out)?;
      out.push(']');
    }
    NodeKind::ClassConstant { class, constant } => {
      write_tag(tree, *class, out)?;
      out.push_str("::");
      write_tag(tree, *constant, out)?;
    }
    // Arguments are not part of the placeholder
    NodeKind::Call { callee, .. } => match tree.kind(*callee) {
      NodeKind::Name { .. } => {
        write_tag(tree, *callee, out)?;
        out.push_str("()");
      }
      _ => return Err(unsupported(tree, id)),
    },
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
    NodeKind::MethodCall { .. }
    | NodeKind::ConstFetch(_)
    | NodeKind::Assign { .. }
    | NodeKind::Cast { .. }
    | NodeKind::ExpressionStatement(_)
    | NodeKind::Return(_)
    | NodeKind::If { .. }
    | NodeKind::Function { .. }
    | NodeKind::Namespace { .. }
    | NodeKind::Other { .. } => return Err(unsupported(tree, id)),
  }
  Ok(())
}

fn unsupported(tree: &SyntaxTree, id: NodeId) -> UnsupportedExpression {
  UnsupportedExpression {
    kind: tree.kind(id).name(),
    printed: print_expr(tree, id),
  }
}
