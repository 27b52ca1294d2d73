//! Doc comment lookup for hook calls
//!
//! A call's own doc comment wins. Otherwise the lookup climbs one parent at a time, but only
//! through constructs that wrap a call: assignments, casts, `if` and `return`. Anything else,
//! a function body in particular, ends the search, so a function's doc comment is never taken
//! for a hook fired inside it.

use parser::{Comment, NodeId, NodeKind, SyntaxTree};

pub fn find_doc_comment(tree: &SyntaxTree, id: NodeId) -> Option<&Comment> {
  if let Some(comment) = tree.doc_comment(id) {
    return Some(comment);
  }

  for parent in tree.ancestors(id) {
    match tree.kind(parent) {
      NodeKind::Assign { .. } | NodeKind::Cast { .. } | NodeKind::If { .. } | NodeKind::Return(_) => {}
      _ => return None,
    }
    if let Some(comment) = tree.doc_comment(parent) {
      return Some(comment);
    }
  }
  None
}
