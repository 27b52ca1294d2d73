//! Type expressions in doc-block tags
//!
//! Class names are resolved to fully qualified names; keyword types are normalized
//! (`integer` becomes `int`, `boolean` becomes `bool`). Everything else in the expression,
//! such as `|`, `?`, `[]` and generics, is kept as written.

use crate::NamespaceContext;

const KEYWORDS: &[&str] = &[
  "string", "int", "float", "bool", "array", "resource", "null", "callable", "mixed", "object", "void", "iterable",
  "false", "true", "self", "static", "parent", "never", "scalar", "numeric", "list",
];

pub(crate) fn resolve_type(raw: &str, ctx: &NamespaceContext) -> String {
  let mut out = String::with_capacity(raw.len());
  let mut word = String::new();
  let mut quote: Option<char> = None;
  // Keys of array shapes are not types
  let mut shape_depth = 0usize;

  for c in raw.trim().chars() {
    if let Some(q) = quote {
      out.push(c);
      if c == q {
        quote = None;
      }
      continue;
    }

    if c.is_alphanumeric() || matches!(c, '_' | '\\' | '-' | '$') {
      word.push(c);
      continue;
    }

    flush_word(&mut word, shape_depth > 0 && c == ':', ctx, &mut out);
    match c {
      '\'' | '"' => quote = Some(c),
      '{' => shape_depth += 1,
      '}' => shape_depth = shape_depth.saturating_sub(1),
      _ => {}
    }
    out.push(c);
  }
  flush_word(&mut word, false, ctx, &mut out);

  out
}

fn flush_word(word: &mut String, is_shape_key: bool, ctx: &NamespaceContext, out: &mut String) {
  if word.is_empty() {
    return;
  }
  if is_shape_key {
    out.push_str(word);
  } else {
    out.push_str(&resolve_word(word, ctx));
  }
  word.clear();
}

fn resolve_word(word: &str, ctx: &NamespaceContext) -> String {
  let lower = word.to_ascii_lowercase();
  match lower.as_str() {
    "integer" => return "int".to_string(),
    "boolean" => return "bool".to_string(),
    "double" | "real" => return "float".to_string(),
    _ => {}
  }

  if KEYWORDS.contains(&lower.as_str()) {
    return lower;
  }

  // `$this`, numeric literals and pseudo types such as `non-empty-string`
  if word.starts_with('$') || word.starts_with(|c: char| c.is_ascii_digit()) || word.contains('-') {
    return word.to_string();
  }

  ctx.resolve_class(word)
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_keywords_are_normalized() {
    let ctx = NamespaceContext::global();
    assert_eq!(resolve_type("integer", &ctx), "int");
    assert_eq!(resolve_type("Boolean|NULL", &ctx), "bool|null");
    assert_eq!(resolve_type("string[]", &ctx), "string[]");
    assert_eq!(resolve_type("?double", &ctx), "?float");
  }

  #[test]
  fn test_classes_resolve_against_namespace() {
    let mut ctx = NamespaceContext::new("Acme");
    ctx.add_alias("Order", "Shop\\Order");

    assert_eq!(resolve_type("WP_Post|false", &ctx), "\\Acme\\WP_Post|false");
    assert_eq!(resolve_type("\\WP_Post", &ctx), "\\WP_Post");
    assert_eq!(resolve_type("Order[]", &ctx), "\\Shop\\Order[]");
    assert_eq!(resolve_type("array<int, Order>", &ctx), "array<int, \\Shop\\Order>");
  }

  #[test]
  fn test_pseudo_types_and_shapes_pass_through() {
    let ctx = NamespaceContext::global();
    assert_eq!(resolve_type("non-empty-string", &ctx), "non-empty-string");
    assert_eq!(resolve_type("$this", &ctx), "$this");
    assert_eq!(resolve_type("array{id: int, name: string}", &ctx), "array{id: int, name: string}");
    assert_eq!(resolve_type("'a'|'b'", &ctx), "'a'|'b'");
  }
}
