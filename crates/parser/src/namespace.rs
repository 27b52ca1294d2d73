//! Namespace scopes and `use` imports, used to resolve class names in doc-block types

use std::collections::BTreeMap;

/// Namespace name plus class imports in effect at some point of a file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceContext {
  namespace: String,
  /// Lowercased alias -> fully qualified name without leading `\`
  aliases: BTreeMap<String, String>,
}

impl NamespaceContext {
  /// The global namespace with no imports
  pub fn global() -> Self {
    Self::default()
  }

  pub fn new(namespace: impl Into<String>) -> Self {
    Self {
      namespace: namespace.into().trim_matches('\\').to_string(),
      aliases: BTreeMap::new(),
    }
  }

  pub fn namespace(&self) -> &str {
    &self.namespace
  }

  /// Register `use {fqn} as {alias}`
  pub fn add_alias(&mut self, alias: &str, fqn: &str) {
    self
      .aliases
      .insert(alias.to_ascii_lowercase(), fqn.trim_start_matches('\\').to_string());
  }

  /// Look up an imported class alias (case-insensitive, like PHP)
  pub fn alias(&self, alias: &str) -> Option<&str> {
    self.aliases.get(&alias.to_ascii_lowercase()).map(String::as_str)
  }

  /// Resolve a class reference to its fully qualified form with a leading `\`
  pub fn resolve_class(&self, name: &str) -> String {
    if name.starts_with('\\') {
      return name.to_string();
    }

    let (first, rest) = match name.split_once('\\') {
      Some((first, rest)) => (first, Some(rest)),
      None => (name, None),
    };

    if let Some(fqn) = self.alias(first) {
      return match rest {
        Some(rest) => format!("\\{}\\{}", fqn, rest),
        None => format!("\\{}", fqn),
      };
    }

    // `namespace\Foo` is relative to the current namespace
    let name = if first.eq_ignore_ascii_case("namespace") {
      rest.unwrap_or_default()
    } else {
      name
    };

    if self.namespace.is_empty() {
      format!("\\{}", name)
    } else {
      format!("\\{}\\{}", self.namespace, name)
    }
  }
}

/// Parse the text of a `use` declaration into `(alias, fully qualified name)` pairs.
///
/// Handles aliases and group uses. `use function` / `use const` imports are not class
/// imports and are skipped.
pub(crate) fn parse_use_declaration(text: &str) -> Vec<(String, String)> {
  let body = text.trim().trim_end_matches(';').trim();
  let Some(body) = strip_keyword(body, "use") else {
    return Vec::new();
  };

  if strip_keyword(body, "function").is_some() || strip_keyword(body, "const").is_some() {
    return Vec::new();
  }

  let mut imports = Vec::new();

  if let Some((prefix, group)) = body.split_once('{') {
    let prefix = prefix.trim().trim_end_matches('\\');
    let group = group.trim_end().trim_end_matches('}');
    for item in group.split(',') {
      let item = item.trim();
      if item.is_empty() || strip_keyword(item, "function").is_some() || strip_keyword(item, "const").is_some() {
        continue;
      }
      if let Some((alias, name)) = parse_use_item(item) {
        imports.push((alias, format!("{}\\{}", prefix.trim_start_matches('\\'), name)));
      }
    }
  } else {
    imports.extend(body.split(',').filter_map(|item| parse_use_item(item.trim())));
  }

  imports
}

/// `Foo\Bar` or `Foo\Bar as Baz`
fn parse_use_item(item: &str) -> Option<(String, String)> {
  let mut tokens = item.split_whitespace();
  let name = tokens.next()?.trim_start_matches('\\');
  let alias = match (tokens.next(), tokens.next()) {
    (Some(kw), Some(alias)) if kw.eq_ignore_ascii_case("as") => alias.to_string(),
    _ => name.rsplit('\\').next().unwrap_or(name).to_string(),
  };
  Some((alias, name.to_string()))
}

fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
  let head = text.get(..keyword.len())?;
  let rest = &text[keyword.len()..];
  (head.eq_ignore_ascii_case(keyword) && rest.starts_with(char::is_whitespace)).then(|| rest.trim_start())
}
