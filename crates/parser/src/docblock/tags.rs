use serde::Serialize;

use super::types::resolve_type;
use crate::{DocBlockError, NamespaceContext};

/// A single `@name body` tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
  name: String,
  body: TagBody,
}

/// Tag contents. Tags without a dedicated shape keep their raw body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TagBody {
  Param(ParamTag),
  Since(VersionTag),
  Version(VersionTag),
  Deprecated(VersionTag),
  Generic { text: String },
}

impl Tag {
  /// Parse a tag starting with `@`, continuation lines already joined
  pub(crate) fn parse(raw: &str, ctx: &NamespaceContext) -> Result<Self, DocBlockError> {
    let after_at = raw.strip_prefix('@').unwrap_or(raw);
    let name_len = after_at
      .find(|c: char| !(c.is_alphanumeric() || matches!(c, '_' | '-' | '\\' | ':')))
      .unwrap_or(after_at.len());

    if name_len == 0 {
      return Err(DocBlockError::MalformedTag(raw.lines().next().unwrap_or(raw).to_string()));
    }

    let name = &after_at[..name_len];
    let body = after_at[name_len..].trim();

    let body = match name {
      "param" => TagBody::Param(ParamTag::parse(body, ctx)),
      "since" => TagBody::Since(VersionTag::parse(body)),
      "version" => TagBody::Version(VersionTag::parse(body)),
      "deprecated" => TagBody::Deprecated(VersionTag::parse(body)),
      _ => TagBody::Generic { text: body.to_string() },
    };

    Ok(Self {
      name: name.to_string(),
      body,
    })
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn body(&self) -> &TagBody {
    &self.body
  }
}

/// `@param Type $name Description`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParamTag {
  /// Variable name without the `$`
  variable_name: String,
  #[serde(rename = "type")]
  ty: String,
  description: String,
  variadic: bool,
  by_reference: bool,
}

impl ParamTag {
  fn parse(body: &str, ctx: &NamespaceContext) -> Self {
    let mut tag = ParamTag::default();
    let mut rest = body;

    let (first, after) = split_type_token(rest);
    if !first.is_empty() && !is_variable_token(first) {
      tag.ty = resolve_type(first, ctx);
      rest = after;
    }

    let (token, after) = split_type_token(rest);
    if is_variable_token(token) {
      let mut name = token;
      if let Some(stripped) = name.strip_prefix('&') {
        tag.by_reference = true;
        name = stripped;
      }
      if let Some(stripped) = name.strip_prefix("...") {
        tag.variadic = true;
        name = stripped;
      }
      tag.variable_name = name.trim_start_matches('$').to_string();
      rest = after;
    }

    tag.description = rest.trim().to_string();
    tag
  }

  pub fn variable_name(&self) -> &str {
    &self.variable_name
  }

  /// Resolved type, empty when the tag declares none
  pub fn ty(&self) -> &str {
    &self.ty
  }

  pub fn description(&self) -> &str {
    &self.description
  }

  pub fn is_variadic(&self) -> bool {
    self.variadic
  }

  pub fn is_by_reference(&self) -> bool {
    self.by_reference
  }
}

/// `@since 1.2.0 Description`, also used by `@version` and `@deprecated`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VersionTag {
  version: String,
  description: String,
}

impl VersionTag {
  fn parse(body: &str) -> Self {
    let (token, rest) = body.split_once(char::is_whitespace).unwrap_or((body, ""));

    if token.starts_with(|c: char| c.is_ascii_digit()) {
      Self {
        version: token.to_string(),
        description: rest.trim().to_string(),
      }
    } else {
      Self {
        version: String::new(),
        description: body.to_string(),
      }
    }
  }

  pub fn version(&self) -> &str {
    &self.version
  }

  pub fn description(&self) -> &str {
    &self.description
  }
}

fn is_variable_token(token: &str) -> bool {
  ["$", "&$", "...$", "&...$"].iter().any(|p| token.starts_with(p))
}

/// Split off the first whitespace-delimited token, keeping `array<int, string>` style types whole
fn split_type_token(text: &str) -> (&str, &str) {
  let text = text.trim_start();
  let mut depth = 0usize;

  for (i, c) in text.char_indices() {
    match c {
      '<' | '(' | '{' | '[' => depth += 1,
      '>' | ')' | '}' | ']' => depth = depth.saturating_sub(1),
      c if c.is_whitespace() && depth == 0 => return (&text[..i], &text[i..]),
      _ => {}
    }
  }

  (text, "")
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn tag(raw: &str) -> Tag {
    Tag::parse(raw, &NamespaceContext::global()).unwrap()
  }

  fn param(raw: &str) -> ParamTag {
    match tag(raw).body {
      TagBody::Param(p) => p,
      other => panic!("expected param tag, got {:?}", other),
    }
  }

  #[test]
  fn test_param_with_type_and_description() {
    let p = param("@param int $a Description.");
    assert_eq!(p.variable_name(), "a");
    assert_eq!(p.ty(), "int");
    assert_eq!(p.description(), "Description.");
  }

  #[test]
  fn test_param_without_type() {
    let p = param("@param $post The post.");
    assert_eq!(p.variable_name(), "post");
    assert_eq!(p.ty(), "");
    assert_eq!(p.description(), "The post.");
  }

  #[test]
  fn test_param_generic_type_with_spaces() {
    let p = param("@param array<string, WP_Post> $posts Posts by slug.");
    assert_eq!(p.ty(), "array<string, \\WP_Post>");
    assert_eq!(p.variable_name(), "posts");
  }

  #[test]
  fn test_param_markers() {
    let p = param("@param mixed ...$args Extra.");
    assert!(p.is_variadic());
    assert_eq!(p.variable_name(), "args");

    let p = param("@param array &$items Items.");
    assert!(p.is_by_reference());
    assert_eq!(p.variable_name(), "items");
  }

  #[test]
  fn test_version_tags() {
    let t = tag("@since 5.5.0 Added the `$context` parameter.");
    assert_eq!(
      t.body(),
      &TagBody::Since(VersionTag {
        version: "5.5.0".to_string(),
        description: "Added the `$context` parameter.".to_string(),
      })
    );

    let t = tag("@deprecated Use another hook.");
    let TagBody::Deprecated(v) = t.body() else {
      panic!("expected deprecated tag");
    };
    assert_eq!(v.version(), "");
    assert_eq!(v.description(), "Use another hook.");
  }

  #[test]
  fn test_generic_and_namespaced_tags() {
    assert_eq!(tag("@ignore").name(), "ignore");
    assert_eq!(tag("@phpstan-param int $x").name(), "phpstan-param");
    assert_eq!(
      tag("@link https://example.com").body(),
      &TagBody::Generic {
        text: "https://example.com".to_string()
      }
    );
  }
}
