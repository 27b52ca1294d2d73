//! Doc-block parsing
//!
//! Turns a `/** ... */` comment into a summary, a long description and a list of tags.
//! The layout rules follow phpDocumentor: the summary ends at the first blank line or at the
//! first line ending in a period, and the description runs until the first line starting
//! with `@`.

mod tags;
mod types;

use serde::Serialize;

pub use tags::{ParamTag, Tag, TagBody, VersionTag};

use crate::{DocBlockError, NamespaceContext};

/// A parsed doc comment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocBlock {
  summary: String,
  description: String,
  tags: Vec<Tag>,
}

impl DocBlock {
  /// Parse raw comment text. Class names in tag types resolve against `ctx`.
  pub fn parse(comment: &str, ctx: &NamespaceContext) -> Result<Self, DocBlockError> {
    let lines = strip_decoration(comment)?;

    let tag_start = lines
      .iter()
      .position(|line| line.trim_start().starts_with('@'))
      .unwrap_or(lines.len());
    let (text, tag_lines) = lines.split_at(tag_start);

    let (summary, description) = split_summary(text);

    let mut tags = Vec::new();
    for raw in group_tag_lines(tag_lines) {
      tags.push(Tag::parse(&raw, ctx)?);
    }

    Ok(Self {
      summary,
      description,
      tags,
    })
  }

  pub fn summary(&self) -> &str {
    &self.summary
  }

  pub fn description(&self) -> &str {
    &self.description
  }

  pub fn tags(&self) -> &[Tag] {
    &self.tags
  }

  pub fn has_tag(&self, name: &str) -> bool {
    self.tags_by_name(name).next().is_some()
  }

  /// Tags with the given name, in declaration order
  pub fn tags_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Tag> + 'a {
    self.tags.iter().filter(move |t| t.name() == name)
  }

  /// All `@param` tags, in declaration order
  pub fn params(&self) -> impl Iterator<Item = &ParamTag> {
    self.tags.iter().filter_map(|t| match t.body() {
      TagBody::Param(param) => Some(param),
      _ => None,
    })
  }
}

/// Remove `/**`, `*/` and the leading `*` of every line
fn strip_decoration(comment: &str) -> Result<Vec<String>, DocBlockError> {
  let trimmed = comment.trim();
  let inner = trimmed
    .strip_prefix("/**")
    .and_then(|rest| rest.strip_suffix("*/"))
    .ok_or_else(|| DocBlockError::NotADocComment(first_line(trimmed)))?;

  let mut lines: Vec<String> = inner
    .lines()
    .map(|line| {
      let line = line.trim_start();
      let line = line.strip_prefix('*').unwrap_or(line);
      let line = line.strip_prefix([' ', '\t']).unwrap_or(line);
      line.trim_end().to_string()
    })
    .collect();

  while lines.first().is_some_and(|l| l.is_empty()) {
    lines.remove(0);
  }
  while lines.last().is_some_and(|l| l.is_empty()) {
    lines.pop();
  }

  Ok(lines)
}

fn split_summary(lines: &[String]) -> (String, String) {
  let mut summary = Vec::new();
  let mut rest = lines.len();

  for (i, line) in lines.iter().enumerate() {
    if line.trim().is_empty() {
      if summary.is_empty() {
        continue;
      }
      rest = i + 1;
      break;
    }
    summary.push(line.as_str());
    if line.ends_with('.') {
      rest = i + 1;
      break;
    }
  }

  let description = lines[rest.min(lines.len())..].join("\n").trim().to_string();
  (summary.join("\n"), description)
}

/// Join each `@tag` line with its continuation lines
fn group_tag_lines(lines: &[String]) -> Vec<String> {
  let mut grouped: Vec<String> = Vec::new();
  for line in lines {
    match grouped.last_mut() {
      Some(current) if !line.trim_start().starts_with('@') => {
        current.push('\n');
        current.push_str(line.trim());
      }
      _ => grouped.push(line.trim_start().to_string()),
    }
  }
  grouped
}

fn first_line(text: &str) -> String {
  text.lines().next().unwrap_or_default().to_string()
}
