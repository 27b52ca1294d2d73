//! Hook records

use std::sync::Arc;

use hookdoc_core::SourceFile;
use parser::{DocBlock, ParamTag, Span};
use serde::Serialize;

/// Whether a hook is an action or a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HookKind {
  Action,
  Filter,
}

impl HookKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      HookKind::Action => "action",
      HookKind::Filter => "filter",
    }
  }
}

impl std::fmt::Display for HookKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// The six functions that fire a hook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HookFunction {
  ApplyFilters,
  ApplyFiltersRefArray,
  ApplyFiltersDeprecated,
  DoAction,
  DoActionRefArray,
  DoActionDeprecated,
}

impl HookFunction {
  pub const ALL: [HookFunction; 6] = [
    HookFunction::ApplyFilters,
    HookFunction::ApplyFiltersRefArray,
    HookFunction::ApplyFiltersDeprecated,
    HookFunction::DoAction,
    HookFunction::DoActionRefArray,
    HookFunction::DoActionDeprecated,
  ];

  /// Match a called function name exactly
  pub fn from_name(name: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|f| f.name() == name)
  }

  pub fn name(&self) -> &'static str {
    match self {
      HookFunction::ApplyFilters => "apply_filters",
      HookFunction::ApplyFiltersRefArray => "apply_filters_ref_array",
      HookFunction::ApplyFiltersDeprecated => "apply_filters_deprecated",
      HookFunction::DoAction => "do_action",
      HookFunction::DoActionRefArray => "do_action_ref_array",
      HookFunction::DoActionDeprecated => "do_action_deprecated",
    }
  }

  pub fn kind(&self) -> HookKind {
    match self {
      HookFunction::ApplyFilters | HookFunction::ApplyFiltersRefArray | HookFunction::ApplyFiltersDeprecated => {
        HookKind::Filter
      }
      HookFunction::DoAction | HookFunction::DoActionRefArray | HookFunction::DoActionDeprecated => HookKind::Action,
    }
  }

  pub fn is_deprecated(&self) -> bool {
    matches!(self, HookFunction::ApplyFiltersDeprecated | HookFunction::DoActionDeprecated)
  }
}

/// A payload argument of a hook call (every argument after the tag)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Argument {
  /// Pretty-printed argument expression
  pub expression: String,
  /// Variable name without `$`, only for plain variable arguments
  pub variable: Option<String>,
  /// The `@param` tag documenting this argument
  pub param: Option<ParamTag>,
}

impl Argument {
  pub fn name(&self) -> Option<&str> {
    self.variable.as_deref()
  }

  pub fn ty(&self) -> Option<&str> {
    self.param.as_ref().map(ParamTag::ty)
  }

  pub fn description(&self) -> Option<&str> {
    self.param.as_ref().map(ParamTag::description)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangelogEntry {
  pub version: String,
  pub description: String,
}

/// One documented hook call site
#[derive(Debug, Clone, Serialize)]
pub struct Hook {
  #[serde(serialize_with = "serialize_file")]
  pub file: Arc<SourceFile>,
  pub function: HookFunction,
  pub tag: String,
  pub arguments: Vec<Argument>,
  pub doc_comment: Option<String>,
  pub doc_block: Option<DocBlock>,
  /// Absent when the hook has no doc block
  pub changelog: Option<Vec<ChangelogEntry>>,
  pub span: Span,
}

impl Hook {
  pub fn kind(&self) -> HookKind {
    self.function.kind()
  }

  pub fn is_action(&self) -> bool {
    self.kind() == HookKind::Action
  }

  pub fn is_filter(&self) -> bool {
    self.kind() == HookKind::Filter
  }

  pub fn summary(&self) -> &str {
    self.doc_block.as_ref().map(DocBlock::summary).unwrap_or_default()
  }

  pub fn description(&self) -> &str {
    self.doc_block.as_ref().map(DocBlock::description).unwrap_or_default()
  }

  pub fn start_line(&self) -> u32 {
    self.span.start_line
  }

  pub fn end_line(&self) -> u32 {
    self.span.end_line
  }
}

fn serialize_file<S: serde::Serializer>(file: &Arc<SourceFile>, serializer: S) -> Result<S::Ok, S::Error> {
  serializer.collect_str(&file.path().display())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_function_vocabulary() {
    for function in HookFunction::ALL {
      assert_eq!(HookFunction::from_name(function.name()), Some(function));
    }
    assert_eq!(HookFunction::from_name("Do_Action"), None);
    assert_eq!(HookFunction::from_name("add_action"), None);

    let filters = HookFunction::ALL.iter().filter(|f| f.kind() == HookKind::Filter).count();
    assert_eq!(filters, 3);
    assert!(HookFunction::DoActionDeprecated.is_deprecated());
    assert!(!HookFunction::ApplyFilters.is_deprecated());
  }
}
