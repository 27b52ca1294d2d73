//! Hook renderers: console table, markdown reference and JSON

mod json;
mod markdown;
mod table;

use anyhow::Result;
use extract::{Hook, HookCollection};
use hookdoc_core::{HookType, OutputFormat};
use std::path::{Component, Path, PathBuf};

/// Settings shared by all renderers
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
  /// Only render actions or filters
  pub hook_type: Option<HookType>,
  /// Base directory for source links
  pub relative: Option<PathBuf>,
}

impl RenderOptions {
  fn wants(&self, hook: &Hook) -> bool {
    match self.hook_type {
      None => true,
      Some(HookType::Actions) => hook.is_action(),
      Some(HookType::Filters) => hook.is_filter(),
    }
  }
}

/// Render a collection in the requested format
pub fn render(hooks: &HookCollection, format: OutputFormat, options: &RenderOptions) -> Result<String> {
  match format {
    OutputFormat::Default => {
      let selected: Vec<&Hook> = hooks.iter().filter(|h| options.wants(h)).collect();
      Ok(table::render(&selected))
    }
    OutputFormat::Markdown => Ok(markdown::render(hooks, options)),
    OutputFormat::Json => {
      let selected: Vec<&Hook> = hooks.iter().filter(|h| options.wants(h)).collect();
      json::render(&selected)
    }
  }
}

/// Path of `file` relative to `base`, with `/` separators.
///
/// Both paths are canonicalized when they exist so `./src` and `src` compare equal.
/// Without a base the path is returned as given.
pub fn relative_path(file: &Path, base: Option<&Path>) -> String {
  let Some(base) = base else {
    return to_slashes(file);
  };

  let file = std::fs::canonicalize(file).unwrap_or_else(|_| file.to_path_buf());
  let base = std::fs::canonicalize(base).unwrap_or_else(|_| base.to_path_buf());

  let file_parts: Vec<Component<'_>> = file.components().collect();
  let base_parts: Vec<Component<'_>> = base.components().collect();
  let common = file_parts
    .iter()
    .zip(&base_parts)
    .take_while(|(a, b)| a == b)
    .count();

  let mut relative = PathBuf::new();
  for _ in common..base_parts.len() {
    relative.push("..");
  }
  for part in &file_parts[common..] {
    relative.push(part.as_os_str());
  }

  to_slashes(&relative)
}

fn to_slashes(path: &Path) -> String {
  path
    .components()
    .map(|c| c.as_os_str().to_string_lossy().into_owned())
    .collect::<Vec<_>>()
    .join("/")
}
