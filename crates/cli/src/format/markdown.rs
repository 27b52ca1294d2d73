//! Markdown hook reference

use extract::{Hook, HookCollection};
use hookdoc_core::HookType;

use super::{RenderOptions, relative_path};

pub(super) fn render(hooks: &HookCollection, options: &RenderOptions) -> String {
  let mut out = String::from("# Hooks\n\n");

  if options.hook_type != Some(HookType::Filters) {
    section(&mut out, "Actions", hooks.actions(), options);
  }
  if options.hook_type != Some(HookType::Actions) {
    section(&mut out, "Filters", hooks.filters(), options);
  }

  out
}

fn section<'a>(out: &mut String, title: &str, hooks: impl Iterator<Item = &'a Hook>, options: &RenderOptions) {
  out.push_str(&format!("## {}\n\n", title));

  let mut empty = true;
  for hook in hooks {
    empty = false;
    render_hook(out, hook, options);
  }
  if empty {
    out.push_str(&format!("No {}.\n\n", title.to_lowercase()));
  }
}

fn render_hook(out: &mut String, hook: &Hook, options: &RenderOptions) {
  out.push_str(&format!("### `{}`\n\n", hook.tag));
  if hook.function.is_deprecated() {
    out.push_str(&format!("**Deprecated.** Fired through `{}`.\n\n", hook.function.name()));
  }

  if !hook.summary().is_empty() {
    out.push_str(&format!("{}\n\n", hook.summary()));
  }
  if !hook.description().is_empty() {
    out.push_str(&format!("{}\n\n", hook.description()));
  }

  if let Some(doc_block) = &hook.doc_block {
    out.push_str("**Arguments**\n\n");
    let params: Vec<_> = doc_block.params().collect();
    if params.is_empty() {
      out.push_str("No arguments.\n\n");
    } else {
      out.push_str("Argument | Type | Description\n");
      out.push_str("-------- | ---- | -----------\n");
      for param in params {
        let ty = if param.ty().is_empty() {
          String::new()
        } else {
          format!("`{}`", escape_cell(param.ty()))
        };
        let marker = match (param.is_variadic(), param.is_by_reference()) {
          (true, true) => "&...",
          (true, false) => "...",
          (false, true) => "&",
          (false, false) => "",
        };
        out.push_str(&format!(
          "`{}${}` | {} | {}\n",
          marker,
          param.variable_name(),
          ty,
          escape_cell(param.description())
        ));
      }
      out.push('\n');
    }
  }

  if let Some(changelog) = hook.changelog.as_deref()
    && !changelog.is_empty()
  {
    out.push_str("**Changelog**\n\n");
    out.push_str("Version | Description\n");
    out.push_str("------- | -----------\n");
    for entry in changelog {
      let row = format!("`{}` | {}", entry.version, escape_cell(&entry.description));
      out.push_str(row.trim_end());
      out.push('\n');
    }
    out.push('\n');
  }

  let link = relative_path(hook.file.path(), options.relative.as_deref());
  out.push_str(&format!(
    "Source: [{}]({}), [line {}]({}#L{}-L{})\n\n",
    hook.file.path().display(),
    link,
    hook.start_line(),
    link,
    hook.start_line(),
    hook.end_line()
  ));
}

/// Make text safe inside a markdown table cell
fn escape_cell(text: &str) -> String {
  text
    .replace('|', "\\|")
    .replace("\r\n", "<br>")
    .replace(['\r', '\n'], "<br>")
}
