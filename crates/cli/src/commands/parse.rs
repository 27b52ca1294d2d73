//! `hookdoc parse` - extract hooks from PHP sources and render them

use anyhow::{Context, Result};
use cli::{RenderOptions, discover_sources, render};
use extract::{Documentor, PrefixFilter};
use hookdoc_core::{Config, ErrorPolicy, SourceFile};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

use crate::ParseArgs;

/// Directory whose `hookdoc.toml` applies to a run: the first source (or its parent)
pub fn project_root(sources: &[PathBuf]) -> PathBuf {
  match sources.first() {
    Some(source) if source.is_dir() => source.clone(),
    Some(source) => source
      .parent()
      .filter(|p| !p.as_os_str().is_empty())
      .map(Path::to_path_buf)
      .unwrap_or_else(|| PathBuf::from(".")),
    None => PathBuf::from("."),
  }
}

/// Command line flags take precedence over configuration values
fn apply_overrides(config: &mut Config, args: &ParseArgs) {
  if let Some(format) = args.format {
    config.output.format = format;
  }
  if let Some(hook_type) = args.hook_type {
    config.output.hook_type = Some(hook_type);
  }
  if let Some(relative) = &args.relative {
    config.output.relative = Some(relative.clone());
  }
  if !args.prefix.is_empty() {
    config.scan.prefixes = args.prefix.clone();
  }
  config.scan.exclude.extend(args.exclude.iter().cloned());
  if args.keep_going {
    config.scan.on_error = ErrorPolicy::Skip;
  }
  if args.sequential {
    config.scan.parallel = false;
  }
}

pub fn cmd_parse(args: ParseArgs, mut config: Config) -> Result<()> {
  apply_overrides(&mut config, &args);
  let start = Instant::now();

  let paths = discover_sources(&args.sources, &config.scan)?;
  let files = paths
    .iter()
    .map(|path| SourceFile::read(path).with_context(|| format!("Failed to read {}", path.display())))
    .collect::<Result<Vec<_>>>()?;

  let mut documentor = Documentor::new(PrefixFilter::new(&config.scan.prefixes))?;
  let report = if config.scan.parallel {
    documentor.parse_files_parallel(files, config.scan.on_error)?
  } else {
    documentor.parse_files(files, config.scan.on_error)?
  };

  if !report.failures.is_empty() {
    warn!(skipped = report.failures.len(), "Some files were skipped");
  }
  info!(
    files = report.files,
    hooks = report.hooks,
    elapsed_ms = start.elapsed().as_millis() as u64,
    "Parse command finished"
  );

  let options = RenderOptions {
    hook_type: config.output.hook_type,
    relative: config.output.relative.clone(),
  };
  let rendered = render(documentor.hooks(), config.output.format, &options)?;

  match &args.output {
    Some(path) => {
      std::fs::write(path, rendered).with_context(|| format!("Failed to write {}", path.display()))?;
      info!(path = %path.display(), "Wrote hook documentation");
    }
    None => print!("{}", rendered),
  }

  Ok(())
}
