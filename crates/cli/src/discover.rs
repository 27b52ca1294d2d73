//! PHP source discovery
//!
//! Directories are walked with the `ignore` crate so `.gitignore` rules apply the same way
//! they do for git. Exclude globs are applied as negated overrides.

use anyhow::{Context, Result, bail};
use hookdoc_core::ScanConfig;
use ignore::WalkBuilder;
use ignore::overrides::OverrideBuilder;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Expand the given files and directories into the list of PHP files to scan.
///
/// Files named directly are always included. Files found under a directory are sorted, and
/// each input keeps its position, so runs are reproducible.
pub fn discover_sources(sources: &[PathBuf], scan: &ScanConfig) -> Result<Vec<PathBuf>> {
  let mut files = Vec::new();

  for source in sources {
    if source.is_file() {
      files.push(source.clone());
    } else if source.is_dir() {
      let mut found = walk_directory(source, scan)?;
      debug!(root = %source.display(), files = found.len(), "Discovered sources");
      files.append(&mut found);
    } else {
      bail!("Source not found: {}", source.display());
    }
  }

  Ok(files)
}

fn walk_directory(root: &Path, scan: &ScanConfig) -> Result<Vec<PathBuf>> {
  let mut overrides = OverrideBuilder::new(root);
  for pattern in &scan.exclude {
    overrides
      .add(&format!("!{}", pattern))
      .with_context(|| format!("Invalid exclude pattern: {}", pattern))?;
  }
  let overrides = overrides.build().context("Failed to build exclude patterns")?;

  let walker = WalkBuilder::new(root)
    .git_ignore(scan.respect_gitignore)
    .git_global(scan.respect_gitignore)
    .git_exclude(scan.respect_gitignore)
    .ignore(scan.respect_gitignore)
    .require_git(false)
    .overrides(overrides)
    .build();

  let mut files = Vec::new();
  for entry in walker {
    let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
    if !entry.file_type().is_some_and(|t| t.is_file()) {
      continue;
    }
    if has_extension(entry.path(), &scan.extensions) {
      files.push(entry.into_path());
    }
  }

  files.sort();
  Ok(files)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
  path
    .extension()
    .and_then(|e| e.to_str())
    .is_some_and(|ext| extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)))
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use std::fs;
  use tempfile::TempDir;

  fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "<?php\n").unwrap();
  }

  fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
    files
      .iter()
      .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
      .collect()
  }

  #[test]
  fn test_walks_sorted_php_files() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "src/b.php");
    touch(temp.path(), "src/a.php");
    touch(temp.path(), "plugin.php");
    touch(temp.path(), "readme.txt");

    let files = discover_sources(&[temp.path().to_path_buf()], &ScanConfig::default()).unwrap();
    assert_eq!(relative(temp.path(), &files), vec!["plugin.php", "src/a.php", "src/b.php"]);
  }

  #[test]
  fn test_exclude_and_gitignore() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "plugin.php");
    touch(temp.path(), "vendor/lib.php");
    touch(temp.path(), "build/gen.php");
    fs::write(temp.path().join(".gitignore"), "build/\n").unwrap();

    let scan = ScanConfig {
      exclude: vec!["vendor/".to_string()],
      ..ScanConfig::default()
    };
    let files = discover_sources(&[temp.path().to_path_buf()], &scan).unwrap();
    assert_eq!(relative(temp.path(), &files), vec!["plugin.php"]);

    let scan = ScanConfig {
      respect_gitignore: false,
      ..ScanConfig::default()
    };
    let files = discover_sources(&[temp.path().to_path_buf()], &scan).unwrap();
    assert_eq!(
      relative(temp.path(), &files),
      vec!["build/gen.php", "plugin.php", "vendor/lib.php"]
    );
  }

  #[test]
  fn test_direct_file_and_missing_source() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "notes.inc");

    let direct = temp.path().join("notes.inc");
    let files = discover_sources(std::slice::from_ref(&direct), &ScanConfig::default()).unwrap();
    assert_eq!(files, vec![direct]);

    assert!(discover_sources(&[temp.path().join("missing")], &ScanConfig::default()).is_err());
  }
}
