use std::path::{Path, PathBuf};

/// A PHP source file: path plus its raw, immutable contents.
///
/// Hooks hold an `Arc<SourceFile>` so every hook of a file points at the same handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
  path: PathBuf,
  contents: String,
}

impl SourceFile {
  pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      contents: contents.into(),
    }
  }

  /// Read a file from disk
  pub fn read(path: impl Into<PathBuf>) -> std::io::Result<Self> {
    let path = path.into();
    let contents = std::fs::read_to_string(&path)?;
    Ok(Self { path, contents })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn contents(&self) -> &str {
    &self.contents
  }
}
