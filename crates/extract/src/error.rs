use std::path::PathBuf;

use parser::{DocBlockError, ParseError};
use thiserror::Error;

/// A failure that stops extraction for one file
#[derive(Debug, Error)]
pub enum ExtractError {
  #[error("Tag argument missing from hook call in {}#{line}", path.display())]
  MissingTagArgument { path: PathBuf, line: u32 },

  #[error("Could not convert tag argument value to a name in {}#{line}: unsupported {kind} expression `{printed}`", path.display())]
  UnsupportedTagExpression {
    path: PathBuf,
    line: u32,
    kind: &'static str,
    printed: String,
  },

  #[error("Invalid doc block in {}#{line}: {source}", path.display())]
  DocBlock {
    path: PathBuf,
    line: u32,
    #[source]
    source: DocBlockError,
  },

  #[error("Failed to parse {}: {source}", path.display())]
  Syntax {
    path: PathBuf,
    #[source]
    source: ParseError,
  },
}

impl ExtractError {
  /// File the error was raised for
  pub fn path(&self) -> &std::path::Path {
    match self {
      ExtractError::MissingTagArgument { path, .. }
      | ExtractError::UnsupportedTagExpression { path, .. }
      | ExtractError::DocBlock { path, .. }
      | ExtractError::Syntax { path, .. } => path,
    }
  }

  /// 1-based line of the offending code
  pub fn line(&self) -> u32 {
    match self {
      ExtractError::MissingTagArgument { line, .. }
      | ExtractError::UnsupportedTagExpression { line, .. }
      | ExtractError::DocBlock { line, .. } => *line,
      ExtractError::Syntax { source, .. } => match source {
        ParseError::Syntax { line, .. } => *line,
        ParseError::Language(_) | ParseError::NoTree => 0,
      },
    }
  }
}
