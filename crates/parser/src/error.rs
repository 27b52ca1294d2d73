use thiserror::Error;

/// Failure to turn PHP source into a [`crate::SyntaxTree`]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
  #[error("Failed to load the PHP grammar: {0}")]
  Language(String),

  #[error("Parser produced no tree")]
  NoTree,

  #[error("Syntax error at line {line}, column {column}")]
  Syntax { line: u32, column: u32 },
}

/// Failure to interpret a doc comment
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DocBlockError {
  #[error("Not a doc comment: {0}")]
  NotADocComment(String),

  #[error("The tag \"{0}\" does not seem to be wellformed")]
  MalformedTag(String),
}
