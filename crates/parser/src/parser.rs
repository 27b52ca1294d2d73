//! PhpParser implementation

use tracing::trace;
use tree_sitter::{Language as TsLanguage, Node as TsNode, Parser, Tree};

use crate::{ParseError, SyntaxTree, lower::Lowerer};

/// Tree-sitter based PHP parser
///
/// Holds one configured tree-sitter parser and reuses it across files. A parser is not
/// `Sync`; parallel callers create one per worker.
pub struct PhpParser {
  parser: Parser,
}

impl PhpParser {
  /// Create a new PhpParser
  pub fn new() -> Result<Self, ParseError> {
    let grammar: TsLanguage = tree_sitter_php::LANGUAGE_PHP.into();
    let mut parser = Parser::new();
    parser
      .set_language(&grammar)
      .map_err(|e| ParseError::Language(e.to_string()))?;
    Ok(Self { parser })
  }

  /// Parse a PHP file and lower it into a [`SyntaxTree`].
  ///
  /// Any syntax error fails the whole file; the error points at the first broken node.
  pub fn parse(&mut self, source: &str) -> Result<SyntaxTree, ParseError> {
    let tree = self.parser.parse(source, None).ok_or(ParseError::NoTree)?;
    let root = tree.root_node();

    if root.has_error() {
      let err = first_error(&tree);
      trace!(error = %err, "Rejecting PHP source with syntax errors");
      return Err(err);
    }

    let lowered = Lowerer::new(source).lower_program(root);
    trace!(nodes = lowered.len(), comments = lowered.comments().len(), "Lowered PHP source");
    Ok(lowered)
  }
}

/// Locate the first ERROR or MISSING node in document order
fn first_error(tree: &Tree) -> ParseError {
  let mut cursor = tree.walk();
  loop {
    let node = cursor.node();
    if node.is_error() || node.is_missing() {
      return syntax_error(node);
    }

    // Only descend into subtrees that contain the error
    if node.has_error() && cursor.goto_first_child() {
      continue;
    }

    loop {
      if cursor.goto_next_sibling() {
        break;
      }
      if !cursor.goto_parent() {
        return syntax_error(tree.root_node());
      }
    }
  }
}

fn syntax_error(node: TsNode<'_>) -> ParseError {
  let position = node.start_position();
  ParseError::Syntax {
    line: position.row as u32 + 1,
    column: position.column as u32 + 1,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::NodeKind;

  #[test]
  fn test_parse_simple_file() {
    let mut parser = PhpParser::new().unwrap();
    let tree = parser.parse("<?php\ndo_action( 'init' );\n").unwrap();

    assert_eq!(tree.roots().len(), 1);
    let stmt = tree.roots()[0];
    assert!(matches!(tree.kind(stmt), NodeKind::ExpressionStatement(_)));
  }

  #[test]
  fn test_syntax_error_reports_position() {
    let mut parser = PhpParser::new().unwrap();
    let err = parser.parse("<?php\n\ndo_action( 'init' ;\n").unwrap_err();

    match err {
      ParseError::Syntax { line, .. } => assert_eq!(line, 3),
      other => panic!("expected syntax error, got {:?}", other),
    }
  }

  #[test]
  fn test_parser_is_reusable() {
    let mut parser = PhpParser::new().unwrap();
    assert!(parser.parse("<?php $a = 1;").is_ok());
    assert!(parser.parse("<?php $b = ;").is_err());
    assert!(parser.parse("<?php $c = 3;").is_ok());
  }
}
