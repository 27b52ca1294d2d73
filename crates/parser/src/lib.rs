//! Tree-sitter based PHP parsing for hookdoc
//!
//! This crate provides:
//! - A lowered, parent-linked PHP syntax tree with doc comments attached to nodes
//! - Namespace and `use` import tracking for class name resolution
//! - A pretty-printer for expressions
//! - A phpDocumentor style doc-block parser
//!
//! # Example
//! ```ignore
//! use parser::{DocBlock, PhpParser};
//!
//! let mut parser = PhpParser::new()?;
//! let tree = parser.parse(code)?;
//! for (id, _) in tree.iter() {
//!   if let Some(comment) = tree.doc_comment(id) {
//!     let doc = DocBlock::parse(&comment.text, tree.namespace_context(id))?;
//!   }
//! }
//! ```

mod docblock;
mod error;
mod lower;
mod namespace;
mod parser;
mod printer;
mod tree;

pub use docblock::{DocBlock, ParamTag, Tag, TagBody, VersionTag};
pub use error::{DocBlockError, ParseError};
pub use namespace::NamespaceContext;
pub use parser::PhpParser;
pub use printer::print_expr;
pub use tree::{Argument, Comment, Node, NodeId, NodeKind, Span, SyntaxTree};
