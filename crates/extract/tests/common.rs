//! Shared fixtures for extraction integration tests

use extract::{Documentor, PrefixFilter};
use hookdoc_core::SourceFile;

/// A documentor accepting every tag
pub fn documentor() -> Documentor {
  Documentor::new(PrefixFilter::default()).expect("PHP grammar loads")
}

pub fn file(name: &str, source: &str) -> SourceFile {
  SourceFile::new(name, source)
}

/// Tags of every collected hook, in collection order
pub fn tags(documentor: &Documentor) -> Vec<String> {
  documentor.hooks().iter().map(|h| h.tag.clone()).collect()
}
