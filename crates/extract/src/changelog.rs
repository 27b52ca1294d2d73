use parser::{DocBlock, TagBody};

use crate::ChangelogEntry;

/// `@since` and `@version` tags, in the order they are declared
pub fn changelog(doc_block: &DocBlock) -> Vec<ChangelogEntry> {
  doc_block
    .tags()
    .iter()
    .filter_map(|tag| match tag.body() {
      TagBody::Since(v) | TagBody::Version(v) => Some(ChangelogEntry {
        version: v.version().to_string(),
        description: v.description().to_string(),
      }),
      TagBody::Param(_) | TagBody::Deprecated(_) | TagBody::Generic { .. } => None,
    })
    .collect()
}
