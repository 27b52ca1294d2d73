/// Keeps hooks whose tag starts with one of the configured prefixes.
///
/// An empty prefix set accepts every tag. Placeholders such as `{$type}` are compared as
/// plain text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixFilter {
  prefixes: Vec<String>,
}

impl PrefixFilter {
  pub fn new<I, S>(prefixes: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      prefixes: prefixes.into_iter().map(Into::into).collect(),
    }
  }

  pub fn accepts(&self, tag: &str) -> bool {
    self.prefixes.is_empty() || self.prefixes.iter().any(|p| tag.starts_with(p.as_str()))
  }

  pub fn prefixes(&self) -> &[String] {
    &self.prefixes
  }
}
