//! Heading anchor generation.
use std::fmt;

use serde::{Deserialize, Serialize};

/// A URL-fragment identifier derived from heading text.
///
/// Only contains `[a-z0-9-]`, never starts or ends with `-` and never
/// contains `--`. May be empty when the source text had no usable characters.
#[derive(
  Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AnchorId(String);

impl AnchorId {
  #[must_use]
  pub fn as_str(&self) -> &str {
    &self.0
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  #[must_use]
  pub fn into_string(self) -> String {
    self.0
  }
}

impl AsRef<str> for AnchorId {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for AnchorId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Generate an anchor id for the given heading text.
///
/// Lowercases the text, turns every character outside `[a-z0-9]` into a
/// separator, collapses separator runs into a single `-` and trims separators
/// at both ends. Identical text always yields the identical id; distinct
/// headings with similar text may collide.
///
/// # Examples
///
/// ```
/// use bluedocs_markdown::slug::generate;
///
/// assert_eq!(generate("Getting Started!").as_str(), "getting-started");
/// assert_eq!(generate("  Multiple   Spaces  ").as_str(), "multiple-spaces");
/// assert_eq!(generate("   ").as_str(), "");
/// ```
#[must_use]
pub fn generate(text: &str) -> AnchorId {
  let mut slug = String::with_capacity(text.len());
  let mut pending_separator = false;

  for c in text.chars().flat_map(char::to_lowercase) {
    if c.is_ascii_lowercase() || c.is_ascii_digit() {
      if pending_separator && !slug.is_empty() {
        slug.push('-');
      }
      pending_separator = false;
      slug.push(c);
    } else {
      pending_separator = true;
    }
  }

  AnchorId(slug)
}
