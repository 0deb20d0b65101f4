//! Markdown node types consumed by the renderer.
//!
//! The node set is closed: the parser only ever produces these kinds, and the
//! renderer matches on every one of them.
use serde::{Deserialize, Serialize};

/// Heading level, `h1` through `h6`.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
  H1,
  H2,
  H3,
  H4,
  H5,
  H6,
}

impl HeadingLevel {
  /// All levels, from most to least emphasized.
  pub const ALL: [Self; 6] =
    [Self::H1, Self::H2, Self::H3, Self::H4, Self::H5, Self::H6];

  /// Convert a numeric level (1-6) into a [`HeadingLevel`].
  #[must_use]
  pub const fn from_u8(level: u8) -> Option<Self> {
    match level {
      1 => Some(Self::H1),
      2 => Some(Self::H2),
      3 => Some(Self::H3),
      4 => Some(Self::H4),
      5 => Some(Self::H5),
      6 => Some(Self::H6),
      _ => None,
    }
  }

  /// Numeric level (1-6).
  #[must_use]
  pub const fn as_u8(self) -> u8 {
    match self {
      Self::H1 => 1,
      Self::H2 => 2,
      Self::H3 => 3,
      Self::H4 => 4,
      Self::H5 => 5,
      Self::H6 => 6,
    }
  }

  /// HTML tag name, also used as the anchor fallback for empty headings.
  #[must_use]
  pub const fn tag(self) -> &'static str {
    match self {
      Self::H1 => "h1",
      Self::H2 => "h2",
      Self::H3 => "h3",
      Self::H4 => "h4",
      Self::H5 => "h5",
      Self::H6 => "h6",
    }
  }
}

/// A single Markdown node.
///
/// Block kinds (`Heading`, `Paragraph`, `List`, `ListItem`, `Blockquote`,
/// `CodeBlock`) and inline kinds (`Link`, `InlineCode`, `Text`, `Emphasis`,
/// `Strong`, `LineBreak`) share one type so that any kind may appear as the
/// child content of another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MarkdownNode {
  Heading {
    level:    HeadingLevel,
    children: Vec<Self>,
  },
  Paragraph {
    children: Vec<Self>,
  },
  Link {
    /// Link destination. `None` when the source had no destination at all.
    href:     Option<String>,
    children: Vec<Self>,
  },
  List {
    ordered:  bool,
    children: Vec<Self>,
  },
  ListItem {
    children: Vec<Self>,
  },
  Blockquote {
    children: Vec<Self>,
  },
  CodeBlock {
    /// First word of the fence info string, if any.
    language: Option<String>,
    literal:  String,
  },
  InlineCode {
    literal: String,
  },
  Emphasis {
    children: Vec<Self>,
  },
  Strong {
    children: Vec<Self>,
  },
  Text {
    text: String,
  },
  LineBreak,
}

impl MarkdownNode {
  /// Convenience constructor for a text node.
  pub fn text(text: impl Into<String>) -> Self {
    Self::Text { text: text.into() }
  }

  /// Convenience constructor for a heading with plain text content.
  pub fn heading(level: HeadingLevel, text: impl Into<String>) -> Self {
    Self::Heading {
      level,
      children: vec![Self::text(text)],
    }
  }

  /// Convenience constructor for a link with plain text content.
  pub fn link(href: Option<&str>, text: impl Into<String>) -> Self {
    Self::Link {
      href:     href.map(str::to_owned),
      children: vec![Self::text(text)],
    }
  }

  /// Child nodes, empty for leaf kinds.
  #[must_use]
  pub fn children(&self) -> &[Self] {
    match self {
      Self::Heading { children, .. }
      | Self::Paragraph { children }
      | Self::Link { children, .. }
      | Self::List { children, .. }
      | Self::ListItem { children }
      | Self::Blockquote { children }
      | Self::Emphasis { children }
      | Self::Strong { children } => children,
      Self::CodeBlock { .. }
      | Self::InlineCode { .. }
      | Self::Text { .. }
      | Self::LineBreak => &[],
    }
  }

  /// Flatten the node into its plain text content, without any markup.
  #[must_use]
  pub fn plain_text(&self) -> String {
    let mut out = String::new();
    self.collect_text(&mut out);
    out
  }

  fn collect_text(&self, out: &mut String) {
    match self {
      Self::Text { text } => out.push_str(text),
      Self::InlineCode { literal } | Self::CodeBlock { literal, .. } => {
        out.push_str(literal);
      },
      Self::LineBreak => out.push(' '),
      _ => {
        for child in self.children() {
          child.collect_text(out);
        }
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_heading_level_round_trip_numbers() {
    for level in HeadingLevel::ALL {
      assert_eq!(HeadingLevel::from_u8(level.as_u8()), Some(level));
    }
    assert_eq!(HeadingLevel::from_u8(0), None);
    assert_eq!(HeadingLevel::from_u8(7), None);
  }

  #[test]
  fn test_plain_text_flattens_inline_markup() {
    let node = MarkdownNode::Heading {
      level:    HeadingLevel::H2,
      children: vec![
        MarkdownNode::text("Using "),
        MarkdownNode::InlineCode {
          literal: "ThemeProvider".to_owned(),
        },
        MarkdownNode::Strong {
          children: vec![MarkdownNode::text(" today")],
        },
      ],
    };
    assert_eq!(node.plain_text(), "Using ThemeProvider today");
  }

  #[test]
  fn test_leaf_nodes_have_no_children() {
    assert!(MarkdownNode::LineBreak.children().is_empty());
    assert!(MarkdownNode::text("x").children().is_empty());
  }
}
