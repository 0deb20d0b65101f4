//! Whole-document rendering.
use serde::{Deserialize, Serialize};

use crate::{
  parse::parse_document,
  render::{Headline, MarkdownNodeRenderer, heading_anchor},
  slug::AnchorId,
  theme::Theme,
  timer::Scheduler,
  types::{HeadingLevel, MarkdownNode},
  view::RenderableUnit,
};

/// A heading in a rendered document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
  /// Heading text without markup.
  pub text:  String,
  pub level: HeadingLevel,
  /// Anchor id of the heading. Not unique: equal text yields equal ids.
  pub id:    AnchorId,
}

/// Result of rendering a Markdown document.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
  /// Top-level nodes, as parsed.
  pub nodes:   Vec<MarkdownNode>,
  /// One unit per top-level node.
  pub units:   Vec<RenderableUnit>,
  /// Every heading, in document order.
  pub headers: Vec<Header>,
  /// Text of the first `h1`, if any.
  pub title:   Option<String>,
}

impl RenderedDocument {
  /// Concatenate every unit into an HTML fragment.
  #[must_use]
  pub fn to_html(&self) -> String {
    let mut html = String::new();
    for unit in &self.units {
      unit.write_html(&mut html);
      html.push('\n');
    }
    html
  }

  /// Mount the first heading whose anchor is `anchor`.
  pub fn mount_headline<S: Scheduler>(
    &self,
    anchor: &str,
    scheduler: S,
  ) -> Option<Headline<S>> {
    find_heading(&self.nodes, anchor)
      .and_then(|node| Headline::from_node(node, scheduler))
  }
}

fn find_heading<'n>(
  nodes: &'n [MarkdownNode],
  anchor: &str,
) -> Option<&'n MarkdownNode> {
  nodes.iter().find_map(|node| {
    match node {
      MarkdownNode::Heading { level, .. } => {
        (heading_anchor(*level, &node.plain_text()).as_str() == anchor)
          .then_some(node)
      },
      MarkdownNode::Blockquote { children }
      | MarkdownNode::List { children, .. }
      | MarkdownNode::ListItem { children } => find_heading(children, anchor),
      _ => None,
    }
  })
}

/// Parse and render a Markdown document with `theme`.
#[must_use]
pub fn render_document(markdown: &str, theme: &Theme) -> RenderedDocument {
  render_nodes(parse_document(markdown), theme)
}

/// Render already parsed nodes with `theme`.
#[must_use]
pub fn render_nodes(nodes: Vec<MarkdownNode>, theme: &Theme) -> RenderedDocument {
  let renderer = MarkdownNodeRenderer::new(theme);
  let units = renderer.render_all(&nodes);
  let headers = collect_headers(&nodes);
  let title = headers
    .iter()
    .find(|h| h.level == HeadingLevel::H1)
    .map(|h| h.text.clone());

  log::debug!(
    "Rendered {} nodes with {} headings using theme {}",
    nodes.len(),
    headers.len(),
    theme.name
  );

  RenderedDocument {
    nodes,
    units,
    headers,
    title,
  }
}

fn collect_headers(nodes: &[MarkdownNode]) -> Vec<Header> {
  let mut headers = Vec::new();
  for node in nodes {
    match node {
      MarkdownNode::Heading { level, .. } => {
        let text = node.plain_text().trim().to_owned();
        headers.push(Header {
          id: heading_anchor(*level, &text),
          level: *level,
          text,
        });
      },
      MarkdownNode::Blockquote { children }
      | MarkdownNode::List { children, .. }
      | MarkdownNode::ListItem { children } => {
        headers.extend(collect_headers(children));
      },
      _ => {},
    }
  }
  headers
}
