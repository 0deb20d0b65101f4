//! Markdown parsing into [`MarkdownNode`] values.
//!
//! Parsing is done by `comrak`; this module maps its AST onto the closed
//! node set the renderer understands. Containers outside that set (tables,
//! footnotes, HTML blocks and so on) are flattened into their children so
//! their text still reaches the page.
use comrak::{
  Arena,
  nodes::{AstNode, ListType, NodeValue},
  options::Options,
  parse_document as comrak_parse,
};
use log::trace;

use crate::types::{HeadingLevel, MarkdownNode};

/// Parse a Markdown document into top-level nodes.
///
/// # Examples
///
/// ```
/// use bluedocs_markdown::{parse::parse_document, types::MarkdownNode};
///
/// let nodes = parse_document("# Title\n\nSome *text*.");
/// assert_eq!(nodes.len(), 2);
/// assert!(matches!(nodes[0], MarkdownNode::Heading { .. }));
/// ```
#[must_use]
pub fn parse_document(markdown: &str) -> Vec<MarkdownNode> {
  let arena = Arena::new();
  let options = comrak_options();
  let root = comrak_parse(&arena, markdown, &options);
  convert_children(root, false)
}

/// Build comrak options for site documents.
fn comrak_options() -> Options<'static> {
  let mut options = Options::default();
  options.extension.table = true;
  options.extension.strikethrough = true;
  options.extension.tasklist = true;
  options.extension.autolink = true;
  options.extension.footnotes = true;
  options
}

fn convert_children<'a>(node: &'a AstNode<'a>, tight: bool) -> Vec<MarkdownNode> {
  let mut out = Vec::new();
  for child in node.children() {
    convert_node(child, tight, &mut out);
  }
  merge_text(out)
}

fn convert_node<'a>(node: &'a AstNode<'a>, tight: bool, out: &mut Vec<MarkdownNode>) {
  let value = node.data.borrow().value.clone();
  match value {
    NodeValue::Heading(heading) => {
      let level = HeadingLevel::from_u8(heading.level).unwrap_or(HeadingLevel::H6);
      out.push(MarkdownNode::Heading {
        level,
        children: convert_children(node, false),
      });
    },
    NodeValue::Paragraph => {
      let children = convert_children(node, false);
      if tight {
        // Tight list items render their content without paragraph wrappers.
        out.extend(children);
      } else {
        out.push(MarkdownNode::Paragraph { children });
      }
    },
    NodeValue::List(list) => {
      out.push(MarkdownNode::List {
        ordered:  list.list_type == ListType::Ordered,
        // Items inherit tightness from their list.
        children: convert_children(node, list.tight),
      });
    },
    NodeValue::Item(_) | NodeValue::TaskItem(_) => {
      out.push(MarkdownNode::ListItem {
        children: convert_children(node, tight),
      });
    },
    NodeValue::BlockQuote => {
      out.push(MarkdownNode::Blockquote {
        children: convert_children(node, false),
      });
    },
    NodeValue::CodeBlock(code) => {
      let language = code
        .info
        .split_whitespace()
        .next()
        .map(str::to_owned);
      out.push(MarkdownNode::CodeBlock {
        language,
        literal: code.literal.to_string(),
      });
    },
    NodeValue::Code(code) => {
      out.push(MarkdownNode::InlineCode {
        literal: code.literal.to_string(),
      });
    },
    NodeValue::Link(link) => {
      let href = (!link.url.is_empty()).then(|| link.url.to_string());
      out.push(MarkdownNode::Link {
        href,
        children: convert_children(node, false),
      });
    },
    NodeValue::Emph => {
      out.push(MarkdownNode::Emphasis {
        children: convert_children(node, false),
      });
    },
    NodeValue::Strong => {
      out.push(MarkdownNode::Strong {
        children: convert_children(node, false),
      });
    },
    NodeValue::Text(text) => out.push(MarkdownNode::text(text.to_string())),
    NodeValue::SoftBreak => out.push(MarkdownNode::text(" ")),
    NodeValue::LineBreak => out.push(MarkdownNode::LineBreak),
    NodeValue::HtmlInline(html) => out.push(MarkdownNode::text(html.to_string())),
    NodeValue::HtmlBlock(html) => {
      out.push(MarkdownNode::Paragraph {
        children: vec![MarkdownNode::text(html.literal.trim_end().to_owned())],
      });
    },
    NodeValue::ThematicBreak | NodeValue::FrontMatter(_) => {},
    other => {
      trace!("Flattening unsupported node {other:?}");
      for child in node.children() {
        convert_node(child, tight, out);
      }
    },
  }
}

/// Join adjacent text nodes produced by soft breaks and entity splitting.
fn merge_text(nodes: Vec<MarkdownNode>) -> Vec<MarkdownNode> {
  let mut merged: Vec<MarkdownNode> = Vec::with_capacity(nodes.len());
  for node in nodes {
    if let MarkdownNode::Text { text } = &node {
      if let Some(MarkdownNode::Text { text: previous }) = merged.last_mut() {
        previous.push_str(text);
        continue;
      }
    }
    merged.push(node);
  }
  merged
}
