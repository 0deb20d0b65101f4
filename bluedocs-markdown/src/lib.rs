//! # bluedocs-markdown
//!
//! Themed Markdown rendering for design-system documentation pages. Every
//! Markdown node is mapped onto a closed set of kinds and rendered into a
//! [`RenderableUnit`], a small element tree that serializes to HTML.
//!
//! Headings get a stable anchor derived from their text and a "copy link"
//! button. Copying places the shareable URL on the system clipboard and shows
//! a transient notification that reverts on its own after three seconds.
//!
//! ## Quick Start
//!
//! ```rust
//! use bluedocs_markdown::{render_document, theme::Theme};
//!
//! let doc = render_document("# Getting Started!\n\nHello.", &Theme::blue());
//!
//! assert_eq!(doc.title.as_deref(), Some("Getting Started!"));
//! assert_eq!(doc.headers[0].id.as_str(), "getting-started");
//! assert!(doc.to_html().contains(r#"id="getting-started""#));
//! ```
//!
//! ## Copying heading links
//!
//! ```rust
//! use bluedocs_markdown::{
//!   clipboard::MemoryClipboard,
//!   copy::CopyState,
//!   render::{Headline, PageLocation},
//!   timer::ManualScheduler,
//!   types::HeadingLevel,
//! };
//!
//! let scheduler = ManualScheduler::new();
//! let mut headline =
//!   Headline::new(HeadingLevel::H2, "Overview", scheduler.clone());
//! let mut clipboard = MemoryClipboard::default();
//! let location = PageLocation::new("https://example.com", "/docs/intro");
//!
//! headline.activate_copy(&mut clipboard, &location);
//! assert_eq!(clipboard.contents(), Some("https://example.com/docs/intro#overview"));
//! assert_eq!(headline.copy_state(), CopyState::JustCopied);
//! ```

pub mod clipboard;
pub mod color;
pub mod copy;
pub mod document;
pub mod parse;
pub mod render;
pub mod slug;
pub mod theme;
pub mod timer;
pub mod types;
pub mod view;

pub use crate::{
  document::{Header, RenderedDocument, render_document},
  render::{Headline, MarkdownNodeRenderer, PageLocation},
  slug::AnchorId,
  types::MarkdownNode,
  view::RenderableUnit,
};
