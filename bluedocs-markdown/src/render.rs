//! Mapping of Markdown nodes onto themed view units.
//!
//! [`MarkdownNodeRenderer::render`] is a single `match` over
//! [`MarkdownNode`], so a new node kind cannot be added without deciding how
//! it renders. Headings that need the interactive copy-link behavior are
//! mounted as [`Headline`] instances, which own their copy state.
use std::sync::LazyLock;

use log::trace;
use regex::Regex;

use crate::{
  clipboard::ClipboardBackend,
  color::Color,
  copy::{CopyIndicator, CopyState, CopyWatch, LINK_COPIED_MESSAGE},
  slug::{self, AnchorId},
  theme::{PaletteMode, Theme},
  timer::Scheduler,
  types::{HeadingLevel, MarkdownNode},
  view::{Element, RenderableUnit},
};

/// Width constraint shared by text blocks.
const REGULAR_WIDTH: &str = "42rem";

/// Offset of the anchor target so the heading clears the sticky app bar.
const ANCHOR_OFFSET: &str = "-90px";

const MONOSPACE: &str = "Roboto Mono, Monospaced";

/// Whether a link leaves the site or navigates inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkClassification {
  External,
  Internal,
}

/// Classify a link destination.
///
/// Destinations starting with `http` or `mailto` (case-insensitively) are
/// external. Everything else, including a missing destination, is treated as
/// an in-app route.
///
/// # Examples
///
/// ```
/// use bluedocs_markdown::render::{LinkClassification, classify};
///
/// assert_eq!(classify(Some("https://example.com")), LinkClassification::External);
/// assert_eq!(classify(Some("/docs/intro")), LinkClassification::Internal);
/// assert_eq!(classify(None), LinkClassification::Internal);
/// ```
#[must_use]
pub fn classify(href: Option<&str>) -> LinkClassification {
  static EXTERNAL_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:http|mailto)")
      .map_err(|e| log::error!("Failed to compile EXTERNAL_RE regex: {e}"))
      .ok()
  });

  match (href, EXTERNAL_RE.as_ref()) {
    (Some(href), Some(re)) if re.is_match(href) => LinkClassification::External,
    (Some(href), None) => {
      // Regex unavailable, fall back to a plain prefix check.
      let lower = href.to_ascii_lowercase();
      if lower.starts_with("http") || lower.starts_with("mailto") {
        LinkClassification::External
      } else {
        LinkClassification::Internal
      }
    },
    _ => LinkClassification::Internal,
  }
}

/// Origin and path of the page being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
  pub origin: String,
  pub path:   String,
}

impl PageLocation {
  pub fn new(origin: impl Into<String>, path: impl Into<String>) -> Self {
    Self {
      origin: origin.into(),
      path:   path.into(),
    }
  }

  /// Absolute URL pointing at `anchor` on this page.
  #[must_use]
  pub fn anchor_url(&self, anchor: &AnchorId) -> String {
    format!("{}{}#{}", self.origin, self.path, anchor)
  }
}

/// Primaries with less opacity than this are tinted from their opaque color.
const MIN_TINT_BASE_ALPHA: f64 = 0.1;

/// Background tint of block quotes.
///
/// Light mode fades the primary color to 10% of its opacity. Dark mode
/// doubles the light tint's opacity, so the two modes never produce the same
/// tint for one primary color.
#[must_use]
pub fn blockquote_tint(primary: Color, mode: PaletteMode) -> Color {
  let base = if (MIN_TINT_BASE_ALPHA..=1.0).contains(&primary.alpha) {
    primary
  } else {
    primary.opaque()
  };
  let light = base.fade(0.9);
  match mode {
    PaletteMode::Light => light,
    PaletteMode::Dark => {
      Color {
        alpha: light.alpha * 2.0,
        ..light
      }
    },
  }
}

/// Background of code blocks and inline code.
#[must_use]
pub fn code_tint(theme: &Theme) -> Color {
  match theme.mode {
    PaletteMode::Light => theme.background_default,
    PaletteMode::Dark => theme.code_background,
  }
}

/// Typography of one heading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingStyle {
  /// Typography variant the heading text uses.
  pub variant:       &'static str,
  pub margin_top:    Option<u16>,
  pub margin_bottom: Option<u16>,
  pub font_weight:   Option<u16>,
  pub font_size:     Option<&'static str>,
}

impl HeadingStyle {
  /// Fixed style table, emphasis decreasing from `h1` to `h6`.
  #[must_use]
  pub const fn for_level(level: HeadingLevel) -> Self {
    const fn style(
      variant: &'static str,
      margin_top: Option<u16>,
      margin_bottom: Option<u16>,
    ) -> HeadingStyle {
      HeadingStyle {
        variant,
        margin_top,
        margin_bottom,
        font_weight: None,
        font_size: None,
      }
    }

    match level {
      HeadingLevel::H1 => style("h4", None, Some(32)),
      HeadingLevel::H2 => style("h6", Some(64), Some(16)),
      HeadingLevel::H3 => {
        HeadingStyle {
          font_weight: Some(600),
          ..style("body1", Some(32), Some(16))
        }
      },
      HeadingLevel::H4 => style("subtitle1", Some(16), None),
      HeadingLevel::H5 => style("body2", Some(8), None),
      HeadingLevel::H6 => {
        HeadingStyle {
          font_size: Some("0.75rem"),
          ..style("body2", Some(8), None)
        }
      },
    }
  }
}

/// Anchor id for a heading.
///
/// Uses the level name when the text has no characters an anchor can keep,
/// so the id is never empty.
#[must_use]
pub fn heading_anchor(level: HeadingLevel, text: &str) -> AnchorId {
  let anchor = slug::generate(text);
  if anchor.is_empty() {
    slug::generate(level.tag())
  } else {
    anchor
  }
}

/// Renders Markdown nodes with a theme.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownNodeRenderer<'t> {
  theme: &'t Theme,
}

impl<'t> MarkdownNodeRenderer<'t> {
  #[must_use]
  pub const fn new(theme: &'t Theme) -> Self {
    Self { theme }
  }

  #[must_use]
  pub const fn theme(&self) -> &'t Theme {
    self.theme
  }

  /// Render one node, and its children, into a view unit.
  #[must_use]
  pub fn render(&self, node: &MarkdownNode) -> RenderableUnit {
    match node {
      MarkdownNode::Heading { level, children } => {
        let text = node.plain_text();
        let anchor = heading_anchor(*level, &text);
        trace!("Rendering {} with anchor {anchor:?}", level.tag());
        self.heading(*level, &anchor, children, CopyState::Idle)
      },
      MarkdownNode::Paragraph { children } => {
        self
          .typography("p", "body1")
          .class("paragraph")
          .style("max-width", REGULAR_WIDTH)
          .children(self.render_all(children))
          .into()
      },
      MarkdownNode::Link { href, children } => {
        self.link(href.as_deref(), children)
      },
      MarkdownNode::List { ordered, children } => {
        Element::new(if *ordered { "ol" } else { "ul" })
          .class("md-list")
          .children(self.render_all(children))
          .into()
      },
      MarkdownNode::ListItem { children } => {
        self
          .typography("li", "body1")
          .class("mdLi")
          .style("max-width", REGULAR_WIDTH)
          .children(self.render_all(children))
          .into()
      },
      MarkdownNode::Blockquote { children } => {
        let primary = self.theme.primary_main;
        self
          .typography("blockquote", "body1")
          .style("padding-right", "16px")
          .style("margin-bottom", "8px")
          .style(
            "background-color",
            blockquote_tint(primary, self.theme.mode).to_css(),
          )
          .style("border-left-color", primary.to_css())
          .style("max-width", REGULAR_WIDTH)
          .children(self.render_all(children))
          .into()
      },
      MarkdownNode::CodeBlock { language, literal } => {
        let mut code = Element::new("code")
          .style("font-family", MONOSPACE)
          .style("font-size", "12px")
          .child(RenderableUnit::text(literal.clone()));
        if let Some(language) = language {
          code = code.class(format!("language-{language}"));
        }
        self
          .typography("pre", "body1")
          .style("color", self.theme.text_primary.to_css())
          .style("padding-right", "16px")
          .style("margin-bottom", "8px")
          .style("display", "flex")
          .style("background-color", code_tint(self.theme).to_css())
          .style("max-width", REGULAR_WIDTH)
          .child(code)
          .into()
      },
      MarkdownNode::InlineCode { literal } => {
        let mut code = self
          .typography("code", "body1")
          .class("inline-code")
          .style("color", self.theme.text_primary.to_css())
          .style("background-color", code_tint(self.theme).to_css())
          .style("font-family", MONOSPACE);
        if self.theme.is_dark() {
          code = code
            .style("border", format!("{} 1px solid", self.theme.divider.to_css()));
        }
        code.child(RenderableUnit::text(literal.clone())).into()
      },
      MarkdownNode::Emphasis { children } => {
        Element::new("em").children(self.render_all(children)).into()
      },
      MarkdownNode::Strong { children } => {
        Element::new("strong")
          .children(self.render_all(children))
          .into()
      },
      MarkdownNode::Text { text } => RenderableUnit::text(text.clone()),
      MarkdownNode::LineBreak => Element::new("br").into(),
    }
  }

  /// Render a sequence of nodes.
  pub fn render_all(&self, nodes: &[MarkdownNode]) -> Vec<RenderableUnit> {
    nodes.iter().map(|node| self.render(node)).collect()
  }

  fn typography(&self, tag: &'static str, variant: &str) -> Element {
    Element::new(tag).class(format!("typography-{variant}"))
  }

  fn link(&self, href: Option<&str>, children: &[MarkdownNode]) -> RenderableUnit {
    let decoration = match self.theme.mode {
      PaletteMode::Light => self.theme.primary_main,
      PaletteMode::Dark => self.theme.primary_dark,
    };
    let anchor = Element::new("a")
      .class("links")
      .style("font-weight", "400")
      .style("text-decoration-color", decoration.fade(0.5).to_css())
      .style("color", self.theme.primary_main.to_css());

    let destination = href.unwrap_or_default();
    let anchor = match classify(href) {
      LinkClassification::External => {
        anchor
          .attr("href", destination)
          .attr("target", "_blank")
          .attr("rel", "noopener noreferrer")
      },
      LinkClassification::Internal => {
        anchor
          .class("internal-link")
          .attr("href", destination)
          .attr("data-route", destination)
      },
    };
    anchor.children(self.render_all(children)).into()
  }

  /// Heading block: anchor target, heading text, copy-link button and, while
  /// copied, the notification.
  pub(crate) fn heading(
    &self,
    level: HeadingLevel,
    anchor: &AnchorId,
    children: &[MarkdownNode],
    state: CopyState,
  ) -> RenderableUnit {
    let style = HeadingStyle::for_level(level);
    let primary = self.theme.primary_main.to_css();

    let mut block = Element::new("div")
      .class("headline")
      .attr("data-level", level.as_u8().to_string())
      .style("max-width", REGULAR_WIDTH);
    if level == HeadingLevel::H1 {
      block = block.class("markdownH1").style("hyphens", "auto");
    }
    if let Some(top) = style.margin_top {
      block = block.style("margin-top", format!("{top}px"));
    }
    if let Some(bottom) = style.margin_bottom {
      block = block.style("margin-bottom", format!("{bottom}px"));
    }
    if let Some(size) = style.font_size {
      block = block.style("font-size", size);
    }

    let target = Element::new("span")
      .class("headline-anchor")
      .attr("id", anchor.as_str())
      .style("position", "relative")
      .style("top", ANCHOR_OFFSET);

    let button = Element::new("button")
      .class("copy-link")
      .attr("type", "button")
      .attr("title", "copy to clipboard")
      .attr("aria-label", "copy to clipboard")
      .attr("data-anchor", anchor.as_str())
      .style("margin-left", "8px")
      .style("color", primary.clone())
      .child(RenderableUnit::text("#"));

    let mut text = Element::new(level.tag())
      .class("headline-text")
      .class(format!("typography-{}", style.variant))
      .style("color", primary)
      .style("hyphens", "auto");
    if let Some(weight) = style.font_weight {
      text = text.style("font-weight", weight.to_string());
    }
    let text = text.children(self.render_all(children)).child(button);

    block = block.child(target).child(text);
    if state == CopyState::JustCopied {
      block = block.child(
        Element::new("div")
          .class("snackbar")
          .attr("role", "status")
          .child(RenderableUnit::text(LINK_COPIED_MESSAGE)),
      );
    }
    block.into()
  }
}

/// A mounted heading: a heading plus the copy state of its copy-link button.
///
/// Dropping the headline cancels a pending notification revert.
#[derive(Debug)]
pub struct Headline<S: Scheduler> {
  level:    HeadingLevel,
  children: Vec<MarkdownNode>,
  anchor:   AnchorId,
  copy:     CopyIndicator<S>,
}

impl<S: Scheduler> Headline<S> {
  /// Mount a heading with plain text content.
  pub fn new(level: HeadingLevel, text: &str, scheduler: S) -> Self {
    Self::with_children(level, vec![MarkdownNode::text(text)], scheduler)
  }

  /// Mount a heading with arbitrary inline content.
  pub fn with_children(
    level: HeadingLevel,
    children: Vec<MarkdownNode>,
    scheduler: S,
  ) -> Self {
    let text: String = children.iter().map(MarkdownNode::plain_text).collect();
    Self {
      level,
      anchor: heading_anchor(level, &text),
      children,
      copy: CopyIndicator::new(scheduler),
    }
  }

  /// Mount a heading node. Returns `None` for other node kinds.
  pub fn from_node(node: &MarkdownNode, scheduler: S) -> Option<Self> {
    match node {
      MarkdownNode::Heading { level, children } => {
        Some(Self::with_children(*level, children.clone(), scheduler))
      },
      _ => None,
    }
  }

  #[must_use]
  pub const fn level(&self) -> HeadingLevel {
    self.level
  }

  #[must_use]
  pub const fn anchor(&self) -> &AnchorId {
    &self.anchor
  }

  #[must_use]
  pub fn copy_state(&self) -> CopyState {
    self.copy.state()
  }

  /// Watch the copy state, e.g. to wait for the notification to revert.
  #[must_use]
  pub fn copy_watch(&self) -> CopyWatch {
    self.copy.watch()
  }

  /// Shareable URL of this heading on the page at `location`.
  #[must_use]
  pub fn share_url(&self, location: &PageLocation) -> String {
    location.anchor_url(&self.anchor)
  }

  /// Handle a click on the copy-link button.
  ///
  /// Places the shareable URL on the clipboard. On success the headline
  /// shows the copied notification for [`crate::copy::COPY_REVERT_DELAY`];
  /// when the clipboard is unavailable nothing changes.
  pub fn activate_copy<B>(&mut self, clipboard: &mut B, location: &PageLocation)
  where
    B: ClipboardBackend + ?Sized,
  {
    let url = self.share_url(location);
    self.copy.copy_with(clipboard, &url);
  }

  /// Close the copied notification early.
  pub fn dismiss_notification(&mut self) {
    self.copy.dismiss();
  }

  /// Render the headline in its current copy state.
  #[must_use]
  pub fn render(&self, theme: &Theme) -> RenderableUnit {
    MarkdownNodeRenderer::new(theme).heading(
      self.level,
      &self.anchor,
      &self.children,
      self.copy_state(),
    )
  }
}
