//! Renderable view units.
//!
//! A [`RenderableUnit`] is a small element tree produced by the renderer and
//! consumed by page assembly. It serializes to HTML with [`RenderableUnit::to_html`].
use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

/// One node of rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderableUnit {
  Element(Element),
  Text(String),
}

impl RenderableUnit {
  pub fn text(text: impl Into<String>) -> Self {
    Self::Text(text.into())
  }

  /// The element, if this unit is one.
  #[must_use]
  pub const fn as_element(&self) -> Option<&Element> {
    match self {
      Self::Element(element) => Some(element),
      Self::Text(_) => None,
    }
  }

  /// Serialize to an HTML fragment.
  #[must_use]
  pub fn to_html(&self) -> String {
    let mut out = String::new();
    self.write_html(&mut out);
    out
  }

  /// Append the HTML serialization to `out`.
  pub fn write_html(&self, out: &mut String) {
    match self {
      Self::Text(text) => out.push_str(&encode_text(text)),
      Self::Element(element) => element.write_html(out),
    }
  }

  /// Visible text content, without markup.
  #[must_use]
  pub fn text_content(&self) -> String {
    match self {
      Self::Text(text) => text.clone(),
      Self::Element(element) => {
        element.children.iter().map(Self::text_content).collect()
      },
    }
  }
}

impl From<Element> for RenderableUnit {
  fn from(element: Element) -> Self {
    Self::Element(element)
  }
}

/// An HTML element with classes, inline style and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
  pub tag:      &'static str,
  pub classes:  Vec<String>,
  pub attrs:    Vec<(&'static str, String)>,
  pub style:    Vec<(&'static str, String)>,
  pub children: Vec<RenderableUnit>,
}

impl Element {
  #[must_use]
  pub const fn new(tag: &'static str) -> Self {
    Self {
      tag,
      classes: Vec::new(),
      attrs: Vec::new(),
      style: Vec::new(),
      children: Vec::new(),
    }
  }

  #[must_use]
  pub fn class(mut self, class: impl Into<String>) -> Self {
    self.classes.push(class.into());
    self
  }

  /// Set an attribute, replacing an earlier value with the same name.
  #[must_use]
  pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
    let value = value.into();
    if let Some(slot) = self.attrs.iter_mut().find(|(n, _)| *n == name) {
      slot.1 = value;
    } else {
      self.attrs.push((name, value));
    }
    self
  }

  /// Set a style property, replacing an earlier value with the same name.
  #[must_use]
  pub fn style(mut self, property: &'static str, value: impl Into<String>) -> Self {
    let value = value.into();
    if let Some(slot) = self.style.iter_mut().find(|(p, _)| *p == property) {
      slot.1 = value;
    } else {
      self.style.push((property, value));
    }
    self
  }

  #[must_use]
  pub fn child(mut self, child: impl Into<RenderableUnit>) -> Self {
    self.children.push(child.into());
    self
  }

  #[must_use]
  pub fn children(
    mut self,
    children: impl IntoIterator<Item = RenderableUnit>,
  ) -> Self {
    self.children.extend(children);
    self
  }

  #[must_use]
  pub fn get_attr(&self, name: &str) -> Option<&str> {
    self
      .attrs
      .iter()
      .find(|(n, _)| *n == name)
      .map(|(_, v)| v.as_str())
  }

  #[must_use]
  pub fn get_style(&self, property: &str) -> Option<&str> {
    self
      .style
      .iter()
      .find(|(p, _)| *p == property)
      .map(|(_, v)| v.as_str())
  }

  #[must_use]
  pub fn has_class(&self, class: &str) -> bool {
    self.classes.iter().any(|c| c == class)
  }

  /// Depth-first search for the first descendant (or self) matching `pred`.
  #[must_use]
  pub fn find(&self, pred: &dyn Fn(&Self) -> bool) -> Option<&Self> {
    if pred(self) {
      return Some(self);
    }
    self
      .children
      .iter()
      .filter_map(RenderableUnit::as_element)
      .find_map(|child| child.find(pred))
  }

  fn write_html(&self, out: &mut String) {
    out.push('<');
    out.push_str(self.tag);

    if !self.classes.is_empty() {
      let _ = write!(
        out,
        " class=\"{}\"",
        encode_double_quoted_attribute(&self.classes.join(" "))
      );
    }
    for (name, value) in &self.attrs {
      let _ = write!(out, " {name}=\"{}\"", encode_double_quoted_attribute(value));
    }
    if !self.style.is_empty() {
      let css = self
        .style
        .iter()
        .map(|(p, v)| format!("{p}: {v}"))
        .collect::<Vec<_>>()
        .join("; ");
      let _ = write!(out, " style=\"{}\"", encode_double_quoted_attribute(&css));
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&self.tag) {
      return;
    }

    for child in &self.children {
      child.write_html(out);
    }
    let _ = write!(out, "</{}>", self.tag);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_serializes_attributes_in_order() {
    let html = RenderableUnit::from(
      Element::new("a")
        .class("links")
        .attr("href", "/docs")
        .style("font-weight", "400")
        .child(RenderableUnit::text("Docs")),
    )
    .to_html();
    assert_eq!(
      html,
      r#"<a class="links" href="/docs" style="font-weight: 400">Docs</a>"#
    );
  }

  #[test]
  fn test_escapes_text_and_attributes() {
    let html = RenderableUnit::from(
      Element::new("p")
        .attr("title", r#"say "hi""#)
        .child(RenderableUnit::text("<script>alert(1)</script>")),
    )
    .to_html();
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("title=\"say &quot;hi&quot;\""));
  }

  #[test]
  fn test_void_elements() {
    let html = RenderableUnit::from(Element::new("br")).to_html();
    assert_eq!(html, "<br>");
  }

  #[test]
  fn test_attr_and_style_replace() {
    let element = Element::new("div")
      .attr("id", "a")
      .attr("id", "b")
      .style("margin-top", "8px")
      .style("margin-top", "16px");
    assert_eq!(element.get_attr("id"), Some("b"));
    assert_eq!(element.get_style("margin-top"), Some("16px"));
    assert_eq!(element.attrs.len(), 1);
  }

  #[test]
  fn test_find_and_text_content() {
    let unit = RenderableUnit::from(
      Element::new("div")
        .child(Element::new("span").class("inner").child(RenderableUnit::text("a")))
        .child(RenderableUnit::text("b")),
    );
    let element = unit.as_element().map(|e| e.find(&|e| e.has_class("inner")));
    assert_eq!(element.flatten().map(|e| e.tag), Some("span"));
    assert_eq!(unit.text_content(), "ab");
  }
}
