//! Implementations of the bluedocs subcommands.
use std::{
  fmt::Write as _,
  fs,
  io::{self, Write},
  path::Path,
};

use bluedocs_markdown::{
  RenderedDocument,
  clipboard::SystemClipboard,
  color::{COLOR_NOT_AVAILABLE, ColorFormat, color_code},
  copy::{CopyState, LINK_COPIED_MESSAGE},
  render::PageLocation,
  render_document,
  slug,
  timer::TokioScheduler,
};
use color_eyre::eyre::{Context, Result, bail};
use log::{debug, info, warn};

use crate::config::Config;

fn read_document(file: &Path, config: &Config) -> Result<RenderedDocument> {
  let markdown = fs::read_to_string(file)
    .wrap_err_with(|| format!("Failed to read {}", file.display()))?;
  let theme = config.theme()?;
  Ok(render_document(&markdown, &theme))
}

fn write_stdout(text: &str) -> Result<()> {
  let mut stdout = io::stdout().lock();
  stdout.write_all(text.as_bytes())?;
  stdout.flush()?;
  Ok(())
}

/// Render `file` and write the HTML to the configured output.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the output written.
pub fn render(config: &Config, file: &Path) -> Result<()> {
  let doc = read_document(file, config)?;
  let html = page_html(&doc);

  match &config.output {
    Some(output) => {
      if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
          fs::create_dir_all(parent).wrap_err_with(|| {
            format!("Failed to create directory: {}", parent.display())
          })?;
          info!("Created directory: {}", parent.display());
        }
      }
      fs::write(output, html)
        .wrap_err_with(|| format!("Failed to write {}", output.display()))?;
      info!("Rendered {} to {}", file.display(), output.display());
    },
    None => write_stdout(&html)?,
  }
  Ok(())
}

/// Wrap the rendered units in an `article`, titled after the first `h1`.
#[must_use]
pub fn page_html(doc: &RenderedDocument) -> String {
  let mut html = String::from("<article class=\"markdown\"");
  if let Some(title) = &doc.title {
    let _ = write!(
      html,
      " data-title=\"{}\"",
      html_escape::encode_double_quoted_attribute(title)
    );
  }
  html.push_str(">\n");
  html.push_str(&doc.to_html());
  html.push_str("</article>\n");
  html
}

/// Print every heading of `file` with its anchor and shareable URL.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn anchors(config: &Config, file: &Path, page_path: Option<&str>) -> Result<()> {
  let doc = read_document(file, config)?;
  let location = config.page_location(file, page_path);
  write_stdout(&anchors_report(&doc, &location))
}

/// One line per heading: indentation by level, text, anchor and URL.
#[must_use]
pub fn anchors_report(doc: &RenderedDocument, location: &PageLocation) -> String {
  let mut report = String::new();
  for header in &doc.headers {
    let indent = "  ".repeat(usize::from(header.level.as_u8() - 1));
    let _ = writeln!(
      report,
      "{indent}{} [#{}] {}",
      header.text,
      header.id,
      location.anchor_url(&header.id)
    );
  }
  report
}

/// Find the anchor of the heading named by `query`.
///
/// `query` may be the heading text or its anchor id.
#[must_use]
pub fn resolve_anchor(doc: &RenderedDocument, query: &str) -> Option<String> {
  let wanted = slug::generate(query);
  doc
    .headers
    .iter()
    .find(|h| h.id.as_str() == query || (!wanted.is_empty() && h.id == wanted))
    .map(|h| h.id.to_string())
}

/// Copy the shareable link of a heading in `file` to the clipboard.
///
/// The notification is reported while it is up; the command returns once it
/// has reverted. An unavailable clipboard is not an error: the link is
/// printed either way.
///
/// # Errors
///
/// Returns an error if the file cannot be read or has no such heading.
pub fn copy_link(
  config: &Config,
  file: &Path,
  heading: &str,
  page_path: Option<&str>,
) -> Result<()> {
  let doc = read_document(file, config)?;
  let location = config.page_location(file, page_path);

  let Some(anchor) = resolve_anchor(&doc, heading) else {
    bail!("No heading matching '{heading}' in {}", file.display());
  };

  let runtime = tokio::runtime::Builder::new_current_thread()
    .enable_time()
    .build()
    .wrap_err("Failed to start timer runtime")?;

  runtime.block_on(async {
    let scheduler = TokioScheduler::new(tokio::runtime::Handle::current());
    let Some(mut headline) = doc.mount_headline(&anchor, scheduler) else {
      bail!("No heading with anchor '{anchor}' in {}", file.display());
    };

    // Kept alive until the notification reverts, since some platforms only
    // serve the contents while the owner exists.
    let mut clipboard = SystemClipboard::new();
    headline.activate_copy(&mut clipboard, &location);

    let url = headline.share_url(&location);
    write_stdout(&format!("{url}\n"))?;

    if headline.copy_state() == CopyState::Idle {
      warn!("Clipboard unavailable, link was not copied");
      return Ok(());
    }

    info!("{LINK_COPIED_MESSAGE}");
    headline.copy_watch().reverted().await;
    debug!("Copy notification for #{anchor} reverted");
    Ok(())
  })
}

/// Color codes of `hex` in every supported notation.
#[must_use]
pub fn color_report(hex: &str) -> String {
  let mut report = String::new();
  for format in ColorFormat::ALL {
    let marker = if format.is_approximate() { " (approx.)" } else { "" };
    let _ = writeln!(
      report,
      "{:<5}{}{marker}",
      format.label(),
      color_code(format, hex)
    );
  }
  report
}

/// Print `hex` in every supported notation.
///
/// # Errors
///
/// Returns an error if standard output cannot be written.
pub fn color(hex: &str) -> Result<()> {
  let report = color_report(hex);
  if report.contains(COLOR_NOT_AVAILABLE) {
    warn!("'{hex}' is not a valid hex color");
  }
  write_stdout(&report)
}

#[cfg(test)]
mod tests {
  use super::*;
  use bluedocs_markdown::theme::Theme;

  #[test]
  fn test_resolve_anchor_by_text_or_id() {
    let doc = render_document("# Colors\n\n## UI Colors\n", &Theme::blue());
    assert_eq!(resolve_anchor(&doc, "UI Colors").as_deref(), Some("ui-colors"));
    assert_eq!(resolve_anchor(&doc, "ui-colors").as_deref(), Some("ui-colors"));
    assert_eq!(resolve_anchor(&doc, "Missing"), None);
    assert_eq!(resolve_anchor(&doc, "!!!"), None);
  }

  #[test]
  fn test_anchors_report() {
    let doc = render_document("# Colors\n\n## UI Colors\n", &Theme::blue());
    let location = PageLocation::new("https://example.com", "/style/color");
    assert_eq!(
      anchors_report(&doc, &location),
      "Colors [#colors] https://example.com/style/color#colors\n  UI Colors \
       [#ui-colors] https://example.com/style/color#ui-colors\n"
    );
  }

  #[test]
  fn test_color_report() {
    let report = color_report("#007bc1");
    assert!(report.starts_with("HEX  #007bc1\n"));
    assert!(report.contains("RGB  rgb(0, 123, 193)\n"));
    assert!(report.contains("(approx.)"));

    let invalid = color_report("nope");
    assert_eq!(invalid.matches(COLOR_NOT_AVAILABLE).count(), 4);
  }

  #[test]
  fn test_page_html_title() {
    let doc = render_document("# A \"quoted\" title\n", &Theme::blue());
    let html = page_html(&doc);
    assert!(html.starts_with("<article class=\"markdown\" data-title=\"A &quot;quoted&quot; title\">\n"));
    assert!(html.ends_with("</article>\n"));
  }
}
