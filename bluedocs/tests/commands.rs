#![allow(clippy::expect_used, reason = "Fine in tests")]
use std::fs;

use bluedocs::{commands, config::Config};
use tempfile::tempdir;

const PAGE: &str = r#"# Color

Palette colors for [Brightlayer UI](https://brightlayer-ui.github.io) and
[internal pages](/style/typography).

## UI Colors

> Use the primary color sparingly.

### Status colors

Inline `#007bc1` code.
"#;

#[test]
fn test_render_writes_output_file() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let input = temp_dir.path().join("color.md");
  let output = temp_dir.path().join("out").join("color.html");
  fs::write(&input, PAGE).expect("Failed to write input in test");

  let config = Config {
    theme: "blue-dark".to_owned(),
    output: Some(output.clone()),
    ..Config::default()
  };
  commands::render(&config, &input).expect("Render should succeed");

  let html = fs::read_to_string(&output).expect("Output should exist");
  assert!(html.starts_with(r#"<article class="markdown" data-title="Color">"#));
  assert!(html.contains(r#"id="ui-colors""#));
  assert!(html.contains(r#"id="status-colors""#));
  assert!(html.contains(r#"target="_blank""#));
  assert!(html.contains(r#"data-route="/style/typography""#));
  assert!(html.contains("rgba(128, 189, 224, 0.2)"));
}

#[test]
fn test_render_missing_file_fails() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let config = Config::default();
  let result = commands::render(&config, &temp_dir.path().join("missing.md"));
  assert!(result.is_err());
}

#[test]
fn test_anchor_report_for_file() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let input = temp_dir.path().join("color.md");
  fs::write(&input, PAGE).expect("Failed to write input in test");

  let config = Config {
    origin: "https://brightlayer-ui.github.io".to_owned(),
    base_path: "/style".to_owned(),
    ..Config::default()
  };
  let doc = bluedocs_markdown::render_document(PAGE, &config.theme().expect("theme"));
  let location = config.page_location(&input, None);
  let report = commands::anchors_report(&doc, &location);

  let lines: Vec<&str> = report.lines().collect();
  assert_eq!(lines, [
    "Color [#color] https://brightlayer-ui.github.io/style/color#color",
    "  UI Colors [#ui-colors] https://brightlayer-ui.github.io/style/color#ui-colors",
    "    Status colors [#status-colors] https://brightlayer-ui.github.io/style/color#status-colors",
  ]);
}

#[test]
fn test_copy_link_unknown_heading_fails() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let input = temp_dir.path().join("color.md");
  fs::write(&input, PAGE).expect("Failed to write input in test");

  let result = commands::copy_link(&Config::default(), &input, "Nope", None);
  assert!(result.is_err());
}
