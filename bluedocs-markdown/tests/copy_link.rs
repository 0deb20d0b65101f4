use std::time::Duration;

use bluedocs_markdown::{
  Headline,
  PageLocation,
  clipboard::{MemoryClipboard, UnavailableClipboard},
  copy::{COPY_REVERT_DELAY, CopyState, LINK_COPIED_MESSAGE},
  render_document,
  theme::Theme,
  timer::{ManualScheduler, TokioScheduler},
  types::HeadingLevel,
};

fn location() -> PageLocation {
  PageLocation::new("https://example.com", "/docs/page")
}

#[test]
fn test_copy_link_shows_notification_then_reverts() {
  let scheduler = ManualScheduler::new();
  let mut headline = Headline::new(HeadingLevel::H2, "Getting Started!", scheduler.clone());
  let mut clipboard = MemoryClipboard::default();

  headline.activate_copy(&mut clipboard, &location());
  assert_eq!(
    clipboard.contents(),
    Some("https://example.com/docs/page#getting-started")
  );
  assert_eq!(headline.copy_state(), CopyState::JustCopied);
  assert!(headline.render(&Theme::blue()).to_html().contains(LINK_COPIED_MESSAGE));

  scheduler.advance(Duration::from_millis(2999));
  assert_eq!(headline.copy_state(), CopyState::JustCopied);

  scheduler.advance(Duration::from_millis(1));
  assert_eq!(headline.copy_state(), CopyState::Idle);
  assert!(!headline.render(&Theme::blue()).to_html().contains("snackbar"));
}

#[test]
fn test_unavailable_clipboard_leaves_state_idle() {
  let scheduler = ManualScheduler::new();
  let mut headline = Headline::new(HeadingLevel::H3, "Colors", scheduler.clone());

  headline.activate_copy(&mut UnavailableClipboard, &location());
  assert_eq!(headline.copy_state(), CopyState::Idle);
  assert_eq!(scheduler.pending(), 0);
  assert!(!headline.render(&Theme::blue()).to_html().contains("snackbar"));
}

#[test]
fn test_second_copy_restarts_window() {
  let scheduler = ManualScheduler::new();
  let mut headline = Headline::new(HeadingLevel::H2, "Overview", scheduler.clone());
  let mut clipboard = MemoryClipboard::default();

  headline.activate_copy(&mut clipboard, &location());
  scheduler.advance(Duration::from_millis(1500));
  headline.activate_copy(&mut clipboard, &location());
  assert_eq!(clipboard.writes(), 2);

  scheduler.advance(Duration::from_millis(2999));
  assert_eq!(headline.copy_state(), CopyState::JustCopied);
  scheduler.advance(Duration::from_millis(1));
  assert_eq!(headline.copy_state(), CopyState::Idle);
}

#[test]
fn test_dismiss_notification() {
  let scheduler = ManualScheduler::new();
  let mut headline = Headline::new(HeadingLevel::H2, "Overview", scheduler.clone());
  headline.activate_copy(&mut MemoryClipboard::default(), &location());

  headline.dismiss_notification();
  assert_eq!(headline.copy_state(), CopyState::Idle);
  assert_eq!(scheduler.pending(), 0);
}

#[test]
fn test_unmount_before_revert_cancels_timer() {
  let scheduler = ManualScheduler::new();
  let mut headline = Headline::new(HeadingLevel::H2, "Overview", scheduler.clone());
  headline.activate_copy(&mut MemoryClipboard::default(), &location());

  scheduler.advance(Duration::from_millis(1000));
  drop(headline);
  assert_eq!(scheduler.pending(), 0);

  // Nothing left to fire once the headline is gone.
  scheduler.advance(COPY_REVERT_DELAY);
  assert_eq!(scheduler.now(), Duration::from_millis(4000));
}

#[test]
fn test_mounted_headline_from_document() {
  let doc = render_document("# Page\n\n## Install *now*\n", &Theme::blue());
  let scheduler = ManualScheduler::new();
  let mut headline = doc
    .mount_headline("install-now", scheduler.clone())
    .unwrap_or_else(|| Headline::new(HeadingLevel::H6, "missing", scheduler.clone()));
  assert_eq!(headline.level(), HeadingLevel::H2);

  let mut clipboard = MemoryClipboard::default();
  headline.activate_copy(&mut clipboard, &location());
  assert_eq!(
    clipboard.contents(),
    Some("https://example.com/docs/page#install-now")
  );
  let html = headline.render(&Theme::blue()).to_html();
  assert!(html.contains("<em>now</em>"));
  assert!(html.contains(r#"role="status""#));
}

#[tokio::test(start_paused = true)]
async fn test_tokio_scheduler_reverts_on_time() {
  let scheduler = TokioScheduler::new(tokio::runtime::Handle::current());
  let mut headline = Headline::new(HeadingLevel::H2, "Overview", scheduler);
  headline.activate_copy(&mut MemoryClipboard::default(), &location());
  assert_eq!(headline.copy_state(), CopyState::JustCopied);

  tokio::time::sleep(Duration::from_millis(2900)).await;
  assert_eq!(headline.copy_state(), CopyState::JustCopied);

  tokio::time::sleep(Duration::from_millis(200)).await;
  assert_eq!(headline.copy_state(), CopyState::Idle);
}

#[test]
fn test_non_ascii_heading_link_has_fragment() {
  let scheduler = ManualScheduler::new();
  let mut headline = Headline::new(HeadingLevel::H2, "日本語", scheduler);
  let mut clipboard = MemoryClipboard::default();

  headline.activate_copy(&mut clipboard, &location());
  assert_eq!(clipboard.contents(), Some("https://example.com/docs/page#h2"));
}

#[tokio::test(start_paused = true)]
async fn test_copy_watch_waits_for_revert() {
  let scheduler = TokioScheduler::new(tokio::runtime::Handle::current());
  let mut headline = Headline::new(HeadingLevel::H2, "Overview", scheduler);
  let start = tokio::time::Instant::now();
  headline.activate_copy(&mut MemoryClipboard::default(), &location());

  headline.copy_watch().reverted().await;
  assert!(start.elapsed() >= COPY_REVERT_DELAY);
  assert_eq!(headline.copy_state(), CopyState::Idle);
}
