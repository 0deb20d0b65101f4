//! Clipboard access for copy-link buttons and color chips.
//!
//! Copying is a convenience: when no clipboard mechanism is available the
//! write is dropped quietly and the success callback never runs.
use std::{
  io::Write,
  process::{Command, Stdio},
};

use log::debug;

/// Error type for clipboard backends.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
  #[error("No clipboard mechanism available")]
  Unavailable,

  #[error("Clipboard command `{command}` failed: {reason}")]
  Command { command: String, reason: String },

  #[error("Clipboard backend error: {0}")]
  Backend(String),
}

/// Something that can hold text for pasting elsewhere.
pub trait ClipboardBackend {
  /// Replace the clipboard contents with `text`.
  ///
  /// # Errors
  ///
  /// Returns an error when the text could not be placed on the clipboard.
  fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Write `text` using the system clipboard, then call `on_success`.
///
/// Callers with nothing to do on success pass `|| {}`.
pub fn write<F: FnOnce()>(text: &str, on_success: F) {
  let mut clipboard = SystemClipboard::new();
  write_with(&mut clipboard, text, on_success);
}

/// Write `text` with the given backend, then call `on_success`.
///
/// Single attempt. Failures are logged and swallowed, and `on_success` only
/// runs when the write went through.
pub fn write_with<B, F>(backend: &mut B, text: &str, on_success: F)
where
  B: ClipboardBackend + ?Sized,
  F: FnOnce(),
{
  match backend.set_text(text) {
    Ok(()) => on_success(),
    Err(e) => debug!("Skipping clipboard write: {e}"),
  }
}

/// The platform clipboard.
///
/// Prefers the native clipboard and falls back to the platform copy
/// commands. On X11 the native contents are served for as long as this value
/// is alive, so keep it around while the copied text is expected to be
/// pasted.
pub struct SystemClipboard {
  #[cfg(feature = "system-clipboard")]
  native: Option<arboard::Clipboard>,
}

impl SystemClipboard {
  #[must_use]
  pub fn new() -> Self {
    Self {
      #[cfg(feature = "system-clipboard")]
      native: arboard::Clipboard::new()
        .map_err(|e| debug!("Native clipboard unavailable: {e}"))
        .ok(),
    }
  }

  #[cfg(feature = "system-clipboard")]
  fn set_native(&mut self, text: &str) -> Result<(), ClipboardError> {
    let native = self.native.as_mut().ok_or(ClipboardError::Unavailable)?;
    native
      .set_text(text.to_owned())
      .map_err(|e| ClipboardError::Backend(e.to_string()))
  }

  #[cfg(not(feature = "system-clipboard"))]
  #[allow(clippy::unused_self, reason = "Mirrors the native variant")]
  fn set_native(&mut self, _text: &str) -> Result<(), ClipboardError> {
    Err(ClipboardError::Unavailable)
  }
}

impl Default for SystemClipboard {
  fn default() -> Self {
    Self::new()
  }
}

impl ClipboardBackend for SystemClipboard {
  fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
    match self.set_native(text) {
      Ok(()) => return Ok(()),
      Err(e) => debug!("Native clipboard write failed, trying commands: {e}"),
    }

    for (command, args) in COPY_COMMANDS {
      match pipe_to_command(command, args, text) {
        Ok(()) => return Ok(()),
        Err(e) => debug!("{e}"),
      }
    }

    Err(ClipboardError::Unavailable)
  }
}

/// Copy commands to try, in order of preference.
#[cfg(target_os = "macos")]
const COPY_COMMANDS: &[(&str, &[&str])] = &[("pbcopy", &[])];

#[cfg(windows)]
const COPY_COMMANDS: &[(&str, &[&str])] = &[("cmd", &["/C", "clip"])];

#[cfg(all(unix, not(target_os = "macos")))]
const COPY_COMMANDS: &[(&str, &[&str])] = &[
  ("wl-copy", &[]),
  ("xclip", &["-selection", "clipboard"]),
  ("xsel", &["--clipboard", "--input"]),
];

#[cfg(not(any(unix, windows)))]
const COPY_COMMANDS: &[(&str, &[&str])] = &[];

fn pipe_to_command(
  command: &str,
  args: &[&str],
  text: &str,
) -> Result<(), ClipboardError> {
  let failed = |reason: String| {
    ClipboardError::Command {
      command: command.to_owned(),
      reason,
    }
  };

  let mut child = Command::new(command)
    .args(args)
    .stdin(Stdio::piped())
    .stdout(Stdio::null())
    .stderr(Stdio::null())
    .spawn()
    .map_err(|e| failed(e.to_string()))?;

  if let Some(mut stdin) = child.stdin.take() {
    stdin
      .write_all(text.as_bytes())
      .map_err(|e| failed(e.to_string()))?;
  }

  let status = child.wait().map_err(|e| failed(e.to_string()))?;
  if status.success() {
    Ok(())
  } else {
    Err(failed(format!("exited with {status}")))
  }
}

/// In-process clipboard, useful in tests and headless rendering.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
  contents: Option<String>,
  writes:   usize,
}

impl MemoryClipboard {
  #[must_use]
  pub fn contents(&self) -> Option<&str> {
    self.contents.as_deref()
  }

  /// Number of successful writes so far.
  #[must_use]
  pub const fn writes(&self) -> usize {
    self.writes
  }
}

impl ClipboardBackend for MemoryClipboard {
  fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
    self.contents = Some(text.to_owned());
    self.writes += 1;
    Ok(())
  }
}

/// A clipboard that is never available.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableClipboard;

impl ClipboardBackend for UnavailableClipboard {
  fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
    Err(ClipboardError::Unavailable)
  }
}

#[cfg(test)]
mod tests {
  use std::cell::Cell;

  use super::*;

  #[test]
  fn test_write_with_memory_calls_back() {
    let mut clipboard = MemoryClipboard::default();
    let called = Cell::new(false);
    write_with(&mut clipboard, "hello", || called.set(true));
    assert!(called.get());
    assert_eq!(clipboard.contents(), Some("hello"));
    assert_eq!(clipboard.writes(), 1);
  }

  #[test]
  fn test_write_with_unavailable_is_silent() {
    let mut clipboard = UnavailableClipboard;
    let called = Cell::new(false);
    write_with(&mut clipboard, "x", || called.set(true));
    assert!(!called.get());
  }

  #[test]
  fn test_write_with_trait_object() {
    let mut clipboard: Box<dyn ClipboardBackend> = Box::new(UnavailableClipboard);
    let called = Cell::new(0);
    write_with(clipboard.as_mut(), "x", || called.set(called.get() + 1));
    assert_eq!(called.get(), 0);
  }

  #[test]
  fn test_missing_command_reports_error() {
    let err = pipe_to_command("bluedocs-no-such-copy-command", &[], "x");
    assert!(matches!(err, Err(ClipboardError::Command { .. })));
  }
}
