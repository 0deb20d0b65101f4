//! Theme palettes used by the renderer.
use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Light or dark presentation.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PaletteMode {
  #[default]
  Light,
  Dark,
}

/// The subset of a site theme that Markdown rendering depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
  pub name:               &'static str,
  pub mode:               PaletteMode,
  pub primary_main:       Color,
  pub primary_dark:       Color,
  /// Page background, also the code background in light mode.
  pub background_default: Color,
  /// Code background in dark mode.
  pub code_background:    Color,
  pub divider:            Color,
  pub text_primary:       Color,
}

// Brand palette values.
const BLUE_500: Color = Color::rgb(0x00, 0x7b, 0xc1);
const BLUE_200: Color = Color::rgb(0x80, 0xbd, 0xe0);
const BLUE_700: Color = Color::rgb(0x00, 0x5e, 0xab);
const WHITE_200: Color = Color::rgb(0xf7, 0xf8, 0xf8);
const BLACK_500: Color = Color::rgb(0x42, 0x4e, 0x54);
const BLACK_900: Color = Color::rgb(0x1c, 0x24, 0x28);
const DARK_BLACK_300: Color = Color::rgb(0x2b, 0x33, 0x36);
const DARK_BLACK_800: Color = Color::rgb(0x0e, 0x11, 0x13);
const WHITE_50: Color = Color::rgb(0xff, 0xff, 0xff);

impl Theme {
  /// Names accepted by [`Theme::by_name`].
  pub const NAMES: [&'static str; 2] = ["blue", "blue-dark"];

  /// The default light theme.
  #[must_use]
  pub fn blue() -> Self {
    Self {
      name:               "blue",
      mode:               PaletteMode::Light,
      primary_main:       BLUE_500,
      primary_dark:       BLUE_700,
      background_default: WHITE_200,
      code_background:    DARK_BLACK_300,
      divider:            BLACK_500.fade(0.88),
      text_primary:       BLACK_900,
    }
  }

  /// The dark variant of [`Theme::blue`].
  #[must_use]
  pub fn blue_dark() -> Self {
    Self {
      name:               "blue-dark",
      mode:               PaletteMode::Dark,
      primary_main:       BLUE_200,
      primary_dark:       BLUE_500,
      background_default: DARK_BLACK_800,
      code_background:    DARK_BLACK_300,
      divider:            WHITE_50.fade(0.88),
      text_primary:       WHITE_50,
    }
  }

  /// Look up a built-in theme by name.
  #[must_use]
  pub fn by_name(name: &str) -> Option<Self> {
    match name {
      "blue" => Some(Self::blue()),
      "blue-dark" => Some(Self::blue_dark()),
      _ => None,
    }
  }

  /// The same palette rendered in another mode.
  #[must_use]
  pub fn with_mode(mut self, mode: PaletteMode) -> Self {
    self.mode = mode;
    self
  }

  #[must_use]
  pub fn is_dark(&self) -> bool {
    self.mode == PaletteMode::Dark
  }
}

impl Default for Theme {
  fn default() -> Self {
    Self::blue()
  }
}
