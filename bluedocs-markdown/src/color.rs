//! Color parsing and display formats.
//!
//! Used for the theme tints computed by the renderer and for the palette
//! codes shown next to color swatches (HEX, RGB, HSL, CMYK).
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Shown in place of a color code that cannot be computed.
pub const COLOR_NOT_AVAILABLE: &str = "--";

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
  #[error("Invalid hex color: {0:?}")]
  InvalidHex(String),
}

/// An sRGB color with an alpha channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
  pub red:   u8,
  pub green: u8,
  pub blue:  u8,
  pub alpha: f64,
}

impl Color {
  /// Opaque color from its channels.
  #[must_use]
  pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
    Self {
      red,
      green,
      blue,
      alpha: 1.0,
    }
  }

  /// Parse `#rgb` or `#rrggbb` (the leading `#` is optional).
  ///
  /// # Errors
  ///
  /// Returns [`ColorError::InvalidHex`] for any other shape.
  pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
    let invalid = || ColorError::InvalidHex(hex.to_owned());
    let trimmed = hex.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
      return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match digits.len() {
      3 => {
        let mut channels = [0u8; 3];
        for (slot, c) in channels.iter_mut().zip(digits.chars()) {
          let double: String = [c, c].iter().collect();
          *slot = channel(&double)?;
        }
        Ok(Self::rgb(channels[0], channels[1], channels[2]))
      },
      6 => {
        Ok(Self::rgb(
          channel(&digits[0..2])?,
          channel(&digits[2..4])?,
          channel(&digits[4..6])?,
        ))
      },
      _ => Err(invalid()),
    }
  }

  /// Reduce opacity by `ratio` of its current value.
  ///
  /// `fade(0.9)` on an opaque color leaves 10% opacity.
  #[must_use]
  pub fn fade(self, ratio: f64) -> Self {
    Self {
      alpha: self.alpha * (1.0 - ratio.clamp(0.0, 1.0)),
      ..self
    }
  }

  /// The same color at full opacity.
  #[must_use]
  pub const fn opaque(self) -> Self {
    Self::rgb(self.red, self.green, self.blue)
  }

  /// `#rrggbb`, ignoring alpha.
  #[must_use]
  pub fn to_hex(self) -> String {
    format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
  }

  /// CSS color value: `rgb(r, g, b)` when opaque, `rgba(r, g, b, a)`
  /// otherwise. Alpha is written with at most three decimals.
  #[must_use]
  pub fn to_css(self) -> String {
    if self.alpha >= 1.0 {
      format!("rgb({}, {}, {})", self.red, self.green, self.blue)
    } else {
      let alpha = (self.alpha.max(0.0) * 1000.0).round() / 1000.0;
      format!(
        "rgba({}, {}, {}, {alpha})",
        self.red, self.green, self.blue
      )
    }
  }

  /// Hue in degrees, saturation and lightness in percent.
  #[must_use]
  pub fn to_hsl(self) -> (f64, f64, f64) {
    let r = f64::from(self.red) / 255.0;
    let g = f64::from(self.green) / 255.0;
    let b = f64::from(self.blue) / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let lightness = (max + min) / 2.0;

    if delta == 0.0 {
      return (0.0, 0.0, lightness * 100.0);
    }

    let saturation = if lightness <= 0.5 {
      delta / (max + min)
    } else {
      delta / (2.0 - max - min)
    };

    #[allow(clippy::float_cmp, reason = "max is one of r, g, b exactly")]
    let hue = if max == r {
      (g - b) / delta
    } else if max == g {
      2.0 + (b - r) / delta
    } else {
      4.0 + (r - g) / delta
    };
    let hue = (hue * 60.0).rem_euclid(360.0);

    (hue, saturation * 100.0, lightness * 100.0)
  }

  /// Cyan, magenta, yellow and key in percent.
  #[must_use]
  pub fn to_cmyk(self) -> (f64, f64, f64, f64) {
    let r = f64::from(self.red) / 255.0;
    let g = f64::from(self.green) / 255.0;
    let b = f64::from(self.blue) / 255.0;
    let k = 1.0 - r.max(g).max(b);
    if k >= 1.0 {
      return (0.0, 0.0, 0.0, 100.0);
    }
    let part = |x: f64| (1.0 - x - k) / (1.0 - k) * 100.0;
    (part(r), part(g), part(b), k * 100.0)
  }
}

impl FromStr for Color {
  type Err = ColorError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::from_hex(s)
  }
}

impl fmt::Display for Color {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.to_css())
  }
}

/// Display format for a palette color code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColorFormat {
  Hex,
  Rgb,
  Hsl,
  Cmyk,
}

impl ColorFormat {
  pub const ALL: [Self; 4] = [Self::Hex, Self::Rgb, Self::Hsl, Self::Cmyk];

  #[must_use]
  pub const fn label(self) -> &'static str {
    match self {
      Self::Hex => "HEX",
      Self::Rgb => "RGB",
      Self::Hsl => "HSL",
      Self::Cmyk => "CMYK",
    }
  }

  /// HSL and CMYK codes are approximations of the design value and are shown
  /// with an asterisk.
  #[must_use]
  pub const fn is_approximate(self) -> bool {
    matches!(self, Self::Hsl | Self::Cmyk)
  }
}

/// Format `hex` in the requested display format.
///
/// Returns [`COLOR_NOT_AVAILABLE`] when `hex` is not a valid color.
///
/// # Examples
///
/// ```
/// use bluedocs_markdown::color::{ColorFormat, color_code};
///
/// assert_eq!(color_code(ColorFormat::Rgb, "#007bc1"), "rgb(0, 123, 193)");
/// assert_eq!(color_code(ColorFormat::Cmyk, "#ffffff"), "C: 0, M: 0, Y: 0, K: 0");
/// assert_eq!(color_code(ColorFormat::Hsl, "nope"), "--");
/// ```
#[must_use]
pub fn color_code(format: ColorFormat, hex: &str) -> String {
  let Ok(color) = Color::from_hex(hex) else {
    log::debug!("Cannot format invalid color {hex:?}");
    return COLOR_NOT_AVAILABLE.to_owned();
  };

  match format {
    ColorFormat::Hex => hex.to_owned(),
    ColorFormat::Rgb => color.to_css(),
    ColorFormat::Hsl => {
      let (h, s, l) = color.to_hsl();
      format!("hsl({}, {}%, {}%)", h.round(), s.round(), l.round())
    },
    ColorFormat::Cmyk => {
      let (c, m, y, k) = color.to_cmyk();
      format!(
        "C: {}, M: {}, Y: {}, K: {}",
        c.round(),
        m.round(),
        y.round(),
        k.round()
      )
    },
  }
}
