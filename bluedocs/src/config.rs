use std::{
  fs,
  path::{Path, PathBuf},
};

use bluedocs_markdown::{PageLocation, theme::Theme};
use serde::{Deserialize, Serialize};

use crate::{
  cli::{Cli, Commands},
  error::ConfigError,
};

/// File names searched for in the working directory, in order.
pub const CONFIG_FILENAMES: [&str; 4] = [
  "bluedocs.toml",
  "bluedocs.json",
  ".bluedocs.toml",
  ".bluedocs.json",
];

const DEFAULT_TOML_TEMPLATE: &str = r#"# bluedocs configuration

# Site origin used when building shareable heading links.
origin = "http://localhost:3000"

# Path prefix of rendered pages. A page's path is this prefix followed by the
# Markdown file's stem, e.g. "/docs" + "intro.md" -> "/docs/intro".
base_path = "/"

# Theme used for rendering: "blue" or "blue-dark".
theme = "blue"

# Default output file for `bluedocs render`. Standard output when unset.
# output = "page.html"
"#;

const DEFAULT_JSON_TEMPLATE: &str = r#"{
  "origin": "http://localhost:3000",
  "base_path": "/",
  "theme": "blue"
}
"#;

fn default_origin() -> String {
  "http://localhost:3000".to_owned()
}

fn default_base_path() -> String {
  "/".to_owned()
}

fn default_theme() -> String {
  "blue".to_owned()
}

/// Site-level settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
  /// Origin of the documentation site.
  #[serde(default = "default_origin")]
  pub origin: String,

  /// Path prefix of rendered pages.
  #[serde(default = "default_base_path")]
  pub base_path: String,

  /// Name of the theme to render with.
  #[serde(default = "default_theme")]
  pub theme: String,

  /// Default output file for rendered HTML.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub output: Option<PathBuf>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      origin:    default_origin(),
      base_path: default_base_path(),
      theme:     default_theme(),
      output:    None,
    }
  }
}

impl Config {
  /// Create a new configuration from a file
  /// Only TOML and JSON are supported.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read, has an unsupported
  /// extension or does not parse.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let ext = path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase)
      .ok_or_else(|| {
        ConfigError::Config(format!(
          "Config file has no extension: {}",
          path.display()
        ))
      })?;

    match ext.as_str() {
      "json" => Ok(serde_json::from_str(&content)?),
      "toml" => Ok(toml::from_str(&content)?),
      _ => {
        Err(ConfigError::Config(format!(
          "Unsupported config file format: {}",
          path.display()
        )))
      },
    }
  }

  /// Load config from file and CLI arguments
  ///
  /// # Errors
  ///
  /// Returns an error if a config file fails to load or the resulting theme
  /// is unknown.
  pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
    let discovered = std::env::current_dir()
      .ok()
      .and_then(|dir| Self::find_config_file(&dir));
    Self::load_from(cli, discovered.as_deref())
  }

  /// Like [`Config::load`], with the discovered config file passed in.
  ///
  /// # Errors
  ///
  /// See [`Config::load`].
  pub fn load_from(
    cli: &Cli,
    discovered: Option<&Path>,
  ) -> Result<Self, ConfigError> {
    let mut config = if let Some(config_path) = &cli.config_file {
      Self::from_file(config_path)?
    } else if let Some(discovered) = discovered {
      log::info!("Using discovered config file: {}", discovered.display());
      Self::from_file(discovered)?
    } else {
      Self::default()
    };

    config.merge_with_cli(cli);

    // Fail early on a bad theme name rather than on first render.
    config.theme()?;

    Ok(config)
  }

  /// Merge CLI arguments into this config, prioritizing CLI values when
  /// present
  pub fn merge_with_cli(&mut self, cli: &Cli) {
    if let Some(origin) = &cli.origin {
      self.origin.clone_from(origin);
    }

    if let Commands::Render { output, theme, .. } = &cli.command {
      if let Some(output) = output {
        self.output = Some(output.clone());
      }
      if let Some(theme) = theme {
        self.theme.clone_from(theme);
      }
    }
  }

  /// Search for a config file in `dir`.
  #[must_use]
  pub fn find_config_file(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
      .iter()
      .map(|name| dir.join(name))
      .find(|path| path.is_file())
  }

  /// The configured theme.
  ///
  /// # Errors
  ///
  /// Returns an error if no built-in theme has the configured name.
  pub fn theme(&self) -> Result<Theme, ConfigError> {
    Theme::by_name(&self.theme).ok_or_else(|| {
      ConfigError::Config(format!(
        "Unknown theme '{}', expected one of: {}",
        self.theme,
        Theme::NAMES.join(", ")
      ))
    })
  }

  /// Location of the page rendered from `file`.
  ///
  /// `page_path` overrides the path derived from the base path and the file
  /// stem.
  #[must_use]
  pub fn page_location(
    &self,
    file: &Path,
    page_path: Option<&str>,
  ) -> PageLocation {
    let origin = self.origin.trim_end_matches('/');
    let path = page_path.map_or_else(
      || {
        let base = self.base_path.trim_end_matches('/');
        let stem = file
          .file_stem()
          .map(|stem| stem.to_string_lossy())
          .unwrap_or_default();
        format!("{base}/{stem}")
      },
      str::to_owned,
    );
    PageLocation::new(origin, path)
  }

  /// Generate a default configuration file with commented explanations
  ///
  /// # Errors
  ///
  /// Returns an error for an unsupported format or if the file cannot be
  /// written.
  pub fn generate_default_config(
    format: &str,
    path: &Path,
  ) -> Result<(), ConfigError> {
    let content = match format.to_lowercase().as_str() {
      "toml" => DEFAULT_TOML_TEMPLATE,
      "json" => DEFAULT_JSON_TEMPLATE,
      _ => {
        return Err(ConfigError::Config(format!(
          "Unsupported config format: {format}"
        )));
      },
    };

    fs::write(path, content)?;

    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_templates_parse_to_defaults() {
    let from_toml: Config = toml::from_str(DEFAULT_TOML_TEMPLATE)
      .unwrap_or_else(|e| unreachable!("toml template: {e}"));
    let from_json: Config = serde_json::from_str(DEFAULT_JSON_TEMPLATE)
      .unwrap_or_else(|e| unreachable!("json template: {e}"));
    assert_eq!(from_toml, Config::default());
    assert_eq!(from_json, Config::default());
  }

  #[test]
  fn test_page_location() {
    let config = Config {
      origin: "https://example.com/".to_owned(),
      base_path: "/docs/".to_owned(),
      ..Config::default()
    };
    let location = config.page_location(Path::new("pages/intro.md"), None);
    assert_eq!(location.origin, "https://example.com");
    assert_eq!(location.path, "/docs/intro");

    let location = config.page_location(Path::new("intro.md"), Some("/custom"));
    assert_eq!(location.path, "/custom");

    let location = Config::default().page_location(Path::new("color.md"), None);
    assert_eq!(location.path, "/color");
  }

  #[test]
  fn test_unknown_theme() {
    let config = Config {
      theme: "purple".to_owned(),
      ..Config::default()
    };
    assert!(matches!(config.theme(), Err(ConfigError::Config(_))));
  }
}
