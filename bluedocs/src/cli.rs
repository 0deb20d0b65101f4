use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for bluedocs
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "Themed Markdown rendering for design-system docs"
)]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to a configuration file (TOML or JSON). When omitted, `bluedocs.toml`
  /// or `bluedocs.json` in the working directory is used if present.
  #[arg(short = 'c', long = "config-file", global = true)]
  pub config_file: Option<PathBuf>,

  /// Site origin used for shareable heading links, e.g.
  /// `https://brightlayer-ui.github.io`.
  #[arg(long, global = true)]
  pub origin: Option<String>,
}

/// All supported subcommands for the bluedocs CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Render a Markdown file to themed HTML.
  Render {
    /// Markdown file to render.
    file: PathBuf,

    /// Write the HTML here instead of standard output.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Theme to render with.
    #[arg(short, long, value_parser = ["blue", "blue-dark"])]
    theme: Option<String>,
  },

  /// List the headings of a Markdown file with their anchors and links.
  Anchors {
    /// Markdown file to inspect.
    file: PathBuf,

    /// Path of the page on the site. Defaults to the base path followed by
    /// the file stem.
    #[arg(short, long)]
    page_path: Option<String>,
  },

  /// Copy the shareable link of a heading to the clipboard.
  CopyLink {
    /// Markdown file containing the heading.
    file: PathBuf,

    /// Heading text or anchor id.
    heading: String,

    /// Path of the page on the site. Defaults to the base path followed by
    /// the file stem.
    #[arg(short, long)]
    page_path: Option<String>,
  },

  /// Print a color in HEX, RGB, HSL and CMYK notation.
  Color {
    /// Hex color, `#rgb` or `#rrggbb`.
    hex: String,
  },

  /// Initialize a new bluedocs configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "bluedocs.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
