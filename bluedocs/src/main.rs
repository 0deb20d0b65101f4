use std::fs;

use bluedocs::{
  cli::{Cli, Commands},
  commands,
  config::Config,
};
use color_eyre::eyre::{Context, Result, bail};
use log::{LevelFilter, info};

fn main() -> Result<()> {
  color_eyre::install()?;

  // Parse command line arguments
  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  match &cli.command {
    Commands::Init {
      output,
      format,
      force,
    } => {
      // Check if file already exists and that we're not forcing overwrite
      if output.exists() && !force {
        bail!(
          "Configuration file already exists: {}. Use --force to overwrite.",
          output.display()
        );
      }

      if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
          fs::create_dir_all(parent).wrap_err_with(|| {
            format!("Failed to create directory: {}", parent.display())
          })?;
          info!("Created directory: {}", parent.display());
        }
      }

      Config::generate_default_config(format, output).wrap_err_with(|| {
        format!("Failed to generate configuration file: {}", output.display())
      })?;
      Ok(())
    },

    Commands::Color { hex } => commands::color(hex),

    Commands::Render { file, .. } => {
      let config = load_config(&cli)?;
      commands::render(&config, file)
    },

    Commands::Anchors { file, page_path } => {
      let config = load_config(&cli)?;
      commands::anchors(&config, file, page_path.as_deref())
    },

    Commands::CopyLink {
      file,
      heading,
      page_path,
    } => {
      let config = load_config(&cli)?;
      commands::copy_link(&config, file, heading, page_path.as_deref())
    },
  }
}

fn load_config(cli: &Cli) -> Result<Config> {
  Config::load(cli).wrap_err("Failed to load configuration")
}
