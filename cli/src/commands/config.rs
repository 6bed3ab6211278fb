// ndops/cli/src/commands/config.rs

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use crate::config::CliConfig;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write a default configuration file
    Init {
        /// Destination (defaults to ~/.ndops/config.toml)
        path: Option<PathBuf>,

        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

pub fn execute(cmd: ConfigCommands, config: &CliConfig) -> Result<()> {
    match cmd {
        ConfigCommands::Init { path, force } => {
            let written = CliConfig::init(path.as_deref(), force)?;
            println!(
                "{} {}",
                "✓ Configuration written to".green(),
                written.display()
            );
        }
        ConfigCommands::Show => {
            print!("{}", config.to_toml()?);
        }
    }
    Ok(())
}
