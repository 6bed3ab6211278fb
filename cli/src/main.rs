// ndops/cli/src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use ndops_ops::OpRegistry;
use std::path::PathBuf;
use tracing::debug;

mod commands;
mod config;
mod logging;

use commands::{ops, pick, range};
use config::CliConfig;
use logging::LogConfig;

#[derive(Parser)]
#[command(
    name = "ndops",
    version,
    about = "Tensor list and range operations",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, env = "NDOPS_CONFIG")]
    config: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an arithmetic sequence
    Range(range::RangeArgs),

    /// Select list elements by position
    Pick(pick::PickArgs),

    /// List registered operations
    Ops,

    /// Configuration management
    #[command(subcommand)]
    Config(commands::config::ConfigCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?;

    let mut log_config = LogConfig::from_section(&config.logging);
    log_config.apply_env();
    logging::init_logging(&log_config.with_verbosity(cli.verbose))?;

    let registry = OpRegistry::with_defaults(&config.ops)?;
    debug!(ops = registry.len(), "Registry ready");

    match cli.command {
        Commands::Range(args) => range::execute(args, &registry)?,
        Commands::Pick(args) => pick::execute(args, &registry)?,
        Commands::Ops => ops::execute(&registry),
        Commands::Config(cmd) => commands::config::execute(cmd, &config)?,
    }

    Ok(())
}
