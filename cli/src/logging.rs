// ndops/cli/src/logging.rs

//! Structured Logging Module
//!
//! Sets up `tracing` output for the `ndops` binary. The libraries only emit
//! events; the subscriber lives here.
//!
//! Sources, lowest to highest precedence:
//! - the `[logging]` table of the config file
//! - environment variables (`RUST_LOG`, `LOG_FORMAT`, `LOG_ANSI`)
//! - `-v` flags on the command line

use crate::config::LoggingSection;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "trace" => LogLevel::Trace,
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "warn" => LogLevel::Warn,
            "error" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }

    /// Level for a count of `-v` flags; zero keeps warnings only
    pub fn from_verbosity(count: u8) -> Self {
        match count {
            0 => LogLevel::Warn,
            1 => LogLevel::Info,
            2 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format
    Pretty,
    /// JSON format for log aggregation
    Json,
    /// Compact single-line format
    Compact,
}

impl LogFormat {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "compact" => LogFormat::Compact,
            _ => LogFormat::Pretty,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    /// Enable ANSI colors (for terminal output)
    pub ansi_colors: bool,
    /// Per-crate overrides, e.g. `("ndops_ops", Debug)`
    pub module_levels: Vec<(String, LogLevel)>,
    /// Include target in logs
    pub include_target: bool,
    /// Raw `RUST_LOG` directive, used as-is when set
    pub directive: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            format: LogFormat::Compact,
            ansi_colors: true,
            module_levels: Vec::new(),
            include_target: true,
            directive: None,
        }
    }
}

impl LogConfig {
    /// Start from the `[logging]` table of the config file
    pub fn from_section(section: &LoggingSection) -> Self {
        Self {
            level: LogLevel::from_str(&section.level),
            format: LogFormat::from_str(&section.format),
            module_levels: section
                .modules
                .iter()
                .map(|(module, level)| (module.clone(), LogLevel::from_str(level)))
                .collect(),
            ..Self::default()
        }
    }

    /// Overlay whatever the environment sets on top of this configuration
    ///
    /// Environment variables:
    /// - RUST_LOG: Log level filter (e.g., "info,ndops_ops=debug")
    /// - LOG_FORMAT: Output format (json, pretty, compact)
    /// - LOG_ANSI: Enable ANSI colors (true/false)
    pub fn apply_env(&mut self) {
        if let Ok(rust_log) = std::env::var("RUST_LOG") {
            let level_str = rust_log.split(',').next().unwrap_or("info");
            self.level = LogLevel::from_str(level_str);
            self.directive = Some(rust_log);
        }

        if let Ok(format) = std::env::var("LOG_FORMAT") {
            self.format = LogFormat::from_str(&format);
        }

        if let Ok(ansi) = std::env::var("LOG_ANSI") {
            self.ansi_colors = ansi.to_lowercase() == "true";
        }
    }

    /// `-v` flags win over both the file and the environment
    pub fn with_verbosity(mut self, count: u8) -> Self {
        if count > 0 {
            self.level = LogLevel::from_verbosity(count);
            self.directive = None;
        }
        self
    }

    fn build_filter(&self) -> String {
        if let Some(directive) = &self.directive {
            return directive.clone();
        }

        let mut filter = self.level.as_str().to_string();
        for (module, level) in &self.module_levels {
            filter.push_str(&format!(",{}={}", module, level.as_str()));
        }
        filter
    }
}

/// Install the global subscriber. Events go to stderr so command output
/// on stdout stays machine-readable.
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(config.build_filter())
        .map_err(|e| anyhow::anyhow!("Invalid log filter: {}", e))?;

    match config.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(config.include_target)
                        .with_writer(std::io::stderr)
                        .with_ansi(false),
                )
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to init logging: {}", e))?;
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_target(config.include_target)
                        .with_writer(std::io::stderr)
                        .with_ansi(config.ansi_colors),
                )
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to init logging: {}", e))?;
        }
        LogFormat::Compact => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .compact()
                        .with_target(config.include_target)
                        .with_writer(std::io::stderr)
                        .with_ansi(config.ansi_colors),
                )
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to init logging: {}", e))?;
        }
    }

    Ok(())
}
