// ndops/cli/src/config.rs

use anyhow::{Context, Result};
use ndops_ops::OpsConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration, stored as TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Operation library settings
    #[serde(default)]
    pub ops: OpsConfig,

    #[serde(default)]
    pub logging: LoggingSection,
}

/// `[logging]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSection {
    /// trace | debug | info | warn | error
    #[serde(default = "default_level")]
    pub level: String,

    /// pretty | json | compact
    #[serde(default = "default_format")]
    pub format: String,

    /// Per-crate levels, e.g. `ndops_ops = "debug"`
    #[serde(default)]
    pub modules: BTreeMap<String, String>,
}

fn default_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "compact".to_string()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            modules: BTreeMap::new(),
        }
    }
}

impl CliConfig {
    /// Load from `config_path`, or the default location. A missing file
    /// yields the defaults.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_config_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(&config_path)
    }

    /// Load from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: CliConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Save to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;
        Ok(())
    }

    /// Write a default config, refusing to clobber an existing file unless `force`
    pub fn init(path: Option<&Path>, force: bool) -> Result<PathBuf> {
        let path = path
            .map(PathBuf::from)
            .or_else(Self::default_config_path)
            .context("Unable to determine config path")?;

        if path.exists() && !force {
            anyhow::bail!(
                "Config already exists at {:?}. Use --force to overwrite",
                path
            );
        }

        Self::default().save(&path)?;
        Ok(path)
    }

    pub fn validate(&self) -> Result<()> {
        self.ops.validate()?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".ndops").join("config.toml"))
    }
}
