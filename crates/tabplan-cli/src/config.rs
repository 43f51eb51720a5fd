//! Configuration file management for tabplan.
//!
//! Provides a TOML-based config file at `~/.config/tabplan/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use tabplan_core::Period;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub import: ImportSection,
    pub output: OutputSection,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSection {
    /// Period used when `--period` is not given.
    pub default_period: Period,
}

impl Default for ImportSection {
    fn default() -> Self {
        Self {
            default_period: TabplanConfig::DEFAULT_PERIOD,
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self { pretty: true }
    }
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the tabplan config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/tabplan` or `~/.config/tabplan`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("tabplan");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("tabplan")
}

/// Return the path to the tabplan config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;
    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabplanConfig {
    pub period: Period,
    pub pretty: bool,
}

impl TabplanConfig {
    pub const DEFAULT_PERIOD: Period = Period::Weekly;

    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Period: `cli_period` > `TABPLAN_PERIOD` env > `import.default_period` > weekly
    /// - Pretty: `--compact` > `TABPLAN_PRETTY` env > `output.pretty` > true
    pub fn resolve(cli_period: Option<Period>, cli_compact: bool) -> Result<Self> {
        Self::resolve_with(cli_period, cli_compact, load_config().ok())
    }

    /// Resolve against an already-loaded (or absent) config file.
    pub fn resolve_with(
        cli_period: Option<Period>,
        cli_compact: bool,
        file_config: Option<ConfigFile>,
    ) -> Result<Self> {
        let file_config = file_config.unwrap_or_default();

        let period = if let Some(period) = cli_period {
            period
        } else if let Ok(value) = std::env::var("TABPLAN_PERIOD") {
            value
                .parse::<Period>()
                .with_context(|| format!("TABPLAN_PERIOD env var is invalid: {value:?}"))?
        } else {
            file_config.import.default_period
        };

        let pretty = if cli_compact {
            false
        } else if let Ok(value) = std::env::var("TABPLAN_PRETTY") {
            parse_flag(&value)
                .with_context(|| format!("TABPLAN_PRETTY env var is not a boolean: {value:?}"))?
        } else {
            file_config.output.pretty
        };

        Ok(Self { period, pretty })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
