//! # Configuration
//!
//! Where the widget sends messages and how big a terminal cell is.
//! Each layer overrides the one before it:
//! built-in defaults, `~/.milo/config.toml`, `MILO_*` env vars, CLI flags.
//!
//! The first run writes a fully commented file listing every key.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::oracle::DEFAULT_ENDPOINT;

// ============================================================================
// File layout (every key optional)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MiloConfig {
    #[serde(default)]
    pub oracle: OracleConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OracleConfig {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    pub cell_width_px: Option<f64>,
    pub cell_height_px: Option<f64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_CELL_WIDTH_PX: f64 = 8.0;
pub const DEFAULT_CELL_HEIGHT_PX: f64 = 16.0;

// ============================================================================
// Resolved values handed to the TUI
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub endpoint: String,
    /// `None` keeps the HTTP client's default (no timeout).
    pub timeout: Option<Duration>,
    pub cell_width_px: f64,
    pub cell_height_px: f64,
}

/// Values taken from the command line. `None` = flag not given.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.milo/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".milo").join("config.toml"))
}

/// Load config from `~/.milo/config.toml`.
///
/// A missing file is not an error: a commented template is written in its
/// place and the defaults are returned.
pub fn load_config() -> Result<MiloConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(MiloConfig::default());
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(MiloConfig::default());
    }

    load_config_from(&path)
}

/// Load and parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<MiloConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: MiloConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# MILO Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [oracle]
# endpoint = "https://milo-backend-testing.onrender.com/predict"   # Or MILO_ENDPOINT
# timeout_secs = 30                  # Or MILO_TIMEOUT_SECS; unset or 0 = wait forever

# [display]
# Logical pixels per terminal cell, used to size the chat window.
# cell_width_px = 8.0
# cell_height_px = 16.0
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Collapse every layer into concrete values, reading the process env.
pub fn resolve(config: &MiloConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env(
    config: &MiloConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Endpoint: CLI → env → config → default
    let endpoint = cli
        .endpoint
        .clone()
        .or_else(|| env("MILO_ENDPOINT"))
        .or_else(|| config.oracle.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    // Timeout: CLI → env → config → none
    let timeout_secs = cli.timeout_secs.or_else(|| {
        env("MILO_TIMEOUT_SECS")
            .and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(secs) => Some(secs),
                Err(e) => {
                    warn!("Ignoring MILO_TIMEOUT_SECS={:?}: {}", raw, e);
                    None
                }
            })
            .or(config.oracle.timeout_secs)
    });

    ResolvedConfig {
        endpoint,
        // Zero means wait forever, same as unset
        timeout: timeout_secs.filter(|secs| *secs > 0).map(Duration::from_secs),
        cell_width_px: positive_or(config.display.cell_width_px, DEFAULT_CELL_WIDTH_PX),
        cell_height_px: positive_or(config.display.cell_height_px, DEFAULT_CELL_HEIGHT_PX),
    }
}

fn positive_or(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v > 0.0 && v.is_finite() => v,
        Some(v) => {
            warn!("Ignoring non-positive cell size {}, using {}", v, default);
            default
        }
        None => default,
    }
}
