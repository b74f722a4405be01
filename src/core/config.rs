//! # Configuration
//!
//! Centralizes playground settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.waypoint/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WaypointConfig {
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Simulated transition duration in milliseconds. Lifecycle events are
    /// emitted this long after a command mutates the hierarchy.
    pub transition_ms: Option<u64>,
    pub log_level: Option<String>,
    /// Screen presented as the initial root.
    pub root_screen: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TRANSITION_MS: u64 = 250;
pub const DEFAULT_LOG_LEVEL: &str = "debug";
pub const DEFAULT_ROOT_SCREEN: &str = "home";

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# waypoint configuration. All settings are optional.

[general]
# Milliseconds between a navigation command and its lifecycle events.
# transition_ms = 250

# Log level for waypoint.log: error | warn | info | debug | trace
# log_level = \"debug\"

# Screen presented as the initial root: home | detail
# root_screen = \"home\"
";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub transition: Duration,
    pub log_level: String,
    pub root_screen: String,
}

/// CLI-level overrides, highest priority in the hierarchy.
#[derive(Debug, Default)]
pub struct Overrides {
    pub transition_ms: Option<u64>,
    pub log_level: Option<String>,
    pub root_screen: Option<String>,
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

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

// ============================================================================
// Loading
// ============================================================================

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".waypoint").join("config.toml"))
}

/// Load the config file, generating a commented default on first run.
pub fn load() -> Result<WaypointConfig, ConfigError> {
    let Some(path) = config_path() else {
        return Ok(WaypointConfig::default());
    };
    if !path.exists() {
        if let Err(e) = write_default_config(&path) {
            warn!("could not write default config at {}: {e}", path.display());
        }
        return Ok(WaypointConfig::default());
    }
    let text = fs::read_to_string(&path)?;
    Ok(toml::from_str(&text)?)
}

fn write_default_config(path: &PathBuf) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, DEFAULT_CONFIG_TEMPLATE)
}

/// Apply the override hierarchy and produce concrete values.
pub fn resolve(file: WaypointConfig, cli: Overrides) -> ResolvedConfig {
    let env_transition_ms = std::env::var("WAYPOINT_TRANSITION_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok());

    let transition_ms = cli
        .transition_ms
        .or(env_transition_ms)
        .or(file.general.transition_ms)
        .unwrap_or(DEFAULT_TRANSITION_MS);

    let log_level = cli
        .log_level
        .or(file.general.log_level)
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

    let root_screen = cli
        .root_screen
        .or(file.general.root_screen)
        .unwrap_or_else(|| DEFAULT_ROOT_SCREEN.to_string());

    ResolvedConfig {
        transition: Duration::from_millis(transition_ms),
        log_level,
        root_screen,
    }
}
