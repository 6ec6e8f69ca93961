//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::itunes::store::DEFAULT_BASE_URL;
use crate::limiter::GlobalLimiter;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Upstream directory base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Store region code; unsupported codes fall back to `us` at call time
    #[serde(default = "default_region")]
    pub region: String,

    /// Whole-request budget per upstream call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection budget per upstream call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Whether upstream calls are gated by the global limiter
    #[serde(default = "default_limiter_enabled")]
    pub limiter_enabled: bool,

    /// Upstream calls admitted per window
    #[serde(default = "default_limiter_capacity")]
    pub limiter_capacity: u32,

    /// Limiter window length, in seconds
    #[serde(default = "default_limiter_window_secs")]
    pub limiter_window_secs: u64,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_region() -> String {
    "us".to_string()
}

fn default_timeout_secs() -> u64 {
    2
}

fn default_limiter_enabled() -> bool {
    true
}

fn default_limiter_capacity() -> u32 {
    2
}

fn default_limiter_window_secs() -> u64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            region: default_region(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_timeout_secs(),
            limiter_enabled: default_limiter_enabled(),
            limiter_capacity: default_limiter_capacity(),
            limiter_window_secs: default_limiter_window_secs(),
            format: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("podfinder").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(base_url) = std::env::var("PODFINDER_BASE_URL") {
            self.base_url = base_url;
        }

        if let Ok(region) = std::env::var("PODFINDER_REGION") {
            self.region = region;
        }

        if let Ok(timeout) = std::env::var("PODFINDER_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.timeout_secs = t;
            }
        }

        if let Ok(enabled) = std::env::var("PODFINDER_LIMITER") {
            if let Ok(e) = enabled.parse() {
                self.limiter_enabled = e;
            }
        }

        self
    }

    /// Starts the global limiter described by this config, or `None` when gating is off.
    pub fn build_limiter(&self) -> Result<Option<Arc<GlobalLimiter>>> {
        if !self.limiter_enabled {
            return Ok(None);
        }

        let window = Duration::from_secs(self.limiter_window_secs);
        let limiter = GlobalLimiter::new(self.limiter_capacity, window).with_context(|| {
            format!("Failed to start limiter (limiter_window_secs = {})", self.limiter_window_secs)
        })?;
        Ok(Some(limiter))
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}
