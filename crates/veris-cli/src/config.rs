// crates/veris-cli/src/config.rs
//
// Runtime configuration for the Veris CLI.
// Loaded from a TOML file or populated with sensible defaults.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

/// Runtime configuration for the CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct VerisConfig {
    /// Path of the JSON-lines claim store file.
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Per-hop trust decay factor used when queries enable decay.
    #[serde(default = "default_decay_factor")]
    pub decay_factor: f64,

    /// Default maximum hop count for observer queries.
    #[serde(default = "default_depth")]
    pub default_depth: i32,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn veris_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".veris")
}

fn default_data_file() -> String {
    veris_home().join("claims.jsonl").to_string_lossy().to_string()
}

fn default_decay_factor() -> f64 {
    veris_graph::DEFAULT_DECAY_FACTOR
}

fn default_depth() -> i32 {
    veris_graph::DEFAULT_DEPTH
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for VerisConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            decay_factor: default_decay_factor(),
            default_depth: default_depth(),
            log_level: default_log_level(),
        }
    }
}

impl VerisConfig {
    /// Default config file location: `~/.veris/config.toml`.
    pub fn default_path() -> PathBuf {
        veris_home().join("config.toml")
    }

    /// Load configuration from `path`, or from the default location.
    ///
    /// A missing file yields the defaults; a present but unparsable file is
    /// an error.
    pub fn load(path: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path)?;
        let config: VerisConfig = toml::from_str(&contents)?;
        Ok(config)
    }
}
