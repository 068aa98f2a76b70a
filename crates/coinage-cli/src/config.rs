// crates/coinage-cli/src/config.rs
//
// CLI configuration, loaded from a TOML file or populated with defaults.

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Runtime configuration for the CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Path of the JSON ledger snapshot.
    #[serde(default = "default_state_path")]
    pub state_path: String,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output format: "table" or "json".
    #[serde(default = "default_output")]
    pub output: String,
}

fn default_state_path() -> String {
    "~/.coinage/ledger.json".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_output() -> String {
    "table".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            state_path: default_state_path(),
            log_level: default_log_level(),
            output: default_output(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(expand_tilde(path))?;
        Self::parse(&contents)
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: CliConfig = toml::from_str(contents)?;
        Ok(config)
    }

    /// Snapshot path with `~/` expanded.
    pub fn state_path(&self) -> PathBuf {
        PathBuf::from(expand_tilde(&self.state_path))
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest).display().to_string();
        }
    }
    path.to_string()
}
