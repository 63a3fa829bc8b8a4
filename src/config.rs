// src/config.rs
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const APP_DIR: &str = "table_viewer";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// How the spreadsheet service's JSONP-style wrapper is removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum UnwrapMode {
    /// Drop a fixed number of bytes from each end.
    Offsets { prefix_len: usize, suffix_len: usize },
    /// Keep everything from the first `{` to the last `}`.
    Braces,
}

impl Default for UnwrapMode {
    fn default() -> Self {
        // `/*O_o*/\ngoogle.visualization.Query.setResponse(` ... `);`
        UnwrapMode::Offsets {
            prefix_len: 47,
            suffix_len: 2,
        }
    }
}

/// An entry in the source picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    pub label: String,
    pub selector: String,
}

impl fmt::Display for SourceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Selectors starting with this are local files
    pub local_prefix: String,
    /// Directory relative local paths are resolved against
    pub local_root: PathBuf,
    /// Origin of the spreadsheet service's query endpoint
    pub service_base: String,
    pub unwrap: UnwrapMode,
    pub http_timeout_secs: u64,
    pub sources: Vec<SourceEntry>,
    pub default_selector: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            local_prefix: "local_data".to_string(),
            local_root: PathBuf::from("."),
            service_base: "https://docs.google.com".to_string(),
            unwrap: UnwrapMode::default(),
            http_timeout_secs: 15,
            sources: Vec::new(),
            default_selector: None,
        }
    }
}

impl Config {
    /// `<config_dir>/table_viewer/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from the default location, falling back to defaults when there
    /// is no config directory or no file.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Selector to load at startup: the configured default, else the first
    /// picker entry.
    pub fn startup_selector(&self) -> Option<String> {
        self.default_selector
            .clone()
            .or_else(|| self.sources.first().map(|s| s.selector.clone()))
    }
}
