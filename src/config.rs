//! Configuration management for morpholyzer
//!
//! Handles loading and parsing of the `morpholyzer.toml` configuration file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// File name looked up in the working directory and the user config dir
pub const CONFIG_FILE_NAME: &str = "morpholyzer.toml";

/// Dictionary bundled into the binary through lindera's `embedded-ipadic`
pub const EMBEDDED_IPADIC: &str = "embedded://ipadic";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Tagger settings
    #[serde(default)]
    pub tagger: TaggerConfig,

    /// Input limits applied by front ends
    #[serde(default)]
    pub input: InputConfig,

    /// Output settings for the command line
    #[serde(default)]
    pub output: OutputConfig,
}

/// Tagger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggerConfig {
    /// Primary dictionary: an `embedded://` URI or a path to a compiled dictionary
    #[serde(default = "default_dictionary")]
    pub dictionary: String,

    /// Dictionary tried when the primary one cannot be loaded
    #[serde(default = "default_dictionary")]
    pub fallback_dictionary: String,

    /// Segmentation mode: "normal" or "decompose"
    #[serde(default = "default_mode")]
    pub mode: String,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            dictionary: default_dictionary(),
            fallback_dictionary: default_dictionary(),
            mode: default_mode(),
        }
    }
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Maximum accepted text length, in characters
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format: "json" or "mecab"
    #[serde(default = "default_format")]
    pub format: String,

    /// Pretty-print JSON output
    #[serde(default)]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            pretty: false,
        }
    }
}

fn default_dictionary() -> String {
    EMBEDDED_IPADIC.to_string()
}

fn default_mode() -> String {
    "normal".to_string()
}

fn default_max_chars() -> usize {
    1000
}

fn default_format() -> String {
    "json".to_string()
}

impl Config {
    /// Load configuration from file, falling back to defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Get default config file path
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "morpholyzer")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the working directory or the user config directory
    pub fn load_from_default() -> Self {
        let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
        candidates.extend(Self::default_path());
        Self::load_first(&candidates)
    }

    /// Load the first existing, valid file among `paths`; invalid files are skipped with a warning
    pub fn load_first(paths: &[PathBuf]) -> Self {
        for path in paths.iter().filter(|path| path.exists()) {
            match Self::load(path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Ignoring {}: {}", path.display(), e),
            }
        }

        Config::default()
    }
}
