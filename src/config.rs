use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::lockfile::DiffFilter;

/// Schema used when none is configured
pub const DEFAULT_LOCKFILE_SCHEMA: &str = "auto-detect";

/// Output format used when none is configured
pub const DEFAULT_OUTPUT_FORMAT: &str = "text";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Command line defaults read from `config.toml`
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub lockfile_schema: String,
    pub output_format: String,
    pub color: bool,
    /// Which diff buckets are reported
    pub show: DiffFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lockfile_schema: DEFAULT_LOCKFILE_SCHEMA.to_string(),
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
            color: true,
            show: DiffFilter::default(),
        }
    }
}

impl Config {
    /// Load the config from `path`, or from the default location when no
    /// path is given. A missing default file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::read(path),
            None => {
                let path = config_path();
                if path.is_file() {
                    Self::read(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Returns the path to the config directory for lockfile-diff.
/// Uses $XDG_CONFIG_HOME/lockfile-diff if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/lockfile-diff,
/// or ./lockfile-diff if neither is available.
pub fn config_dir() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join("lockfile-diff")
}
