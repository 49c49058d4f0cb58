//! Configuration file handling for `config.yaml`.
//!
//! [`ConfigFile`] mirrors the YAML document as written by the user; nothing
//! is validated here. See [`super::Settings`] for the checked form.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::defaults::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::geocode::GeocodeError;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config file in any search location
    #[error("No config file found (searched: {0})")]
    NotFound(String),

    /// Config file exists but could not be read
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config file is not valid YAML or has wrongly typed values
    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// Required key absent
    #[error("Missing required configuration key '{0}'")]
    Missing(&'static str),

    /// Key present with an unusable value
    #[error("Invalid configuration: {key} = '{value}' - {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// Home address could not be turned into coordinates
    #[error("Failed to locate home address: {0}")]
    Geocode(#[from] GeocodeError),
}

/// `location` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationSection {
    /// Free-form address, geocoded when `lat`/`lon` are absent.
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Raw contents of the config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    #[serde(default)]
    pub location: LocationSection,

    /// Search radius in miles (`distance` is accepted as an older name).
    #[serde(alias = "distance")]
    pub radius: Option<f64>,

    /// AeroAPI key.
    pub api_key: Option<String>,

    /// Poll interval in seconds.
    pub rate: Option<u64>,

    /// `geodesic` or `degrees`.
    pub bounding_box: Option<String>,

    /// HTTP request timeout in seconds.
    pub timeout_secs: Option<u64>,

    pub feed_url: Option<String>,
    pub lookup_url: Option<String>,
    pub geocoder_url: Option<String>,

    /// Write logs to this file in addition to the console.
    pub log_file: Option<PathBuf>,
}

impl ConfigFile {
    /// Load and parse the config file at `path`.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&contents, path)
    }

    /// Parse YAML text. `origin` is only used in error messages.
    pub fn parse(contents: &str, origin: &Path) -> ConfigResult<Self> {
        // an empty document deserializes as unit, not as an empty mapping
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }
}

/// Get the path to the per-user config directory (`~/.flyover`).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Candidate config file locations, in lookup order.
pub fn config_search_paths() -> Vec<PathBuf> {
    vec![
        PathBuf::from(CONFIG_FILE_NAME),
        config_directory().join(CONFIG_FILE_NAME),
    ]
}

/// Pick the config file to load.
///
/// An explicit path always wins, whether or not it exists. Otherwise the
/// first existing file among `candidates` is used.
pub fn resolve_config_path(
    explicit: Option<&Path>,
    candidates: &[PathBuf],
) -> ConfigResult<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    candidates
        .iter()
        .find(|path| path.is_file())
        .cloned()
        .ok_or_else(|| {
            let searched: Vec<String> = candidates
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            ConfigError::NotFound(searched.join(", "))
        })
}
