//! Configuration file loader.

use std::path::{Path, PathBuf};

use super::types::{ConfigOverrides, FileConfig, NotifierConfig};

/// Local config file name searched in the working directory.
const LOCAL_CONFIG_FILE: &str = ".core-keeper-notifier.toml";

/// Configuration loader that searches multiple locations.
#[derive(Debug)]
pub struct ConfigLoader {
    /// Search paths in order of priority.
    search_paths: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader with default search paths.
    #[must_use]
    pub fn new() -> Self {
        let mut search_paths = Vec::new();

        // 1. Current directory: .core-keeper-notifier.toml
        search_paths.push(PathBuf::from(LOCAL_CONFIG_FILE));

        // 2. User config directory: ~/.config/core-keeper-notifier/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            search_paths.push(config_dir.join("core-keeper-notifier").join("config.toml"));
        }

        Self { search_paths }
    }

    /// Create a config loader with a specific config file path.
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            search_paths: vec![path],
        }
    }

    /// Load the first available config file, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed.
    pub fn load_file(&self) -> Result<FileConfig, ConfigError> {
        for path in &self.search_paths {
            if path.exists() {
                tracing::debug!(path = %path.display(), "Loading config file");
                return Self::load_from_path(path);
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(FileConfig::default())
    }

    /// Merge file, environment and command-line settings without validating.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed.
    pub fn merged(&self, overrides: ConfigOverrides) -> Result<FileConfig, ConfigError> {
        Ok(self
            .load_file()?
            .with_env(|key| std::env::var(key).ok())
            .with_overrides(overrides))
    }

    /// Load and validate the full configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file is malformed, a required value
    /// is missing, or the webhook URL is invalid.
    pub fn load(&self, overrides: ConfigOverrides) -> Result<NotifierConfig, ConfigError> {
        self.merged(overrides)?.validate()
    }

    /// Load configuration from a specific path.
    fn load_from_path(path: &Path) -> Result<FileConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the search paths for debugging.
    #[must_use]
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a `.env` file from the working directory or its ancestors.
///
/// Variables already set in the process environment are not overwritten,
/// so the file sits between real environment variables and the TOML file.
/// Returns the path of the file that was loaded, or `None` if there is none.
///
/// # Errors
///
/// Returns an error if a `.env` file exists but cannot be read or parsed.
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Missing required setting {key} (set {env} or pass it on the command line)")]
    Missing {
        key: &'static str,
        env: &'static str,
    },

    #[error("Invalid webhook URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}
