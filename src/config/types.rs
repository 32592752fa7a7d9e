//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use super::ConfigError;

/// Environment variable holding the server log path.
pub const LOG_PATH_ENV: &str = "CORE_KEEPER_SERVER_LOG_PATH";

/// Environment variable holding the webhook URL.
pub const WEBHOOK_URL_ENV: &str = "DISCORD_WEBHOOK_URL";

fn default_debounce_ms() -> u64 {
    100
}

/// Settings as they appear in the TOML file.
///
/// Every field is optional here; requirements are checked once all
/// layers have been merged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileConfig {
    /// Path to the server log.
    pub log_path: Option<PathBuf>,
    /// Webhook endpoint for announcements.
    pub webhook_url: Option<String>,
    /// Debounce window for filesystem events, in milliseconds.
    pub debounce_ms: u64,
    /// Announce players already online at startup.
    pub announce_existing: bool,
    /// Log messages instead of delivering them.
    pub dry_run: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            webhook_url: None,
            debounce_ms: default_debounce_ms(),
            announce_existing: false,
            dry_run: false,
        }
    }
}

/// Values supplied on the command line. These win over every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub log_path: Option<PathBuf>,
    pub webhook_url: Option<String>,
    pub announce_existing: bool,
    pub dry_run: bool,
}

impl FileConfig {
    /// Apply environment variables through `lookup`.
    ///
    /// Empty values are treated as unset.
    #[must_use]
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());
        if let Some(path) = non_empty(LOG_PATH_ENV) {
            self.log_path = Some(PathBuf::from(path));
        }
        if let Some(url) = non_empty(WEBHOOK_URL_ENV) {
            self.webhook_url = Some(url);
        }
        self
    }

    /// Apply command-line overrides.
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(path) = overrides.log_path {
            self.log_path = Some(path);
        }
        if let Some(url) = overrides.webhook_url {
            self.webhook_url = Some(url);
        }
        self.announce_existing |= overrides.announce_existing;
        self.dry_run |= overrides.dry_run;
        self
    }

    /// Get the log path or fail if none was configured.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if no layer set the log path.
    pub fn require_log_path(&self) -> Result<PathBuf, ConfigError> {
        self.log_path
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(ConfigError::Missing {
                key: "log_path",
                env: LOG_PATH_ENV,
            })
    }

    /// Validate the merged settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the log path or webhook URL is
    /// absent, or `ConfigError::InvalidUrl` if the webhook is not an
    /// http(s) URL.
    pub fn validate(self) -> Result<NotifierConfig, ConfigError> {
        let log_path = self.require_log_path()?;
        let raw_url = self
            .webhook_url
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::Missing {
                key: "webhook_url",
                env: WEBHOOK_URL_ENV,
            })?;
        let webhook_url = parse_webhook_url(&raw_url)?;

        Ok(NotifierConfig {
            log_path,
            webhook_url,
            debounce: Duration::from_millis(self.debounce_ms),
            announce_existing: self.announce_existing,
            dry_run: self.dry_run,
        })
    }
}

fn parse_webhook_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme {scheme}"),
        }),
    }
}

/// Validated runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct NotifierConfig {
    /// Server log to watch.
    pub log_path: PathBuf,
    /// Webhook endpoint for announcements.
    pub webhook_url: Url,
    /// Debounce window for filesystem events.
    pub debounce: Duration,
    /// Announce players already online at startup.
    pub announce_existing: bool,
    /// Log messages instead of delivering them.
    pub dry_run: bool,
}
