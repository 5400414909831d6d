//! Application configuration loaded from a RON file.
//!
//! Every field is optional; a missing file means defaults. The API key can
//! also come from the `NEWSAPI_KEY` environment variable, which wins over the file.

use std::fs;
use std::path::Path;
use std::time::Duration;

use feed_logging::{feed_info, LogDestination};
use log::LevelFilter;
use newsfeed_core::FeedSettings;
use newsfeed_engine::FetchSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILENAME: &str = "newsfeed.ron";
pub const API_KEY_ENV: &str = "NEWSAPI_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {message}")]
    Parse { path: String, message: String },
    #[error("invalid config value for {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub top_headlines_url: Option<String>,
    pub everything_url: Option<String>,
    pub country: Option<String>,
    pub settle_delay_ms: Option<u64>,
    pub cooldown_secs: Option<u64>,
    pub page_size: Option<usize>,
    pub max_result_window: Option<usize>,
    pub request_timeout_secs: Option<u64>,
    pub log_destination: Option<String>,
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Loads `path`; a missing file yields the default configuration.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };
        let config = Self::parse(&content).map_err(|message| ConfigError::Parse {
            path: path.display().to_string(),
            message,
        })?;
        feed_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        ron::from_str(content).map_err(|err| err.to_string())
    }

    /// Applies environment overrides, currently only the API key.
    pub fn with_env_overrides(mut self) -> Self {
        self.apply_api_key_override(std::env::var(API_KEY_ENV).ok());
        self
    }

    fn apply_api_key_override(&mut self, key: Option<String>) {
        if let Some(key) = key.filter(|key| !key.trim().is_empty()) {
            self.api_key = Some(key.trim().to_string());
        }
    }

    pub fn feed_settings(&self) -> Result<FeedSettings, ConfigError> {
        let mut settings = FeedSettings::default();
        if let Some(ms) = self.settle_delay_ms {
            settings.settle_delay = Duration::from_millis(ms);
        }
        if let Some(secs) = self.cooldown_secs {
            settings.cooldown = Duration::from_secs(secs);
        }
        if let Some(size) = self.page_size {
            if size == 0 {
                return Err(ConfigError::Invalid {
                    field: "page_size",
                    message: "must be at least 1".to_string(),
                });
            }
            settings.page_size = size;
        }
        if let Some(window) = self.max_result_window {
            if window == 0 {
                return Err(ConfigError::Invalid {
                    field: "max_result_window",
                    message: "must be at least 1".to_string(),
                });
            }
            settings.max_result_window = window;
        }
        if let Some(country) = self.country.as_deref() {
            settings.country = country.trim().to_string();
        }
        Ok(settings)
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        let mut settings = FetchSettings {
            api_key: self.api_key.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            ..FetchSettings::default()
        };
        if let Some(url) = self.top_headlines_url.clone() {
            settings.top_headlines_url = url;
        }
        if let Some(url) = self.everything_url.clone() {
            settings.everything_url = url;
        }
        settings
    }

    pub fn log_destination(&self) -> Result<Option<LogDestination>, ConfigError> {
        self.log_destination
            .as_deref()
            .map(|raw| {
                LogDestination::parse(raw).ok_or_else(|| ConfigError::Invalid {
                    field: "log_destination",
                    message: format!("unknown destination {raw:?}"),
                })
            })
            .transpose()
    }

    pub fn log_level(&self) -> Result<Option<LevelFilter>, ConfigError> {
        self.log_level
            .as_deref()
            .map(|raw| {
                raw.parse::<LevelFilter>().map_err(|_| ConfigError::Invalid {
                    field: "log_level",
                    message: format!("unknown level {raw:?}"),
                })
            })
            .transpose()
    }
}
