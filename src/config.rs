use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;
use thiserror::Error;

use crate::core_types::{AccountId, GameId};
use crate::games::{Currency, DEFAULT_GAME};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(flatten)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub currency: Currency,
    /// Cosmetic delays of the acquisition workflow
    #[serde(default)]
    pub timings: TimingsConfig,
    #[serde(default = "default_game")]
    pub default_game: GameId,
    /// Account shown before any profile has been resolved
    #[serde(default)]
    pub default_account_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub enable_tracing: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "./logs".to_string(),
            log_file: "inventory_scope.log".to_string(),
            use_json: false,
            rotation: "daily".to_string(),
            enable_tracing: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub image_base_url: String,
    /// Applied to every upstream request; elapsed means transport failure
    pub request_timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.buff-163.ru".to_string(),
            image_base_url: "https://community.fastly.steamstatic.com/economy/image".to_string(),
            request_timeout_ms: 15_000,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TimingsConfig {
    pub pricing_delay_ms: u64,
    pub finalize_delay_ms: u64,
    /// Pause between the last stage succeeding and the ready signal
    pub settle_delay_ms: u64,
}

impl TimingsConfig {
    /// No artificial delays at all
    pub fn immediate() -> Self {
        Self {
            pricing_delay_ms: 0,
            finalize_delay_ms: 0,
            settle_delay_ms: 0,
        }
    }

    pub fn pricing_delay(&self) -> Duration {
        Duration::from_millis(self.pricing_delay_ms)
    }

    pub fn finalize_delay(&self) -> Duration {
        Duration::from_millis(self.finalize_delay_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl Default for TimingsConfig {
    fn default() -> Self {
        Self {
            pricing_delay_ms: 1200,
            finalize_delay_ms: 500,
            settle_delay_ms: 1000,
        }
    }
}

fn default_game() -> GameId {
    DEFAULT_GAME
}

impl AppConfig {
    /// Load `config/{env}.yaml`
    pub fn load(env: &str) -> Result<Self, ConfigError> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path).map_err(|source| ConfigError::Io {
            path: config_path.clone(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn default_account(&self) -> Option<AccountId> {
        self.default_account_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(AccountId::from)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            upstream: UpstreamConfig::default(),
            currency: Currency::default(),
            timings: TimingsConfig::default(),
            default_game: DEFAULT_GAME,
            default_account_id: None,
        }
    }
}
