//! Configuration management for the AgriManage client
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with AGRI_ prefix

use std::path::{Path, PathBuf};

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Default backend base path
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Main client configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Backend API configuration
    pub api: ApiConfig,

    /// Credentials and token storage
    #[serde(default)]
    pub auth: AuthConfig,

    /// Dashboard polling
    pub poller: PollerConfig,

    /// Presentation settings
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Backend base URL including the API version prefix
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthConfig {
    pub username: Option<String>,

    pub password: Option<String>,

    /// File holding the access token between runs; memory only when unset
    pub token_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollerConfig {
    /// Keep refreshing the dashboard report after the initial summary
    pub enabled: bool,

    /// Seconds between dashboard refetches
    pub interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    /// Offset used to decide what "today" is (Asia/Karachi by default)
    pub utc_offset_minutes: i32,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Same as [`Config::load`] with the environment files looked up in `dir`
    pub fn load_from(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGRI_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("api.timeout_secs", 30)?
            .set_default("poller.enabled", false)?
            .set_default("poller.interval_secs", 5)?
            .set_default("display.utc_offset_minutes", 300)?
            // Load environment-specific config file
            .add_source(
                File::with_name(&dir.as_ref().join(&environment).to_string_lossy())
                    .required(false),
            )
            // Override with environment variables (AGRI_ prefix)
            .add_source(
                Environment::with_prefix("AGRI")
                    .separator("__")
                    .try_parsing(true),
            )
            // Short form of AGRI__API__BASE_URL
            .set_override_option("api.base_url", std::env::var("AGRI_API_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_secs: 5,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 300,
        }
    }
}
