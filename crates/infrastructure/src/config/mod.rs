//! Application configuration
//!
//! Split into focused sub-modules by concern:
//! - `server`: HTTP server and log output settings
//! - `whatsapp`: Verification token and Cloud API send settings
//! - `generation`: Optional AI reply generation
//!
//! Sources are layered: built-in defaults, then an optional `config.{toml,yaml,json}`
//! file, then `REPLY_BRIDGE_*` environment variables with `__` between
//! section and key (e.g. `REPLY_BRIDGE_WHATSAPP__VERIFY_TOKEN`).

mod generation;
mod server;
mod whatsapp;

use config::{ConfigBuilder, builder::DefaultState};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::level_filters::LevelFilter;

pub use generation::{DEFAULT_SYSTEM_PROMPT, GenerationConfig};
pub use server::{LogFormat, ServerConfig};
pub use whatsapp::WhatsAppConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "REPLY_BRIDGE";

/// Configuration errors, all fatal at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Sources could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A required setting is absent or empty
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    /// A setting is present but out of range
    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Log level filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// WhatsApp configuration
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,

    /// Reply generation configuration
    #[serde(default)]
    pub generation: GenerationConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            log_level: default_log_level(),
            whatsapp: WhatsAppConfig::default(),
            generation: GenerationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and optional file
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_builder(
            Self::defaults()?
                .add_source(config::File::with_name("config").required(false))
                .add_source(environment()),
        )
    }

    /// Builder preloaded with defaults for the keys most often overridden
    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Ok(config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("log_level", "info")?)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        Ok(builder.build()?.try_deserialize()?)
    }

    /// Validate the configuration
    ///
    /// Run once at startup, before the listener is bound.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::Invalid(format!("unknown log_level '{}'", self.log_level)))?;

        let whatsapp = &self.whatsapp;
        if whatsapp.verify_token.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigError::Missing("whatsapp.verify_token"));
        }
        if whatsapp.access_token_str().is_none_or(str::is_empty) {
            return Err(ConfigError::Missing("whatsapp.access_token"));
        }
        if whatsapp.phone_number_id.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigError::Missing("whatsapp.phone_number_id"));
        }
        if whatsapp.api_base_url.is_empty() || whatsapp.api_version.is_empty() {
            return Err(ConfigError::Invalid(
                "whatsapp.api_base_url and whatsapp.api_version must not be empty".to_string(),
            ));
        }
        if whatsapp.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "whatsapp.timeout_secs must be greater than 0".to_string(),
            ));
        }

        let generation = &self.generation;
        if generation.enabled {
            if generation.api_key_str().is_none_or(str::is_empty) {
                return Err(ConfigError::Missing("generation.api_key"));
            }
            if generation.timeout_secs == 0 {
                return Err(ConfigError::Invalid(
                    "generation.timeout_secs must be greater than 0".to_string(),
                ));
            }
            generation
                .inference_config()
                .validate()
                .map_err(|e| ConfigError::Invalid(format!("generation: {e}")))?;
        }

        Ok(())
    }
}

/// Environment variable source (`REPLY_BRIDGE_SECTION__KEY`)
///
/// Values stay strings; numeric and boolean fields are converted during
/// deserialization, so tokens such as `007` reach the config untouched.
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}
