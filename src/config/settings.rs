//! Application settings and configuration management

use crate::error::{AppError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Largest accepted reference image upload
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_upload_bytes() -> usize {
    20 * 1024 * 1024
}

/// Gemini API configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model used when a reference image is supplied
    #[serde(default = "default_edit_model")]
    pub edit_model: String,
    /// Model used for text-only generation
    #[serde(default = "default_imagen_model")]
    pub imagen_model: String,
    /// Per-call timeout. Unset means calls may wait indefinitely.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

// The key must never end up in logs.
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("edit_model", &self.edit_model)
            .field("imagen_model", &self.imagen_model)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_edit_model() -> String {
    "gemini-2.5-flash-image-preview".to_string()
}

fn default_imagen_model() -> String {
    "imagen-4.0-generate-001".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load settings from configuration files and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/default.toml")
    }

    /// Load settings from a specific configuration file path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?
            .set_default("server.max_upload_bytes", default_max_upload_bytes() as i64)?
            .set_default("gemini.api_key", std::env::var("API_KEY").unwrap_or_default())?
            .set_default("gemini.base_url", default_base_url())?
            .set_default("gemini.edit_model", default_edit_model())?
            .set_default("gemini.imagen_model", default_imagen_model())?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?
            // Load from configuration file
            .add_source(File::with_name(path.as_ref().to_str().unwrap_or("config/default")).required(false))
            // Override with environment variables (prefixed with AFFILIATE_STUDIO_)
            .add_source(
                Environment::with_prefix("AFFILIATE_STUDIO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "Server port cannot be 0".to_string(),
            )));
        }

        if self.gemini.api_key.trim().is_empty() {
            return Err(AppError::Config(config::ConfigError::Message(
                "API_KEY environment variable not set.".to_string(),
            )));
        }

        if !["json", "pretty"].contains(&self.logging.format.as_str()) {
            return Err(AppError::Config(config::ConfigError::Message(format!(
                "Invalid logging format '{}'. Must be 'json' or 'pretty'",
                self.logging.format
            ))));
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
                max_upload_bytes: default_max_upload_bytes(),
            },
            gemini: GeminiConfig {
                api_key: String::new(),
                base_url: default_base_url(),
                edit_model: default_edit_model(),
                imagen_model: default_imagen_model(),
                timeout_ms: None,
            },
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
        }
    }
}
