//! Configuration module

pub mod settings;

pub use settings::{GeminiConfig, LoggingConfig, ServerConfig, Settings};
