//! Configuration management for reservation slot extraction
//!
//! Supports loading configuration from:
//! - YAML/TOML files (`config/default`, `config/{env}`)
//! - Environment variables (RESERVATION_ prefix, `__` separator)
//!
//! Every setting has a compiled-in default, so a process without any
//! configuration file behaves exactly like the defaults documented on
//! each field.

pub mod constants;
pub mod extraction;
pub mod settings;

pub use extraction::{
    DateOrder, DateParserSettings, DatePart, ExtractionSettings, PreferDatesFrom,
};
pub use settings::{
    load_settings, ObservabilityConfig, RuntimeEnvironment, Settings, ValidationSettings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
