//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{names, numbers};
use crate::{ConfigError, DatePart, ExtractionSettings};

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation, warnings only
    #[default]
    Development,
    /// Staging mode - stricter validation
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Main application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Extraction pipeline configuration
    #[serde(default)]
    pub extraction: ExtractionSettings,

    /// Slot validation rules
    #[serde(default)]
    pub validation: ValidationSettings,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Name plausibility rules used by the slot validators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSettings {
    /// Minimum name length in characters
    #[serde(default = "default_min_name_length")]
    pub min_name_length: usize,

    /// Characters a name must not contain
    #[serde(default = "default_special_characters")]
    pub special_characters: String,
}

fn default_min_name_length() -> usize {
    names::MIN_LENGTH
}

fn default_special_characters() -> String {
    names::SPECIAL_CHARACTERS.to_string()
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            min_name_length: default_min_name_length(),
            special_characters: default_special_characters(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_extraction()?;
        self.validate_validation()?;
        Ok(())
    }

    fn validate_extraction(&self) -> Result<(), ConfigError> {
        let date = &self.extraction.date;

        if date.required_parts.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "extraction.date.required_parts".to_string(),
                message: "At least one date part must be required".to_string(),
            });
        }

        if date.requires(DatePart::Day) && !date.requires(DatePart::Month) {
            tracing::warn!("Day is required without month; bare day numbers will never parse");
        }

        let language = self.extraction.number_language.as_str();
        if !numbers::SUPPORTED_LANGUAGES.contains(&language) {
            return Err(ConfigError::InvalidValue {
                field: "extraction.number_language".to_string(),
                message: format!(
                    "Unsupported language '{}', expected one of {:?}",
                    language,
                    numbers::SUPPORTED_LANGUAGES
                ),
            });
        }

        Ok(())
    }

    fn validate_validation(&self) -> Result<(), ConfigError> {
        if self.validation.min_name_length == 0 {
            return Err(ConfigError::InvalidValue {
                field: "validation.min_name_length".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

/// Load settings from files and environment
///
/// Priority: env vars > config/{env} > config/default > compiled-in defaults
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    // Load default config
    builder = builder.add_source(File::with_name("config/default").required(false));

    // Load environment-specific config
    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    // Load from environment variables
    builder = builder.add_source(
        Environment::with_prefix("RESERVATION")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    // Validate
    settings.validate()?;

    tracing::debug!(
        environment = ?settings.environment,
        date_order = ?settings.extraction.date.date_order,
        "Loaded settings"
    );

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DateOrder, PreferDatesFrom};

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.environment, RuntimeEnvironment::Development);
        assert_eq!(settings.validation.min_name_length, 2);
        assert_eq!(settings.validation.special_characters, r#"!@#$"%^&*()-+?_=,<>/"#);
        assert_eq!(settings.extraction.date.date_order, DateOrder::Dmy);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = Settings::default();
        settings.extraction.date.required_parts.clear();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.extraction.number_language = "de".to_string();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.validation.min_name_length = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_without_files_uses_defaults() {
        let settings = load_settings(Some("does-not-exist")).unwrap();
        assert_eq!(settings.validation, ValidationSettings::default());
        assert_eq!(
            settings.extraction.date.prefer_dates_from,
            PreferDatesFrom::Future
        );
    }

    #[test]
    fn test_settings_from_json() {
        let json = r#"{"environment":"production","validation":{"min_name_length":3}}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert!(settings.environment.is_production());
        assert_eq!(settings.validation.min_name_length, 3);
        assert_eq!(settings.validation.special_characters, names::SPECIAL_CHARACTERS);
        assert_eq!(settings.observability.log_level, "info");
    }
}
