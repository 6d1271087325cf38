//! Centralized constants for reservation slot extraction
//!
//! Single source of truth for the default values referenced by the settings
//! structs and by the extractors.

/// Name plausibility rules
pub mod names {
    /// Characters a first or last name must not contain
    pub const SPECIAL_CHARACTERS: &str = r#"!@#$"%^&*()-+?_=,<>/"#;

    /// Minimum accepted name length, in characters
    pub const MIN_LENGTH: usize = 2;
}

/// Date handling
pub mod dates {
    /// chrono format of the display form ("Sunday 20. July 1969")
    pub const DISPLAY_FORMAT: &str = "%A %d. %B %Y";
}

/// Lexical normalization
pub mod numbers {
    /// Languages with a number normalizer
    pub const SUPPORTED_LANGUAGES: &[&str] = &["en"];

    /// Default normalizer language
    pub const DEFAULT_LANGUAGE: &str = "en";

    /// Lone ordinals up to this value stay as words ("first", "second", "third")
    pub const ORDINAL_THRESHOLD: u64 = 3;
}
