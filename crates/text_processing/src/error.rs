//! Text processing errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TextProcessingError>;

/// Errors raised while building extractors
///
/// Extraction itself never fails: a miss is an empty result, not an error.
#[derive(Error, Debug)]
pub enum TextProcessingError {
    #[error("No number normalizer for language: {0}")]
    UnsupportedLanguage(String),

    #[error("Invalid extraction settings: {0}")]
    InvalidSettings(String),
}
