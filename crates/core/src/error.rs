//! Error types shared across crates

use thiserror::Error;

/// Result alias using the core error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when converting raw identifiers into core types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown slot: {0}")]
    UnknownSlot(String),

    #[error("Unknown city: {0}")]
    UnknownCity(String),

    #[error("Unknown entity label: {0}")]
    UnknownEntityLabel(String),
}
