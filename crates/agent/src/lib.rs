//! Reservation Form Agent
//!
//! Features:
//! - Per-slot validation of user answers (names, guest count, dates, email, city)
//! - Typed rejections carrying the user-facing re-prompt message
//! - Cross-turn state for the arrival / departure ordering check
//! - Reservation draft with collection order
//! - Thread-safe in-memory session registry

pub mod dst;
pub mod form;
pub mod session;

pub use dst::{CrossTurnState, ReservationDraft};
pub use form::{
    NameField, NameRules, Rejection, ReservationFormValidator, SlotValidatorFn,
    ValidationOutcome,
};
pub use session::{ReservationSession, SessionRegistry};

use thiserror::Error;

/// Agent errors
///
/// User input problems are never errors: they surface as a [`Rejection`]
/// inside an `Ok(ValidationOutcome)`.
#[derive(Error, Debug)]
pub enum AgentError {
    /// Departure date validated before any arrival date was accepted
    #[error("Departure date validated without an accepted arrival date")]
    MissingArrivalDate,

    #[error("Unknown slot: {0}")]
    UnknownSlot(String),

    #[error("Unknown session: {0}")]
    UnknownSession(String),

    #[error("Configuration error: {0}")]
    Config(#[from] reservation_config::ConfigError),

    #[error("Text processing error: {0}")]
    TextProcessing(#[from] reservation_text_processing::TextProcessingError),

    #[error("Core error: {0}")]
    Core(#[from] reservation_core::Error),
}

pub type Result<T> = std::result::Result<T, AgentError>;
