//! Core traits and types for reservation slot extraction
//!
//! This crate provides foundational types used across all other crates:
//! - Slot identifiers for the reservation form
//! - Canonical city identifiers
//! - Entity spans produced by entity recognizers
//! - Core traits for pluggable text processing backends
//! - Error types

pub mod city;
pub mod entity;
pub mod error;
pub mod slot;
pub mod traits;

pub use city::City;
pub use entity::{Entity, EntityLabel};
pub use error::{Error, Result};
pub use slot::SlotName;

// Trait re-exports
pub use traits::{DateParser, EntityRecognizer, NumberNormalizer};
