//! Core traits for the slot extraction system
//!
//! Extractors depend on these traits rather than on concrete backends so a
//! statistical entity recognizer or another date parser can be swapped in
//! without touching the cascade.
//!
//! # Trait Hierarchy
//!
//! ```text
//! Text Processing:
//!   - NumberNormalizer: Spelled-out numbers → digits
//!   - EntityRecognizer: Text → labelled entity spans
//!   - DateParser: Text → calendar date
//! ```

mod text_processing;

pub use text_processing::{DateParser, EntityRecognizer, NumberNormalizer};
