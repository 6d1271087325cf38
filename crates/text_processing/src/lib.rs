//! Slot value extraction for reservation chat
//!
//! This crate turns free-form utterances into structured slot values:
//! - **Lexical Normalization**: Spelled-out numbers to digits
//! - **Entity Recognition**: Rule-based DATE / ORDINAL / CARDINAL spans
//! - **Date Extraction**: Three-stage cascade over a natural-language date parser
//! - **City Extraction**: Multilingual alias matching
//! - **Email / Guest Count Extraction**: Regex and digit scans
//!
//! Every extractor fails closed: zero candidates and several candidates both
//! yield `None`.
//!
//! # Example
//!
//! ```ignore
//! use reservation_text_processing::SlotExtractor;
//!
//! let extractor = SlotExtractor::new();
//! assert_eq!(extractor.extract_guest_count("for a family of four"), Some('4'));
//! assert_eq!(extractor.extract_city("bErLiN! let's goooo!!!!!!"), Some(City::Berlin));
//! ```

pub mod cities;
pub mod dates;
pub mod entities;
pub mod numbers;
pub mod slot_extraction;

mod error;

pub use error::{Result, TextProcessingError};

// Re-export key types
pub use cities::{CityAliasSet, CITY_ALIASES};
pub use dates::{format_date, format_display, DateCascade, DateStage, NaturalDateParser};
pub use entities::PatternEntityRecognizer;
pub use numbers::EnglishNumberNormalizer;
pub use slot_extraction::SlotExtractor;
