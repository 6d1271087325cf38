//! Date extraction and display formatting

pub mod cascade;
pub mod parser;

pub use cascade::{DateCascade, DateStage};
pub use parser::NaturalDateParser;

use chrono::NaiveDate;
use reservation_config::constants::dates::DISPLAY_FORMAT;

/// Render a date as "Sunday 20. July 1969"
pub fn format_display(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Display form of an optional date; `None` stays `None`
pub fn format_date(date: Option<NaiveDate>) -> Option<String> {
    date.map(format_display)
}
