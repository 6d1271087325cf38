//! Extraction settings
//!
//! Mirrors the parser configuration the date cascade and the lexical
//! normalizer are built from.

use serde::{Deserialize, Serialize};

use crate::constants::numbers;

/// Ordering preference for ambiguous numeric dates like `05.06.2025`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum DateOrder {
    /// day.month.year
    #[default]
    Dmy,
    /// month/day/year
    Mdy,
    /// year-month-day
    Ymd,
}

/// Resolution of dates with missing components ("June 7th", "Monday")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PreferDatesFrom {
    /// Next occurrence
    #[default]
    Future,
    /// Last occurrence
    Past,
    /// Occurrence in the current year / week
    CurrentPeriod,
}

/// Date component that may be required in a parsed expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePart {
    Day,
    Month,
    Year,
}

/// Natural-language date parser settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateParserSettings {
    /// Ordering preference for ambiguous numeric dates
    #[serde(default)]
    pub date_order: DateOrder,

    /// How missing components are resolved
    #[serde(default)]
    pub prefer_dates_from: PreferDatesFrom,

    /// Components an absolute expression must state explicitly
    #[serde(default = "default_required_parts")]
    pub required_parts: Vec<DatePart>,
}

fn default_required_parts() -> Vec<DatePart> {
    vec![DatePart::Day, DatePart::Month]
}

impl Default for DateParserSettings {
    fn default() -> Self {
        Self {
            date_order: DateOrder::default(),
            prefer_dates_from: PreferDatesFrom::default(),
            required_parts: default_required_parts(),
        }
    }
}

impl DateParserSettings {
    /// Whether `part` must be present in the parsed expression
    pub fn requires(&self, part: DatePart) -> bool {
        self.required_parts.contains(&part)
    }
}

/// Settings of the extraction pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionSettings {
    /// Date parser configuration
    #[serde(default)]
    pub date: DateParserSettings,

    /// Language of the lexical normalizer (ISO 639-1)
    #[serde(default = "default_number_language")]
    pub number_language: String,
}

fn default_number_language() -> String {
    numbers::DEFAULT_LANGUAGE.to_string()
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            date: DateParserSettings::default(),
            number_language: default_number_language(),
        }
    }
}
