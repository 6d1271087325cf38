//! Validation outcomes and rejection reasons

use serde::{Deserialize, Serialize};
use std::fmt;

use reservation_core::SlotName;

/// Which name slot a name rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameField {
    First,
    Last,
}

impl NameField {
    /// Label used in messages ("First name", "Last name")
    pub fn label(&self) -> &'static str {
        match self {
            Self::First => "First name",
            Self::Last => "Last name",
        }
    }

    pub fn slot(&self) -> SlotName {
        match self {
            Self::First => SlotName::FirstName,
            Self::Last => SlotName::LastName,
        }
    }
}

/// Why a slot value was not accepted
///
/// The `Display` impl renders the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejection {
    /// Name shorter than the minimum length
    NameTooShort { field: NameField, min_length: usize },
    /// Name contains a digit
    NameContainsNumbers { field: NameField },
    /// Name contains a forbidden symbol
    NameContainsSymbols { field: NameField, symbols: String },
    /// No single-digit guest count found
    GuestCountNotUnderstood,
    /// No single date found
    DateNotUnderstood,
    /// Arrival date before today
    ArrivalInPast,
    /// Departure date before today
    DepartureInPast,
    /// Departure not strictly after the accepted arrival
    DepartureNotAfterArrival,
    /// No single email address found
    EmailNotUnderstood,
    /// No single known city found
    CityNotUnderstood,
}

impl Rejection {
    /// Whether the extractor found nothing usable, as opposed to a value
    /// that broke a rule
    pub fn is_no_match(&self) -> bool {
        matches!(
            self,
            Self::GuestCountNotUnderstood
                | Self::DateNotUnderstood
                | Self::EmailNotUnderstood
                | Self::CityNotUnderstood
        )
    }

    /// User-facing message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

fn count_word(count: usize) -> String {
    const WORDS: [&str; 10] = [
        "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
    ];
    WORDS
        .get(count)
        .map(|w| w.to_string())
        .unwrap_or_else(|| count.to_string())
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameTooShort { field, min_length } => write!(
                f,
                "{} shall be at least {} letter long.",
                field.label(),
                count_word(*min_length)
            ),
            Self::NameContainsNumbers { field } => {
                write!(f, "{} shall not contain numbers.", field.label())
            },
            Self::NameContainsSymbols { field, symbols } => write!(
                f,
                "{} shall not contain any of the following symbols: {}",
                field.label(),
                symbols
            ),
            Self::GuestCountNotUnderstood => f.write_str("I could not understand now many."),
            Self::DateNotUnderstood => f.write_str("I could not understand the date."),
            Self::ArrivalInPast => f.write_str("Arrival date shall be in the future."),
            Self::DepartureInPast => f.write_str("Departure date shall be in the future."),
            Self::DepartureNotAfterArrival => {
                f.write_str("Departure shall be at least one day after the arrival.")
            },
            Self::EmailNotUnderstood => f.write_str("I could not understand the email."),
            Self::CityNotUnderstood => f.write_str("I did not understand in which city."),
        }
    }
}

/// Result of validating one slot answer
///
/// Exactly one of `value` and `rejection` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub slot: SlotName,
    /// Value to store in the slot
    pub value: Option<String>,
    /// Reason the answer was not accepted
    pub rejection: Option<Rejection>,
}

impl ValidationOutcome {
    pub fn accepted(slot: SlotName, value: impl Into<String>) -> Self {
        Self {
            slot,
            value: Some(value.into()),
            rejection: None,
        }
    }

    pub fn rejected(slot: SlotName, rejection: Rejection) -> Self {
        Self {
            slot,
            value: None,
            rejection: Some(rejection),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.value.is_some()
    }

    /// Re-prompt message, if rejected
    pub fn message(&self) -> Option<String> {
        self.rejection.as_ref().map(Rejection::message)
    }
}
