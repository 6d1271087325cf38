//! Named entity spans

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Entity label assigned by an entity recognizer
///
/// Only the labels relevant to date filtering are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    /// Absolute or relative date expression ("7th June 2025", "today")
    Date,
    /// Ordinal number ("21st", "first")
    Ordinal,
    /// Cardinal number ("2", "twelve")
    Cardinal,
}

impl EntityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "DATE",
            Self::Ordinal => "ORDINAL",
            Self::Cardinal => "CARDINAL",
        }
    }

    /// Higher priority wins when two candidate spans overlap
    pub fn priority(&self) -> u8 {
        match self {
            Self::Date => 3,
            Self::Ordinal => 2,
            Self::Cardinal => 1,
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DATE" => Ok(Self::Date),
            "ORDINAL" => Ok(Self::Ordinal),
            "CARDINAL" => Ok(Self::Cardinal),
            _ => Err(Error::UnknownEntityLabel(s.to_string())),
        }
    }
}

/// A labelled span of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Text covered by the span
    pub text: String,
    /// Assigned label
    pub label: EntityLabel,
    /// Byte offset of the span start
    pub start: usize,
    /// Byte offset one past the span end
    pub end: usize,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: EntityLabel, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            label,
            start,
            end,
        }
    }

    /// Whether two spans share at least one byte
    pub fn overlaps(&self, other: &Entity) -> bool {
        self.start < other.end && other.start < self.end
    }
}
