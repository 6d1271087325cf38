//! Canonical city identifiers
//!
//! The reservation bot only books hotels in a fixed set of cities. Every
//! spelling a user may type is mapped onto one of these identifiers by the
//! city extractor in the text processing crate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Known city
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum City {
    Munich,
    Stuttgart,
    Berlin,
}

impl City {
    /// All known cities, in table order
    pub const ALL: [City; 3] = [City::Munich, City::Stuttgart, City::Berlin];

    /// Canonical display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Munich => "Munich",
            Self::Stuttgart => "Stuttgart",
            Self::Berlin => "Berlin",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        City::ALL
            .iter()
            .copied()
            .find(|city| city.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownCity(s.to_string()))
    }
}
