//! Slot identifiers for the reservation form

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// A single named field of the reservation being collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotName {
    FirstName,
    LastName,
    NumberOfGuests,
    ArrivalDate,
    DepartureDate,
    Email,
    City,
}

impl SlotName {
    /// All slots in the order the form collects them
    pub const COLLECTION_ORDER: [SlotName; 7] = [
        SlotName::FirstName,
        SlotName::LastName,
        SlotName::NumberOfGuests,
        SlotName::ArrivalDate,
        SlotName::DepartureDate,
        SlotName::Email,
        SlotName::City,
    ];

    /// Stable snake_case identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::NumberOfGuests => "number_of_guests",
            Self::ArrivalDate => "arrival_date",
            Self::DepartureDate => "departure_date",
            Self::Email => "email",
            Self::City => "city",
        }
    }

    /// Whether the slot holds a date rendered in display form
    pub fn is_date(&self) -> bool {
        matches!(self, Self::ArrivalDate | Self::DepartureDate)
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SlotName::COLLECTION_ORDER
            .iter()
            .copied()
            .find(|slot| slot.as_str() == s)
            .ok_or_else(|| Error::UnknownSlot(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_slots() {
        assert_eq!("first_name".parse::<SlotName>().unwrap(), SlotName::FirstName);
        assert_eq!(
            "departure_date".parse::<SlotName>().unwrap(),
            SlotName::DepartureDate
        );
        assert!("departure".parse::<SlotName>().is_err());
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&SlotName::NumberOfGuests).unwrap();
        assert_eq!(json, "\"number_of_guests\"");
    }

    #[test]
    fn test_date_slots() {
        let dates: Vec<_> = SlotName::COLLECTION_ORDER
            .iter()
            .filter(|slot| slot.is_date())
            .collect();
        assert_eq!(dates, vec![&SlotName::ArrivalDate, &SlotName::DepartureDate]);
    }
}
