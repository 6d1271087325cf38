//! Reservation draft

use serde::{Deserialize, Serialize};

use reservation_core::SlotName;

/// Slot values collected so far
///
/// Values are stored in their display form: names verbatim, the guest
/// count as a digit, dates as "Sunday 20. July 1969", the city by its
/// canonical name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub number_of_guests: Option<String>,
    pub arrival_date: Option<String>,
    pub departure_date: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
}

impl ReservationDraft {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, slot: SlotName) -> &mut Option<String> {
        match slot {
            SlotName::FirstName => &mut self.first_name,
            SlotName::LastName => &mut self.last_name,
            SlotName::NumberOfGuests => &mut self.number_of_guests,
            SlotName::ArrivalDate => &mut self.arrival_date,
            SlotName::DepartureDate => &mut self.departure_date,
            SlotName::Email => &mut self.email,
            SlotName::City => &mut self.city,
        }
    }

    pub fn get(&self, slot: SlotName) -> Option<&str> {
        let value = match slot {
            SlotName::FirstName => &self.first_name,
            SlotName::LastName => &self.last_name,
            SlotName::NumberOfGuests => &self.number_of_guests,
            SlotName::ArrivalDate => &self.arrival_date,
            SlotName::DepartureDate => &self.departure_date,
            SlotName::Email => &self.email,
            SlotName::City => &self.city,
        };
        value.as_deref()
    }

    /// Store a value; `None` clears the slot
    pub fn set(&mut self, slot: SlotName, value: Option<String>) {
        *self.slot_mut(slot) = value;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// First unfilled slot in collection order
    pub fn next_missing(&self) -> Option<SlotName> {
        SlotName::COLLECTION_ORDER
            .into_iter()
            .find(|slot| self.get(*slot).is_none())
    }

    pub fn is_complete(&self) -> bool {
        self.next_missing().is_none()
    }

    /// Filled slots in collection order
    pub fn filled(&self) -> Vec<(SlotName, &str)> {
        SlotName::COLLECTION_ORDER
            .into_iter()
            .filter_map(|slot| self.get(slot).map(|value| (slot, value)))
            .collect()
    }
}
