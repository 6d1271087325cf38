//! Reservation form validation
//!
//! Every slot has one validator with the same signature, looked up in a
//! dispatch table built once per [`ReservationFormValidator`]:
//!
//! | slot               | check                                              |
//! |--------------------|----------------------------------------------------|
//! | `first_name`       | name rules                                         |
//! | `last_name`        | name rules                                         |
//! | `number_of_guests` | one digit                                          |
//! | `arrival_date`     | one date, not before today; stashed for departure  |
//! | `departure_date`   | one date, not before today, after stashed arrival  |
//! | `email`            | one email address                                  |
//! | `city`             | one known city                                     |

pub mod names;
pub mod outcome;

pub use names::NameRules;
pub use outcome::{NameField, Rejection, ValidationOutcome};

use std::collections::HashMap;

use chrono::NaiveDate;
use reservation_config::Settings;
use reservation_core::SlotName;
use reservation_text_processing::{format_display, SlotExtractor};

use crate::dst::CrossTurnState;
use crate::{AgentError, Result};

/// Uniform validator signature
pub type SlotValidatorFn =
    fn(&ReservationFormValidator, &str, &mut CrossTurnState, NaiveDate) -> Result<ValidationOutcome>;

/// Validates raw slot answers and turns them into slot values
#[derive(Clone)]
pub struct ReservationFormValidator {
    extractor: SlotExtractor,
    names: NameRules,
    validators: HashMap<SlotName, SlotValidatorFn>,
}

impl ReservationFormValidator {
    /// Validator with the compiled-in defaults
    pub fn new() -> Self {
        Self::with_parts(SlotExtractor::new(), NameRules::default())
    }

    /// Validator built from loaded settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let extractor = SlotExtractor::from_settings(&settings.extraction)?;
        Ok(Self::with_parts(extractor, NameRules::new(&settings.validation)))
    }

    pub fn with_parts(extractor: SlotExtractor, names: NameRules) -> Self {
        Self {
            extractor,
            names,
            validators: Self::dispatch_table(),
        }
    }

    fn dispatch_table() -> HashMap<SlotName, SlotValidatorFn> {
        let entries: [(SlotName, SlotValidatorFn); 7] = [
            (SlotName::FirstName, Self::validate_first_name),
            (SlotName::LastName, Self::validate_last_name),
            (SlotName::NumberOfGuests, Self::validate_number_of_guests),
            (SlotName::ArrivalDate, Self::validate_arrival_date),
            (SlotName::DepartureDate, Self::validate_departure_date),
            (SlotName::Email, Self::validate_email),
            (SlotName::City, Self::validate_city),
        ];
        entries.into_iter().collect()
    }

    pub fn extractor(&self) -> &SlotExtractor {
        &self.extractor
    }

    /// Validate an answer for `slot` relative to the local date
    pub fn validate(
        &self,
        slot: SlotName,
        text: &str,
        state: &mut CrossTurnState,
    ) -> Result<ValidationOutcome> {
        self.validate_at(slot, text, state, chrono::Local::now().date_naive())
    }

    /// Validate an answer for `slot` relative to `today`
    pub fn validate_at(
        &self,
        slot: SlotName,
        text: &str,
        state: &mut CrossTurnState,
        today: NaiveDate,
    ) -> Result<ValidationOutcome> {
        let validator = self
            .validators
            .get(&slot)
            .ok_or_else(|| AgentError::UnknownSlot(slot.to_string()))?;
        let outcome = validator(self, text, state, today)?;

        match &outcome.rejection {
            None => tracing::info!(slot = %slot, value = ?outcome.value, "Slot accepted"),
            Some(rejection) => tracing::debug!(
                slot = %slot,
                no_match = rejection.is_no_match(),
                reason = %rejection,
                "Slot rejected"
            ),
        }
        Ok(outcome)
    }

    /// Validate an answer for a slot given by its snake_case name
    pub fn validate_field(
        &self,
        name: &str,
        text: &str,
        state: &mut CrossTurnState,
    ) -> Result<ValidationOutcome> {
        let slot: SlotName = name
            .parse()
            .map_err(|_| AgentError::UnknownSlot(name.to_string()))?;
        self.validate(slot, text, state)
    }

    /// [`Self::validate_field`] relative to `today`
    pub fn validate_field_at(
        &self,
        name: &str,
        text: &str,
        state: &mut CrossTurnState,
        today: NaiveDate,
    ) -> Result<ValidationOutcome> {
        let slot: SlotName = name
            .parse()
            .map_err(|_| AgentError::UnknownSlot(name.to_string()))?;
        self.validate_at(slot, text, state, today)
    }

    fn validate_name(&self, field: NameField, text: &str) -> ValidationOutcome {
        match self.names.check(field, text) {
            Some(rejection) => ValidationOutcome::rejected(field.slot(), rejection),
            None => ValidationOutcome::accepted(field.slot(), text),
        }
    }

    fn validate_first_name(
        &self,
        text: &str,
        _state: &mut CrossTurnState,
        _today: NaiveDate,
    ) -> Result<ValidationOutcome> {
        Ok(self.validate_name(NameField::First, text))
    }

    fn validate_last_name(
        &self,
        text: &str,
        _state: &mut CrossTurnState,
        _today: NaiveDate,
    ) -> Result<ValidationOutcome> {
        Ok(self.validate_name(NameField::Last, text))
    }

    fn validate_number_of_guests(
        &self,
        text: &str,
        _state: &mut CrossTurnState,
        _today: NaiveDate,
    ) -> Result<ValidationOutcome> {
        let slot = SlotName::NumberOfGuests;
        Ok(match self.extractor.extract_guest_count(text) {
            Some(digit) => ValidationOutcome::accepted(slot, digit.to_string()),
            None => ValidationOutcome::rejected(slot, Rejection::GuestCountNotUnderstood),
        })
    }

    fn validate_arrival_date(
        &self,
        text: &str,
        state: &mut CrossTurnState,
        today: NaiveDate,
    ) -> Result<ValidationOutcome> {
        let slot = SlotName::ArrivalDate;
        let Some(date) = self.extractor.extract_date_at(text, today) else {
            return Ok(ValidationOutcome::rejected(slot, Rejection::DateNotUnderstood));
        };
        if date < today {
            return Ok(ValidationOutcome::rejected(slot, Rejection::ArrivalInPast));
        }

        state.arrival_date = Some(date);
        Ok(ValidationOutcome::accepted(slot, format_display(date)))
    }

    fn validate_departure_date(
        &self,
        text: &str,
        state: &mut CrossTurnState,
        today: NaiveDate,
    ) -> Result<ValidationOutcome> {
        let slot = SlotName::DepartureDate;
        let Some(date) = self.extractor.extract_date_at(text, today) else {
            return Ok(ValidationOutcome::rejected(slot, Rejection::DateNotUnderstood));
        };
        if date < today {
            return Ok(ValidationOutcome::rejected(slot, Rejection::DepartureInPast));
        }

        // Arrival must have been accepted earlier in this session
        let Some(arrival) = state.arrival_date else {
            tracing::warn!("Departure date validated before an arrival date was accepted");
            return Err(AgentError::MissingArrivalDate);
        };
        if date <= arrival {
            return Ok(ValidationOutcome::rejected(slot, Rejection::DepartureNotAfterArrival));
        }

        state.arrival_date = None;
        Ok(ValidationOutcome::accepted(slot, format_display(date)))
    }

    fn validate_email(
        &self,
        text: &str,
        _state: &mut CrossTurnState,
        _today: NaiveDate,
    ) -> Result<ValidationOutcome> {
        let slot = SlotName::Email;
        Ok(match self.extractor.extract_email(text) {
            Some(email) => ValidationOutcome::accepted(slot, email),
            None => ValidationOutcome::rejected(slot, Rejection::EmailNotUnderstood),
        })
    }

    fn validate_city(
        &self,
        text: &str,
        _state: &mut CrossTurnState,
        _today: NaiveDate,
    ) -> Result<ValidationOutcome> {
        let slot = SlotName::City;
        Ok(match self.extractor.extract_city(text) {
            Some(city) => ValidationOutcome::accepted(slot, city.name()),
            None => ValidationOutcome::rejected(slot, Rejection::CityNotUnderstood),
        })
    }
}

impl std::fmt::Debug for ReservationFormValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut slots: Vec<_> = self.validators.keys().collect();
        slots.sort();
        f.debug_struct("ReservationFormValidator")
            .field("extractor", &self.extractor)
            .field("names", &self.names)
            .field("slots", &slots)
            .finish()
    }
}

impl Default for ReservationFormValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2025, 1, 1)
    }

    fn validate(slot: SlotName, text: &str, state: &mut CrossTurnState) -> ValidationOutcome {
        ReservationFormValidator::new()
            .validate_at(slot, text, state, today())
            .unwrap()
    }

    #[test]
    fn test_every_slot_has_a_validator() {
        let validator = ReservationFormValidator::new();
        for slot in SlotName::COLLECTION_ORDER {
            assert!(validator.validators.contains_key(&slot), "{slot}");
        }
    }

    #[test]
    fn test_names() {
        let mut state = CrossTurnState::new();
        let ok = validate(SlotName::FirstName, "Ada", &mut state);
        assert_eq!(ok.value.as_deref(), Some("Ada"));

        let short = validate(SlotName::LastName, "L", &mut state);
        assert_eq!(
            short.message().as_deref(),
            Some("Last name shall be at least two letter long.")
        );
        let digits = validate(SlotName::FirstName, "Ad4", &mut state);
        assert_eq!(
            digits.message().as_deref(),
            Some("First name shall not contain numbers.")
        );
    }

    #[test]
    fn test_guests_email_city() {
        let mut state = CrossTurnState::new();
        assert_eq!(
            validate(SlotName::NumberOfGuests, "for a family of four", &mut state)
                .value
                .as_deref(),
            Some("4")
        );
        assert_eq!(
            validate(SlotName::NumberOfGuests, "eleven players", &mut state).rejection,
            Some(Rejection::GuestCountNotUnderstood)
        );
        assert_eq!(
            validate(SlotName::Email, "My email is testmail@gmx.ch, thank you", &mut state)
                .value
                .as_deref(),
            Some("testmail@gmx.ch")
        );
        assert_eq!(
            validate(SlotName::City, "In München please.", &mut state)
                .value
                .as_deref(),
            Some("Munich")
        );
        assert_eq!(
            validate(SlotName::City, "Bielefeld", &mut state).rejection,
            Some(Rejection::CityNotUnderstood)
        );
        assert_eq!(state, CrossTurnState::new());
    }

    #[test]
    fn test_arrival_date_stashed() {
        let mut state = CrossTurnState::new();
        let outcome = validate(SlotName::ArrivalDate, "7th June 2025 please", &mut state);
        assert_eq!(outcome.value.as_deref(), Some("Saturday 07. June 2025"));
        assert_eq!(state.arrival_date, Some(date(2025, 6, 7)));
    }

    #[test]
    fn test_arrival_date_rejections() {
        let mut state = CrossTurnState::new();
        assert_eq!(
            validate(SlotName::ArrivalDate, "I want to order two icecreams", &mut state).rejection,
            Some(Rejection::DateNotUnderstood)
        );
        assert_eq!(
            validate(SlotName::ArrivalDate, "after the 27 february 2023 would be perfect", &mut state)
                .rejection,
            Some(Rejection::ArrivalInPast)
        );
        assert_eq!(state.arrival_date, None);

        // Today itself is not in the past
        assert!(validate(SlotName::ArrivalDate, "today", &mut state).is_accepted());
    }

    #[test]
    fn test_arrival_date_offsets() {
        let mut state = CrossTurnState::new();
        let outcome = validate(SlotName::ArrivalDate, "the day after tomorrow", &mut state);
        assert_eq!(outcome.value.as_deref(), Some("Friday 03. January 2025"));

        let outcome = validate(SlotName::ArrivalDate, "a week from today", &mut state);
        assert_eq!(outcome.value.as_deref(), Some("Wednesday 08. January 2025"));
        assert_eq!(state.arrival_date, Some(date(2025, 1, 8)));

        let outcome = validate(SlotName::ArrivalDate, "the weekend after tomorrow", &mut state);
        assert_eq!(outcome.rejection, Some(Rejection::DateNotUnderstood));
    }

    #[test]
    fn test_arrival_date_with_time_of_day() {
        let mut state = CrossTurnState::new();
        let outcome = validate(SlotName::ArrivalDate, "On 12.12.2025 at 14:00", &mut state);
        assert_eq!(outcome.value.as_deref(), Some("Friday 12. December 2025"));

        let outcome = validate(SlotName::ArrivalDate, "tomorrow at 10 am", &mut state);
        assert_eq!(outcome.value.as_deref(), Some("Thursday 02. January 2025"));
    }

    #[test]
    fn test_departure_date_rules() {
        let validator = ReservationFormValidator::new();
        let mut state = CrossTurnState {
            arrival_date: Some(date(2025, 6, 7)),
        };

        let same_day = validator
            .validate_at(SlotName::DepartureDate, "7th June 2025", &mut state, today())
            .unwrap();
        assert_eq!(same_day.rejection, Some(Rejection::DepartureNotAfterArrival));
        assert!(state.arrival_date.is_some());

        let past = validator
            .validate_at(SlotName::DepartureDate, "14.5.2022", &mut state, today())
            .unwrap();
        assert_eq!(past.rejection, Some(Rejection::DepartureInPast));

        let next_day = validator
            .validate_at(SlotName::DepartureDate, "8th June 2025", &mut state, today())
            .unwrap();
        assert_eq!(next_day.value.as_deref(), Some("Sunday 08. June 2025"));
        assert_eq!(state.arrival_date, None);
    }

    #[test]
    fn test_departure_without_arrival_is_an_error() {
        let validator = ReservationFormValidator::new();
        let mut state = CrossTurnState::new();
        let result =
            validator.validate_at(SlotName::DepartureDate, "8th June 2025", &mut state, today());
        assert!(matches!(result, Err(AgentError::MissingArrivalDate)));

        // A date that cannot be understood is still a normal rejection
        let outcome = validator
            .validate_at(SlotName::DepartureDate, "no idea", &mut state, today())
            .unwrap();
        assert_eq!(outcome.rejection, Some(Rejection::DateNotUnderstood));
    }

    #[test]
    fn test_validate_field_by_name() {
        let validator = ReservationFormValidator::new();
        let mut state = CrossTurnState::new();

        let outcome = validator
            .validate_field_at("city", "bErLiN! let's goooo!!!!!!", &mut state, today())
            .unwrap();
        assert_eq!(outcome.slot, SlotName::City);
        assert_eq!(outcome.value.as_deref(), Some("Berlin"));

        let unknown = validator.validate_field("phone_number", "0123", &mut state);
        assert!(matches!(unknown, Err(AgentError::UnknownSlot(name)) if name == "phone_number"));
    }

    #[test]
    fn test_from_settings() {
        let mut settings = Settings::default();
        settings.validation.min_name_length = 4;
        let validator = ReservationFormValidator::from_settings(&settings).unwrap();
        let mut state = CrossTurnState::new();
        let outcome = validator
            .validate_at(SlotName::FirstName, "Ada", &mut state, today())
            .unwrap();
        assert_eq!(
            outcome.message().as_deref(),
            Some("First name shall be at least four letter long.")
        );

        settings.extraction.number_language = "fr".to_string();
        assert!(matches!(
            ReservationFormValidator::from_settings(&settings),
            Err(AgentError::Config(_))
        ));
    }
}
