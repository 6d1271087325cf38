//! Slot Value Extraction for Reservation Chat
//!
//! One extractor per slot kind:
//! - `extract_email` - HTML5 email grammar
//! - `extract_guest_count` - single digit after number normalization
//! - `extract_city` - multilingual alias matching
//! - `extract_date` - three-stage date cascade
//!
//! Every extractor returns `None` for both zero and several candidates.
//!
//! ## Optimization: Static Regex Patterns
//!
//! The email pattern is compiled once at program start using `once_cell::sync::Lazy`.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use reservation_config::constants::numbers::SUPPORTED_LANGUAGES;
use reservation_config::ExtractionSettings;
use reservation_core::{City, NumberNormalizer};

use crate::cities::{CityAliasSet, CITY_ALIASES};
use crate::dates::DateCascade;
use crate::{Result, TextProcessingError};

// HTML5 email grammar without the ^/$ anchors, so embedded addresses match
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*",
    )
    .unwrap()
});

// Any Unicode decimal digit
static DIGIT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").unwrap());

/// Slot value extractor
///
/// Cheap to clone; the date cascade components are shared.
#[derive(Debug, Clone)]
pub struct SlotExtractor {
    dates: DateCascade,
    cities: CityAliasSet,
}

impl SlotExtractor {
    /// Create an extractor with the built-in defaults
    pub fn new() -> Self {
        Self::with_components(DateCascade::default(), CITY_ALIASES.clone())
    }

    /// Create an extractor from extraction settings
    ///
    /// Fails when no number normalizer exists for the configured language.
    pub fn from_settings(settings: &ExtractionSettings) -> Result<Self> {
        let language = settings.number_language.as_str();
        if !SUPPORTED_LANGUAGES.contains(&language) {
            return Err(TextProcessingError::UnsupportedLanguage(language.to_string()));
        }
        if settings.date.required_parts.is_empty() {
            return Err(TextProcessingError::InvalidSettings(
                "date.required_parts must not be empty".to_string(),
            ));
        }

        tracing::debug!(
            language,
            date_order = ?settings.date.date_order,
            prefer = ?settings.date.prefer_dates_from,
            "Creating slot extractor"
        );
        Ok(Self::with_components(
            DateCascade::from_settings(&settings.date),
            CITY_ALIASES.clone(),
        ))
    }

    /// Create an extractor from explicit components
    ///
    /// The guest count extractor shares the cascade's number normalizer.
    pub fn with_components(dates: DateCascade, cities: CityAliasSet) -> Self {
        Self { dates, cities }
    }

    /// Extract the single email address in the utterance
    pub fn extract_email(&self, utterance: &str) -> Option<String> {
        let mut matches = EMAIL_PATTERN.find_iter(utterance);
        let first = matches.next();
        let extra = matches.count();

        match first {
            Some(m) if extra == 0 => Some(m.as_str().to_string()),
            Some(_) => {
                tracing::debug!(count = extra + 1, "Ambiguous email, several addresses");
                None
            },
            None => {
                tracing::debug!("No email address found");
                None
            },
        }
    }

    /// Extract a party size of one digit
    ///
    /// Spelled-out numbers are converted first; then every non-digit is
    /// dropped and exactly one digit must remain. Two-digit counts and
    /// several numbers are both rejected.
    pub fn extract_guest_count(&self, utterance: &str) -> Option<char> {
        let normalized = self.dates.normalizer().normalize(utterance);
        let digits: Vec<char> = DIGIT_PATTERN
            .find_iter(&normalized)
            .flat_map(|m| m.as_str().chars())
            .collect();

        match digits.as_slice() {
            [digit] => Some(*digit),
            [] => {
                tracing::debug!("No guest count found");
                None
            },
            several => {
                tracing::debug!(digits = several.len(), "Guest count is not a single digit");
                None
            },
        }
    }

    /// Extract the single known city mentioned in the utterance
    pub fn extract_city(&self, utterance: &str) -> Option<City> {
        self.cities.find_unique(utterance)
    }

    /// Extract the single date in the utterance, relative to `today`
    pub fn extract_date_at(&self, utterance: &str, today: NaiveDate) -> Option<NaiveDate> {
        self.dates.extract(utterance, today)
    }

    /// Extract the single date in the utterance, relative to the local date
    pub fn extract_date(&self, utterance: &str) -> Option<NaiveDate> {
        self.extract_date_at(utterance, chrono::Local::now().date_naive())
    }

    pub fn dates(&self) -> &DateCascade {
        &self.dates
    }

    pub fn cities(&self) -> &CityAliasSet {
        &self.cities
    }
}

impl Default for SlotExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reservation_config::DateParserSettings;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_email_extraction() {
        let extractor = SlotExtractor::new();

        assert_eq!(extractor.extract_email("I don't remember my email."), None);
        assert_eq!(
            extractor.extract_email("My email is testmail@gmx.ch, thank you"),
            Some("testmail@gmx.ch".to_string())
        );
        assert_eq!(
            extractor.extract_email("nice.user@hotmail.de"),
            Some("nice.user@hotmail.de".to_string())
        );
        assert_eq!(
            extractor.extract_email(" space.loving.user@nasa.us   "),
            Some("space.loving.user@nasa.us".to_string())
        );
        assert_eq!(
            extractor.extract_email(
                "I have two emails: maybe.this@gmail.com and maybe.this.other.one@gmx.de."
            ),
            None
        );
    }

    #[test]
    fn test_email_grammar_edges() {
        let extractor = SlotExtractor::new();

        // "!" is a valid local-part character, so the preceding word is kept
        assert_eq!(
            extractor.extract_email("Of course!messy-writer@g-mail.us. That's my email."),
            Some("course!messy-writer@g-mail.us".to_string())
        );
        // Single-label domains are valid
        assert_eq!(
            extractor.extract_email("Sorry I don't know wh@t my email adress is"),
            Some("wh@t".to_string())
        );
        assert_eq!(extractor.extract_email("user@-bad.com"), None);
    }

    #[test]
    fn test_guest_count_extraction() {
        let extractor = SlotExtractor::new();

        assert_eq!(extractor.extract_guest_count("There will be four guests"), Some('4'));
        assert_eq!(extractor.extract_guest_count("1 guest"), Some('1'));
        assert_eq!(extractor.extract_guest_count("Make a reservation for 21 people"), None);
        assert_eq!(
            extractor.extract_guest_count("I have to ask my wife about the number of guests."),
            None
        );
        assert_eq!(extractor.extract_guest_count("five dudes"), Some('5'));
        assert_eq!(extractor.extract_guest_count("for a family of four"), Some('4'));
        assert_eq!(extractor.extract_guest_count("just the 2 of us"), Some('2'));
        assert_eq!(extractor.extract_guest_count("eleven players"), None);
        assert_eq!(extractor.extract_guest_count("between 5 and 6, I don't know"), None);
        assert_eq!(extractor.extract_guest_count("0"), Some('0'));
        assert_eq!(extractor.extract_guest_count("٣ guests"), Some('٣'));
        assert_eq!(extractor.extract_guest_count("٣ or 4 guests"), None);
    }

    #[test]
    fn test_city_extraction() {
        let extractor = SlotExtractor::new();

        assert_eq!(extractor.extract_city("In München please."), Some(City::Munich));
        assert_eq!(extractor.extract_city("bErLiN! let's goooo!!!!!!"), Some(City::Berlin));
        assert_eq!(
            extractor.extract_city("I will visit my grandson in Stuttgart."),
            Some(City::Stuttgart)
        );
        assert_eq!(
            extractor.extract_city("No idea. Are the best car museums in Munich or in Stuttgart?"),
            None
        );
        assert_eq!(
            extractor.extract_city("I don't know, can you suggest a nice city to visit?"),
            None
        );
        assert_eq!(extractor.extract_city("I want to book a room in Frankfurt."), None);
        assert_eq!(extractor.extract_city("Bielefeld"), None);
    }

    #[test]
    fn test_date_extraction() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
        let extractor = SlotExtractor::new();
        let today = date(2025, 1, 1);

        assert_eq!(
            extractor.extract_date_at("On the 12.12.2025.", today),
            Some(date(2025, 12, 12))
        );
        assert_eq!(
            extractor.extract_date_at("7th June 2025 please", today),
            Some(date(2025, 6, 7))
        );
        assert_eq!(
            extractor.extract_date_at(
                "I want to check out on the twenty-first of october 2026, thank you",
                today
            ),
            Some(date(2026, 10, 21))
        );
        assert_eq!(extractor.extract_date_at("Book it for today please.", today), Some(today));
        assert_eq!(extractor.extract_date_at("I want to order two icecreams", today), None);
        assert_eq!(
            extractor.extract_date_at("after the 27 february 2023 would be perfect", today),
            Some(date(2023, 2, 27))
        );
        assert_eq!(
            extractor.extract_date_at(
                "Maybe before the 14.5.2022 or after the 27th of February 2023, I don't know.",
                today
            ),
            None
        );
    }

    #[test]
    fn test_date_against_wall_clock() {
        let extractor = SlotExtractor::new();
        let today = chrono::Local::now().date_naive();
        let found = extractor.extract_date("Book it for today please.");
        // Tolerate a midnight rollover between the two clock reads
        assert!(found == Some(today) || found == today.succ_opt());
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let extractor = SlotExtractor::new();
        let today = date(2025, 3, 15);
        let inputs = [
            "for a family of four",
            "the twenty-first of october 2026",
            "bErLiN!",
            "x@y.z and nothing else",
        ];
        for input in inputs {
            assert_eq!(extractor.extract_guest_count(input), extractor.extract_guest_count(input));
            assert_eq!(extractor.extract_date_at(input, today), extractor.extract_date_at(input, today));
            assert_eq!(extractor.extract_city(input), extractor.extract_city(input));
            assert_eq!(extractor.extract_email(input), extractor.extract_email(input));
        }
    }

    #[test]
    fn test_from_settings() {
        let settings = ExtractionSettings::default();
        assert!(SlotExtractor::from_settings(&settings).is_ok());

        let german = ExtractionSettings {
            number_language: "de".to_string(),
            ..ExtractionSettings::default()
        };
        assert!(matches!(
            SlotExtractor::from_settings(&german),
            Err(TextProcessingError::UnsupportedLanguage(lang)) if lang == "de"
        ));

        let empty = ExtractionSettings {
            date: DateParserSettings {
                required_parts: Vec::new(),
                ..DateParserSettings::default()
            },
            ..ExtractionSettings::default()
        };
        assert!(matches!(
            SlotExtractor::from_settings(&empty),
            Err(TextProcessingError::InvalidSettings(_))
        ));
    }
}
