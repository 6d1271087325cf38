//! Name plausibility rules

use once_cell::sync::Lazy;
use regex::Regex;
use reservation_config::ValidationSettings;

use super::{NameField, Rejection};

// Unicode decimal digits (Nd), not every numeric character
static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").unwrap());

/// Checks applied to first and last names, in order
///
/// 1. at least `min_length` characters
/// 2. no digit
/// 3. none of the special characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRules {
    min_length: usize,
    special_characters: String,
}

impl NameRules {
    pub fn new(settings: &ValidationSettings) -> Self {
        Self {
            min_length: settings.min_name_length,
            special_characters: settings.special_characters.clone(),
        }
    }

    /// First violated rule, `None` if the name is plausible
    pub fn check(&self, field: NameField, name: &str) -> Option<Rejection> {
        if name.chars().count() < self.min_length {
            return Some(Rejection::NameTooShort {
                field,
                min_length: self.min_length,
            });
        }
        if DIGIT.is_match(name) {
            return Some(Rejection::NameContainsNumbers { field });
        }
        if name.chars().any(|c| self.special_characters.contains(c)) {
            return Some(Rejection::NameContainsSymbols {
                field,
                symbols: self.special_characters.clone(),
            });
        }
        None
    }
}

impl Default for NameRules {
    fn default() -> Self {
        Self::new(&ValidationSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plausible_names() {
        let rules = NameRules::default();
        for name in ["Jo", "Anna Lena", "Müller", "O'Neil", "Zoë"] {
            assert_eq!(rules.check(NameField::First, name), None, "{name}");
        }
    }

    #[test]
    fn test_rule_order() {
        let rules = NameRules::default();
        assert!(matches!(
            rules.check(NameField::First, "J"),
            Some(Rejection::NameTooShort { min_length: 2, .. })
        ));
        // Too short wins over digit
        assert!(matches!(
            rules.check(NameField::First, "7"),
            Some(Rejection::NameTooShort { .. })
        ));
        // Digit wins over symbol
        assert!(matches!(
            rules.check(NameField::Last, "R2-D2"),
            Some(Rejection::NameContainsNumbers { field: NameField::Last })
        ));
        assert!(matches!(
            rules.check(NameField::Last, "Smith-Jones"),
            Some(Rejection::NameContainsSymbols { .. })
        ));
        assert!(matches!(
            rules.check(NameField::Last, "a@b"),
            Some(Rejection::NameContainsSymbols { .. })
        ));
    }

    #[test]
    fn test_length_counts_characters() {
        let rules = NameRules::default();
        // One character, two bytes
        assert!(rules.check(NameField::First, "É").is_some());
        assert_eq!(rules.check(NameField::First, "Éa"), None);
    }

    #[test]
    fn test_unicode_digits_rejected() {
        let rules = NameRules::default();
        assert!(matches!(
            rules.check(NameField::First, "Ann٣"),
            Some(Rejection::NameContainsNumbers { .. })
        ));
    }

    #[test]
    fn test_numeral_letters_allowed() {
        let rules = NameRules::default();
        // Roman numerals are letters, not decimal digits
        assert_eq!(rules.check(NameField::Last, "Louis Ⅻ"), None);
        assert!(matches!(
            rules.check(NameField::Last, "Louis 12"),
            Some(Rejection::NameContainsNumbers { .. })
        ));
    }

    #[test]
    fn test_custom_settings() {
        let rules = NameRules::new(&ValidationSettings {
            min_name_length: 3,
            special_characters: "#".to_string(),
        });
        assert!(rules.check(NameField::First, "Jo").is_some());
        assert_eq!(rules.check(NameField::First, "Jo-Ann"), None);
        assert!(rules.check(NameField::First, "Jo#Ann").is_some());
    }
}
