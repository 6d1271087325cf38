//! Text processing traits

use chrono::NaiveDate;

use crate::{Entity, EntityLabel};

/// Converts spelled-out numbers to digits
///
/// Implementations:
/// - `EnglishNumberNormalizer` - English cardinals and ordinals
///
/// # Example
///
/// ```ignore
/// let normalizer = EnglishNumberNormalizer::new();
/// assert_eq!(normalizer.normalize("for four people"), "for 4 people");
/// ```
pub trait NumberNormalizer: Send + Sync {
    /// Rewrite number words as digits, leaving all other text untouched
    fn normalize(&self, text: &str) -> String;

    /// ISO 639-1 code of the handled language
    fn language(&self) -> &str;
}

/// Named entity recognition interface
///
/// Implementations:
/// - `PatternEntityRecognizer` - Rule based, regex driven
pub trait EntityRecognizer: Send + Sync {
    /// Entities found in `text`, in document order, non-overlapping
    fn recognize(&self, text: &str) -> Vec<Entity>;

    /// Entities restricted to the given labels, in document order
    fn recognize_labels(&self, text: &str, labels: &[EntityLabel]) -> Vec<Entity> {
        self.recognize(text)
            .into_iter()
            .filter(|entity| labels.contains(&entity.label))
            .collect()
    }
}

/// Natural-language date parsing interface
///
/// Parsing must fail (return `None`) when the text does not contain exactly
/// one date expression; it never picks one candidate out of several.
pub trait DateParser: Send + Sync {
    /// Parse `text` relative to `today`
    fn parse(&self, text: &str, today: NaiveDate) -> Option<NaiveDate>;
}
