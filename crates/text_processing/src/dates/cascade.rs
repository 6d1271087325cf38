//! Three-stage date extraction
//!
//! Stages are tried in order and the first date wins:
//! 1. `direct` - parse the raw text
//! 2. `normalized` - parse after spelled-out numbers became digits
//! 3. `entity_filtered` - parse only the DATE / ORDINAL / CARDINAL spans of
//!    the normalized text, concatenated in document order

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use once_cell::unsync::OnceCell;
use reservation_config::DateParserSettings;
use reservation_core::{DateParser, EntityLabel, EntityRecognizer, NumberNormalizer};
use serde::{Deserialize, Serialize};

use super::NaturalDateParser;
use crate::entities::PatternEntityRecognizer;
use crate::numbers::EnglishNumberNormalizer;

/// Labels kept by the entity filter stage
const FILTER_LABELS: [EntityLabel; 3] =
    [EntityLabel::Date, EntityLabel::Ordinal, EntityLabel::Cardinal];

/// Named cascade stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateStage {
    Direct,
    Normalized,
    EntityFiltered,
}

impl DateStage {
    /// Stages in the order they are tried
    pub const ALL: [DateStage; 3] = [
        DateStage::Direct,
        DateStage::Normalized,
        DateStage::EntityFiltered,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Normalized => "normalized",
            Self::EntityFiltered => "entity_filtered",
        }
    }
}

impl fmt::Display for DateStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Date extraction cascade over pluggable components
#[derive(Clone)]
pub struct DateCascade {
    parser: Arc<dyn DateParser>,
    normalizer: Arc<dyn NumberNormalizer>,
    recognizer: Arc<dyn EntityRecognizer>,
}

impl DateCascade {
    pub fn new(
        parser: Arc<dyn DateParser>,
        normalizer: Arc<dyn NumberNormalizer>,
        recognizer: Arc<dyn EntityRecognizer>,
    ) -> Self {
        Self {
            parser,
            normalizer,
            recognizer,
        }
    }

    /// Cascade with the built-in parser, normalizer and recognizer
    pub fn from_settings(settings: &DateParserSettings) -> Self {
        Self::new(
            Arc::new(NaturalDateParser::new(settings.clone())),
            Arc::new(EnglishNumberNormalizer::new()),
            Arc::new(PatternEntityRecognizer::new()),
        )
    }

    pub fn normalizer(&self) -> &Arc<dyn NumberNormalizer> {
        &self.normalizer
    }

    /// Extract the single date mentioned in `text`
    pub fn extract(&self, text: &str, today: NaiveDate) -> Option<NaiveDate> {
        self.extract_with_stage(text, today).map(|(date, _)| date)
    }

    /// Extract the date together with the stage that produced it
    pub fn extract_with_stage(&self, text: &str, today: NaiveDate) -> Option<(NaiveDate, DateStage)> {
        let normalized = OnceCell::new();

        let found = DateStage::ALL.iter().find_map(|stage| {
            self.run_stage(*stage, text, &normalized, today)
                .map(|date| (date, *stage))
        });

        match found {
            Some((date, stage)) => {
                tracing::debug!(stage = %stage, %date, "Date parsed");
            },
            None => {
                tracing::debug!("No date in any cascade stage");
            },
        }
        found
    }

    fn normalized<'a>(&self, text: &str, cell: &'a OnceCell<String>) -> &'a str {
        cell.get_or_init(|| self.normalizer.normalize(text))
    }

    fn run_stage(
        &self,
        stage: DateStage,
        text: &str,
        normalized: &OnceCell<String>,
        today: NaiveDate,
    ) -> Option<NaiveDate> {
        match stage {
            DateStage::Direct => self.parser.parse(text, today),
            DateStage::Normalized => {
                let normalized = self.normalized(text, normalized);
                // Same input, same result
                if normalized == text {
                    return None;
                }
                self.parser.parse(normalized, today)
            },
            DateStage::EntityFiltered => {
                let filtered = self.entity_text(self.normalized(text, normalized));
                if filtered.is_empty() {
                    return None;
                }
                tracing::trace!(filtered = %filtered, "Entity filtered date text");
                self.parser.parse(&filtered, today)
            },
        }
    }

    /// Concatenated text of the date-relevant entities
    pub fn entity_text(&self, text: &str) -> String {
        self.recognizer
            .recognize_labels(text, &FILTER_LABELS)
            .into_iter()
            .map(|entity| entity.text)
            .collect()
    }
}

impl Default for DateCascade {
    fn default() -> Self {
        Self::from_settings(&DateParserSettings::default())
    }
}

impl fmt::Debug for DateCascade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateCascade")
            .field("language", &self.normalizer.language())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stage_of(text: &str, today: NaiveDate) -> Option<DateStage> {
        DateCascade::default()
            .extract_with_stage(text, today)
            .map(|(_, stage)| stage)
    }

    #[test]
    fn test_stage_selection() {
        let today = date(2025, 1, 1);
        assert_eq!(stage_of("On the 12.12.2025.", today), Some(DateStage::Direct));
        assert_eq!(
            stage_of("the twenty-first of october 2026", today),
            Some(DateStage::Normalized)
        );
        assert_eq!(
            stage_of("7th June 2025 please", today),
            Some(DateStage::EntityFiltered)
        );
        assert_eq!(stage_of("I want to order two icecreams", today), None);
    }

    #[test]
    fn test_entity_text_concatenates_spans() {
        let cascade = DateCascade::default();
        assert_eq!(
            cascade.entity_text("Maybe before the 14.5.2022 or after the 27th of February 2023"),
            "14.5.2022the 27th of February 2023"
        );
        assert_eq!(cascade.entity_text("no numbers here"), "");
    }

    #[test]
    fn test_ambiguous_dates_rejected() {
        let cascade = DateCascade::default();
        let today = date(2025, 1, 1);
        assert_eq!(
            cascade.extract(
                "Maybe before the 14.5.2022 or after the 27th of February 2023, I don't know.",
                today
            ),
            None
        );
    }

    #[test]
    fn test_offset_phrases_resolve_whole() {
        let cascade = DateCascade::default();
        let today = date(2025, 1, 1);
        assert_eq!(
            cascade.extract_with_stage("the day after tomorrow", today),
            Some((date(2025, 1, 3), DateStage::Direct))
        );
        assert_eq!(
            cascade.extract_with_stage("I arrive the day after tomorrow, thanks", today),
            Some((date(2025, 1, 3), DateStage::EntityFiltered))
        );
        assert_eq!(cascade.extract("a week from today", today), Some(date(2025, 1, 8)));
        assert_eq!(
            cascade.extract("we could come a week from today", today),
            Some(date(2025, 1, 8))
        );
        assert_eq!(
            cascade.extract_with_stage("in two weeks", today),
            Some((date(2025, 1, 15), DateStage::Normalized))
        );
        assert_eq!(cascade.extract("in 3 days please", today), Some(date(2025, 1, 4)));
        assert_eq!(cascade.extract("sometime next week", today), Some(date(2025, 1, 8)));
    }

    #[test]
    fn test_unresolved_offset_is_no_match() {
        let cascade = DateCascade::default();
        let today = date(2025, 1, 1);
        assert_eq!(cascade.extract("the weekend after tomorrow", today), None);
        assert_eq!(cascade.extract("some time before friday", today), None);
    }

    #[test]
    fn test_time_of_day_ignored() {
        let cascade = DateCascade::default();
        let today = date(2025, 1, 1);
        assert_eq!(
            cascade.extract_with_stage("On 12.12.2025 at 14:00", today),
            Some((date(2025, 12, 12), DateStage::Direct))
        );
        assert_eq!(
            cascade.extract_with_stage("tomorrow at 10 am", today),
            Some((date(2025, 1, 2), DateStage::Direct))
        );
        assert_eq!(
            cascade.extract("please book 12.12.2025 at 14:00", today),
            Some(date(2025, 12, 12))
        );
        assert_eq!(
            cascade.extract("tomorrow at 10 am would be great", today),
            Some(date(2025, 1, 2))
        );
    }

    #[test]
    fn test_stage_names() {
        let names: Vec<&str> = DateStage::ALL.iter().map(DateStage::name).collect();
        assert_eq!(names, vec!["direct", "normalized", "entity_filtered"]);
    }
}
