//! Rule-based entity recognition
//!
//! Tags the spans the date cascade cares about:
//! - DATE: numeric dates, day-month(-year), month-day(-year), month-year,
//!   offsets such as "the day after tomorrow" or "in 3 days", weekdays with
//!   an optional modifier, relative day words
//! - ORDINAL: `21st`, `first`, ...
//! - CARDINAL: digit runs and number words
//!
//! Overlapping candidates are resolved by label priority (DATE > ORDINAL >
//! CARDINAL), then by span length, then by position.
//!
//! A weekday or relative day word directly after "after", "before" or
//! "from" is only tagged as part of a full offset expression; on its own it
//! would name the wrong day. Numbers inside a time of day (`14:00`, `10 am`)
//! are never tagged.
//!
//! # Example
//!
//! ```ignore
//! use reservation_text_processing::PatternEntityRecognizer;
//!
//! let recognizer = PatternEntityRecognizer::new();
//! let entities = recognizer.recognize("after the 27 february 2023 would be perfect");
//!
//! assert_eq!(entities[0].text, "the 27 february 2023");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use reservation_core::{Entity, EntityLabel, EntityRecognizer};

const MONTHS: &str = "january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec";

const WEEKDAYS: &str = "monday|tuesday|wednesday|thursday|friday|saturday|sunday";

const UNITS: &str = r"days?|weeks?|months?";

static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // 12.12.2025, 14/5, 2025-12-12
        Regex::new(r"\b\d{1,4}[./-]\d{1,2}(?:[./-]\d{1,4})?\b").unwrap(),
        // the 21st of october 2026, 7th June 2025, 27 february
        Regex::new(&format!(
            r"(?i)\b(?:the\s+)?\d{{1,2}}(?:st|nd|rd|th)?\s+(?:of\s+)?(?:{MONTHS})\b\.?(?:,?\s+\d{{4}}\b)?"
        ))
        .unwrap(),
        // june 7th, 2025 / october the 21st
        Regex::new(&format!(
            r"(?i)\b(?:{MONTHS})\.?\s+(?:the\s+)?\d{{1,2}}(?:st|nd|rd|th)?\b(?:,?\s+\d{{4}}\b)?"
        ))
        .unwrap(),
        // june 2025
        Regex::new(&format!(r"(?i)\b(?:{MONTHS})\s+\d{{4}}\b")).unwrap(),
        // the day after tomorrow, a week from today, 3 days before next friday
        Regex::new(&format!(
            r"(?i)\b(?:(?:a|an|\d{{1,3}})\s+|the\s+)?(?:{UNITS})\s+(?:after|before|from)\s+(?:today|tomorrow|yesterday|now|(?:(?:next|this|coming)\s+)?(?:{WEEKDAYS}))\b"
        ))
        .unwrap(),
        // in 3 days, in a week
        Regex::new(&format!(r"(?i)\bin\s+(?:a|an|\d{{1,3}})\s+(?:{UNITS})\b")).unwrap(),
        // next week
        Regex::new(r"(?i)\bnext\s+(?:week|month)\b").unwrap(),
    ]
});

/// Day words that only make sense on their own
static ANCHOR_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // next monday
        Regex::new(&format!(r"(?i)\b(?:(?:next|this|coming)\s+)?(?:{WEEKDAYS})\b")).unwrap(),
        Regex::new(r"(?i)\b(?:today|tomorrow|yesterday)\b").unwrap(),
    ]
});

/// Text ending in a relation word, checked in front of an anchor
static RELATION_BEFORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:after|before|from)\s+$").unwrap());

static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:[01]?\d|2[0-3]):[0-5]\d(?::[0-5]\d)?(?:\s*(?:[ap]m\b|[ap]\.m\.))?|\b(?:1[0-2]|0?[1-9])\s*(?:[ap]m\b|[ap]\.m\.)|\b(?:1[0-2]|0?[1-9])\s+o['’]?clock\b",
    )
    .unwrap()
});

static ORDINAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)\b\d+(?:st|nd|rd|th)\b").unwrap(),
        Regex::new(
            r"(?i)\b(?:first|second|third|fourth|fifth|sixth|seventh|eighth|ninth|tenth|eleventh|twelfth|thirteenth|fourteenth|fifteenth|sixteenth|seventeenth|eighteenth|nineteenth|twentieth|thirtieth|fortieth|fiftieth|sixtieth|seventieth|eightieth|ninetieth|hundredth|thousandth)\b",
        )
        .unwrap(),
    ]
});

static CARDINAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"\b\d+\b").unwrap(),
        Regex::new(
            r"(?i)\b(?:zero|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|thirteen|fourteen|fifteen|sixteen|seventeen|eighteen|nineteen|twenty|thirty|forty|fifty|sixty|seventy|eighty|ninety|hundred|thousand|million|billion)\b",
        )
        .unwrap(),
    ]
});

/// Regex driven entity recognizer
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternEntityRecognizer;

impl PatternEntityRecognizer {
    pub fn new() -> Self {
        Self
    }

    fn candidates(text: &str) -> Vec<Entity> {
        let rules: [(&Lazy<Vec<Regex>>, EntityLabel); 3] = [
            (&DATE_PATTERNS, EntityLabel::Date),
            (&ORDINAL_PATTERNS, EntityLabel::Ordinal),
            (&CARDINAL_PATTERNS, EntityLabel::Cardinal),
        ];

        let times: Vec<(usize, usize)> =
            TIME_PATTERN.find_iter(text).map(|m| (m.start(), m.end())).collect();
        let in_time = |start: usize, end: usize| times.iter().any(|&(s, e)| start < e && s < end);

        let mut candidates = Vec::new();
        for (patterns, label) in rules {
            for pattern in patterns.iter() {
                for m in pattern.find_iter(text) {
                    if label != EntityLabel::Date && in_time(m.start(), m.end()) {
                        continue;
                    }
                    candidates.push(Entity::new(m.as_str(), label, m.start(), m.end()));
                }
            }
        }

        for pattern in ANCHOR_PATTERNS.iter() {
            for m in pattern.find_iter(text) {
                if RELATION_BEFORE.is_match(&text[..m.start()]) {
                    tracing::trace!(anchor = m.as_str(), "Skipping day word after a relation");
                    continue;
                }
                candidates.push(Entity::new(m.as_str(), EntityLabel::Date, m.start(), m.end()));
            }
        }
        candidates
    }
}

impl EntityRecognizer for PatternEntityRecognizer {
    fn recognize(&self, text: &str) -> Vec<Entity> {
        let mut candidates = Self::candidates(text);
        candidates.sort_by(|a, b| {
            b.label
                .priority()
                .cmp(&a.label.priority())
                .then_with(|| (b.end - b.start).cmp(&(a.end - a.start)))
                .then_with(|| a.start.cmp(&b.start))
        });

        let mut accepted: Vec<Entity> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if !accepted.iter().any(|entity| entity.overlaps(&candidate)) {
                accepted.push(candidate);
            }
        }
        accepted.sort_by_key(|entity| entity.start);

        tracing::trace!(count = accepted.len(), "Recognized entities");
        accepted
    }
}
