//! Lexical normalization of spelled-out numbers
//!
//! Rewrites English cardinals and ordinals as digits so that downstream
//! extractors only have to deal with one notation:
//!
//! - "There will be four guests" → "There will be 4 guests"
//! - "the twenty-first of october" → "the 21st of october"
//! - "one hundred and five" → "105"
//!
//! Adjacent numbers that cannot form one value stay separate
//! ("five six" → "5 6"). A lone small ordinal ("first", "second", "third")
//! is left as a word since it is mostly used outside of numbers.

use reservation_config::constants::numbers::ORDINAL_THRESHOLD;
use reservation_core::NumberNormalizer;
use unicode_segmentation::UnicodeSegmentation;

/// Grammatical class of a number word, drives which words may follow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Unit,
    Teen,
    Tens,
    Hundred,
    Scale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberWord {
    Cardinal { value: u64, class: Class },
    Ordinal { value: u64, class: Class },
    And,
}

const UNITS: &[(&str, u64)] = &[
    ("zero", 0),
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
];

const TEENS: &[(&str, u64)] = &[
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("thirteen", 13),
    ("fourteen", 14),
    ("fifteen", 15),
    ("sixteen", 16),
    ("seventeen", 17),
    ("eighteen", 18),
    ("nineteen", 19),
];

const TENS: &[(&str, u64)] = &[
    ("twenty", 20),
    ("thirty", 30),
    ("forty", 40),
    ("fifty", 50),
    ("sixty", 60),
    ("seventy", 70),
    ("eighty", 80),
    ("ninety", 90),
];

const SCALES: &[(&str, u64)] = &[
    ("thousand", 1_000),
    ("million", 1_000_000),
    ("billion", 1_000_000_000),
];

const ORDINAL_UNITS: &[(&str, u64)] = &[
    ("first", 1),
    ("second", 2),
    ("third", 3),
    ("fourth", 4),
    ("fifth", 5),
    ("sixth", 6),
    ("seventh", 7),
    ("eighth", 8),
    ("ninth", 9),
];

const ORDINAL_TEENS: &[(&str, u64)] = &[
    ("tenth", 10),
    ("eleventh", 11),
    ("twelfth", 12),
    ("thirteenth", 13),
    ("fourteenth", 14),
    ("fifteenth", 15),
    ("sixteenth", 16),
    ("seventeenth", 17),
    ("eighteenth", 18),
    ("nineteenth", 19),
];

const ORDINAL_TENS: &[(&str, u64)] = &[
    ("twentieth", 20),
    ("thirtieth", 30),
    ("fortieth", 40),
    ("fiftieth", 50),
    ("sixtieth", 60),
    ("seventieth", 70),
    ("eightieth", 80),
    ("ninetieth", 90),
];

const ORDINAL_SCALES: &[(&str, u64)] = &[
    ("thousandth", 1_000),
    ("millionth", 1_000_000),
    ("billionth", 1_000_000_000),
];

fn find(table: &[(&str, u64)], word: &str) -> Option<u64> {
    table.iter().find(|(name, _)| *name == word).map(|(_, v)| *v)
}

/// Look up a lowercase word
fn lookup(word: &str) -> Option<NumberWord> {
    let cardinal = |value, class| NumberWord::Cardinal { value, class };
    let ordinal = |value, class| NumberWord::Ordinal { value, class };

    if word == "and" {
        return Some(NumberWord::And);
    }
    if word == "hundred" {
        return Some(cardinal(100, Class::Hundred));
    }
    if word == "hundredth" {
        return Some(ordinal(100, Class::Hundred));
    }

    find(UNITS, word)
        .map(|v| cardinal(v, Class::Unit))
        .or_else(|| find(TEENS, word).map(|v| cardinal(v, Class::Teen)))
        .or_else(|| find(TENS, word).map(|v| cardinal(v, Class::Tens)))
        .or_else(|| find(SCALES, word).map(|v| cardinal(v, Class::Scale)))
        .or_else(|| find(ORDINAL_UNITS, word).map(|v| ordinal(v, Class::Unit)))
        .or_else(|| find(ORDINAL_TEENS, word).map(|v| ordinal(v, Class::Teen)))
        .or_else(|| find(ORDINAL_TENS, word).map(|v| ordinal(v, Class::Tens)))
        .or_else(|| find(ORDINAL_SCALES, word).map(|v| ordinal(v, Class::Scale)))
}

/// English ordinal suffix for a value
pub fn ordinal_suffix(value: u64) -> &'static str {
    match (value % 10, value % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Running value of one number phrase
#[derive(Debug, Default)]
struct Accumulator {
    total: u64,
    current: u64,
    last: Option<Class>,
    words: usize,
    ordinal: bool,
}

impl Accumulator {
    fn accepts(&self, word: NumberWord) -> bool {
        // An ordinal always closes the phrase
        if self.ordinal {
            return false;
        }
        let (value, class) = match word {
            NumberWord::Cardinal { value, class } | NumberWord::Ordinal { value, class } => {
                (value, class)
            },
            NumberWord::And => return false,
        };

        match class {
            Class::Unit => match self.last {
                None | Some(Class::Hundred) | Some(Class::Scale) => true,
                Some(Class::Tens) => value > 0,
                _ => false,
            },
            Class::Teen | Class::Tens => {
                matches!(self.last, None | Some(Class::Hundred) | Some(Class::Scale))
            },
            Class::Hundred => {
                matches!(self.last, Some(Class::Unit | Class::Teen | Class::Tens))
                    && self.current > 0
                    && self.current < 100
            },
            Class::Scale => {
                matches!(
                    self.last,
                    Some(Class::Unit | Class::Teen | Class::Tens | Class::Hundred)
                ) && self.current > 0
            },
        }
    }

    fn push(&mut self, word: NumberWord) {
        let (value, class, is_ordinal) = match word {
            NumberWord::Cardinal { value, class } => (value, class, false),
            NumberWord::Ordinal { value, class } => (value, class, true),
            NumberWord::And => return,
        };

        match class {
            Class::Unit | Class::Teen | Class::Tens => self.current += value,
            Class::Hundred => self.current = self.current.saturating_mul(value),
            Class::Scale => {
                self.total = self
                    .total
                    .saturating_add(self.current.saturating_mul(value));
                self.current = 0;
            },
        }
        self.last = Some(class);
        self.words += 1;
        self.ordinal = is_ordinal;
    }

    fn value(&self) -> u64 {
        self.total.saturating_add(self.current)
    }

    fn render(&self) -> String {
        let value = self.value();
        if self.ordinal {
            format!("{}{}", value, ordinal_suffix(value))
        } else {
            value.to_string()
        }
    }
}

/// Word segment with its byte span in the input text
struct Word<'a> {
    lower: String,
    text: &'a str,
    start: usize,
    end: usize,
}

fn split_words(text: &str) -> Vec<Word<'_>> {
    text.split_word_bound_indices()
        .filter(|(_, segment)| segment.chars().next().is_some_and(char::is_alphanumeric))
        .map(|(start, segment)| Word {
            lower: segment.to_lowercase(),
            text: segment,
            start,
            end: start + segment.len(),
        })
        .collect()
}

/// Pending replacement: byte range in input text → digits
struct Replacement {
    start: usize,
    end: usize,
    text: String,
}

/// Number normalizer for English text
#[derive(Debug, Clone)]
pub struct EnglishNumberNormalizer {
    /// Lone ordinals up to this value are left as words
    ordinal_threshold: u64,
}

impl Default for EnglishNumberNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl EnglishNumberNormalizer {
    pub fn new() -> Self {
        Self {
            ordinal_threshold: ORDINAL_THRESHOLD,
        }
    }

    /// Override the lone-ordinal threshold (0 converts every ordinal)
    pub fn with_ordinal_threshold(mut self, threshold: u64) -> Self {
        self.ordinal_threshold = threshold;
        self
    }

    /// Whether the gap between two number words keeps them in one phrase
    fn joins(gap: &str, acc: &Accumulator, next: NumberWord) -> bool {
        if gap == "-" {
            // Only "twenty-three" / "twenty-first" style compounds
            return acc.last == Some(Class::Tens)
                && matches!(
                    next,
                    NumberWord::Cardinal { value, class: Class::Unit }
                        | NumberWord::Ordinal { value, class: Class::Unit } if value > 0
                );
        }
        !gap.is_empty() && gap.chars().all(char::is_whitespace)
    }

    fn find_replacements(&self, text: &str) -> Vec<Replacement> {
        let words = split_words(text);
        let mut replacements = Vec::new();
        let mut i = 0;

        while i < words.len() {
            let first = match lookup(&words[i].lower) {
                Some(word) => word,
                None => {
                    i += 1;
                    continue;
                },
            };

            let mut acc = Accumulator::default();
            if !acc.accepts(first) {
                i += 1;
                continue;
            }
            acc.push(first);

            let mut last_idx = i;
            let mut j = i + 1;
            while j < words.len() {
                let gap = &text[words[j - 1].end..words[j].start];
                let next = match lookup(&words[j].lower) {
                    Some(word) => word,
                    None => break,
                };

                if next == NumberWord::And {
                    // "one hundred and five": only bridges into a following number word
                    let bridges = matches!(acc.last, Some(Class::Hundred | Class::Scale))
                        && !acc.ordinal
                        && gap.chars().all(char::is_whitespace)
                        && j + 1 < words.len()
                        && text[words[j].end..words[j + 1].start]
                            .chars()
                            .all(char::is_whitespace)
                        && lookup(&words[j + 1].lower).is_some_and(|w| acc.accepts(w));
                    if !bridges {
                        break;
                    }
                    j += 1;
                    continue;
                }

                if !Self::joins(gap, &acc, next) || !acc.accepts(next) {
                    break;
                }
                acc.push(next);
                last_idx = j;
                j += 1;
            }

            let lone_small_ordinal =
                acc.ordinal && acc.words == 1 && acc.value() <= self.ordinal_threshold;
            if lone_small_ordinal {
                tracing::trace!(word = words[i].text, "Keeping lone ordinal as word");
            } else {
                replacements.push(Replacement {
                    start: words[i].start,
                    end: words[last_idx].end,
                    text: acc.render(),
                });
            }
            i = last_idx + 1;
        }

        replacements
    }
}

impl NumberNormalizer for EnglishNumberNormalizer {
    fn normalize(&self, text: &str) -> String {
        let replacements = self.find_replacements(text);
        if replacements.is_empty() {
            return text.to_string();
        }

        let mut output = String::with_capacity(text.len());
        let mut cursor = 0;
        for replacement in &replacements {
            output.push_str(&text[cursor..replacement.start]);
            output.push_str(&replacement.text);
            cursor = replacement.end;
        }
        output.push_str(&text[cursor..]);
        output
    }

    fn language(&self) -> &str {
        "en"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(text: &str) -> String {
        EnglishNumberNormalizer::new().normalize(text)
    }

    #[test]
    fn test_simple_cardinals() {
        assert_eq!(normalize("There will be four guests"), "There will be 4 guests");
        assert_eq!(normalize("five dudes"), "5 dudes");
        assert_eq!(normalize("eleven players"), "11 players");
        assert_eq!(normalize("Twenty Three people"), "23 people");
    }

    #[test]
    fn test_compound_numbers() {
        assert_eq!(normalize("twenty-three"), "23");
        assert_eq!(normalize("one hundred and five"), "105");
        assert_eq!(normalize("two thousand twenty five"), "2025");
        assert_eq!(normalize("twenty five hundred"), "2500");
        assert_eq!(normalize("two thousand three hundred and twelve"), "2312");
    }

    #[test]
    fn test_ordinals() {
        assert_eq!(
            normalize("on the twenty-first of october 2026, thank you"),
            "on the 21st of october 2026, thank you"
        );
        assert_eq!(normalize("the twenty second"), "the 22nd");
        assert_eq!(normalize("the eleventh"), "the 11th");
        assert_eq!(normalize("the fourth of july"), "the 4th of july");
    }

    #[test]
    fn test_lone_small_ordinals_stay_words() {
        assert_eq!(normalize("first come first served"), "first come first served");
        assert_eq!(normalize("wait a second"), "wait a second");
        assert_eq!(
            EnglishNumberNormalizer::new()
                .with_ordinal_threshold(0)
                .normalize("the first"),
            "the 1st"
        );
    }

    #[test]
    fn test_adjacent_numbers_stay_separate() {
        assert_eq!(normalize("five six"), "5 6");
        assert_eq!(normalize("between five and six"), "between 5 and 6");
        assert_eq!(normalize("twenty thirty"), "20 30");
        assert_eq!(normalize("five-six"), "5-6");
    }

    #[test]
    fn test_other_text_untouched() {
        assert_eq!(normalize("a hundred reasons"), "a hundred reasons");
        assert_eq!(normalize("I don't know!"), "I don't know!");
        assert_eq!(normalize("just the 2 of us"), "just the 2 of us");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("someone"), "someone");
    }

    #[test]
    fn test_ordinal_suffix() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(12), "th");
        assert_eq!(ordinal_suffix(21), "st");
        assert_eq!(ordinal_suffix(113), "th");
    }
}
