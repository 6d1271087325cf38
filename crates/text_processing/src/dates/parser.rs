//! Natural-language date parser
//!
//! Parses a whole string as exactly one date expression. Any word that is
//! not part of a date (apart from a few filler words) fails the parse, as
//! does a second date expression.
//!
//! Besides absolute dates the parser resolves relative expressions:
//! - `today`, `tomorrow`, `yesterday`, `now`
//! - `[next|this|coming] <weekday>`
//! - `in <n> <unit>`, `next <unit>`
//! - `[<n>] <unit> (after|before|from) <date>`, e.g. "the day after tomorrow"
//!
//! A time of day (`14:00`, `10 am`, `9 o'clock`) is accepted and dropped.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use reservation_config::{DateOrder, DateParserSettings, DatePart, PreferDatesFrom};
use reservation_core::DateParser;

/// Filler words ignored between date components
const SKIP_WORDS: &[&str] = &["on", "the", "of", "at"];

const MONTH_WORDS: &[(&str, u32)] = &[
    ("january", 1),
    ("jan", 1),
    ("february", 2),
    ("feb", 2),
    ("march", 3),
    ("mar", 3),
    ("april", 4),
    ("apr", 4),
    ("may", 5),
    ("june", 6),
    ("jun", 6),
    ("july", 7),
    ("jul", 7),
    ("august", 8),
    ("aug", 8),
    ("september", 9),
    ("sept", 9),
    ("sep", 9),
    ("october", 10),
    ("oct", 10),
    ("november", 11),
    ("nov", 11),
    ("december", 12),
    ("dec", 12),
];

const WEEKDAY_WORDS: &[(&str, Weekday)] = &[
    ("monday", Weekday::Mon),
    ("mon", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("tue", Weekday::Tue),
    ("tues", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("wed", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("thu", Weekday::Thu),
    ("thur", Weekday::Thu),
    ("thurs", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("fri", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sat", Weekday::Sat),
    ("sunday", Weekday::Sun),
    ("sun", Weekday::Sun),
];

const RELATIVE_WORDS: &[(&str, i64)] = &[
    ("today", 0),
    ("now", 0),
    ("tomorrow", 1),
    ("yesterday", -1),
];

const MODIFIER_WORDS: &[(&str, Modifier)] = &[
    ("next", Modifier::Next),
    ("coming", Modifier::Next),
    ("this", Modifier::This),
];

const UNIT_WORDS: &[(&str, Unit)] = &[
    ("day", Unit::Day),
    ("days", Unit::Day),
    ("week", Unit::Week),
    ("weeks", Unit::Week),
    ("month", Unit::Month),
    ("months", Unit::Month),
];

const RELATION_WORDS: &[(&str, Relation)] = &[
    ("after", Relation::After),
    ("from", Relation::After),
    ("before", Relation::Before),
];

/// Word sequences that turn a preceding hour into a time of day
const TIME_MARKERS: &[&[&str]] = &[
    &["am"],
    &["pm"],
    &["a", "m"],
    &["p", "m"],
    &["o", "clock"],
    &["oclock"],
];

/// Largest count accepted in an offset such as "in 3 days"
const MAX_OFFSET_COUNT: u32 = 999;

const ORDINAL_SUFFIXES: &[&str] = &["st", "nd", "rd", "th"];

/// Year offsets searched when resolving a date without a year (covers Feb 29)
const MAX_YEAR_OFFSET: i32 = 8;

/// Digit group of a number or numeric compound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Group {
    value: u32,
    digits: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Number { group: Group, ordinal: bool },
    Numeric(Vec<Group>),
    Word(String),
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modifier {
    Next,
    This,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Day,
    Week,
    Month,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relation {
    After,
    Before,
}

/// Classified token
#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    Number { group: Group, ordinal: bool },
    Numeric(Vec<Group>),
    Month(u32),
    Weekday(Weekday),
    Relative(i64),
    Modifier(Modifier),
    Unit(Unit),
    Relation(Relation),
    /// "in", as in "in 3 days"
    In,
    /// "a" / "an", a count of one
    Article,
}

impl Item {
    /// Count of an offset: a plain small number or an article
    fn count(&self) -> Option<u32> {
        match self {
            Item::Article => Some(1),
            Item::Number { group, ordinal: false } if group.value <= MAX_OFFSET_COUNT => {
                Some(group.value)
            },
            _ => None,
        }
    }
}

/// Move `date` by `count` units, backwards for a negative count
fn shift(date: NaiveDate, unit: Unit, count: i64) -> Option<NaiveDate> {
    match unit {
        Unit::Day => date.checked_add_signed(chrono::Duration::days(count)),
        Unit::Week => date.checked_add_signed(chrono::Duration::weeks(count)),
        Unit::Month => {
            let months = Months::new(u32::try_from(count.unsigned_abs()).ok()?);
            if count >= 0 {
                date.checked_add_months(months)
            } else {
                date.checked_sub_months(months)
            }
        },
    }
}

/// Date components stated by the expression
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Partial {
    day: Option<u32>,
    month: Option<u32>,
    year: Option<i32>,
}

fn read_group(chars: &[char], start: usize) -> Option<(Group, usize)> {
    let mut end = start;
    while end < chars.len() && chars[end].is_ascii_digit() {
        end += 1;
    }
    let digits = end - start;
    // More than nine digits is not a date component
    if digits == 0 || digits > 9 {
        return None;
    }
    let value = chars[start..end]
        .iter()
        .filter_map(|c| c.to_digit(10))
        .fold(0u32, |acc, d| acc * 10 + d);
    Some((Group { value, digits }, end))
}

/// Split text into numbers, numeric compounds and lowercase words
///
/// Returns `None` when a digit run cannot be a date component.
fn tokenize(text: &str) -> Option<Vec<Token>> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_ascii_digit() {
            let (first, mut end) = read_group(&chars, i)?;

            let continues_with = |pos: usize, sep: char| {
                chars.get(pos) == Some(&sep) && chars.get(pos + 1).is_some_and(char::is_ascii_digit)
            };

            // 14:00, 9:30:15
            if continues_with(end, ':') {
                let mut parts = vec![first];
                while continues_with(end, ':') {
                    let (group, next) = read_group(&chars, end + 1)?;
                    parts.push(group);
                    end = next;
                }
                if !is_clock_time(&parts) {
                    return None;
                }
                tokens.push(Token::Time);
                i = end;
                continue;
            }

            let separator = chars.get(end).copied().filter(|s| matches!(s, '.' | '/' | '-'));
            let continues = |pos: usize| chars.get(pos + 1).is_some_and(char::is_ascii_digit);

            if let Some(sep) = separator.filter(|_| continues(end)) {
                let mut groups = vec![first];
                while chars.get(end) == Some(&sep) && continues(end) {
                    let (group, next) = read_group(&chars, end + 1)?;
                    groups.push(group);
                    end = next;
                }
                if groups.len() > 3 {
                    return None;
                }
                tokens.push(Token::Numeric(groups));
            } else {
                let mut suffix_end = end;
                while suffix_end < chars.len() && chars[suffix_end].is_alphabetic() {
                    suffix_end += 1;
                }
                let suffix: String = chars[end..suffix_end].iter().collect::<String>().to_lowercase();
                let ordinal = ORDINAL_SUFFIXES.contains(&suffix.as_str());
                if ordinal {
                    end = suffix_end;
                }
                tokens.push(Token::Number { group: first, ordinal });
            }
            i = end;
        } else if c.is_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_alphabetic() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect::<String>().to_lowercase();
            tokens.push(Token::Word(word));
        } else {
            i += 1;
        }
    }

    Some(absorb_time_markers(tokens))
}

fn is_clock_time(parts: &[Group]) -> bool {
    match parts {
        [hour, minute] => hour.value <= 23 && minute.digits == 2 && minute.value <= 59,
        [hour, minute, second] => {
            hour.value <= 23
                && minute.digits == 2
                && minute.value <= 59
                && second.digits == 2
                && second.value <= 59
        },
        _ => false,
    }
}

fn marker_len(tokens: &[Token]) -> Option<usize> {
    TIME_MARKERS
        .iter()
        .find(|marker| {
            marker.len() <= tokens.len()
                && marker
                    .iter()
                    .zip(tokens)
                    .all(|(word, token)| matches!(token, Token::Word(w) if w.as_str() == *word))
        })
        .map(|marker| marker.len())
}

/// Fold "10 am", "10am", "9 o'clock" and "14:00 pm" into time tokens
fn absorb_time_markers(tokens: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let hour = match &tokens[i] {
            Token::Number { group, ordinal: false } if (1..=12).contains(&group.value) => true,
            Token::Time => true,
            _ => false,
        };
        match marker_len(&tokens[i + 1..]).filter(|_| hour) {
            Some(len) => {
                out.push(Token::Time);
                i += len + 1;
            },
            None => {
                out.push(tokens[i].clone());
                i += 1;
            },
        }
    }
    out
}

fn lookup_in<T: Copy>(table: &[(&str, T)], word: &str) -> Option<T> {
    table.iter().find(|(w, _)| *w == word).map(|(_, value)| *value)
}

/// Map tokens to date items, dropping filler words
///
/// Returns `None` on the first unknown word.
fn classify(tokens: Vec<Token>) -> Option<Vec<Item>> {
    let mut items = Vec::with_capacity(tokens.len());
    for token in tokens {
        let item = match token {
            Token::Number { group, ordinal } => Item::Number { group, ordinal },
            Token::Numeric(groups) => Item::Numeric(groups),
            // Time of day carries no date information
            Token::Time => continue,
            Token::Word(word) => {
                let word = word.as_str();
                if SKIP_WORDS.contains(&word) {
                    continue;
                }
                if let Some(month) = lookup_in(MONTH_WORDS, word) {
                    Item::Month(month)
                } else if let Some(day) = lookup_in(WEEKDAY_WORDS, word) {
                    Item::Weekday(day)
                } else if let Some(offset) = lookup_in(RELATIVE_WORDS, word) {
                    Item::Relative(offset)
                } else if let Some(modifier) = lookup_in(MODIFIER_WORDS, word) {
                    Item::Modifier(modifier)
                } else if let Some(unit) = lookup_in(UNIT_WORDS, word) {
                    Item::Unit(unit)
                } else if let Some(relation) = lookup_in(RELATION_WORDS, word) {
                    Item::Relation(relation)
                } else {
                    match word {
                        "in" => Item::In,
                        "a" | "an" => Item::Article,
                        _ => return None,
                    }
                }
            },
        };
        items.push(item);
    }
    Some(items)
}

fn expand_year(group: Group) -> Option<i32> {
    match group.digits {
        2 => Some(2000 + group.value as i32),
        4 => Some(group.value as i32),
        _ => None,
    }
}

fn is_year(group: Group, ordinal: bool) -> bool {
    group.digits == 4 && !ordinal
}

fn is_day(group: Group) -> bool {
    group.digits <= 2
}

fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
}

/// Date parser configured by [`DateParserSettings`]
#[derive(Debug, Clone, Default)]
pub struct NaturalDateParser {
    settings: DateParserSettings,
}

impl NaturalDateParser {
    pub fn new(settings: DateParserSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &DateParserSettings {
        &self.settings
    }

    fn from_numeric(&self, groups: &[Group]) -> Option<Partial> {
        match *groups {
            [a, b, c] => {
                let (year, month, day) = if a.digits == 4 {
                    (a, b, c)
                } else {
                    match self.settings.date_order {
                        DateOrder::Dmy => (c, b, a),
                        DateOrder::Mdy => (c, a, b),
                        DateOrder::Ymd => (a, b, c),
                    }
                };
                Some(Partial {
                    day: Some(day.value),
                    month: Some(month.value),
                    year: Some(expand_year(year)?),
                })
            },
            [a, b] if a.digits == 4 => Some(Partial {
                day: None,
                month: Some(b.value),
                year: Some(a.value as i32),
            }),
            [a, b] if b.digits == 4 => Some(Partial {
                day: None,
                month: Some(a.value),
                year: Some(b.value as i32),
            }),
            [a, b] => {
                let (day, month) = match self.settings.date_order {
                    DateOrder::Dmy => (a, b),
                    DateOrder::Mdy | DateOrder::Ymd => (b, a),
                };
                Some(Partial {
                    day: Some(day.value),
                    month: Some(month.value),
                    year: None,
                })
            },
            _ => None,
        }
    }

    /// Components of an absolute expression, `None` if the items do not form one
    fn absolute(&self, items: &[Item]) -> Option<Partial> {
        use Item::{Month, Number, Numeric};

        let partial = match items {
            [Numeric(groups)] => return self.from_numeric(groups),

            [Number { group: d, .. }, Month(m)] | [Month(m), Number { group: d, .. }]
                if is_day(*d) =>
            {
                Partial { day: Some(d.value), month: Some(*m), year: None }
            },

            [Number { group: d, .. }, Month(m), Number { group: y, ordinal: false }]
            | [Month(m), Number { group: d, .. }, Number { group: y, ordinal: false }]
                if is_day(*d) && y.digits == 4 =>
            {
                Partial { day: Some(d.value), month: Some(*m), year: Some(y.value as i32) }
            },

            [Month(m)] => Partial { day: None, month: Some(*m), year: None },

            [Month(m), Number { group: y, ordinal }] if is_year(*y, *ordinal) => {
                Partial { day: None, month: Some(*m), year: Some(y.value as i32) }
            },

            [Number { group: y, ordinal }] if is_year(*y, *ordinal) => {
                Partial { day: None, month: None, year: Some(y.value as i32) }
            },

            _ => return None,
        };
        Some(partial)
    }

    fn has_required_parts(&self, partial: &Partial) -> bool {
        (!self.settings.requires(DatePart::Day) || partial.day.is_some())
            && (!self.settings.requires(DatePart::Month) || partial.month.is_some())
            && (!self.settings.requires(DatePart::Year) || partial.year.is_some())
    }

    fn build(partial: &Partial, year: i32, today: NaiveDate) -> Option<NaiveDate> {
        let month = partial.month.unwrap_or_else(|| today.month());
        let day = match partial.day {
            Some(day) => day,
            None => today.day().min(last_day_of_month(year, month)?),
        };
        NaiveDate::from_ymd_opt(year, month, day)
    }

    fn resolve(&self, partial: &Partial, today: NaiveDate) -> Option<NaiveDate> {
        if let Some(year) = partial.year {
            return Self::build(partial, year, today);
        }

        match self.settings.prefer_dates_from {
            PreferDatesFrom::Future => (0..=MAX_YEAR_OFFSET)
                .filter_map(|offset| Self::build(partial, today.year() + offset, today))
                .find(|date| *date >= today),
            PreferDatesFrom::Past => (0..=MAX_YEAR_OFFSET)
                .filter_map(|offset| Self::build(partial, today.year() - offset, today))
                .find(|date| *date <= today),
            PreferDatesFrom::CurrentPeriod => Self::build(partial, today.year(), today),
        }
    }

    fn resolve_weekday(&self, weekday: Weekday, today: NaiveDate) -> Option<NaiveDate> {
        let target = weekday.num_days_from_monday() as u64;
        let current = today.weekday().num_days_from_monday() as u64;

        match self.settings.prefer_dates_from {
            PreferDatesFrom::Future => {
                let ahead = match (target + 7 - current) % 7 {
                    0 => 7,
                    n => n,
                };
                today.checked_add_days(Days::new(ahead))
            },
            PreferDatesFrom::Past => {
                let back = match (current + 7 - target) % 7 {
                    0 => 7,
                    n => n,
                };
                today.checked_sub_days(Days::new(back))
            },
            PreferDatesFrom::CurrentPeriod => today
                .checked_sub_days(Days::new(current))
                .and_then(|monday| monday.checked_add_days(Days::new(target))),
        }
    }

    /// "2 days after tomorrow", "a week before 12.12.2025"
    fn shift_from(
        &self,
        anchor: &[Item],
        unit: Unit,
        count: u32,
        relation: Relation,
        today: NaiveDate,
    ) -> Option<NaiveDate> {
        if anchor.is_empty() {
            return None;
        }
        let base = self.parse_items(anchor, today)?;
        let count = i64::from(count);
        match relation {
            Relation::After => shift(base, unit, count),
            Relation::Before => shift(base, unit, -count),
        }
    }

    fn parse_items(&self, items: &[Item], today: NaiveDate) -> Option<NaiveDate> {
        // "Sunday 20. July 1969": a weekday in front of an absolute date is dropped
        let items = match items {
            [Item::Weekday(_), next, ..]
                if matches!(next, Item::Number { .. } | Item::Month(_) | Item::Numeric(_)) =>
            {
                &items[1..]
            },
            _ => items,
        };

        match items {
            [Item::Relative(offset)] => {
                today.checked_add_signed(chrono::Duration::days(*offset))
            },
            [Item::Weekday(weekday)] | [Item::Modifier(_), Item::Weekday(weekday)] => {
                self.resolve_weekday(*weekday, today)
            },
            [Item::In, count, Item::Unit(unit)] => {
                shift(today, *unit, i64::from(count.count()?))
            },
            [Item::Modifier(Modifier::Next), Item::Unit(unit)] => shift(today, *unit, 1),
            [Item::Unit(unit), Item::Relation(relation), anchor @ ..] => {
                self.shift_from(anchor, *unit, 1, *relation, today)
            },
            [count, Item::Unit(unit), Item::Relation(relation), anchor @ ..] => {
                self.shift_from(anchor, *unit, count.count()?, *relation, today)
            },
            _ => {
                // "in June 2025"
                let items: Vec<Item> =
                    items.iter().filter(|item| **item != Item::In).cloned().collect();
                let partial = self.absolute(&items)?;
                if !self.has_required_parts(&partial) {
                    tracing::trace!(?partial, "Date expression lacks required parts");
                    return None;
                }
                self.resolve(&partial, today)
            },
        }
    }
}

impl DateParser for NaturalDateParser {
    fn parse(&self, text: &str, today: NaiveDate) -> Option<NaiveDate> {
        let items = classify(tokenize(text)?)?;
        if items.is_empty() {
            return None;
        }
        self.parse_items(&items, today)
    }
}
