//! Multilingual city alias matching
//!
//! Each supported city carries its name in several languages and scripts.
//! Matching is a case-insensitive substring search over the utterance, so
//! "In München please." and "bErLiN!" both resolve.

use once_cell::sync::Lazy;
use reservation_core::City;

/// City aliases, lowercased
static ALIAS_TABLE: &[(City, &[&str])] = &[
    (
        City::Munich,
        &[
            "munich",
            "münchen",
            "muenchen",
            "munchen",
            "monaco di baviera",
            "múnich",
            "munique",
            "mnichov",
            "monachium",
            "мюнхен",
            "ミュンヘン",
            "慕尼黑",
            "뮌헨",
        ],
    ),
    (
        City::Stuttgart,
        &[
            "stuttgart",
            "stoccarda",
            "estugarda",
            "štutgart",
            "штутгарт",
            "シュトゥットガルト",
            "斯图加特",
            "슈투트가르트",
        ],
    ),
    (
        City::Berlin,
        &[
            "berlin",
            "berlino",
            "berlim",
            "berlijn",
            "berlín",
            "berliini",
            "βερολίνο",
            "берлин",
            "ベルリン",
            "柏林",
            "베를린",
        ],
    ),
];

/// Default alias set, shared by all extractors
pub static CITY_ALIASES: Lazy<CityAliasSet> = Lazy::new(CityAliasSet::builtin);

/// Alias lists per supported city
#[derive(Debug, Clone)]
pub struct CityAliasSet {
    entries: Vec<(City, Vec<String>)>,
}

impl CityAliasSet {
    /// Built-in aliases of every supported city
    pub fn builtin() -> Self {
        let entries = ALIAS_TABLE
            .iter()
            .map(|(city, aliases)| (*city, aliases.iter().map(|a| a.to_lowercase()).collect()))
            .collect();
        Self { entries }
    }

    /// Add an alias for a city
    pub fn with_alias(mut self, city: City, alias: &str) -> Self {
        let alias = alias.trim().to_lowercase();
        if alias.is_empty() {
            return self;
        }
        match self.entries.iter_mut().find(|(c, _)| *c == city) {
            Some((_, aliases)) => {
                if !aliases.contains(&alias) {
                    aliases.push(alias);
                }
            },
            None => self.entries.push((city, vec![alias])),
        }
        self
    }

    /// Aliases of a city
    pub fn aliases(&self, city: City) -> &[String] {
        self.entries
            .iter()
            .find(|(c, _)| *c == city)
            .map(|(_, aliases)| aliases.as_slice())
            .unwrap_or(&[])
    }

    /// Distinct cities mentioned in `text`, in table order
    pub fn matching_cities(&self, text: &str) -> Vec<City> {
        let lower = text.to_lowercase();
        self.entries
            .iter()
            .filter(|(_, aliases)| aliases.iter().any(|alias| lower.contains(alias.as_str())))
            .map(|(city, _)| *city)
            .collect()
    }

    /// The single city mentioned in `text`
    ///
    /// `None` when no city or more than one city is mentioned.
    pub fn find_unique(&self, text: &str) -> Option<City> {
        match self.matching_cities(text).as_slice() {
            [city] => Some(*city),
            [] => None,
            several => {
                tracing::debug!(cities = ?several, "Ambiguous city mention");
                None
            },
        }
    }
}

impl Default for CityAliasSet {
    fn default() -> Self {
        Self::builtin()
    }
}
