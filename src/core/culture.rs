use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use crate::models::UserProfile;

/// Score reported when either side's culture is unknown, so missing data is
/// never penalized
pub const NEUTRAL_CULTURAL_SCORE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    #[serde(rename = "12h")]
    TwelveHour,
    #[serde(rename = "24h")]
    TwentyFourHour,
}

/// Culture entry for one country
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CultureInfo {
    pub greeting: String,
    #[serde(rename = "timeFormat")]
    pub time_format: TimeFormat,
    pub topics: Vec<String>,
}

impl CultureInfo {
    pub fn new(greeting: &str, time_format: TimeFormat, topics: &[&str]) -> Self {
        Self {
            greeting: greeting.to_string(),
            time_format,
            topics: topics.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Static, read-only country to culture lookup
#[derive(Debug, Clone, Default)]
pub struct CultureTable {
    entries: HashMap<String, CultureInfo>,
}

impl CultureTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table shipped with the bot
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        table.insert(
            "US",
            CultureInfo::new(
                "Hi there!",
                TimeFormat::TwelveHour,
                &["technology", "sports", "movies", "business", "politics"],
            ),
        );
        table.insert(
            "UK",
            CultureInfo::new(
                "Hello!",
                TimeFormat::TwentyFourHour,
                &["literature", "sports", "travel", "current events", "music"],
            ),
        );
        table.insert(
            "Japan",
            CultureInfo::new(
                "こんにちは (Konnichiwa)!",
                TimeFormat::TwentyFourHour,
                &["anime", "technology", "food", "travel", "arts"],
            ),
        );
        table.insert(
            "India",
            CultureInfo::new(
                "Namaste!",
                TimeFormat::TwelveHour,
                &["cricket", "technology", "food", "cinema", "business"],
            ),
        );
        table.insert(
            "Brazil",
            CultureInfo::new(
                "Olá!",
                TimeFormat::TwentyFourHour,
                &["football", "music", "food", "travel", "arts"],
            ),
        );
        table
    }

    pub fn insert(&mut self, country: impl Into<String>, info: CultureInfo) {
        self.entries.insert(country.into(), info);
    }

    /// Look up a country, exact key first, then ignoring case
    pub fn get(&self, country: &str) -> Option<&CultureInfo> {
        let country = country.trim();
        self.entries.get(country).or_else(|| {
            self.entries
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(country))
                .map(|(_, info)| info)
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Topic overlap between two users' cultures
#[derive(Debug, Clone, PartialEq)]
pub struct CulturalMatch {
    pub score: f64,
    pub common_topics: Vec<String>,
}

impl CulturalMatch {
    pub fn neutral() -> Self {
        Self {
            score: NEUTRAL_CULTURAL_SCORE,
            common_topics: Vec::new(),
        }
    }
}

/// Share of topics the two cultures have in common.
///
/// `score = |common| / max(|topics1|, |topics2|)`, with `common` in the first
/// profile's topic order. Unknown or missing countries, and entries without
/// topics, give the neutral result.
pub fn cultural_compatibility(
    table: &CultureTable,
    profile1: &UserProfile,
    profile2: &UserProfile,
) -> CulturalMatch {
    let (Some(country1), Some(country2)) = (profile1.country(), profile2.country()) else {
        return CulturalMatch::neutral();
    };
    let (Some(culture1), Some(culture2)) = (table.get(country1), table.get(country2)) else {
        return CulturalMatch::neutral();
    };

    let max_topics = culture1.topics.len().max(culture2.topics.len());
    if max_topics == 0 {
        return CulturalMatch::neutral();
    }

    let common_topics: Vec<String> = culture1
        .topics
        .iter()
        .filter(|topic| culture2.topics.contains(topic))
        .cloned()
        .collect();

    CulturalMatch {
        score: common_topics.len() as f64 / max_topics as f64,
        common_topics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from(id: &str, country: &str) -> UserProfile {
        UserProfile::new(id).with_country(country)
    }

    #[test]
    fn test_builtin_greetings_and_clocks() {
        let table = CultureTable::builtin();
        let cases = [
            ("US", "Hi there!", TimeFormat::TwelveHour),
            ("UK", "Hello!", TimeFormat::TwentyFourHour),
            ("India", "Namaste!", TimeFormat::TwelveHour),
            ("Brazil", "Olá!", TimeFormat::TwentyFourHour),
        ];

        for (country, greeting, time_format) in cases {
            let info = table.get(country).unwrap();
            assert_eq!(info.greeting, greeting);
            assert_eq!(info.time_format, time_format);
        }
        assert_eq!(serde_json::to_value(TimeFormat::TwelveHour).unwrap(), "12h");
    }

    #[test]
    fn test_japan_india() {
        let table = CultureTable::builtin();
        let result = cultural_compatibility(&table, &from("a", "Japan"), &from("b", "India"));

        assert_eq!(result.common_topics, vec!["technology", "food"]);
        assert_eq!(result.score, 0.4);
    }

    #[test]
    fn test_topic_order_follows_first_profile() {
        let table = CultureTable::builtin();
        let result = cultural_compatibility(&table, &from("a", "Brazil"), &from("b", "Japan"));

        assert_eq!(result.common_topics, vec!["food", "travel", "arts"]);
        assert_eq!(result.score, 0.6);
    }

    #[test]
    fn test_same_country_is_full_match() {
        let table = CultureTable::builtin();
        let result = cultural_compatibility(&table, &from("a", "UK"), &from("b", "UK"));
        assert_eq!(result.score, 1.0);
        assert_eq!(result.common_topics.len(), 5);
    }

    #[test]
    fn test_missing_country_is_neutral() {
        let table = CultureTable::builtin();
        let result = cultural_compatibility(&table, &from("a", "Japan"), &UserProfile::new("b"));
        assert_eq!(result, CulturalMatch::neutral());
        assert_eq!(result.score, 0.5);
        assert!(result.common_topics.is_empty());
    }

    #[test]
    fn test_unknown_country_is_neutral() {
        let table = CultureTable::builtin();
        let result = cultural_compatibility(&table, &from("a", "Atlantis"), &from("b", "Japan"));
        assert_eq!(result, CulturalMatch::neutral());
    }

    #[test]
    fn test_lookup_ignores_case() {
        let table = CultureTable::builtin();
        assert!(table.get("japan").is_some());
        assert!(table.get(" BRAZIL ").is_some());
        assert!(table.get("Kenya").is_none());
    }

    #[test]
    fn test_custom_table() {
        let mut table = CultureTable::empty();
        table.insert("Kenya", CultureInfo::new("Jambo!", TimeFormat::TwelveHour, &["running", "wildlife"]));
        table.insert("Norway", CultureInfo::new("Hei!", TimeFormat::TwentyFourHour, &["skiing", "running", "fjords", "music"]));

        let result = cultural_compatibility(&table, &from("a", "Kenya"), &from("b", "Norway"));
        assert_eq!(result.common_topics, vec!["running"]);
        assert_eq!(result.score, 0.25);
    }
}
