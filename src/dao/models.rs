//! Persisted entities: the score book, its records, and the country reference pair.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::OffsetDateTime;
use utoipa::ToSchema;

/// Game variant a score was achieved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Every country, fresh random order each run.
    Classic,
    /// Ten countries in a globally shared order derived from the calendar date.
    Daily,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Classic => write!(f, "classic"),
            GameMode::Daily => write!(f, "daily"),
        }
    }
}

impl FromStr for GameMode {
    type Err = UnknownMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "classic" => Ok(GameMode::Classic),
            "daily" => Ok(GameMode::Daily),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

/// Error returned when a mode string is neither `classic` nor `daily`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mode `{0}` (expected `classic` or `daily`)")]
pub struct UnknownMode(pub String);

/// Country reference pair, serialized as `["br", "Brazil"]` on the wire and in the cache file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryEntry {
    /// Lowercase ISO-like country code (extended codes such as `gb-eng` included).
    pub code: String,
    /// Display name shown to players.
    pub name: String,
}

impl Serialize for CountryEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.code, &self.name).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CountryEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (code, name) = <(String, String)>::deserialize(deserializer)?;
        Ok(Self { code, name })
    }
}

/// Best-score record for one player in one mode (and one day for daily mode).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Player display name as submitted (trimmed, original casing).
    pub name: String,
    /// Count of correct answers.
    pub score: u32,
    /// Elapsed seconds for the whole run.
    pub time: f64,
    /// Game variant the run was played in.
    pub mode: GameMode,
    /// Calendar day (`YYYY-MM-DD`) for daily records, absent for classic.
    #[serde(default)]
    pub date: Option<String>,
    /// Identity string deduplicating records per player/mode/day.
    pub key: String,
    /// Unix milliseconds of the last write.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

impl ScoreRecord {
    /// Build a record for the given run, deriving its identity key and write timestamp.
    pub fn new(name: String, score: u32, time: f64, mode: GameMode, date: Option<String>) -> Self {
        let key = Self::identity_key(&name, mode, date.as_deref());
        Self {
            name,
            score,
            time,
            mode,
            date,
            key,
            created_at: unix_millis_now(),
        }
    }

    /// Identity string: `lowercase(name)|classic` or `lowercase(name)|daily|<date>`.
    pub fn identity_key(name: &str, mode: GameMode, date: Option<&str>) -> String {
        let name = name.to_lowercase();
        match (mode, date) {
            (GameMode::Daily, Some(date)) => format!("{name}|daily|{date}"),
            _ => format!("{name}|{mode}"),
        }
    }

    /// Whether this record beats `incumbent`: strictly higher score, or equal
    /// score with strictly lower time. Exact (score, time) ties keep the
    /// incumbent by design.
    pub fn beats(&self, incumbent: &ScoreRecord) -> bool {
        self.score > incumbent.score
            || (self.score == incumbent.score && self.time < incumbent.time)
    }
}

/// Whole persisted document: the full set of best-score records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreBook {
    /// All records, at most one per identity key, in insertion order.
    pub records: Vec<ScoreRecord>,
}

impl ScoreBook {
    /// Upsert-if-better: insert the candidate when its key is absent, replace
    /// the incumbent when the candidate beats it, otherwise leave the book
    /// untouched. Returns whether the book changed.
    pub fn apply(&mut self, candidate: ScoreRecord) -> bool {
        match self.records.iter().position(|r| r.key == candidate.key) {
            None => {
                self.records.push(candidate);
                true
            }
            Some(pos) if candidate.beats(&self.records[pos]) => {
                self.records[pos] = candidate;
                true
            }
            Some(_) => false,
        }
    }

    /// Top records for a mode, sorted by score descending then time ascending,
    /// truncated to `limit`. Daily queries match the exact date and return
    /// nothing when no date is given. The sort is stable, so records with equal
    /// (score, time) keep their insertion order (implementation-defined).
    pub fn top_n(&self, mode: GameMode, date: Option<&str>, limit: usize) -> Vec<ScoreRecord> {
        if mode == GameMode::Daily && date.is_none() {
            return Vec::new();
        }

        let mut list: Vec<ScoreRecord> = self
            .records
            .iter()
            .filter(|r| r.mode == mode)
            .filter(|r| mode != GameMode::Daily || r.date.as_deref() == date)
            .cloned()
            .collect();

        list.sort_by(|a, b| {
            b.score.cmp(&a.score).then(
                a.time
                    .partial_cmp(&b.time)
                    .unwrap_or(Ordering::Equal),
            )
        });
        list.truncate(limit);
        list
    }
}

/// Current wall-clock time as unix milliseconds.
fn unix_millis_now() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, score: u32, time: f64, mode: GameMode, date: Option<&str>) -> ScoreRecord {
        ScoreRecord::new(
            name.to_string(),
            score,
            time,
            mode,
            date.map(str::to_string),
        )
    }

    #[test]
    fn identity_key_lowercases_and_includes_date_for_daily() {
        assert_eq!(
            ScoreRecord::identity_key("Ana", GameMode::Classic, None),
            "ana|classic"
        );
        assert_eq!(
            ScoreRecord::identity_key("ANA", GameMode::Daily, Some("2025-03-01")),
            "ana|daily|2025-03-01"
        );
    }

    #[test]
    fn higher_score_beats_incumbent() {
        let incumbent = record("ana", 5, 12.3, GameMode::Classic, None);
        let challenger = record("ana", 6, 30.0, GameMode::Classic, None);
        assert!(challenger.beats(&incumbent));
        assert!(!incumbent.beats(&challenger));
    }

    #[test]
    fn equal_score_lower_time_beats_incumbent() {
        let incumbent = record("ana", 5, 12.3, GameMode::Classic, None);
        let challenger = record("ana", 5, 9.0, GameMode::Classic, None);
        assert!(challenger.beats(&incumbent));
    }

    #[test]
    fn exact_tie_keeps_incumbent() {
        let incumbent = record("ana", 5, 12.3, GameMode::Classic, None);
        let challenger = record("ana", 5, 12.3, GameMode::Classic, None);
        assert!(!challenger.beats(&incumbent));

        let mut book = ScoreBook::default();
        assert!(book.apply(incumbent));
        assert!(!book.apply(challenger));
        assert_eq!(book.records.len(), 1);
    }

    #[test]
    fn apply_inserts_then_only_replaces_on_better() {
        let mut book = ScoreBook::default();

        assert!(book.apply(record("Ana", 5, 12.3, GameMode::Classic, None)));
        assert!(book.apply(record("Ana", 5, 9.0, GameMode::Classic, None)));
        assert_eq!(book.records[0].time, 9.0);

        assert!(!book.apply(record("Ana", 3, 5.0, GameMode::Classic, None)));
        assert_eq!(book.records[0].score, 5);
        assert_eq!(book.records[0].time, 9.0);
        assert_eq!(book.records.len(), 1);
    }

    #[test]
    fn same_name_different_mode_or_day_are_distinct_records() {
        let mut book = ScoreBook::default();
        assert!(book.apply(record("ana", 1, 5.0, GameMode::Classic, None)));
        assert!(book.apply(record("ana", 1, 5.0, GameMode::Daily, Some("2025-03-01"))));
        assert!(book.apply(record("ana", 1, 5.0, GameMode::Daily, Some("2025-03-02"))));
        assert_eq!(book.records.len(), 3);
    }

    #[test]
    fn top_n_sorts_by_score_then_time_and_truncates() {
        let mut book = ScoreBook::default();
        book.apply(record("slow", 3, 40.0, GameMode::Classic, None));
        book.apply(record("best", 7, 22.0, GameMode::Classic, None));
        book.apply(record("fast", 7, 18.0, GameMode::Classic, None));
        book.apply(record("other", 1, 4.0, GameMode::Daily, Some("2025-03-01")));

        let top = book.top_n(GameMode::Classic, None, 10);
        let names: Vec<&str> = top.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["fast", "best", "slow"]);

        for pair in top.windows(2) {
            assert!(
                pair[0].score > pair[1].score
                    || (pair[0].score == pair[1].score && pair[0].time <= pair[1].time)
            );
        }

        let top_two = book.top_n(GameMode::Classic, None, 2);
        assert_eq!(top_two.len(), 2);
    }

    #[test]
    fn daily_top_n_requires_date_and_matches_it_exactly() {
        let mut book = ScoreBook::default();
        book.apply(record("ana", 9, 30.0, GameMode::Daily, Some("2025-03-01")));
        book.apply(record("bob", 8, 25.0, GameMode::Daily, Some("2025-03-02")));

        assert!(book.top_n(GameMode::Daily, None, 10).is_empty());

        let day_one = book.top_n(GameMode::Daily, Some("2025-03-01"), 10);
        assert_eq!(day_one.len(), 1);
        assert_eq!(day_one[0].name, "ana");
    }

    #[test]
    fn country_entry_round_trips_as_pair() {
        let entry = CountryEntry {
            code: "br".to_string(),
            name: "Brazil".to_string(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"["br","Brazil"]"#);

        let parsed: CountryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }
}
