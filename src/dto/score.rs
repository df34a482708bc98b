//! DTO definitions for the score submission and ranking endpoints.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    dao::models::{GameMode, ScoreRecord, UnknownMode},
    dto::validation::validate_day,
};

/// Payload submitted at the end of a run.
///
/// `mode` stays a plain string so an unknown variant surfaces as a 400 with
/// the regular error body instead of a deserialization rejection.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SubmitScoreRequest {
    /// Player display name.
    pub name: String,
    /// Correct answers in the run.
    pub score: i64,
    /// Elapsed seconds for the run.
    pub time: f64,
    /// Game variant, `classic` or `daily`.
    pub mode: String,
    /// Calendar day (`YYYY-MM-DD`), required for daily runs.
    #[serde(default)]
    pub date: Option<String>,
}

impl SubmitScoreRequest {
    /// Parse the mode string into a [`GameMode`].
    pub fn parsed_mode(&self) -> Result<GameMode, UnknownMode> {
        GameMode::from_str(&self.mode)
    }
}

impl Validate for SubmitScoreRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.name.trim().is_empty() {
            errors.add("name", invalid("name_required", "name required"));
        }

        if self.score < 0 || self.score > i64::from(u32::MAX) {
            errors.add("score", invalid("invalid_score", "invalid score"));
        }

        if !self.time.is_finite() || self.time < 0.0 {
            errors.add("time", invalid("invalid_time", "invalid time"));
        }

        match self.parsed_mode() {
            Err(err) => {
                let mut error = ValidationError::new("invalid_mode");
                error.message = Some(err.to_string().into());
                errors.add("mode", error);
            }
            Ok(GameMode::Daily) => match self.date.as_deref() {
                None => errors.add(
                    "date",
                    invalid("date_required", "daily requires date YYYY-MM-DD"),
                ),
                Some(date) => {
                    if let Err(error) = validate_day(date) {
                        errors.add("date", error);
                    }
                }
            },
            Ok(GameMode::Classic) => {}
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Build a [`ValidationError`] with a fixed code and message.
fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Result of a score submission: whether the ranking changed.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitScoreResponse {
    /// True when the record was inserted or replaced a worse one.
    pub updated: bool,
}

/// Query parameters accepted by the ranking endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RankingQuery {
    /// Game variant to rank; defaults to classic.
    pub mode: Option<GameMode>,
    /// Calendar day (`YYYY-MM-DD`) selecting a daily leaderboard.
    pub date: Option<String>,
}

/// One leaderboard row, mirroring the persisted record.
#[derive(Debug, Serialize, ToSchema)]
pub struct RankingEntry {
    /// Player display name.
    pub name: String,
    /// Correct answers.
    pub score: u32,
    /// Elapsed seconds.
    pub time: f64,
    /// Game variant.
    pub mode: GameMode,
    /// Calendar day for daily records.
    pub date: Option<String>,
    /// Identity string of the record.
    pub key: String,
    /// Unix milliseconds of the last write.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

impl From<ScoreRecord> for RankingEntry {
    fn from(record: ScoreRecord) -> Self {
        Self {
            name: record.name,
            score: record.score,
            time: record.time,
            mode: record.mode,
            date: record.date,
            key: record.key,
            created_at: record.created_at,
        }
    }
}
