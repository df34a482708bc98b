use validator::Validate;

use crate::{
    dao::models::{GameMode, ScoreRecord},
    dto::score::{SubmitScoreRequest, SubmitScoreResponse},
    error::ServiceError,
    state::SharedState,
};

/// Validate a submission and apply the upsert-if-better rule.
///
/// The whole payload is a single candidate record; there are no partial
/// updates. `updated` reports whether the ranking changed.
pub async fn submit(
    state: &SharedState,
    request: SubmitScoreRequest,
) -> Result<SubmitScoreResponse, ServiceError> {
    request.validate()?;

    let mode = request
        .parsed_mode()
        .map_err(|err| ServiceError::InvalidInput(err.to_string()))?;
    let score = u32::try_from(request.score)
        .map_err(|_| ServiceError::InvalidInput("invalid score".to_string()))?;
    let date = match mode {
        GameMode::Daily => request.date,
        GameMode::Classic => None,
    };

    let record = ScoreRecord::new(request.name.trim().to_string(), score, request.time, mode, date);

    let updated = state.score_store().submit(record).await?;
    Ok(SubmitScoreResponse { updated })
}
