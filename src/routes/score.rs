//! Score submission route.

use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::score::{SubmitScoreRequest, SubmitScoreResponse},
    error::AppError,
    services::score_service,
    state::SharedState,
};

#[utoipa::path(
    post,
    path = "/score",
    tag = "scores",
    request_body = SubmitScoreRequest,
    responses(
        (status = 200, description = "Submission processed", body = SubmitScoreResponse),
        (status = 400, description = "Invalid submission")
    )
)]
/// Submit a finished run; the record is kept only if it beats the player's best.
pub async fn submit_score(
    State(state): State<SharedState>,
    Json(payload): Json<SubmitScoreRequest>,
) -> Result<Json<SubmitScoreResponse>, AppError> {
    let result = score_service::submit(&state, payload).await?;
    Ok(Json(result))
}

/// Configure the score routes subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/score", post(submit_score))
}
