//! Leaderboard query route.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::score::{RankingEntry, RankingQuery},
    error::AppError,
    services::ranking_service,
    state::SharedState,
};

#[utoipa::path(
    get,
    path = "/ranking",
    tag = "scores",
    params(RankingQuery),
    responses((status = 200, description = "Top 10 for the requested mode", body = Vec<RankingEntry>))
)]
/// Return the top-10 leaderboard for a mode (and day, for daily mode).
pub async fn get_ranking(
    State(state): State<SharedState>,
    Query(query): Query<RankingQuery>,
) -> Result<Json<Vec<RankingEntry>>, AppError> {
    let entries = ranking_service::top_scores(&state, query).await?;
    Ok(Json(entries))
}

/// Configure the ranking routes subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/ranking", get(get_ranking))
}
