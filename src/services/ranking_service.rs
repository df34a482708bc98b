use crate::{
    dao::models::GameMode,
    dto::score::{RankingEntry, RankingQuery},
    error::ServiceError,
    state::SharedState,
};

/// Maximum number of rows a leaderboard query returns.
pub const RANKING_LIMIT: usize = 10;

/// Query the top scores for a mode. Daily requests without a date yield an
/// empty leaderboard rather than an error.
pub async fn top_scores(
    state: &SharedState,
    query: RankingQuery,
) -> Result<Vec<RankingEntry>, ServiceError> {
    let mode = query.mode.unwrap_or(GameMode::Classic);
    if mode == GameMode::Daily && query.date.is_none() {
        return Ok(Vec::new());
    }

    let records = state
        .score_store()
        .top_n(mode, query.date, RANKING_LIMIT)
        .await?;

    Ok(records.into_iter().map(RankingEntry::from).collect())
}
