use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Respond with the static health payload while logging storage issues.
///
/// A failing store does not flip the response: reads degrade to an empty book,
/// so the service keeps answering. The probe only surfaces trouble in the logs.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    if let Err(err) = state.score_store().health_check().await {
        warn!(error = %err, "score store health check failed");
    }

    HealthResponse::ok()
}
