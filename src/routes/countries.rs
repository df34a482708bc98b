//! Country catalog route.

use axum::{Json, Router, extract::State, routing::get};

use crate::{dao::models::CountryEntry, services::country_service, state::SharedState};

#[utoipa::path(
    get,
    path = "/countries",
    tag = "countries",
    responses((
        status = 200,
        description = "Country catalog as [code, name] pairs",
        body = Vec<Vec<String>>
    ))
)]
/// Return the full country catalog as `[code, name]` pairs.
pub async fn list_countries(State(state): State<SharedState>) -> Json<Vec<CountryEntry>> {
    Json(country_service::list_countries(&state))
}

/// Configure the countries routes subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/countries", get(list_countries))
}
