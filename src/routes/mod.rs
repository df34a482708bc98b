//! HTTP route handlers and router composition.

use axum::Router;

use crate::state::SharedState;

pub mod countries;
pub mod docs;
pub mod health;
pub mod ranking;
pub mod score;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(countries::router())
        .merge(ranking::router())
        .merge(score::router());

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}
