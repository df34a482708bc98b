//! Shared application state and the in-memory quiz session machinery.

pub mod session;
pub mod shuffle;

use std::sync::Arc;

use crate::dao::{models::CountryEntry, score_store::ScoreStore};

/// Shared handle to the application state used by every request handler.
pub type SharedState = Arc<AppState>;

/// Central application state: the immutable country catalog and the score store.
///
/// Both are injected at startup; the server does not begin serving until the
/// catalog has been loaded, so handlers never observe a partially initialized
/// state.
pub struct AppState {
    countries: Vec<CountryEntry>,
    score_store: Arc<dyn ScoreStore>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(countries: Vec<CountryEntry>, score_store: Arc<dyn ScoreStore>) -> SharedState {
        Arc::new(Self {
            countries,
            score_store,
        })
    }

    /// Country reference data loaded at boot.
    pub fn countries(&self) -> &[CountryEntry] {
        &self.countries
    }

    /// Handle to the score store.
    pub fn score_store(&self) -> Arc<dyn ScoreStore> {
        self.score_store.clone()
    }
}
