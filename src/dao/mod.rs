//! Data access layer: persisted models, the score store, and the country catalog.

/// Country catalog bootstrap (cache + upstream fetch).
pub mod countries;
/// Database model definitions.
pub mod models;
/// Score persistence and ranking queries.
pub mod score_store;
/// Storage abstraction layer for persistence operations.
pub mod storage;
