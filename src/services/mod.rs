//! Service layer sitting between the route handlers and the data access layer.

/// Country catalog read access.
pub mod country_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Top-10 leaderboard queries.
pub mod ranking_service;
/// Score submission and validation.
pub mod score_service;
