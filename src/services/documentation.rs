use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the Flagzim backend.
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::countries::list_countries,
        crate::routes::ranking::get_ranking,
        crate::routes::score::submit_score,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::score::SubmitScoreRequest,
            crate::dto::score::SubmitScoreResponse,
            crate::dto::score::RankingEntry,
            crate::dao::models::GameMode,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "countries", description = "Country reference data"),
        (name = "scores", description = "Score submission and rankings"),
    )
)]
pub struct ApiDoc;
