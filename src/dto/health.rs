//! Health check response payload.

use serde::Serialize;
use utoipa::ToSchema;

/// Health response returned by the `/health` route: `{"ok": true}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `true` when the process is serving.
    pub ok: bool,
}

impl HealthResponse {
    /// Create a health response indicating the system is operational.
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
