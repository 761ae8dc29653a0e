//! Liveness and API description handlers.

use crate::api::{AppState, openapi::ApiDoc};
use axum::{Json, extract::State};
use serde_json::{Value, json};
use utoipa::OpenApi;

/// GET /health - Liveness plus the configured source and language pair
///
/// Does not contact the feed or the translation service.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "system",
    responses(
        (status = 200, description = "Service is up")
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let translation = &state.config.translation;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "feed": state.pipeline.source_url(),
        "languages": {
            "source": translation.source_language,
            "target": translation.target_language,
        },
    }))
}

/// GET /openapi.json
#[utoipa::path(
    get,
    path = "/api/v1/openapi.json",
    tag = "system",
    responses(
        (status = 200, description = "OpenAPI 3 document")
    )
)]
pub async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
