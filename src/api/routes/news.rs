//! JSON digest handler.

use crate::api::AppState;
use crate::error::Result;
use crate::presenter::NewsDigest;
use axum::{Json, extract::State};

/// GET /news - Run the pipeline and return the digest
#[utoipa::path(
    get,
    path = "/api/v1/news",
    tag = "news",
    responses(
        (status = 200, description = "Translated items in feed order", body = NewsDigest),
        (status = 502, description = "Feed could not be retrieved", body = crate::error::ApiError)
    )
)]
pub async fn get_news(State(state): State<AppState>) -> Result<Json<NewsDigest>> {
    let digest = state.pipeline.run().await?;
    Ok(Json(digest))
}
