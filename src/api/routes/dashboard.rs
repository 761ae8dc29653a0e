//! Dashboard page and CSV download handlers.

use crate::api::AppState;
use crate::error::{Error, Result, ToHttpStatus};
use crate::export::{CSV_CONTENT_TYPE, to_csv_bytes};
use crate::presenter::{render_dashboard, render_error};
use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
};

/// GET / - Fetch, translate and render the dashboard
///
/// A feed failure renders a single error banner and no item list.
#[utoipa::path(
    get,
    path = "/",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard page", content_type = "text/html"),
        (status = 502, description = "Feed could not be retrieved; error page", content_type = "text/html")
    )
)]
pub async fn dashboard(State(state): State<AppState>) -> Response {
    match render_page(&state).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Dashboard run failed");
            let status =
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            match render_error(&e) {
                Ok(html) => (status, Html(html)).into_response(),
                Err(render_err) => {
                    tracing::error!(error = %render_err, "Failed to render error page");
                    e.into_response()
                }
            }
        }
    }
}

async fn render_page(state: &AppState) -> Result<String> {
    let digest = state.pipeline.run().await?;
    let csv = to_csv_bytes(&digest.items)?;
    render_dashboard(&digest, &csv, &state.config.export.file_name)
}

/// GET /export.csv - Fetch, translate and download the CSV export
#[utoipa::path(
    get,
    path = "/export.csv",
    tag = "dashboard",
    responses(
        (status = 200, description = "UTF-8 CSV with BOM", content_type = "text/csv"),
        (status = 502, description = "Feed could not be retrieved", body = crate::error::ApiError)
    )
)]
pub async fn export_csv(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let digest = state.pipeline.run().await?;
    let csv = to_csv_bytes(&digest.items)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(CSV_CONTENT_TYPE),
    );
    let disposition = format!(
        "attachment; filename=\"{}\"",
        state.config.export.file_name
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|e| Error::Other(format!("Invalid export file name: {}", e)))?,
    );

    Ok((StatusCode::OK, headers, csv))
}
