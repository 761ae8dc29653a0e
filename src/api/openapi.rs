//! OpenAPI documentation and schema generation

use utoipa::OpenApi;

/// OpenAPI documentation for the news-translate HTTP API
///
/// Served at `/api/v1/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "news-translate API",
        version = "0.1.0",
        description = "Translated news digest, CSV export and health endpoints",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:8501", description = "Local development server")
    ),
    paths(
        crate::api::routes::dashboard,
        crate::api::routes::export_csv,
        crate::api::routes::get_news,
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
    ),
    components(
        schemas(
            crate::presenter::NewsDigest,
            crate::presenter::TranslatedItem,
            crate::error::ApiError,
            crate::error::ErrorDetail,
        )
    ),
    tags(
        (name = "dashboard", description = "Browser dashboard and CSV download"),
        (name = "news", description = "Translated news digest"),
        (name = "system", description = "Health and API documentation")
    )
)]
pub struct ApiDoc;
