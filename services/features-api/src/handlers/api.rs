//! OpenAPI definition handlers.

use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::Response,
};
use features_protocol::MediaType;
use std::sync::Arc;

use crate::error::ApiError;
use crate::formatters::{html::html_escape, openapi};
use crate::state::AppState;

/// GET /api - OpenAPI definition with this server's URL
pub async fn api_handler(Extension(state): Extension<Arc<AppState>>) -> Result<Response, ApiError> {
    let body = openapi(state.base_url())?;

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, MediaType::OpenApiJson.as_str())
        .header(header::CACHE_CONTROL, "max-age=3600")
        .body(body.into())
        .unwrap())
}

/// GET /api.html - API documentation rendered by ReDoc
pub async fn api_html_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>{}</title>
    <meta charset="utf-8"/>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>
        body {{ margin: 0; padding: 0; }}
    </style>
</head>
<body>
    <redoc spec-url='api'></redoc>
    <script src="https://cdn.redoc.ly/redoc/latest/bundles/redoc.standalone.js"></script>
</body>
</html>"#,
        html_escape(&state.config.api_title)
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, MediaType::Html.as_str())
        .body(html.into())
        .unwrap()
}
