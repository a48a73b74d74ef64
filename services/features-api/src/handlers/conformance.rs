//! Conformance handler.

use axum::{
    extract::{Extension, Query},
    http::HeaderMap,
    response::Response,
};
use features_protocol::{endpoints, Link, MediaType, RelType};
use std::sync::Arc;

use super::{alternates, unsupported, QueryPairs};
use crate::content_negotiation::{negotiate_request, respond};
use crate::error::ApiError;
use crate::formatters::{html, ogc_json, openapi};
use crate::models::conformance_classes;
use crate::state::AppState;

/// GET /conformance - Declared conformance classes
pub async fn conformance_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<QueryPairs>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let endpoint = &endpoints::CONFORMANCE;
    let negotiated = negotiate_request(endpoint, &query, &headers)?;
    let uri = format!("{}/conformance", state.base_url());
    let links = vec![Link::new(uri.clone(), RelType::Self_)
        .with_type(MediaType::Json)
        .with_title("This document")];

    let graph = state.graph().await;
    let classes = conformance_classes(graph.as_ref());

    let body = match (negotiated.profile.token, negotiated.media_type) {
        ("alt", _) => return alternates(endpoint, &negotiated, &uri, &links),
        ("oai", MediaType::Html) => html::conformance(&classes),
        ("oai", MediaType::OpenApiJson) => openapi(state.base_url())?,
        ("oai", MediaType::Json | MediaType::GeoJson) => ogc_json::conformance(&classes)?,
        _ => return Err(unsupported(&negotiated)),
    };

    Ok(respond(endpoint, &negotiated, &uri, &links, body))
}
