//! Landing page handler.

use axum::{
    extract::{Extension, Query},
    http::HeaderMap,
    response::Response,
};
use features_protocol::{endpoints, MediaType};
use std::sync::Arc;
use tracing::debug;

use super::{alternates, unsupported, QueryPairs};
use crate::content_negotiation::{negotiate_request, respond};
use crate::error::ApiError;
use crate::formatters::{html, ogc_json, openapi, rdf};
use crate::models::dataset_model;
use crate::state::AppState;

/// GET / - Landing page
///
/// `oai` describes the API; `dcat` describes the dataset behind it.
pub async fn landing_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<QueryPairs>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let endpoint = &endpoints::LANDING;
    let negotiated = negotiate_request(endpoint, &query, &headers)?;
    let base_url = state.base_url();
    let uri = format!("{}/", base_url);

    let graph = state.graph().await;
    let model = dataset_model(graph.as_ref(), &state.config);
    debug!(dataset = %model.uri, profile = negotiated.profile.token, "Landing page");

    let body = match (negotiated.profile.token, negotiated.media_type) {
        ("alt", _) => return alternates(endpoint, &negotiated, &uri, &model.links),
        ("oai", MediaType::Html) => html::landing(&model),
        ("oai", MediaType::OpenApiJson) => openapi(base_url)?,
        ("oai", MediaType::Json | MediaType::GeoJson) => ogc_json::landing(&model, base_url)?,
        ("dcat", MediaType::Html) => html::resource(&model),
        ("dcat", MediaType::Json) => ogc_json::resource(&model)?,
        ("dcat", media_type) if media_type.is_rdf() => {
            rdf::render(&rdf::dataset_graph(&model), media_type)?
        }
        _ => return Err(unsupported(&negotiated)),
    };

    Ok(respond(endpoint, &negotiated, &uri, &model.links, body))
}
