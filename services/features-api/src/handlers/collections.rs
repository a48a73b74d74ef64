//! Collection list and collection metadata handlers.

use axum::{
    extract::{Extension, Path, Query},
    http::HeaderMap,
    response::Response,
};
use features_protocol::{
    collection_href, endpoints, GeometryEncoding, Link, MediaType, PageRequest, RelType,
};
use std::sync::Arc;
use tracing::{debug, info};

use super::{alternates, unsupported, QueryPairs};
use crate::content_negotiation::{negotiate_request, respond, see_other};
use crate::error::ApiError;
use crate::formatters::{html, ogc_json, openapi};
use crate::models::{collection_model, dataset_model, find_collection, find_dataset, list_collections};
use crate::state::AppState;

/// GET /collections - Feature collections of the dataset, one page at a time
pub async fn collections_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<QueryPairs>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let endpoint = &endpoints::COLLECTIONS;
    let negotiated = negotiate_request(endpoint, &query, &headers)?;
    let page_request = PageRequest::from_query(&query, state.config.collections_per_page)?;
    let base_url = state.base_url();
    let uri = format!("{}/collections", base_url);

    let graph = state.graph().await;
    let dataset = find_dataset(graph.as_ref(), &state.config);
    let all = list_collections(graph.as_ref(), dataset.as_deref());
    let window = page_request.window(all.len());
    let page = window.slice(&all);

    debug!(
        total = all.len(),
        page = window.page,
        per_page = window.per_page,
        "Listing collections"
    );

    let mut links = vec![Link::new(uri.clone(), RelType::Self_)
        .with_type(MediaType::Json)
        .with_title("This document")];
    links.extend(window.links(&uri));

    let body = match (negotiated.profile.token, negotiated.media_type) {
        ("alt", _) => return alternates(endpoint, &negotiated, &uri, &links),
        ("oai", MediaType::Html) => {
            let title = dataset_model(graph.as_ref(), &state.config).title;
            html::collections(&title, page, base_url, &links)
        }
        ("oai", MediaType::OpenApiJson) => openapi(base_url)?,
        ("oai", MediaType::Json | MediaType::GeoJson) => ogc_json::collections(&links, page)?,
        _ => return Err(unsupported(&negotiated)),
    };

    Ok(respond(endpoint, &negotiated, &uri, &links, body))
}

/// GET /collections/{collection_id} - One collection
///
/// The `mem` profile is served by the items resource.
pub async fn collection_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(collection_id): Path<String>,
    Query(query): Query<QueryPairs>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let endpoint = &endpoints::COLLECTION;
    let negotiated = negotiate_request(endpoint, &query, &headers)?;
    let base_url = state.base_url();
    let uri = collection_href(base_url, &collection_id);

    let graph = state.graph().await;
    let collection_uri = find_collection(graph.as_ref(), &collection_id)?;
    info!(
        collection_id = %collection_id,
        profile = negotiated.profile.token,
        media_type = %negotiated.media_type,
        "Collection request"
    );

    if negotiated.profile.token == "mem" {
        return Ok(see_other(&format!("{}/items", uri)));
    }

    let model = collection_model(graph.as_ref(), &collection_uri, base_url);
    let body = match (negotiated.profile.token, negotiated.media_type) {
        ("alt", _) => return alternates(endpoint, &negotiated, &uri, &model.links),
        ("oai", MediaType::Html) => {
            let bbox = model
                .geometry(GeometryEncoding::Wkt)
                .and_then(|g| g.to_geojson().ok());
            html::collection(&model, bbox.as_ref())
        }
        ("oai", MediaType::OpenApiJson) => openapi(base_url)?,
        ("oai", MediaType::Json | MediaType::GeoJson) => ogc_json::resource(&model)?,
        _ => return Err(unsupported(&negotiated)),
    };

    Ok(respond(endpoint, &negotiated, &uri, &model.links, body))
}
