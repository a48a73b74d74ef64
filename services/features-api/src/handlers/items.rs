//! Feature list and single feature handlers.

use axum::{
    extract::{Extension, Path, Query},
    http::HeaderMap,
    response::Response,
};
use features_graph::oxrdf::Subject;
use features_graph::filter_members;
use features_protocol::{
    classify, collection_href, endpoints, item_href, Link, MediaType, PageRequest, RelType,
};
use std::sync::Arc;
use tracing::info;

use super::{alternates, unsupported, QueryPairs};
use crate::content_negotiation::{negotiate_request, query_value, respond};
use crate::error::ApiError;
use crate::formatters::{geojson, html, ogc_json, openapi, rdf};
use crate::models::{
    collection_model, feature_model, feature_summaries, find_collection, find_feature,
    list_members, ResourceModel,
};
use crate::state::AppState;

/// GET /collections/{collection_id}/items - Members of a collection
///
/// Members are optionally filtered by `bbox`, then paged. `limit` returns
/// the first `limit` members and suppresses page links.
pub async fn items_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(collection_id): Path<String>,
    Query(query): Query<QueryPairs>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let endpoint = &endpoints::ITEMS;
    let negotiated = negotiate_request(endpoint, &query, &headers)?;
    let page_request = PageRequest::from_query(&query, state.config.items_per_page)?;
    let bbox = query_value(&query, "bbox")
        .map(|value| classify(value).map(|kind| (kind, value)))
        .transpose()?;

    let base_url = state.base_url();
    let collection_href = collection_href(base_url, &collection_id);
    let uri = format!("{}/items", collection_href);

    let graph = state.graph().await;
    let collection_uri = find_collection(graph.as_ref(), &collection_id)?;
    let collection = collection_model(graph.as_ref(), &collection_uri, base_url);

    let mut members = list_members(graph.as_ref(), &collection_uri);
    if let Some((kind, _)) = &bbox {
        members = filter_members(graph.as_ref(), members, kind);
    }

    let window = page_request.window(members.len());
    let page = window.slice(&members);
    info!(
        collection_id = %collection_id,
        total = window.total_count,
        returned = page.len(),
        profile = negotiated.profile.token,
        media_type = %negotiated.media_type,
        "Items request"
    );

    let mut links = vec![
        Link::new(uri.clone(), RelType::Self_)
            .with_type(MediaType::GeoJson)
            .with_title("This document"),
        Link::new(collection_href, RelType::Collection)
            .with_type(MediaType::Json)
            .with_title(collection.title.clone()),
    ];
    links.extend(window.links(&uri));

    let body = match (negotiated.profile.token, negotiated.media_type) {
        ("alt", _) => return alternates(endpoint, &negotiated, &uri, &links),
        ("oai", MediaType::Html) => {
            let summaries = feature_summaries(graph.as_ref(), page, &collection_id, base_url);
            let bbox = bbox.as_ref().map(|(kind, value)| (kind, *value));
            html::items(&collection, &summaries, bbox, &links)
        }
        ("oai", MediaType::OpenApiJson) => openapi(base_url)?,
        ("oai", MediaType::Json | MediaType::GeoJson) => {
            let summaries = feature_summaries(graph.as_ref(), page, &collection_id, base_url);
            ogc_json::items(&links, &collection, &summaries)?
        }
        ("geosp", media_type) if media_type.is_rdf() => {
            let models: Vec<ResourceModel> = page
                .iter()
                .filter_map(|member| match member {
                    Subject::NamedNode(n) => Some(feature_model(
                        graph.as_ref(),
                        n.as_str(),
                        &collection_id,
                        base_url,
                    )),
                    _ => None,
                })
                .collect();
            let triples = rdf::items_page_graph(&uri, &window, &collection, &models);
            rdf::render(&triples, media_type)?
        }
        _ => return Err(unsupported(&negotiated)),
    };

    Ok(respond(endpoint, &negotiated, &uri, &links, body))
}

/// GET /collections/{collection_id}/items/{item_id} - One feature
pub async fn item_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((collection_id, item_id)): Path<(String, String)>,
    Query(query): Query<QueryPairs>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let endpoint = &endpoints::ITEM;
    let negotiated = negotiate_request(endpoint, &query, &headers)?;
    let base_url = state.base_url();
    let uri = item_href(base_url, &collection_id, &item_id);

    let graph = state.graph().await;
    let collection_uri = find_collection(graph.as_ref(), &collection_id)?;
    let feature_uri = find_feature(graph.as_ref(), &collection_uri, &collection_id, &item_id)?;
    let model = feature_model(graph.as_ref(), &feature_uri, &collection_id, base_url);
    info!(
        collection_id = %collection_id,
        item_id = %item_id,
        geometries = model.geometries.len(),
        profile = negotiated.profile.token,
        media_type = %negotiated.media_type,
        "Item request"
    );

    let body = match (negotiated.profile.token, negotiated.media_type) {
        ("alt", _) => return alternates(endpoint, &negotiated, &uri, &model.links),
        ("oai", MediaType::Html) => {
            let geometry = geojson::feature_geometry(&model).ok();
            html::feature(&model, geometry.as_ref())
        }
        ("oai", MediaType::OpenApiJson) => openapi(base_url)?,
        ("oai", MediaType::GeoJson) => geojson::feature(&model)?,
        ("oai", MediaType::Json) => ogc_json::resource(&model)?,
        ("geosp", media_type) if media_type.is_rdf() => {
            rdf::render(&rdf::feature_graph(&model), media_type)?
        }
        _ => return Err(unsupported(&negotiated)),
    };

    Ok(respond(endpoint, &negotiated, &uri, &model.links, body))
}
