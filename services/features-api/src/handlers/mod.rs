//! HTTP request handlers for the features API.

pub mod admin;
pub mod api;
pub mod collections;
pub mod conformance;
pub mod health;
pub mod items;
pub mod landing;
pub mod sparql;

use axum::response::Response;
use features_protocol::{Endpoint, Link, MediaType, Negotiated};

use crate::content_negotiation::respond;
use crate::error::ApiError;
use crate::formatters::{alt, rdf};

/// Query pairs in request order; repeated keys are kept.
pub type QueryPairs = Vec<(String, String)>;

/// The `alt` profile of any resource: the list of its representations.
pub(crate) fn alternates(
    endpoint: &Endpoint,
    negotiated: &Negotiated,
    resource_uri: &str,
    links: &[Link],
) -> Result<Response, ApiError> {
    let listing = alt::listing(endpoint, resource_uri);
    let body = match negotiated.media_type {
        MediaType::Html => alt::html(resource_uri, &listing),
        MediaType::Json => alt::json(resource_uri, &listing, links)?,
        media_type => rdf::render(&alt::graph(resource_uri, &listing), media_type)?,
    };
    Ok(respond(endpoint, negotiated, resource_uri, links, body))
}

/// A negotiated pair with no formatter.
pub(crate) fn unsupported(negotiated: &Negotiated) -> ApiError {
    ApiError::UnsupportedMediaType(negotiated.media_type.as_str().to_string())
}
