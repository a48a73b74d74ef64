//! SPARQL passthrough.
//!
//! Without a query, `GET /sparql` answers a query form (HTML) or the
//! service description (RDF). Queries are forwarded to the configured
//! upstream endpoint.

use axum::{
    body::Body,
    extract::{Extension, Form, FromRequest, Query, Request},
    http::{header, HeaderMap, StatusCode},
    response::Response,
};
use features_protocol::{best_match, endpoints, MediaType};
use std::sync::Arc;
use tracing::{debug, info};

use super::{alternates, QueryPairs};
use crate::content_negotiation::{negotiate_request, query_value, respond};
use crate::error::ApiError;
use crate::formatters::{html, rdf};
use crate::sparql_client::is_construct;
use crate::state::AppState;

const MISSING_FORM_QUERY: &str = "Your POST request to the SPARQL endpoint must contain a 'query' parameter if form posting is used.";

const UNSUPPORTED_POST_CONTENT_TYPE: &str = "Your POST request to this SPARQL endpoint must either the 'application/x-www-form-urlencoded' or'application/sparql-query' ContentType.";

const UNREADABLE_QUERY_BODY: &str = "The body of a SPARQL query POST must be UTF-8 text.";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const QUERY_CONTENT_TYPE: &str = "application/sparql-query";

/// Form queries shorter than this are treated as missing.
const MIN_QUERY_LENGTH: usize = 5;

/// Media types a query form request may ask for, HTML first.
fn page_media_types() -> Vec<MediaType> {
    std::iter::once(MediaType::Html)
        .chain(MediaType::RDF.iter().copied())
        .collect()
}

/// The media type asked for with `_mediatype`/`_format`, else by `Accept`.
fn requested(query: &QueryPairs, headers: &HeaderMap, available: &[MediaType], default: MediaType) -> MediaType {
    let explicit = query_value(query, "_mediatype")
        .or_else(|| query_value(query, "_format"))
        .and_then(MediaType::from_query_param)
        .filter(|m| available.contains(m));
    explicit.unwrap_or_else(|| {
        let accept = headers.get(header::ACCEPT).and_then(|v| v.to_str().ok());
        best_match(available, accept, default)
    })
}

/// GET /sparql - Query form, service description or query results
pub async fn sparql_get_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<QueryPairs>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let endpoint = &endpoints::SPARQL;
    let negotiated = negotiate_request(endpoint, &query, &headers)?;
    let uri = format!("{}/sparql", state.base_url());

    if negotiated.profile.token == "alt" {
        return alternates(endpoint, &negotiated, &uri, &[]);
    }

    let Some(sparql_query) = query_value(&query, "query") else {
        let media_type = requested(&query, &headers, &page_media_types(), MediaType::Html);
        let body = match media_type {
            MediaType::Html => html::sparql_form(&uri),
            rdf_type => rdf::render(&rdf::service_description(&uri), rdf_type)?,
        };
        let negotiated = features_protocol::Negotiated {
            media_type,
            ..negotiated
        };
        return Ok(respond(endpoint, &negotiated, &uri, &[], body));
    };

    if is_construct(sparql_query) {
        let media_type = requested(&query, &headers, MediaType::RDF, MediaType::Turtle);
        let mut response = forward(&state, sparql_query, media_type).await?;
        if let Ok(value) = format!(
            "attachment; filename=query_result.{}",
            media_type.file_extension()
        )
        .parse()
        {
            response.headers_mut().insert(header::CONTENT_DISPOSITION, value);
        }
        Ok(response)
    } else {
        let media_type = requested(
            &query,
            &headers,
            MediaType::SPARQL_RESULTS,
            MediaType::SparqlResultsJson,
        );
        forward(&state, sparql_query, media_type).await
    }
}

/// POST /sparql - Form post (`query=`) or direct post of the query text
pub async fn sparql_post_handler(
    Extension(state): Extension<Arc<AppState>>,
    request: Request,
) -> Result<Response, ApiError> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let accept = request
        .headers()
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let sparql_query = if content_type.starts_with(FORM_CONTENT_TYPE) {
        let Form(form): Form<QueryPairs> = Form::from_request(request, &())
            .await
            .map_err(|_| ApiError::BadSparqlRequest(MISSING_FORM_QUERY))?;
        form.into_iter()
            .find(|(k, _)| k == "query")
            .map(|(_, v)| v)
            .filter(|q| q.trim().len() >= MIN_QUERY_LENGTH)
            .ok_or(ApiError::BadSparqlRequest(MISSING_FORM_QUERY))?
    } else if content_type.starts_with(QUERY_CONTENT_TYPE) {
        String::from_request(request, &())
            .await
            .map_err(|_| ApiError::BadSparqlRequest(UNREADABLE_QUERY_BODY))?
    } else {
        return Err(ApiError::BadSparqlRequest(UNSUPPORTED_POST_CONTENT_TYPE));
    };

    let media_type = if is_construct(&sparql_query) {
        MediaType::Turtle
    } else {
        best_match(
            MediaType::SPARQL_RESULTS,
            accept.as_deref(),
            MediaType::SparqlResultsJson,
        )
    };
    forward(&state, &sparql_query, media_type).await
}

async fn forward(state: &AppState, query: &str, media_type: MediaType) -> Result<Response, ApiError> {
    let client = state.sparql.as_ref().ok_or(ApiError::NoSparqlEndpoint)?;
    info!(accept = %media_type, construct = is_construct(query), "SPARQL query");

    let result = client.query(query, media_type.as_str()).await?;
    let content_type = result
        .content_type
        .unwrap_or_else(|| media_type.as_str().to_string());
    debug!(content_type = %content_type, bytes = result.body.len(), "SPARQL response");

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(result.body))
        .unwrap())
}
