//! Profile and media-type negotiation at the HTTP boundary.
//!
//! Wraps the pure negotiation engine with header extraction and request
//! metrics, and assembles the negotiated response headers:
//! `Content-Type`, `Content-Profile` and a `Link` header carrying the
//! resource links, the chosen profile and every alternate representation.

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::Response,
};
use features_protocol::{links_header, negotiate, Endpoint, Link, MediaType, Negotiated, Profile, RelType};
use metrics::counter;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use tracing::debug;

use crate::error::ApiError;

pub const ACCEPT_PROFILE: HeaderName = HeaderName::from_static("accept-profile");
pub const CONTENT_PROFILE: HeaderName = HeaderName::from_static("content-profile");

/// Resolve the profile and media type for a request to `endpoint`.
pub fn negotiate_request(
    endpoint: &Endpoint,
    query: &[(String, String)],
    headers: &HeaderMap,
) -> Result<Negotiated, ApiError> {
    counter!("features_requests_total", "endpoint" => endpoint.name).increment(1);

    let accept = headers.get(header::ACCEPT).and_then(|v| v.to_str().ok());
    let accept_profile = headers.get(&ACCEPT_PROFILE).and_then(|v| v.to_str().ok());

    match negotiate(endpoint, query, accept, accept_profile) {
        Ok(negotiated) => {
            debug!(
                endpoint = endpoint.name,
                profile = negotiated.profile.token,
                media_type = %negotiated.media_type,
                "Negotiated representation"
            );
            Ok(negotiated)
        }
        Err(rejection) => {
            counter!("features_rejections_total", "endpoint" => endpoint.name).increment(1);
            Err(rejection.into())
        }
    }
}

/// The first non-empty value of a query parameter.
pub fn query_value<'a>(query: &'a [(String, String)], key: &str) -> Option<&'a str> {
    query
        .iter()
        .find(|(k, v)| k == key && !v.trim().is_empty())
        .map(|(_, v)| v.trim())
}

/// Every (profile, media type) pair an endpoint can serve, in declaration order.
pub fn representations(endpoint: &Endpoint) -> Vec<(&'static Profile, MediaType)> {
    endpoint
        .profiles
        .all()
        .flat_map(|p| p.media_types.iter().map(move |m| (p, *m)))
        .collect()
}

/// Address of one representation of a resource.
pub fn representation_href(resource_uri: &str, profile: &Profile, media_type: MediaType) -> String {
    format!(
        "{}?_profile={}&_mediatype={}",
        resource_uri,
        profile.token,
        utf8_percent_encode(media_type.as_str(), NON_ALPHANUMERIC)
    )
}

/// `rel="alternate"` links for every representation other than the negotiated one.
pub fn alternate_links(endpoint: &Endpoint, negotiated: &Negotiated, resource_uri: &str) -> Vec<Link> {
    representations(endpoint)
        .into_iter()
        .filter(|(p, m)| !(*p == negotiated.profile && *m == negotiated.media_type))
        .map(|(p, m)| {
            Link::new(representation_href(resource_uri, p, m), RelType::Alternate)
                .with_type(m)
                .with_title(p.label)
        })
        .collect()
}

/// Build a 200 response in the negotiated representation.
pub fn respond(
    endpoint: &Endpoint,
    negotiated: &Negotiated,
    resource_uri: &str,
    links: &[Link],
    body: impl Into<Body>,
) -> Response {
    let mut header_links = links.to_vec();
    header_links.push(Link::new(negotiated.profile.uri, RelType::Profile));
    header_links.extend(alternate_links(endpoint, negotiated, resource_uri));

    let mut response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, negotiated.media_type.as_str())
        .header(header::CONTENT_LANGUAGE, negotiated.language)
        .body(body.into())
        .unwrap();

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&format!("<{}>", negotiated.profile.uri)) {
        headers.insert(CONTENT_PROFILE, value);
    }
    // titles taken from the graph may not be valid header text
    match HeaderValue::from_str(&links_header(&header_links)) {
        Ok(value) => {
            headers.insert(header::LINK, value);
        }
        Err(_) => debug!(resource = resource_uri, "Link header omitted"),
    }

    response
}

/// A 303 redirect, used where a profile is served by another resource.
pub fn see_other(location: &str) -> Response {
    Response::builder()
        .status(StatusCode::SEE_OTHER)
        .header(header::LOCATION, location)
        .body(Body::empty())
        .unwrap()
}
