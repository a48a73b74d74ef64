//! Profile and media-type negotiation.
//!
//! Resolution order for one request:
//! 1. Every query parameter key must be on the endpoint's allow-list.
//! 2. Profile: `_profile`/`_view` if given, else the first recognised entry
//!    of `Accept-Profile`, else the endpoint default. An unknown token is
//!    rejected.
//! 3. Media type: `_mediatype`/`_format` if it is one of the profile's media
//!    types, else the best `Accept` match within the profile's set, else the
//!    profile default. An unrecognisable media type string is rejected.
//! 4. Language is always [`DEFAULT_LANGUAGE`].
//!
//! Negotiation is a pure function of its inputs.

use thiserror::Error;

use crate::media_types::MediaType;
use crate::profiles::{Endpoint, Profile};
use crate::DEFAULT_LANGUAGE;

/// The resolved view and serialization for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Negotiated {
    pub profile: &'static Profile,
    pub media_type: MediaType,
    pub language: &'static str,
}

/// A request that cannot be served as asked.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{reason}")]
pub struct Rejection {
    /// HTTP status to answer with.
    pub status: u16,
    /// Plain-text explanation for the client.
    pub reason: String,
}

impl Rejection {
    pub fn bad_request(reason: impl Into<String>) -> Self {
        Self {
            status: 400,
            reason: reason.into(),
        }
    }
}

/// Resolve the profile, media type and language for a request.
pub fn negotiate(
    endpoint: &Endpoint,
    query: &[(String, String)],
    accept: Option<&str>,
    accept_profile: Option<&str>,
) -> Result<Negotiated, Rejection> {
    if let Some((key, _)) = query.iter().find(|(k, _)| !endpoint.allows(k)) {
        return Err(Rejection::bad_request(format!(
            "The parameter {} you supplied is not allowed. For this API endpoint, you may only use one of '{}'",
            key,
            endpoint.allowed_params.join("', '")
        )));
    }

    let profile = resolve_profile(endpoint, query, accept_profile)?;
    let media_type = resolve_media_type(profile, query, accept)?;

    Ok(Negotiated {
        profile,
        media_type,
        language: DEFAULT_LANGUAGE,
    })
}

fn resolve_profile(
    endpoint: &Endpoint,
    query: &[(String, String)],
    accept_profile: Option<&str>,
) -> Result<&'static Profile, Rejection> {
    let profiles = &endpoint.profiles;

    if let Some(token) = query_value(query, &["_profile", "_view"]) {
        return profiles.get(token).ok_or_else(|| {
            Rejection::bad_request(format!(
                "The profile token {} you supplied is not available for this resource. Available profiles are: {}",
                token,
                profiles.all().map(|p| p.token).collect::<Vec<_>>().join(", ")
            ))
        });
    }

    if let Some(header) = accept_profile {
        for (entry, _) in parse_weighted(header) {
            if let Some(profile) = profiles.by_uri(entry).or_else(|| profiles.get(entry)) {
                return Ok(profile);
            }
        }
    }

    Ok(profiles.default_profile())
}

fn resolve_media_type(
    profile: &Profile,
    query: &[(String, String)],
    accept: Option<&str>,
) -> Result<MediaType, Rejection> {
    if let Some(value) = query_value(query, &["_mediatype", "_format"]) {
        match MediaType::from_query_param(value) {
            Some(media_type) if profile.supports(media_type) => return Ok(media_type),
            // Known but outside this profile: fall through to Accept
            Some(_) => {}
            None => {
                return Err(Rejection::bad_request(format!(
                    "The media type {} you supplied is not recognised",
                    value
                )))
            }
        }
    }

    Ok(best_match(
        profile.media_types,
        accept,
        profile.default_media_type,
    ))
}

/// Pick the highest-quality `Accept` entry satisfiable from `available`.
///
/// Entries of equal quality keep their header order; wildcard ranges resolve
/// to the first available type they cover. Falls back to `default` when the
/// header is absent or nothing matches.
pub fn best_match(available: &[MediaType], accept: Option<&str>, default: MediaType) -> MediaType {
    let Some(accept) = accept else {
        return default;
    };

    for (range, _) in parse_weighted(accept) {
        let is_wildcard = range == "*/*" || range == "*";
        if is_wildcard && available.contains(&default) {
            return default;
        }
        if let Some(found) = available.iter().find(|m| m.matches_range(range)) {
            return *found;
        }
    }

    default
}

/// Split a weighted header (`Accept`, `Accept-Profile`) into entries sorted
/// by descending quality. Entries with `q=0` are dropped.
pub fn parse_weighted(header: &str) -> Vec<(&str, f32)> {
    let mut entries: Vec<(&str, f32)> = header
        .split(',')
        .filter_map(|s| {
            let mut parts = s.split(';');
            let value = parts.next()?.trim();
            if value.is_empty() {
                return None;
            }

            let quality = parts
                .find_map(|p| {
                    p.trim()
                        .strip_prefix("q=")
                        .and_then(|q| q.trim().parse::<f32>().ok())
                })
                .unwrap_or(1.0);

            Some((value, quality))
        })
        .filter(|(_, q)| *q > 0.0)
        .collect();

    // sort_by is stable, so equal qualities keep header order
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    entries
}

/// The first non-empty value among `keys`, in query order.
fn query_value<'a>(query: &'a [(String, String)], keys: &[&str]) -> Option<&'a str> {
    query
        .iter()
        .find(|(k, v)| keys.contains(&k.as_str()) && !v.trim().is_empty())
        .map(|(_, v)| v.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::endpoints;

    fn q(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_without_hints() {
        let n = negotiate(&endpoints::ITEM, &[], None, None).unwrap();
        assert_eq!(n.profile.token, "oai");
        assert_eq!(n.media_type, MediaType::Html);
        assert_eq!(n.language, "en");
    }

    #[test]
    fn test_unknown_parameter_rejected() {
        let err = negotiate(&endpoints::ITEM, &q(&[("colour", "red")]), None, None).unwrap_err();
        assert_eq!(err.status, 400);
        assert!(err
            .reason
            .starts_with("The parameter colour you supplied is not allowed"));
    }

    #[test]
    fn test_first_unknown_parameter_named() {
        let query = q(&[("_profile", "oai"), ("foo", "1"), ("bar", "2")]);
        let err = negotiate(&endpoints::LANDING, &query, None, None).unwrap_err();
        assert!(err.reason.contains("foo"));
        assert!(!err.reason.contains("bar"));
    }

    #[test]
    fn test_profile_param_selects_profile_default() {
        let n = negotiate(&endpoints::ITEM, &q(&[("_profile", "geosp")]), None, None).unwrap();
        assert_eq!(n.profile.token, "geosp");
        assert_eq!(n.media_type, MediaType::Turtle);
    }

    #[test]
    fn test_view_alias() {
        let n = negotiate(&endpoints::LANDING, &q(&[("_view", "dcat")]), None, None).unwrap();
        assert_eq!(n.profile.token, "dcat");
    }

    #[test]
    fn test_unknown_profile_rejected() {
        let err = negotiate(&endpoints::ITEM, &q(&[("_profile", "mem")]), None, None).unwrap_err();
        assert_eq!(err.status, 400);
        assert!(err.reason.contains("mem"));
    }

    #[test]
    fn test_empty_profile_param_is_absent() {
        let n = negotiate(&endpoints::ITEM, &q(&[("_profile", "")]), None, None).unwrap();
        assert_eq!(n.profile.token, "oai");
    }

    #[test]
    fn test_mediatype_param_wins_over_accept() {
        let query = q(&[("_mediatype", "application/geo+json")]);
        let n = negotiate(&endpoints::ITEM, &query, Some("text/html"), None).unwrap();
        assert_eq!(n.media_type, MediaType::GeoJson);
    }

    #[test]
    fn test_mediatype_outside_profile_falls_through() {
        let query = q(&[("_mediatype", "text/turtle")]);
        let n = negotiate(&endpoints::ITEM, &query, Some("application/json"), None).unwrap();
        assert_eq!(n.profile.token, "oai");
        assert_eq!(n.media_type, MediaType::Json);
    }

    #[test]
    fn test_unrecognised_mediatype_rejected() {
        let query = q(&[("_mediatype", "image/png")]);
        let err = negotiate(&endpoints::ITEM, &query, None, None).unwrap_err();
        assert!(err.reason.contains("image/png"));
    }

    #[test]
    fn test_accept_quality_ordering() {
        let accept = "text/html;q=0.5, application/geo+json;q=0.9, application/json";
        let n = negotiate(&endpoints::ITEM, &[], Some(accept), None).unwrap();
        assert_eq!(n.media_type, MediaType::Json);
    }

    #[test]
    fn test_accept_restricted_to_profile() {
        let query = q(&[("_profile", "geosp")]);
        let n = negotiate(&endpoints::ITEM, &query, Some("text/html, application/ld+json;q=0.8"), None)
            .unwrap();
        assert_eq!(n.media_type, MediaType::JsonLd);
    }

    #[test]
    fn test_accept_profile_header() {
        let n = negotiate(
            &endpoints::ITEMS,
            &[],
            None,
            Some("<http://www.opengis.net/ont/geosparql>"),
        )
        .unwrap();
        assert_eq!(n.profile.token, "geosp");
    }

    #[test]
    fn test_profile_param_beats_accept_profile() {
        let n = negotiate(
            &endpoints::ITEMS,
            &q(&[("_profile", "oai")]),
            None,
            Some("<http://www.opengis.net/ont/geosparql>"),
        )
        .unwrap();
        assert_eq!(n.profile.token, "oai");
    }

    #[test]
    fn test_best_match_wildcards() {
        let available = [MediaType::Turtle, MediaType::JsonLd];
        assert_eq!(
            best_match(&available, Some("*/*"), MediaType::Turtle),
            MediaType::Turtle
        );
        assert_eq!(
            best_match(&available, Some("application/*"), MediaType::Turtle),
            MediaType::JsonLd
        );
        assert_eq!(
            best_match(&available, Some("image/png"), MediaType::Turtle),
            MediaType::Turtle
        );
    }

    #[test]
    fn test_parse_weighted_drops_zero_quality() {
        let parsed = parse_weighted("text/html;q=0, application/json");
        assert_eq!(parsed, vec![("application/json", 1.0)]);
    }
}
