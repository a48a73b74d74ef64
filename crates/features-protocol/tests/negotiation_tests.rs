//! Negotiation tests across every endpoint and profile.

use features_protocol::{endpoints, negotiate, MediaType, PageRequest};

fn q(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ============================================================================
// Every declared (profile, media type) pair
// ============================================================================

#[test]
fn test_every_declared_pair_is_selectable() {
    for endpoint in endpoints::ALL {
        for profile in endpoint.profiles.all() {
            for media_type in profile.media_types {
                let query = q(&[("_profile", profile.token), ("_mediatype", media_type.as_str())]);
                let n = negotiate(endpoint, &query, None, None).unwrap_or_else(|e| {
                    panic!(
                        "{} {} {}: {}",
                        endpoint.name, profile.token, media_type, e
                    )
                });
                assert_eq!(n.profile.token, profile.token);
                assert_eq!(n.media_type, *media_type);
            }
        }
    }
}

#[test]
fn test_format_alias_parameter() {
    let query = q(&[("_profile", "geosp"), ("_format", "ttl")]);
    let n = negotiate(&endpoints::ITEM, &query, None, None).unwrap();
    assert_eq!(n.media_type, MediaType::Turtle);
}

// ============================================================================
// Allow-lists
// ============================================================================

#[test]
fn test_unknown_key_named_on_every_endpoint() {
    for endpoint in endpoints::ALL {
        let query = q(&[("not_a_param", "1")]);
        let err = negotiate(endpoint, &query, None, None).unwrap_err();
        assert_eq!(err.status, 400);
        assert!(err.reason.contains("not_a_param"), "{}", endpoint.name);
    }
}

#[test]
fn test_paging_params_rejected_on_single_resources() {
    for endpoint in [&endpoints::ITEM, &endpoints::COLLECTION, &endpoints::CONFORMANCE] {
        let err = negotiate(endpoint, &q(&[("page", "2")]), None, None).unwrap_err();
        assert!(err.reason.contains("page"));
    }
}

#[test]
fn test_paging_params_accepted_on_lists() {
    let query = q(&[("page", "2"), ("per_page", "5"), ("bbox", "R1")]);
    assert!(negotiate(&endpoints::ITEMS, &query, None, None).is_ok());
    let req = PageRequest::from_query(&query, 100).unwrap();
    assert_eq!(req.page, 2);
    assert_eq!(req.per_page, 5);
}

// ============================================================================
// Accept header
// ============================================================================

#[test]
fn test_browser_accept_header_gets_html() {
    let accept = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
    let n = negotiate(&endpoints::COLLECTIONS, &[], Some(accept), None).unwrap();
    assert_eq!(n.media_type, MediaType::Html);
}

#[test]
fn test_unsatisfiable_accept_falls_back_to_default() {
    let n = negotiate(&endpoints::ITEM, &[], Some("image/png"), None).unwrap();
    assert_eq!(n.media_type, MediaType::Html);
}

#[test]
fn test_rdf_accept_on_geosp() {
    let query = q(&[("_profile", "geosp")]);
    let n = negotiate(&endpoints::ITEMS, &query, Some("application/n-triples"), None).unwrap();
    assert_eq!(n.media_type, MediaType::NTriples);
}

#[test]
fn test_alt_profile_json() {
    let query = q(&[("_profile", "alt")]);
    let n = negotiate(&endpoints::LANDING, &query, Some("application/json"), None).unwrap();
    assert_eq!(n.profile.token, "alt");
    assert_eq!(n.media_type, MediaType::Json);
}
