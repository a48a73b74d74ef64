//! Router-level tests against the sample flood dataset.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use features_api::build_router;
use features_api::config::ApiConfig;
use features_api::content_negotiation::{representation_href, representations};
use features_api::state::AppState;
use features_graph::{load_str, MemoryStore, RdfFormat};
use features_protocol::{endpoints, Endpoint, MediaType};
use test_utils::{bbox, collections, features, write_fixture, BASE_URL, DATASET_TITLE, FEATURES_TTL};

fn app() -> Router {
    let store = load_str(FEATURES_TTL, RdfFormat::Turtle).unwrap();
    let state = AppState::with_store(ApiConfig::default(), store).unwrap();
    build_router(Arc::new(state))
}

async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn get_json(uri: &str) -> Value {
    let response = get(app(), uri).await;
    assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
    serde_json::from_str(&body_text(response).await).unwrap()
}

fn content_type(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn rels(document: &Value) -> Vec<String> {
    document["links"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["rel"].as_str().unwrap().to_string())
        .collect()
}

fn ids(document: &Value) -> Vec<String> {
    document["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap().to_string())
        .collect()
}

fn catchment_items(query: &str) -> String {
    format!("/collections/{}/items?{}", collections::CATCHMENTS, query)
}

// ============================================================================
// Every declared representation
// ============================================================================

async fn assert_all_representations(endpoint: &Endpoint, path: &str) {
    let resource_uri = format!("{}{}", BASE_URL, path);
    for (profile, media_type) in representations(endpoint) {
        let href = representation_href(&resource_uri, profile, media_type);
        let uri = href.trim_start_matches(BASE_URL);
        let response = get(app(), uri).await;

        if endpoint.name == endpoints::COLLECTION.name && profile.token == "mem" {
            assert_eq!(response.status(), StatusCode::SEE_OTHER, "GET {}", uri);
            continue;
        }

        assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
        assert_eq!(content_type(&response), media_type.as_str(), "GET {}", uri);
        let profile_header = response
            .headers()
            .get("content-profile")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert_eq!(profile_header, format!("<{}>", profile.uri), "GET {}", uri);
        assert!(!body_text(response).await.is_empty(), "GET {}", uri);
    }
}

#[tokio::test]
async fn test_landing_representations() {
    assert_all_representations(&endpoints::LANDING, "/").await;
}

#[tokio::test]
async fn test_conformance_representations() {
    assert_all_representations(&endpoints::CONFORMANCE, "/conformance").await;
}

#[tokio::test]
async fn test_collections_representations() {
    assert_all_representations(&endpoints::COLLECTIONS, "/collections").await;
}

#[tokio::test]
async fn test_collection_representations() {
    let path = format!("/collections/{}", collections::CATCHMENTS);
    assert_all_representations(&endpoints::COLLECTION, &path).await;
}

#[tokio::test]
async fn test_items_representations() {
    let path = format!("/collections/{}/items", collections::CATCHMENTS);
    assert_all_representations(&endpoints::ITEMS, &path).await;
}

#[tokio::test]
async fn test_item_representations() {
    let path = format!(
        "/collections/{}/items/{}",
        collections::CATCHMENTS,
        features::C1
    );
    assert_all_representations(&endpoints::ITEM, &path).await;
}

// ============================================================================
// Negotiation
// ============================================================================

#[tokio::test]
async fn test_default_is_html() {
    let response = get(app(), "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "text/html");
    assert!(body_text(response).await.contains(DATASET_TITLE));
}

#[tokio::test]
async fn test_accept_header_selects_media_type() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/collections")
                .header(header::ACCEPT, "application/json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(content_type(&response), "application/json");
    let link = response
        .headers()
        .get(header::LINK)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(link.contains("rel=\"alternate\""));
    assert!(link.contains("rel=\"profile\""));
}

#[tokio::test]
async fn test_accept_profile_header_selects_profile() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/")
                .header("accept-profile", "<https://www.w3.org/TR/vocab-dcat/>")
                .header(header::ACCEPT, "text/turtle")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "text/turtle");
    assert!(body_text(response).await.contains(test_utils::DATASET_URI));
}

#[tokio::test]
async fn test_unknown_parameter_is_rejected() {
    let response = get(app(), "/collections?foo=bar").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("foo"));
}

#[tokio::test]
async fn test_unknown_profile_is_rejected() {
    let response = get(app(), "/conformance?_profile=nope").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("nope"));
}

#[tokio::test]
async fn test_mem_profile_redirects_to_items() {
    let response = get(app(), "/collections/catchments?_profile=mem").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "http://localhost:8080/collections/catchments/items"
    );
}

#[tokio::test]
async fn test_alt_profile_lists_representations() {
    let document = get_json("/collections/catchments/items?_profile=alt&_mediatype=json").await;
    let listed = document.to_string();
    assert!(listed.contains("http://www.opengis.net/ont/geosparql"));
    assert!(listed.contains(MediaType::Turtle.as_str()));
}

// ============================================================================
// Collections and items
// ============================================================================

#[tokio::test]
async fn test_collections_list() {
    let document = get_json("/collections?_mediatype=json").await;
    let ids: Vec<&str> = document["collections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![collections::CATCHMENTS, collections::GAUGES]);
}

#[tokio::test]
async fn test_items_are_paged() {
    let document = get_json(&catchment_items("_mediatype=json&per_page=2")).await;
    assert_eq!(ids(&document), vec![features::C1, features::C2]);
    assert!(rels(&document).contains(&"next".to_string()));

    let document = get_json(&catchment_items("_mediatype=json&per_page=2&page=2")).await;
    assert_eq!(ids(&document), vec![features::C3]);
    assert!(rels(&document).contains(&"prev".to_string()));
    assert!(!rels(&document).contains(&"next".to_string()));
}

#[tokio::test]
async fn test_limit_suppresses_page_links() {
    let document = get_json(&catchment_items("_mediatype=json&limit=1")).await;
    assert_eq!(ids(&document), vec![features::C1]);
    let rels = rels(&document);
    assert!(!rels.contains(&"next".to_string()));
    assert!(!rels.contains(&"last".to_string()));
}

#[tokio::test]
async fn test_page_far_beyond_the_end_is_empty() {
    let document = get_json(&catchment_items(
        "_mediatype=json&per_page=4&page=9223372036854775808",
    ))
    .await;
    assert!(ids(&document).is_empty());
    let rels = rels(&document);
    assert!(rels.contains(&"prev".to_string()));
    assert!(!rels.contains(&"next".to_string()));
}

#[tokio::test]
async fn test_invalid_page_is_rejected() {
    let response = get(app(), &catchment_items("page=0")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_untitled_feature_falls_back_to_identifier() {
    let document = get_json(&catchment_items("_mediatype=json")).await;
    let titles: Vec<&str> = document["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["title"].as_str().unwrap())
        .collect();
    assert!(titles.contains(&"Feature C2"));
    assert!(titles.contains(&"Catchment C3"));
}

#[tokio::test]
async fn test_bbox_filters_items() {
    let document = get_json(&catchment_items(&format!("_mediatype=json&bbox={}", bbox::CANBERRA))).await;
    assert_eq!(ids(&document), vec![features::C1]);

    let document = get_json(&catchment_items(&format!("_mediatype=json&bbox={}", bbox::OCEAN))).await;
    assert!(ids(&document).is_empty());

    let document = get_json(&catchment_items(&format!("_mediatype=json&bbox={}", bbox::CELL_R12))).await;
    assert_eq!(ids(&document), vec![features::C1]);

    // a cell pair is accepted but does not filter
    let document = get_json(&catchment_items(&format!("_mediatype=json&bbox={}", bbox::CELL_PAIR))).await;
    assert_eq!(ids(&document).len(), 3);
}

const RIVERS_TTL: &str = r#"
@prefix dcat: <http://www.w3.org/ns/dcat#> .
@prefix dcterms: <http://purl.org/dc/terms/> .
@prefix geo: <http://www.opengis.net/ont/geosparql#> .
@prefix ogcapi: <https://data.surroundaustralia.com/def/ogcldapi/> .

<https://example.com/dataset/rivers> a dcat:Dataset ;
    dcterms:identifier "rivers" ;
    dcterms:title "Rivers" .

<https://example.com/collection/reaches> a ogcapi:FeatureCollection ;
    dcterms:identifier "river reaches" ;
    dcterms:isPartOf <https://example.com/dataset/rivers> .

<https://example.com/feature/R1> a geo:Feature ;
    dcterms:isPartOf <https://example.com/collection/reaches> ;
    geo:hasGeometry [ geo:asWKT "POINT (149.1 -35.2)"^^geo:wktLiteral ] .

<https://example.com/feature/R2> a geo:Feature ;
    dcterms:identifier "reach 2/b" ;
    dcterms:isPartOf <https://example.com/collection/reaches> ;
    geo:hasGeometry [ geo:asWKT "POINT (149.2 -35.3)"^^geo:wktLiteral ] .
"#;

fn rivers_app() -> Router {
    let store = load_str(RIVERS_TTL, RdfFormat::Turtle).unwrap();
    let state = AppState::with_store(ApiConfig::default(), store).unwrap();
    build_router(Arc::new(state))
}

#[tokio::test]
async fn test_listed_item_links_resolve() {
    let response = get(rivers_app(), "/collections/river%20reaches/items?_mediatype=json").await;
    assert_eq!(response.status(), StatusCode::OK);
    let document: Value = serde_json::from_str(&body_text(response).await).unwrap();

    let links: Vec<String> = document["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["link"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        links,
        vec![
            format!("{}/collections/river%20reaches/items/R1", BASE_URL),
            format!("{}/collections/river%20reaches/items/reach%202%2Fb", BASE_URL),
        ]
    );

    for link in &links {
        let path = format!("{}?_mediatype=geojson", link.trim_start_matches(BASE_URL));
        let response = get(rivers_app(), &path).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {}", path);
        let feature: Value = serde_json::from_str(&body_text(response).await).unwrap();
        let self_href = feature["links"][0]["href"].as_str().unwrap();
        assert_eq!(self_href, link.as_str());
    }
}

#[tokio::test]
async fn test_collection_without_identifier_is_addressable() {
    let ttl = RIVERS_TTL.replace("dcterms:identifier \"river reaches\" ;", "");
    let store = load_str(&ttl, RdfFormat::Turtle).unwrap();
    let state = AppState::with_store(ApiConfig::default(), store).unwrap();
    let response = get(build_router(Arc::new(state)), "/collections/reaches/items/R1?_mediatype=json").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_bbox_is_rejected() {
    let response = get(app(), &catchment_items("bbox=1,2,3")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_geosp_items_page_graph() {
    let response = get(app(), &catchment_items("_profile=geosp&_mediatype=text/turtle")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("http://www.w3.org/ns/ldp#Page"));
    assert!(body.contains(features::C1_URI));
}

#[tokio::test]
async fn test_unknown_collection_and_feature() {
    let response = get(app(), "/collections/nope").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(app(), "/collections/catchments/items/G1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Single feature
// ============================================================================

#[tokio::test]
async fn test_feature_geojson() {
    let document = get_json("/collections/catchments/items/C1?_mediatype=geojson").await;
    assert_eq!(document["type"], "Feature");
    assert_eq!(document["id"], features::C1_URI);
    assert_eq!(document["geometry"]["type"], "Polygon");
}

#[tokio::test]
async fn test_feature_without_renderable_geometry() {
    let response = get(app(), "/collections/catchments/items/C3?_mediatype=geojson").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // other representations still work
    let response = get(app(), "/collections/catchments/items/C3").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_gauge_feature_json() {
    let document = get_json(&format!(
        "/collections/{}/items/{}?_mediatype=json",
        collections::GAUGES,
        features::G2
    ))
    .await;
    assert_eq!(document["feature"]["identifier"], features::G2);
    assert!(rels(&document).contains(&"self".to_string()));
}

// ============================================================================
// SPARQL
// ============================================================================

#[tokio::test]
async fn test_sparql_form_and_description() {
    let response = get(app(), "/sparql").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("<form"));

    let response = get(app(), "/endpoint?_mediatype=text/turtle").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "text/turtle");
    assert!(body_text(response)
        .await
        .contains("http://www.w3.org/ns/sparql-service-description#Service"));
}

#[tokio::test]
async fn test_sparql_query_without_upstream() {
    let response = get(app(), "/sparql?query=SELECT%20*%20WHERE%20%7B%3Fs%20%3Fp%20%3Fo%7D").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_sparql_post_rejections() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/sparql")
                .header(header::CONTENT_TYPE, "text/plain")
                .body(Body::from("SELECT * WHERE { ?s ?p ?o }"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("application/sparql-query"));

    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/sparql")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("query=ASK"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("'query' parameter"));
}

// ============================================================================
// Operations
// ============================================================================

#[tokio::test]
async fn test_reload_and_readiness() {
    let dir = tempfile::tempdir().unwrap();
    let config = ApiConfig {
        data_file: write_fixture(dir.path(), "features.ttl", FEATURES_TTL),
        ..Default::default()
    };
    let state = Arc::new(AppState::with_store(config, MemoryStore::new()).unwrap());
    let app = build_router(state);

    let response = get(app.clone(), "/ready").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/reload")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let document: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert!(document["triples"].as_u64().unwrap() > 0);

    let response = get(app.clone(), "/ready").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, "/collections/catchments/items?_mediatype=json").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[test]
fn test_health() {
    let response = tokio_test::block_on(get(app(), "/health"));
    assert_eq!(response.status(), StatusCode::OK);
    let body = tokio_test::block_on(body_text(response));
    assert!(body.contains("\"ok\""));
}

#[tokio::test]
async fn test_openapi_document() {
    let document = get_json("/api").await;
    assert_eq!(document["servers"][0]["url"], BASE_URL);
    assert!(document["paths"]["/collections/{collectionId}/items"].is_object());
}
