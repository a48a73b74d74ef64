//! OGC API - Features service library
//!
//! Serves feature collections held in an RDF graph, negotiating a profile
//! and a media type for every response.

pub mod config;
pub mod content_negotiation;
pub mod error;
pub mod formatters;
pub mod handlers;
pub mod models;
pub mod sparql_client;
pub mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the application router around shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Landing page
        .route("/", get(handlers::landing::landing_handler))
        // Conformance
        .route("/conformance", get(handlers::conformance::conformance_handler))
        // Collections
        .route("/collections", get(handlers::collections::collections_handler))
        .route(
            "/collections/:collection_id",
            get(handlers::collections::collection_handler),
        )
        // Features
        .route(
            "/collections/:collection_id/items",
            get(handlers::items::items_handler),
        )
        .route(
            "/collections/:collection_id/items/:item_id",
            get(handlers::items::item_handler),
        )
        // SPARQL
        .route(
            "/sparql",
            get(handlers::sparql::sparql_get_handler).post(handlers::sparql::sparql_post_handler),
        )
        .route(
            "/endpoint",
            get(handlers::sparql::sparql_get_handler).post(handlers::sparql::sparql_post_handler),
        )
        // OpenAPI
        .route("/api", get(handlers::api::api_handler))
        .route("/api.html", get(handlers::api::api_html_handler))
        // Admin
        .route("/reload", post(handlers::admin::reload_handler))
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/ready", get(handlers::health::ready_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
