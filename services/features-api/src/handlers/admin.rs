//! Administrative handlers.

use axum::{extract::Extension, Json};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub status: String,
    pub triples: usize,
}

/// POST /reload - Re-read the data file and swap the graph
///
/// Requests already running keep the graph they started with.
pub async fn reload_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<ReloadResponse>, ApiError> {
    info!(data_file = %state.config.data_file.display(), "Reload requested");

    let triples = state.reload().await.map_err(|e| {
        error!(error = %e, "Reload failed");
        ApiError::Internal(e)
    })?;

    Ok(Json(ReloadResponse {
        status: "reloaded".to_string(),
        triples,
    }))
}
