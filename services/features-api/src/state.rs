//! Application state for the features API.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

use features_graph::{load_file, MemoryStore, TripleSource};
use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::ApiConfig;
use crate::sparql_client::SparqlClient;

/// Shared application state.
pub struct AppState {
    /// Service configuration, fixed for the life of the process.
    pub config: ApiConfig,

    /// The backing graph. Replaced wholesale on reload.
    graph: RwLock<Arc<dyn TripleSource>>,

    /// Upstream client for `/sparql`, when an endpoint is configured.
    pub sparql: Option<SparqlClient>,

    /// Prometheus recorder handle rendered at `/metrics`.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Create state by loading the configured data file.
    pub async fn new(config: ApiConfig) -> Result<Self> {
        let store = read_store(&config).await?;
        Self::with_store(config, store)
    }

    /// Create state around an already-built store.
    pub fn with_store(config: ApiConfig, store: MemoryStore) -> Result<Self> {
        let sparql =
            SparqlClient::from_config(&config).context("Failed to build SPARQL client")?;

        Ok(Self {
            config,
            graph: RwLock::new(Arc::new(store)),
            sparql,
            prometheus: None,
        })
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }

    /// The current graph. Callers keep the handle they get for the whole
    /// request, so a concurrent reload never changes it underneath them.
    pub async fn graph(&self) -> Arc<dyn TripleSource> {
        Arc::clone(&*self.graph.read().await)
    }

    /// Re-read the data file and swap the graph handle.
    ///
    /// Returns the number of triples loaded.
    pub async fn reload(&self) -> Result<usize> {
        let store = read_store(&self.config).await?;
        let count = store.len();

        let mut graph = self.graph.write().await;
        *graph = Arc::new(store);

        tracing::info!(triples = count, "Graph reloaded");
        Ok(count)
    }

    /// The public base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }
}

async fn read_store(config: &ApiConfig) -> Result<MemoryStore> {
    let path = config.data_file.clone();
    let path_display = path.display().to_string();

    let store = tokio::task::spawn_blocking(move || load_file(&path))
        .await
        .context("Graph loading task failed")?
        .with_context(|| format!("Failed to load RDF data from {}", path_display))?;

    tracing::info!(path = %path_display, triples = store.len(), "Loaded RDF data");
    Ok(store)
}
