//! Service configuration loading and types.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Service configuration loaded from a YAML file, with environment overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Title shown when the graph has no dataset title.
    #[serde(default = "default_api_title")]
    pub api_title: String,

    /// Public base URL every link is built from.
    #[serde(default = "default_landing_page_url")]
    pub landing_page_url: String,

    /// The `dcat:Dataset` this API publishes. The first dataset in the graph
    /// is used when unset.
    #[serde(default)]
    pub dataset_uri: Option<String>,

    /// RDF file loaded into the store at startup and on reload.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Upstream endpoint for `/sparql` queries.
    #[serde(default)]
    pub sparql_endpoint: Option<String>,

    #[serde(default)]
    pub sparql_username: Option<String>,

    #[serde(default)]
    pub sparql_password: Option<String>,

    #[serde(default = "default_collections_per_page")]
    pub collections_per_page: usize,

    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,

    #[serde(default = "default_sparql_timeout_secs")]
    pub sparql_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_title: default_api_title(),
            landing_page_url: default_landing_page_url(),
            dataset_uri: None,
            data_file: default_data_file(),
            sparql_endpoint: None,
            sparql_username: None,
            sparql_password: None,
            collections_per_page: default_collections_per_page(),
            items_per_page: default_items_per_page(),
            sparql_timeout_secs: default_sparql_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from a YAML file, then apply environment overrides.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read: {:?}", path))?;
            Self::from_yaml_str(&content)
                .with_context(|| format!("Failed to parse: {:?}", path))?
        } else {
            tracing::warn!(
                "Config file {} does not exist, using defaults",
                path.display()
            );
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply overrides from a variable lookup such as the process environment.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("API_TITLE") {
            self.api_title = v;
        }
        if let Some(v) = lookup("LANDING_PAGE_URL") {
            self.landing_page_url = v;
        }
        if let Some(v) = lookup("DATASET_URI") {
            self.dataset_uri = Some(v);
        }
        if let Some(v) = lookup("DATA_FILE") {
            self.data_file = PathBuf::from(v);
        }
        if let Some(v) = lookup("SPARQL_ENDPOINT") {
            self.sparql_endpoint = Some(v);
        }
        if let Some(v) = lookup("SPARQL_USERNAME") {
            self.sparql_username = Some(v);
        }
        if let Some(v) = lookup("SPARQL_PASSWORD") {
            self.sparql_password = Some(v);
        }
    }

    /// The landing page URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.landing_page_url.trim_end_matches('/')
    }
}

fn default_api_title() -> String {
    "OGC API - Features".to_string()
}

fn default_landing_page_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_data_file() -> PathBuf {
    PathBuf::from("data/features.ttl")
}

fn default_collections_per_page() -> usize {
    20
}

fn default_items_per_page() -> usize {
    100
}

fn default_sparql_timeout_secs() -> u64 {
    60
}
