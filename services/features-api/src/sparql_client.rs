//! Client for the upstream SPARQL endpoint behind `/sparql`.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::ApiError;

/// A query result as returned by the upstream endpoint.
#[derive(Debug, Clone)]
pub struct SparqlResponse {
    pub content_type: Option<String>,
    pub body: String,
}

/// Forwards SPARQL queries to one endpoint using the direct POST binding.
#[derive(Debug, Clone)]
pub struct SparqlClient {
    client: reqwest::Client,
    endpoint: String,
    credentials: Option<(String, String)>,
}

impl SparqlClient {
    pub fn new(
        endpoint: impl Into<String>,
        credentials: Option<(String, String)>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            credentials,
        })
    }

    /// Build a client when an endpoint is configured.
    pub fn from_config(config: &ApiConfig) -> Result<Option<Self>, reqwest::Error> {
        let Some(endpoint) = &config.sparql_endpoint else {
            return Ok(None);
        };
        let credentials = match (&config.sparql_username, &config.sparql_password) {
            (Some(user), Some(password)) => Some((user.clone(), password.clone())),
            _ => None,
        };
        Self::new(
            endpoint.clone(),
            credentials,
            Duration::from_secs(config.sparql_timeout_secs),
        )
        .map(Some)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run `query`, asking for `accept`.
    pub async fn query(&self, query: &str, accept: &str) -> Result<SparqlResponse, ApiError> {
        debug!(endpoint = %self.endpoint, accept, "Forwarding SPARQL query");

        let mut request = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/sparql-query")
            .header(ACCEPT, accept)
            .body(query.to_string());
        if let Some((user, password)) = &self.credentials {
            request = request.basic_auth(user, Some(password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Upstream(e.to_string()))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Upstream(e.to_string()))?;

        if status.is_client_error() {
            return Err(ApiError::SparqlInput {
                query: query.to_string(),
                message: body,
            });
        }
        if !status.is_success() {
            return Err(ApiError::Upstream(format!("{}: {}", status, body)));
        }

        Ok(SparqlResponse { content_type, body })
    }
}

/// Whether a query is a CONSTRUCT query, which returns a graph.
pub fn is_construct(query: &str) -> bool {
    query.to_ascii_uppercase().contains("CONSTRUCT")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_endpoint_no_client() {
        assert!(SparqlClient::from_config(&ApiConfig::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_client_from_config() {
        let config = ApiConfig {
            sparql_endpoint: Some("http://localhost:3030/ds/query".to_string()),
            sparql_username: Some("reader".to_string()),
            ..Default::default()
        };
        let client = SparqlClient::from_config(&config).unwrap().unwrap();
        assert_eq!(client.endpoint(), "http://localhost:3030/ds/query");
        // a username without a password sends no credentials
        assert!(client.credentials.is_none());
    }

    #[test]
    fn test_is_construct() {
        assert!(is_construct("CONSTRUCT { ?s ?p ?o } WHERE { ?s ?p ?o }"));
        assert!(is_construct("prefix x: <y> construct { ?s ?p ?o } where { ?s ?p ?o }"));
        assert!(!is_construct("SELECT * WHERE { ?s ?p ?o }"));
    }
}
