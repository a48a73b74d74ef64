//! Service errors and their HTTP responses.
//!
//! Every error is answered with a plain-text body. Client mistakes are 400;
//! graph, serialization and upstream failures are 500.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use features_graph::{SerializeError, StoreError};
use features_protocol::{BBoxError, GeometryError, PaginationError, ProtocolError, Rejection};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("You have entered an unknown Collection ID")]
    UnknownCollection(String),

    #[error("The Feature you have entered the ID for is not part of the Collection you entered the ID for")]
    UnknownFeature {
        collection_id: String,
        item_id: String,
    },

    #[error("The Media Type you requested cannot be serialized to: {0}")]
    UnsupportedMediaType(String),

    /// A malformed `/sparql` request; the message is fixed per case.
    #[error("{0}")]
    BadSparqlRequest(&'static str),

    #[error("Input error for query {query}.\n\nError message: {message}")]
    SparqlInput { query: String, message: String },

    #[error("No SPARQL endpoint is configured for this API")]
    NoSparqlEndpoint,

    #[error("SPARQL endpoint error: {0}")]
    Upstream(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to serialize response: {0}")]
    Serialization(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

macro_rules! from_protocol {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ApiError {
                fn from(e: $ty) -> Self {
                    ApiError::Protocol(e.into())
                }
            }
        )*
    };
}

from_protocol!(Rejection, PaginationError, BBoxError, GeometryError);

impl From<SerializeError> for ApiError {
    fn from(e: SerializeError) -> Self {
        match e {
            SerializeError::UnsupportedMediaType(media_type) => {
                ApiError::UnsupportedMediaType(media_type)
            }
            other => ApiError::Serialization(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Serialization(e.to_string())
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Protocol(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::BAD_REQUEST)
            }
            ApiError::UnknownCollection(_)
            | ApiError::UnknownFeature { .. }
            | ApiError::UnsupportedMediaType(_)
            | ApiError::BadSparqlRequest(_)
            | ApiError::SparqlInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::NoSparqlEndpoint
            | ApiError::Upstream(_)
            | ApiError::Store(_)
            | ApiError::Serialization(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        Response::builder()
            .status(status)
            .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(self.to_string().into())
            .unwrap()
    }
}
