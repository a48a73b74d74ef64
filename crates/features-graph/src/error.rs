//! Graph layer errors.

use thiserror::Error;

/// Errors loading RDF into a store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read RDF data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse RDF data: {0}")]
    Parse(String),

    #[error("Unsupported RDF file format: {0}")]
    UnsupportedFormat(String),
}

/// Errors writing a graph in an RDF syntax.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("Failed to serialize graph: {0}")]
    Serialize(String),

    #[error("The Media Type you requested cannot be serialized to: {0}")]
    UnsupportedMediaType(String),
}

impl From<std::io::Error> for SerializeError {
    fn from(e: std::io::Error) -> Self {
        SerializeError::Serialize(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
pub type SerializeResult<T> = Result<T, SerializeError>;
