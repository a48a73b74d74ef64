//! Protocol error types.

use thiserror::Error;

use crate::bbox::BBoxError;
use crate::geometry::GeometryError;
use crate::negotiation::Rejection;
use crate::pagination::PaginationError;

/// Errors raised while interpreting a request or shaping a response.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error(transparent)]
    Pagination(#[from] PaginationError),

    #[error(transparent)]
    BBox(#[from] BBoxError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The negotiated media type has no formatter for the chosen profile.
    #[error("The Media Type you requested cannot be serialized to: {0}")]
    UnsupportedMediaType(String),
}

impl ProtocolError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ProtocolError::Rejected(r) => r.status,
            ProtocolError::Pagination(_) => 400,
            ProtocolError::BBox(_) => 400,
            ProtocolError::Geometry(GeometryError::NoRenderableGeometry) => 400,
            ProtocolError::Geometry(GeometryError::NotWgs84(_)) => 400,
            ProtocolError::Geometry(_) => 500,
            ProtocolError::UnsupportedMediaType(_) => 400,
        }
    }
}
