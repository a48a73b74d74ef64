//! OGC API - Features protocol layer for linked-data backed services.
//!
//! This crate holds the I/O-free parts of the API: the profile catalogue and
//! the profile/media-type negotiation engine, pagination windows, `bbox`
//! classification and the geometry model with its WKT and GeoJSON encodings.
//!
//! # Example
//!
//! ```rust
//! use features_protocol::{negotiate, endpoints, MediaType};
//!
//! let query = vec![("_mediatype".to_string(), "application/json".to_string())];
//! let negotiated = negotiate(&endpoints::COLLECTIONS, &query, None, None).unwrap();
//! assert_eq!(negotiated.profile.token, "oai");
//! assert_eq!(negotiated.media_type, MediaType::Json);
//! ```

pub mod bbox;
pub mod errors;
pub mod geometry;
pub mod media_types;
pub mod negotiation;
pub mod pagination;
pub mod profiles;
pub mod responses;
pub mod types;

// Re-export commonly used types
pub use bbox::{classify, BBoxError, BBoxKind, BoundingBox};
pub use errors::ProtocolError;
pub use geometry::{
    clean_literal, envelope, parse_geojson, parse_wkt, rewind, Crs, GeoJsonGeometry, Geometry,
    GeometryEncoding, GeometryError, GeometryRole,
};
pub use media_types::MediaType;
pub use negotiation::{best_match, negotiate, Negotiated, Rejection};
pub use pagination::{PageLinkKind, PageRequest, PageWindow, PaginationError};
pub use profiles::{endpoints, Endpoint, Profile, ProfileSet};
pub use responses::{ConformanceClass, ConformanceClasses, LandingPage};
pub use types::{collection_href, item_href, links_header, path_segment, Link, RelType};

/// OGC API - Features conformance class URIs
pub mod conformance {
    /// Core conformance class
    pub const CORE: &str = "http://www.opengis.net/spec/ogcapi-features-1/1.0/conf/core";
    /// OpenAPI 3.0 conformance class
    pub const OAS30: &str = "http://www.opengis.net/spec/ogcapi-features-1/1.0/conf/oas30";
    /// HTML encoding conformance class
    pub const HTML: &str = "http://www.opengis.net/spec/ogcapi-features-1/1.0/conf/html";
    /// GeoJSON encoding conformance class
    pub const GEOJSON: &str = "http://www.opengis.net/spec/ogcapi-features-1/1.0/conf/geojson";
}

/// The only language served.
pub const DEFAULT_LANGUAGE: &str = "en";
