//! The sample flood dataset shared by the test suites.
//!
//! One `dcat:Dataset` with two feature collections:
//! - `catchments`: `C1` (titled, CW WKT polygon plus DGGS cells, blank-node
//!   measurements), `C2` (untitled, untyped beyond `geo:Feature`, native
//!   GeoJSON) and `C3` (DGGS only, so it has no GeoJSON rendering)
//! - `gauges`: `G1` (titled point) and `G2` (labelled point far from the others)
//!
//! The collection `gauges` has an `rdfs:label` but no `dcterms:title`.

/// Turtle text of the dataset, identical to `data/features.ttl`.
pub const FEATURES_TTL: &str = include_str!("../../../data/features.ttl");

/// Base URL the API tests serve under.
pub const BASE_URL: &str = "http://localhost:8080";

pub const DATASET_URI: &str = "https://example.com/dataset/floods";
pub const DATASET_TITLE: &str = "Flood Features";

pub mod collections {
    pub const CATCHMENTS: &str = "catchments";
    pub const CATCHMENTS_URI: &str = "https://example.com/collection/catchments";
    pub const GAUGES: &str = "gauges";
    pub const GAUGES_URI: &str = "https://example.com/collection/gauges";
}

pub mod features {
    pub const C1: &str = "C1";
    pub const C1_URI: &str = "https://example.com/feature/C1";
    pub const C2: &str = "C2";
    pub const C2_URI: &str = "https://example.com/feature/C2";
    pub const C3: &str = "C3";
    pub const G1: &str = "G1";
    pub const G2: &str = "G2";
}

/// `bbox` values with known results against the dataset.
pub mod bbox {
    /// Overlaps the WKT geometries of C1 and G1.
    pub const CANBERRA: &str = "149.0,-35.3,149.3,-35.1";
    /// Touches nothing.
    pub const OCEAN: &str = "0,0,1,1";
    /// Contains C1's DGGS cells.
    pub const CELL_R12: &str = "R12";
    pub const CELL_PAIR: &str = "R123,R456";
}
