//! `bbox` query parameter classification.
//!
//! Three mutually exclusive shapes are accepted, tried in this order:
//! - four comma-separated decimals: a WGS84 lon/lat box (`149.0,-35.3,149.3,-35.1`)
//! - a single DGGS cell id: one capital letter and up to 15 digits (`R1234`)
//! - two comma-separated cell ids (`R123,R456`)

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message returned for a `bbox` that matches none of the accepted shapes.
pub const INVALID_BBOX_MESSAGE: &str = "The parameter 'bbox' you supplied is invalid. Must be either two pairs of long/lat values, a DGGS Cell ID or a pair of DGGS Cell IDs";

static COORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9.\-]+),([0-9.\-]+),([0-9.\-]+),([0-9.\-]+)$").expect("valid regex")
});
static CELL_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Z][0-9]{0,15})$").expect("valid regex"));
static CELL_IDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z][0-9]{0,15}),([A-Z][0-9]{0,15})$").expect("valid regex")
});

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BBoxError {
    #[error("{}", INVALID_BBOX_MESSAGE)]
    Invalid(String),
}

/// A lon/lat bounding box with `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a box from two opposite corners in any order.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
        }
    }

    /// Check if this bbox intersects another. Touching edges count.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }
}

impl From<geo_types::Rect<f64>> for BoundingBox {
    fn from(rect: geo_types::Rect<f64>) -> Self {
        Self::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }
}

/// A classified `bbox` value.
#[derive(Debug, Clone, PartialEq)]
pub enum BBoxKind {
    Wgs84(BoundingBox),
    Cell(String),
    CellPair(String, String),
}

impl BBoxKind {
    /// Short tag used in HTML views and logs.
    pub fn tag(&self) -> &'static str {
        match self {
            BBoxKind::Wgs84(_) => "coords",
            BBoxKind::Cell(_) => "cell_id",
            BBoxKind::CellPair(_, _) => "cell_ids",
        }
    }
}

/// Classify a `bbox` query value.
pub fn classify(s: &str) -> Result<BBoxKind, BBoxError> {
    let s = s.trim();
    let invalid = || BBoxError::Invalid(s.to_string());

    if let Some(caps) = COORDS.captures(s) {
        let mut values = [0.0f64; 4];
        for (i, value) in values.iter_mut().enumerate() {
            *value = caps[i + 1].parse::<f64>().map_err(|_| invalid())?;
        }
        return Ok(BBoxKind::Wgs84(BoundingBox::new(
            values[0], values[1], values[2], values[3],
        )));
    }

    if let Some(caps) = CELL_ID.captures(s) {
        return Ok(BBoxKind::Cell(caps[1].to_string()));
    }

    if let Some(caps) = CELL_IDS.captures(s) {
        return Ok(BBoxKind::CellPair(caps[1].to_string(), caps[2].to_string()));
    }

    Err(invalid())
}
