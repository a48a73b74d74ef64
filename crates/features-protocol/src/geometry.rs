//! Feature geometries as stored in the graph.
//!
//! A feature may carry up to three encodings of its boundary: WKT, a DGGS
//! cell list, and native GeoJSON. Only the WGS84 encodings can be projected
//! to GeoJSON.
//!
//! WKT is read with the `wkt` crate into `geo_types`, envelopes come from
//! `geo::BoundingRect` and GeoJSON output is written through the `geojson`
//! crate with RFC 7946 ring orientation applied by `geo::Orient`.

use geo::orient::Direction;
use geo::{BoundingRect, Orient};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::bbox::BoundingBox;

/// A GeoJSON geometry object as emitted in responses.
pub type GeoJsonGeometry = geojson::Geometry;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeometryError {
    #[error("Geometry in CRS {0} cannot be expressed as GeoJSON")]
    NotWgs84(&'static str),

    #[error("Invalid WKT geometry: {0}")]
    Wkt(String),

    #[error("Invalid GeoJSON geometry: {0}")]
    GeoJson(String),

    #[error("This Feature has no geometry that can be rendered as GeoJSON")]
    NoRenderableGeometry,
}

/// The role a geometry plays for its feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryRole {
    Boundary,
    BoundingBox,
    BoundingCircle,
    ConcaveHull,
    ConvexHull,
    Centroid,
    Detailed,
}

const ROLE_BASE: &str = "https://linked.data.gov.au/def/geometry-roles/";

impl GeometryRole {
    pub const ALL: [GeometryRole; 7] = [
        GeometryRole::Boundary,
        GeometryRole::BoundingBox,
        GeometryRole::BoundingCircle,
        GeometryRole::ConcaveHull,
        GeometryRole::ConvexHull,
        GeometryRole::Centroid,
        GeometryRole::Detailed,
    ];

    fn local_name(&self) -> &'static str {
        match self {
            GeometryRole::Boundary => "boundary",
            GeometryRole::BoundingBox => "bounding-box",
            GeometryRole::BoundingCircle => "bounding-circle",
            GeometryRole::ConcaveHull => "concave-hull",
            GeometryRole::ConvexHull => "convex-hull",
            GeometryRole::Centroid => "centroid",
            GeometryRole::Detailed => "detailed",
        }
    }

    pub fn uri(&self) -> String {
        format!("{}{}", ROLE_BASE, self.local_name())
    }

    pub fn from_uri(uri: &str) -> Option<Self> {
        let local = uri.strip_prefix(ROLE_BASE)?;
        Self::ALL.into_iter().find(|r| r.local_name() == local)
    }
}

impl Serialize for GeometryRole {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.uri())
    }
}

/// Coordinate reference systems a geometry may be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Crs {
    Wgs84,
    /// The TB16Pix discrete global grid.
    Tb16Pix,
}

impl Crs {
    pub fn uri(&self) -> &'static str {
        match self {
            Crs::Wgs84 => "http://www.opengis.net/def/crs/EPSG/0/4326",
            Crs::Tb16Pix => "https://w3id.org/dggs/tb16pix",
        }
    }

    pub fn from_uri(uri: &str) -> Option<Self> {
        [Crs::Wgs84, Crs::Tb16Pix].into_iter().find(|c| c.uri() == uri)
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uri())
    }
}

impl Serialize for Crs {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.uri())
    }
}

/// How a geometry's coordinates are written. Ordering is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum GeometryEncoding {
    #[serde(rename = "WKT")]
    Wkt,
    #[serde(rename = "DGGS")]
    Dggs,
    #[serde(rename = "GeoJSON")]
    GeoJson,
}

impl GeometryEncoding {
    /// Human name of the encoding.
    pub fn label(&self) -> &'static str {
        match self {
            GeometryEncoding::Wkt => "Well Known Text Geometry",
            GeometryEncoding::Dggs => "TB16Pix Geometry",
            GeometryEncoding::GeoJson => "GeoJSON Geometry",
        }
    }

    /// The CRS an encoding is always expressed in.
    pub fn crs(&self) -> Crs {
        match self {
            GeometryEncoding::Wkt | GeometryEncoding::GeoJson => Crs::Wgs84,
            GeometryEncoding::Dggs => Crs::Tb16Pix,
        }
    }

    /// Short key used in JSON output.
    pub fn key(&self) -> &'static str {
        match self {
            GeometryEncoding::Wkt => "WKT",
            GeometryEncoding::Dggs => "DGGS",
            GeometryEncoding::GeoJson => "GeoJSON",
        }
    }
}

/// One encoding of a feature's geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Geometry {
    /// The literal as stored, after [`clean_literal`].
    pub coordinates: String,
    pub role: GeometryRole,
    pub label: String,
    pub crs: Crs,
    #[serde(skip)]
    pub encoding: GeometryEncoding,
}

impl Geometry {
    /// A boundary geometry in the encoding's own CRS and label.
    pub fn boundary(encoding: GeometryEncoding, literal: &str) -> Self {
        Self {
            coordinates: clean_literal(literal).to_string(),
            role: GeometryRole::Boundary,
            label: encoding.label().to_string(),
            crs: encoding.crs(),
            encoding,
        }
    }

    /// Read the literal into a `geo_types` geometry. Only WGS84 geometries can be read.
    pub fn to_geo(&self) -> Result<geo_types::Geometry<f64>, GeometryError> {
        if self.crs != Crs::Wgs84 {
            return Err(GeometryError::NotWgs84(self.crs.uri()));
        }
        match self.encoding {
            GeometryEncoding::GeoJson => parse_geojson(&self.coordinates),
            GeometryEncoding::Wkt => parse_wkt(&self.coordinates),
            GeometryEncoding::Dggs => Err(GeometryError::NotWgs84(Crs::Tb16Pix.uri())),
        }
    }

    /// Project to an RFC 7946 GeoJSON geometry, rings rewound.
    pub fn to_geojson(&self) -> Result<GeoJsonGeometry, GeometryError> {
        let geometry = rewind(&self.to_geo()?);
        Ok(GeoJsonGeometry::new(geojson::Value::from(&geometry)))
    }
}

/// Parse a WKT literal, ignoring a leading `<crs-uri>`.
pub fn parse_wkt(literal: &str) -> Result<geo_types::Geometry<f64>, GeometryError> {
    wkt::Wkt::<f64>::from_str(strip_crs(literal))
        .map_err(|e| GeometryError::Wkt(e.to_string()))
        .and_then(|w| {
            w.try_into()
                .map_err(|e: wkt::conversion::Error| GeometryError::Wkt(format!("{:?}", e)))
        })
}

/// Parse a GeoJSON geometry object.
pub fn parse_geojson(literal: &str) -> Result<geo_types::Geometry<f64>, GeometryError> {
    let geometry: GeoJsonGeometry =
        serde_json::from_str(literal).map_err(|e| GeometryError::GeoJson(e.to_string()))?;
    geo_types::Geometry::try_from(geometry).map_err(|e| GeometryError::GeoJson(e.to_string()))
}

/// Orient polygon rings per RFC 7946: exteriors counter-clockwise, holes
/// clockwise. Other geometry types are returned unchanged.
pub fn rewind(geometry: &geo_types::Geometry<f64>) -> geo_types::Geometry<f64> {
    use geo_types::Geometry as G;
    match geometry {
        G::Polygon(p) => G::Polygon(p.orient(Direction::Default)),
        G::MultiPolygon(mp) => G::MultiPolygon(mp.orient(Direction::Default)),
        G::Rect(r) => G::Polygon(r.to_polygon().orient(Direction::Default)),
        G::Triangle(t) => G::Polygon(t.to_polygon().orient(Direction::Default)),
        G::GeometryCollection(gc) => G::GeometryCollection(geo_types::GeometryCollection(
            gc.0.iter().map(rewind).collect(),
        )),
        other => other.clone(),
    }
}

/// The lon/lat envelope of a geometry; `None` when it has no coordinates.
pub fn envelope(geometry: &geo_types::Geometry<f64>) -> Option<BoundingBox> {
    geometry.bounding_rect().map(BoundingBox::from)
}

fn strip_crs(literal: &str) -> &str {
    let trimmed = literal.trim_start();
    match trimmed.strip_prefix('<').and_then(|rest| rest.split_once('>')) {
        Some((_, body)) => body.trim_start(),
        None => trimmed,
    }
}

/// Drop an embedded `<crs-uri> ` prefix: everything up to and including the
/// first `"> "` is removed. Literals without one are returned unchanged.
pub fn clean_literal(literal: &str) -> &str {
    match literal.split_once("> ") {
        Some((_, rest)) => rest,
        None => literal,
    }
}
