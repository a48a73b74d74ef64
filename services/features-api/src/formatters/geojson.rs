//! GeoJSON Features.

use features_protocol::{GeoJsonGeometry, GeometryEncoding, GeometryError, Link};
use serde::Serialize;

use crate::error::ApiError;
use crate::models::ResourceModel;

#[derive(Debug, Serialize)]
struct FeatureProperties<'a> {
    title: &'a str,
    #[serde(rename = "isPartOf")]
    is_part_of: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct Feature<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    type_: &'static str,
    geometry: GeoJsonGeometry,
    properties: FeatureProperties<'a>,
    links: &'a [Link],
}

/// The feature's geometry as GeoJSON, rewound.
///
/// A native GeoJSON literal is preferred, then WKT. Other encodings have no
/// GeoJSON form, so a feature without either fails.
pub fn feature_geometry(model: &ResourceModel) -> Result<GeoJsonGeometry, GeometryError> {
    let geometry = model
        .geometry(GeometryEncoding::GeoJson)
        .or_else(|| model.geometry(GeometryEncoding::Wkt))
        .ok_or(GeometryError::NoRenderableGeometry)?;
    geometry.to_geojson()
}

/// A single Feature: `{id, type, geometry, properties, links}`.
pub fn feature(model: &ResourceModel) -> Result<String, ApiError> {
    let document = Feature {
        id: &model.uri,
        type_: "Feature",
        geometry: feature_geometry(model)?,
        properties: FeatureProperties {
            title: &model.title,
            is_part_of: model.is_part_of.as_deref(),
            description: model.description.as_deref(),
        },
        links: &model.links,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}
