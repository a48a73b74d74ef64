//! OGC API JSON documents.

use features_graph::{BlankNodeGroup, PropertyEntry};
use features_protocol::{ConformanceClass, ConformanceClasses, Geometry, LandingPage, Link};
use serde::Serialize;

use crate::error::ApiError;
use crate::models::{CollectionSummary, EntityKind, FeatureSummary, ResourceModel};

/// A serialized view of a [`ResourceModel`]. Borrowing the model keeps
/// serialization free of side effects, so a model can be written any number
/// of times.
#[derive(Debug, Serialize)]
pub struct ModelDict<'a> {
    pub uri: &'a str,
    pub identifier: &'a str,
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'a str>,
    #[serde(rename = "isPartOf", skip_serializing_if = "Option::is_none")]
    pub is_part_of: Option<&'a str>,
    pub links: &'a [Link],
    pub properties: &'a [PropertyEntry],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub blank_node_groups: &'a [BlankNodeGroup],
    pub geometries: Vec<&'a Geometry>,
}

impl<'a> From<&'a ResourceModel> for ModelDict<'a> {
    fn from(model: &'a ResourceModel) -> Self {
        Self {
            uri: &model.uri,
            identifier: &model.identifier,
            title: &model.title,
            description: model.description.as_deref(),
            label: model.label.as_deref(),
            is_part_of: model.is_part_of.as_deref(),
            links: &model.links,
            properties: &model.properties,
            blank_node_groups: &model.blank_node_groups,
            geometries: model.geometries.values().collect(),
        }
    }
}

#[derive(Serialize)]
struct CollectionsDocument<'a> {
    links: &'a [Link],
    collections: &'a [CollectionSummary],
}

#[derive(Serialize)]
struct ItemsDocument<'a> {
    links: &'a [Link],
    collection: ModelDict<'a>,
    items: &'a [FeatureSummary],
}

pub fn landing(model: &ResourceModel, base_url: &str) -> Result<String, ApiError> {
    let page = LandingPage::new(model.title.clone(), model.description.clone(), base_url);
    Ok(serde_json::to_string_pretty(&page)?)
}

pub fn conformance(classes: &[ConformanceClass]) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(&ConformanceClasses::from_classes(classes))?)
}

pub fn collections(links: &[Link], collections: &[CollectionSummary]) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(&CollectionsDocument { links, collections })?)
}

/// `{links, <entity>: {...}}` for a single collection or feature.
pub fn resource(model: &ResourceModel) -> Result<String, ApiError> {
    let key = match model.kind {
        EntityKind::Dataset => "dataset",
        EntityKind::Collection => "collection",
        EntityKind::Feature => "feature",
    };
    let mut document = serde_json::Map::new();
    document.insert("links".to_string(), serde_json::to_value(&model.links)?);
    document.insert(key.to_string(), serde_json::to_value(ModelDict::from(model))?);
    Ok(serde_json::to_string_pretty(&document)?)
}

/// `{links, collection, items}` for one page of a collection's members.
pub fn items(
    links: &[Link],
    collection: &ResourceModel,
    items: &[FeatureSummary],
) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(&ItemsDocument {
        links,
        collection: ModelDict::from(collection),
        items,
    })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use features_graph::RawProjection;
    use features_protocol::{GeometryEncoding, RelType};

    fn model() -> ResourceModel {
        let mut model = ResourceModel::build(
            EntityKind::Collection,
            "http://x/c/C1",
            RawProjection::default(),
        )
        .with_links(vec![Link::new("http://x/collections/C1", RelType::Self_)]);
        model.add_geometry(Geometry::boundary(GeometryEncoding::Wkt, "POINT (1 2)"));
        model
    }

    #[test]
    fn test_resource_document_shape() {
        let model = model();
        let json: serde_json::Value = serde_json::from_str(&resource(&model).unwrap()).unwrap();
        assert_eq!(json["links"][0]["rel"], "self");
        assert_eq!(json["collection"]["identifier"], "C1");
        assert_eq!(json["collection"]["title"], "Collection C1");
        assert_eq!(json["collection"]["geometries"][0]["coordinates"], "POINT (1 2)");
        assert_eq!(
            json["collection"]["geometries"][0]["crs"],
            "http://www.opengis.net/def/crs/EPSG/0/4326"
        );
    }

    #[test]
    fn test_serialization_does_not_consume_model() {
        let model = model();
        let first = resource(&model).unwrap();
        let second = resource(&model).unwrap();
        assert_eq!(first, second);
        assert_eq!(model.links.len(), 1);
        assert_eq!(model.geometries.len(), 1);
    }

    #[test]
    fn test_conformance_document() {
        let json: serde_json::Value =
            serde_json::from_str(&conformance(&ConformanceClass::defaults()).unwrap()).unwrap();
        assert_eq!(json["conformsTo"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_collections_document() {
        let summaries = vec![CollectionSummary {
            uri: "http://x/c/C1".to_string(),
            id: "C1".to_string(),
            title: "One".to_string(),
            description: None,
        }];
        let json: serde_json::Value =
            serde_json::from_str(&collections(&[], &summaries).unwrap()).unwrap();
        assert_eq!(json["collections"][0]["id"], "C1");
        assert!(json["collections"][0].get("description").is_none());
    }
}
