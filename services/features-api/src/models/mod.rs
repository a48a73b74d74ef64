//! Resource models built from graph projections.
//!
//! A model is constructed fresh for each request and never mutated once a
//! formatter has it.

pub mod collection;
pub mod dataset;
pub mod feature;

use std::collections::BTreeMap;

use features_graph::vocab::{dcterms, rdfs};
use features_graph::{BlankNodeGroup, ObjectValue, PropertyEntry, RawProjection};
use features_protocol::{Geometry, GeometryEncoding, Link};
use features_graph::oxrdf::NamedNodeRef;
use serde::Serialize;

pub use collection::{
    collection_model, feature_summaries, find_collection, list_collections, list_members,
    CollectionSummary, FeatureSummary,
};
pub use dataset::{conformance_classes, dataset_model, find_dataset};
pub use feature::{feature_model, find_feature};

/// The kind of entity a model describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityKind {
    Dataset,
    Collection,
    Feature,
}

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Dataset => "Dataset",
            EntityKind::Collection => "Collection",
            EntityKind::Feature => "Feature",
        }
    }
}

/// A Dataset, Collection or Feature ready for formatting.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceModel {
    #[serde(skip)]
    pub kind: EntityKind,
    pub uri: String,
    pub identifier: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_part_of: Option<String>,
    pub links: Vec<Link>,
    pub properties: Vec<PropertyEntry>,
    pub blank_node_groups: Vec<BlankNodeGroup>,
    /// At most one geometry per encoding.
    pub geometries: BTreeMap<GeometryEncoding, Geometry>,
}

impl ResourceModel {
    /// Build a model from a projection of `uri`.
    ///
    /// The title is `dcterms:title`, else `rdfs:label`, else
    /// `"{kind} {identifier}"`.
    pub fn build(kind: EntityKind, uri: &str, projection: RawProjection) -> Self {
        let identifier = display_literal(&projection, dcterms::IDENTIFIER)
            .unwrap_or_else(|| local_name(uri).to_string());
        let label = display_literal(&projection, rdfs::LABEL);
        let title = explicit_title(&projection)
            .unwrap_or_else(|| format!("{} {}", kind.label(), identifier));

        Self {
            kind,
            uri: uri.to_string(),
            description: display_literal(&projection, dcterms::DESCRIPTION),
            is_part_of: projection.iri(dcterms::IS_PART_OF).map(str::to_string),
            identifier,
            title,
            label,
            links: Vec::new(),
            properties: projection.properties,
            blank_node_groups: projection.blank_node_groups,
            geometries: BTreeMap::new(),
        }
    }

    pub fn with_links(mut self, links: Vec<Link>) -> Self {
        self.links = links;
        self
    }

    /// Add a geometry unless one in the same encoding is already present.
    pub fn add_geometry(&mut self, geometry: Geometry) {
        self.geometries.entry(geometry.encoding).or_insert(geometry);
    }

    pub fn geometry(&self, encoding: GeometryEncoding) -> Option<&Geometry> {
        self.geometries.get(&encoding)
    }
}

/// `dcterms:title`, else `rdfs:label`, in the display language.
pub fn explicit_title(projection: &RawProjection) -> Option<String> {
    display_literal(projection, dcterms::TITLE).or_else(|| display_literal(projection, rdfs::LABEL))
}

/// The first literal of a direct statement that is untagged or English.
pub fn display_literal(projection: &RawProjection, predicate: NamedNodeRef<'_>) -> Option<String> {
    projection.values(predicate).find_map(|p| match &p.object {
        ObjectValue::Literal {
            value, language, ..
        } if is_display_language(language.as_deref()) => Some(value.clone()),
        _ => None,
    })
}

fn is_display_language(language: Option<&str>) -> bool {
    language.map_or(true, |l| l.is_empty() || l.eq_ignore_ascii_case("en"))
}

/// The last path or fragment segment of an IRI.
pub fn local_name(uri: &str) -> &str {
    uri.trim_end_matches('/')
        .rsplit(['/', '#'])
        .next()
        .unwrap_or(uri)
}
