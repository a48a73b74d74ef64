//! Individual features.

use features_graph::labels::FEATURE_PREDICATE_LABELS;
use features_graph::oxrdf::{NamedNode, NamedNodeRef, Subject, Term};
use features_graph::vocab::{dcterms, geo, geox};
use features_graph::{GraphProjector, PropertyEntry, TripleSource};
use features_protocol::{
    collection_href, item_href, Geometry, GeometryEncoding, GeometryRole, Link, MediaType, RelType,
};

use super::collection::{answers_to, display_value};
use super::{EntityKind, ResourceModel};
use crate::error::ApiError;

/// Geometry literal predicates and the encoding each carries.
const GEOMETRY_PREDICATES: [(NamedNodeRef<'static>, GeometryEncoding); 4] = [
    (geo::AS_WKT, GeometryEncoding::Wkt),
    (geox::AS_DGGS, GeometryEncoding::Dggs),
    (geo::AS_DGGS, GeometryEncoding::Dggs),
    (geo::AS_GEOJSON, GeometryEncoding::GeoJson),
];

fn encoding_of(predicate: &str) -> Option<GeometryEncoding> {
    GEOMETRY_PREDICATES
        .iter()
        .find(|(p, _)| p.as_str() == predicate)
        .map(|(_, e)| *e)
}

/// The URI of the member of `collection_uri` listed as `item_id`.
pub fn find_feature(
    source: &dyn TripleSource,
    collection_uri: &str,
    collection_id: &str,
    item_id: &str,
) -> Result<String, ApiError> {
    let collection = Term::NamedNode(NamedNode::new_unchecked(collection_uri));
    source
        .subjects_for(dcterms::IS_PART_OF, &collection)
        .into_iter()
        .find(|member| answers_to(source, member, item_id))
        .and_then(|member| match member {
            Subject::NamedNode(n) => Some(n.into_string()),
            _ => None,
        })
        .ok_or_else(|| ApiError::UnknownFeature {
            collection_id: collection_id.to_string(),
            item_id: item_id.to_string(),
        })
}

/// The model of one feature with its geometries and fixed predicate labels.
pub fn feature_model(
    source: &dyn TripleSource,
    uri: &str,
    collection_id: &str,
    base_url: &str,
) -> ResourceModel {
    let mut projection = GraphProjector::new(source)
        .with_base_url(base_url)
        .project(uri);
    projection.properties.iter_mut().for_each(relabel);

    let geometries = geometries(&projection.geometry_groups);
    let mut model = ResourceModel::build(EntityKind::Feature, uri, projection);
    for geometry in geometries {
        model.add_geometry(geometry);
    }

    let collection_href = collection_href(base_url, collection_id);
    let href = item_href(base_url, collection_id, &model.identifier);
    let collection_title = model
        .is_part_of
        .as_deref()
        .and_then(|c| display_value(source, &features_graph::iri_subject(c), dcterms::TITLE))
        .unwrap_or_else(|| collection_id.to_string());

    model.with_links(vec![
        Link::new(href.clone(), RelType::Self_)
            .with_type(MediaType::GeoJson)
            .with_title("This document"),
        Link::new(collection_href.clone(), RelType::Collection)
            .with_type(MediaType::Json)
            .with_title(collection_title),
        Link::new(format!("{}/items", collection_href), RelType::Items)
            .with_type(MediaType::GeoJson)
            .with_title("Features in the same collection"),
    ])
}

fn relabel(entry: &mut PropertyEntry) {
    if let Some((_, label)) = FEATURE_PREDICATE_LABELS
        .iter()
        .find(|(p, _)| p.as_str() == entry.predicate)
    {
        entry.predicate_label = Some(label.to_string());
    }
}

/// One geometry per literal found under `geo:hasGeometry`, each literal
/// cleaned of an embedded CRS prefix. A `geox:hasRole` on the same node
/// overrides the boundary role.
fn geometries(groups: &[features_graph::BlankNodeGroup]) -> Vec<Geometry> {
    let mut out = Vec::new();
    for node in groups.iter().flat_map(|g| g.items.iter()) {
        let role = node
            .iter()
            .find(|p| p.predicate == geox::HAS_ROLE.as_str())
            .and_then(|p| GeometryRole::from_uri(p.object.as_str()));

        for entry in node.iter().filter(|p| p.object.is_literal()) {
            let Some(encoding) = encoding_of(&entry.predicate) else {
                continue;
            };
            let mut geometry = Geometry::boundary(encoding, entry.object.as_str());
            if let Some(role) = role {
                geometry.role = role;
            }
            out.push(geometry);
        }
    }
    out
}
