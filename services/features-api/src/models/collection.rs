//! Feature collections and their member lists.

use features_graph::oxrdf::{Subject, Term};
use features_graph::vocab::{dcat, dcterms, ogcapi, rdfs};
use features_graph::{feature_class_label, GraphProjector, TripleSource};
use features_protocol::{
    collection_href, item_href, Geometry, GeometryEncoding, GeometryRole, Link, MediaType, RelType,
};
use serde::Serialize;

use super::{local_name, EntityKind, ResourceModel};
use crate::error::ApiError;

/// One entry of the collections list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionSummary {
    pub uri: String,
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One entry of a collection's items list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureSummary {
    pub uri: String,
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The feature's page in this API.
    pub link: String,
}

/// The first untagged or English literal of `subject predicate ?o`.
pub(crate) fn display_value(
    source: &dyn TripleSource,
    subject: &Subject,
    predicate: features_graph::oxrdf::NamedNodeRef<'_>,
) -> Option<String> {
    source
        .objects(subject, predicate)
        .into_iter()
        .find_map(|term| match term {
            Term::Literal(l) => {
                let shown = l
                    .language()
                    .map_or(true, |lang| lang.is_empty() || lang.eq_ignore_ascii_case("en"));
                shown.then(|| l.value().to_string())
            }
            _ => None,
        })
}

pub(crate) fn subject_iri(subject: &Subject) -> Option<&str> {
    match subject {
        Subject::NamedNode(n) => Some(n.as_str()),
        _ => None,
    }
}

/// The id a subject is listed under: its `dcterms:identifier`, else the local name of its IRI.
pub(crate) fn identifier_of(source: &dyn TripleSource, subject: &Subject, uri: &str) -> String {
    display_value(source, subject, dcterms::IDENTIFIER).unwrap_or_else(|| local_name(uri).to_string())
}

/// Whether `id` addresses `subject`: any of its `dcterms:identifier` literals,
/// or the id it is listed under.
pub(crate) fn answers_to(source: &dyn TripleSource, subject: &Subject, id: &str) -> bool {
    let Some(uri) = subject_iri(subject) else {
        return false;
    };
    source
        .objects(subject, dcterms::IDENTIFIER)
        .iter()
        .any(|o| matches!(o, Term::Literal(l) if l.value() == id))
        || identifier_of(source, subject, uri) == id
}

/// Subjects typed `ogcapi:FeatureCollection` or `ogcapi:Collection`, in
/// first-seen order without duplicates.
fn collection_subjects(source: &dyn TripleSource) -> Vec<Subject> {
    let mut subjects = source.subjects_of_type(ogcapi::FEATURE_COLLECTION);
    for subject in source.subjects_of_type(ogcapi::COLLECTION) {
        if !subjects.contains(&subject) {
            subjects.push(subject);
        }
    }
    subjects
}

/// Collections that are part of `dataset_uri`, sorted by URI.
///
/// Without a dataset every collection in the graph is listed.
pub fn list_collections(
    source: &dyn TripleSource,
    dataset_uri: Option<&str>,
) -> Vec<CollectionSummary> {
    let dataset = dataset_uri.map(|uri| Term::NamedNode(features_graph::oxrdf::NamedNode::new_unchecked(uri)));

    let mut collections: Vec<CollectionSummary> = collection_subjects(source)
        .into_iter()
        .filter(|subject| match &dataset {
            Some(dataset) => source
                .objects(subject, dcterms::IS_PART_OF)
                .iter()
                .any(|o| o == dataset),
            None => true,
        })
        .filter_map(|subject| {
            let uri = subject_iri(&subject)?.to_string();
            let id = identifier_of(source, &subject, &uri);
            let title = display_value(source, &subject, dcterms::TITLE)
                .or_else(|| display_value(source, &subject, rdfs::LABEL))
                .unwrap_or_else(|| format!("{} {}", EntityKind::Collection.label(), id));
            Some(CollectionSummary {
                description: display_value(source, &subject, dcterms::DESCRIPTION),
                uri,
                id,
                title,
            })
        })
        .collect();

    collections.sort_by(|a, b| a.uri.cmp(&b.uri));
    collections
}

/// The URI of the collection listed as `collection_id`.
pub fn find_collection(source: &dyn TripleSource, collection_id: &str) -> Result<String, ApiError> {
    collection_subjects(source)
        .into_iter()
        .find(|subject| answers_to(source, subject, collection_id))
        .and_then(|subject| subject_iri(&subject).map(str::to_string))
        .ok_or_else(|| ApiError::UnknownCollection(collection_id.to_string()))
}

/// The model of one collection, with its `dcat:bbox` as a bounding-box geometry.
pub fn collection_model(source: &dyn TripleSource, uri: &str, base_url: &str) -> ResourceModel {
    let projection = GraphProjector::new(source)
        .with_base_url(base_url)
        .project(uri);
    let bbox = projection.literal(dcat::BBOX).map(str::to_string);

    let mut model = ResourceModel::build(EntityKind::Collection, uri, projection);
    if let Some(bbox) = bbox {
        let mut geometry = Geometry::boundary(GeometryEncoding::Wkt, &bbox);
        geometry.role = GeometryRole::BoundingBox;
        model.add_geometry(geometry);
    }

    let href = collection_href(base_url, &model.identifier);
    let links = vec![
        Link::new(href.clone(), RelType::Self_)
            .with_type(MediaType::Json)
            .with_title("This document"),
        Link::new(format!("{}/items", href), RelType::Items)
            .with_type(MediaType::GeoJson)
            .with_title(format!("Features in {}", model.title)),
        Link::new(format!("{}/collections", base_url), RelType::Collection)
            .with_type(MediaType::Json)
            .with_title("All collections"),
    ];
    model.with_links(links)
}

/// Members (`dcterms:isPartOf` the collection), sorted by URI.
pub fn list_members(source: &dyn TripleSource, collection_uri: &str) -> Vec<Subject> {
    let collection = Term::NamedNode(features_graph::oxrdf::NamedNode::new_unchecked(collection_uri));
    let mut members: Vec<Subject> = source
        .subjects_for(dcterms::IS_PART_OF, &collection)
        .into_iter()
        .filter(|s| subject_iri(s).is_some())
        .collect();
    members.sort_by(|a, b| subject_iri(a).cmp(&subject_iri(b)));
    members
}

/// Summaries of `members` for an items list.
///
/// Titles fall back from `dcterms:title` and `rdfs:label` to
/// `"{class label} {id}"`, using the most specific class under
/// `geo:Feature`, and finally to `"Feature {id}"`.
pub fn feature_summaries(
    source: &dyn TripleSource,
    members: &[Subject],
    collection_id: &str,
    base_url: &str,
) -> Vec<FeatureSummary> {
    members
        .iter()
        .filter_map(|subject| {
            let uri = subject_iri(subject)?.to_string();
            let id = identifier_of(source, subject, &uri);
            let title = display_value(source, subject, dcterms::TITLE)
                .or_else(|| display_value(source, subject, rdfs::LABEL))
                .unwrap_or_else(|| {
                    let class = feature_class_label(source, subject)
                        .unwrap_or_else(|| EntityKind::Feature.label().to_string());
                    format!("{} {}", class, id)
                });
            Some(FeatureSummary {
                link: item_href(base_url, collection_id, &id),
                description: display_value(source, subject, dcterms::DESCRIPTION),
                uri,
                id,
                title,
            })
        })
        .collect()
}
