//! Projection of a node's neighbourhood into display-ready properties.
//!
//! For a subject the projector collects three kinds of rows:
//! - direct statements whose object is not a blank node
//! - two-hop statements through a blank node, other than `geo:hasGeometry`
//! - two-hop statements through a `geo:hasGeometry` blank node
//!
//! Blank-node rows are then regrouped by their outer predicate, so several
//! blank nodes reached through the same predicate form a single group with
//! one item list per node.

use features_protocol::{collection_href, item_href};
use oxrdf::{NamedNodeRef, Subject, Term};
use serde::Serialize;

use crate::labels::{label_for, term_label};
use crate::prefixes::PrefixMap;
use crate::store::{iri_subject, term_as_subject, TripleSource};
use crate::vocab::{dcterms, geo, ogcapi, xsd};

/// The object of a projected statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObjectValue {
    Iri {
        value: String,
    },
    Literal {
        value: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        datatype: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
    /// Placeholder for a blank node; the id is only meaningful within one graph.
    BlankNode {
        value: String,
    },
}

impl ObjectValue {
    fn from_term(term: &Term) -> Option<Self> {
        Some(match term {
            Term::NamedNode(n) => ObjectValue::Iri {
                value: n.as_str().to_string(),
            },
            Term::BlankNode(b) => ObjectValue::BlankNode {
                value: b.as_str().to_string(),
            },
            Term::Literal(l) => ObjectValue::Literal {
                value: l.value().to_string(),
                datatype: (l.language().is_none() && l.datatype() != xsd::STRING)
                    .then(|| l.datatype().as_str().to_string()),
                language: l.language().map(str::to_string),
            },
            #[allow(unreachable_patterns)]
            _ => return None,
        })
    }

    /// The IRI, literal text or blank node id.
    pub fn as_str(&self) -> &str {
        match self {
            ObjectValue::Iri { value }
            | ObjectValue::Literal { value, .. }
            | ObjectValue::BlankNode { value } => value,
        }
    }

    pub fn is_iri(&self) -> bool {
        matches!(self, ObjectValue::Iri { .. })
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, ObjectValue::Literal { .. })
    }
}

/// One projected statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyEntry {
    pub predicate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicate_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicate_prefixed: Option<String>,
    pub object: ObjectValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_prefixed: Option<String>,
    /// Link into this API when the object is a local Feature or collection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_url: Option<String>,
}

/// Statements reached through blank nodes sharing one outer predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlankNodeGroup {
    pub predicate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicate_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicate_prefixed: Option<String>,
    /// One list of nested statements per blank node, in first-seen order.
    pub items: Vec<Vec<PropertyEntry>>,
}

/// A raw projection row, tagged by how it was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectionRow {
    Direct(PropertyEntry),
    Nested {
        outer: PropertyEntry,
        node: String,
        inner: PropertyEntry,
    },
    Geometry {
        outer: PropertyEntry,
        node: String,
        inner: PropertyEntry,
    },
}

/// The projected neighbourhood of one subject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawProjection {
    pub subject: String,
    pub properties: Vec<PropertyEntry>,
    pub blank_node_groups: Vec<BlankNodeGroup>,
    pub geometry_groups: Vec<BlankNodeGroup>,
}

impl RawProjection {
    /// Regroup rows into properties and blank-node groups.
    pub fn from_rows(subject: impl Into<String>, rows: Vec<ProjectionRow>) -> Self {
        let mut properties = Vec::new();
        let mut nested = Vec::new();
        let mut geometry = Vec::new();

        for row in rows {
            match row {
                ProjectionRow::Direct(entry) => properties.push(entry),
                ProjectionRow::Nested { outer, node, inner } => nested.push((outer, node, inner)),
                ProjectionRow::Geometry { outer, node, inner } => {
                    geometry.push((outer, node, inner))
                }
            }
        }

        Self {
            subject: subject.into(),
            properties,
            blank_node_groups: group_blank_nodes(nested),
            geometry_groups: group_blank_nodes(geometry),
        }
    }

    /// Direct statements with the given predicate.
    pub fn values<'a>(&'a self, predicate: NamedNodeRef<'a>) -> impl Iterator<Item = &'a PropertyEntry> {
        self.properties
            .iter()
            .filter(move |p| p.predicate == predicate.as_str())
    }

    /// The first literal value of a direct statement.
    pub fn literal(&self, predicate: NamedNodeRef<'_>) -> Option<&str> {
        self.properties
            .iter()
            .filter(|p| p.predicate == predicate.as_str())
            .find(|p| p.object.is_literal())
            .map(|p| p.object.as_str())
    }

    /// The first IRI value of a direct statement.
    pub fn iri(&self, predicate: NamedNodeRef<'_>) -> Option<&str> {
        self.properties
            .iter()
            .filter(|p| p.predicate == predicate.as_str())
            .find(|p| p.object.is_iri())
            .map(|p| p.object.as_str())
    }

    /// The first literal with the given inner predicate across all geometry nodes.
    pub fn geometry_literal(&self, predicate: NamedNodeRef<'_>) -> Option<&str> {
        self.geometry_groups
            .iter()
            .flat_map(|g| g.items.iter().flatten())
            .filter(|p| p.predicate == predicate.as_str())
            .find(|p| p.object.is_literal())
            .map(|p| p.object.as_str())
    }
}

/// Group blank-node rows by outer predicate, keeping first-seen order for
/// both groups and per-node item lists.
fn group_blank_nodes(rows: Vec<(PropertyEntry, String, PropertyEntry)>) -> Vec<BlankNodeGroup> {
    let mut groups: Vec<(BlankNodeGroup, Vec<String>)> = Vec::new();

    for (outer, node, inner) in rows {
        let idx = match groups.iter().position(|(g, _)| g.predicate == outer.predicate) {
            Some(idx) => idx,
            None => {
                groups.push((
                    BlankNodeGroup {
                        predicate: outer.predicate.clone(),
                        predicate_label: None,
                        predicate_prefixed: None,
                        items: Vec::new(),
                    },
                    Vec::new(),
                ));
                groups.len() - 1
            }
        };

        let (group, nodes) = &mut groups[idx];
        if group.predicate_label.is_none() {
            group.predicate_label = outer.predicate_label;
        }
        if group.predicate_prefixed.is_none() {
            group.predicate_prefixed = outer.predicate_prefixed;
        }

        match nodes.iter().position(|n| *n == node) {
            Some(i) => group.items[i].push(inner),
            None => {
                nodes.push(node);
                group.items.push(vec![inner]);
            }
        }
    }

    groups.into_iter().map(|(g, _)| g).collect()
}

/// Projects subjects of a [`TripleSource`].
pub struct GraphProjector<'a> {
    source: &'a dyn TripleSource,
    prefixes: &'a PrefixMap,
    base_url: Option<&'a str>,
}

impl<'a> GraphProjector<'a> {
    pub fn new(source: &'a dyn TripleSource) -> Self {
        Self {
            source,
            prefixes: source.prefixes(),
            base_url: None,
        }
    }

    /// Resolve `system_url`s for local Features and collections against `base_url`.
    pub fn with_base_url(mut self, base_url: &'a str) -> Self {
        self.base_url = Some(base_url.trim_end_matches('/'));
        self
    }

    /// Project the neighbourhood of `subject_uri`.
    pub fn project(&self, subject_uri: &str) -> RawProjection {
        RawProjection::from_rows(subject_uri, self.rows(&iri_subject(subject_uri)))
    }

    /// The three row kinds for `subject`, in statement order.
    pub fn rows(&self, subject: &Subject) -> Vec<ProjectionRow> {
        let mut direct = Vec::new();
        let mut nested = Vec::new();
        let mut geometry = Vec::new();

        for triple in self.source.triples_for_subject(subject) {
            let Term::BlankNode(node) = &triple.object else {
                if let Some(entry) = self.entry(triple.predicate.as_ref(), &triple.object) {
                    direct.push(ProjectionRow::Direct(entry));
                }
                continue;
            };

            let Some(outer) = self.entry(triple.predicate.as_ref(), &triple.object) else {
                continue;
            };
            let is_geometry = triple.predicate.as_ref() == geo::HAS_GEOMETRY;
            let node_subject = Subject::BlankNode(node.clone());

            for inner_triple in self.source.triples_for_subject(&node_subject) {
                let Some(inner) = self.entry(inner_triple.predicate.as_ref(), &inner_triple.object)
                else {
                    continue;
                };
                let row = if is_geometry {
                    ProjectionRow::Geometry {
                        outer: outer.clone(),
                        node: node.as_str().to_string(),
                        inner,
                    }
                } else {
                    ProjectionRow::Nested {
                        outer: outer.clone(),
                        node: node.as_str().to_string(),
                        inner,
                    }
                };
                if is_geometry {
                    geometry.push(row);
                } else {
                    nested.push(row);
                }
            }
        }

        direct.extend(nested);
        direct.extend(geometry);
        direct
    }

    fn entry(&self, predicate: NamedNodeRef<'_>, object: &Term) -> Option<PropertyEntry> {
        let value = ObjectValue::from_term(object)?;
        let object_prefixed = match object {
            Term::NamedNode(n) => Some(self.prefixes.compact(n.as_str())),
            _ => None,
        };

        Some(PropertyEntry {
            predicate: predicate.as_str().to_string(),
            predicate_label: label_for(self.source, &Subject::NamedNode(predicate.into_owned())),
            predicate_prefixed: Some(self.prefixes.compact(predicate.as_str())),
            object: value,
            object_label: term_label(self.source, object),
            object_prefixed,
            system_url: self.system_url(object),
        })
    }

    /// `{base}/collections/{fc}/items/{f}` for a local Feature,
    /// `{base}/collections/{c}` for a local collection.
    fn system_url(&self, object: &Term) -> Option<String> {
        let base = self.base_url?;
        let subject = match object {
            Term::NamedNode(_) => term_as_subject(object)?,
            _ => return None,
        };
        let identifier = self.source.literal(&subject, dcterms::IDENTIFIER)?;

        if self.source.has_type(&subject, geo::FEATURE) {
            let collection_id = self
                .source
                .objects(&subject, dcterms::IS_PART_OF)
                .iter()
                .filter_map(term_as_subject)
                .find_map(|c| self.source.literal(&c, dcterms::IDENTIFIER))?;
            return Some(item_href(base, &collection_id, &identifier));
        }

        if self.source.has_type(&subject, ogcapi::FEATURE_COLLECTION)
            || self.source.has_type(&subject, ogcapi::COLLECTION)
        {
            return Some(collection_href(base, &identifier));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{load_str, RdfFormat};
    use crate::store::MemoryStore;
    use crate::vocab::rdfs;

    const TTL: &str = r#"
        @prefix dcterms: <http://purl.org/dc/terms/> .
        @prefix geo: <http://www.opengis.net/ont/geosparql#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix ogcapi: <https://data.surroundaustralia.com/def/ogcldapi/> .
        @prefix ex: <http://example.com/def/> .

        dcterms:identifier rdfs:label "Identifier" .
        ex:measure rdfs:label "Measure"@en .

        <http://example.com/c/1> a ogcapi:FeatureCollection ;
            dcterms:identifier "C1" .

        <http://example.com/f/1> a geo:Feature ;
            dcterms:identifier "F1" ;
            dcterms:isPartOf <http://example.com/c/1> ;
            ex:sameAs <http://example.com/f/2> ;
            ex:measure [ ex:value 10 ; ex:unit "m" ] ;
            ex:measure [ ex:value 20 ; ex:unit "km" ] ;
            geo:hasGeometry [ geo:asWKT "POINT (1 2)"^^geo:wktLiteral ] .

        <http://example.com/f/2> a geo:Feature ;
            dcterms:identifier "F2" ;
            dcterms:isPartOf <http://example.com/c/1> .
    "#;

    fn store() -> MemoryStore {
        load_str(TTL, RdfFormat::Turtle).unwrap()
    }

    #[test]
    fn test_direct_properties_exclude_blank_nodes() {
        let store = store();
        let projection = GraphProjector::new(&store).project("http://example.com/f/1");
        assert_eq!(projection.properties.len(), 4);
        assert!(projection
            .properties
            .iter()
            .all(|p| !matches!(p.object, ObjectValue::BlankNode { .. })));
    }

    #[test]
    fn test_blank_nodes_grouped_by_predicate() {
        let store = store();
        let projection = GraphProjector::new(&store).project("http://example.com/f/1");
        assert_eq!(projection.blank_node_groups.len(), 1);
        let group = &projection.blank_node_groups[0];
        assert_eq!(group.predicate, "http://example.com/def/measure");
        assert_eq!(group.predicate_label.as_deref(), Some("Measure"));
        assert_eq!(group.predicate_prefixed.as_deref(), Some("ex:measure"));
        assert_eq!(group.items.len(), 2);
        assert_eq!(group.items[0].len(), 2);
        assert_eq!(group.items[1][1].object.as_str(), "km");
    }

    #[test]
    fn test_geometry_rows_separated() {
        let store = store();
        let projection = GraphProjector::new(&store).project("http://example.com/f/1");
        assert_eq!(projection.geometry_groups.len(), 1);
        assert_eq!(
            projection.geometry_literal(geo::AS_WKT),
            Some("POINT (1 2)")
        );
        assert_eq!(projection.geometry_literal(geo::AS_GEOJSON), None);
    }

    #[test]
    fn test_labels_and_prefixed_forms() {
        let store = store();
        let projection = GraphProjector::new(&store).project("http://example.com/f/1");
        let id = projection.values(dcterms::IDENTIFIER).next().unwrap();
        assert_eq!(id.predicate_label.as_deref(), Some("Identifier"));
        assert_eq!(id.predicate_prefixed.as_deref(), Some("dcterms:identifier"));
        // literals carry no prefixed form
        assert_eq!(id.object_prefixed, None);
        assert_eq!(projection.literal(dcterms::IDENTIFIER), Some("F1"));
        assert_eq!(projection.literal(rdfs::LABEL), None);
    }

    #[test]
    fn test_literal_stays_literal() {
        let store = store();
        let projection = GraphProjector::new(&store).project("http://example.com/f/1");
        let part_of = projection.values(dcterms::IS_PART_OF).next().unwrap();
        assert!(part_of.object.is_iri());
        assert_eq!(projection.iri(dcterms::IDENTIFIER), None);
    }

    #[test]
    fn test_system_urls() {
        let store = store();
        let projection = GraphProjector::new(&store)
            .with_base_url("http://localhost:8080/")
            .project("http://example.com/f/1");
        let part_of = projection.values(dcterms::IS_PART_OF).next().unwrap();
        assert_eq!(
            part_of.system_url.as_deref(),
            Some("http://localhost:8080/collections/C1")
        );
        let same_as = projection
            .properties
            .iter()
            .find(|p| p.predicate == "http://example.com/def/sameAs")
            .unwrap();
        assert_eq!(
            same_as.system_url.as_deref(),
            Some("http://localhost:8080/collections/C1/items/F2")
        );
    }

    #[test]
    fn test_no_system_url_without_base() {
        let store = store();
        let projection = GraphProjector::new(&store).project("http://example.com/f/1");
        assert!(projection.properties.iter().all(|p| p.system_url.is_none()));
    }

    #[test]
    fn test_unknown_subject_is_empty() {
        let store = store();
        let projection = GraphProjector::new(&store).project("http://example.com/nothing");
        assert!(projection.properties.is_empty());
        assert!(projection.blank_node_groups.is_empty());
    }
}
