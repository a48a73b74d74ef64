//! Human labels for IRIs.

use std::collections::{HashSet, VecDeque};

use oxrdf::{NamedNodeRef, Subject, Term};

use crate::store::{term_as_subject, TripleSource};
use crate::vocab::{dcterms, geo, rdf, rdfs, skos};

/// Predicates carrying a display label, in preference order.
pub const LABEL_PREDICATES: [NamedNodeRef<'static>; 3] =
    [rdfs::LABEL, skos::PREF_LABEL, dcterms::TITLE];

/// Fixed display names for predicates on feature pages. These take
/// precedence over labels found in the graph.
pub const FEATURE_PREDICATE_LABELS: [(NamedNodeRef<'static>, &str); 3] = [
    (rdf::TYPE, "Type"),
    (dcterms::IDENTIFIER, "Identifier"),
    (dcterms::IS_PART_OF, "Is part of Feature Collection"),
];

/// Whether a literal's language is untagged or English.
fn is_display_language(language: Option<&str>) -> bool {
    match language {
        None => true,
        Some(lang) => lang.is_empty() || lang.eq_ignore_ascii_case("en"),
    }
}

/// The display label of a node, if the graph has one in English or untagged.
pub fn label_for(source: &dyn TripleSource, subject: &Subject) -> Option<String> {
    let triples = source.triples_for_subject(subject);
    LABEL_PREDICATES.iter().find_map(|predicate| {
        triples
            .iter()
            .filter(|t| t.predicate.as_ref() == *predicate)
            .find_map(|t| match &t.object {
                Term::Literal(l) if is_display_language(l.language()) => {
                    Some(l.value().to_string())
                }
                _ => None,
            })
    })
}

/// The display label of a term. Literals have no label.
pub fn term_label(source: &dyn TripleSource, term: &Term) -> Option<String> {
    match term {
        Term::Literal(_) => None,
        other => term_as_subject(other).and_then(|s| label_for(source, &s)),
    }
}

/// The label of the most specific class of `subject` that is `geo:Feature`
/// or one of its (transitive) subclasses.
pub fn feature_class_label(source: &dyn TripleSource, subject: &Subject) -> Option<String> {
    source
        .objects(subject, rdf::TYPE)
        .iter()
        .filter_map(|class| {
            let class = term_as_subject(class)?;
            let depth = depth_below_feature(source, &class)?;
            let label = label_for(source, &class)?;
            Some((depth, label))
        })
        // first of the deepest classes wins
        .fold(None, |best: Option<(usize, String)>, (depth, label)| match best {
            Some((d, _)) if d >= depth => best,
            _ => Some((depth, label)),
        })
        .map(|(_, label)| label)
}

/// Number of `rdfs:subClassOf` steps from `class` up to `geo:Feature`.
fn depth_below_feature(source: &dyn TripleSource, class: &Subject) -> Option<usize> {
    let feature = Subject::NamedNode(geo::FEATURE.into_owned());
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([(class.clone(), 0usize)]);

    while let Some((current, depth)) = queue.pop_front() {
        if current == feature {
            return Some(depth);
        }
        if !seen.insert(current.clone()) {
            continue;
        }
        for parent in source.objects(&current, rdfs::SUB_CLASS_OF) {
            if let Some(parent) = term_as_subject(&parent) {
                queue.push_back((parent, depth + 1));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{load_str, RdfFormat};
    use crate::store::iri_subject;

    const TTL: &str = r#"
        @prefix geo: <http://www.opengis.net/ont/geosparql#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix skos: <http://www.w3.org/2004/02/skos/core#> .
        @prefix ex: <http://example.com/def/> .

        geo:Feature rdfs:label "Feature" .
        ex:Waterbody rdfs:subClassOf geo:Feature ; rdfs:label "Waterbody" .
        ex:Lake rdfs:subClassOf ex:Waterbody ; rdfs:label "Lake"@en , "Lac"@fr .
        ex:Unrelated rdfs:label "Unrelated" .

        ex:p1 rdfs:label "Etiquette"@fr ; skos:prefLabel "Preferred" .

        <http://example.com/lake/1> a geo:Feature , ex:Lake , ex:Unrelated .
        <http://example.com/thing/1> a ex:Unrelated .
    "#;

    fn store() -> crate::store::MemoryStore {
        load_str(TTL, RdfFormat::Turtle).unwrap()
    }

    #[test]
    fn test_language_filter() {
        let store = store();
        assert_eq!(
            label_for(&store, &iri_subject("http://example.com/def/Lake")).as_deref(),
            Some("Lake")
        );
        // French rdfs:label skipped, falls through to skos:prefLabel
        assert_eq!(
            label_for(&store, &iri_subject("http://example.com/def/p1")).as_deref(),
            Some("Preferred")
        );
    }

    #[test]
    fn test_most_specific_class_label() {
        let store = store();
        let lake = iri_subject("http://example.com/lake/1");
        assert_eq!(feature_class_label(&store, &lake).as_deref(), Some("Lake"));
    }

    #[test]
    fn test_no_feature_class() {
        let store = store();
        let thing = iri_subject("http://example.com/thing/1");
        assert_eq!(feature_class_label(&store, &thing), None);
    }

    #[test]
    fn test_literal_has_no_label() {
        let store = store();
        let literal = Term::Literal(oxrdf::Literal::new_simple_literal("x"));
        assert_eq!(term_label(&store, &literal), None);
    }
}
