//! The backing triple source.

use std::collections::{HashMap, HashSet};

use oxrdf::{NamedNode, NamedNodeRef, Subject, Term, Triple};

use crate::prefixes::PrefixMap;
use crate::vocab::rdf;

/// Read access to an RDF graph.
///
/// Implementations must be safe for concurrent readers; a store is shared by
/// every in-flight request.
pub trait TripleSource: Send + Sync {
    /// Triples with this subject, in insertion order.
    fn triples_for_subject(&self, subject: &Subject) -> Vec<&Triple>;

    /// Subjects of triples with this predicate and object, in insertion order.
    fn subjects_for(&self, predicate: NamedNodeRef<'_>, object: &Term) -> Vec<Subject>;

    /// Every triple in the graph, in insertion order.
    fn triples(&self) -> Box<dyn Iterator<Item = &Triple> + '_>;

    /// Namespace bindings declared by the data plus the defaults.
    fn prefixes(&self) -> &PrefixMap;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Objects of `subject predicate ?o`, in insertion order.
    fn objects(&self, subject: &Subject, predicate: NamedNodeRef<'_>) -> Vec<Term> {
        self.triples_for_subject(subject)
            .into_iter()
            .filter(|t| t.predicate.as_ref() == predicate)
            .map(|t| t.object.clone())
            .collect()
    }

    /// The first object of `subject predicate ?o`.
    fn object(&self, subject: &Subject, predicate: NamedNodeRef<'_>) -> Option<Term> {
        self.triples_for_subject(subject)
            .into_iter()
            .find(|t| t.predicate.as_ref() == predicate)
            .map(|t| t.object.clone())
    }

    /// The lexical value of the first literal object of `subject predicate ?o`.
    fn literal(&self, subject: &Subject, predicate: NamedNodeRef<'_>) -> Option<String> {
        self.triples_for_subject(subject)
            .into_iter()
            .filter(|t| t.predicate.as_ref() == predicate)
            .find_map(|t| match &t.object {
                Term::Literal(l) => Some(l.value().to_string()),
                _ => None,
            })
    }

    /// Whether `subject rdf:type class` holds.
    fn has_type(&self, subject: &Subject, class: NamedNodeRef<'_>) -> bool {
        self.triples_for_subject(subject)
            .into_iter()
            .any(|t| t.predicate.as_ref() == rdf::TYPE && term_is(&t.object, class))
    }

    /// Subjects typed `class`, in insertion order.
    fn subjects_of_type(&self, class: NamedNodeRef<'_>) -> Vec<Subject> {
        self.subjects_for(rdf::TYPE, &Term::NamedNode(class.into_owned()))
    }
}

/// Whether a term is the given named node.
pub fn term_is(term: &Term, node: NamedNodeRef<'_>) -> bool {
    matches!(term, Term::NamedNode(n) if n.as_ref() == node)
}

/// A named-node subject for an IRI.
pub fn iri_subject(iri: &str) -> Subject {
    Subject::NamedNode(NamedNode::new_unchecked(iri))
}

/// The subject form of a term, when the term can be a subject.
pub fn term_as_subject(term: &Term) -> Option<Subject> {
    match term {
        Term::NamedNode(n) => Some(Subject::NamedNode(n.clone())),
        Term::BlankNode(b) => Some(Subject::BlankNode(b.clone())),
        _ => None,
    }
}

/// An in-memory graph indexed by subject and by predicate/object.
///
/// Duplicate triples are ignored; iteration follows first insertion.
#[derive(Debug, Default)]
pub struct MemoryStore {
    triples: Vec<Triple>,
    seen: HashSet<Triple>,
    by_subject: HashMap<Subject, Vec<usize>>,
    by_predicate_object: HashMap<(NamedNode, Term), Vec<usize>>,
    prefixes: PrefixMap,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            prefixes: PrefixMap::with_defaults(),
            ..Default::default()
        }
    }

    /// Insert a triple. Returns false if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        if self.seen.contains(&triple) {
            return false;
        }
        let idx = self.triples.len();
        self.by_subject
            .entry(triple.subject.clone())
            .or_default()
            .push(idx);
        self.by_predicate_object
            .entry((triple.predicate.clone(), triple.object.clone()))
            .or_default()
            .push(idx);
        self.seen.insert(triple.clone());
        self.triples.push(triple);
        true
    }

    pub fn extend(&mut self, triples: impl IntoIterator<Item = Triple>) {
        for triple in triples {
            self.insert(triple);
        }
    }

    pub fn prefixes_mut(&mut self) -> &mut PrefixMap {
        &mut self.prefixes
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.seen.contains(triple)
    }
}

impl TripleSource for MemoryStore {
    fn triples_for_subject(&self, subject: &Subject) -> Vec<&Triple> {
        self.by_subject
            .get(subject)
            .map(|idxs| idxs.iter().map(|&i| &self.triples[i]).collect())
            .unwrap_or_default()
    }

    fn subjects_for(&self, predicate: NamedNodeRef<'_>, object: &Term) -> Vec<Subject> {
        let key = (predicate.into_owned(), object.clone());
        let mut seen = HashSet::new();
        self.by_predicate_object
            .get(&key)
            .map(|idxs| {
                idxs.iter()
                    .map(|&i| self.triples[i].subject.clone())
                    .filter(|s| seen.insert(s.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn triples(&self) -> Box<dyn Iterator<Item = &Triple> + '_> {
        Box::new(self.triples.iter())
    }

    fn prefixes(&self) -> &PrefixMap {
        &self.prefixes
    }

    fn len(&self) -> usize {
        self.triples.len()
    }
}
