//! Loading RDF files into a [`MemoryStore`].

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

use oxrdf::{BlankNode, Literal, NamedNode, Subject, Term, Triple};
use rio_api::model;
use rio_api::parser::TriplesParser;
use rio_turtle::{NTriplesParser, TurtleError, TurtleParser};
use rio_xml::{RdfXmlError, RdfXmlParser};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::store::{MemoryStore, TripleSource};

/// RDF syntaxes the loader reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    Turtle,
    NTriples,
    RdfXml,
}

impl RdfFormat {
    /// Guess the syntax from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "ttl" | "turtle" => Some(RdfFormat::Turtle),
            "nt" | "ntriples" => Some(RdfFormat::NTriples),
            "rdf" | "owl" | "xml" => Some(RdfFormat::RdfXml),
            _ => None,
        }
    }
}

/// Read a file into a new store, picking the syntax from its extension.
pub fn load_file(path: &Path) -> StoreResult<MemoryStore> {
    let format = RdfFormat::from_path(path)
        .ok_or_else(|| StoreError::UnsupportedFormat(path.display().to_string()))?;
    let reader = BufReader::new(File::open(path)?);

    let mut store = MemoryStore::new();
    let added = load_reader(&mut store, reader, format)?;

    info!(
        path = %path.display(),
        triples = added,
        format = ?format,
        "Loaded RDF data"
    );
    Ok(store)
}

/// Parse an in-memory document into a new store.
pub fn load_str(input: &str, format: RdfFormat) -> StoreResult<MemoryStore> {
    let mut store = MemoryStore::new();
    load_reader(&mut store, Cursor::new(input), format)?;
    Ok(store)
}

/// Parse triples from `reader` into `store`. Returns the number of new triples.
///
/// Turtle `@prefix` declarations are added to the store's prefix map.
pub fn load_reader(
    store: &mut MemoryStore,
    reader: impl BufRead,
    format: RdfFormat,
) -> StoreResult<usize> {
    let before = store.len();
    let mut skipped = 0usize;

    match format {
        RdfFormat::Turtle => {
            let mut parser = TurtleParser::new(reader, None);
            parser
                .parse_all(&mut |t| {
                    insert(store, &t, &mut skipped);
                    Ok::<(), TurtleError>(())
                })
                .map_err(|e| StoreError::Parse(e.to_string()))?;
            for (prefix, iri) in parser.prefixes() {
                store.prefixes_mut().bind(prefix.clone(), iri.clone());
            }
        }
        RdfFormat::NTriples => {
            NTriplesParser::new(reader)
                .parse_all(&mut |t| {
                    insert(store, &t, &mut skipped);
                    Ok::<(), TurtleError>(())
                })
                .map_err(|e| StoreError::Parse(e.to_string()))?;
        }
        RdfFormat::RdfXml => {
            RdfXmlParser::new(reader, None)
                .parse_all(&mut |t| {
                    insert(store, &t, &mut skipped);
                    Ok::<(), RdfXmlError>(())
                })
                .map_err(|e| StoreError::Parse(e.to_string()))?;
        }
    }

    if skipped > 0 {
        debug!(skipped, "Skipped quoted-triple statements");
    }
    Ok(store.len() - before)
}

fn insert(store: &mut MemoryStore, t: &model::Triple<'_>, skipped: &mut usize) {
    match convert_triple(t) {
        Some(triple) => {
            store.insert(triple);
        }
        None => *skipped += 1,
    }
}

/// Convert a parsed triple. Quoted (RDF-star) triples are not supported and
/// yield `None`.
fn convert_triple(t: &model::Triple<'_>) -> Option<Triple> {
    let subject = match t.subject {
        model::Subject::NamedNode(n) => Subject::NamedNode(NamedNode::new_unchecked(n.iri)),
        model::Subject::BlankNode(b) => Subject::BlankNode(BlankNode::new_unchecked(b.id)),
        _ => return None,
    };
    let predicate = NamedNode::new_unchecked(t.predicate.iri);
    let object = match t.object {
        model::Term::NamedNode(n) => Term::NamedNode(NamedNode::new_unchecked(n.iri)),
        model::Term::BlankNode(b) => Term::BlankNode(BlankNode::new_unchecked(b.id)),
        model::Term::Literal(l) => Term::Literal(convert_literal(l)),
        _ => return None,
    };
    Some(Triple::new(subject, predicate, object))
}

fn convert_literal(l: model::Literal<'_>) -> Literal {
    match l {
        model::Literal::Simple { value } => Literal::new_simple_literal(value),
        model::Literal::LanguageTaggedString { value, language } => {
            Literal::new_language_tagged_literal_unchecked(value, language.to_ascii_lowercase())
        }
        model::Literal::Typed { value, datatype } => {
            Literal::new_typed_literal(value, NamedNode::new_unchecked(datatype.iri))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::iri_subject;
    use crate::vocab::{dcterms, rdfs};

    const TTL: &str = r#"
        @prefix ex: <http://example.com/def/> .
        @prefix dcterms: <http://purl.org/dc/terms/> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

        <http://example.com/a> a ex:Thing ;
            dcterms:identifier "A" ;
            rdfs:label "Thing A"@EN ;
            ex:count 3 ;
            ex:part [ rdfs:label "nested" ] .
    "#;

    #[test]
    fn test_turtle_load() {
        let store = load_str(TTL, RdfFormat::Turtle).unwrap();
        assert_eq!(store.len(), 6);
        let a = iri_subject("http://example.com/a");
        assert_eq!(store.literal(&a, dcterms::IDENTIFIER).as_deref(), Some("A"));
        assert_eq!(store.literal(&a, rdfs::LABEL).as_deref(), Some("Thing A"));
    }

    #[test]
    fn test_turtle_prefixes_captured() {
        let store = load_str(TTL, RdfFormat::Turtle).unwrap();
        assert_eq!(store.prefixes().get("ex"), Some("http://example.com/def/"));
        assert_eq!(
            store.prefixes().compact("http://example.com/def/Thing"),
            "ex:Thing"
        );
    }

    #[test]
    fn test_language_tag_lowercased() {
        let store = load_str(TTL, RdfFormat::Turtle).unwrap();
        let a = iri_subject("http://example.com/a");
        let label = store.object(&a, rdfs::LABEL).unwrap();
        match label {
            Term::Literal(l) => assert_eq!(l.language(), Some("en")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_ntriples_load() {
        let nt = "<http://example.com/a> <http://purl.org/dc/terms/title> \"Title\" .\n";
        let store = load_str(nt, RdfFormat::NTriples).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_parse_error() {
        let err = load_str("<http://example.com/a> <broken", RdfFormat::Turtle).unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            RdfFormat::from_path(Path::new("data/features.ttl")),
            Some(RdfFormat::Turtle)
        );
        assert_eq!(RdfFormat::from_path(Path::new("x.nt")), Some(RdfFormat::NTriples));
        assert_eq!(RdfFormat::from_path(Path::new("x.csv")), None);
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.ttl");
        std::fs::write(&path, TTL).unwrap();
        let store = load_file(&path).unwrap();
        assert_eq!(store.len(), 6);
    }
}
