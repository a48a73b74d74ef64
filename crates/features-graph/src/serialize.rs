//! Writing triples in the RDF syntaxes the API offers.

use std::io;

use features_protocol::MediaType;
use indexmap::IndexMap;
use oxrdf::{Subject, Term, Triple};
use rio_api::formatter::TriplesFormatter;
use rio_api::model;
use rio_turtle::{NTriplesFormatter, TurtleFormatter};
use rio_xml::RdfXmlFormatter;
use serde_json::{json, Value};

use crate::error::{SerializeError, SerializeResult};
use crate::vocab::xsd;

/// Serialize `triples` as `media_type`.
///
/// Turtle and N3 share the Turtle writer. JSON-LD is written in expanded
/// form, one node object per subject.
pub fn serialize(triples: &[Triple], media_type: MediaType) -> SerializeResult<String> {
    let bytes = match media_type {
        MediaType::Turtle | MediaType::N3 => {
            let mut formatter = TurtleFormatter::new(Vec::new());
            format_all(&mut formatter, triples)?;
            formatter.finish()?
        }
        MediaType::NTriples => {
            let mut formatter = NTriplesFormatter::new(Vec::new());
            format_all(&mut formatter, triples)?;
            formatter.finish()?
        }
        MediaType::RdfXml => {
            let mut formatter = RdfXmlFormatter::new(Vec::new())?;
            format_all(&mut formatter, triples)?;
            formatter.finish()?
        }
        MediaType::JsonLd => return to_json_ld(triples),
        other => {
            return Err(SerializeError::UnsupportedMediaType(
                other.as_str().to_string(),
            ))
        }
    };

    String::from_utf8(bytes).map_err(|e| SerializeError::Serialize(e.to_string()))
}

fn format_all<F>(formatter: &mut F, triples: &[Triple]) -> SerializeResult<()>
where
    F: TriplesFormatter<Error = io::Error>,
{
    for triple in triples {
        if let Some(t) = to_rio(triple) {
            formatter.format(&t)?;
        }
    }
    Ok(())
}

fn to_rio(triple: &Triple) -> Option<model::Triple<'_>> {
    let subject = match &triple.subject {
        Subject::NamedNode(n) => model::Subject::NamedNode(model::NamedNode { iri: n.as_str() }),
        Subject::BlankNode(b) => model::Subject::BlankNode(model::BlankNode { id: b.as_str() }),
        #[allow(unreachable_patterns)]
        _ => return None,
    };
    let object = match &triple.object {
        Term::NamedNode(n) => model::Term::NamedNode(model::NamedNode { iri: n.as_str() }),
        Term::BlankNode(b) => model::Term::BlankNode(model::BlankNode { id: b.as_str() }),
        Term::Literal(l) => model::Term::Literal(match l.language() {
            Some(language) => model::Literal::LanguageTaggedString {
                value: l.value(),
                language,
            },
            None if l.datatype() == xsd::STRING => model::Literal::Simple { value: l.value() },
            None => model::Literal::Typed {
                value: l.value(),
                datatype: model::NamedNode {
                    iri: l.datatype().as_str(),
                },
            },
        }),
        #[allow(unreachable_patterns)]
        _ => return None,
    };

    Some(model::Triple {
        subject,
        predicate: model::NamedNode {
            iri: triple.predicate.as_str(),
        },
        object,
    })
}

fn node_id(subject: &Subject) -> Option<String> {
    match subject {
        Subject::NamedNode(n) => Some(n.as_str().to_string()),
        Subject::BlankNode(b) => Some(format!("_:{}", b.as_str())),
        #[allow(unreachable_patterns)]
        _ => None,
    }
}

fn json_ld_value(term: &Term) -> Option<Value> {
    Some(match term {
        Term::NamedNode(n) => json!({ "@id": n.as_str() }),
        Term::BlankNode(b) => json!({ "@id": format!("_:{}", b.as_str()) }),
        Term::Literal(l) => match l.language() {
            Some(lang) => json!({ "@value": l.value(), "@language": lang }),
            None if l.datatype() == xsd::STRING => json!({ "@value": l.value() }),
            None => json!({ "@value": l.value(), "@type": l.datatype().as_str() }),
        },
        #[allow(unreachable_patterns)]
        _ => return None,
    })
}

/// Expanded JSON-LD, subjects in first-seen order.
fn to_json_ld(triples: &[Triple]) -> SerializeResult<String> {
    // subjects and predicates keep first-seen order
    let mut nodes: IndexMap<String, IndexMap<String, Vec<Value>>> = IndexMap::new();

    for triple in triples {
        let (Some(id), Some(value)) = (node_id(&triple.subject), json_ld_value(&triple.object))
        else {
            continue;
        };
        nodes
            .entry(id)
            .or_default()
            .entry(triple.predicate.as_str().to_string())
            .or_default()
            .push(value);
    }

    let output: Vec<Value> = nodes
        .into_iter()
        .map(|(id, props)| {
            let mut node = serde_json::Map::new();
            node.insert("@id".to_string(), Value::String(id));
            for (predicate, values) in props {
                node.insert(predicate, Value::Array(values));
            }
            Value::Object(node)
        })
        .collect();

    serde_json::to_string_pretty(&output).map_err(|e| SerializeError::Serialize(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{dcterms, rdf, rdfs};
    use oxrdf::{BlankNode, Literal, NamedNode};

    fn triples() -> Vec<Triple> {
        let f = NamedNode::new_unchecked("http://example.com/f/1");
        let g = BlankNode::new_unchecked("g1");
        vec![
            Triple::new(
                f.clone(),
                rdf::TYPE.into_owned(),
                NamedNode::new_unchecked("http://www.opengis.net/ont/geosparql#Feature"),
            ),
            Triple::new(
                f.clone(),
                dcterms::IDENTIFIER.into_owned(),
                Literal::new_simple_literal("F1"),
            ),
            Triple::new(
                f.clone(),
                rdfs::LABEL.into_owned(),
                Literal::new_language_tagged_literal_unchecked("Lake", "en"),
            ),
            Triple::new(
                f,
                NamedNode::new_unchecked("http://www.opengis.net/ont/geosparql#hasGeometry"),
                g.clone(),
            ),
            Triple::new(
                g,
                NamedNode::new_unchecked("http://www.opengis.net/ont/geosparql#asWKT"),
                Literal::new_typed_literal(
                    "POINT (1 2)",
                    NamedNode::new_unchecked("http://www.opengis.net/ont/geosparql#wktLiteral"),
                ),
            ),
        ]
    }

    #[test]
    fn test_turtle_output() {
        let ttl = serialize(&triples(), MediaType::Turtle).unwrap();
        assert!(ttl.contains("<http://example.com/f/1>"));
        assert!(ttl.contains("\"Lake\"@en"));
        assert!(ttl.contains("^^<http://www.opengis.net/ont/geosparql#wktLiteral>"));
    }

    #[test]
    fn test_ntriples_one_line_per_triple() {
        let nt = serialize(&triples(), MediaType::NTriples).unwrap();
        assert_eq!(nt.lines().filter(|l| !l.trim().is_empty()).count(), 5);
    }

    #[test]
    fn test_rdf_xml_output() {
        let xml = serialize(&triples(), MediaType::RdfXml).unwrap();
        assert!(xml.contains("rdf:RDF"));
        assert!(xml.contains("http://example.com/f/1"));
    }

    #[test]
    fn test_json_ld_grouped_by_subject() {
        let out = serialize(&triples(), MediaType::JsonLd).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        let nodes = value.as_array().unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0]["@id"], "http://example.com/f/1");
        assert_eq!(
            nodes[0]["http://purl.org/dc/terms/identifier"][0]["@value"],
            "F1"
        );
        // plain strings carry no datatype
        assert!(nodes[0]["http://purl.org/dc/terms/identifier"][0]
            .get("@type")
            .is_none());
        assert_eq!(
            nodes[0]["http://www.w3.org/2000/01/rdf-schema#label"][0]["@language"],
            "en"
        );
        assert_eq!(nodes[1]["@id"], "_:g1");
    }

    #[test]
    fn test_json_ld_many_subjects_keep_order() {
        let triples: Vec<Triple> = (0..5000)
            .flat_map(|i| {
                let f = NamedNode::new_unchecked(format!("http://example.com/f/{}", i));
                [
                    Triple::new(
                        f.clone(),
                        dcterms::IDENTIFIER.into_owned(),
                        Literal::new_simple_literal(i.to_string()),
                    ),
                    Triple::new(f, rdfs::LABEL.into_owned(), Literal::new_simple_literal("x")),
                ]
            })
            .collect();
        let out = serialize(&triples, MediaType::JsonLd).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        let nodes = value.as_array().unwrap();
        assert_eq!(nodes.len(), 5000);
        assert_eq!(nodes[0]["@id"], "http://example.com/f/0");
        assert_eq!(nodes[4999]["@id"], "http://example.com/f/4999");
        assert_eq!(nodes[4999]["http://purl.org/dc/terms/identifier"][0]["@value"], "4999");
    }

    #[test]
    fn test_non_rdf_media_type_rejected() {
        let err = serialize(&triples(), MediaType::Html).unwrap_err();
        assert!(matches!(err, SerializeError::UnsupportedMediaType(ref t) if t == "text/html"));
    }
}
