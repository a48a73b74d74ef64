//! RDF graphs for the `dcat` and `geosp` profiles and the SPARQL service
//! description.

use features_graph::oxrdf::{BlankNode, Literal, NamedNode, Triple};
use features_graph::vocab::{dcat, dcterms, geo, geox, ldp, rdf, rdfs, sd, xhv, xsd};
use features_graph::serialize;
use features_protocol::pagination::link_for;
use features_protocol::{Geometry, GeometryEncoding, MediaType, PageLinkKind, PageWindow};

use crate::error::ApiError;
use crate::models::ResourceModel;

/// W3C format URIs for `sd:resultFormat`.
const FORMATS_NAMESPACE: &str = "http://www.w3.org/ns/formats/";

fn iri(uri: &str) -> NamedNode {
    NamedNode::new_unchecked(uri)
}

fn plain(value: &str) -> Literal {
    Literal::new_simple_literal(value)
}

/// Triples shared by every entity: identifier, title and description.
fn describe(subject: &NamedNode, model: &ResourceModel, out: &mut Vec<Triple>) {
    out.push(Triple::new(
        subject.clone(),
        dcterms::IDENTIFIER.into_owned(),
        plain(&model.identifier),
    ));
    out.push(Triple::new(
        subject.clone(),
        rdfs::LABEL.into_owned(),
        plain(&model.title),
    ));
    if let Some(description) = &model.description {
        out.push(Triple::new(
            subject.clone(),
            dcterms::DESCRIPTION.into_owned(),
            plain(description),
        ));
    }
}

/// The dataset as a DCAT graph.
pub fn dataset_graph(model: &ResourceModel) -> Vec<Triple> {
    let subject = iri(&model.uri);
    let mut out = vec![
        Triple::new(subject.clone(), rdf::TYPE.into_owned(), dcat::DATASET.into_owned()),
        Triple::new(subject.clone(), dcterms::TITLE.into_owned(), plain(&model.title)),
    ];
    if let Some(description) = &model.description {
        out.push(Triple::new(
            subject,
            dcterms::DESCRIPTION.into_owned(),
            plain(description),
        ));
    }
    out
}

/// A collection as a `dcterms:Collection`.
pub fn collection_graph(model: &ResourceModel) -> Vec<Triple> {
    let subject = iri(&model.uri);
    let mut out = vec![Triple::new(
        subject.clone(),
        rdf::TYPE.into_owned(),
        dcterms::COLLECTION.into_owned(),
    )];
    describe(&subject, model, &mut out);
    out
}

fn geometry_predicate(encoding: GeometryEncoding) -> (NamedNode, NamedNode) {
    match encoding {
        GeometryEncoding::Wkt => (geo::AS_WKT.into_owned(), geo::WKT_LITERAL.into_owned()),
        GeometryEncoding::Dggs => (geox::AS_DGGS.into_owned(), geox::DGGS_LITERAL.into_owned()),
        GeometryEncoding::GeoJson => (
            geo::AS_GEOJSON.into_owned(),
            geo::GEO_JSON_LITERAL.into_owned(),
        ),
    }
}

fn geometry_node(feature: &NamedNode, geometry: &Geometry, out: &mut Vec<Triple>) {
    let node = BlankNode::default();
    out.push(Triple::new(
        feature.clone(),
        geo::HAS_GEOMETRY.into_owned(),
        node.clone(),
    ));
    out.push(Triple::new(
        node.clone(),
        rdfs::LABEL.into_owned(),
        plain(&geometry.label),
    ));
    out.push(Triple::new(
        node.clone(),
        geox::HAS_ROLE.into_owned(),
        iri(&geometry.role.uri()),
    ));
    out.push(Triple::new(
        node.clone(),
        geox::IN_CRS.into_owned(),
        iri(geometry.crs.uri()),
    ));
    let (predicate, datatype) = geometry_predicate(geometry.encoding);
    out.push(Triple::new(
        node,
        predicate,
        Literal::new_typed_literal(geometry.coordinates.as_str(), datatype),
    ));
}

/// A feature as a GeoSPARQL graph, one geometry node per encoding.
pub fn feature_graph(model: &ResourceModel) -> Vec<Triple> {
    let subject = iri(&model.uri);
    let mut out = vec![Triple::new(
        subject.clone(),
        rdf::TYPE.into_owned(),
        geo::FEATURE.into_owned(),
    )];
    describe(&subject, model, &mut out);
    if let Some(collection) = &model.is_part_of {
        out.push(Triple::new(
            subject.clone(),
            dcterms::IS_PART_OF.into_owned(),
            iri(collection),
        ));
    }
    for geometry in model.geometries.values() {
        geometry_node(&subject, geometry, &mut out);
    }
    out
}

/// One page of a collection's members as an LDP page.
///
/// The page carries `xhv` links for the pages that exist, the collection
/// carries its member count, and every member is described with its
/// GeoSPARQL graph and its `dcterms:isPartOf` the collection.
pub fn items_page_graph(
    items_uri: &str,
    window: &PageWindow,
    collection: &ResourceModel,
    members: &[ResourceModel],
) -> Vec<Triple> {
    let collection_node = iri(&collection.uri);
    let page = iri(&link_for(items_uri, window.per_page, window.page));

    let mut out = vec![
        Triple::new(page.clone(), rdf::TYPE.into_owned(), ldp::PAGE.into_owned()),
        Triple::new(
            page.clone(),
            ldp::PAGE_OF.into_owned(),
            collection_node.clone(),
        ),
    ];

    let page_links = [
        (PageLinkKind::First, xhv::FIRST),
        (PageLinkKind::Last, xhv::LAST),
        (PageLinkKind::Prev, xhv::PREV),
        (PageLinkKind::Next, xhv::NEXT),
    ];
    for (kind, predicate) in page_links {
        if let Some(target) = window.target(kind) {
            out.push(Triple::new(
                page.clone(),
                predicate.into_owned(),
                iri(&link_for(items_uri, window.per_page, target)),
            ));
        }
    }

    out.extend(collection_graph(collection));
    out.push(Triple::new(
        collection_node.clone(),
        geox::FEATURE_COUNT.into_owned(),
        Literal::new_typed_literal(window.total_count.to_string(), xsd::INTEGER.into_owned()),
    ));

    for member in members {
        out.extend(feature_graph(member));
        out.push(Triple::new(
            iri(&member.uri),
            dcterms::IS_PART_OF.into_owned(),
            collection_node.clone(),
        ));
    }
    out
}

fn format_uri(media_type: MediaType) -> Option<String> {
    let local = match media_type {
        MediaType::SparqlResultsJson => "SPARQL_Results_JSON",
        MediaType::Csv => "SPARQL_Results_CSV",
        MediaType::Tsv => "SPARQL_Results_TSV",
        MediaType::Turtle => "Turtle",
        MediaType::RdfXml => "RDF_XML",
        MediaType::JsonLd => "JSON-LD",
        MediaType::N3 => "N3",
        MediaType::NTriples => "N-Triples",
        _ => return None,
    };
    Some(format!("{}{}", FORMATS_NAMESPACE, local))
}

/// The SPARQL 1.1 service description of the `/sparql` endpoint.
pub fn service_description(endpoint_uri: &str) -> Vec<Triple> {
    let service = BlankNode::default();
    let dataset = BlankNode::default();
    let graph = BlankNode::default();

    let mut out = vec![
        Triple::new(service.clone(), rdf::TYPE.into_owned(), sd::SERVICE.into_owned()),
        Triple::new(service.clone(), sd::ENDPOINT.into_owned(), iri(endpoint_uri)),
        Triple::new(
            service.clone(),
            sd::SUPPORTED_LANGUAGE.into_owned(),
            sd::SPARQL11_QUERY.into_owned(),
        ),
        Triple::new(
            service.clone(),
            sd::FEATURE.into_owned(),
            sd::BASIC_FEDERATED_QUERY.into_owned(),
        ),
    ];

    for media_type in MediaType::SPARQL_RESULTS.iter().chain(MediaType::RDF) {
        if let Some(format) = format_uri(*media_type) {
            out.push(Triple::new(
                service.clone(),
                sd::RESULT_FORMAT.into_owned(),
                iri(&format),
            ));
        }
    }

    out.push(Triple::new(
        service,
        sd::DEFAULT_DATASET.into_owned(),
        dataset.clone(),
    ));
    out.push(Triple::new(
        dataset.clone(),
        rdf::TYPE.into_owned(),
        sd::DATASET.into_owned(),
    ));
    out.push(Triple::new(
        dataset,
        sd::DEFAULT_GRAPH.into_owned(),
        graph.clone(),
    ));
    out.push(Triple::new(graph, rdf::TYPE.into_owned(), sd::GRAPH.into_owned()));
    out
}

/// Serialize a graph in an RDF media type.
pub fn render(triples: &[Triple], media_type: MediaType) -> Result<String, ApiError> {
    Ok(serialize(triples, media_type)?)
}
