//! Vocabulary terms used by the API.

use oxrdf::NamedNodeRef;

macro_rules! terms {
    ($ns:literal; $($name:ident = $local:literal),* $(,)?) => {
        pub const NAMESPACE: &str = $ns;
        $(
            pub const $name: NamedNodeRef<'static> =
                NamedNodeRef::new_unchecked(concat!($ns, $local));
        )*
    };
}

pub mod rdf {
    use super::*;
    terms!("http://www.w3.org/1999/02/22-rdf-syntax-ns#";
        TYPE = "type",
    );
}

pub mod rdfs {
    use super::*;
    terms!("http://www.w3.org/2000/01/rdf-schema#";
        LABEL = "label",
        SUB_CLASS_OF = "subClassOf",
    );
}

pub mod xsd {
    use super::*;
    terms!("http://www.w3.org/2001/XMLSchema#";
        STRING = "string",
        INTEGER = "integer",
    );
}

pub mod skos {
    use super::*;
    terms!("http://www.w3.org/2004/02/skos/core#";
        PREF_LABEL = "prefLabel",
    );
}

pub mod dcterms {
    use super::*;
    terms!("http://purl.org/dc/terms/";
        IDENTIFIER = "identifier",
        TITLE = "title",
        DESCRIPTION = "description",
        IS_PART_OF = "isPartOf",
        HAS_PART = "hasPart",
        COLLECTION = "Collection",
        CONFORMS_TO = "conformsTo",
        FORMAT = "format",
    );
}

pub mod dcat {
    use super::*;
    terms!("http://www.w3.org/ns/dcat#";
        DATASET = "Dataset",
        BBOX = "bbox",
    );
}

pub mod geo {
    use super::*;
    terms!("http://www.opengis.net/ont/geosparql#";
        FEATURE = "Feature",
        HAS_GEOMETRY = "hasGeometry",
        AS_WKT = "asWKT",
        AS_GEOJSON = "asGeoJSON",
        AS_DGGS = "asDGGS",
        WKT_LITERAL = "wktLiteral",
        GEO_JSON_LITERAL = "geoJSONLiteral",
        HAS_METRIC_AREA = "hasMetricArea",
        HAS_AREA = "hasArea",
        HAS_LENGTH = "hasLength",
        HAS_PERIMETER_LENGTH = "hasPerimeterLength",
        HAS_VOLUME = "hasVolume",
        SF_CONTAINS = "sfContains",
        SF_CROSSES = "sfCrosses",
        SF_DISJOINT = "sfDisjoint",
        SF_EQUALS = "sfEquals",
        SF_INTERSECTS = "sfIntersects",
        SF_OVERLAPS = "sfOverlaps",
        SF_TOUCHES = "sfTouches",
        SF_WITHIN = "sfWithin",
    );
}

pub mod geox {
    use super::*;
    terms!("https://linked.data.gov.au/def/geox#";
        AS_DGGS = "asDGGS",
        DGGS_LITERAL = "DggsLiteral",
        HAS_ROLE = "hasRole",
        IN_CRS = "inCRS",
        FEATURE_COUNT = "featureCount",
        HAS_AREA_M2 = "hasAreaM2",
    );
}

pub mod ogcapi {
    use super::*;
    terms!("https://data.surroundaustralia.com/def/ogcldapi/";
        FEATURE_COLLECTION = "FeatureCollection",
        COLLECTION = "Collection",
        CONFORMANCE_TARGET = "ConformanceTarget",
    );
}

pub mod ldp {
    use super::*;
    terms!("http://www.w3.org/ns/ldp#";
        PAGE = "Page",
        PAGE_OF = "pageOf",
    );
}

pub mod xhv {
    use super::*;
    terms!("https://www.w3.org/1999/xhtml/vocab#";
        FIRST = "first",
        LAST = "last",
        PREV = "prev",
        NEXT = "next",
    );
}

pub mod sd {
    use super::*;
    terms!("http://www.w3.org/ns/sparql-service-description#";
        SERVICE = "Service",
        ENDPOINT = "endpoint",
        SUPPORTED_LANGUAGE = "supportedLanguage",
        SPARQL11_QUERY = "SPARQL11Query",
        RESULT_FORMAT = "resultFormat",
        FEATURE = "feature",
        BASIC_FEDERATED_QUERY = "BasicFederatedQuery",
        DEFAULT_DATASET = "defaultDataset",
        DATASET = "Dataset",
        DEFAULT_GRAPH = "defaultGraph",
        GRAPH = "Graph",
    );
}

pub mod altr {
    use super::*;
    terms!("http://www.w3.org/ns/dx/conneg/altr#";
        REPRESENTATION = "Representation",
        HAS_REPRESENTATION = "hasRepresentation",
        HAS_DEFAULT_REPRESENTATION = "hasDefaultRepresentation",
    );
}

/// Prefixes bound for every graph, in addition to those declared by the data.
pub const DEFAULT_PREFIXES: &[(&str, &str)] = &[
    ("rdf", rdf::NAMESPACE),
    ("rdfs", rdfs::NAMESPACE),
    ("xsd", xsd::NAMESPACE),
    ("skos", skos::NAMESPACE),
    ("dcterms", dcterms::NAMESPACE),
    ("dcat", dcat::NAMESPACE),
    ("geo", geo::NAMESPACE),
    ("geox", geox::NAMESPACE),
    ("ogcapi", ogcapi::NAMESPACE),
    ("ldp", ldp::NAMESPACE),
    ("xhv", xhv::NAMESPACE),
    ("sd", sd::NAMESPACE),
    ("altr", altr::NAMESPACE),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terms_expand() {
        assert_eq!(
            geo::HAS_GEOMETRY.as_str(),
            "http://www.opengis.net/ont/geosparql#hasGeometry"
        );
        assert_eq!(
            ogcapi::FEATURE_COLLECTION.as_str(),
            "https://data.surroundaustralia.com/def/ogcldapi/FeatureCollection"
        );
    }

    #[test]
    fn test_geo_and_geox_dggs_differ() {
        assert_ne!(geo::AS_DGGS, geox::AS_DGGS);
    }
}
