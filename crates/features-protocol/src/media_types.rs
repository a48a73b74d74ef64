//! Media types served by the API.

use serde::{Serialize, Serializer};
use std::fmt;

/// A response serialization the API knows how to name.
///
/// Parameters on incoming strings (`;charset=utf-8`, `;q=0.9`) are ignored
/// when parsing, except that the OpenAPI type is always emitted with its
/// `version=3.0` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MediaType {
    Html,
    Json,
    GeoJson,
    OpenApiJson,
    Turtle,
    RdfXml,
    JsonLd,
    N3,
    NTriples,
    SparqlResultsJson,
    Csv,
    Tsv,
}

impl MediaType {
    /// The RDF serializations, in preference order.
    pub const RDF: &'static [MediaType] = &[
        MediaType::Turtle,
        MediaType::RdfXml,
        MediaType::JsonLd,
        MediaType::N3,
        MediaType::NTriples,
    ];

    /// SPARQL SELECT/ASK result formats.
    pub const SPARQL_RESULTS: &'static [MediaType] = &[
        MediaType::SparqlResultsJson,
        MediaType::Csv,
        MediaType::Tsv,
    ];

    const ALL: &'static [MediaType] = &[
        MediaType::Html,
        MediaType::Json,
        MediaType::GeoJson,
        MediaType::OpenApiJson,
        MediaType::Turtle,
        MediaType::RdfXml,
        MediaType::JsonLd,
        MediaType::N3,
        MediaType::NTriples,
        MediaType::SparqlResultsJson,
        MediaType::Csv,
        MediaType::Tsv,
    ];

    /// The Content-Type value for this media type.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Html => "text/html",
            MediaType::Json => "application/json",
            MediaType::GeoJson => "application/geo+json",
            MediaType::OpenApiJson => "application/vnd.oai.openapi+json;version=3.0",
            MediaType::Turtle => "text/turtle",
            MediaType::RdfXml => "application/rdf+xml",
            MediaType::JsonLd => "application/ld+json",
            MediaType::N3 => "text/n3",
            MediaType::NTriples => "application/n-triples",
            MediaType::SparqlResultsJson => "application/sparql-results+json",
            MediaType::Csv => "text/csv",
            MediaType::Tsv => "text/tab-separated-values",
        }
    }

    /// Human-readable name, used in alternate-profile listings.
    pub fn label(&self) -> &'static str {
        match self {
            MediaType::Html => "HTML",
            MediaType::Json => "JSON",
            MediaType::GeoJson => "GeoJSON",
            MediaType::OpenApiJson => "OpenAPI 3.0 JSON",
            MediaType::Turtle => "Turtle",
            MediaType::RdfXml => "RDF/XML",
            MediaType::JsonLd => "JSON-LD",
            MediaType::N3 => "Notation-3",
            MediaType::NTriples => "N-Triples",
            MediaType::SparqlResultsJson => "SPARQL Results JSON",
            MediaType::Csv => "CSV",
            MediaType::Tsv => "TSV",
        }
    }

    /// File extension used for download attachments.
    pub fn file_extension(&self) -> &'static str {
        match self {
            MediaType::Html => "html",
            MediaType::Json | MediaType::OpenApiJson | MediaType::SparqlResultsJson => "json",
            MediaType::GeoJson => "geojson",
            MediaType::Turtle => "ttl",
            MediaType::RdfXml => "rdf",
            MediaType::JsonLd => "json",
            MediaType::N3 => "n3",
            MediaType::NTriples => "nt",
            MediaType::Csv => "csv",
            MediaType::Tsv => "tsv",
        }
    }

    /// Whether this is one of the RDF graph serializations.
    pub fn is_rdf(&self) -> bool {
        Self::RDF.contains(self)
    }

    /// Parse a full media type string such as `text/turtle; charset=utf-8`.
    pub fn parse(s: &str) -> Option<Self> {
        let essence = s.split(';').next()?.trim().to_ascii_lowercase();
        if essence == "application/vnd.oai.openapi+json" {
            return Some(MediaType::OpenApiJson);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == essence)
    }

    /// Parse a `_mediatype`/`_format` value: a full media type or a short alias.
    pub fn from_query_param(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Some(MediaType::Html),
            "json" => Some(MediaType::Json),
            "geojson" | "geo+json" => Some(MediaType::GeoJson),
            "openapi" => Some(MediaType::OpenApiJson),
            "turtle" | "ttl" => Some(MediaType::Turtle),
            "xml" | "rdf" | "rdfxml" => Some(MediaType::RdfXml),
            "jsonld" | "json-ld" => Some(MediaType::JsonLd),
            "n3" => Some(MediaType::N3),
            "nt" | "ntriples" | "n-triples" => Some(MediaType::NTriples),
            // '+' in a query string decodes to a space
            other => Self::parse(&other.replace(' ', "+")),
        }
    }

    /// Whether this media type satisfies an Accept range (`*/*`, `text/*` or exact).
    pub fn matches_range(&self, range: &str) -> bool {
        let range = range.trim();
        if range == "*/*" || range == "*" {
            return true;
        }
        if let Some(prefix) = range.strip_suffix("/*") {
            return self
                .as_str()
                .split('/')
                .next()
                .map(|t| t.eq_ignore_ascii_case(prefix))
                .unwrap_or(false);
        }
        Self::parse(range) == Some(*self)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MediaType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_parameters() {
        assert_eq!(
            MediaType::parse("text/turtle; charset=utf-8"),
            Some(MediaType::Turtle)
        );
        assert_eq!(
            MediaType::parse("application/vnd.oai.openapi+json;version=3.0"),
            Some(MediaType::OpenApiJson)
        );
        assert_eq!(MediaType::parse("TEXT/HTML"), Some(MediaType::Html));
        assert_eq!(MediaType::parse("application/xml"), None);
    }

    #[test]
    fn test_query_param_aliases() {
        assert_eq!(MediaType::from_query_param("ttl"), Some(MediaType::Turtle));
        assert_eq!(MediaType::from_query_param("jsonld"), Some(MediaType::JsonLd));
        assert_eq!(
            MediaType::from_query_param("application/geo json"),
            Some(MediaType::GeoJson)
        );
        assert_eq!(MediaType::from_query_param("yaml"), None);
    }

    #[test]
    fn test_matches_range() {
        assert!(MediaType::Turtle.matches_range("*/*"));
        assert!(MediaType::Turtle.matches_range("text/*"));
        assert!(!MediaType::Json.matches_range("text/*"));
        assert!(MediaType::Json.matches_range("application/json"));
        assert!(!MediaType::Json.matches_range("application/geo+json"));
    }

    #[test]
    fn test_rdf_family() {
        assert!(MediaType::N3.is_rdf());
        assert!(!MediaType::GeoJson.is_rdf());
        assert_eq!(MediaType::RDF.len(), 5);
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&MediaType::GeoJson).unwrap();
        assert_eq!(json, "\"application/geo+json\"");
    }
}
