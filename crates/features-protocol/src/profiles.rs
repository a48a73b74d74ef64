//! The profile catalogue and per-endpoint profile sets.
//!
//! A profile is a named view of a resource. Each endpoint offers a fixed set
//! of profiles and a fixed allow-list of query parameters; both are static
//! and shared by every request.

use serde::Serialize;

use crate::media_types::MediaType;

/// A named view of a resource.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Profile {
    /// Short token used in `_profile=` query parameters.
    pub token: &'static str,
    /// Stable URI identifying the profile.
    pub uri: &'static str,
    pub label: &'static str,
    pub comment: &'static str,
    /// Acceptable media types, in preference order.
    pub media_types: &'static [MediaType],
    pub default_media_type: MediaType,
    pub languages: &'static [&'static str],
    pub default_language: &'static str,
}

impl Profile {
    /// Whether the profile can be served as `media_type`.
    pub fn supports(&self, media_type: MediaType) -> bool {
        self.media_types.contains(&media_type)
    }
}

const LANGUAGES: &[&str] = &["en"];

const RDF_AND_HTML_JSON: &[MediaType] = &[
    MediaType::Html,
    MediaType::Json,
    MediaType::Turtle,
    MediaType::RdfXml,
    MediaType::JsonLd,
    MediaType::N3,
    MediaType::NTriples,
];

/// OGC API - Features view (HTML, GeoJSON, JSON, OpenAPI).
pub const OAI: Profile = Profile {
    token: "oai",
    uri: "http://www.opengis.net/spec/ogcapi-features-1/1.0/req/oas30",
    label: "OpenAPI 3.0",
    comment: "The OpenAPI Specification (OAS) defines a standard, language-agnostic interface to RESTful APIs",
    media_types: &[
        MediaType::Html,
        MediaType::GeoJson,
        MediaType::Json,
        MediaType::OpenApiJson,
    ],
    default_media_type: MediaType::Html,
    languages: LANGUAGES,
    default_language: "en",
};

/// Dataset Catalogue Vocabulary view.
pub const DCAT: Profile = Profile {
    token: "dcat",
    uri: "https://www.w3.org/TR/vocab-dcat/",
    label: "DCAT",
    comment: "Dataset Catalogue Vocabulary (DCAT) is a W3C-authored RDF vocabulary designed to facilitate interoperability between data catalogs published on the Web",
    media_types: RDF_AND_HTML_JSON,
    default_media_type: MediaType::Html,
    languages: LANGUAGES,
    default_language: "en",
};

/// GeoSPARQL RDF view.
pub const GEOSP: Profile = Profile {
    token: "geosp",
    uri: "http://www.opengis.net/ont/geosparql",
    label: "GeoSPARQL",
    comment: "An RDF/OWL vocabulary for representing spatial information",
    media_types: MediaType::RDF,
    default_media_type: MediaType::Turtle,
    languages: LANGUAGES,
    default_language: "en",
};

/// Members listing of a collection.
pub const MEM: Profile = Profile {
    token: "mem",
    uri: "https://w3id.org/profile/mem",
    label: "Members Profile",
    comment: "A very basic RDF data model-only profile that lists the sub-items (members) of collections",
    media_types: &[MediaType::Html],
    default_media_type: MediaType::Html,
    languages: LANGUAGES,
    default_language: "en",
};

/// Listing of the other profiles an endpoint offers.
pub const ALT: Profile = Profile {
    token: "alt",
    uri: "http://www.w3.org/ns/dx/conneg/altr",
    label: "Alternate Profiles",
    comment: "The representation of the resource that lists all other representations (profiles and Media Types)",
    media_types: &[
        MediaType::Html,
        MediaType::Json,
        MediaType::Turtle,
        MediaType::RdfXml,
        MediaType::JsonLd,
        MediaType::N3,
        MediaType::NTriples,
    ],
    default_media_type: MediaType::Html,
    languages: LANGUAGES,
    default_language: "en",
};

/// The profiles offered by one endpoint. `alt` is always available in
/// addition to the listed ones.
#[derive(Debug)]
pub struct ProfileSet {
    pub profiles: &'static [&'static Profile],
    pub default_token: &'static str,
}

impl ProfileSet {
    /// Look up a profile by token.
    pub fn get(&self, token: &str) -> Option<&'static Profile> {
        if token == ALT.token {
            return Some(&ALT);
        }
        self.profiles.iter().copied().find(|p| p.token == token)
    }

    /// Look up a profile by URI.
    pub fn by_uri(&self, uri: &str) -> Option<&'static Profile> {
        let uri = uri.trim().trim_start_matches('<').trim_end_matches('>');
        if uri == ALT.uri {
            return Some(&ALT);
        }
        self.profiles.iter().copied().find(|p| p.uri == uri)
    }

    /// The endpoint's default profile.
    pub fn default_profile(&self) -> &'static Profile {
        self.get(self.default_token).unwrap_or(&OAI)
    }

    /// The listed profiles followed by `alt`.
    pub fn all(&self) -> impl Iterator<Item = &'static Profile> {
        self.profiles.iter().copied().chain(std::iter::once(&ALT))
    }
}

/// Static description of one API endpoint.
#[derive(Debug)]
pub struct Endpoint {
    pub name: &'static str,
    pub profiles: ProfileSet,
    /// Query parameter keys this endpoint accepts.
    pub allowed_params: &'static [&'static str],
}

impl Endpoint {
    pub fn allows(&self, key: &str) -> bool {
        self.allowed_params.contains(&key)
    }
}

/// Endpoint definitions for every route of the API.
pub mod endpoints {
    use super::*;

    const BASE_PARAMS: &[&str] = &["_profile", "_view", "_mediatype", "_format", "version"];

    const LIST_PARAMS: &[&str] = &[
        "_profile",
        "_view",
        "_mediatype",
        "_format",
        "version",
        "page",
        "per_page",
        "limit",
        "bbox",
    ];

    const SPARQL_PARAMS: &[&str] = &[
        "_profile",
        "_view",
        "_mediatype",
        "_format",
        "version",
        "query",
        "default-graph-uri",
        "named-graph-uri",
    ];

    pub const LANDING: Endpoint = Endpoint {
        name: "landing",
        profiles: ProfileSet {
            profiles: &[&OAI, &DCAT],
            default_token: "oai",
        },
        allowed_params: BASE_PARAMS,
    };

    pub const CONFORMANCE: Endpoint = Endpoint {
        name: "conformance",
        profiles: ProfileSet {
            profiles: &[&OAI],
            default_token: "oai",
        },
        allowed_params: BASE_PARAMS,
    };

    pub const COLLECTIONS: Endpoint = Endpoint {
        name: "collections",
        profiles: ProfileSet {
            profiles: &[&OAI],
            default_token: "oai",
        },
        allowed_params: LIST_PARAMS,
    };

    pub const COLLECTION: Endpoint = Endpoint {
        name: "collection",
        profiles: ProfileSet {
            profiles: &[&OAI, &MEM],
            default_token: "oai",
        },
        allowed_params: BASE_PARAMS,
    };

    pub const ITEMS: Endpoint = Endpoint {
        name: "items",
        profiles: ProfileSet {
            profiles: &[&OAI, &GEOSP],
            default_token: "oai",
        },
        allowed_params: LIST_PARAMS,
    };

    pub const ITEM: Endpoint = Endpoint {
        name: "item",
        profiles: ProfileSet {
            profiles: &[&OAI, &GEOSP],
            default_token: "oai",
        },
        allowed_params: BASE_PARAMS,
    };

    pub const SPARQL: Endpoint = Endpoint {
        name: "sparql",
        profiles: ProfileSet {
            profiles: &[&OAI],
            default_token: "oai",
        },
        allowed_params: SPARQL_PARAMS,
    };

    /// Every endpoint, for iteration in tests and listings.
    pub const ALL: &[&Endpoint] = &[
        &LANDING,
        &CONFORMANCE,
        &COLLECTIONS,
        &COLLECTION,
        &ITEMS,
        &ITEM,
        &SPARQL,
    ];
}
