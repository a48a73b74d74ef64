//! Core link types used across the API.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::media_types::MediaType;

/// Link relation types emitted by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelType {
    Self_,
    Alternate,
    Items,
    Data,
    Conformance,
    ServiceDesc,
    ServiceDoc,
    Collection,
    First,
    Prev,
    Next,
    Last,
    Profile,
}

impl RelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelType::Self_ => "self",
            RelType::Alternate => "alternate",
            RelType::Items => "items",
            RelType::Data => "data",
            RelType::Conformance => "conformance",
            RelType::ServiceDesc => "service-desc",
            RelType::ServiceDoc => "service-doc",
            RelType::Collection => "collection",
            RelType::First => "first",
            RelType::Prev => "prev",
            RelType::Next => "next",
            RelType::Last => "last",
            RelType::Profile => "profile",
        }
    }
}

impl fmt::Display for RelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A hyperlink to a related resource.
///
/// Links appear both in JSON `links` arrays and in the HTTP `Link` header.
/// They are built once per response and not changed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    /// The URI of the linked resource.
    pub href: String,

    /// The relationship type (e.g., "self", "items", "next").
    pub rel: String,

    /// The media type of the linked resource.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// A human-readable title for the link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// The language of the linked resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hreflang: Option<String>,

    /// Length of the linked content in bytes, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u64>,
}

impl Link {
    /// Create a new link with required fields.
    pub fn new(href: impl Into<String>, rel: RelType) -> Self {
        Self {
            href: href.into(),
            rel: rel.as_str().to_string(),
            type_: None,
            title: None,
            hreflang: None,
            length: None,
        }
    }

    /// Set the media type.
    pub fn with_type(mut self, media_type: MediaType) -> Self {
        self.type_ = Some(media_type.as_str().to_string());
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the language.
    pub fn with_hreflang(mut self, hreflang: impl Into<String>) -> Self {
        self.hreflang = Some(hreflang.into());
        self
    }

    /// Set the content length.
    pub fn with_length(mut self, length: u64) -> Self {
        self.length = Some(length);
        self
    }

    /// Render as one entry of an HTTP `Link` header.
    pub fn to_header_value(&self) -> String {
        let mut out = format!("<{}>; rel=\"{}\"", self.href, self.rel);
        if let Some(t) = &self.type_ {
            out.push_str(&format!("; type=\"{}\"", t));
        }
        if let Some(title) = &self.title {
            out.push_str(&format!("; title=\"{}\"", title.replace('"', "'")));
        }
        if let Some(lang) = &self.hreflang {
            out.push_str(&format!("; hreflang=\"{}\"", lang));
        }
        out
    }
}

/// Join links into a single `Link` header value.
pub fn links_header(links: &[Link]) -> String {
    links
        .iter()
        .map(Link::to_header_value)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Bytes escaped inside one path segment: controls, space, delimiters and `%`.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-encode an identifier for use as a single URL path segment.
pub fn path_segment(id: &str) -> String {
    utf8_percent_encode(id, PATH_SEGMENT).to_string()
}

/// `{base}/collections/{collection_id}`
pub fn collection_href(base_url: &str, collection_id: &str) -> String {
    format!("{}/collections/{}", base_url, path_segment(collection_id))
}

/// `{base}/collections/{collection_id}/items/{item_id}`
pub fn item_href(base_url: &str, collection_id: &str, item_id: &str) -> String {
    format!(
        "{}/items/{}",
        collection_href(base_url, collection_id),
        path_segment(item_id)
    )
}
