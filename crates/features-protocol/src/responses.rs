//! Landing page and conformance documents.

use serde::{Deserialize, Serialize};

use crate::conformance;
use crate::media_types::MediaType;
use crate::types::{Link, RelType};

/// Landing page response for the API root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LandingPage {
    /// Title of the API.
    pub title: String,

    /// Description of the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Links to related resources.
    pub links: Vec<Link>,
}

impl LandingPage {
    /// Create a landing page with the `self`, `conformance` and `data` links.
    pub fn new(title: impl Into<String>, description: Option<String>, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        let links = vec![
            Link::new(format!("{}/", base_url), RelType::Self_)
                .with_type(MediaType::Json)
                .with_title("This document"),
            Link::new(format!("{}/conformance", base_url), RelType::Conformance)
                .with_type(MediaType::Json)
                .with_title("Conformance classes"),
            Link::new(format!("{}/collections", base_url), RelType::Data)
                .with_type(MediaType::Json)
                .with_title("Collections"),
        ];

        Self {
            title: title.into(),
            description,
            links,
        }
    }
}

/// A declared conformance class with a display title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConformanceClass {
    pub uri: String,
    pub title: String,
}

impl ConformanceClass {
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
        }
    }

    /// Classes declared when the dataset does not list its own.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(conformance::CORE, "Core"),
            Self::new(conformance::OAS30, "OpenAPI 3.0"),
            Self::new(conformance::HTML, "HTML"),
            Self::new(conformance::GEOJSON, "GeoJSON"),
        ]
    }
}

/// Conformance declaration response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConformanceClasses {
    /// List of conformance class URIs.
    #[serde(rename = "conformsTo")]
    pub conforms_to: Vec<String>,
}

impl ConformanceClasses {
    pub fn from_classes(classes: &[ConformanceClass]) -> Self {
        Self {
            conforms_to: classes.iter().map(|c| c.uri.clone()).collect(),
        }
    }

    /// Check if a conformance class is declared.
    pub fn contains(&self, class: &str) -> bool {
        self.conforms_to.iter().any(|c| c == class)
    }
}
