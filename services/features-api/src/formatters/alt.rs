//! The alternate profiles view: every representation an endpoint offers.

use features_graph::oxrdf::{BlankNode, Literal, NamedNode, Triple};
use features_graph::vocab::{altr, dcterms, rdf, rdfs};
use features_protocol::{Endpoint, Link};
use serde::Serialize;

use super::html::{html_escape, page};
use crate::content_negotiation::{representation_href, representations};
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize)]
pub struct Representation {
    pub profile: &'static str,
    pub profile_uri: &'static str,
    pub label: &'static str,
    pub media_type: &'static str,
    pub href: String,
    pub default: bool,
}

#[derive(Debug, Serialize)]
struct AltDocument<'a> {
    links: &'a [Link],
    resource: &'a str,
    representations: &'a [Representation],
}

/// The representations of `resource_uri` served through `endpoint`.
pub fn listing(endpoint: &Endpoint, resource_uri: &str) -> Vec<Representation> {
    let default_profile = endpoint.profiles.default_profile();
    representations(endpoint)
        .into_iter()
        .map(|(profile, media_type)| Representation {
            profile: profile.token,
            profile_uri: profile.uri,
            label: profile.label,
            media_type: media_type.as_str(),
            href: representation_href(resource_uri, profile, media_type),
            default: profile == default_profile && media_type == profile.default_media_type,
        })
        .collect()
}

pub fn json(resource_uri: &str, listing: &[Representation], links: &[Link]) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(&AltDocument {
        links,
        resource: resource_uri,
        representations: listing,
    })?)
}

pub fn html(resource_uri: &str, listing: &[Representation]) -> String {
    let mut body = String::from("<h1>Alternate Profiles</h1>\n");
    body.push_str(&format!(
        "<p>Representations of <a href=\"{0}\">{0}</a></p>\n",
        html_escape(resource_uri)
    ));
    body.push_str("<table>\n<tr><th>Profile</th><th>Media type</th></tr>\n");
    for representation in listing {
        let marker = if representation.default { " (default)" } else { "" };
        body.push_str(&format!(
            "<tr><td><a href=\"{}\" title=\"{}\">{}</a>{}</td><td><a href=\"{}\">{}</a></td></tr>\n",
            html_escape(representation.profile_uri),
            representation.profile,
            html_escape(representation.label),
            marker,
            html_escape(&representation.href),
            html_escape(representation.media_type)
        ));
    }
    body.push_str("</table>\n");
    page("Alternate Profiles", &body)
}

/// The listing as an `altr` graph.
pub fn graph(resource_uri: &str, listing: &[Representation]) -> Vec<Triple> {
    let resource = NamedNode::new_unchecked(resource_uri);
    let mut out = Vec::new();
    for representation in listing {
        let node = BlankNode::default();
        out.push(Triple::new(
            resource.clone(),
            altr::HAS_REPRESENTATION.into_owned(),
            node.clone(),
        ));
        if representation.default {
            out.push(Triple::new(
                resource.clone(),
                altr::HAS_DEFAULT_REPRESENTATION.into_owned(),
                node.clone(),
            ));
        }
        out.push(Triple::new(
            node.clone(),
            rdf::TYPE.into_owned(),
            altr::REPRESENTATION.into_owned(),
        ));
        out.push(Triple::new(
            node.clone(),
            dcterms::CONFORMS_TO.into_owned(),
            NamedNode::new_unchecked(representation.profile_uri),
        ));
        out.push(Triple::new(
            node.clone(),
            dcterms::FORMAT.into_owned(),
            Literal::new_simple_literal(representation.media_type),
        ));
        out.push(Triple::new(
            node,
            rdfs::LABEL.into_owned(),
            Literal::new_simple_literal(representation.label),
        ));
    }
    out
}
