//! The dataset behind the landing page, and its conformance classes.

use features_graph::vocab::{dcat, dcterms, ogcapi};
use features_graph::{GraphProjector, RawProjection, TripleSource};
use features_protocol::{ConformanceClass, Link, MediaType, RelType};

use super::{explicit_title, EntityKind, ResourceModel};
use crate::config::ApiConfig;

/// The published dataset: the configured one, else the first in the graph.
pub fn find_dataset(source: &dyn TripleSource, config: &ApiConfig) -> Option<String> {
    if let Some(uri) = &config.dataset_uri {
        return Some(uri.clone());
    }
    source
        .subjects_of_type(dcat::DATASET)
        .into_iter()
        .find_map(|s| match s {
            features_graph::oxrdf::Subject::NamedNode(n) => Some(n.into_string()),
            _ => None,
        })
}

/// The landing page model. Without a dataset in the graph the configured
/// API title is used.
pub fn dataset_model(source: &dyn TripleSource, config: &ApiConfig) -> ResourceModel {
    let base_url = config.base_url();
    let (uri, projection) = match find_dataset(source, config) {
        Some(uri) => {
            let projection = GraphProjector::new(source)
                .with_base_url(base_url)
                .project(&uri);
            (uri, projection)
        }
        None => (format!("{}/", base_url), RawProjection::default()),
    };

    let has_title = explicit_title(&projection).is_some();
    let mut model = ResourceModel::build(EntityKind::Dataset, &uri, projection);
    if !has_title {
        model.title = config.api_title.clone();
    }

    model.with_links(vec![
        Link::new(format!("{}/", base_url), RelType::Self_)
            .with_type(MediaType::Json)
            .with_title("This document"),
        Link::new(format!("{}/conformance", base_url), RelType::Conformance)
            .with_type(MediaType::Json)
            .with_title("Conformance classes"),
        Link::new(format!("{}/collections", base_url), RelType::Data)
            .with_type(MediaType::Json)
            .with_title("Collections"),
    ])
}

/// Conformance classes declared in the graph as `ogcapi:ConformanceTarget`s,
/// or the default Features classes when there are none.
pub fn conformance_classes(source: &dyn TripleSource) -> Vec<ConformanceClass> {
    let mut classes: Vec<ConformanceClass> = source
        .subjects_of_type(ogcapi::CONFORMANCE_TARGET)
        .into_iter()
        .filter_map(|subject| {
            let features_graph::oxrdf::Subject::NamedNode(node) = &subject else {
                return None;
            };
            let title = source
                .literal(&subject, dcterms::TITLE)
                .unwrap_or_else(|| node.as_str().to_string());
            Some(ConformanceClass::new(node.as_str(), title))
        })
        .collect();

    if classes.is_empty() {
        return ConformanceClass::defaults();
    }
    classes.sort_by(|a, b| a.uri.cmp(&b.uri));
    classes
}
