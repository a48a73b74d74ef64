//! HTML views.
//!
//! Properties are sorted into display buckets before rendering. Each bucket
//! has a fixed predicate list: a predicate's position in that list orders it
//! within the bucket, and unlisted predicates keep first-seen order after
//! the listed ones. Blank-node groups are merged into the same buckets as
//! direct properties.

use features_graph::oxrdf::NamedNodeRef;
use features_graph::vocab::{dcat, dcterms, geo, geox, rdf, rdfs};
use features_graph::{BlankNodeGroup, PropertyEntry};
use features_protocol::{collection_href, BBoxKind, ConformanceClass, GeoJsonGeometry, Link};

use crate::models::{CollectionSummary, FeatureSummary, ResourceModel};

/// Display buckets, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Type,
    Identity,
    Geometry,
    SpatialMeasure,
    TopologicalRelation,
    Other,
}

const TYPE_PREDICATES: &[NamedNodeRef<'static>] = &[rdf::TYPE];

const IDENTITY_PREDICATES: &[NamedNodeRef<'static>] = &[
    dcterms::IDENTIFIER,
    dcterms::TITLE,
    rdfs::LABEL,
    dcterms::DESCRIPTION,
    dcterms::IS_PART_OF,
    dcat::BBOX,
];

const GEOMETRY_PREDICATES: &[NamedNodeRef<'static>] = &[
    geo::HAS_GEOMETRY,
    geo::AS_WKT,
    geo::AS_GEOJSON,
    geox::AS_DGGS,
    geo::AS_DGGS,
];

const SPATIAL_MEASURE_PREDICATES: &[NamedNodeRef<'static>] = &[
    geo::HAS_METRIC_AREA,
    geo::HAS_AREA,
    geox::HAS_AREA_M2,
    geo::HAS_LENGTH,
    geo::HAS_PERIMETER_LENGTH,
    geo::HAS_VOLUME,
];

const TOPOLOGICAL_PREDICATES: &[NamedNodeRef<'static>] = &[
    geo::SF_CONTAINS,
    geo::SF_CROSSES,
    geo::SF_DISJOINT,
    geo::SF_EQUALS,
    geo::SF_INTERSECTS,
    geo::SF_OVERLAPS,
    geo::SF_TOUCHES,
    geo::SF_WITHIN,
];

impl Bucket {
    pub const ALL: [Bucket; 6] = [
        Bucket::Type,
        Bucket::Identity,
        Bucket::Geometry,
        Bucket::SpatialMeasure,
        Bucket::TopologicalRelation,
        Bucket::Other,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Bucket::Type => "Type",
            Bucket::Identity => "Properties",
            Bucket::Geometry => "Geometries",
            Bucket::SpatialMeasure => "Spatial measures",
            Bucket::TopologicalRelation => "Topological relations",
            Bucket::Other => "Other properties",
        }
    }

    fn predicates(&self) -> &'static [NamedNodeRef<'static>] {
        match self {
            Bucket::Type => TYPE_PREDICATES,
            Bucket::Identity => IDENTITY_PREDICATES,
            Bucket::Geometry => GEOMETRY_PREDICATES,
            Bucket::SpatialMeasure => SPATIAL_MEASURE_PREDICATES,
            Bucket::TopologicalRelation => TOPOLOGICAL_PREDICATES,
            Bucket::Other => &[],
        }
    }

    /// Position of `predicate` in this bucket's list.
    fn rank(&self, predicate: &str) -> Option<usize> {
        self.predicates().iter().position(|p| p.as_str() == predicate)
    }

    /// The bucket a predicate belongs to.
    pub fn of(predicate: &str) -> Bucket {
        Bucket::ALL
            .into_iter()
            .find(|b| b.rank(predicate).is_some())
            .unwrap_or(Bucket::Other)
    }
}

/// One object of a displayed property.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayObject {
    pub value: String,
    pub is_iri: bool,
    pub label: Option<String>,
    pub prefixed: Option<String>,
    pub system_url: Option<String>,
}

/// One predicate with all its objects, or the blank nodes reached through it.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub predicate: String,
    pub label: Option<String>,
    pub prefixed: Option<String>,
    pub objects: Vec<DisplayObject>,
    pub nested: Vec<Vec<PropertyEntry>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyGroup {
    pub bucket: Bucket,
    pub rows: Vec<DisplayRow>,
}

impl From<&PropertyEntry> for DisplayObject {
    fn from(entry: &PropertyEntry) -> Self {
        Self {
            value: entry.object.as_str().to_string(),
            is_iri: entry.object.is_iri(),
            label: entry.object_label.clone(),
            prefixed: entry.object_prefixed.clone(),
            system_url: entry.system_url.clone(),
        }
    }
}

fn row_for<'a>(
    rows: &'a mut Vec<DisplayRow>,
    predicate: &str,
    label: &Option<String>,
    prefixed: &Option<String>,
) -> &'a mut DisplayRow {
    let index = match rows.iter().position(|r| r.predicate == predicate) {
        Some(index) => index,
        None => {
            rows.push(DisplayRow {
                predicate: predicate.to_string(),
                label: label.clone(),
                prefixed: prefixed.clone(),
                objects: Vec::new(),
                nested: Vec::new(),
            });
            rows.len() - 1
        }
    };
    &mut rows[index]
}

/// Bucket a model's properties for display, skipping `skip` predicates.
///
/// Only non-empty buckets are returned.
pub fn property_groups(
    properties: &[PropertyEntry],
    blank_node_groups: &[BlankNodeGroup],
    skip: &[NamedNodeRef<'_>],
) -> Vec<PropertyGroup> {
    let skipped = |predicate: &str| skip.iter().any(|s| s.as_str() == predicate);

    // first-seen order across direct and blank-node properties
    let mut rows: Vec<DisplayRow> = Vec::new();
    for entry in properties.iter().filter(|e| !skipped(&e.predicate)) {
        row_for(&mut rows, &entry.predicate, &entry.predicate_label, &entry.predicate_prefixed)
            .objects
            .push(entry.into());
    }
    for group in blank_node_groups.iter().filter(|g| !skipped(&g.predicate)) {
        row_for(&mut rows, &group.predicate, &group.predicate_label, &group.predicate_prefixed)
            .nested
            .extend(group.items.iter().cloned());
    }

    Bucket::ALL
        .into_iter()
        .filter_map(|bucket| {
            let mut bucket_rows: Vec<DisplayRow> = rows
                .iter()
                .filter(|r| Bucket::of(&r.predicate) == bucket)
                .cloned()
                .collect();
            if bucket_rows.is_empty() {
                return None;
            }
            // stable: unlisted predicates keep first-seen order
            bucket_rows.sort_by_key(|r| bucket.rank(&r.predicate).unwrap_or(usize::MAX));
            Some(PropertyGroup {
                bucket,
                rows: bucket_rows,
            })
        })
        .collect()
}

pub(crate) fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// A complete page around `body`.
pub fn page(title: &str, body: &str) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\"/>\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    html.push_str("<link rel=\"stylesheet\" href=\"https://unpkg.com/leaflet@1.9.4/dist/leaflet.css\"/>\n");
    html.push_str("<style>\n");
    html.push_str("body { font-family: sans-serif; margin: 2em; }\n");
    html.push_str("table { border-collapse: collapse; }\n");
    html.push_str("td, th { border: 1px solid #ccc; padding: 0.3em 0.6em; vertical-align: top; text-align: left; }\n");
    html.push_str("#map { height: 400px; width: 600px; }\n");
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");
    html.push_str(body);
    html.push_str("</body>\n</html>\n");
    html
}

fn links_list(links: &[Link]) -> String {
    if links.is_empty() {
        return String::new();
    }
    let mut html = String::from("<h2>Links</h2>\n<ul class=\"links\">\n");
    for link in links {
        let text = link.title.as_deref().unwrap_or(&link.href);
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a> <code>{}</code>",
            html_escape(&link.href),
            html_escape(text),
            html_escape(&link.rel)
        ));
        if let Some(type_) = &link.type_ {
            html.push_str(&format!(" <code>{}</code>", html_escape(type_)));
        }
        html.push_str("</li>\n");
    }
    html.push_str("</ul>\n");
    html
}

fn object_cell(object: &DisplayObject) -> String {
    if !object.is_iri {
        return html_escape(&object.value);
    }
    let href = object.system_url.as_deref().unwrap_or(&object.value);
    let text = object
        .label
        .as_deref()
        .or(object.prefixed.as_deref())
        .unwrap_or(&object.value);
    format!(
        "<a href=\"{}\" title=\"{}\">{}</a>",
        html_escape(href),
        html_escape(&object.value),
        html_escape(text)
    )
}

fn predicate_cell(predicate: &str, label: Option<&str>, prefixed: Option<&str>) -> String {
    format!(
        "<a href=\"{}\" title=\"{}\">{}</a>",
        html_escape(predicate),
        html_escape(prefixed.unwrap_or(predicate)),
        html_escape(label.or(prefixed).unwrap_or(predicate))
    )
}

fn nested_table(items: &[PropertyEntry]) -> String {
    let mut html = String::from("<table class=\"nested\">\n");
    for entry in items {
        html.push_str(&format!(
            "<tr><th>{}</th><td>{}</td></tr>\n",
            predicate_cell(
                &entry.predicate,
                entry.predicate_label.as_deref(),
                entry.predicate_prefixed.as_deref()
            ),
            object_cell(&DisplayObject::from(entry))
        ));
    }
    html.push_str("</table>\n");
    html
}

fn properties_section(groups: &[PropertyGroup]) -> String {
    let mut html = String::new();
    for group in groups {
        html.push_str(&format!("<h2>{}</h2>\n<table>\n", group.bucket.title()));
        for row in &group.rows {
            html.push_str(&format!(
                "<tr><th>{}</th><td>",
                predicate_cell(&row.predicate, row.label.as_deref(), row.prefixed.as_deref())
            ));
            let mut cells: Vec<String> = row.objects.iter().map(object_cell).collect();
            cells.extend(row.nested.iter().map(|items| nested_table(items)));
            html.push_str(&cells.join("<br/>\n"));
            html.push_str("</td></tr>\n");
        }
        html.push_str("</table>\n");
    }
    html
}

/// A Leaflet map showing `geometry`, if there is one.
fn map_section(geometry: Option<&GeoJsonGeometry>) -> String {
    let Some(json) = geometry.and_then(|g| serde_json::to_string(g).ok()) else {
        return String::new();
    };
    // keep the literal inside the script element
    let json = json.replace("</", "<\\/");
    let mut html = String::from("<div id=\"map\"></div>\n");
    html.push_str("<script src=\"https://unpkg.com/leaflet@1.9.4/dist/leaflet.js\"></script>\n");
    html.push_str("<script>\n");
    html.push_str(&format!("var geometry = {};\n", json));
    html.push_str("var map = L.map('map');\n");
    html.push_str("L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png', {maxZoom: 19}).addTo(map);\n");
    html.push_str("var layer = L.geoJSON(geometry).addTo(map);\n");
    html.push_str("map.fitBounds(layer.getBounds());\n");
    html.push_str("</script>\n");
    html
}

fn heading(model: &ResourceModel) -> String {
    let mut html = format!("<h1>{}</h1>\n", html_escape(&model.title));
    html.push_str(&format!(
        "<p class=\"uri\"><a href=\"{0}\">{0}</a></p>\n",
        html_escape(&model.uri)
    ));
    if let Some(description) = &model.description {
        html.push_str(&format!("<p>{}</p>\n", html_escape(description)));
    }
    html
}

pub fn landing(model: &ResourceModel) -> String {
    let mut body = heading(model);
    body.push_str(&links_list(&model.links));
    page(&model.title, &body)
}

/// Any model with its bucketed properties.
pub fn resource(model: &ResourceModel) -> String {
    let mut body = heading(model);
    body.push_str(&properties_section(&property_groups(
        &model.properties,
        &model.blank_node_groups,
        &[],
    )));
    body.push_str(&links_list(&model.links));
    page(&model.title, &body)
}

pub fn conformance(classes: &[ConformanceClass]) -> String {
    let mut body = String::from("<h1>Conformance</h1>\n<ul>\n");
    for class in classes {
        body.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            html_escape(&class.uri),
            html_escape(&class.title)
        ));
    }
    body.push_str("</ul>\n");
    page("Conformance", &body)
}

pub fn collections(
    title: &str,
    summaries: &[CollectionSummary],
    base_url: &str,
    links: &[Link],
) -> String {
    let mut body = format!("<h1>{}</h1>\n<h2>Collections</h2>\n<ul>\n", html_escape(title));
    for collection in summaries {
        body.push_str(&format!(
            "<li><a href=\"{}\">{}</a>",
            html_escape(&collection_href(base_url, &collection.id)),
            html_escape(&collection.title)
        ));
        if let Some(description) = &collection.description {
            body.push_str(&format!(" {}", html_escape(description)));
        }
        body.push_str("</li>\n");
    }
    body.push_str("</ul>\n");
    body.push_str(&links_list(links));
    page("Collections", &body)
}

/// A collection: its bounding box on a map and its properties. The label
/// and description are already in the heading.
pub fn collection(model: &ResourceModel, bbox: Option<&GeoJsonGeometry>) -> String {
    let mut body = heading(model);
    body.push_str(&map_section(bbox));
    body.push_str(&properties_section(&property_groups(
        &model.properties,
        &model.blank_node_groups,
        &[rdfs::LABEL, dcterms::DESCRIPTION],
    )));
    body.push_str(&links_list(&model.links));
    page(&model.title, &body)
}

/// One page of members, listed by title.
pub fn items(
    collection: &ResourceModel,
    summaries: &[FeatureSummary],
    bbox: Option<(&BBoxKind, &str)>,
    links: &[Link],
) -> String {
    let mut sorted: Vec<&FeatureSummary> = summaries.iter().collect();
    sorted.sort_by(|a, b| a.title.cmp(&b.title));

    let mut body = format!("<h1>{}</h1>\n", html_escape(&collection.title));
    if let Some((kind, value)) = bbox {
        body.push_str(&format!(
            "<p class=\"bbox\">Filtered by bbox <code>{}</code>: {}</p>\n",
            kind.tag(),
            html_escape(value)
        ));
    }
    body.push_str("<h2>Features</h2>\n<ul>\n");
    for item in sorted {
        body.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            html_escape(&item.link),
            html_escape(&item.title)
        ));
    }
    body.push_str("</ul>\n");
    body.push_str(&links_list(links));
    page(&collection.title, &body)
}

pub fn feature(model: &ResourceModel, geometry: Option<&GeoJsonGeometry>) -> String {
    let mut body = heading(model);
    body.push_str(&map_section(geometry));
    body.push_str(&properties_section(&property_groups(
        &model.properties,
        &model.blank_node_groups,
        &[],
    )));

    if !model.geometries.is_empty() {
        body.push_str("<h2>Geometry encodings</h2>\n<table>\n");
        body.push_str("<tr><th>Encoding</th><th>Role</th><th>CRS</th><th>Value</th></tr>\n");
        for geometry in model.geometries.values() {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td><code>{}</code></td></tr>\n",
                html_escape(&geometry.label),
                html_escape(&geometry.role.uri()),
                html_escape(geometry.crs.uri()),
                html_escape(&geometry.coordinates)
            ));
        }
        body.push_str("</table>\n");
    }
    body.push_str(&links_list(&model.links));
    page(&model.title, &body)
}

/// The SPARQL query form.
pub fn sparql_form(endpoint_uri: &str) -> String {
    let mut body = String::from("<h1>SPARQL</h1>\n");
    body.push_str(&format!(
        "<form method=\"post\" action=\"{}\">\n",
        html_escape(endpoint_uri)
    ));
    body.push_str("<textarea name=\"query\" rows=\"15\" cols=\"80\">SELECT * WHERE { ?s ?p ?o } LIMIT 10</textarea><br/>\n");
    body.push_str("<button type=\"submit\">Run query</button>\n</form>\n");
    page("SPARQL", &body)
}
