//! Spatial filtering of feature members by a classified `bbox`.

use features_protocol::bbox::{BBoxKind, BoundingBox};
use features_protocol::{clean_literal, envelope, parse_wkt};
use oxrdf::{NamedNodeRef, Subject, Term};
use tracing::{debug, warn};

use crate::store::{term_as_subject, TripleSource};
use crate::vocab::{geo, geox};

/// Keep the members matching `bbox`, preserving their order.
///
/// - WGS84 boxes keep features with a WKT geometry whose envelope overlaps the box.
/// - A single cell keeps features with a DGGS geometry containing a cell at or below it.
/// - A cell pair is a valid `bbox` but filters nothing: every member is
///   returned unchanged. There is no cell-pair filter.
pub fn filter_members(source: &dyn TripleSource, members: Vec<Subject>, bbox: &BBoxKind) -> Vec<Subject> {
    let before = members.len();
    let kept: Vec<Subject> = match bbox {
        BBoxKind::Wgs84(query) => members
            .into_iter()
            .filter(|m| overlaps_box(source, m, query))
            .collect(),
        BBoxKind::Cell(cell) => members
            .into_iter()
            .filter(|m| within_cell(source, m, cell))
            .collect(),
        BBoxKind::CellPair(a, b) => {
            warn!(first = %a, second = %b, "Cell pair bbox does not filter; returning all members");
            members
        }
    };
    debug!(bbox = bbox.tag(), before, after = kept.len(), "Applied bbox filter");
    kept
}

/// Literals of `geo:hasGeometry/<predicate>` for a feature.
fn geometry_literals(
    source: &dyn TripleSource,
    feature: &Subject,
    predicates: &[NamedNodeRef<'_>],
) -> Vec<String> {
    source
        .objects(feature, geo::HAS_GEOMETRY)
        .iter()
        .filter_map(term_as_subject)
        .flat_map(|g| {
            predicates
                .iter()
                .flat_map(|p| source.objects(&g, *p))
                .collect::<Vec<_>>()
        })
        .filter_map(|t| match t {
            Term::Literal(l) => Some(clean_literal(l.value()).to_string()),
            _ => None,
        })
        .collect()
}

fn overlaps_box(source: &dyn TripleSource, feature: &Subject, query: &BoundingBox) -> bool {
    geometry_literals(source, feature, &[geo::AS_WKT])
        .iter()
        .filter_map(|literal| match parse_wkt(literal) {
            Ok(geometry) => envelope(&geometry),
            Err(e) => {
                debug!(feature = %feature, error = %e, "Skipping unparseable WKT geometry");
                None
            }
        })
        .any(|envelope| envelope.intersects(query))
}

fn within_cell(source: &dyn TripleSource, feature: &Subject, cell: &str) -> bool {
    geometry_literals(source, feature, &[geox::AS_DGGS, geo::AS_DGGS])
        .iter()
        .any(|literal| dggs_cells(literal).any(|c| c.starts_with(cell)))
}

/// Cell ids in a DGGS literal such as `CellList (R1234 R1235)`.
fn dggs_cells(literal: &str) -> impl Iterator<Item = &str> {
    literal
        .split(|c: char| c.is_whitespace() || c == '(' || c == ')' || c == ',')
        .filter(|token| {
            let mut chars = token.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
                && chars.all(|c| c.is_ascii_digit())
        })
}
