//! Tests for `bbox` classification.

use features_protocol::bbox::{classify, BBoxKind, BoundingBox, INVALID_BBOX_MESSAGE};

// ============================================================================
// WGS84 coordinate boxes
// ============================================================================

#[test]
fn test_coords_classified_as_wgs84() {
    let kind = classify("149.0,-35.3,149.3,-35.1").unwrap();
    assert_eq!(
        kind,
        BBoxKind::Wgs84(BoundingBox::new(149.0, -35.3, 149.3, -35.1))
    );
    assert_eq!(kind.tag(), "coords");
}

#[test]
fn test_coords_integers() {
    match classify("160,-55,170,-25").unwrap() {
        BBoxKind::Wgs84(bbox) => {
            assert_eq!(bbox.min_x, 160.0);
            assert_eq!(bbox.max_y, -25.0);
        }
        other => panic!("expected coords, got {:?}", other),
    }
}

#[test]
fn test_coords_corner_order_normalised() {
    // top-left then bottom-right
    match classify("149.0,-35.1,149.3,-35.3").unwrap() {
        BBoxKind::Wgs84(bbox) => {
            assert!(bbox.min_y < bbox.max_y);
            assert_eq!(bbox.min_y, -35.3);
        }
        other => panic!("expected coords, got {:?}", other),
    }
}

#[test]
fn test_three_coords_rejected() {
    assert!(classify("149.0,-35.3,149.3").is_err());
}

// ============================================================================
// DGGS cells
// ============================================================================

#[test]
fn test_single_cell() {
    assert_eq!(classify("R1234").unwrap(), BBoxKind::Cell("R1234".to_string()));
}

#[test]
fn test_bare_letter_is_a_cell() {
    assert_eq!(classify("N").unwrap(), BBoxKind::Cell("N".to_string()));
}

#[test]
fn test_cell_pair() {
    let kind = classify("R123,R456").unwrap();
    assert_eq!(
        kind,
        BBoxKind::CellPair("R123".to_string(), "R456".to_string())
    );
    assert_eq!(kind.tag(), "cell_ids");
}

#[test]
fn test_three_cells_rejected() {
    assert!(classify("R1,R2,R3").is_err());
}

// ============================================================================
// Invalid input
// ============================================================================

#[test]
fn test_garbage_rejected_with_fixed_message() {
    let err = classify("not-a-bbox").unwrap_err();
    assert_eq!(err.to_string(), INVALID_BBOX_MESSAGE);
    assert!(INVALID_BBOX_MESSAGE.contains("two pairs of long/lat values"));
    assert!(INVALID_BBOX_MESSAGE.contains("a DGGS Cell ID"));
    assert!(INVALID_BBOX_MESSAGE.contains("a pair of DGGS Cell IDs"));
}

#[test]
fn test_empty_rejected() {
    assert!(classify("").is_err());
}

#[test]
fn test_mixed_cell_and_number_rejected() {
    assert!(classify("R12,149.0").is_err());
}
