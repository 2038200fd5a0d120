//! Comprehensive tests for BoundingBox operations.

use biodiv_common::bbox::{BboxParseError, BoundingBox};
use biodiv_common::BiodivError;

// ============================================================================
// Constructor tests
// ============================================================================

#[test]
fn test_bbox_new() {
    let bbox = BoundingBox::new(-180.0, -90.0, 180.0, 90.0);
    assert_eq!(bbox.west, -180.0);
    assert_eq!(bbox.south, -90.0);
    assert_eq!(bbox.east, 180.0);
    assert_eq!(bbox.north, 90.0);
}

#[test]
fn test_from_extents_argument_order() {
    let bbox = BoundingBox::from_extents(52.52, 52.50, 13.42, 13.40).unwrap();
    assert_eq!(bbox.north, 52.52);
    assert_eq!(bbox.south, 52.50);
    assert_eq!(bbox.east, 13.42);
    assert_eq!(bbox.west, 13.40);
}

#[test]
fn test_degenerate_point_bbox_is_valid() {
    let bbox = BoundingBox::from_extents(10.0, 10.0, 5.0, 5.0).unwrap();
    assert_eq!(bbox.width(), 0.0);
    assert_eq!(bbox.height(), 0.0);
}

// ============================================================================
// Validation tests
// ============================================================================

#[test]
fn test_validate_rejects_latitude_out_of_range() {
    let bbox = BoundingBox::new(0.0, -91.0, 1.0, 1.0);
    assert!(matches!(bbox.validate(), Err(BiodivError::InvalidBbox(_))));
}

#[test]
fn test_validate_rejects_longitude_out_of_range() {
    let bbox = BoundingBox::new(-181.0, 0.0, 1.0, 1.0);
    assert!(matches!(bbox.validate(), Err(BiodivError::InvalidBbox(_))));
}

#[test]
fn test_validate_rejects_antimeridian_crossing() {
    let bbox = BoundingBox::new(170.0, -10.0, -170.0, 10.0);
    assert!(matches!(bbox.validate(), Err(BiodivError::InvalidBbox(_))));
}

#[test]
fn test_validate_rejects_nan() {
    let bbox = BoundingBox::new(f64::NAN, 0.0, 1.0, 1.0);
    assert!(bbox.validate().is_err());
}

// ============================================================================
// from_query_string tests
// ============================================================================

#[test]
fn test_parse_query_bbox_with_spaces() {
    let bbox = BoundingBox::from_query_string(" 13.4, 52.5 ,13.42,52.52").unwrap();
    assert!((bbox.west - 13.4).abs() < 1e-9);
    assert!((bbox.south - 52.5).abs() < 1e-9);
}

#[test]
fn test_parse_query_bbox_invalid_format_too_few() {
    let result = BoundingBox::from_query_string("0,0,100");
    assert!(matches!(result, Err(BboxParseError::InvalidFormat(_))));
}

#[test]
fn test_parse_query_bbox_invalid_number() {
    let result = BoundingBox::from_query_string("0,abc,1,1");
    assert!(matches!(result, Err(BboxParseError::InvalidNumber(_))));
}

#[test]
fn test_parse_error_converts_to_invalid_bbox() {
    let err: BiodivError = BoundingBox::from_query_string("x").unwrap_err().into();
    assert!(matches!(err, BiodivError::InvalidBbox(_)));
}

// ============================================================================
// Geometry tests
// ============================================================================

#[test]
fn test_corners_order() {
    let bbox = BoundingBox::new(1.0, 2.0, 3.0, 4.0);
    assert_eq!(bbox.corners(), [(2.0, 1.0), (4.0, 1.0), (4.0, 3.0), (2.0, 3.0)]);
}

#[test]
fn test_intersects_touching_edges() {
    let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let b = BoundingBox::new(10.0, 0.0, 20.0, 10.0);
    let c = BoundingBox::new(20.5, 20.0, 30.0, 30.0);
    assert!(a.intersects(&b));
    assert!(!a.intersects(&c));
}

#[test]
fn test_contains_point_inclusive() {
    let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    assert!(bbox.contains_point(0.0, 0.0));
    assert!(bbox.contains_point(10.0, 10.0));
    assert!(bbox.contains_point(5.0, 5.0));
    assert!(!bbox.contains_point(10.0001, 5.0));
}
