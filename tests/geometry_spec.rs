mod common;

use std::borrow::Cow;

use common::Body;
use shapefile_reader::{
    decode_geometry, Geometry, MultiPartGeometry, PartType, Point, ShapeType, ShapefileError,
};

fn pt(x: f64, y: f64) -> Point {
    Point { x, y }
}

fn decode(body: Body) -> (Geometry, usize) {
    let bytes = body.into_bytes();
    decode_geometry(&bytes).unwrap_or_else(|e| panic!("decode failed: {}", e))
}

/// A two-part line: parts [0, 2] over three points.
fn two_part_body(shape_type: i32) -> Body {
    Body::new(shape_type)
        .bbox(0.0, 0.0, 2.0, 2.0)
        .i32(2)
        .i32(3)
        .i32s(&[0, 2])
        .points(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)])
}

#[test]
fn point_consumes_exactly_twenty_bytes() {
    let (geometry, consumed) = decode(Body::new(1).f64(1.5).f64(-2.25));
    assert_eq!(geometry, Geometry::Point(pt(1.5, -2.25)));
    assert_eq!(consumed, 20);
    assert!(geometry.bounding_box().is_none());
}

#[test]
fn null_reads_nothing_after_tag() {
    let (geometry, consumed) = decode(Body::new(0));
    assert!(geometry.is_null());
    assert_eq!(consumed, 4);
    assert_eq!(geometry.num_points(), 0);
}

#[test]
fn polyline_keeps_parts_and_point_order() {
    let (geometry, _) = decode(two_part_body(3));
    let Geometry::PolyLine(line) = &geometry else {
        panic!("expected PolyLine, got {:?}", geometry);
    };
    assert_eq!(line.parts, vec![0, 2]);
    assert_eq!(line.points, vec![pt(0.0, 0.0), pt(1.0, 1.0), pt(2.0, 2.0)]);
    assert_eq!(line.part(0), Some(&[pt(0.0, 0.0), pt(1.0, 1.0)][..]));
    assert_eq!(line.part(1), Some(&[pt(2.0, 2.0)][..]));
    assert_eq!(line.part(2), None);
    assert_eq!(line.parts_iter().count(), 2);
    assert_eq!(geometry.num_parts(), 2);
    assert_eq!(geometry.bounding_box().map(|b| b.x_max), Some(2.0));
}

#[test]
fn polygon_and_polyline_stay_distinct() {
    let (polygon, _) = decode(two_part_body(5));
    let (polyline, _) = decode(two_part_body(3));
    assert_eq!(polygon.shape_type(), ShapeType::Polygon);
    assert_eq!(polyline.shape_type(), ShapeType::PolyLine);
    assert_ne!(polygon, polyline);
    assert_eq!(polygon.points(), polyline.points());
    assert!(matches!(polygon.points(), Cow::Borrowed(_)));
}

#[test]
fn multipoint_reads_counted_points() {
    let (geometry, consumed) = decode(
        Body::new(8)
            .bbox(-1.0, -1.0, 1.0, 1.0)
            .i32(2)
            .points(&[(-1.0, -1.0), (1.0, 1.0)]),
    );
    let Geometry::MultiPoint(mp) = geometry else {
        panic!("expected MultiPoint");
    };
    assert_eq!(mp.points, vec![pt(-1.0, -1.0), pt(1.0, 1.0)]);
    assert_eq!(consumed, 4 + 32 + 4 + 32);
}

#[test]
fn empty_arrays_consume_no_bytes() {
    let (geometry, consumed) = decode(Body::new(5).bbox(0.0, 0.0, 0.0, 0.0).i32(0).i32(0));
    assert_eq!(consumed, 4 + 32 + 8);
    assert_eq!(geometry.num_parts(), 0);
    assert_eq!(geometry.num_points(), 0);
}

#[test]
fn polyline_m_with_measures() {
    let (geometry, _) = decode(two_part_body(23).f64s(&[0.0, 10.0]).f64s(&[0.0, 5.0, 10.0]));
    let Geometry::PolyLineM(line) = &geometry else {
        panic!("expected PolyLineM, got {:?}", geometry);
    };
    let measures = line.measures.as_ref().expect("measures present");
    assert_eq!(measures.range.max, 10.0);
    assert_eq!(measures.values, vec![0.0, 5.0, 10.0]);
    assert_eq!(measures.values.len(), line.points.len());
}

#[test]
fn polygon_m_without_measures() {
    let (geometry, consumed) = decode(two_part_body(25));
    let Geometry::PolygonM(polygon) = geometry else {
        panic!("expected PolygonM");
    };
    assert!(polygon.measures.is_none());
    assert_eq!(consumed, 4 + 32 + 8 + 8 + 48);
}

#[test]
fn partial_measure_section_is_truncated() {
    let bytes = two_part_body(23).f64(0.0).into_bytes();
    match decode_geometry(&bytes) {
        Err(ShapefileError::Truncated { context, offset }) => {
            assert_eq!(context, "measure section");
            assert_eq!(offset, 100);
        }
        other => panic!("expected Truncated, got {:?}", other),
    }
}

#[test]
fn polyline_z_with_elevations_and_measures() {
    let (geometry, _) = decode(
        two_part_body(13)
            .f64s(&[1.0, 3.0])
            .f64s(&[1.0, 2.0, 3.0])
            .f64s(&[-1.0, 1.0])
            .f64s(&[-1.0, 0.0, 1.0]),
    );
    let z = geometry.elevations().expect("elevations present");
    let m = geometry.measures().expect("measures present");
    assert_eq!(z.range.min, 1.0);
    assert_eq!(z.values, vec![1.0, 2.0, 3.0]);
    assert_eq!(m.values, vec![-1.0, 0.0, 1.0]);
    assert_eq!(geometry.shape_type(), ShapeType::PolyLineZ);
}

#[test]
fn polygon_z_without_measures() {
    let (geometry, _) = decode(two_part_body(15).f64s(&[1.0, 3.0]).f64s(&[1.0, 2.0, 3.0]));
    assert_eq!(geometry.shape_type(), ShapeType::PolygonZ);
    assert_eq!(geometry.elevations().map(|z| z.values.len()), Some(3));
    assert!(geometry.measures().is_none());
}

#[test]
fn polygon_z_without_any_optional_section() {
    let (geometry, _) = decode(two_part_body(15));
    assert!(geometry.elevations().is_none());
    assert!(geometry.measures().is_none());
}

#[test]
fn partial_elevation_section_is_truncated() {
    let bytes = two_part_body(13).f64s(&[1.0, 3.0, 1.0]).into_bytes();
    assert!(matches!(
        decode_geometry(&bytes),
        Err(ShapefileError::Truncated { context: "elevation section", .. })
    ));
}

#[test]
fn multipoint_m_and_z() {
    let (m_geometry, _) = decode(
        Body::new(28)
            .bbox(0.0, 0.0, 1.0, 1.0)
            .i32(1)
            .points(&[(1.0, 1.0)])
            .f64s(&[4.0, 4.0, 4.0]),
    );
    assert_eq!(m_geometry.shape_type(), ShapeType::MultiPointM);
    assert_eq!(m_geometry.measures().map(|m| m.values.clone()), Some(vec![4.0]));

    let (z_geometry, _) = decode(
        Body::new(18)
            .bbox(0.0, 0.0, 1.0, 1.0)
            .i32(1)
            .points(&[(1.0, 1.0)])
            .f64s(&[9.0, 9.0, 9.0]),
    );
    assert_eq!(z_geometry.shape_type(), ShapeType::MultiPointZ);
    assert_eq!(z_geometry.elevations().map(|z| z.values.clone()), Some(vec![9.0]));
    assert!(z_geometry.measures().is_none());
}

#[test]
fn point_m_and_point_z_measures_are_optional() {
    let (with_m, consumed) = decode(Body::new(21).f64s(&[1.0, 2.0, 3.0]));
    assert_eq!(consumed, 28);
    let Geometry::PointM(p) = with_m else { panic!("expected PointM") };
    assert_eq!(p.m, Some(3.0));

    let (without_m, _) = decode(Body::new(21).f64s(&[1.0, 2.0]));
    let Geometry::PointM(p) = without_m else { panic!("expected PointM") };
    assert_eq!(p.m, None);

    let (point_z, consumed) = decode(Body::new(11).f64s(&[1.0, 2.0, 3.0, 4.0]));
    assert_eq!(consumed, 36);
    let Geometry::PointZ(p) = point_z else { panic!("expected PointZ") };
    assert_eq!((p.z, p.m), (3.0, Some(4.0)));

    let (point_z, _) = decode(Body::new(11).f64s(&[1.0, 2.0, 3.0]));
    let Geometry::PointZ(p) = point_z else { panic!("expected PointZ") };
    assert_eq!((p.z, p.m), (3.0, None));
}

#[test]
fn partial_point_measure_is_truncated() {
    let bytes = Body::new(21).f64s(&[1.0, 2.0]).raw(&[0; 4]).into_bytes();
    assert!(matches!(
        decode_geometry(&bytes),
        Err(ShapefileError::Truncated { context: "point measure", offset: 20 })
    ));

    let bytes = Body::new(11).f64s(&[1.0, 2.0, 3.0]).raw(&[0; 4]).into_bytes();
    assert!(matches!(
        decode_geometry(&bytes),
        Err(ShapefileError::Truncated { context: "point measure", offset: 28 })
    ));
}

#[test]
fn single_point_shapes_report_one_point() {
    let (geometry, _) = decode(Body::new(11).f64s(&[1.0, 2.0, 3.0]));
    assert_eq!(geometry.points().into_owned(), vec![pt(1.0, 2.0)]);
    assert_eq!(geometry.num_points(), 1);
    assert!(Geometry::Null.points().is_empty());
}

#[test]
fn multipatch_decodes_elevations_then_measures() {
    let (geometry, consumed) = decode(
        Body::new(31)
            .bbox(0.0, 0.0, 1.0, 1.0)
            .i32(1)
            .i32(2)
            .i32s(&[0])
            .i32s(&[1])
            .points(&[(0.0, 0.0), (1.0, 1.0)])
            .f64s(&[1.0, 2.0])
            .f64s(&[1.0, 2.0])
            .f64s(&[5.0, 6.0])
            .f64s(&[5.0, 6.0]),
    );
    assert_eq!(consumed, 148);
    let Geometry::MultiPatch(patch) = &geometry else {
        panic!("expected MultiPatch, got {:?}", geometry);
    };
    assert_eq!(patch.part_types, vec![PartType::TriangleFan]);
    assert_eq!(patch.elevations.as_ref().map(|z| z.values.clone()), Some(vec![1.0, 2.0]));
    let measures = patch.measures.as_ref().expect("measures present");
    assert_eq!((measures.range.min, measures.range.max), (5.0, 6.0));
    assert_eq!(measures.values, vec![5.0, 6.0]);
}

#[test]
fn multipatch_reads_part_types_between_parts_and_points() {
    let (geometry, _) = decode(
        Body::new(31)
            .bbox(0.0, 0.0, 1.0, 1.0)
            .i32(2)
            .i32(4)
            .i32s(&[0, 3])
            .i32s(&[0, 42])
            .points(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)])
            .f64s(&[0.0, 3.0])
            .f64s(&[0.0, 1.0, 2.0, 3.0]),
    );
    let Geometry::MultiPatch(patch) = &geometry else {
        panic!("expected MultiPatch, got {:?}", geometry);
    };
    assert_eq!(patch.parts, vec![0, 3]);
    assert_eq!(patch.part_types, vec![PartType::TriangleStrip, PartType::Unknown(42)]);
    assert_eq!(patch.part_types.len(), patch.parts.len());
    assert_eq!(patch.points.len(), 4);
    assert_eq!(patch.part(1), Some(&[pt(1.0, 1.0)][..]));
    assert_eq!(patch.elevations.as_ref().map(|z| z.values.len()), Some(4));
    assert!(patch.measures.is_none());
    assert_eq!(PartType::from(5), PartType::Ring);
    assert_eq!(PartType::Unknown(42).code(), 42);
}

#[test]
fn unknown_tag_is_rejected_with_code() {
    let bytes = Body::new(2).f64(0.0).into_bytes();
    match decode_geometry(&bytes) {
        Err(ShapefileError::UnknownShapeType { code, .. }) => assert_eq!(code, 2),
        other => panic!("expected UnknownShapeType, got {:?}", other),
    }
}

#[test]
fn negative_counts_are_format_errors() {
    let bytes = Body::new(3).bbox(0.0, 0.0, 0.0, 0.0).i32(-1).i32(0).into_bytes();
    match decode_geometry(&bytes) {
        Err(ShapefileError::InvalidCount { field, value, .. }) => {
            assert_eq!(field, "part count");
            assert_eq!(value, -1);
        }
        other => panic!("expected InvalidCount, got {:?}", other),
    }
}

#[test]
fn oversized_count_overruns_record() {
    let bytes = Body::new(8).bbox(0.0, 0.0, 0.0, 0.0).i32(i32::MAX).into_bytes();
    match decode_geometry(&bytes) {
        Err(ShapefileError::RecordLengthMismatch { declared, required, .. }) => {
            assert_eq!(declared, bytes.len());
            assert!(required > declared);
        }
        other => panic!("expected RecordLengthMismatch, got {:?}", other),
    }
}

#[test]
fn short_point_overruns_record() {
    let bytes = Body::new(1).f64(1.0).into_bytes();
    assert!(matches!(
        decode_geometry(&bytes),
        Err(ShapefileError::RecordLengthMismatch { declared: 12, required: 20, .. })
    ));
}

#[test]
fn malformed_offsets_do_not_panic() {
    let (geometry, _) = decode(
        Body::new(3)
            .bbox(0.0, 0.0, 1.0, 1.0)
            .i32(2)
            .i32(2)
            .i32s(&[0, 7])
            .points(&[(0.0, 0.0), (1.0, 1.0)]),
    );
    let Geometry::PolyLine(line) = geometry else { panic!("expected PolyLine") };
    assert_eq!(line.part(1), None);
    assert_eq!(line.parts_iter().filter(Option::is_none).count(), 2);
}
