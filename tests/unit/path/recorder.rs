use super::*;

fn record_sample() -> RecordingPathBuilder {
    let mut rec = RecordingPathBuilder::new(GeometryPathBuilder::new());
    rec.move_to(Point::new(1.0, 2.0));
    rec.rel_line_to(Vec2::new(3.0, 0.0));
    rec.quad_to(Point::new(6.0, 6.0), Point::new(8.0, 2.0));
    rec.rel_conic_to(Vec2::new(1.0, 1.0), Vec2::new(2.0, 0.0), 0.5);
    rec.arc_to_point(Point::new(20.0, 2.0), Vec2::new(5.0, 5.0), 0.0, false, true);
    rec.close();
    rec.add_rounded_rect(Rect::new(0.0, 0.0, 10.0, 6.0), Vec2::new(2.0, 1.0));
    rec.add_oval(Rect::new(30.0, 30.0, 40.0, 50.0));
    rec.add_arc(Rect::new(0.0, 0.0, 4.0, 4.0), 0.0, 1.0);
    rec.add_polygon(&[Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)], true);
    rec
}

#[test]
fn records_each_call_in_order() {
    let rec = record_sample();
    let ops: Vec<PathOp> = rec.instructions().iter().map(|i| i.op).collect();
    assert_eq!(
        ops,
        vec![
            PathOp::MoveTo,
            PathOp::RelLineTo,
            PathOp::QuadTo,
            PathOp::RelConicTo,
            PathOp::ArcToPoint,
            PathOp::Close,
            PathOp::AddRoundedRect,
            PathOp::AddOval,
            PathOp::AddArc,
            PathOp::AddPolygon,
        ]
    );
    assert_eq!(rec.instructions()[1].operands.as_slice(), &[3.0, 0.0]);
    assert_eq!(
        rec.instructions()[9].operands.as_slice(),
        &[1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0]
    );
}

#[test]
fn forwarding_produces_same_geometry_as_plain_builder() {
    let rec = record_sample();
    let mut plain = GeometryPathBuilder::new();
    plain.move_to(Point::new(1.0, 2.0));
    plain.rel_line_to(Vec2::new(3.0, 0.0));
    plain.quad_to(Point::new(6.0, 6.0), Point::new(8.0, 2.0));
    plain.rel_conic_to(Vec2::new(1.0, 1.0), Vec2::new(2.0, 0.0), 0.5);
    plain.arc_to_point(Point::new(20.0, 2.0), Vec2::new(5.0, 5.0), 0.0, false, true);
    plain.close();
    plain.add_rounded_rect(Rect::new(0.0, 0.0, 10.0, 6.0), Vec2::new(2.0, 1.0));
    plain.add_oval(Rect::new(30.0, 30.0, 40.0, 50.0));
    plain.add_arc(Rect::new(0.0, 0.0, 4.0, 4.0), 0.0, 1.0);
    plain.add_polygon(&[Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)], true);
    assert_eq!(rec.inner().path(), plain.path());
}

#[test]
fn replay_reproduces_geometry() {
    let (geometry, log) = record_sample().finish();
    let mut replayed = GeometryPathBuilder::new();
    replay(&log, &mut replayed).unwrap();
    assert_eq!(replayed.path(), geometry.path());
}

#[test]
fn add_path_encodes_elements() {
    let src = BezPath::from_svg("M0 0 L1 1 Q2 2 3 3 C4 4 5 5 6 6 Z").unwrap();
    let mut rec = RecordingPathBuilder::new(GeometryPathBuilder::new());
    rec.add_path(&src, Vec2::new(1.0, 1.0));
    let (geometry, log) = rec.finish();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].op, PathOp::AddPath);
    assert_eq!(&log[0].operands[..5], &[1.0, 1.0, 0.0, 0.0, 0.0]);

    let mut replayed = GeometryPathBuilder::new();
    replay(&log, &mut replayed).unwrap();
    assert_eq!(replayed.path(), geometry.path());
}

#[test]
fn transform_is_not_applied_or_recorded() {
    let mut rec = RecordingPathBuilder::new(GeometryPathBuilder::new());
    rec.move_to(Point::new(1.0, 1.0));
    rec.transform(Affine::scale(10.0));
    assert_eq!(rec.instructions().len(), 1);
    assert_eq!(rec.current_point(), Point::new(1.0, 1.0));
}

#[test]
fn replay_rejects_malformed_logs() {
    let bad = vec![PathInstruction {
        op: PathOp::LineTo,
        operands: SmallVec::from_slice(&[1.0]),
    }];
    let err = replay(&bad, &mut GeometryPathBuilder::new()).unwrap_err();
    assert!(err.to_string().contains("expects 2 operands"));

    let bad = vec![PathInstruction {
        op: PathOp::AddPath,
        operands: SmallVec::from_slice(&[0.0, 0.0, 1.0, 5.0, 5.0]),
    }];
    assert!(replay(&bad, &mut GeometryPathBuilder::new()).is_err());
}

#[test]
fn instructions_serialize() {
    let rec = record_sample();
    let json = serde_json::to_string(rec.instructions()).unwrap();
    let back: Vec<PathInstruction> = serde_json::from_str(&json).unwrap();
    assert_eq!(back.as_slice(), rec.instructions());
}
