use super::*;

fn end_point(path: &BezPath) -> Option<Point> {
    path.elements().iter().rev().find_map(|el| el.end_point())
}

#[test]
fn relative_forms_offset_from_current_point() {
    let mut b = GeometryPathBuilder::new();
    b.move_to(Point::new(10.0, 10.0));
    b.rel_line_to(Vec2::new(5.0, 0.0));
    b.rel_cubic_to(Vec2::new(0.0, 5.0), Vec2::new(5.0, 5.0), Vec2::new(5.0, 0.0));
    assert_eq!(b.current_point(), Point::new(20.0, 10.0));
    assert_eq!(
        b.path().elements()[2],
        PathEl::CurveTo(
            Point::new(15.0, 15.0),
            Point::new(20.0, 15.0),
            Point::new(20.0, 10.0)
        )
    );
}

#[test]
fn line_without_move_starts_at_origin() {
    let mut b = GeometryPathBuilder::new();
    b.line_to(Point::new(3.0, 4.0));
    assert_eq!(
        b.path().elements(),
        &[PathEl::MoveTo(Point::ZERO), PathEl::LineTo(Point::new(3.0, 4.0))]
    );
}

#[test]
fn close_returns_to_subpath_start() {
    let mut b = GeometryPathBuilder::new();
    b.move_to(Point::new(1.0, 1.0));
    b.line_to(Point::new(5.0, 1.0));
    b.close();
    assert_eq!(b.current_point(), Point::new(1.0, 1.0));
    b.rel_line_to(Vec2::new(0.0, 2.0));
    let els = b.path().elements();
    assert_eq!(els[3], PathEl::MoveTo(Point::new(1.0, 1.0)));
    assert_eq!(els[4], PathEl::LineTo(Point::new(1.0, 3.0)));
}

#[test]
fn conic_with_unit_weight_matches_quadratic() {
    let mut b = GeometryPathBuilder::new();
    b.move_to(Point::new(0.0, 0.0));
    b.conic_to(Point::new(3.0, 3.0), Point::new(6.0, 0.0), 1.0);
    let PathEl::CurveTo(c1, c2, p) = b.path().elements()[1] else {
        panic!("expected cubic");
    };
    assert!((c1.x - 2.0).abs() < 1e-12 && (c1.y - 2.0).abs() < 1e-12);
    assert!((c2.x - 4.0).abs() < 1e-12 && (c2.y - 2.0).abs() < 1e-12);
    assert_eq!(p, Point::new(6.0, 0.0));
}

#[test]
fn oval_and_rounded_rect_are_closed_and_bounded() {
    use kurbo::Shape;

    let mut b = GeometryPathBuilder::new();
    b.add_oval(Rect::new(0.0, 0.0, 20.0, 10.0));
    let bbox = b.path().bounding_box();
    assert!((bbox.width() - 20.0).abs() < 0.5);
    assert!((bbox.height() - 10.0).abs() < 0.5);
    assert_eq!(b.path().elements().last(), Some(&PathEl::ClosePath));

    let mut b = GeometryPathBuilder::new();
    b.add_rounded_rect(Rect::new(10.0, 10.0, 40.0, 30.0), Vec2::new(5.0, 5.0));
    let bbox = b.path().bounding_box();
    assert!((bbox.x0 - 10.0).abs() < 1e-6 && (bbox.x1 - 40.0).abs() < 1e-6);
    assert_eq!(b.path().elements()[0], PathEl::MoveTo(Point::new(15.0, 10.0)));
    // No degenerate joins between straight edges and corners.
    let lines = b
        .path()
        .elements()
        .iter()
        .filter(|el| matches!(el, PathEl::LineTo(_)))
        .count();
    assert_eq!(lines, 4);
}

#[test]
fn rounded_rect_radii_are_clamped() {
    let mut clamped = GeometryPathBuilder::new();
    clamped.add_rounded_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Vec2::new(50.0, 50.0));
    let mut exact = GeometryPathBuilder::new();
    exact.add_rounded_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Vec2::new(5.0, 5.0));
    assert_eq!(clamped.path(), exact.path());
}

#[test]
fn endpoint_arc_lands_on_target() {
    let mut b = GeometryPathBuilder::new();
    b.move_to(Point::new(0.0, 0.0));
    b.arc_to_point(Point::new(10.0, 0.0), Vec2::new(5.0, 5.0), 0.0, false, true);
    let end = end_point(b.path()).unwrap();
    assert!((end.x - 10.0).abs() < 1e-6 && end.y.abs() < 1e-6);

    // Zero radii degrade to a straight line.
    let mut b = GeometryPathBuilder::new();
    b.move_to(Point::new(0.0, 0.0));
    b.arc_to_point(Point::new(10.0, 0.0), Vec2::ZERO, 0.0, false, true);
    assert_eq!(b.path().elements()[1], PathEl::LineTo(Point::new(10.0, 0.0)));
}

#[test]
fn add_path_translates_elements() {
    let mut src = BezPath::new();
    src.move_to((0.0, 0.0));
    src.line_to((1.0, 1.0));
    src.close_path();
    let mut b = GeometryPathBuilder::new();
    b.add_path(&src, Vec2::new(10.0, 20.0));
    assert_eq!(
        b.path().elements(),
        &[
            PathEl::MoveTo(Point::new(10.0, 20.0)),
            PathEl::LineTo(Point::new(11.0, 21.0)),
            PathEl::ClosePath,
        ]
    );
}

#[test]
fn transform_applies_to_existing_geometry() {
    let mut b = GeometryPathBuilder::new();
    b.add_polygon(&[Point::new(1.0, 0.0), Point::new(2.0, 0.0)], false);
    b.transform(Affine::scale(2.0));
    assert_eq!(b.current_point(), Point::new(4.0, 0.0));
    assert_eq!(b.path().elements()[0], PathEl::MoveTo(Point::new(2.0, 0.0)));
}
