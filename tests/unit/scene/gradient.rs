use super::*;

fn bbox_resolver() -> GradientUnitResolver {
    GradientUnitResolver {
        units: GradientUnits::ObjectBoundingBox,
        bounds: Rect::new(10.0, 20.0, 110.0, 220.0),
    }
}

fn user_resolver() -> GradientUnitResolver {
    GradientUnitResolver {
        units: GradientUnits::UserSpaceOnUse,
        bounds: Rect::new(10.0, 20.0, 110.0, 220.0),
    }
}

fn own(attrs: &Attributes) -> GradientAttributes<'_> {
    GradientAttributes {
        own: attrs,
        base: None,
    }
}

#[test]
fn linear_defaults_in_bounding_box_units() {
    let attrs = Attributes::default();
    assert_eq!(
        bbox_resolver().linear(own(&attrs)),
        GradientGeometry::Linear {
            from: Point::new(0.0, 0.0),
            to: Point::new(1.0, 0.0),
        }
    );
}

#[test]
fn bounding_box_units_accept_fractions_and_percentages() {
    let attrs = Attributes::from([("x1", "25%"), ("y1", "0.5"), ("x2", "1"), ("y2", "100%")]);
    assert_eq!(
        bbox_resolver().linear(own(&attrs)),
        GradientGeometry::Linear {
            from: Point::new(0.25, 0.5),
            to: Point::new(1.0, 1.0),
        }
    );
}

#[test]
fn user_space_percentages_scale_viewport_and_offset() {
    let attrs = Attributes::from([("x1", "50%"), ("y1", "50%"), ("x2", "30"), ("y2", "40")]);
    assert_eq!(
        user_resolver().linear(own(&attrs)),
        GradientGeometry::Linear {
            from: Point::new(60.0, 120.0),
            to: Point::new(30.0, 40.0),
        }
    );
}

#[test]
fn radial_focal_defaults_to_center() {
    let attrs = Attributes::from([("cx", "0.3"), ("cy", "0.4"), ("r", "0.2")]);
    let g = bbox_resolver().radial(own(&attrs));
    assert_eq!(
        g,
        GradientGeometry::Radial {
            center: Point::new(0.3, 0.4),
            radius: 0.2,
            focal: Point::new(0.3, 0.4),
            focal_radius: 0.0,
        }
    );
    assert!(!g.has_focal_offset());

    let attrs = Attributes::from([("fx", "0.1")]);
    let g = bbox_resolver().radial(own(&attrs));
    let GradientGeometry::Radial { focal, center, .. } = g else {
        panic!("expected radial");
    };
    assert_eq!(center, Point::new(0.5, 0.5));
    assert_eq!(focal, Point::new(0.1, 0.5));
    assert!(g.has_focal_offset());
}

#[test]
fn user_space_radius_uses_mean_extent() {
    let attrs = Attributes::from([("r", "10%")]);
    let GradientGeometry::Radial { radius, center, .. } = user_resolver().radial(own(&attrs)) else {
        panic!("expected radial");
    };
    assert!((radius - 15.0).abs() < 1e-9);
    assert_eq!(center, Point::new(60.0, 120.0));
}

#[test]
fn own_attributes_override_base_per_attribute() {
    let base = Attributes::from([("x1", "0.2"), ("x2", "0.8"), ("y2", "0.5")]);
    let own_attrs = Attributes::from([("x2", "0.9")]);
    let attrs = GradientAttributes {
        own: &own_attrs,
        base: Some(&base),
    };
    assert_eq!(
        bbox_resolver().linear(attrs),
        GradientGeometry::Linear {
            from: Point::new(0.2, 0.0),
            to: Point::new(0.9, 0.5),
        }
    );
}

#[test]
fn stops_clamp_and_fold_opacity() {
    let mut stops = GradientStops::default();
    stops.push_stop(&Attributes::from([("offset", "40%"), ("stop-color", "red")]));
    stops.push_stop(&Attributes::from([
        ("offset", "0.1"),
        ("style", "stop-color: blue; stop-opacity: 0.5"),
    ]));
    stops.push_stop(&Attributes::from([("offset", "7")]));
    assert_eq!(stops.offsets, vec![0.4, 0.4, 1.0]);
    assert_eq!(
        stops.colors,
        vec![
            Rgba8::rgb(255, 0, 0),
            Rgba8::rgba(0, 0, 255, 128),
            Rgba8::BLACK
        ]
    );
    assert_eq!(stops.len(), 3);
}

#[test]
fn parses_unit_and_spread_keywords() {
    assert_eq!(
        GradientUnits::parse("userSpaceOnUse"),
        Some(GradientUnits::UserSpaceOnUse)
    );
    assert_eq!(GradientUnits::parse("bogus"), None);
    assert_eq!(SpreadMethod::parse("reflect"), Some(SpreadMethod::Reflect));
}
