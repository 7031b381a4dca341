//! Path construction contract and the plain geometry implementation.

use kurbo::{Arc, SvgArc};

use crate::foundation::core::{Affine, BezPath, PathEl, Point, Rect, Vec2};

/// Tolerance used when approximating arcs and ellipses with cubic segments.
pub const ARC_TOLERANCE: f64 = 0.1;

/// Path construction calls shared by every path back end.
///
/// Implementors supply the absolute primitives; relative forms and closed-shape helpers have
/// default implementations in terms of them. Angles are in radians.
pub trait PathBuilder {
    /// The end point of the last segment, or the origin for an empty path.
    fn current_point(&self) -> Point;

    /// Start a new subpath at `p`.
    fn move_to(&mut self, p: Point);

    /// Straight segment to `p`.
    fn line_to(&mut self, p: Point);

    /// Quadratic Bézier through control point `c` to `p`.
    fn quad_to(&mut self, c: Point, p: Point);

    /// Cubic Bézier through `c1`, `c2` to `p`.
    fn cubic_to(&mut self, c1: Point, c2: Point, p: Point);

    /// Rational quadratic (conic) segment with the given weight.
    fn conic_to(&mut self, c: Point, p: Point, weight: f64);

    /// Append the arc of the ellipse inscribed in `oval` from `start_angle` sweeping
    /// `sweep_angle`, connected by a line unless `force_move_to` starts a new subpath.
    fn arc_to(&mut self, oval: Rect, start_angle: f64, sweep_angle: f64, force_move_to: bool);

    /// SVG-style endpoint arc to `p`. `x_rotation` is in degrees.
    fn arc_to_point(
        &mut self,
        p: Point,
        radii: Vec2,
        x_rotation: f64,
        large_arc: bool,
        sweep: bool,
    );

    /// Close the current subpath.
    fn close(&mut self);

    /// Transform everything built so far.
    fn transform(&mut self, transform: Affine);

    /// Relative [`PathBuilder::move_to`].
    fn rel_move_to(&mut self, d: Vec2) {
        let p = self.current_point() + d;
        self.move_to(p);
    }

    /// Relative [`PathBuilder::line_to`].
    fn rel_line_to(&mut self, d: Vec2) {
        let p = self.current_point() + d;
        self.line_to(p);
    }

    /// Relative [`PathBuilder::quad_to`].
    fn rel_quad_to(&mut self, c: Vec2, d: Vec2) {
        let o = self.current_point();
        self.quad_to(o + c, o + d);
    }

    /// Relative [`PathBuilder::cubic_to`].
    fn rel_cubic_to(&mut self, c1: Vec2, c2: Vec2, d: Vec2) {
        let o = self.current_point();
        self.cubic_to(o + c1, o + c2, o + d);
    }

    /// Relative [`PathBuilder::conic_to`].
    fn rel_conic_to(&mut self, c: Vec2, d: Vec2, weight: f64) {
        let o = self.current_point();
        self.conic_to(o + c, o + d, weight);
    }

    /// Relative [`PathBuilder::arc_to_point`].
    fn rel_arc_to_point(
        &mut self,
        d: Vec2,
        radii: Vec2,
        x_rotation: f64,
        large_arc: bool,
        sweep: bool,
    ) {
        let p = self.current_point() + d;
        self.arc_to_point(p, radii, x_rotation, large_arc, sweep);
    }

    /// Closed rectangle, clockwise from the top-left corner.
    fn add_rect(&mut self, rect: Rect) {
        self.move_to(Point::new(rect.x0, rect.y0));
        self.line_to(Point::new(rect.x1, rect.y0));
        self.line_to(Point::new(rect.x1, rect.y1));
        self.line_to(Point::new(rect.x0, rect.y1));
        self.close();
    }

    /// Closed ellipse inscribed in `oval`.
    fn add_oval(&mut self, oval: Rect) {
        self.arc_to(oval, 0.0, std::f64::consts::TAU, true);
        self.close();
    }

    /// Open arc in its own subpath.
    fn add_arc(&mut self, oval: Rect, start_angle: f64, sweep_angle: f64) {
        self.arc_to(oval, start_angle, sweep_angle, true);
    }

    /// Closed rectangle with elliptical corners. Radii are clamped to half the side lengths.
    fn add_rounded_rect(&mut self, rect: Rect, radii: Vec2) {
        let rect = rect.abs();
        let rx = radii.x.clamp(0.0, rect.width() / 2.0);
        let ry = radii.y.clamp(0.0, rect.height() / 2.0);
        if rx == 0.0 || ry == 0.0 {
            self.add_rect(rect);
            return;
        }
        let corner = |cx: f64, cy: f64| Rect::new(cx - rx, cy - ry, cx + rx, cy + ry);
        let half_pi = std::f64::consts::FRAC_PI_2;
        let (x0, y0, x1, y1) = (rect.x0, rect.y0, rect.x1, rect.y1);

        self.move_to(Point::new(x0 + rx, y0));
        self.line_to(Point::new(x1 - rx, y0));
        self.arc_to(corner(x1 - rx, y0 + ry), -half_pi, half_pi, false);
        self.line_to(Point::new(x1, y1 - ry));
        self.arc_to(corner(x1 - rx, y1 - ry), 0.0, half_pi, false);
        self.line_to(Point::new(x0 + rx, y1));
        self.arc_to(corner(x0 + rx, y1 - ry), half_pi, half_pi, false);
        self.line_to(Point::new(x0, y0 + ry));
        self.arc_to(corner(x0 + rx, y0 + ry), 2.0 * half_pi, half_pi, false);
        self.close();
    }

    /// Polyline through `points`, starting with a move to the first one.
    fn add_polygon(&mut self, points: &[Point], close: bool) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.move_to(*first);
        for p in rest {
            self.line_to(*p);
        }
        if close {
            self.close();
        }
    }

    /// Append every element of `path`, translated by `offset`.
    fn add_path(&mut self, path: &BezPath, offset: Vec2) {
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => self.move_to(p + offset),
                PathEl::LineTo(p) => self.line_to(p + offset),
                PathEl::QuadTo(c, p) => self.quad_to(c + offset, p + offset),
                PathEl::CurveTo(c1, c2, p) => self.cubic_to(c1 + offset, c2 + offset, p + offset),
                PathEl::ClosePath => self.close(),
            }
        }
    }
}

/// Builds real `kurbo` geometry.
#[derive(Clone, Debug, Default)]
pub struct GeometryPathBuilder {
    path: BezPath,
    current: Point,
    subpath_start: Point,
    open: bool,
}

impl GeometryPathBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Geometry built so far.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// Finish building.
    pub fn into_path(self) -> BezPath {
        self.path
    }

    // Segments after a close (or on an empty path) continue from the current point.
    fn ensure_subpath(&mut self) {
        if !self.open {
            self.path.move_to(self.current);
            self.subpath_start = self.current;
            self.open = true;
        }
    }

    fn arc_geometry(oval: Rect, start_angle: f64, sweep_angle: f64) -> Arc {
        Arc {
            center: oval.center(),
            radii: Vec2::new(oval.width() / 2.0, oval.height() / 2.0),
            start_angle,
            sweep_angle,
            x_rotation: 0.0,
        }
    }
}

impl PathBuilder for GeometryPathBuilder {
    fn current_point(&self) -> Point {
        self.current
    }

    fn move_to(&mut self, p: Point) {
        self.path.move_to(p);
        self.current = p;
        self.subpath_start = p;
        self.open = true;
    }

    fn line_to(&mut self, p: Point) {
        self.ensure_subpath();
        self.path.line_to(p);
        self.current = p;
    }

    fn quad_to(&mut self, c: Point, p: Point) {
        self.ensure_subpath();
        self.path.quad_to(c, p);
        self.current = p;
    }

    fn cubic_to(&mut self, c1: Point, c2: Point, p: Point) {
        self.ensure_subpath();
        self.path.curve_to(c1, c2, p);
        self.current = p;
    }

    fn conic_to(&mut self, c: Point, p: Point, weight: f64) {
        let from = self.current;
        let k = if weight.is_finite() && weight > 0.0 {
            4.0 * weight / (3.0 * (1.0 + weight))
        } else {
            0.0
        };
        self.cubic_to(from + (c - from) * k, p + (c - p) * k, p);
    }

    fn arc_to(&mut self, oval: Rect, start_angle: f64, sweep_angle: f64, force_move_to: bool) {
        let arc = Self::arc_geometry(oval, start_angle, sweep_angle);
        let start = arc.center
            + Vec2::new(
                arc.radii.x * start_angle.cos(),
                arc.radii.y * start_angle.sin(),
            );
        if force_move_to || !self.open {
            self.move_to(start);
        } else if self.current.distance(start) > 1e-9 {
            self.line_to(start);
        }
        for el in arc.append_iter(ARC_TOLERANCE) {
            if let PathEl::CurveTo(c1, c2, p) = el {
                self.cubic_to(c1, c2, p);
            }
        }
    }

    fn arc_to_point(
        &mut self,
        p: Point,
        radii: Vec2,
        x_rotation: f64,
        large_arc: bool,
        sweep: bool,
    ) {
        let svg_arc = SvgArc {
            from: self.current,
            to: p,
            radii,
            x_rotation: x_rotation.to_radians(),
            large_arc,
            sweep,
        };
        match Arc::from_svg_arc(&svg_arc) {
            Some(arc) => {
                self.ensure_subpath();
                for el in arc.append_iter(ARC_TOLERANCE) {
                    if let PathEl::CurveTo(c1, c2, end) = el {
                        self.cubic_to(c1, c2, end);
                    }
                }
                // Land exactly on the requested end point.
                self.current = p;
            }
            None if svg_arc.is_straight_line() && svg_arc.from != p => self.line_to(p),
            None => {}
        }
    }

    fn close(&mut self) {
        if self.open {
            self.path.close_path();
            self.open = false;
        }
        self.current = self.subpath_start;
    }

    fn transform(&mut self, transform: Affine) {
        self.path.apply_affine(transform);
        self.current = transform * self.current;
        self.subpath_start = transform * self.subpath_start;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/builder.rs"]
mod tests;
