//! Instruction-logging path builder and replay.

use smallvec::SmallVec;

use crate::foundation::core::{Affine, BezPath, PathEl, Point, Rect, Vec2};
use crate::foundation::error::{SceneError, SceneResult};
use crate::path::builder::{GeometryPathBuilder, PathBuilder};

/// Opcode of one recorded path construction call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PathOp {
    /// `[x, y]`
    MoveTo,
    /// `[dx, dy]`
    RelMoveTo,
    /// `[x, y]`
    LineTo,
    /// `[dx, dy]`
    RelLineTo,
    /// `[cx, cy, x, y]`
    QuadTo,
    /// `[dcx, dcy, dx, dy]`
    RelQuadTo,
    /// `[c1x, c1y, c2x, c2y, x, y]`
    CubicTo,
    /// `[dc1x, dc1y, dc2x, dc2y, dx, dy]`
    RelCubicTo,
    /// `[cx, cy, x, y, weight]`
    ConicTo,
    /// `[dcx, dcy, dx, dy, weight]`
    RelConicTo,
    /// `[x0, y0, x1, y1, start, sweep, force_move_to]`
    ArcTo,
    /// `[x, y, rx, ry, x_rotation, large_arc, sweep]`
    ArcToPoint,
    /// `[dx, dy, rx, ry, x_rotation, large_arc, sweep]`
    RelArcToPoint,
    /// `[x0, y0, x1, y1]`
    AddRect,
    /// `[x0, y0, x1, y1]`
    AddOval,
    /// `[x0, y0, x1, y1, start, sweep]`
    AddArc,
    /// `[x0, y0, x1, y1, rx, ry]`
    AddRoundedRect,
    /// `[close, x0, y0, x1, y1, ...]`
    AddPolygon,
    /// `[dx, dy]` followed by tagged elements, see [`PathInstruction`].
    AddPath,
    /// `[]`
    Close,
}

/// One recorded construction call.
///
/// Booleans are stored as `0.0`/`1.0`. `AddPath` operands start with the offset and then
/// list the appended path's elements, each as a tag (`0` move, `1` line, `2` quad,
/// `3` cubic, `4` close) followed by its points.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathInstruction {
    /// Which call was made.
    pub op: PathOp,
    /// Call arguments, flattened.
    pub operands: SmallVec<[f64; 8]>,
}

impl PathInstruction {
    fn new(op: PathOp, operands: &[f64]) -> Self {
        Self {
            op,
            operands: SmallVec::from_slice(operands),
        }
    }
}

fn flag(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

/// Forwards every call to an inner builder while appending it to an instruction log.
///
/// [`PathBuilder::transform`] is not recorded and not forwarded: recorded paths are always
/// in their element's local space, and transforms live on the scene node instead.
#[derive(Clone, Debug, Default)]
pub struct RecordingPathBuilder<B = GeometryPathBuilder> {
    inner: B,
    instructions: Vec<PathInstruction>,
}

impl<B: PathBuilder> RecordingPathBuilder<B> {
    /// Wrap `inner`.
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            instructions: Vec::new(),
        }
    }

    /// Instructions recorded so far.
    pub fn instructions(&self) -> &[PathInstruction] {
        &self.instructions
    }

    /// The wrapped builder.
    pub fn inner(&self) -> &B {
        &self.inner
    }

    /// Split into the wrapped builder and the instruction log.
    pub fn finish(self) -> (B, Vec<PathInstruction>) {
        (self.inner, self.instructions)
    }

    fn record(&mut self, op: PathOp, operands: &[f64]) {
        self.instructions.push(PathInstruction::new(op, operands));
    }
}

impl<B: PathBuilder> PathBuilder for RecordingPathBuilder<B> {
    fn current_point(&self) -> Point {
        self.inner.current_point()
    }

    fn move_to(&mut self, p: Point) {
        self.record(PathOp::MoveTo, &[p.x, p.y]);
        self.inner.move_to(p);
    }

    fn line_to(&mut self, p: Point) {
        self.record(PathOp::LineTo, &[p.x, p.y]);
        self.inner.line_to(p);
    }

    fn quad_to(&mut self, c: Point, p: Point) {
        self.record(PathOp::QuadTo, &[c.x, c.y, p.x, p.y]);
        self.inner.quad_to(c, p);
    }

    fn cubic_to(&mut self, c1: Point, c2: Point, p: Point) {
        self.record(PathOp::CubicTo, &[c1.x, c1.y, c2.x, c2.y, p.x, p.y]);
        self.inner.cubic_to(c1, c2, p);
    }

    fn conic_to(&mut self, c: Point, p: Point, weight: f64) {
        self.record(PathOp::ConicTo, &[c.x, c.y, p.x, p.y, weight]);
        self.inner.conic_to(c, p, weight);
    }

    fn arc_to(&mut self, oval: Rect, start_angle: f64, sweep_angle: f64, force_move_to: bool) {
        self.record(
            PathOp::ArcTo,
            &[
                oval.x0,
                oval.y0,
                oval.x1,
                oval.y1,
                start_angle,
                sweep_angle,
                flag(force_move_to),
            ],
        );
        self.inner
            .arc_to(oval, start_angle, sweep_angle, force_move_to);
    }

    fn arc_to_point(
        &mut self,
        p: Point,
        radii: Vec2,
        x_rotation: f64,
        large_arc: bool,
        sweep: bool,
    ) {
        self.record(
            PathOp::ArcToPoint,
            &[
                p.x,
                p.y,
                radii.x,
                radii.y,
                x_rotation,
                flag(large_arc),
                flag(sweep),
            ],
        );
        self.inner
            .arc_to_point(p, radii, x_rotation, large_arc, sweep);
    }

    fn close(&mut self) {
        self.record(PathOp::Close, &[]);
        self.inner.close();
    }

    fn transform(&mut self, _transform: Affine) {}

    fn rel_move_to(&mut self, d: Vec2) {
        self.record(PathOp::RelMoveTo, &[d.x, d.y]);
        self.inner.rel_move_to(d);
    }

    fn rel_line_to(&mut self, d: Vec2) {
        self.record(PathOp::RelLineTo, &[d.x, d.y]);
        self.inner.rel_line_to(d);
    }

    fn rel_quad_to(&mut self, c: Vec2, d: Vec2) {
        self.record(PathOp::RelQuadTo, &[c.x, c.y, d.x, d.y]);
        self.inner.rel_quad_to(c, d);
    }

    fn rel_cubic_to(&mut self, c1: Vec2, c2: Vec2, d: Vec2) {
        self.record(PathOp::RelCubicTo, &[c1.x, c1.y, c2.x, c2.y, d.x, d.y]);
        self.inner.rel_cubic_to(c1, c2, d);
    }

    fn rel_conic_to(&mut self, c: Vec2, d: Vec2, weight: f64) {
        self.record(PathOp::RelConicTo, &[c.x, c.y, d.x, d.y, weight]);
        self.inner.rel_conic_to(c, d, weight);
    }

    fn rel_arc_to_point(
        &mut self,
        d: Vec2,
        radii: Vec2,
        x_rotation: f64,
        large_arc: bool,
        sweep: bool,
    ) {
        self.record(
            PathOp::RelArcToPoint,
            &[
                d.x,
                d.y,
                radii.x,
                radii.y,
                x_rotation,
                flag(large_arc),
                flag(sweep),
            ],
        );
        self.inner
            .rel_arc_to_point(d, radii, x_rotation, large_arc, sweep);
    }

    fn add_rect(&mut self, rect: Rect) {
        self.record(PathOp::AddRect, &[rect.x0, rect.y0, rect.x1, rect.y1]);
        self.inner.add_rect(rect);
    }

    fn add_oval(&mut self, oval: Rect) {
        self.record(PathOp::AddOval, &[oval.x0, oval.y0, oval.x1, oval.y1]);
        self.inner.add_oval(oval);
    }

    fn add_arc(&mut self, oval: Rect, start_angle: f64, sweep_angle: f64) {
        self.record(
            PathOp::AddArc,
            &[oval.x0, oval.y0, oval.x1, oval.y1, start_angle, sweep_angle],
        );
        self.inner.add_arc(oval, start_angle, sweep_angle);
    }

    fn add_rounded_rect(&mut self, rect: Rect, radii: Vec2) {
        self.record(
            PathOp::AddRoundedRect,
            &[rect.x0, rect.y0, rect.x1, rect.y1, radii.x, radii.y],
        );
        self.inner.add_rounded_rect(rect, radii);
    }

    fn add_polygon(&mut self, points: &[Point], close: bool) {
        let mut operands = SmallVec::<[f64; 8]>::with_capacity(1 + points.len() * 2);
        operands.push(flag(close));
        operands.extend(points.iter().flat_map(|p| [p.x, p.y]));
        self.instructions.push(PathInstruction {
            op: PathOp::AddPolygon,
            operands,
        });
        self.inner.add_polygon(points, close);
    }

    fn add_path(&mut self, path: &BezPath, offset: Vec2) {
        let mut operands = SmallVec::<[f64; 8]>::new();
        operands.extend([offset.x, offset.y]);
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => operands.extend([0.0, p.x, p.y]),
                PathEl::LineTo(p) => operands.extend([1.0, p.x, p.y]),
                PathEl::QuadTo(c, p) => operands.extend([2.0, c.x, c.y, p.x, p.y]),
                PathEl::CurveTo(c1, c2, p) => {
                    operands.extend([3.0, c1.x, c1.y, c2.x, c2.y, p.x, p.y]);
                }
                PathEl::ClosePath => operands.push(4.0),
            }
        }
        self.instructions.push(PathInstruction {
            op: PathOp::AddPath,
            operands,
        });
        self.inner.add_path(path, offset);
    }
}

/// Feed a recorded instruction log into `builder`.
///
/// Replaying into a fresh [`GeometryPathBuilder`] reproduces the geometry the log was
/// recorded alongside.
pub fn replay(
    instructions: &[PathInstruction],
    builder: &mut impl PathBuilder,
) -> SceneResult<()> {
    for (index, ins) in instructions.iter().enumerate() {
        let o = ins.operands.as_slice();
        let arity = |n: usize| -> SceneResult<()> {
            if o.len() == n {
                Ok(())
            } else {
                Err(SceneError::validation(format!(
                    "path instruction {index} ({:?}) expects {n} operands, got {}",
                    ins.op,
                    o.len()
                )))
            }
        };
        let pt = |i: usize| Point::new(o[i], o[i + 1]);
        let v = |i: usize| Vec2::new(o[i], o[i + 1]);
        let rect = || Rect::new(o[0], o[1], o[2], o[3]);
        match ins.op {
            PathOp::MoveTo => {
                arity(2)?;
                builder.move_to(pt(0));
            }
            PathOp::RelMoveTo => {
                arity(2)?;
                builder.rel_move_to(v(0));
            }
            PathOp::LineTo => {
                arity(2)?;
                builder.line_to(pt(0));
            }
            PathOp::RelLineTo => {
                arity(2)?;
                builder.rel_line_to(v(0));
            }
            PathOp::QuadTo => {
                arity(4)?;
                builder.quad_to(pt(0), pt(2));
            }
            PathOp::RelQuadTo => {
                arity(4)?;
                builder.rel_quad_to(v(0), v(2));
            }
            PathOp::CubicTo => {
                arity(6)?;
                builder.cubic_to(pt(0), pt(2), pt(4));
            }
            PathOp::RelCubicTo => {
                arity(6)?;
                builder.rel_cubic_to(v(0), v(2), v(4));
            }
            PathOp::ConicTo => {
                arity(5)?;
                builder.conic_to(pt(0), pt(2), o[4]);
            }
            PathOp::RelConicTo => {
                arity(5)?;
                builder.rel_conic_to(v(0), v(2), o[4]);
            }
            PathOp::ArcTo => {
                arity(7)?;
                builder.arc_to(rect(), o[4], o[5], o[6] != 0.0);
            }
            PathOp::ArcToPoint => {
                arity(7)?;
                builder.arc_to_point(pt(0), v(2), o[4], o[5] != 0.0, o[6] != 0.0);
            }
            PathOp::RelArcToPoint => {
                arity(7)?;
                builder.rel_arc_to_point(v(0), v(2), o[4], o[5] != 0.0, o[6] != 0.0);
            }
            PathOp::AddRect => {
                arity(4)?;
                builder.add_rect(rect());
            }
            PathOp::AddOval => {
                arity(4)?;
                builder.add_oval(rect());
            }
            PathOp::AddArc => {
                arity(6)?;
                builder.add_arc(rect(), o[4], o[5]);
            }
            PathOp::AddRoundedRect => {
                arity(6)?;
                builder.add_rounded_rect(rect(), v(4));
            }
            PathOp::AddPolygon => {
                if o.is_empty() || o.len() % 2 == 0 {
                    return Err(SceneError::validation(format!(
                        "path instruction {index} (AddPolygon) has malformed operands"
                    )));
                }
                let points: Vec<Point> = o[1..]
                    .chunks_exact(2)
                    .map(|c| Point::new(c[0], c[1]))
                    .collect();
                builder.add_polygon(&points, o[0] != 0.0);
            }
            PathOp::AddPath => {
                if o.len() < 2 {
                    return Err(SceneError::validation(format!(
                        "path instruction {index} (AddPath) is missing its offset"
                    )));
                }
                let path = decode_elements(&o[2..]).ok_or_else(|| {
                    SceneError::validation(format!(
                        "path instruction {index} (AddPath) has malformed elements"
                    ))
                })?;
                builder.add_path(&path, v(0));
            }
            PathOp::Close => {
                arity(0)?;
                builder.close();
            }
        }
    }
    Ok(())
}

fn decode_elements(mut o: &[f64]) -> Option<BezPath> {
    let mut path = BezPath::new();
    while let Some((&tag, rest)) = o.split_first() {
        let take = |n: usize| rest.get(..n);
        if (1..=3).contains(&(tag as u8)) && path.elements().is_empty() {
            return None;
        }
        let used = match tag as u8 {
            0 => {
                let p = take(2)?;
                path.move_to((p[0], p[1]));
                2
            }
            1 => {
                let p = take(2)?;
                path.line_to((p[0], p[1]));
                2
            }
            2 => {
                let p = take(4)?;
                path.quad_to((p[0], p[1]), (p[2], p[3]));
                4
            }
            3 => {
                let p = take(6)?;
                path.curve_to((p[0], p[1]), (p[2], p[3]), (p[4], p[5]));
                6
            }
            4 => {
                path.close_path();
                0
            }
            _ => return None,
        };
        o = &rest[used..];
    }
    Some(path)
}

#[cfg(test)]
#[path = "../../tests/unit/path/recorder.rs"]
mod tests;
