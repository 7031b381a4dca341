//! Basic-shape elements (`circle`, `rect`, `path`, ...) turned into recorded paths.

use crate::foundation::core::{BezPath, PathEl, Point, Rect, Vec2};
use crate::foundation::units::{LengthContext, parse_number_list};
use crate::markup::attributes::Attributes;
use crate::path::builder::{GeometryPathBuilder, PathBuilder};
use crate::path::recorder::{PathInstruction, RecordingPathBuilder};

/// Geometry of a shape together with the construction log that produced it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RecordedPath {
    /// Real geometry in the element's local space.
    pub geometry: BezPath,
    /// Every construction call, in order.
    pub instructions: Vec<PathInstruction>,
}

impl RecordedPath {
    /// Run `build` against a fresh recording builder.
    pub fn record(build: impl FnOnce(&mut RecordingPathBuilder)) -> Self {
        let mut rec = RecordingPathBuilder::new(GeometryPathBuilder::new());
        build(&mut rec);
        let (geometry, instructions) = rec.finish();
        Self {
            geometry: geometry.into_path(),
            instructions,
        }
    }
}

/// Element names that produce a shape.
pub const SHAPE_ELEMENTS: &[&str] = &[
    "circle", "ellipse", "line", "path", "polygon", "polyline", "rect",
];

/// Build the geometry of shape element `name`.
///
/// Returns `None` for names that are not shapes and for shapes that are disabled by their
/// attributes (zero radius or size, empty point list, unparseable path data).
pub fn build_shape(
    name: &str,
    attrs: &Attributes,
    lengths: &LengthContext,
) -> Option<RecordedPath> {
    match name {
        "circle" => circle(attrs, lengths),
        "ellipse" => ellipse(attrs, lengths),
        "line" => line(attrs, lengths),
        "path" => path(attrs),
        "polygon" => poly(attrs, true),
        "polyline" => poly(attrs, false),
        "rect" => rect(attrs, lengths),
        _ => None,
    }
}

fn len_x(attrs: &Attributes, name: &str, lengths: &LengthContext) -> f64 {
    attrs.get(name).and_then(|v| lengths.x(v)).unwrap_or(0.0)
}

fn len_y(attrs: &Attributes, name: &str, lengths: &LengthContext) -> f64 {
    attrs.get(name).and_then(|v| lengths.y(v)).unwrap_or(0.0)
}

fn circle(attrs: &Attributes, lengths: &LengthContext) -> Option<RecordedPath> {
    let cx = len_x(attrs, "cx", lengths);
    let cy = len_y(attrs, "cy", lengths);
    let r = attrs.get("r").and_then(|v| lengths.other(v))?;
    if r <= 0.0 {
        return None;
    }
    let oval = Rect::new(cx - r, cy - r, cx + r, cy + r);
    Some(RecordedPath::record(|b| b.add_oval(oval)))
}

fn ellipse(attrs: &Attributes, lengths: &LengthContext) -> Option<RecordedPath> {
    let cx = len_x(attrs, "cx", lengths);
    let cy = len_y(attrs, "cy", lengths);
    let rx = len_x(attrs, "rx", lengths);
    let ry = len_y(attrs, "ry", lengths);
    if rx <= 0.0 || ry <= 0.0 {
        return None;
    }
    let oval = Rect::new(cx - rx, cy - ry, cx + rx, cy + ry);
    Some(RecordedPath::record(|b| b.add_oval(oval)))
}

fn line(attrs: &Attributes, lengths: &LengthContext) -> Option<RecordedPath> {
    let from = Point::new(len_x(attrs, "x1", lengths), len_y(attrs, "y1", lengths));
    let to = Point::new(len_x(attrs, "x2", lengths), len_y(attrs, "y2", lengths));
    Some(RecordedPath::record(|b| {
        b.move_to(from);
        b.line_to(to);
    }))
}

fn rect(attrs: &Attributes, lengths: &LengthContext) -> Option<RecordedPath> {
    let x = len_x(attrs, "x", lengths);
    let y = len_y(attrs, "y", lengths);
    let w = len_x(attrs, "width", lengths);
    let h = len_y(attrs, "height", lengths);
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    let bounds = Rect::new(x, y, x + w, y + h);

    // A missing corner radius mirrors the one that is present.
    let rx = attrs.get("rx").and_then(|v| lengths.x(v));
    let ry = attrs.get("ry").and_then(|v| lengths.y(v));
    let radii = match (rx, ry) {
        (Some(rx), Some(ry)) => Some(Vec2::new(rx, ry)),
        (Some(r), None) | (None, Some(r)) => Some(Vec2::new(r, r)),
        (None, None) => None,
    };
    Some(RecordedPath::record(|b| match radii {
        Some(radii) if radii.x > 0.0 && radii.y > 0.0 => b.add_rounded_rect(bounds, radii),
        _ => b.add_rect(bounds),
    }))
}

fn poly(attrs: &Attributes, close: bool) -> Option<RecordedPath> {
    let coords = parse_number_list(attrs.get("points")?)?;
    // An odd trailing coordinate is ignored.
    let points: Vec<Point> = coords
        .chunks_exact(2)
        .map(|c| Point::new(c[0], c[1]))
        .collect();
    if points.is_empty() {
        return None;
    }
    Some(RecordedPath::record(|b| b.add_polygon(&points, close)))
}

fn path(attrs: &Attributes) -> Option<RecordedPath> {
    let d = attrs.get("d")?;
    let normalized = match BezPath::from_svg(d) {
        Ok(p) => p,
        Err(err) => {
            tracing::warn!(%err, "ignoring path with invalid data");
            return None;
        }
    };
    if normalized.elements().is_empty() {
        return None;
    }
    Some(RecordedPath::record(|b| {
        for el in normalized.elements() {
            match *el {
                PathEl::MoveTo(p) => b.move_to(p),
                PathEl::LineTo(p) => b.line_to(p),
                PathEl::QuadTo(c, p) => b.quad_to(c, p),
                PathEl::CurveTo(c1, c2, p) => b.cubic_to(c1, c2, p),
                PathEl::ClosePath => b.close(),
            }
        }
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/path/shapes.rs"]
mod tests;
