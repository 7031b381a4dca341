//! Gradient paint servers and their unit-space geometry.

use crate::foundation::core::{Affine, Point, Rect, Rgba8};
use crate::foundation::units::{parse_fraction, parse_length};
use crate::markup::attributes::Attributes;
use crate::style::color::parse_color;

/// Coordinate system of a gradient's geometry attributes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GradientUnits {
    /// Fractions of the painted element's bounding box.
    #[default]
    ObjectBoundingBox,
    /// Absolute user-space coordinates.
    UserSpaceOnUse,
}

impl GradientUnits {
    /// Parse a `gradientUnits` value.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "objectBoundingBox" => Some(Self::ObjectBoundingBox),
            "userSpaceOnUse" => Some(Self::UserSpaceOnUse),
            _ => None,
        }
    }
}

/// Behavior outside the `[0, 1]` gradient range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SpreadMethod {
    /// Extend the edge colors.
    #[default]
    Pad,
    /// Mirror.
    Reflect,
    /// Repeat.
    Repeat,
}

impl SpreadMethod {
    /// Parse a `spreadMethod` value.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "pad" => Some(Self::Pad),
            "reflect" => Some(Self::Reflect),
            "repeat" => Some(Self::Repeat),
            _ => None,
        }
    }
}

/// Shape of the gradient.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum GradientGeometry {
    /// Color varies along `from` → `to`.
    Linear {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
    },
    /// Color varies from the focal circle to the outer circle.
    Radial {
        /// Outer circle center.
        center: Point,
        /// Outer circle radius.
        radius: f64,
        /// Focal point; identical to `center` when not offset.
        focal: Point,
        /// Focal circle radius.
        focal_radius: f64,
    },
}

/// Color stops as parallel arrays.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientStops {
    /// Stop colors, with `stop-opacity` folded into alpha.
    pub colors: Vec<Rgba8>,
    /// Stop offsets in `[0, 1]`, non-decreasing.
    pub offsets: Vec<f64>,
}

impl GradientStops {
    /// Number of stops.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// True if there are no stops.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Append a stop from a `stop` element's attributes.
    ///
    /// Offsets are clamped to `[0, 1]` and to the previous stop's offset.
    pub fn push_stop(&mut self, attrs: &Attributes) {
        let offset = attrs
            .get("offset")
            .and_then(parse_fraction)
            .unwrap_or(0.0)
            .clamp(0.0, 1.0);
        let offset = self.offsets.last().map_or(offset, |prev| offset.max(*prev));
        let color = attrs
            .get("stop-color")
            .and_then(parse_color)
            .unwrap_or(Rgba8::BLACK);
        let opacity = attrs
            .get("stop-opacity")
            .and_then(parse_fraction)
            .unwrap_or(1.0);
        self.colors.push(color.with_opacity(opacity));
        self.offsets.push(offset);
    }
}

impl GradientGeometry {
    /// True for a radial gradient whose focal point differs from its center.
    pub fn has_focal_offset(&self) -> bool {
        match self {
            Self::Linear { .. } => false,
            Self::Radial { center, focal, .. } => center != focal,
        }
    }
}

/// A resolved linear or radial gradient.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Gradient {
    /// Reference identifier.
    pub id: String,
    /// Geometry in `units`.
    pub geometry: GradientGeometry,
    /// Color stops.
    pub stops: GradientStops,
    /// Unit space of `geometry`.
    pub units: GradientUnits,
    /// Spread method.
    pub spread: SpreadMethod,
    /// `gradientTransform`.
    pub transform: Option<Affine>,
}

/// Attribute lookup for a gradient: own attributes first, then the raw attributes of the
/// gradient it references.
#[derive(Clone, Copy, Debug)]
pub struct GradientAttributes<'a> {
    /// The gradient element's own attributes.
    pub own: &'a Attributes,
    /// Raw attributes of the referenced base gradient.
    pub base: Option<&'a Attributes>,
}

impl<'a> GradientAttributes<'a> {
    /// Per-attribute lookup with fallback to the base gradient.
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.own.get_or_backup(name, self.base)
    }
}

/// Resolves gradient geometry for a unit space against the viewport bounds.
#[derive(Clone, Copy, Debug)]
pub struct GradientUnitResolver {
    /// Unit space the attributes are written in.
    pub units: GradientUnits,
    /// Viewport bounding box used by `userSpaceOnUse` percentages.
    pub bounds: Rect,
}

impl GradientUnitResolver {
    fn x(&self, value: Option<&str>, default: f64) -> f64 {
        self.coordinate(value, default, self.bounds.width(), self.bounds.x0)
    }

    fn y(&self, value: Option<&str>, default: f64) -> f64 {
        self.coordinate(value, default, self.bounds.height(), self.bounds.y0)
    }

    fn radius(&self, value: Option<&str>, default: f64) -> f64 {
        let reference = (self.bounds.width() + self.bounds.height()) / 2.0;
        self.coordinate(value, default, reference, 0.0)
    }

    // `default` is a bounding-box fraction; user-space defaults scale like percentages.
    fn coordinate(&self, value: Option<&str>, default: f64, extent: f64, origin: f64) -> f64 {
        match self.units {
            GradientUnits::ObjectBoundingBox => value.and_then(parse_fraction).unwrap_or(default),
            GradientUnits::UserSpaceOnUse => match value.and_then(parse_length) {
                Some(l) if l.is_percent() => l.value / 100.0 * extent + origin,
                Some(l) => l.to_user(extent, 0.0),
                None => default * extent + origin,
            },
        }
    }

    /// Endpoints from `x1`, `y1`, `x2`, `y2` (defaults `0%`, `0%`, `100%`, `0%`).
    pub fn linear(&self, attrs: GradientAttributes<'_>) -> GradientGeometry {
        GradientGeometry::Linear {
            from: Point::new(self.x(attrs.get("x1"), 0.0), self.y(attrs.get("y1"), 0.0)),
            to: Point::new(self.x(attrs.get("x2"), 1.0), self.y(attrs.get("y2"), 0.0)),
        }
    }

    /// Circles from `cx`, `cy`, `r`, `fx`, `fy`, `fr` (defaults `50%`, `50%`, `50%`, center,
    /// center, `0`).
    pub fn radial(&self, attrs: GradientAttributes<'_>) -> GradientGeometry {
        let center = Point::new(self.x(attrs.get("cx"), 0.5), self.y(attrs.get("cy"), 0.5));
        let radius = self.radius(attrs.get("r"), 0.5);
        let fx = attrs.get("fx").map(|v| self.x(Some(v), 0.5)).unwrap_or(center.x);
        let fy = attrs.get("fy").map(|v| self.y(Some(v), 0.5)).unwrap_or(center.y);
        let focal = Point::new(fx, fy);
        let focal_radius = self.radius(attrs.get("fr"), 0.0);
        GradientGeometry::Radial {
            center,
            radius,
            focal,
            focal_radius,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/gradient.rs"]
mod tests;
