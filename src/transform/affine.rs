//! Affine transform helpers and the `transform` attribute grammar.

use std::str::FromStr;

use crate::foundation::core::Affine;
use crate::foundation::error::{SceneError, SceneResult};
use crate::markup::attributes::Attributes;

#[inline]
/// `a` applied after `b`.
pub fn compose(a: Affine, b: Affine) -> Affine {
    a * b
}

/// Parse a transform list such as `translate(10 20) rotate(45 5 5) scale(2)`.
///
/// Functions compose left to right, so the rightmost one applies first to coordinates.
pub fn parse_transform(s: &str) -> SceneResult<Affine> {
    let ts = svgtypes::Transform::from_str(s)
        .map_err(|err| SceneError::validation(format!("transform `{s}`: {err}")))?;
    let affine = Affine::new([ts.a, ts.b, ts.c, ts.d, ts.e, ts.f]);
    if !affine.is_finite() {
        return Err(SceneError::validation(format!("transform `{s}` is not finite")));
    }
    Ok(affine)
}

/// The transform stored in attribute `name`, if present.
///
/// An unparseable value is logged and treated as absent.
pub fn transform_attribute(attrs: &Attributes, name: &str) -> Option<Affine> {
    let raw = attrs.get(name)?;
    match parse_transform(raw) {
        Ok(t) => Some(t),
        Err(err) => {
            tracing::warn!(attribute = name, %err, "ignoring transform");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/affine.rs"]
mod tests;
