use std::str::FromStr;

use crate::foundation::core::Rgba8;

impl From<svgtypes::Color> for Rgba8 {
    fn from(c: svgtypes::Color) -> Self {
        Rgba8::rgba(c.red, c.green, c.blue, c.alpha)
    }
}

/// Parse a CSS color: hex forms, `rgb()`/`rgba()`, `hsl()`/`hsla()`, `transparent`, or
/// any of the SVG named colors.
///
/// `currentColor`, `none` and `url(...)` are paints, not colors; see
/// [`crate::parse_paint`].
pub fn parse_color(s: &str) -> Option<Rgba8> {
    svgtypes::Color::from_str(s.trim()).ok().map(Rgba8::from)
}

#[cfg(test)]
#[path = "../../tests/unit/style/color.rs"]
mod tests;
