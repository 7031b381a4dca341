use crate::foundation::core::Rgba8;
use crate::foundation::units::{parse_fraction, parse_length};
use crate::markup::attributes::Attributes;
use crate::style::color::parse_color;
use crate::style::model::{FillRule, Paint, Style, TextAnchor};

/// Computes the style snapshot of an element from its parent's snapshot and its attributes.
pub trait StyleResolver {
    /// Resolve the style of an element whose parent resolved to `parent`.
    fn resolve(&self, parent: &Style, attrs: &Attributes) -> Style;
}

/// Presentation-attribute resolver.
///
/// Inherits every property except `opacity` from the parent and overrides it with the
/// element's presentation attributes (or inline `style` declarations). Values that fail to
/// parse are ignored and the inherited value is kept.
#[derive(Clone, Copy, Debug, Default)]
pub struct PresentationStyleResolver;

impl StyleResolver for PresentationStyleResolver {
    fn resolve(&self, parent: &Style, attrs: &Attributes) -> Style {
        let mut style = Style {
            opacity: None,
            ..parent.clone()
        };

        if let Some(c) = attrs.get("color").and_then(parse_color) {
            style.color = Some(c);
        }
        let current = style.color.unwrap_or(Rgba8::BLACK);

        if let Some(p) = attrs.get("fill").and_then(|v| parse_paint(v, current)) {
            style.fill = Some(p);
        }
        if let Some(p) = attrs.get("stroke").and_then(|v| parse_paint(v, current)) {
            style.stroke = Some(p);
        }
        if let Some(w) = attrs
            .get("stroke-width")
            .and_then(parse_length)
            .map(|l| l.to_user(0.0, style.font_size_or_default()))
        {
            style.stroke_width = Some(w.max(0.0));
        }
        if let Some(v) = attrs.get("opacity").and_then(parse_fraction) {
            style.opacity = Some(v.clamp(0.0, 1.0));
        }
        if let Some(v) = attrs.get("fill-opacity").and_then(parse_fraction) {
            style.fill_opacity = Some(v.clamp(0.0, 1.0));
        }
        if let Some(v) = attrs.get("stroke-opacity").and_then(parse_fraction) {
            style.stroke_opacity = Some(v.clamp(0.0, 1.0));
        }
        match attrs.get("fill-rule") {
            Some("nonzero") => style.fill_rule = Some(FillRule::NonZero),
            Some("evenodd") => style.fill_rule = Some(FillRule::EvenOdd),
            _ => {}
        }
        if let Some(size) = attrs
            .get("font-size")
            .and_then(parse_length)
            .map(|l| l.to_user(parent.font_size_or_default(), parent.font_size_or_default()))
        {
            style.font_size = Some(size);
        }
        if let Some(family) = attrs.get("font-family") {
            style.font_family = Some(family.to_owned());
        }
        match attrs.get("text-anchor") {
            Some("start") => style.text_anchor = Some(TextAnchor::Start),
            Some("middle") => style.text_anchor = Some(TextAnchor::Middle),
            Some("end") => style.text_anchor = Some(TextAnchor::End),
            _ => {}
        }

        style
    }
}

/// Parse a `fill`/`stroke` value. `currentColor` resolves to `current`.
///
/// `inherit` and the context paints yield `None`, which keeps the inherited paint.
pub fn parse_paint(value: &str, current: Rgba8) -> Option<Paint> {
    let paint = match svgtypes::Paint::from_str(value.trim()).ok()? {
        svgtypes::Paint::None => Paint::None,
        svgtypes::Paint::CurrentColor => Paint::Color(current),
        svgtypes::Paint::Color(c) => Paint::Color(c.into()),
        svgtypes::Paint::FuncIRI(id, fallback) => {
            if id.is_empty() {
                return None;
            }
            let fallback = match fallback {
                None | Some(svgtypes::PaintFallback::None) => None,
                Some(svgtypes::PaintFallback::CurrentColor) => Some(current),
                Some(svgtypes::PaintFallback::Color(c)) => Some(c.into()),
            };
            Paint::Reference {
                id: id.to_owned(),
                fallback,
            }
        }
        _ => return None,
    };
    Some(paint)
}

/// Normalize a reference (`url(#id)`, `#id` or `id`) to its bare identifier.
pub fn reference_key(reference: &str) -> &str {
    let r = reference.trim();
    if let Ok(svgtypes::FuncIRI(id)) = svgtypes::FuncIRI::from_str(r) {
        return id;
    }
    if let Ok(svgtypes::IRI(id)) = svgtypes::IRI::from_str(r) {
        return id;
    }
    r.strip_prefix('#').unwrap_or(r)
}

#[cfg(test)]
#[path = "../../tests/unit/style/resolve.rs"]
mod tests;
