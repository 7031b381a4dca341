//! Paragraph layout contract and its implementations.

use std::borrow::Cow;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{SceneError, SceneResult};
use crate::style::model::{Paint, Style};

/// Which paint a paragraph is laid out for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ink {
    /// Glyph interiors.
    Fill,
    /// Glyph outlines.
    Stroke,
}

/// Measured result of laying out one text chunk on a single line.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Paragraph {
    /// Ink this paragraph carries.
    pub ink: Ink,
    /// Paint for the ink; transparent when the style leaves it unpainted.
    pub paint: Paint,
    /// Advance width in user units.
    pub width: f64,
    /// Line height in user units.
    pub height: f64,
}

/// Lays out a single line of text for a resolved style.
pub trait ParagraphShaper {
    /// Lay out `text` with `style`, carrying the fill or stroke paint selected by `ink`.
    fn layout(&mut self, text: &str, style: &Style, ink: Ink) -> SceneResult<Paragraph>;
}

/// Paint carried by a paragraph of the given ink.
///
/// Fill defaults to black; stroke defaults to transparent.
pub fn ink_paint(style: &Style, ink: Ink) -> Paint {
    match ink {
        Ink::Fill => style.fill.clone().unwrap_or(Paint::Color(Rgba8::BLACK)),
        Ink::Stroke => style
            .stroke
            .clone()
            .unwrap_or(Paint::Color(Rgba8::TRANSPARENT)),
    }
}

/// Fixed-pitch approximation: every character advances `0.6 × font-size`.
///
/// Deterministic and font-free; suitable for tests and headless tools.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonospaceShaper;

impl MonospaceShaper {
    /// Advance of one character as a fraction of the font size.
    pub const ADVANCE_PER_EM: f64 = 0.6;
    /// Line height as a multiple of the font size.
    pub const LINE_HEIGHT_PER_EM: f64 = 1.2;
}

impl ParagraphShaper for MonospaceShaper {
    fn layout(&mut self, text: &str, style: &Style, ink: Ink) -> SceneResult<Paragraph> {
        let size = style.font_size_or_default();
        Ok(Paragraph {
            ink,
            paint: ink_paint(style, ink),
            width: text.chars().count() as f64 * size * Self::ADVANCE_PER_EM,
            height: size * Self::LINE_HEIGHT_PER_EM,
        })
    }
}

/// Shapes text with Parley against fonts registered from raw bytes.
pub struct ParleyShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    default_family: Option<String>,
}

impl Default for ParleyShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl ParleyShaper {
    /// Construct a shaper with fresh Parley contexts and no fonts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            default_family: None,
        }
    }

    /// Register a font from bytes and return its family name.
    ///
    /// The first registered family is used when a style names no family.
    pub fn register_font(&mut self, font_bytes: Vec<u8>) -> SceneResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            SceneError::validation("no font families registered from font bytes")
        })?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SceneError::validation("registered font family has no name"))?
            .to_string();
        tracing::debug!(family = %family_name, "registered font");
        self.default_family.get_or_insert_with(|| family_name.clone());
        Ok(family_name)
    }
}

impl ParagraphShaper for ParleyShaper {
    fn layout(&mut self, text: &str, style: &Style, ink: Ink) -> SceneResult<Paragraph> {
        let size = style.font_size_or_default();
        if !size.is_finite() || size <= 0.0 {
            return Err(SceneError::validation("font-size must be finite and > 0"));
        }
        let paint = ink_paint(style, ink);
        let brush = match &paint {
            Paint::Color(c) => *c,
            Paint::Reference { fallback, .. } => fallback.unwrap_or(Rgba8::BLACK),
            Paint::None => Rgba8::TRANSPARENT,
        };

        let family = style.font_family.clone().or_else(|| self.default_family.clone());
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        if let Some(family) = family {
            builder.push_default(parley::style::StyleProperty::FontStack(
                parley::style::FontStack::Source(Cow::Owned(family)),
            ));
        }
        builder.push_default(parley::style::StyleProperty::FontSize(size as f32));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);

        Ok(Paragraph {
            ink,
            paint,
            width: f64::from(layout.width()),
            height: f64::from(layout.height()),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/shaper.rs"]
mod tests;
