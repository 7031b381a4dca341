use crate::foundation::core::Rgba8;

/// How a fill or stroke is painted.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Paint {
    /// Explicitly unpainted (`none`).
    None,
    /// A solid color.
    Color(Rgba8),
    /// A paint server such as a gradient, looked up in the definitions registry.
    Reference {
        /// Reference identifier without `url(#...)` decoration.
        id: String,
        /// Color used when the reference does not resolve.
        fallback: Option<Rgba8>,
    },
}

impl Paint {
    /// True for [`Paint::None`] and fully transparent colors.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Color(c) => c.a == 0,
            Self::Reference { .. } => false,
        }
    }
}

/// Winding rule for fills and clip regions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FillRule {
    /// `nonzero`
    #[default]
    NonZero,
    /// `evenodd`
    EvenOdd,
}

/// Horizontal anchoring of a text run relative to its offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TextAnchor {
    /// `start`
    #[default]
    Start,
    /// `middle`
    Middle,
    /// `end`
    End,
}

/// Resolved style snapshot attached to every scene node.
///
/// `None` means "not specified anywhere in the ancestor chain".
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Style {
    /// `color`, the value `currentColor` resolves to.
    pub color: Option<Rgba8>,
    /// `fill`
    pub fill: Option<Paint>,
    /// `stroke`
    pub stroke: Option<Paint>,
    /// `stroke-width` in user units.
    pub stroke_width: Option<f64>,
    /// `fill-opacity`
    pub fill_opacity: Option<f64>,
    /// `stroke-opacity`
    pub stroke_opacity: Option<f64>,
    /// Group `opacity`. Not inherited.
    pub opacity: Option<f64>,
    /// `fill-rule`
    pub fill_rule: Option<FillRule>,
    /// `font-size` in user units.
    pub font_size: Option<f64>,
    /// `font-family`
    pub font_family: Option<String>,
    /// `text-anchor`
    pub text_anchor: Option<TextAnchor>,
}

impl Style {
    /// Font size used when none is specified.
    pub const DEFAULT_FONT_SIZE: f64 = 14.0;

    /// Placeholder style for clip-path geometry: transparent fill, no stroke.
    pub fn clip_placeholder() -> Self {
        Self {
            fill: Some(Paint::Color(Rgba8::TRANSPARENT)),
            stroke: Some(Paint::None),
            ..Self::default()
        }
    }

    /// Fill the unset fields of `self` from `fallback`.
    pub fn merge(&self, fallback: &Style) -> Style {
        Style {
            color: self.color.or(fallback.color),
            fill: self.fill.clone().or_else(|| fallback.fill.clone()),
            stroke: self.stroke.clone().or_else(|| fallback.stroke.clone()),
            stroke_width: self.stroke_width.or(fallback.stroke_width),
            fill_opacity: self.fill_opacity.or(fallback.fill_opacity),
            stroke_opacity: self.stroke_opacity.or(fallback.stroke_opacity),
            opacity: self.opacity.or(fallback.opacity),
            fill_rule: self.fill_rule.or(fallback.fill_rule),
            font_size: self.font_size.or(fallback.font_size),
            font_family: self
                .font_family
                .clone()
                .or_else(|| fallback.font_family.clone()),
            text_anchor: self.text_anchor.or(fallback.text_anchor),
        }
    }

    /// Use `paint` as the fill if none was resolved.
    pub fn with_default_fill(mut self, paint: Paint) -> Self {
        self.fill.get_or_insert(paint);
        self
    }

    /// Effective font size.
    pub fn font_size_or_default(&self) -> f64 {
        self.font_size.unwrap_or(Self::DEFAULT_FONT_SIZE)
    }

    /// Effective text anchor.
    pub fn anchor(&self) -> TextAnchor {
        self.text_anchor.unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/model.rs"]
mod tests;
