//! Stacked text-run state for `text` / `tspan` nesting.

use crate::foundation::core::{Affine, Point};
use crate::foundation::error::SceneResult;
use crate::foundation::units::{Length, LengthContext, parse_first_length};
use crate::markup::attributes::Attributes;
use crate::style::model::{Style, TextAnchor};
use crate::text::shaper::{Ink, Paragraph, ParagraphShaper};
use crate::transform::affine::{compose, transform_attribute};

/// State of one open text-bearing element.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRunFrame {
    /// Resolved style of the element.
    pub style: Style,
    /// Absolute start position of its text.
    pub offset: Point,
    /// Accumulated transform of all enclosing text frames and this one.
    pub transform: Affine,
    /// `xml:space="preserve"` is in effect.
    pub preserve_space: bool,
}

/// One laid-out text chunk.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextRun {
    /// Chunk content after whitespace handling.
    pub text: String,
    /// Start position.
    pub offset: Point,
    /// Anchoring of `offset` relative to the run.
    pub anchor: TextAnchor,
    /// Layout for the fill ink.
    pub fill: Paragraph,
    /// Layout for the stroke ink.
    pub stroke: Paragraph,
}

impl TextRun {
    /// Advance width of the run.
    pub fn width(&self) -> f64 {
        self.fill.width
    }
}

/// Builds text runs while mirroring the nesting of text-bearing elements.
#[derive(Clone, Debug, Default)]
pub struct TextRunBuilder {
    frames: Vec<TextRunFrame>,
    last_width: f64,
    last_offset: Option<Point>,
}

impl TextRunBuilder {
    /// Builder with an empty frame stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open frames.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Innermost open frame.
    pub fn top(&self) -> Option<&TextRunFrame> {
        self.frames.last()
    }

    /// Open a frame for an element with `attrs` and an already resolved `style`.
    ///
    /// Each axis takes the explicit `x`/`y` when present. Otherwise it continues from where
    /// the last emitted chunk ended (or the enclosing frame's offset when nothing was emitted
    /// yet) plus `dx`/`dy`. The outermost frame without coordinates starts at zero.
    pub fn push_frame(&mut self, attrs: &Attributes, style: Style, lengths: &LengthContext) {
        let continued = match (self.last_offset, self.top()) {
            (Some(last), Some(_)) => Point::new(last.x + self.last_width, last.y),
            (None, Some(parent)) => parent.offset,
            (_, None) => Point::ZERO,
        };
        let x = coordinate(attrs, "x", "dx", continued.x, |l| {
            l.to_user(lengths.width, lengths.font_size)
        });
        let y = coordinate(attrs, "y", "dy", continued.y, |l| {
            l.to_user(lengths.height, lengths.font_size)
        });

        let own = transform_attribute(attrs, "transform").unwrap_or(Affine::IDENTITY);
        let (transform, inherited_space) = match self.top() {
            Some(parent) => (compose(parent.transform, own), parent.preserve_space),
            None => (own, false),
        };
        let preserve_space = match attrs.get("space") {
            Some("preserve") => true,
            Some("default") => false,
            _ => inherited_space,
        };

        self.frames.push(TextRunFrame {
            style,
            offset: Point::new(x, y),
            transform,
            preserve_space,
        });
    }

    /// Close the innermost frame. Closing the outermost one resets the run chaining.
    pub fn pop_frame(&mut self) -> Option<TextRunFrame> {
        let frame = self.frames.pop();
        if self.frames.is_empty() {
            self.last_width = 0.0;
            self.last_offset = None;
        }
        frame
    }

    /// Lay out a literal chunk with the innermost frame.
    ///
    /// Returns `None` when no frame is open or the chunk is blank after whitespace handling.
    pub fn emit(
        &mut self,
        content: &str,
        shaper: &mut dyn ParagraphShaper,
    ) -> SceneResult<Option<(TextRun, Affine)>> {
        let Some(frame) = self.frames.last() else {
            return Ok(None);
        };
        let text = normalize_whitespace(content, frame.preserve_space);
        if text.trim().is_empty() {
            return Ok(None);
        }
        let fill = shaper.layout(&text, &frame.style, Ink::Fill)?;
        let stroke = shaper.layout(&text, &frame.style, Ink::Stroke)?;
        let run = TextRun {
            text,
            offset: frame.offset,
            anchor: frame.style.anchor(),
            fill,
            stroke,
        };
        let transform = frame.transform;
        self.last_width = run.width();
        self.last_offset = Some(run.offset);
        Ok(Some((run, transform)))
    }
}

fn coordinate(
    attrs: &Attributes,
    absolute: &str,
    relative: &str,
    base: f64,
    to_user: impl Fn(Length) -> f64,
) -> f64 {
    // Only the first value of a coordinate list is used.
    let value = |name: &str| attrs.get(name).and_then(parse_first_length).map(&to_user);
    match value(absolute) {
        Some(v) => v,
        None => base + value(relative).unwrap_or(0.0),
    }
}

fn normalize_whitespace(content: &str, preserve: bool) -> String {
    if preserve {
        content
            .chars()
            .filter(|c| !matches!(c, '\n' | '\r' | '\t'))
            .collect()
    } else {
        content.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/runs.rs"]
mod tests;
