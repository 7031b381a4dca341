//! Number, number-list and length parsing for attribute values.

use std::str::FromStr;

/// CSS pixels per inch; absolute units are converted to user units at this density.
pub const USER_UNITS_PER_INCH: f64 = 96.0;

/// Parse a single SVG number, rejecting trailing garbage and non-finite values.
pub fn parse_number(s: &str) -> Option<f64> {
    let svgtypes::Number(v) = svgtypes::Number::from_str(s.trim()).ok()?;
    v.is_finite().then_some(v)
}

/// Parse a whitespace/comma separated list of numbers such as `points`.
///
/// Returns `None` if any token fails to parse.
pub fn parse_number_list(s: &str) -> Option<Vec<f64>> {
    svgtypes::NumberListParser::from(s)
        .collect::<Result<Vec<f64>, _>>()
        .ok()
}

/// Unit suffix of a length value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LengthUnit {
    /// Bare number, already in user units.
    None,
    /// `px`
    Px,
    /// `pt`
    Pt,
    /// `pc`
    Pc,
    /// `mm`
    Mm,
    /// `cm`
    Cm,
    /// `in`
    In,
    /// `em`, relative to the font size.
    Em,
    /// `ex`, approximated as half the font size.
    Ex,
    /// `%`, relative to a caller-supplied reference length.
    Percent,
}

/// A number with a unit, as written in an attribute.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Length {
    /// Numeric part.
    pub value: f64,
    /// Unit suffix.
    pub unit: LengthUnit,
}

impl Length {
    /// Length in user units.
    pub const fn user(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::None,
        }
    }

    /// Convert to user units. Percentages scale `reference`; font-relative units scale `font_size`.
    pub fn to_user(self, reference: f64, font_size: f64) -> f64 {
        let v = self.value;
        match self.unit {
            LengthUnit::None | LengthUnit::Px => v,
            LengthUnit::Pt => v * USER_UNITS_PER_INCH / 72.0,
            LengthUnit::Pc => v * USER_UNITS_PER_INCH / 6.0,
            LengthUnit::Mm => v * USER_UNITS_PER_INCH / 25.4,
            LengthUnit::Cm => v * USER_UNITS_PER_INCH / 2.54,
            LengthUnit::In => v * USER_UNITS_PER_INCH,
            LengthUnit::Em => v * font_size,
            LengthUnit::Ex => v * font_size / 2.0,
            LengthUnit::Percent => v / 100.0 * reference,
        }
    }

    /// True for `%` lengths.
    pub fn is_percent(self) -> bool {
        self.unit == LengthUnit::Percent
    }
}

impl From<svgtypes::LengthUnit> for LengthUnit {
    fn from(unit: svgtypes::LengthUnit) -> Self {
        match unit {
            svgtypes::LengthUnit::None => Self::None,
            svgtypes::LengthUnit::Px => Self::Px,
            svgtypes::LengthUnit::Pt => Self::Pt,
            svgtypes::LengthUnit::Pc => Self::Pc,
            svgtypes::LengthUnit::Mm => Self::Mm,
            svgtypes::LengthUnit::Cm => Self::Cm,
            svgtypes::LengthUnit::In => Self::In,
            svgtypes::LengthUnit::Em => Self::Em,
            svgtypes::LengthUnit::Ex => Self::Ex,
            svgtypes::LengthUnit::Percent => Self::Percent,
        }
    }
}

fn finite_length(length: svgtypes::Length) -> Option<Length> {
    length.number.is_finite().then(|| Length {
        value: length.number,
        unit: length.unit.into(),
    })
}

/// Parse a length such as `12`, `12.5px`, `3mm` or `50%`.
pub fn parse_length(s: &str) -> Option<Length> {
    finite_length(svgtypes::Length::from_str(s.trim()).ok()?)
}

/// First entry of a length list such as a text `x="10 20 30"`.
pub fn parse_first_length(list: &str) -> Option<Length> {
    finite_length(svgtypes::LengthListParser::from(list).next()?.ok()?)
}

/// Parse a fraction written either as a decimal (`0.25`) or a percentage (`25%`).
pub fn parse_fraction(s: &str) -> Option<f64> {
    let length = parse_length(s)?;
    match length.unit {
        LengthUnit::None => Some(length.value),
        LengthUnit::Percent => Some(length.value / 100.0),
        _ => None,
    }
}

/// Parse a percentage scaled by `multiplier`, or an absolute length in user units.
pub fn parse_percentage_or_length(s: &str, multiplier: f64) -> Option<f64> {
    parse_length(s).map(|l| l.to_user(multiplier, 0.0))
}

/// Reference sizes for resolving element geometry lengths.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LengthContext {
    /// Width that horizontal percentages refer to.
    pub width: f64,
    /// Height that vertical percentages refer to.
    pub height: f64,
    /// Font size for `em`/`ex`.
    pub font_size: f64,
}

impl LengthContext {
    /// Horizontal length (`x`, `cx`, `width`, `rx`, ...).
    pub fn x(&self, s: &str) -> Option<f64> {
        parse_length(s).map(|l| l.to_user(self.width, self.font_size))
    }

    /// Vertical length (`y`, `cy`, `height`, `ry`, ...).
    pub fn y(&self, s: &str) -> Option<f64> {
        parse_length(s).map(|l| l.to_user(self.height, self.font_size))
    }

    /// Non-directional length such as `r`; percentages use the normalized diagonal.
    pub fn other(&self, s: &str) -> Option<f64> {
        let diagonal = ((self.width * self.width + self.height * self.height) / 2.0).sqrt();
        parse_length(s).map(|l| l.to_user(diagonal, self.font_size))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/units.rs"]
mod tests;
