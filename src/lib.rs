//! svgscene parses a constrained SVG subset into an in-memory scene graph.
//!
//! The parser is event driven. A [`SubtreeWalker`] drives a forward-only stream of
//! [`MarkupEvent`]s, element handlers build the tree while tracking the open container
//! stack, and every element with an `id` lands in a [`DefinitionsRegistry`]. Forward `use`
//! references are resolved once the walk completes; gradients inheriting stops from a later
//! gradient are resolved as soon as that gradient is registered.
//!
//! - Parse a document with [`parse_svg_str`] or a configured [`SceneParser`]
//! - Walk the resulting [`SceneRoot`]
//! - Replay a shape's recorded [`PathInstruction`]s into any [`PathBuilder`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod markup;
mod parse;
mod path;
mod scene;
mod style;
mod text;
mod transform;

pub use crate::foundation::core::{Affine, BezPath, PathEl, Point, Rect, Rgba8, Size, Vec2};
pub use crate::foundation::error::{SceneError, SceneResult};
pub use crate::foundation::units::{
    Length, LengthContext, LengthUnit, USER_UNITS_PER_INCH, parse_first_length, parse_fraction,
    parse_length, parse_number, parse_number_list, parse_percentage_or_length,
};

pub use crate::markup::attributes::{Attribute, Attributes};
pub use crate::markup::event::{MarkupEvent, OpenElement};
pub use crate::markup::walker::{Subtree, SubtreeCursor, SubtreeWalker};
pub use crate::markup::xml::events_from_str;

pub use crate::style::color::parse_color;
pub use crate::style::model::{FillRule, Paint, Style, TextAnchor};
pub use crate::style::resolve::{
    PresentationStyleResolver, StyleResolver, parse_paint, reference_key,
};
pub use crate::transform::affine::{compose, parse_transform, transform_attribute};

pub use crate::path::builder::{ARC_TOLERANCE, GeometryPathBuilder, PathBuilder};
pub use crate::path::recorder::{PathInstruction, PathOp, RecordingPathBuilder, replay};
pub use crate::path::shapes::{RecordedPath, SHAPE_ELEMENTS, build_shape};

pub use crate::text::runs::{TextRun, TextRunBuilder, TextRunFrame};
pub use crate::text::shaper::{
    Ink, MonospaceShaper, Paragraph, ParagraphShaper, ParleyShaper, ink_paint,
};

pub use crate::assets::decode::{PreparedImage, decode_image};
pub use crate::assets::resolve::{
    DataUrlResolver, FileResolver, ImageResolver, decode_data_url, normalize_rel_path,
};

pub use crate::scene::gradient::{
    Gradient, GradientAttributes, GradientGeometry, GradientStops, GradientUnitResolver,
    GradientUnits, SpreadMethod,
};
pub use crate::scene::model::{
    ClipPath, GroupKind, GroupNode, ImageNode, SceneNode, SceneRoot, ShapeNode, TextNode,
    Viewport,
};
pub use crate::scene::registry::{Definition, DefinitionsRegistry};

pub use crate::parse::{ParseOptions, SceneParser, UnresolvedPolicy, parse_svg_str};
