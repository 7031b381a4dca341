use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Affine, Rect, Rgba8, Size};
use crate::path::shapes::RecordedPath;
use crate::scene::registry::DefinitionsRegistry;
use crate::style::model::{Paint, Style};
use crate::text::runs::TextRun;

/// Viewport established by the root element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Intrinsic size from `width`/`height` (or the `viewBox` when absent).
    pub size: Size,
    /// User-space rectangle from `viewBox` (or `0 0 width height` when absent).
    pub view_box: Rect,
}

/// Which element produced a group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GroupKind {
    /// `g`, or the placeholder for an unsupported nested `svg`.
    Group,
    /// `a`
    Anchor,
    /// `symbol`
    Symbol,
    /// `mask`
    Mask,
    /// The root `svg`, when reached through a reference.
    Svg,
    /// Wrapper created by a `use` reference.
    Reuse,
}

/// Container node.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupNode {
    /// Producing element.
    pub kind: GroupKind,
    /// Reference identifier, possibly empty.
    pub id: String,
    /// Resolved style.
    pub style: Style,
    /// Local transform.
    pub transform: Option<Affine>,
    /// `clip-path` reference key.
    pub clip_path: Option<String>,
    /// Clip paths defined directly inside this container.
    pub clip_paths: Vec<ClipPath>,
    /// Children in document order.
    pub children: Vec<SceneNode>,
}

/// Geometry node.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeNode {
    /// Reference identifier, possibly empty.
    pub id: String,
    /// Resolved style.
    pub style: Style,
    /// Local transform.
    pub transform: Option<Affine>,
    /// `clip-path` reference key.
    pub clip_path: Option<String>,
    /// Geometry and its construction log.
    pub path: RecordedPath,
}

/// One laid-out text chunk.
#[derive(Clone, Debug, PartialEq)]
pub struct TextNode {
    /// Reference identifier, possibly empty.
    pub id: String,
    /// Resolved style of the innermost text frame.
    pub style: Style,
    /// Accumulated text-frame transform.
    pub transform: Option<Affine>,
    /// Content, offset, anchor and both paragraphs.
    pub run: TextRun,
}

/// Placed raster image.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageNode {
    /// Reference identifier, possibly empty.
    pub id: String,
    /// Resolved style.
    pub style: Style,
    /// Local transform.
    pub transform: Option<Affine>,
    /// Placement rectangle in user space.
    pub bounds: Rect,
    /// The image reference as written.
    pub href: String,
    /// Decoded pixels.
    pub image: PreparedImage,
}

/// A drawable node of the scene tree.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneNode {
    /// Container.
    Group(GroupNode),
    /// Geometry.
    Shape(ShapeNode),
    /// Text chunk.
    Text(TextNode),
    /// Raster image.
    RasterImage(ImageNode),
}

impl SceneNode {
    /// Reference identifier, possibly empty.
    pub fn id(&self) -> &str {
        match self {
            Self::Group(n) => &n.id,
            Self::Shape(n) => &n.id,
            Self::Text(n) => &n.id,
            Self::RasterImage(n) => &n.id,
        }
    }

    /// Resolved style.
    pub fn style(&self) -> &Style {
        match self {
            Self::Group(n) => &n.style,
            Self::Shape(n) => &n.style,
            Self::Text(n) => &n.style,
            Self::RasterImage(n) => &n.style,
        }
    }

    fn style_mut(&mut self) -> &mut Style {
        match self {
            Self::Group(n) => &mut n.style,
            Self::Shape(n) => &mut n.style,
            Self::Text(n) => &mut n.style,
            Self::RasterImage(n) => &mut n.style,
        }
    }

    /// Local transform.
    pub fn transform(&self) -> Option<Affine> {
        match self {
            Self::Group(n) => n.transform,
            Self::Shape(n) => n.transform,
            Self::Text(n) => n.transform,
            Self::RasterImage(n) => n.transform,
        }
    }

    /// Children of a group; empty for leaves.
    pub fn children(&self) -> &[SceneNode] {
        match self {
            Self::Group(n) => &n.children,
            _ => &[],
        }
    }

    /// Short name of the variant.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Group(_) => "group",
            Self::Shape(_) => "shape",
            Self::Text(_) => "text",
            Self::RasterImage(_) => "image",
        }
    }

    /// Fill unset style properties of this node and all descendants from `style`.
    ///
    /// Descendants do not pick up `opacity`, which applies to this node only.
    pub fn merge_style(&mut self, style: &Style) {
        let merged = self.style().merge(style);
        *self.style_mut() = merged;
        if let Self::Group(g) = self {
            let inherited = Style {
                opacity: None,
                ..style.clone()
            };
            for child in &mut g.children {
                child.merge_style(&inherited);
            }
        }
    }

    /// Give every shape without a fill the initial black fill.
    pub fn apply_default_fill(&mut self) {
        match self {
            Self::Shape(s) => {
                s.style.fill.get_or_insert(Paint::Color(Rgba8::BLACK));
            }
            Self::Group(g) => {
                for child in &mut g.children {
                    child.apply_default_fill();
                }
            }
            Self::Text(_) | Self::RasterImage(_) => {}
        }
    }

    /// Visit this node and every descendant in document order.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a SceneNode)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}

/// Geometry-only clip region.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipPath {
    /// Reference identifier, possibly empty.
    pub id: String,
    /// Local transform.
    pub transform: Option<Affine>,
    /// Flattened shapes with placeholder styles.
    pub shapes: Vec<ShapeNode>,
}

/// Parse result: the root container, its viewport and the definitions registry.
#[derive(Clone, Debug)]
pub struct SceneRoot {
    /// Reference identifier of the root element, possibly empty.
    pub id: String,
    /// Resolved style of the root element.
    pub style: Style,
    /// Root `transform` attribute.
    pub transform: Option<Affine>,
    /// Resolved viewport.
    pub viewport: Viewport,
    /// Clip paths defined directly under the root.
    pub clip_paths: Vec<ClipPath>,
    /// Visible children in document order.
    pub children: Vec<SceneNode>,
    /// Every element that carried a reference identifier.
    pub definitions: DefinitionsRegistry,
}

impl SceneRoot {
    /// Visit every visible node in document order.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a SceneNode)) {
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Number of visible nodes, counting descendants.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_| count += 1);
        count
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
