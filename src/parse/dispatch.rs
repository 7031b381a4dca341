//! Element name to handler mapping and the handlers for containers, `use`, shapes and
//! images.

use std::str::FromStr;

use crate::foundation::core::{Affine, Rect, Size};
use crate::foundation::error::{SceneError, SceneResult};
use crate::foundation::units::{parse_length, parse_number};
use crate::markup::attributes::Attributes;
use crate::markup::event::{MarkupEvent, OpenElement};
use crate::markup::walker::SubtreeWalker;
use crate::parse::context::{ArenaNode, ContainerData, ParserContext, ReuseData, combine};
use crate::parse::deferred::DeferredReuse;
use crate::parse::{clip, gradients, text};
use crate::path::shapes::build_shape;
use crate::scene::model::{GroupKind, ImageNode, SceneNode, ShapeNode, Viewport};
use crate::style::model::Style;
use crate::style::resolve::reference_key;
use crate::transform::affine::transform_attribute;

pub(crate) type Handler<I> =
    fn(&mut ParserContext<'_>, &mut SubtreeWalker<I>, &OpenElement) -> SceneResult<()>;

/// Handler for element `name`, if it has one.
pub(crate) fn handler_for<I>(name: &str) -> Option<Handler<I>>
where
    I: Iterator<Item = MarkupEvent>,
{
    let handler: Handler<I> = match name {
        "svg" => handle_svg::<I>,
        "g" | "a" | "symbol" | "mask" => handle_container::<I>,
        "defs" => handle_defs::<I>,
        "use" => handle_use::<I>,
        "circle" | "ellipse" | "line" | "path" | "polygon" | "polyline" | "rect" => {
            handle_shape::<I>
        }
        "image" => handle_image::<I>,
        "text" => text::handle_text::<I>,
        "linearGradient" | "radialGradient" => gradients::handle_gradient::<I>,
        "clipPath" => clip::handle_clip_path::<I>,
        "style" => handle_style::<I>,
        "title" | "desc" | "metadata" => handle_ignored::<I>,
        _ => return None,
    };
    Some(handler)
}

/// Route one open event to its handler.
pub(crate) fn dispatch<I>(
    ctx: &mut ParserContext<'_>,
    walker: &mut SubtreeWalker<I>,
    el: &OpenElement,
) -> SceneResult<()>
where
    I: Iterator<Item = MarkupEvent>,
{
    match handler_for::<I>(&el.name) {
        Some(handler) => handler(ctx, walker, el),
        None => {
            ctx.unknown_element(&el.name)?;
            skip(walker, el);
            Ok(())
        }
    }
}

fn skip<I>(walker: &mut SubtreeWalker<I>, el: &OpenElement)
where
    I: Iterator<Item = MarkupEvent>,
{
    if !el.self_closing {
        walker.skip_element();
    }
}

fn handle_ignored<I>(
    _ctx: &mut ParserContext<'_>,
    walker: &mut SubtreeWalker<I>,
    el: &OpenElement,
) -> SceneResult<()>
where
    I: Iterator<Item = MarkupEvent>,
{
    skip(walker, el);
    Ok(())
}

fn handle_style<I>(
    ctx: &mut ParserContext<'_>,
    walker: &mut SubtreeWalker<I>,
    el: &OpenElement,
) -> SceneResult<()>
where
    I: Iterator<Item = MarkupEvent>,
{
    ctx.unsupported("<style> elements are not supported")?;
    skip(walker, el);
    Ok(())
}

fn handle_svg<I>(
    ctx: &mut ParserContext<'_>,
    walker: &mut SubtreeWalker<I>,
    el: &OpenElement,
) -> SceneResult<()>
where
    I: Iterator<Item = MarkupEvent>,
{
    if ctx.root.is_some() {
        ctx.unsupported("nested <svg> elements are not supported")?;
        let style = ctx.current_style();
        let placeholder = ctx.alloc(ArenaNode::Container(ContainerData {
            kind: GroupKind::Group,
            id: String::new(),
            style,
            transform: None,
            clip_path: None,
            clip_paths: Vec::new(),
            children: Vec::new(),
        }));
        ctx.attach(placeholder);
        skip(walker, el);
        return Ok(());
    }

    let viewport = parse_viewport(&el.attributes)?;
    tracing::debug!(
        width = viewport.size.width,
        height = viewport.size.height,
        "root viewport"
    );
    ctx.viewport = Some(viewport);
    let style = ctx.resolve_style(&Style::default(), &el.attributes);
    let node = ctx.alloc(ArenaNode::Container(ContainerData {
        kind: GroupKind::Svg,
        id: el.id().to_owned(),
        style,
        transform: transform_attribute(&el.attributes, "transform"),
        clip_path: clip_reference(&el.attributes),
        clip_paths: Vec::new(),
        children: Vec::new(),
    }));
    ctx.root = Some(node);
    ctx.register_node(el.id(), node);
    if el.self_closing {
        return Ok(());
    }
    ctx.push_group(&el.name, node);
    Ok(())
}

/// Viewport from `width`, `height` and `viewBox`.
///
/// A missing or malformed `viewBox` falls back to `0 0 width height`; a missing size falls
/// back to the `viewBox` size.
pub(crate) fn parse_viewport(attrs: &Attributes) -> SceneResult<Viewport> {
    let view_box = match attrs.get("viewBox") {
        Some(raw) => {
            let rect = svgtypes::ViewBox::from_str(raw)
                .ok()
                .filter(|vb| vb.w > 0.0 && vb.h > 0.0)
                .map(|vb| Rect::new(vb.x, vb.y, vb.x + vb.w, vb.y + vb.h));
            if rect.is_none() {
                tracing::warn!(view_box = raw, "ignoring malformed viewBox");
            }
            rect
        }
        None => None,
    };

    let dimension = |name: &str, reference: Option<f64>| {
        let length = attrs.get(name).and_then(parse_length)?;
        match (length.is_percent(), reference) {
            (true, Some(r)) => Some(length.to_user(r, 0.0)),
            (true, None) => None,
            (false, _) => Some(length.to_user(0.0, 0.0)),
        }
    };
    let width = dimension("width", view_box.map(|r| r.width())).or(view_box.map(|r| r.width()));
    let height =
        dimension("height", view_box.map(|r| r.height())).or(view_box.map(|r| r.height()));

    let (Some(width), Some(height)) = (width, height) else {
        return Err(SceneError::validation(
            "root <svg> needs width and height or a viewBox",
        ));
    };
    Ok(Viewport {
        size: Size::new(width, height),
        view_box: view_box.unwrap_or(Rect::new(0.0, 0.0, width, height)),
    })
}

fn handle_container<I>(
    ctx: &mut ParserContext<'_>,
    _walker: &mut SubtreeWalker<I>,
    el: &OpenElement,
) -> SceneResult<()>
where
    I: Iterator<Item = MarkupEvent>,
{
    let kind = match el.name.as_str() {
        "a" => GroupKind::Anchor,
        "symbol" => GroupKind::Symbol,
        "mask" => GroupKind::Mask,
        _ => GroupKind::Group,
    };
    let style = ctx.resolve_style(&ctx.current_style(), &el.attributes);
    let node = ctx.alloc(ArenaNode::Container(ContainerData {
        kind,
        id: el.id().to_owned(),
        style,
        transform: transform_attribute(&el.attributes, "transform"),
        clip_path: clip_reference(&el.attributes),
        clip_paths: Vec::new(),
        children: Vec::new(),
    }));
    ctx.attach(node);
    ctx.register_node(el.id(), node);
    if !el.self_closing {
        ctx.push_group(&el.name, node);
    }
    Ok(())
}

fn handle_defs<I>(
    ctx: &mut ParserContext<'_>,
    _walker: &mut SubtreeWalker<I>,
    el: &OpenElement,
) -> SceneResult<()>
where
    I: Iterator<Item = MarkupEvent>,
{
    // A self-closing `defs` has no end tag to leave the block with.
    if !el.self_closing {
        ctx.defs_depth += 1;
    }
    Ok(())
}

/// Transform of a `use` element: its `transform` followed by the `x`/`y` translation.
pub(crate) fn reuse_transform(attrs: &Attributes) -> Option<Affine> {
    let coordinate = |name: &str| attrs.get(name).and_then(parse_number).unwrap_or(0.0);
    let (x, y) = (coordinate("x"), coordinate("y"));
    let offset = (x != 0.0 || y != 0.0).then(|| Affine::translate((x, y)));
    combine(transform_attribute(attrs, "transform"), offset)
}

fn handle_use<I>(
    ctx: &mut ParserContext<'_>,
    walker: &mut SubtreeWalker<I>,
    el: &OpenElement,
) -> SceneResult<()>
where
    I: Iterator<Item = MarkupEvent>,
{
    skip(walker, el);
    let target = el.attributes.href().map(reference_key).unwrap_or("");
    if target.is_empty() {
        return Ok(());
    }
    let id = el.id().to_owned();
    let style = ctx.resolve_style(&ctx.current_style(), &el.attributes);
    let transform = reuse_transform(&el.attributes);

    let slot = match ctx.registry.node(target).copied() {
        Some(target) => ctx.alloc(ArenaNode::Reuse(ReuseData {
            id: id.clone(),
            style,
            transform,
            target,
        })),
        None => {
            tracing::debug!(id = %id, target, "deferring forward reference");
            let slot = ctx.alloc(ArenaNode::Pending);
            ctx.deferred.push(DeferredReuse {
                slot,
                id: id.clone(),
                style,
                transform,
                target: target.to_owned(),
            });
            slot
        }
    };
    ctx.attach(slot);
    ctx.register_node(&id, slot);
    Ok(())
}

fn handle_shape<I>(
    ctx: &mut ParserContext<'_>,
    walker: &mut SubtreeWalker<I>,
    el: &OpenElement,
) -> SceneResult<()>
where
    I: Iterator<Item = MarkupEvent>,
{
    skip(walker, el);
    let style = ctx.resolve_style(&ctx.current_style(), &el.attributes);
    let Some(path) = build_shape(&el.name, &el.attributes, &ctx.lengths(&style)) else {
        tracing::debug!(element = %el.name, id = el.id(), "shape produces no geometry");
        return Ok(());
    };
    ctx.add_leaf(SceneNode::Shape(ShapeNode {
        id: el.id().to_owned(),
        style,
        transform: transform_attribute(&el.attributes, "transform"),
        clip_path: clip_reference(&el.attributes),
        path,
    }));
    Ok(())
}

fn handle_image<I>(
    ctx: &mut ParserContext<'_>,
    walker: &mut SubtreeWalker<I>,
    el: &OpenElement,
) -> SceneResult<()>
where
    I: Iterator<Item = MarkupEvent>,
{
    skip(walker, el);
    let Some(href) = el.attributes.href() else {
        tracing::warn!(id = el.id(), "image without href");
        return Ok(());
    };
    // Resolution failures were reported by the prepass.
    let Some(image) = ctx.images.get(href).cloned() else {
        return Ok(());
    };
    let style = ctx.resolve_style(&ctx.current_style(), &el.attributes);
    let lengths = ctx.lengths(&style);
    let intrinsic = image.intrinsic_size();
    let attr = |name: &str| el.attributes.get(name);
    let x = attr("x").and_then(|v| lengths.x(v)).unwrap_or(0.0);
    let y = attr("y").and_then(|v| lengths.y(v)).unwrap_or(0.0);
    let width = attr("width")
        .and_then(|v| lengths.x(v))
        .unwrap_or(intrinsic.width);
    let height = attr("height")
        .and_then(|v| lengths.y(v))
        .unwrap_or(intrinsic.height);

    ctx.add_leaf(SceneNode::RasterImage(ImageNode {
        id: el.id().to_owned(),
        style,
        transform: transform_attribute(&el.attributes, "transform"),
        bounds: Rect::new(x, y, x + width, y + height),
        href: href.to_owned(),
        image,
    }));
    Ok(())
}

fn clip_reference(attrs: &Attributes) -> Option<String> {
    let key = reference_key(attrs.get("clip-path")?);
    (!key.is_empty() && key != "none").then(|| key.to_owned())
}

#[cfg(test)]
#[path = "../../tests/unit/parse/dispatch.rs"]
mod tests;
