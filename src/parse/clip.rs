//! `clipPath`: geometry-only shapes, with `use` references flattened into the shape list.

use std::collections::HashSet;

use crate::foundation::core::Affine;
use crate::foundation::error::SceneResult;
use crate::markup::event::{MarkupEvent, OpenElement};
use crate::markup::walker::SubtreeWalker;
use crate::parse::context::{ArenaNode, NodeId, ParserContext, combine};
use crate::parse::dispatch::reuse_transform;
use crate::path::shapes::{SHAPE_ELEMENTS, build_shape};
use crate::scene::model::{ClipPath, SceneNode, ShapeNode};
use crate::scene::registry::Definition;
use crate::style::model::Style;
use crate::style::resolve::reference_key;
use crate::transform::affine::transform_attribute;

pub(crate) fn handle_clip_path<I>(
    ctx: &mut ParserContext<'_>,
    walker: &mut SubtreeWalker<I>,
    el: &OpenElement,
) -> SceneResult<()>
where
    I: Iterator<Item = MarkupEvent>,
{
    let mut shapes = Vec::new();
    if !el.self_closing {
        let mut cursor = walker.cursor();
        while let Some(event) = walker.next_in(&mut cursor) {
            let MarkupEvent::Open(child) = event else {
                continue;
            };
            if SHAPE_ELEMENTS.contains(&child.name.as_str()) {
                let lengths = ctx.lengths(&ctx.current_style());
                if let Some(path) = build_shape(&child.name, &child.attributes, &lengths) {
                    shapes.push(ShapeNode {
                        id: child.id().to_owned(),
                        style: Style::clip_placeholder(),
                        transform: transform_attribute(&child.attributes, "transform"),
                        clip_path: None,
                        path,
                    });
                }
            } else if child.name == "use" {
                let target = child.attributes.href().map(reference_key).unwrap_or("");
                match ctx.registry.node(target).copied() {
                    Some(node) => {
                        let transform = reuse_transform(&child.attributes);
                        flatten(ctx, node, transform, &mut shapes, &mut HashSet::new());
                    }
                    None => ctx.unresolved("clip-path use", child.id(), target),
                }
            } else {
                ctx.unsupported(format!("unsupported clip-path child <{}>", child.name))?;
            }
            if !child.self_closing {
                walker.skip_element();
            }
        }
    }

    let clip = ClipPath {
        id: reference_key(el.id()).to_owned(),
        transform: transform_attribute(&el.attributes, "transform"),
        shapes,
    };
    tracing::debug!(id = %clip.id, shapes = clip.shapes.len(), "clip path");
    ctx.registry.register(&clip.id, Definition::ClipPath(clip.clone()));
    if let Some(container) = ctx.current_container() {
        container.clip_paths.push(clip);
    }
    Ok(())
}

/// Append every shape reachable from `node`, with container transforms folded in.
fn flatten(
    ctx: &ParserContext<'_>,
    node: NodeId,
    outer: Option<Affine>,
    out: &mut Vec<ShapeNode>,
    visiting: &mut HashSet<NodeId>,
) {
    if !visiting.insert(node) {
        return;
    }
    match ctx.arena.get(node) {
        Some(ArenaNode::Leaf(SceneNode::Shape(shape))) => out.push(ShapeNode {
            style: Style::clip_placeholder(),
            transform: combine(outer, shape.transform),
            ..shape.clone()
        }),
        Some(ArenaNode::Container(c)) => {
            let transform = combine(outer, c.transform);
            for &child in &c.children {
                flatten(ctx, child, transform, out, visiting);
            }
        }
        Some(ArenaNode::Reuse(r)) => {
            flatten(ctx, r.target, combine(outer, r.transform), out, visiting);
        }
        _ => {}
    }
    visiting.remove(&node);
}

#[cfg(test)]
#[path = "../../tests/unit/parse/clip.rs"]
mod tests;
