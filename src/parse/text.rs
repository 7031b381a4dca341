//! `text` with nested `tspan` runs.

use crate::foundation::core::Affine;
use crate::foundation::error::SceneResult;
use crate::markup::event::{MarkupEvent, OpenElement};
use crate::markup::walker::SubtreeWalker;
use crate::parse::context::{ArenaNode, ParserContext};
use crate::scene::model::{SceneNode, TextNode};
use crate::text::runs::TextRunBuilder;

pub(crate) fn handle_text<I>(
    ctx: &mut ParserContext<'_>,
    walker: &mut SubtreeWalker<I>,
    el: &OpenElement,
) -> SceneResult<()>
where
    I: Iterator<Item = MarkupEvent>,
{
    let container_style = ctx.current_style();
    let lengths = ctx.lengths(&container_style);
    let mut runs = TextRunBuilder::new();
    // Identifier of the element owning each frame.
    let mut ids = vec![el.id().to_owned()];

    let style = ctx.resolve_style(&container_style, &el.attributes);
    runs.push_frame(&el.attributes, style, &lengths);
    if el.self_closing {
        runs.pop_frame();
        return Ok(());
    }

    let mut cursor = walker.cursor();
    while let Some(event) = walker.next_in(&mut cursor) {
        match event {
            MarkupEvent::Open(child) if child.name == "tspan" => {
                let parent = runs
                    .top()
                    .map_or_else(|| container_style.clone(), |f| f.style.clone());
                let style = ctx.resolve_style(&parent, &child.attributes);
                runs.push_frame(&child.attributes, style, &lengths);
                if child.self_closing {
                    runs.pop_frame();
                } else {
                    ids.push(child.id().to_owned());
                }
            }
            MarkupEvent::Open(child) => {
                tracing::warn!(element = %child.name, "skipping unsupported text content");
                if !child.self_closing {
                    walker.skip_element();
                }
            }
            MarkupEvent::Text(content) | MarkupEvent::CData(content) => {
                let Some((run, transform)) = runs.emit(&content, &mut *ctx.shaper)? else {
                    continue;
                };
                let style = runs.top().map(|f| f.style.clone()).unwrap_or_default();
                ctx.add_text(TextNode {
                    id: ids.last().cloned().unwrap_or_default(),
                    style,
                    transform: (transform != Affine::IDENTITY).then_some(transform),
                    run,
                });
            }
            MarkupEvent::Close { .. } => {
                runs.pop_frame();
                ids.pop();
            }
        }
    }
    Ok(())
}

impl ParserContext<'_> {
    /// Attach a text chunk. Chunks are not registered by identifier since one element can
    /// produce several of them.
    fn add_text(&mut self, text: TextNode) {
        let node = self.alloc(ArenaNode::Leaf(SceneNode::Text(text)));
        self.attach(node);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parse/text.rs"]
mod tests;
