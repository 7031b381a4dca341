//! Turns the arena built during the walk into the owned scene tree.

use std::collections::HashSet;

use crate::foundation::error::{SceneError, SceneResult};
use crate::parse::context::{ArenaNode, NodeId, ParserContext};
use crate::scene::model::{GroupKind, GroupNode, SceneNode, SceneRoot};
use crate::style::model::Style;

struct Materializer<'a> {
    arena: &'a [ArenaNode],
    visiting: HashSet<NodeId>,
}

impl Materializer<'_> {
    fn node(&mut self, id: NodeId) -> Option<SceneNode> {
        match self.arena.get(id)? {
            ArenaNode::Leaf(leaf) => Some(leaf.clone()),
            ArenaNode::Pending => None,
            ArenaNode::Container(c) => {
                if !self.visiting.insert(id) {
                    tracing::warn!(id = %c.id, "dropping recursive reference");
                    return None;
                }
                let children = c.children.iter().filter_map(|&child| self.node(child)).collect();
                self.visiting.remove(&id);
                Some(SceneNode::Group(GroupNode {
                    kind: c.kind,
                    id: c.id.clone(),
                    style: c.style.clone(),
                    transform: c.transform,
                    clip_path: c.clip_path.clone(),
                    clip_paths: c.clip_paths.clone(),
                    children,
                }))
            }
            ArenaNode::Reuse(r) => {
                if !self.visiting.insert(id) {
                    return None;
                }
                let target = self.node(r.target);
                self.visiting.remove(&id);
                let mut target = target?;
                // The wrapper carries the `use` opacity; the copy must not apply it again.
                target.merge_style(&Style {
                    opacity: None,
                    ..r.style.clone()
                });
                Some(SceneNode::Group(GroupNode {
                    kind: GroupKind::Reuse,
                    id: r.id.clone(),
                    style: r.style.clone(),
                    transform: r.transform,
                    clip_path: None,
                    clip_paths: Vec::new(),
                    children: vec![target],
                }))
            }
        }
    }

    fn finished(&mut self, id: NodeId) -> Option<SceneNode> {
        let mut node = self.node(id)?;
        node.apply_default_fill();
        Some(node)
    }
}

impl ParserContext<'_> {
    /// Flush the deferred queues and build the owned result.
    pub(crate) fn finish(mut self) -> SceneResult<SceneRoot> {
        self.flush_deferred();
        let Some(root_id) = self.root else {
            return Err(SceneError::MissingRoot);
        };
        let Some(ArenaNode::Container(root)) = self.arena.get(root_id) else {
            return Err(SceneError::MissingRoot);
        };
        let Some(viewport) = self.viewport else {
            return Err(SceneError::MissingRoot);
        };

        let mut materializer = Materializer {
            arena: &self.arena,
            visiting: HashSet::from([root_id]),
        };
        let children: Vec<SceneNode> = root
            .children
            .iter()
            .filter_map(|&child| materializer.finished(child))
            .collect();

        materializer.visiting.clear();
        let registry = std::mem::take(&mut self.registry);
        let definitions = registry.map_nodes(|_, node| materializer.finished(node));

        tracing::debug!(
            children = children.len(),
            definitions = definitions.len(),
            "scene materialized"
        );
        Ok(SceneRoot {
            id: root.id.clone(),
            style: root.style.clone(),
            transform: root.transform,
            viewport,
            clip_paths: root.clip_paths.clone(),
            children,
            definitions,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parse/materialize.rs"]
mod tests;
