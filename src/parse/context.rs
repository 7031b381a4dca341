//! Mutable state shared by every element handler during one parse.
//!
//! Nodes live in an arena while the walk is running so that children lists, registry
//! entries and deferred reuse slots can all point at the same node before it is complete.
//! The arena is turned into an owned tree once the deferred queues have been flushed.

use std::collections::{HashMap, HashSet};

use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Affine, Rect};
use crate::foundation::error::{SceneError, SceneResult};
use crate::foundation::units::LengthContext;
use crate::markup::attributes::Attributes;
use crate::parse::deferred::DeferredQueue;
use crate::parse::gradients::PendingGradient;
use crate::parse::{ParseOptions, UnresolvedPolicy};
use crate::scene::model::{ClipPath, GroupKind, SceneNode, Viewport};
use crate::scene::registry::{Definition, DefinitionsRegistry};
use crate::style::model::Style;
use crate::style::resolve::StyleResolver;
use crate::text::shaper::ParagraphShaper;

/// Index of a node in [`ParserContext::arena`].
pub(crate) type NodeId = usize;

/// A container under construction.
#[derive(Clone, Debug)]
pub(crate) struct ContainerData {
    pub(crate) kind: GroupKind,
    pub(crate) id: String,
    pub(crate) style: Style,
    pub(crate) transform: Option<Affine>,
    pub(crate) clip_path: Option<String>,
    pub(crate) clip_paths: Vec<ClipPath>,
    pub(crate) children: Vec<NodeId>,
}

/// A resolved `use` reference.
#[derive(Clone, Debug)]
pub(crate) struct ReuseData {
    pub(crate) id: String,
    pub(crate) style: Style,
    pub(crate) transform: Option<Affine>,
    pub(crate) target: NodeId,
}

#[derive(Clone, Debug)]
pub(crate) enum ArenaNode {
    Container(ContainerData),
    Leaf(SceneNode),
    Reuse(ReuseData),
    /// A `use` whose target has not been seen yet. Never materializes unless the flush
    /// pass turns it into [`ArenaNode::Reuse`].
    Pending,
}

/// One entry of the open-group stack.
#[derive(Clone, Debug)]
pub(crate) struct OpenGroup {
    pub(crate) name: String,
    pub(crate) node: NodeId,
    /// The container was opened inside a `defs` block and is not part of the visible tree.
    pub(crate) in_defs: bool,
}

pub(crate) struct ParserContext<'p> {
    pub(crate) options: &'p ParseOptions,
    pub(crate) styles: &'p dyn StyleResolver,
    pub(crate) shaper: &'p mut dyn ParagraphShaper,
    pub(crate) images: &'p HashMap<String, PreparedImage>,
    pub(crate) arena: Vec<ArenaNode>,
    pub(crate) stack: Vec<OpenGroup>,
    pub(crate) root: Option<NodeId>,
    pub(crate) viewport: Option<Viewport>,
    pub(crate) registry: DefinitionsRegistry<NodeId>,
    pub(crate) deferred: DeferredQueue,
    /// Raw attributes of every gradient by identifier, for per-attribute inheritance.
    pub(crate) gradient_sources: HashMap<String, Attributes>,
    /// Gradients waiting for the gradient they inherit stops from, keyed by its identifier.
    pub(crate) gradient_chains: HashMap<String, Vec<PendingGradient>>,
    /// Number of open `defs` elements.
    pub(crate) defs_depth: usize,
    warned: HashSet<String>,
}

impl<'p> ParserContext<'p> {
    pub(crate) fn new(
        options: &'p ParseOptions,
        styles: &'p dyn StyleResolver,
        shaper: &'p mut dyn ParagraphShaper,
        images: &'p HashMap<String, PreparedImage>,
    ) -> Self {
        Self {
            options,
            styles,
            shaper,
            images,
            arena: Vec::new(),
            stack: Vec::new(),
            root: None,
            viewport: None,
            registry: DefinitionsRegistry::new(),
            deferred: DeferredQueue::default(),
            gradient_sources: HashMap::new(),
            gradient_chains: HashMap::new(),
            defs_depth: 0,
            warned: HashSet::new(),
        }
    }

    pub(crate) fn alloc(&mut self, node: ArenaNode) -> NodeId {
        self.arena.push(node);
        self.arena.len() - 1
    }

    /// Container that new nodes are attached to, if any.
    ///
    /// Inside `defs`, only containers that were themselves opened inside `defs` accept
    /// children; everything else is registered but stays out of the visible tree.
    pub(crate) fn attach_target(&self) -> Option<NodeId> {
        let top = self.stack.last()?;
        (self.defs_depth == 0 || top.in_defs).then_some(top.node)
    }

    pub(crate) fn attach(&mut self, node: NodeId) {
        let Some(parent) = self.attach_target() else {
            return;
        };
        if let Some(ArenaNode::Container(c)) = self.arena.get_mut(parent) {
            c.children.push(node);
        }
    }

    /// Bind `id` to the arena node, ignoring empty identifiers.
    pub(crate) fn register_node(&mut self, id: &str, node: NodeId) {
        self.registry.register(id, Definition::Node(node));
    }

    /// Allocate a finished leaf, attach it and register it by its identifier.
    pub(crate) fn add_leaf(&mut self, leaf: SceneNode) -> NodeId {
        let id = leaf.id().to_owned();
        let node = self.alloc(ArenaNode::Leaf(leaf));
        self.attach(node);
        self.register_node(&id, node);
        node
    }

    pub(crate) fn push_group(&mut self, name: &str, node: NodeId) {
        self.stack.push(OpenGroup {
            name: name.to_owned(),
            node,
            in_defs: self.defs_depth > 0,
        });
    }

    /// Handle an end tag. A close that does not match the innermost group leaves the
    /// stack untouched.
    pub(crate) fn close(&mut self, name: &str) {
        if name == "defs" && self.defs_depth > 0 {
            self.defs_depth -= 1;
        }
        if self.stack.last().is_some_and(|top| top.name == name) {
            self.stack.pop();
        }
    }

    /// The innermost open container.
    pub(crate) fn current_container(&mut self) -> Option<&mut ContainerData> {
        let top = self.stack.last()?.node;
        match self.arena.get_mut(top) {
            Some(ArenaNode::Container(c)) => Some(c),
            _ => None,
        }
    }

    /// Style of the innermost open container, used as the parent of new elements.
    pub(crate) fn current_style(&self) -> Style {
        self.stack
            .last()
            .and_then(|top| match self.arena.get(top.node) {
                Some(ArenaNode::Container(c)) => Some(c.style.clone()),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub(crate) fn resolve_style(&self, parent: &Style, attrs: &Attributes) -> Style {
        self.styles.resolve(parent, attrs)
    }

    /// Viewport bounds in user space; empty before the root is seen.
    pub(crate) fn view_box(&self) -> Rect {
        self.viewport.map_or(Rect::ZERO, |v| v.view_box)
    }

    /// Percentage and font-relative references for an element with `style`.
    pub(crate) fn lengths(&self, style: &Style) -> LengthContext {
        let view_box = self.view_box();
        LengthContext {
            width: view_box.width(),
            height: view_box.height(),
            font_size: style.font_size_or_default(),
        }
    }

    /// A recoverable condition: an error in strict mode, a warning otherwise.
    pub(crate) fn unsupported(&self, message: impl Into<String>) -> SceneResult<()> {
        let message = message.into();
        if self.options.strict {
            return Err(SceneError::unsupported(message));
        }
        tracing::warn!("{message}");
        Ok(())
    }

    /// Report an unknown element name, once per name.
    pub(crate) fn unknown_element(&mut self, name: &str) -> SceneResult<()> {
        if self.options.strict {
            return Err(SceneError::unsupported(format!("unknown element <{name}>")));
        }
        if self.warned.insert(name.to_owned()) {
            tracing::warn!(element = name, "skipping unknown element");
        }
        Ok(())
    }

    /// A deferred reference that never resolved.
    pub(crate) fn unresolved(&self, what: &str, id: &str, target: &str) {
        match self.options.unresolved_reference_policy {
            UnresolvedPolicy::Silent => {
                tracing::trace!(what, id, target, "dropping unresolved reference");
            }
            UnresolvedPolicy::Warn => {
                tracing::warn!(what, id, target, "dropping unresolved reference");
            }
        }
    }
}

/// Compose an outer and an inner optional transform.
pub(crate) fn combine(outer: Option<Affine>, inner: Option<Affine>) -> Option<Affine> {
    match (outer, inner) {
        (Some(a), Some(b)) => Some(crate::transform::affine::compose(a, b)),
        (a, b) => a.or(b),
    }
}
