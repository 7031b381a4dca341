//! Symbol table from reference identifiers to definitions.

use std::collections::HashMap;

use crate::scene::gradient::Gradient;
use crate::scene::model::{ClipPath, SceneNode};
use crate::style::resolve::reference_key;

/// A value bound to a reference identifier.
#[derive(Clone, Debug, PartialEq)]
pub enum Definition<N = SceneNode> {
    /// A drawable node (container or leaf).
    Node(N),
    /// A paint server.
    Gradient(Gradient),
    /// A clip region.
    ClipPath(ClipPath),
}

impl<N> Definition<N> {
    /// Short name of the variant.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Node(_) => "node",
            Self::Gradient(_) => "gradient",
            Self::ClipPath(_) => "clip_path",
        }
    }
}

/// Definitions keyed by bare identifier, remembering registration order.
///
/// Lookups accept `url(#id)`, `#id` or `id`.
#[derive(Clone, Debug, PartialEq)]
pub struct DefinitionsRegistry<N = SceneNode> {
    entries: HashMap<String, Definition<N>>,
    order: Vec<String>,
}

impl<N> Default for DefinitionsRegistry<N> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<N> DefinitionsRegistry<N> {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `id` to `definition`. Empty identifiers are ignored; rebinding replaces the
    /// previous value.
    pub fn register(&mut self, id: &str, definition: Definition<N>) {
        let key = reference_key(id);
        if key.is_empty() {
            return;
        }
        match self.entries.insert(key.to_owned(), definition) {
            Some(previous) => {
                tracing::debug!(id = key, previous = previous.kind_name(), "rebinding definition");
            }
            None => self.order.push(key.to_owned()),
        }
    }

    /// The definition bound to `reference`.
    pub fn lookup(&self, reference: &str) -> Option<&Definition<N>> {
        self.entries.get(reference_key(reference))
    }

    /// The node bound to `reference`, if it is a node.
    pub fn node(&self, reference: &str) -> Option<&N> {
        match self.lookup(reference)? {
            Definition::Node(n) => Some(n),
            _ => None,
        }
    }

    /// The gradient bound to `reference`, if it is a gradient.
    pub fn gradient(&self, reference: &str) -> Option<&Gradient> {
        match self.lookup(reference)? {
            Definition::Gradient(g) => Some(g),
            _ => None,
        }
    }

    /// The clip path bound to `reference`, if it is a clip path.
    pub fn clip_path(&self, reference: &str) -> Option<&ClipPath> {
        match self.lookup(reference)? {
            Definition::ClipPath(c) => Some(c),
            _ => None,
        }
    }

    /// True if `reference` is bound.
    pub fn contains(&self, reference: &str) -> bool {
        self.lookup(reference).is_some()
    }

    /// Number of bound identifiers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bound identifiers in first-registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Entries in first-registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Definition<N>)> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id).map(|d| (id.as_str(), d)))
    }

    /// Convert node entries with `f`, dropping those it rejects. Order is preserved.
    pub fn map_nodes<M>(
        self,
        mut f: impl FnMut(&str, N) -> Option<M>,
    ) -> DefinitionsRegistry<M> {
        let mut entries = self.entries;
        let mut out = DefinitionsRegistry::new();
        for id in self.order {
            let Some(definition) = entries.remove(&id) else {
                continue;
            };
            let mapped = match definition {
                Definition::Node(n) => match f(&id, n) {
                    Some(m) => Definition::Node(m),
                    None => continue,
                },
                Definition::Gradient(g) => Definition::Gradient(g),
                Definition::ClipPath(c) => Definition::ClipPath(c),
            };
            out.register(&id, mapped);
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/registry.rs"]
mod tests;
