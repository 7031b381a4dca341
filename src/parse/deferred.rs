//! Backlog of `use` references whose target had not been registered yet.

use crate::foundation::core::Affine;
use crate::parse::context::{ArenaNode, NodeId, ParserContext, ReuseData};
use crate::style::model::Style;

/// A reuse request captured at reference time.
///
/// The slot was already attached where the `use` appeared, so the position in the tree
/// (and whether it is inside `defs`) reflects the reference point, not the flush point.
#[derive(Clone, Debug)]
pub(crate) struct DeferredReuse {
    pub(crate) slot: NodeId,
    pub(crate) id: String,
    pub(crate) style: Style,
    pub(crate) transform: Option<Affine>,
    pub(crate) target: String,
}

/// FIFO queue of deferred reuse requests.
#[derive(Clone, Debug, Default)]
pub(crate) struct DeferredQueue {
    entries: Vec<DeferredReuse>,
}

impl DeferredQueue {
    pub(crate) fn push(&mut self, entry: DeferredReuse) {
        self.entries.push(entry);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    fn take(&mut self) -> Vec<DeferredReuse> {
        std::mem::take(&mut self.entries)
    }
}

impl ParserContext<'_> {
    /// Resolve every queued reuse in enqueue order, then report gradient chains whose base
    /// never appeared. Runs once, after the walk.
    #[tracing::instrument(skip(self), fields(pending = self.deferred.len()))]
    pub(crate) fn flush_deferred(&mut self) {
        for entry in self.deferred.take() {
            let Some(target) = self.registry.node(&entry.target).copied() else {
                self.unresolved("use", &entry.id, &entry.target);
                continue;
            };
            self.arena[entry.slot] = ArenaNode::Reuse(ReuseData {
                id: entry.id,
                style: entry.style,
                transform: entry.transform,
                target,
            });
        }

        let mut leftover: Vec<_> = self.gradient_chains.drain().collect();
        leftover.sort_by(|a, b| a.0.cmp(&b.0));
        for (base, waiting) in leftover {
            for pending in waiting {
                self.unresolved("gradient", pending.id(), &base);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parse/deferred.rs"]
mod tests;
