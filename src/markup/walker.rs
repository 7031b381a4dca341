//! Depth-tracking walk over a markup event stream.
//!
//! The walker owns the forward-only event iterator and the current nesting depth. Callers
//! read "the subtree under the current position" through a [`SubtreeCursor`], which stops
//! after the event that brings the depth back below the level it was created at. Elements
//! marked `display="none"` or `visibility="hidden"` are elided together with all of their
//! descendants before any caller sees them.

use crate::markup::event::MarkupEvent;

/// Bounds a read to the descendants of the position it was created at.
#[derive(Clone, Copy, Debug)]
pub struct SubtreeCursor {
    start_depth: usize,
    done: bool,
}

impl SubtreeCursor {
    /// True once the bounded subtree has been fully consumed.
    pub fn is_done(&self) -> bool {
        self.done
    }
}

/// Forward-only walker over markup events.
pub struct SubtreeWalker<I> {
    events: I,
    depth: usize,
}

impl<I> SubtreeWalker<I>
where
    I: Iterator<Item = MarkupEvent>,
{
    /// Start a walk at depth zero.
    pub fn new(events: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            events: events.into_iter(),
            depth: 0,
        }
    }

    /// Number of currently open (non-self-closing) elements.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Cursor bounded to the current position's subtree.
    pub fn cursor(&self) -> SubtreeCursor {
        SubtreeCursor {
            start_depth: self.depth,
            done: false,
        }
    }

    /// Lazy, single-use iterator over the current position's subtree.
    pub fn read_subtree(&mut self) -> Subtree<'_, I> {
        let cursor = self.cursor();
        Subtree {
            walker: self,
            cursor,
        }
    }

    /// Next visible event inside `cursor`'s subtree.
    ///
    /// Self-closing elements are yielded once and leave the depth unchanged.
    pub fn next_in(&mut self, cursor: &mut SubtreeCursor) -> Option<MarkupEvent> {
        if cursor.done {
            return None;
        }
        loop {
            let event = self.events.next()?;
            match &event {
                MarkupEvent::Open(el) => {
                    if el.is_hidden() {
                        tracing::debug!(element = %el.name, id = el.id(), "discarding hidden subtree");
                        if !el.self_closing {
                            self.depth += 1;
                            self.skip_element();
                        }
                        continue;
                    }
                    if !el.self_closing {
                        self.depth += 1;
                    }
                }
                MarkupEvent::Close { .. } => {
                    debug_assert!(self.depth > 0, "close event at depth zero");
                    self.depth = self.depth.saturating_sub(1);
                }
                MarkupEvent::Text(_) | MarkupEvent::CData(_) => {}
            }
            if self.depth < cursor.start_depth {
                cursor.done = true;
            }
            return Some(event);
        }
    }

    /// Discard the rest of the most recently opened element, including its end tag.
    ///
    /// Must only be called right after a non-self-closing open event was yielded.
    pub fn skip_element(&mut self) {
        let start = self.depth;
        while self.depth >= start && start > 0 {
            let Some(event) = self.events.next() else {
                return;
            };
            match event {
                MarkupEvent::Open(el) if !el.self_closing => self.depth += 1,
                MarkupEvent::Close { .. } => self.depth -= 1,
                _ => {}
            }
        }
    }
}

/// Iterator form of a bounded subtree read.
pub struct Subtree<'w, I> {
    walker: &'w mut SubtreeWalker<I>,
    cursor: SubtreeCursor,
}

impl<I> Iterator for Subtree<'_, I>
where
    I: Iterator<Item = MarkupEvent>,
{
    type Item = MarkupEvent;

    fn next(&mut self) -> Option<MarkupEvent> {
        self.walker.next_in(&mut self.cursor)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/markup/walker.rs"]
mod tests;
