//! Append-only lookahead buffer with restore points.

use tracing::trace;

/// Append-only log of produced items with a movable read index.
///
/// Restore points are saved read indices. Rewinding to one only moves the
/// read index backward: items already produced stay in the log, so the
/// producer never has to redo work for them.
#[derive(Debug, Clone)]
pub struct BacktrackBuffer<T> {
    items: Vec<T>,
    next: usize,
    restore_points: Vec<usize>,
}

impl<T> Default for BacktrackBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BacktrackBuffer<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::with_capacity(64),
            next: 0,
            restore_points: Vec::new(),
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// The next unread item.
    pub fn peek(&self) -> Option<&T> {
        self.items.get(self.next)
    }

    /// Mark the next unread item as read and return it.
    pub fn advance(&mut self) -> Option<&T> {
        let item = self.items.get(self.next)?;
        self.next += 1;
        Some(item)
    }

    /// Number of produced but unread items.
    pub fn unread(&self) -> usize {
        self.items.len() - self.next
    }

    /// Items before the read index.
    pub fn consumed(&self) -> &[T] {
        &self.items[..self.next]
    }

    /// Drop every unread item, returning the first of them.
    ///
    /// Restore points are kept: none of them points past the read index.
    pub fn truncate_unread(&mut self) -> Option<T> {
        let mut dropped = self.items.drain(self.next..);
        dropped.next()
    }

    /// Remember the current read index.
    pub fn push_restore_point(&mut self) {
        trace!(index = self.next, depth = self.restore_points.len() + 1, "push restore point");
        self.restore_points.push(self.next);
    }

    /// Rewind the read index to the most recent restore point.
    ///
    /// # Panics
    ///
    /// Panics if no restore point is active.
    pub fn pop_restore_point(&mut self) {
        let index = self
            .restore_points
            .pop()
            .expect("pop_restore_point called without an active restore point");
        trace!(from = self.next, to = index, "rewind to restore point");
        self.next = index;
    }

    /// Forget the most recent restore point, keeping the read index.
    ///
    /// # Panics
    ///
    /// Panics if no restore point is active.
    pub fn discard_restore_point(&mut self) {
        self.restore_points
            .pop()
            .expect("discard_restore_point called without an active restore point");
        trace!(index = self.next, "discard restore point");
    }

    pub fn restore_depth(&self) -> usize {
        self.restore_points.len()
    }
}
