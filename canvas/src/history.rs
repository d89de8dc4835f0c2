//! Linear undo/redo history over whole snapshots.
//!
//! `entries[index]` is always the live state once the history is seeded.
//! Pushing after an undo drops everything past the cursor.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

/// Snapshot history with a cursor.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    index: Option<usize>,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self { entries: Vec::new(), index: None }
    }
}

impl<T: Clone> History<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture `initial` as entry 0 if nothing has been recorded yet.
    /// Returns `true` if the seed was taken.
    pub fn seed(&mut self, initial: &T) -> bool {
        if !self.entries.is_empty() {
            return false;
        }
        self.entries.push(initial.clone());
        self.index = Some(0);
        true
    }

    /// Record a new snapshot, discarding any redo entries.
    pub fn push(&mut self, snapshot: T) {
        let keep = self.index.map_or(0, |i| i + 1);
        self.entries.truncate(keep);
        self.entries.push(snapshot);
        self.index = Some(self.entries.len() - 1);
    }

    /// Step back one entry and return it, or `None` at the start.
    pub fn undo(&mut self) -> Option<&T> {
        let index = self.index.filter(|&i| i > 0)? - 1;
        self.index = Some(index);
        self.entries.get(index)
    }

    /// Step forward one entry and return it, or `None` at the end.
    pub fn redo(&mut self) -> Option<&T> {
        let index = self.index? + 1;
        if index >= self.entries.len() {
            return None;
        }
        self.index = Some(index);
        self.entries.get(index)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.index.is_some_and(|i| i > 0)
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.index.is_some_and(|i| i + 1 < self.entries.len())
    }

    /// The snapshot at the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.entries.get(self.index?)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
