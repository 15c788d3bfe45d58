//! Ephemeral selection over line indices
//!
//! Never persisted. The owning `LineBoard` reconciles the selection against
//! the valid index range on every structural mutation.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    picked: BTreeSet<usize>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the selection state of `index`; returns the new state.
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.picked.remove(&index) {
            false
        } else {
            self.picked.insert(index);
            true
        }
    }

    pub fn select_all(&mut self, count: usize) {
        self.picked = (0..count).collect();
    }

    pub fn clear(&mut self) {
        self.picked.clear();
    }

    #[allow(dead_code)]
    pub fn is_selected(&self, index: usize) -> bool {
        self.picked.contains(&index)
    }

    pub fn is_empty(&self) -> bool {
        self.picked.is_empty()
    }

    pub fn len(&self) -> usize {
        self.picked.len()
    }

    /// Selected indices in ascending order.
    pub fn indices(&self) -> Vec<usize> {
        self.picked.iter().copied().collect()
    }

    /// Drops indices that no longer refer to a line after a structural
    /// mutation shrank the collection to `len` elements.
    pub fn retain_valid(&mut self, len: usize) {
        self.picked.retain(|&i| i < len);
    }
}
