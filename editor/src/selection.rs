//! Set of selected layer indices.
//!
//! Indices are 0-based positions in the document's `layers` sequence. The
//! owning [`crate::store::DocStore`] keeps every index in range.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection(BTreeSet<usize>);

impl Selection {
    /// Empty selection.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Every index below `layer_count`.
    #[must_use]
    pub fn all(layer_count: usize) -> Self {
        Self((0..layer_count).collect())
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flip membership of `index`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.0.remove(&index) {
            false
        } else {
            self.0.insert(index);
            true
        }
    }

    /// Drop indices at or beyond `layer_count`.
    pub fn retain_below(&mut self, layer_count: usize) {
        self.0.retain(|&i| i < layer_count);
    }

    /// Selected indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<usize> for Selection {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
