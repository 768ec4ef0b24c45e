//! Selection set for bulk actions.
//!
//! Tracks which records (by key) are marked. "Select all" semantics are
//! scoped to the keys currently visible on the page.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::RecordKey;

/// Keys marked for a bulk action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet(BTreeSet<RecordKey>);

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key` if absent, remove it if present.
    pub fn toggle(&mut self, key: RecordKey) {
        if !self.0.remove(&key) {
            self.0.insert(key);
        }
    }

    /// Full → none for the visible keys; partial or none → full.
    pub fn toggle_all_visible(&mut self, visible: &[RecordKey]) {
        if self.is_all_visible_selected(visible) {
            for key in visible {
                self.0.remove(key);
            }
        } else {
            self.0.extend(visible.iter().copied());
        }
    }

    /// True iff `visible` is non-empty and every key in it is selected.
    pub fn is_all_visible_selected(&self, visible: &[RecordKey]) -> bool {
        !visible.is_empty() && visible.iter().all(|key| self.0.contains(key))
    }

    pub fn contains(&self, key: RecordKey) -> bool {
        self.0.contains(&key)
    }

    /// Returns true if the key was selected.
    pub fn remove(&mut self, key: RecordKey) -> bool {
        self.0.remove(&key)
    }

    /// Drop every key `keep` rejects.
    pub fn retain(&mut self, mut keep: impl FnMut(RecordKey) -> bool) {
        self.0.retain(|key| keep(*key));
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Selected keys, ascending.
    pub fn keys(&self) -> Vec<RecordKey> {
        self.0.iter().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = RecordKey> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<RecordKey> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = RecordKey>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut selection = SelectionSet::new();
        selection.toggle(4);
        assert!(selection.contains(4));
        selection.toggle(4);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_all_from_partial_selects_all() {
        let mut selection: SelectionSet = [1].into_iter().collect();
        selection.toggle_all_visible(&[1, 2, 3]);
        assert_eq!(selection.keys(), vec![1, 2, 3]);
        assert!(selection.is_all_visible_selected(&[1, 2, 3]));
    }

    #[test]
    fn test_toggle_all_from_full_clears_only_visible() {
        let mut selection: SelectionSet = [1, 2, 3, 40].into_iter().collect();
        selection.toggle_all_visible(&[1, 2, 3]);
        assert_eq!(selection.keys(), vec![40]);
    }

    #[test]
    fn test_toggle_all_twice_is_identity() {
        let visible = [1, 2, 3];
        for start in [vec![], vec![1, 2, 3], vec![9], vec![1, 2, 3, 9]] {
            let original: SelectionSet = start.into_iter().collect();
            let mut selection = original.clone();
            selection.toggle_all_visible(&visible);
            selection.toggle_all_visible(&visible);
            assert_eq!(selection, original);
        }
    }

    #[test]
    fn test_toggle_all_twice_from_partial_ends_empty_on_page() {
        let visible = [1, 2, 3];
        let mut selection: SelectionSet = [2, 9].into_iter().collect();
        selection.toggle_all_visible(&visible);
        selection.toggle_all_visible(&visible);
        assert_eq!(selection.keys(), vec![9]);
    }

    #[test]
    fn test_all_visible_selected_requires_non_empty_page() {
        let selection: SelectionSet = [1].into_iter().collect();
        assert!(!selection.is_all_visible_selected(&[]));
    }

    #[test]
    fn test_retain() {
        let mut selection: SelectionSet = [1, 2, 3].into_iter().collect();
        selection.retain(|key| key != 2);
        assert_eq!(selection.keys(), vec![1, 3]);
    }
}
