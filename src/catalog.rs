//! The live entry collection
//!
//! `Catalog` is the only owner of the scanned entries. Everything else reads
//! or mutates them through the narrow operations here, which keep the
//! running selected count equal to the number of selected entries.

use crate::model::{AppId, Entry};
use crate::sort::SortMode;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<Entry>,
    selected: usize,
}

impl Catalog {
    pub fn new(entries: Vec<Entry>) -> Self {
        let selected = entries.iter().filter(|e| e.selected).count();
        Self { entries, selected }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn selected_count(&self) -> usize {
        self.selected
    }

    /// Flip the selection of the entry at `index`. Returns the new state, or
    /// `None` when `index` is out of range.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let entry = self.entries.get_mut(index)?;
        entry.selected = !entry.selected;
        if entry.selected {
            self.selected += 1;
        } else {
            self.selected -= 1;
        }
        Some(entry.selected)
    }

    /// Ids of selected entries in current display order.
    pub fn selected_ids(&self) -> Vec<AppId> {
        self.entries
            .iter()
            .filter(|e| e.selected)
            .map(|e| e.id)
            .collect()
    }

    pub fn selected_size(&self) -> u64 {
        self.entries
            .iter()
            .filter(|e| e.selected)
            .fold(0u64, |acc, e| acc.saturating_add(e.size_total))
    }

    /// Reorder in place. Positions are not remapped: whatever lands at the
    /// cursor index is what the cursor now points at.
    pub fn sort(&mut self, mode: SortMode) {
        mode.sort(&mut self.entries);
    }

    /// Remove every entry whose id is in `ids` and hand the removed entries
    /// back so their resources can be released.
    pub fn remove_ids(&mut self, ids: &[AppId]) -> Vec<Entry> {
        if ids.is_empty() {
            return Vec::new();
        }
        let targets: HashSet<AppId> = ids.iter().copied().collect();
        let (removed, kept): (Vec<Entry>, Vec<Entry>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|e| targets.contains(&e.id));
        self.entries = kept;
        self.selected = self.entries.iter().filter(|e| e.selected).count();
        removed
    }

    pub fn clear_selection(&mut self) {
        for entry in &mut self.entries {
            entry.selected = false;
        }
        self.selected = 0;
    }

    /// Take every entry out, leaving the catalog empty.
    pub fn drain(&mut self) -> Vec<Entry> {
        self.selected = 0;
        std::mem::take(&mut self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::IconStore;

    fn catalog(n: u64) -> Catalog {
        let icon = IconStore::default().default_icon();
        Catalog::new(
            (0..n)
                .map(|i| Entry::new(AppId(i), format!("e{i}"), "a", "1", i * 10, 0, icon, false))
                .collect(),
        )
    }

    #[test]
    fn test_toggle_tracks_count() {
        let mut c = catalog(5);
        assert_eq!(c.toggle(1), Some(true));
        assert_eq!(c.toggle(3), Some(true));
        assert_eq!(c.selected_count(), 2);
        assert_eq!(c.toggle(1), Some(false));
        assert_eq!(c.selected_count(), 1);
        assert_eq!(c.toggle(9), None);
        assert_eq!(c.selected_ids(), vec![AppId(3)]);
        assert_eq!(c.selected_size(), 30);
    }

    #[test]
    fn test_remove_ids_returns_removed_and_recounts() {
        let mut c = catalog(6);
        c.toggle(0);
        c.toggle(2);
        c.toggle(4);
        let removed = c.remove_ids(&[AppId(2), AppId(4), AppId(99)]);
        let removed_ids: Vec<AppId> = removed.iter().map(|e| e.id).collect();
        assert_eq!(removed_ids, vec![AppId(2), AppId(4)]);
        assert_eq!(c.len(), 4);
        assert_eq!(c.selected_count(), 1);
    }

    #[test]
    fn test_sort_keeps_selection_flags() {
        let mut c = catalog(4);
        c.toggle(0);
        c.sort(SortMode::SizeDescending);
        assert_eq!(c.get(0).unwrap().id, AppId(3));
        assert!(c.get(3).unwrap().selected);
        assert_eq!(c.selected_count(), 1);
    }

    #[test]
    fn test_clear_and_drain() {
        let mut c = catalog(3);
        c.toggle(0);
        c.toggle(1);
        c.clear_selection();
        assert_eq!(c.selected_count(), 0);
        assert!(c.entries().iter().all(|e| !e.selected));

        assert_eq!(c.drain().len(), 3);
        assert!(c.is_empty());
    }
}
