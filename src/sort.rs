//! Sort orders for the entry list

use crate::model::Entry;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The four orderings, cycled forward with a single control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    NameAscending,
    NameDescending,
    #[default]
    SizeDescending,
    SizeAscending,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [
        SortMode::NameAscending,
        SortMode::NameDescending,
        SortMode::SizeDescending,
        SortMode::SizeAscending,
    ];

    /// Next mode, wrapping from the last back to the first.
    pub fn next(self) -> SortMode {
        match self {
            SortMode::NameAscending => SortMode::NameDescending,
            SortMode::NameDescending => SortMode::SizeDescending,
            SortMode::SizeDescending => SortMode::SizeAscending,
            SortMode::SizeAscending => SortMode::NameAscending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::NameAscending => "Sort Alpha: A-Z",
            SortMode::NameDescending => "Sort Alpha: Z-A",
            SortMode::SizeDescending => "Sort Size: 9-0",
            SortMode::SizeAscending => "Sort Size: 0-9",
        }
    }

    /// Total order used by [`SortMode::sort`]. Names compare byte-wise
    /// (case-sensitive); ties fall back to the id so the order is fully
    /// determined and re-sorting never shuffles equal keys.
    pub fn compare(self, a: &Entry, b: &Entry) -> Ordering {
        let primary = match self {
            SortMode::NameAscending => a.name.cmp(&b.name),
            SortMode::NameDescending => b.name.cmp(&a.name),
            SortMode::SizeDescending => b.size_total.cmp(&a.size_total),
            SortMode::SizeAscending => a.size_total.cmp(&b.size_total),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }

    pub fn sort(self, entries: &mut [Entry]) {
        entries.sort_unstable_by(|a, b| self.compare(a, b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::IconStore;
    use crate::model::AppId;

    fn entries() -> Vec<Entry> {
        let icon = IconStore::default().default_icon();
        vec![
            Entry::new(AppId(1), "beta", "x", "1", 10, 0, icon, false),
            Entry::new(AppId(2), "Alpha", "x", "1", 30, 5, icon, false),
            Entry::new(AppId(3), "alpha", "x", "1", 1, 1, icon, false),
            Entry::new(AppId(4), "Zeta", "x", "1", 10, 0, icon, false),
        ]
    }

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_cycle_wraps() {
        let mut mode = SortMode::NameAscending;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(mode);
            mode = mode.next();
        }
        assert_eq!(seen, SortMode::ALL.to_vec());
        assert_eq!(mode, SortMode::NameAscending);
    }

    #[test]
    fn test_default_is_size_descending() {
        assert_eq!(SortMode::default(), SortMode::SizeDescending);
        assert_eq!(SortMode::default().label(), "Sort Size: 9-0");
    }

    #[test]
    fn test_name_sort_is_case_sensitive_ordinal() {
        let mut list = entries();
        SortMode::NameAscending.sort(&mut list);
        assert_eq!(names(&list), vec!["Alpha", "Zeta", "alpha", "beta"]);

        SortMode::NameDescending.sort(&mut list);
        assert_eq!(names(&list), vec!["beta", "alpha", "Zeta", "Alpha"]);
    }

    #[test]
    fn test_size_sort_breaks_ties_by_id() {
        let mut list = entries();
        SortMode::SizeDescending.sort(&mut list);
        let ids: Vec<u64> = list.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![2, 1, 4, 3]);

        SortMode::SizeAscending.sort(&mut list);
        let ids: Vec<u64> = list.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![3, 1, 4, 2]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        for mode in SortMode::ALL {
            let mut once = entries();
            mode.sort(&mut once);
            let mut twice = once.clone();
            mode.sort(&mut twice);
            assert_eq!(once, twice, "{mode:?}");
        }
    }

    #[test]
    fn test_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: SortMode,
        }
        let parsed: Wrapper = toml::from_str("mode = \"name-descending\"").unwrap();
        assert_eq!(parsed.mode, SortMode::NameDescending);
    }
}
