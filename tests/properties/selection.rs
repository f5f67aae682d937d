//! Property tests for catalog selection.

use proptest::prelude::*;

use appsweep::catalog::Catalog;
use appsweep::icons::IconStore;
use appsweep::model::{AppId, Entry};

fn catalog(len: usize) -> Catalog {
    let icons = IconStore::default();
    let entries = (0..len as u64)
        .map(|i| {
            Entry::new(
                AppId(i),
                &format!("app{i}"),
                "",
                "",
                i * 10,
                i,
                icons.default_icon(),
                false,
            )
        })
        .collect();
    Catalog::new(entries)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the selected count always equals the number of flagged entries.
    #[test]
    fn property_selected_count_matches_flags(
        len in 0usize..40,
        toggles in proptest::collection::vec(0usize..50, 0..120)
    ) {
        let mut catalog = catalog(len);
        for index in toggles {
            let result = catalog.toggle(index);
            prop_assert_eq!(result.is_some(), index < len);

            let flagged = catalog.entries().iter().filter(|e| e.selected).count();
            prop_assert_eq!(catalog.selected_count(), flagged);
            prop_assert!(catalog.selected_count() <= catalog.len());
        }

        let ids = catalog.selected_ids();
        prop_assert_eq!(ids.len(), catalog.selected_count());
        let expected_size: u64 = catalog
            .entries()
            .iter()
            .filter(|e| e.selected)
            .map(|e| e.size_total)
            .sum();
        prop_assert_eq!(catalog.selected_size(), expected_size);
    }

    /// PROPERTY: removing ids drops exactly those entries and keeps the count consistent.
    #[test]
    fn property_remove_ids_keeps_count_consistent(
        len in 1usize..30,
        toggles in proptest::collection::vec(0usize..30, 0..30),
        remove in proptest::collection::vec(0u64..40, 0..10)
    ) {
        let mut catalog = catalog(len);
        for index in toggles {
            catalog.toggle(index);
        }
        let ids: Vec<AppId> = remove.into_iter().map(AppId).collect();
        let removed = catalog.remove_ids(&ids);

        prop_assert!(removed.iter().all(|e| ids.contains(&e.id)));
        prop_assert!(catalog.entries().iter().all(|e| !ids.contains(&e.id)));
        prop_assert_eq!(catalog.len() + removed.len(), len);
        let flagged = catalog.entries().iter().filter(|e| e.selected).count();
        prop_assert_eq!(catalog.selected_count(), flagged);
    }
}
