//! Property tests for sort order.

use proptest::prelude::*;

use appsweep::icons::IconStore;
use appsweep::model::{AppId, Entry};
use appsweep::sort::SortMode;

fn entries() -> impl Strategy<Value = Vec<Entry>> {
    let entry = ("[A-Za-z ]{0,8}", 0u64..5_000, 0u64..5_000);
    proptest::collection::vec(entry, 0..40).prop_map(|raw| {
        let icons = IconStore::default();
        raw.into_iter()
            .enumerate()
            .map(|(i, (name, internal, removable))| {
                Entry::new(
                    AppId(i as u64),
                    &name,
                    "",
                    "",
                    internal,
                    removable,
                    icons.default_icon(),
                    false,
                )
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: sorting is idempotent, ordered and a permutation.
    #[test]
    fn property_sort_is_idempotent_and_ordered(entries in entries()) {
        for mode in SortMode::ALL {
            let mut once = entries.clone();
            mode.sort(&mut once);
            let mut twice = once.clone();
            mode.sort(&mut twice);
            prop_assert_eq!(&once, &twice);

            for pair in once.windows(2) {
                prop_assert_ne!(mode.compare(&pair[0], &pair[1]), std::cmp::Ordering::Greater);
            }

            let mut ids: Vec<AppId> = once.iter().map(|e| e.id).collect();
            ids.sort();
            let mut original: Vec<AppId> = entries.iter().map(|e| e.id).collect();
            original.sort();
            prop_assert_eq!(ids, original);
        }
    }

    /// PROPERTY: cycling through every mode returns to the start.
    #[test]
    fn property_sort_cycle_has_period_four(start in 0usize..4) {
        let mode = SortMode::ALL[start];
        prop_assert_eq!(mode.next().next().next().next(), mode);
        prop_assert_ne!(mode.next(), mode);
    }
}
