//! Property tests for batch delete accounting.

use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::mpsc;
use std::sync::Mutex;

use appsweep::cleaner::delete_batch;
use appsweep::inventory::MemoryInventory;
use appsweep::model::AppId;
use appsweep::progress::{DeleteEvent, ProgressState};
use appsweep::task::CancelToken;

fn batch() -> impl Strategy<Value = (Vec<u64>, BTreeSet<u64>)> {
    proptest::collection::btree_set(0u64..500, 0..40).prop_flat_map(|ids| {
        let ids: Vec<u64> = ids.into_iter().collect();
        let failing = proptest::sample::subsequence(ids.clone(), 0..=ids.len())
            .prop_map(|f| f.into_iter().collect::<BTreeSet<u64>>());
        (Just(ids), failing)
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: N items with K failures give completed == N, failed == K and one BatchDone, last.
    #[test]
    fn property_every_item_is_reported_once((ids, failing) in batch()) {
        let inventory = MemoryInventory::new();
        for &id in &ids {
            inventory.insert(AppId(id), "app", 1, 0);
        }
        for &id in &failing {
            inventory.fail_delete(AppId(id));
        }
        let batch: Vec<AppId> = ids.iter().copied().map(AppId).collect();

        let (tx, rx) = mpsc::channel();
        let sink = Mutex::new(tx);
        let result = delete_batch(&inventory, &batch, &CancelToken::new(), &sink);
        drop(sink);
        let events: Vec<DeleteEvent> = rx.into_iter().collect();

        prop_assert_eq!(events.len(), ids.len() + 1);
        prop_assert_eq!(events.last(), Some(&DeleteEvent::BatchDone));
        let done_count = events.iter().filter(|e| **e == DeleteEvent::BatchDone).count();
        prop_assert_eq!(done_count, 1);

        let mut state = ProgressState::default();
        for event in &events {
            state.apply(*event);
        }
        prop_assert_eq!(state.completed, ids.len());
        prop_assert_eq!(state.failed, failing.len());
        prop_assert!(state.done);

        prop_assert_eq!(result.failed.len(), failing.len());
        prop_assert_eq!(result.deleted.len(), ids.len() - failing.len());
        prop_assert!(result.skipped.is_empty());
        for id in &result.deleted {
            prop_assert!(!inventory.contains(*id));
        }
        for id in &failing {
            prop_assert!(inventory.contains(AppId(*id)));
        }
    }
}
