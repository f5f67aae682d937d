//! Batch deletion feature.
//!
//! Runs on the delete worker: removes each id of a captured batch through
//! the inventory and reports every item to a [`ProgressSink`].

use crate::inventory::Inventory;
use crate::model::AppId;
use crate::progress::{DeleteEvent, ProgressSink};
use crate::task::CancelToken;
use log::{debug, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchDeleteResult {
    pub deleted: Vec<AppId>,
    pub failed: Vec<AppId>,
    /// Ids never attempted because cancellation was requested first.
    pub skipped: Vec<AppId>,
}

impl BatchDeleteResult {
    pub fn attempted(&self) -> usize {
        self.deleted.len() + self.failed.len()
    }
}

/// Delete `batch` in order.
///
/// A failed item is reported and the batch moves on. The cancel token is
/// checked before each item; once set, the remaining ids are skipped without
/// an `ItemCompleted` event. `BatchDone` is reported exactly once, last.
pub fn delete_batch(
    inventory: &dyn Inventory,
    batch: &[AppId],
    cancel: &CancelToken,
    sink: &dyn ProgressSink,
) -> BatchDeleteResult {
    let mut result = BatchDeleteResult::default();

    debug!(
        "batch delete start: count={} first={} last={}",
        batch.len(),
        batch.first().map(ToString::to_string).unwrap_or_default(),
        batch.last().map(ToString::to_string).unwrap_or_default()
    );

    for (i, &id) in batch.iter().enumerate() {
        if cancel.is_cancelled() {
            result.skipped.extend_from_slice(&batch[i..]);
            info!(
                "batch delete cancelled: {} of {} items not attempted",
                batch.len() - i,
                batch.len()
            );
            break;
        }

        match inventory.delete(id) {
            Ok(()) => {
                debug!("deleted {}", id);
                result.deleted.push(id);
                sink.report(DeleteEvent::ItemCompleted { failed: false });
            }
            Err(e) => {
                warn!("failed to delete {}: {}", id, e);
                result.failed.push(id);
                sink.report(DeleteEvent::ItemCompleted { failed: true });
            }
        }
    }

    sink.report(DeleteEvent::BatchDone);
    info!(
        "batch delete done: deleted={} failed={} skipped={}",
        result.deleted.len(),
        result.failed.len(),
        result.skipped.len()
    );
    result
}
