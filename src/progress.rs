//! Progress of a batch delete, shared between worker and foreground loop
//!
//! The worker reports [`DeleteEvent`] messages; the foreground reads a
//! [`ProgressState`] snapshot once per frame. Both sides go through the same
//! mutex so every read is a consistent snapshot.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Message emitted by the batch delete engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteEvent {
    /// One identifier was processed; `failed` when the provider refused it.
    ItemCompleted { failed: bool },
    /// The batch is over. Emitted exactly once, last.
    BatchDone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressState {
    /// Items processed, successful or not.
    pub completed: usize,
    /// Subset of `completed` that failed.
    pub failed: usize,
    pub done: bool,
}

impl ProgressState {
    pub fn apply(&mut self, event: DeleteEvent) {
        match event {
            DeleteEvent::ItemCompleted { failed } => {
                self.completed += 1;
                if failed {
                    self.failed += 1;
                }
            }
            DeleteEvent::BatchDone => self.done = true,
        }
    }
}

/// Receiver side of [`DeleteEvent`]s.
pub trait ProgressSink: Send + Sync {
    fn report(&self, event: DeleteEvent);
}

/// Mutex-guarded [`ProgressState`] handed to exactly one worker and read by
/// the foreground loop.
#[derive(Debug, Clone, Default)]
pub struct SharedProgress(Arc<Mutex<ProgressState>>);

impl SharedProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the record. Poisoning is ignored: the record is plain counters.
    pub fn lock(&self) -> MutexGuard<'_, ProgressState> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start of a new cycle.
    pub fn reset(&self) {
        *self.lock() = ProgressState::default();
    }

    pub fn snapshot(&self) -> ProgressState {
        *self.lock()
    }
}

impl ProgressSink for SharedProgress {
    fn report(&self, event: DeleteEvent) {
        self.lock().apply(event);
    }
}

impl ProgressSink for Mutex<Sender<DeleteEvent>> {
    fn report(&self, event: DeleteEvent) {
        if let Ok(tx) = self.lock() {
            let _ = tx.send(event);
        }
    }
}
