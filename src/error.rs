//! Typed errors for the library half of the crate
//!
//! The binary glue (CLI, config, terminal loop) works with `anyhow`; these
//! enums are what the core hands back so callers can match on the kind.

use crate::model::{AppId, StorageId};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by an [`Inventory`](crate::inventory::Inventory) provider.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed control data for {id}: {reason}")]
    Malformed { id: AppId, reason: String },

    #[error("application {0} is not installed")]
    NotFound(AppId),

    #[error("{0} storage is not configured")]
    StorageUnavailable(StorageId),

    #[error("inventory rejected request for {id}: {reason}")]
    Rejected { id: AppId, reason: String },
}

impl InventoryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// The enumeration could not complete; the scan yields no entries.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to list installed applications at offset {offset}: {source}")]
    ListFailed {
        offset: usize,
        #[source]
        source: InventoryError,
    },
}

/// Errors from the single-owner background task slot.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("a background task is already running")]
    AlreadyRunning,

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] io::Error),

    #[error("worker thread panicked: {0}")]
    Panicked(String),
}
