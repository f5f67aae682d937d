//! Installed-software providers
//!
//! The core never touches storage directly; it talks to an [`Inventory`]
//! keyed by [`AppId`]. Two providers ship with the crate: one backed by
//! application directories on disk and one kept in memory.

pub mod directory;
pub mod memory;

pub use directory::DirectoryInventory;
pub use memory::MemoryInventory;

use crate::error::InventoryError;
use crate::model::{AppId, StorageId};

/// Records fetched per listing call.
pub const PAGE_SIZE: usize = 30;

/// One row of the installed-application listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub id: AppId,
}

/// Display metadata for an application.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControlData {
    pub name: String,
    pub author: String,
    pub display_version: String,
    /// Short badge drawn in place of an icon image.
    pub icon: Option<String>,
}

/// Bytes an application occupies per storage class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OccupiedSize {
    pub internal: u64,
    pub removable: u64,
}

impl OccupiedSize {
    pub fn total(&self) -> u64 {
        self.internal.saturating_add(self.removable)
    }
}

/// Capacity of one storage device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StorageSpace {
    pub total: u64,
    pub free: u64,
}

impl StorageSpace {
    pub fn used(&self) -> u64 {
        self.total.saturating_sub(self.free)
    }
}

/// Source of installed applications.
///
/// Implementations are shared with the delete worker, hence `Send + Sync`.
pub trait Inventory: Send + Sync {
    /// Up to `limit` records starting at `offset`. An empty page ends the
    /// listing.
    fn list_records(&self, offset: usize, limit: usize) -> Result<Vec<Record>, InventoryError>;

    fn control_data(&self, id: AppId) -> Result<ControlData, InventoryError>;

    fn occupied_size(&self, id: AppId) -> Result<OccupiedSize, InventoryError>;

    /// Remove an application completely.
    fn delete(&self, id: AppId) -> Result<(), InventoryError>;

    fn storage_space(&self, storage: StorageId) -> Result<StorageSpace, InventoryError>;
}
