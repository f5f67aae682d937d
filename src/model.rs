//! Core data types for installed software entries

use crate::icons::IconHandle;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque 64-bit application identifier.
///
/// Displayed (and stored on disk) as 16 upper-case hex digits, e.g.
/// `0100000000010000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(pub u64);

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016X}", self.0)
    }
}

impl FromStr for AppId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u64::from_str_radix(s.trim(), 16).map(AppId)
    }
}

/// Storage class an entry can occupy space on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageId {
    Internal,
    Removable,
}

impl StorageId {
    pub const ALL: [StorageId; 2] = [StorageId::Internal, StorageId::Removable];

    pub fn label(self) -> &'static str {
        match self {
            StorageId::Internal => "Internal storage",
            StorageId::Removable => "Removable storage",
        }
    }
}

impl fmt::Display for StorageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageId::Internal => f.write_str("internal"),
            StorageId::Removable => f.write_str("removable"),
        }
    }
}

pub const CORRUPTED_NAME: &str = "Corrupted";
pub const UNKNOWN_FIELD: &str = "NA";

/// One installed software entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: AppId,
    pub name: String,
    pub author: String,
    pub version: String,
    pub size_internal: u64,
    pub size_removable: u64,
    /// Always `size_internal + size_removable`.
    pub size_total: u64,
    pub selected: bool,
    pub icon: IconHandle,
    /// Whether releasing `icon` is this entry's responsibility.
    pub owns_icon: bool,
}

impl Entry {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: AppId,
        name: impl Into<String>,
        author: impl Into<String>,
        version: impl Into<String>,
        size_internal: u64,
        size_removable: u64,
        icon: IconHandle,
        owns_icon: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            author: author.into(),
            version: version.into(),
            size_internal,
            size_removable,
            size_total: size_internal.saturating_add(size_removable),
            selected: false,
            icon,
            owns_icon,
        }
    }

    /// Entry whose metadata could not be read. It stays listed (and
    /// selectable) so a broken install can still be removed.
    pub fn corrupted(id: AppId, default_icon: IconHandle) -> Self {
        Self::new(id, CORRUPTED_NAME, UNKNOWN_FIELD, UNKNOWN_FIELD, 0, 0, default_icon, false)
    }

    pub fn is_corrupted(&self) -> bool {
        !self.owns_icon && self.name == CORRUPTED_NAME
    }

    pub fn size_on(&self, storage: StorageId) -> u64 {
        match storage {
            StorageId::Internal => self.size_internal,
            StorageId::Removable => self.size_removable,
        }
    }
}
