//! Turn an inventory into display entries
//!
//! The scan pages through the inventory, reads control data and sizes for
//! each id, and creates one icon per healthy entry. Unreadable metadata is
//! kept as a corrupted entry rather than dropped; only a failed listing page
//! aborts the scan.

use crate::error::ScanError;
use crate::icons::{Icon, IconStore};
use crate::inventory::{Inventory, OccupiedSize, StorageSpace, PAGE_SIZE};
use crate::model::{AppId, Entry, StorageId};
use log::{debug, info, warn};

/// Scan every installed application.
///
/// On error every icon created during the scan has already been released.
pub fn scan(inventory: &dyn Inventory, icons: &mut IconStore) -> Result<Vec<Entry>, ScanError> {
    let mut entries = Vec::new();
    let mut offset = 0;

    loop {
        let page = match inventory.list_records(offset, PAGE_SIZE) {
            Ok(page) => page,
            Err(source) => {
                release_all(&mut entries, icons);
                return Err(ScanError::ListFailed { offset, source });
            }
        };

        let count = page.len();
        debug!("listing page at offset {}: {} records", offset, count);
        for record in page {
            entries.push(build_entry(inventory, icons, record.id));
        }

        offset += count;
        if count < PAGE_SIZE {
            break;
        }
    }

    info!("scanned {} installed applications", entries.len());
    Ok(entries)
}

fn build_entry(inventory: &dyn Inventory, icons: &mut IconStore, id: AppId) -> Entry {
    let control = match inventory.control_data(id) {
        Ok(control) => control,
        Err(e) => {
            warn!("{}: {}", id, e);
            return Entry::corrupted(id, icons.default_icon());
        }
    };

    let size = inventory.occupied_size(id).unwrap_or_else(|e| {
        warn!("{}: size unavailable: {}", id, e);
        OccupiedSize::default()
    });

    let icon = match control.icon.as_deref().map(str::trim) {
        Some(badge) if !badge.is_empty() => Icon::new(badge),
        _ => Icon::monogram(&control.name),
    };
    let handle = icons.create(icon);

    Entry::new(
        id,
        control.name,
        control.author,
        control.display_version,
        size.internal,
        size.removable,
        handle,
        true,
    )
}

fn release_all(entries: &mut Vec<Entry>, icons: &mut IconStore) {
    for entry in entries.drain(..) {
        if entry.owns_icon {
            icons.release(entry.icon);
        }
    }
}

/// Capacity of both storage classes, `None` where it could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StorageSummary {
    pub internal: Option<StorageSpace>,
    pub removable: Option<StorageSpace>,
}

impl StorageSummary {
    pub fn load(inventory: &dyn Inventory) -> Self {
        let read = |storage: StorageId| match inventory.storage_space(storage) {
            Ok(space) => Some(space),
            Err(e) => {
                debug!("{} storage space unavailable: {}", storage, e);
                None
            }
        };
        Self {
            internal: read(StorageId::Internal),
            removable: read(StorageId::Removable),
        }
    }

    pub fn get(&self, storage: StorageId) -> Option<StorageSpace> {
        match storage {
            StorageId::Internal => self.internal,
            StorageId::Removable => self.removable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{ControlData, MemoryInventory};
    use crate::model::{CORRUPTED_NAME, UNKNOWN_FIELD};

    #[test]
    fn test_scan_spans_multiple_pages() {
        let inv = MemoryInventory::new();
        for i in 0..(PAGE_SIZE as u64 * 2 + 5) {
            inv.insert(AppId(i), &format!("App {i}"), i, 0);
        }
        let mut icons = IconStore::default();
        let entries = scan(&inv, &mut icons).unwrap();
        assert_eq!(entries.len(), PAGE_SIZE * 2 + 5);
        assert_eq!(icons.live(), entries.len());
    }

    #[test]
    fn test_exact_page_multiple_terminates() {
        let inv = MemoryInventory::new();
        for i in 0..PAGE_SIZE as u64 {
            inv.insert(AppId(i), "x", 0, 0);
        }
        let mut icons = IconStore::default();
        assert_eq!(scan(&inv, &mut icons).unwrap().len(), PAGE_SIZE);
    }

    #[test]
    fn test_corrupted_entry_keeps_sentinels() {
        let inv = MemoryInventory::new().with_app(AppId(1), "Fine", 5, 6);
        inv.insert_corrupted(AppId(2));
        let mut icons = IconStore::default();
        let entries = scan(&inv, &mut icons).unwrap();

        let broken = entries.iter().find(|e| e.id == AppId(2)).unwrap();
        assert_eq!(broken.name, CORRUPTED_NAME);
        assert_eq!(broken.author, UNKNOWN_FIELD);
        assert_eq!(broken.version, UNKNOWN_FIELD);
        assert_eq!(broken.size_total, 0);
        assert_eq!(broken.icon, icons.default_icon());
        assert!(!broken.owns_icon);
        assert!(broken.is_corrupted());

        let fine = entries.iter().find(|e| e.id == AppId(1)).unwrap();
        assert_eq!(fine.size_total, 11);
        assert!(fine.owns_icon);
        assert_eq!(icons.live(), 1);
    }

    #[test]
    fn test_size_failure_reports_zero() {
        let inv = MemoryInventory::new().with_app(AppId(1), "Sizeless", 500, 500);
        inv.fail_size(AppId(1));
        let mut icons = IconStore::default();
        let entries = scan(&inv, &mut icons).unwrap();
        assert_eq!(entries[0].name, "Sizeless");
        assert_eq!(
            (entries[0].size_internal, entries[0].size_removable, entries[0].size_total),
            (0, 0, 0)
        );
    }

    #[test]
    fn test_listing_failure_releases_icons() {
        let inv = MemoryInventory::new();
        for i in 0..40 {
            inv.insert(AppId(i), "x", 0, 0);
        }
        inv.fail_listing_at(PAGE_SIZE);
        let mut icons = IconStore::default();
        match scan(&inv, &mut icons) {
            Err(ScanError::ListFailed { offset, .. }) => assert_eq!(offset, PAGE_SIZE),
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(icons.live(), 0);
    }

    #[test]
    fn test_icon_badge_from_control_data() {
        let inv = MemoryInventory::new();
        inv.insert_control(
            AppId(1),
            ControlData {
                name: "Super Game".to_string(),
                icon: Some(" SG ".to_string()),
                ..ControlData::default()
            },
            OccupiedSize::default(),
        );
        inv.insert(AppId(2), "lantern keep", 0, 0);
        let mut icons = IconStore::default();
        let entries = scan(&inv, &mut icons).unwrap();
        assert_eq!(icons.get(entries[0].icon).unwrap().badge, "SG");
        assert_eq!(icons.get(entries[1].icon).unwrap().badge, "LK");
    }

    #[test]
    fn test_storage_summary() {
        let inv = MemoryInventory::new();
        inv.set_storage(StorageId::Internal, StorageSpace { total: 10, free: 4 });
        let summary = StorageSummary::load(&inv);
        assert_eq!(summary.get(StorageId::Internal).unwrap().used(), 6);
        assert!(summary.removable.is_none());
    }
}
