//! In-memory inventory used by `--demo` and the test suites
//!
//! Supports fault injection (unreadable metadata, unknown sizes, refused
//! deletes, a failing listing page) and can hold deletes at a gate so
//! callers can observe a batch while it is in flight.

use super::{ControlData, Inventory, OccupiedSize, Record, StorageSpace};
use crate::error::InventoryError;
use crate::model::{AppId, StorageId};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Default)]
struct MemoryApp {
    /// `None` simulates corrupted metadata.
    control: Option<ControlData>,
    /// `None` simulates a failed size query.
    size: Option<OccupiedSize>,
}

#[derive(Debug, Default)]
struct State {
    apps: BTreeMap<AppId, MemoryApp>,
    refuse_delete: BTreeSet<AppId>,
    fail_listing_at: Option<usize>,
    deleted: Vec<AppId>,
    storage: BTreeMap<StorageId, StorageSpace>,
}

#[derive(Debug, Default)]
pub struct MemoryInventory {
    state: Mutex<State>,
    gate_closed: Mutex<bool>,
    gate: Condvar,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_app(self, id: AppId, name: &str, internal: u64, removable: u64) -> Self {
        self.insert(id, name, internal, removable);
        self
    }

    pub fn insert(&self, id: AppId, name: &str, internal: u64, removable: u64) {
        let app = MemoryApp {
            control: Some(ControlData {
                name: name.to_string(),
                author: "Unknown".to_string(),
                display_version: "1.0.0".to_string(),
                icon: None,
            }),
            size: Some(OccupiedSize { internal, removable }),
        };
        lock(&self.state).apps.insert(id, app);
    }

    pub fn insert_control(&self, id: AppId, control: ControlData, size: OccupiedSize) {
        lock(&self.state).apps.insert(
            id,
            MemoryApp {
                control: Some(control),
                size: Some(size),
            },
        );
    }

    /// Application whose metadata cannot be read.
    pub fn insert_corrupted(&self, id: AppId) {
        lock(&self.state).apps.insert(
            id,
            MemoryApp {
                control: None,
                size: Some(OccupiedSize::default()),
            },
        );
    }

    /// Make size queries for `id` fail.
    pub fn fail_size(&self, id: AppId) {
        if let Some(app) = lock(&self.state).apps.get_mut(&id) {
            app.size = None;
        }
    }

    /// Make deleting `id` fail; the application stays installed.
    pub fn fail_delete(&self, id: AppId) {
        lock(&self.state).refuse_delete.insert(id);
    }

    /// Make the listing call starting at `offset` fail.
    pub fn fail_listing_at(&self, offset: usize) {
        lock(&self.state).fail_listing_at = Some(offset);
    }

    pub fn set_storage(&self, storage: StorageId, space: StorageSpace) {
        lock(&self.state).storage.insert(storage, space);
    }

    /// Block every subsequent `delete` until [`release_deletes`](Self::release_deletes).
    pub fn hold_deletes(&self) {
        *lock(&self.gate_closed) = true;
    }

    pub fn release_deletes(&self) {
        *lock(&self.gate_closed) = false;
        self.gate.notify_all();
    }

    /// Ids successfully deleted, in call order.
    pub fn deleted(&self) -> Vec<AppId> {
        lock(&self.state).deleted.clone()
    }

    pub fn contains(&self, id: AppId) -> bool {
        lock(&self.state).apps.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        lock(&self.state).apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A populated inventory for trying the interface without real storage.
    pub fn demo() -> Self {
        const GIB: u64 = 1024 * 1024 * 1024;
        const MIB: u64 = 1024 * 1024;

        let titles: [(&str, &str, &str, u64, u64); 14] = [
            ("Mountain Rally", "Gravel Works", "1.4.2", 6 * GIB, 0),
            ("Lantern Keep", "Nightjar Studio", "2.0.1", 0, 14 * GIB),
            ("Pocket Farm", "Seedling", "1.0.0", 750 * MIB, 0),
            ("Starlane Tactics", "Orbit Nine", "3.1.0", 11 * GIB, 2 * GIB),
            ("Tidepool", "Bluefin", "1.2.0", 320 * MIB, 0),
            ("Clockwork Derby", "Gearbox Kids", "1.1.5", 0, 4 * GIB),
            ("Ember Saga", "Redstone", "5.0.0", 27 * GIB, 0),
            ("Paper Planes", "Foldline", "0.9.3", 120 * MIB, 0),
            ("Quiet Harbor", "Driftwood", "1.0.4", 2 * GIB, 0),
            ("Neon Sprint", "Pulse", "2.2.2", 0, 9 * GIB),
            ("Wildflower", "Meadow Co", "1.3.0", 1536 * MIB, 0),
            ("Iron Orchard", "Anvil", "4.0.0", 18 * GIB, 5 * GIB),
            ("Bubble Lab", "Fizz", "1.0.1", 64 * MIB, 0),
            ("Comet Cup", "Orbit Nine", "1.0.0", 3 * GIB, 0),
        ];

        let inventory = Self::new();
        for (i, (name, author, version, internal, removable)) in titles.into_iter().enumerate() {
            inventory.insert_control(
                AppId(0x0100_0000_0001_0000 + ((i as u64) << 16)),
                ControlData {
                    name: name.to_string(),
                    author: author.to_string(),
                    display_version: version.to_string(),
                    icon: None,
                },
                OccupiedSize { internal, removable },
            );
        }
        inventory.insert_corrupted(AppId(0x0100_0000_00FF_0000));

        inventory.set_storage(
            StorageId::Internal,
            StorageSpace {
                total: 64 * GIB,
                free: 7 * GIB,
            },
        );
        inventory.set_storage(
            StorageId::Removable,
            StorageSpace {
                total: 128 * GIB,
                free: 98 * GIB,
            },
        );
        inventory
    }

    fn wait_at_gate(&self) {
        let mut closed = lock(&self.gate_closed);
        while *closed {
            closed = self
                .gate
                .wait(closed)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}

impl Inventory for MemoryInventory {
    fn list_records(&self, offset: usize, limit: usize) -> Result<Vec<Record>, InventoryError> {
        let state = lock(&self.state);
        if state.fail_listing_at == Some(offset) {
            return Err(InventoryError::io(
                "memory",
                io::Error::other("listing failed"),
            ));
        }
        Ok(state
            .apps
            .keys()
            .skip(offset)
            .take(limit)
            .map(|&id| Record { id })
            .collect())
    }

    fn control_data(&self, id: AppId) -> Result<ControlData, InventoryError> {
        let state = lock(&self.state);
        let app = state.apps.get(&id).ok_or(InventoryError::NotFound(id))?;
        app.control.clone().ok_or_else(|| InventoryError::Malformed {
            id,
            reason: "unreadable control data".to_string(),
        })
    }

    fn occupied_size(&self, id: AppId) -> Result<OccupiedSize, InventoryError> {
        let state = lock(&self.state);
        let app = state.apps.get(&id).ok_or(InventoryError::NotFound(id))?;
        app.size.ok_or_else(|| InventoryError::Rejected {
            id,
            reason: "size query failed".to_string(),
        })
    }

    fn delete(&self, id: AppId) -> Result<(), InventoryError> {
        self.wait_at_gate();

        let mut state = lock(&self.state);
        if state.refuse_delete.contains(&id) {
            return Err(InventoryError::Rejected {
                id,
                reason: "delete refused".to_string(),
            });
        }
        if state.apps.remove(&id).is_none() {
            return Err(InventoryError::NotFound(id));
        }
        state.deleted.push(id);
        Ok(())
    }

    fn storage_space(&self, storage: StorageId) -> Result<StorageSpace, InventoryError> {
        lock(&self.state)
            .storage
            .get(&storage)
            .copied()
            .ok_or(InventoryError::StorageUnavailable(storage))
    }
}
