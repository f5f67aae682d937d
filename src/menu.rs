//! The list / confirm / progress state machine
//!
//! `Menu` owns every piece of foreground state: the catalog, icons,
//! viewport, sort mode and the delete worker slot. The host loop calls
//! [`Menu::update`] once per frame with the decoded controls and renders
//! whatever [`Menu::view`] returns. The menu itself never draws anything.

use crate::catalog::Catalog;
use crate::cleaner::{delete_batch, BatchDeleteResult};
use crate::error::TaskError;
use crate::icons::IconStore;
use crate::input::Controls;
use crate::inventory::Inventory;
use crate::model::{AppId, Entry};
use crate::progress::SharedProgress;
use crate::scanner::{self, StorageSummary};
use crate::sort::SortMode;
use crate::task::AsyncTask;
use crate::viewport::{Geometry, Viewport};
use log::{debug, error, info};
use std::sync::Arc;

/// Current state plus the batch it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuMode {
    Listing,
    /// Waiting for the user to confirm deleting `batch`.
    Confirming { batch: Arc<[AppId]> },
    /// The worker is deleting `batch`.
    InProgress { batch: Arc<[AppId]> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateTag {
    Listing,
    Confirming,
    InProgress,
}

impl MenuMode {
    pub fn tag(&self) -> StateTag {
        match self {
            MenuMode::Listing => StateTag::Listing,
            MenuMode::Confirming { .. } => StateTag::Confirming,
            MenuMode::InProgress { .. } => StateTag::InProgress,
        }
    }

    pub fn batch(&self) -> Option<&[AppId]> {
        match self {
            MenuMode::Listing => None,
            MenuMode::Confirming { batch } | MenuMode::InProgress { batch } => Some(&batch[..]),
        }
    }
}

pub struct Menu {
    inventory: Arc<dyn Inventory>,
    catalog: Catalog,
    icons: IconStore,
    viewport: Viewport,
    sort_mode: SortMode,
    mode: MenuMode,
    progress: SharedProgress,
    task: AsyncTask<BatchDeleteResult>,
    storage: StorageSummary,
    scan_error: Option<String>,
    last_result: Option<BatchDeleteResult>,
    quit: bool,
}

impl Menu {
    /// Scan `inventory` and start in `Listing`. A failed scan leaves the
    /// list empty; the error text is kept for display.
    pub fn new(inventory: Arc<dyn Inventory>, geometry: Geometry, sort_mode: SortMode) -> Self {
        let mut icons = IconStore::default();
        let (entries, scan_error) = match scanner::scan(inventory.as_ref(), &mut icons) {
            Ok(entries) => (entries, None),
            Err(e) => {
                error!("{}", e);
                (Vec::new(), Some(e.to_string()))
            }
        };

        let mut catalog = Catalog::new(entries);
        catalog.sort(sort_mode);
        let storage = StorageSummary::load(inventory.as_ref());

        Self {
            inventory,
            catalog,
            icons,
            viewport: Viewport::new(geometry),
            sort_mode,
            mode: MenuMode::Listing,
            progress: SharedProgress::new(),
            task: AsyncTask::new("batch-delete"),
            storage,
            scan_error,
            last_result: None,
            quit: false,
        }
    }

    pub fn state(&self) -> StateTag {
        self.mode.tag()
    }

    pub fn mode(&self) -> &MenuMode {
        &self.mode
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn icons(&self) -> &IconStore {
        &self.icons
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn progress(&self) -> &SharedProgress {
        &self.progress
    }

    /// Outcome of the most recent delete cycle.
    pub fn last_result(&self) -> Option<&BatchDeleteResult> {
        self.last_result.as_ref()
    }

    /// Set once the user backs out of the list.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Re-fit the viewport to a new layout (terminal resize).
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.viewport.set_geometry(geometry);
    }

    /// Advance one frame. Errors are a failed worker start or a worker that
    /// panicked; the menu is back in `Listing` either way.
    pub fn update(&mut self, controls: &Controls) -> Result<(), TaskError> {
        match self.mode.tag() {
            StateTag::Listing => {
                self.update_list(controls);
                Ok(())
            }
            StateTag::Confirming => self.update_confirm(controls),
            StateTag::InProgress => self.update_progress(),
        }
    }

    fn update_list(&mut self, controls: &Controls) {
        if controls.back {
            debug!("quit requested");
            self.quit = true;
        } else if controls.accept {
            if let Some(selected) = self.catalog.toggle(self.viewport.cursor()) {
                debug!(
                    "entry {} {}",
                    self.viewport.cursor(),
                    if selected { "selected" } else { "deselected" }
                );
            }
        } else if controls.delete {
            if self.catalog.selected_count() > 0 {
                let batch: Arc<[AppId]> = self.catalog.selected_ids().into();
                debug!("Listing -> Confirming ({} entries)", batch.len());
                self.mode = MenuMode::Confirming { batch };
            }
        } else if controls.down {
            self.viewport.move_down(self.catalog.len());
        } else if controls.up {
            self.viewport.move_up();
        } else if controls.cycle_sort {
            self.sort_mode = self.sort_mode.next();
            self.catalog.sort(self.sort_mode);
            debug!("sort mode -> {:?}", self.sort_mode);
        }
    }

    fn update_confirm(&mut self, controls: &Controls) -> Result<(), TaskError> {
        if controls.back {
            debug!("Confirming -> Listing (cancelled)");
            self.mode = MenuMode::Listing;
            return Ok(());
        }
        if !controls.accept {
            return Ok(());
        }

        let MenuMode::Confirming { batch } = std::mem::replace(&mut self.mode, MenuMode::Listing)
        else {
            return Ok(());
        };

        self.progress.reset();
        let inventory = Arc::clone(&self.inventory);
        let sink = self.progress.clone();
        let ids = Arc::clone(&batch);
        self.task
            .start(move |cancel| delete_batch(inventory.as_ref(), &ids, &cancel, &sink))?;

        info!("deleting {} entries", batch.len());
        debug!("Confirming -> InProgress");
        self.mode = MenuMode::InProgress { batch };
        Ok(())
    }

    fn update_progress(&mut self) -> Result<(), TaskError> {
        // A worker that died before reporting BatchDone has still finished.
        let done = self.progress.lock().done;
        if !done && !self.task.is_finished() {
            return Ok(());
        }

        let joined = self.task.join();
        debug!("InProgress -> Listing");
        self.mode = MenuMode::Listing;
        self.viewport.reset();

        let result = match joined {
            Ok(result) => result.unwrap_or_default(),
            Err(e) => {
                error!("delete cycle aborted: {}", e);
                self.catalog.clear_selection();
                return Err(e);
            }
        };

        for entry in self.catalog.remove_ids(&result.deleted) {
            self.release_icon(&entry);
        }
        self.catalog.clear_selection();
        self.storage = StorageSummary::load(self.inventory.as_ref());
        self.last_result = Some(result);
        Ok(())
    }

    fn release_icon(&mut self, entry: &Entry) {
        if entry.owns_icon {
            self.icons.release(entry.icon);
        }
    }

    /// Read-only snapshot for the renderer.
    pub fn view(&self) -> MenuView<'_> {
        let len = self.catalog.len();
        let cursor = self.viewport.cursor();
        let rows = self
            .viewport
            .visible_rows(len)
            .filter_map(|slot| {
                let entry = self.catalog.get(slot.index)?;
                Some(RowView {
                    entry,
                    badge: self
                        .icons
                        .get(entry.icon)
                        .map(|icon| icon.badge.as_str())
                        .unwrap_or("??"),
                    highlighted: slot.index == cursor,
                    y: slot.y,
                })
            })
            .collect();

        let progress = match &self.mode {
            MenuMode::InProgress { batch } => {
                let state = self.progress.snapshot();
                Some(ProgressView {
                    completed: state.completed,
                    failed: state.failed,
                    total: batch.len(),
                })
            }
            _ => None,
        };

        let pending = match &self.mode {
            MenuMode::Confirming { batch } => Some(PendingView {
                count: batch.len(),
                size: self.catalog.selected_size(),
            }),
            _ => None,
        };

        MenuView {
            state: self.mode.tag(),
            rows,
            focused: self.catalog.get(cursor),
            selected_count: self.catalog.selected_count(),
            total_count: len,
            sort_label: self.sort_mode.label(),
            pending,
            progress,
            storage: self.storage,
            scan_error: self.scan_error.as_deref(),
            last_result: self.last_result.as_ref(),
        }
    }
}

impl Drop for Menu {
    fn drop(&mut self) {
        if self.task.is_outstanding() {
            self.task.request_cancel();
            if let Err(e) = self.task.join() {
                error!("delete worker failed during shutdown: {}", e);
            }
        }
        for entry in self.catalog.drain() {
            self.release_icon(&entry);
        }
    }
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct MenuView<'a> {
    pub state: StateTag,
    /// Entries to draw, top to bottom, with their vertical positions.
    pub rows: Vec<RowView<'a>>,
    /// Entry under the cursor.
    pub focused: Option<&'a Entry>,
    pub selected_count: usize,
    pub total_count: usize,
    pub sort_label: &'static str,
    /// Set while `Confirming`.
    pub pending: Option<PendingView>,
    /// Set while `InProgress`.
    pub progress: Option<ProgressView>,
    pub storage: StorageSummary,
    pub scan_error: Option<&'a str>,
    pub last_result: Option<&'a BatchDeleteResult>,
}

#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    pub entry: &'a Entry,
    pub badge: &'a str,
    pub highlighted: bool,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingView {
    pub count: usize,
    pub size: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressView {
    pub completed: usize,
    pub failed: usize,
    pub total: usize,
}
