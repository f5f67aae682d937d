//! Command feature handlers.
//!
//! Each module owns one command feature.

pub mod browse_command;
pub mod config_command;
pub mod list_command;

use crate::config::Config;
use crate::inventory::{DirectoryInventory, Inventory, MemoryInventory};
use anyhow::bail;
use log::info;
use std::sync::Arc;

/// Inventory selected by the config and `--demo`.
pub(crate) fn open_inventory(config: &Config, demo: bool) -> anyhow::Result<Arc<dyn Inventory>> {
    if demo {
        info!("using the built-in demo inventory");
        return Ok(Arc::new(MemoryInventory::demo()));
    }

    if !config.storage.is_configured() {
        let location = Config::config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "the config file".to_string());
        bail!(
            "no storage root configured\n\n\
             hint: pass --internal DIR and/or --removable DIR, set [storage] in {}, \
             or try --demo",
            location
        );
    }

    info!(
        "using storage roots internal={:?} removable={:?}",
        config.storage.internal, config.storage.removable
    );
    Ok(Arc::new(DirectoryInventory::new(
        config.storage.internal.clone(),
        config.storage.removable.clone(),
    )))
}
