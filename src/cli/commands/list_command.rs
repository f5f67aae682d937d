//! List command feature.
//!
//! Scans the inventory and prints it; nothing is deleted.

use super::open_inventory;
use crate::config::Config;
use crate::icons::IconStore;
use crate::output;
use crate::scanner::{self, StorageSummary};
use anyhow::Context;

pub(crate) fn handle_list(config: &Config, demo: bool, json: bool) -> anyhow::Result<()> {
    let inventory = open_inventory(config, demo)?;
    let sort = config.ui.default_sort;

    let mut icons = IconStore::default();
    let mut entries = scanner::scan(inventory.as_ref(), &mut icons)
        .context("Failed to list installed software")?;
    sort.sort(&mut entries);

    if json {
        let storage = StorageSummary::load(inventory.as_ref());
        output::print_json(&entries, sort.label(), &storage)
    } else {
        output::print_table(&entries);
        Ok(())
    }
}
