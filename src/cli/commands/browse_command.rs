//! Browse command feature.
//!
//! Scans the inventory and hands a [`Menu`] to the terminal UI.

use super::open_inventory;
use crate::config::Config;
use crate::menu::Menu;
use crate::tui;
use crate::viewport::Geometry;
use std::time::Duration;

pub(crate) fn handle_browse(config: &Config, demo: bool) -> anyhow::Result<()> {
    let inventory = open_inventory(config, demo)?;

    // The frame loop replaces this geometry with the terminal's on the
    // first frame.
    let mut menu = Menu::new(inventory, Geometry::default(), config.ui.default_sort);
    let frame_interval = Duration::from_millis(config.ui.frame_interval_ms.max(1));

    tui::run(&mut menu, frame_interval)
}
