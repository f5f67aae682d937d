//! Screen rendering modules

pub mod confirm;
pub mod list;
pub mod progress;

pub use list::list_geometry;

use crate::menu::{MenuView, StateTag};
use ratatui::{layout::Rect, Frame};

/// Main render function that dispatches on the menu state. The list is
/// always drawn; confirm and progress are overlays on top of it.
pub fn render(f: &mut Frame, view: &MenuView, tick: u64) {
    list::render(f, view);
    match view.state {
        StateTag::Listing => {}
        StateTag::Confirming => confirm::render(f, view),
        StateTag::InProgress => progress::render(f, view, tick),
    }
}

/// `width` x `height` rectangle centred in `area`, shrunk to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
