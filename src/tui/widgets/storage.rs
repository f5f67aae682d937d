//! Storage usage side panel
//!
//! One section per storage class: a used-space bar, the share the focused
//! entry takes on that storage, and what is left free.

use crate::inventory::StorageSpace;
use crate::model::{Entry, StorageId};
use crate::scanner::StorageSummary;
use crate::tui::theme::Styles;
use crate::tui::widgets::progress::bar_spans;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

/// Suggested panel width.
pub const PANEL_WIDTH: u16 = 34;

fn section_title(storage: StorageId) -> &'static str {
    match storage {
        StorageId::Internal => "System memory",
        StorageId::Removable => "microSD card",
    }
}

/// Text lines for one storage section, without the bar.
pub fn describe(space: StorageSpace, focused: Option<&Entry>, storage: StorageId) -> Vec<String> {
    let mut lines = vec![format!(
        "{} / {} used",
        bytesize::to_string(space.used(), true),
        bytesize::to_string(space.total, true)
    )];
    if let Some(entry) = focused {
        lines.push(format!(
            "Selected title: {}",
            bytesize::to_string(entry.size_on(storage), true)
        ));
    }
    lines.push(format!("Free: {}", bytesize::to_string(space.free, true)));
    lines
}

pub fn render_storage_panel(
    f: &mut Frame,
    area: Rect,
    summary: &StorageSummary,
    focused: Option<&Entry>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border())
        .title(" Storage ")
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let bar_width = inner.width as usize;
    let mut lines: Vec<Line> = Vec::new();

    for storage in StorageId::ALL {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(section_title(storage), Styles::title())));

        let Some(space) = summary.get(storage) else {
            lines.push(Line::from(Span::styled("Not available", Styles::muted())));
            continue;
        };

        let ratio = if space.total == 0 {
            0.0
        } else {
            space.used() as f64 / space.total as f64
        };
        let bar_style = if ratio > 0.9 {
            Styles::warning()
        } else {
            Styles::emphasis()
        };
        lines.push(Line::from(bar_spans(bar_width, ratio, 0, bar_style)));

        for text in describe(space, focused, storage) {
            lines.push(Line::from(Span::styled(text, Styles::secondary())));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::IconStore;
    use crate::model::AppId;

    #[test]
    fn test_describe_includes_focused_share() {
        let icon = IconStore::default().default_icon();
        let entry = Entry::new(AppId(1), "x", "a", "1", 2048, 4096, icon, false);
        let space = StorageSpace {
            total: 10_000,
            free: 2_000,
        };

        let lines = describe(space, Some(&entry), StorageId::Removable);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains(&bytesize::to_string(4096, true)));

        assert_eq!(describe(space, None, StorageId::Internal).len(), 2);
    }
}
