//! Shortcuts bar widget

use crate::menu::StateTag;
use crate::tui::theme::Styles;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

/// Render shortcuts bar at the bottom of the screen
pub fn render_shortcuts(f: &mut Frame, area: Rect, shortcuts: &[(&str, &str)]) {
    if shortcuts.is_empty() {
        return;
    }

    let available_width = area.width.saturating_sub(2);
    let mut spans: Vec<Span> = vec![];
    let mut current_width = 0;

    for (i, (key, desc)) in shortcuts.iter().enumerate() {
        let separator = if i > 0 { " • " } else { "" };
        let key_text = format!("[{}]", key);
        let desc_text = format!(" {}", desc);
        let item_width = (separator.chars().count()
            + key_text.chars().count()
            + desc_text.chars().count()) as u16;

        if i > 0 && current_width + item_width > available_width {
            spans.push(Span::styled(" ...", Styles::secondary()));
            break;
        }

        if i > 0 {
            spans.push(Span::styled(separator, Styles::secondary()));
        }
        spans.push(Span::styled(key_text, Styles::emphasis()));
        spans.push(Span::styled(desc_text, Styles::secondary()));

        current_width += item_width;
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Styles::border())
                .padding(Padding::new(1, 1, 0, 0)),
        )
        .style(Styles::secondary())
        .alignment(Alignment::Left);

    f.render_widget(paragraph, area);
}

/// Shortcuts for the current state. The sort entry shows the active order,
/// pressing it moves to the next one.
pub fn get_shortcuts(state: StateTag, sort_label: &'static str) -> Vec<(&'static str, &'static str)> {
    match state {
        StateTag::Listing => vec![
            ("Space", "Select"),
            ("↑↓", "Navigate"),
            ("D", "Delete Selected"),
            ("S", sort_label),
            ("Q", "Exit"),
        ],
        StateTag::Confirming => vec![("Enter", "OK"), ("Esc", "Back")],
        StateTag::InProgress => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_shortcuts_show_sort_label() {
        let shortcuts = get_shortcuts(StateTag::Listing, "Sort Size: 9-0");
        assert!(shortcuts.contains(&("S", "Sort Size: 9-0")));
    }

    #[test]
    fn test_no_shortcuts_while_deleting() {
        assert!(get_shortcuts(StateTag::InProgress, "x").is_empty());
    }
}
