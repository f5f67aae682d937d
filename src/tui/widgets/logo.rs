//! Header line with the program name
//!
//! Kept to a single line so the entry list gets as many rows as possible.

use crate::tui::theme::Styles;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Height of the header including its bottom border.
pub const HEADER_HEIGHT: u16 = 2;

const TITLE: &str = "APPSWEEP";
const TAGLINE: &str = "Remove installed software in bulk";

pub fn render_header(f: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(format!(" {}", TITLE), Styles::title()),
        Span::styled(format!(" v{}", env!("CARGO_PKG_VERSION")), Styles::muted()),
        Span::styled(" • ", Styles::secondary()),
        Span::styled(TAGLINE, Styles::secondary()),
    ]);

    let header = Paragraph::new(line).alignment(Alignment::Left).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Styles::border()),
    );
    f.render_widget(header, area);
}
