//! Confirmation overlay shown over the list

use crate::menu::MenuView;
use crate::tui::{
    screens::centered_rect,
    theme::Styles,
    widgets::shortcuts::{get_shortcuts, render_shortcuts},
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, view: &MenuView) {
    let Some(pending) = view.pending else {
        return;
    };

    let area = centered_rect(64, 9, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::warning())
        .title(" CONFIRM DELETION ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(inner);

    let item_text = if pending.count == 1 { "entry" } else { "entries" };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Are you sure you want to delete the selected entries?",
            Styles::warning(),
        )),
        Line::from(vec![
            Span::styled(format!("{} {}", pending.count, item_text), Styles::emphasis()),
            Span::styled(
                format!(" ({})", bytesize::to_string(pending.size, true)),
                Styles::secondary(),
            ),
            Span::styled(" will be removed permanently", Styles::secondary()),
        ]),
    ];
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        chunks[0],
    );

    render_shortcuts(f, chunks[1], &get_shortcuts(view.state, view.sort_label));
}
