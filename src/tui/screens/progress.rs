//! Delete progress overlay

use crate::menu::{MenuView, ProgressView};
use crate::tui::{
    screens::centered_rect,
    theme::Styles,
    widgets::progress::render_progress_bar,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn status_text(progress: &ProgressView) -> String {
    format!("Deleted {} / {}", progress.completed, progress.total)
}

pub fn ratio(progress: &ProgressView) -> f64 {
    if progress.total == 0 {
        1.0
    } else {
        progress.completed as f64 / progress.total as f64
    }
}

pub fn render(f: &mut Frame, view: &MenuView, tick: u64) {
    let Some(progress) = view.progress else {
        return;
    };

    let area = centered_rect(64, 7, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border())
        .title(" DELETING ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    render_progress_bar(
        f,
        chunks[1],
        "Removing",
        ratio(&progress),
        &status_text(&progress),
        tick,
    );

    if progress.failed > 0 {
        let failed = Paragraph::new(Line::from(Span::styled(
            format!("{} could not be deleted", progress.failed),
            Styles::error(),
        )))
        .alignment(Alignment::Center);
        f.render_widget(failed, chunks[3]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_ratio() {
        let progress = ProgressView {
            completed: 1,
            failed: 0,
            total: 4,
        };
        assert_eq!(status_text(&progress), "Deleted 1 / 4");
        assert!((ratio(&progress) - 0.25).abs() < f64::EPSILON);

        let empty = ProgressView {
            completed: 0,
            failed: 0,
            total: 0,
        };
        assert_eq!(ratio(&empty), 1.0);
    }
}
