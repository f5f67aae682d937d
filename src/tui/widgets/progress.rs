//! Progress bar and spinner widgets

use crate::tui::theme::Styles;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Braille spinner frames.
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner frame for `tick`, advancing every other tick.
pub fn spinner(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick as usize / 2) % SPINNER_FRAMES.len()]
}

/// Spans for a horizontal bar `width` cells wide, `ratio` (0.0..=1.0) full.
/// While in flight the head pulses with `tick`.
pub fn bar_spans(width: usize, ratio: f64, tick: u64, style: Style) -> Vec<Span<'static>> {
    let ratio = ratio.clamp(0.0, 1.0);
    let filled = ((width as f64 * ratio).round() as usize).min(width);
    let in_flight = ratio > 0.0 && ratio < 1.0 && filled < width;

    let mut spans = Vec::with_capacity(3);
    if filled > 0 {
        spans.push(Span::styled("█".repeat(filled), style));
    }
    if in_flight {
        let frames = ["▓", "▒", "░"];
        spans.push(Span::styled(frames[(tick as usize / 2) % frames.len()], style));
    }
    let empty = width.saturating_sub(filled + usize::from(in_flight));
    if empty > 0 {
        spans.push(Span::styled("·".repeat(empty), Styles::muted()));
    }
    spans
}

/// Spinner, label, bar and a right-aligned status on one line.
pub fn render_progress_bar(
    f: &mut Frame,
    area: Rect,
    label: &str,
    ratio: f64,
    status: &str,
    tick: u64,
) {
    if area.width < 24 {
        let text = format!("{} {}", label, status);
        f.render_widget(Paragraph::new(text).style(Styles::primary()), area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(label.chars().count() as u16 + 1),
            Constraint::Min(8),
            Constraint::Length(status.chars().count() as u16 + 1),
        ])
        .split(area);

    let spinner_style = if ratio >= 1.0 {
        Styles::success()
    } else {
        Styles::emphasis()
    };
    let spinner_char = if ratio >= 1.0 { "✓" } else { spinner(tick) };
    f.render_widget(Paragraph::new(spinner_char).style(spinner_style), chunks[0]);
    f.render_widget(Paragraph::new(label).style(Styles::emphasis()), chunks[1]);

    let bar_style = if ratio >= 1.0 {
        Styles::success()
    } else {
        Styles::emphasis()
    };
    let bar = bar_spans(chunks[2].width as usize, ratio, tick, bar_style);
    f.render_widget(Paragraph::new(Line::from(bar)), chunks[2]);

    f.render_widget(
        Paragraph::new(format!(" {}", status)).style(Styles::secondary()),
        chunks[3],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn width_of(spans: &[Span]) -> usize {
        spans.iter().map(|s| s.content.chars().count()).sum()
    }

    #[test]
    fn test_bar_always_fills_width() {
        for ratio in [0.0, 0.1, 0.5, 0.99, 1.0, 3.0, -1.0] {
            assert_eq!(width_of(&bar_spans(20, ratio, 7, Styles::emphasis())), 20);
        }
    }

    #[test]
    fn test_bar_ends() {
        let empty = bar_spans(10, 0.0, 0, Styles::emphasis());
        assert_eq!(empty.len(), 1);
        assert_eq!(empty[0].content, "·".repeat(10));

        let full = bar_spans(10, 1.0, 0, Styles::emphasis());
        assert_eq!(full.len(), 1);
        assert_eq!(full[0].content, "█".repeat(10));
    }

    #[test]
    fn test_spinner_cycles() {
        assert_eq!(spinner(0), SPINNER_FRAMES[0]);
        assert_eq!(spinner(1), SPINNER_FRAMES[0]);
        assert_eq!(spinner(2), SPINNER_FRAMES[1]);
        assert_eq!(spinner(SPINNER_FRAMES.len() as u64 * 2), SPINNER_FRAMES[0]);
    }
}
