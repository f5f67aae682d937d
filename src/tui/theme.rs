//! Terminal colour palette

use ratatui::style::{Color, Modifier, Style};

pub struct Styles;

impl Styles {
    pub fn primary() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn secondary() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn muted() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn emphasis() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warning() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn error() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn success() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn border() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    /// Row under the cursor.
    pub fn selected() -> Style {
        Style::default()
            .bg(Color::Rgb(30, 50, 70))
            .add_modifier(Modifier::BOLD)
    }

    /// Selection marker of a ticked entry.
    pub fn checked() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn badge() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }
}
