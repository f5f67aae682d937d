//! Entry list screen

use crate::menu::{MenuView, RowView};
use crate::tui::{
    theme::Styles,
    widgets::{
        logo::{render_header, HEADER_HEIGHT},
        shortcuts::{get_shortcuts, render_shortcuts},
        storage::{render_storage_panel, PANEL_WIDTH},
    },
};
use crate::viewport::Geometry;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Terminal lines per entry row.
pub const ROW_HEIGHT: u16 = 3;

/// Below this width the storage panel is dropped.
const SIDE_PANEL_MIN_WIDTH: u16 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLayout {
    pub header: Rect,
    pub list: Rect,
    pub side: Option<Rect>,
    pub footer: Rect,
    pub shortcuts: Rect,
}

pub fn layout(area: Rect) -> ListLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(ROW_HEIGHT + 2),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .split(area);

    let (list, side) = if area.width >= SIDE_PANEL_MIN_WIDTH {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(30), Constraint::Length(PANEL_WIDTH)])
            .split(rows[1]);
        (body[0], Some(body[1]))
    } else {
        (rows[1], None)
    };

    ListLayout {
        header: rows[0],
        list,
        side,
        footer: rows[2],
        shortcuts: rows[3],
    }
}

fn list_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border())
        .title(" Installed software ")
}

/// Viewport geometry in terminal rows for a screen of size `area`.
pub fn list_geometry(area: Rect) -> Geometry {
    let inner = list_block().inner(layout(area).list);
    let top = i32::from(inner.y);
    Geometry::new(
        top,
        top + i32::from(inner.height),
        top,
        i32::from(ROW_HEIGHT),
    )
}

pub fn render(f: &mut Frame, view: &MenuView) {
    let layout = layout(f.area());

    render_header(f, layout.header);

    let block = list_block();
    let inner = block.inner(layout.list);
    f.render_widget(block, layout.list);

    if view.rows.is_empty() {
        render_empty(f, inner, view);
    } else {
        for row in &view.rows {
            let Ok(y) = u16::try_from(row.y) else {
                continue;
            };
            let row_area = Rect::new(inner.x, y, inner.width, ROW_HEIGHT).intersection(inner);
            if !row_area.is_empty() {
                render_row(f, row_area, row);
            }
        }
    }

    if let Some(side) = layout.side {
        render_storage_panel(f, side, &view.storage, view.focused);
    }

    render_footer(f, layout.footer, view);
    render_shortcuts(
        f,
        layout.shortcuts,
        &get_shortcuts(view.state, view.sort_label),
    );
}

fn render_empty(f: &mut Frame, area: Rect, view: &MenuView) {
    let lines = match view.scan_error {
        Some(err) => vec![
            Line::from(Span::styled("Could not list installed software", Styles::error())),
            Line::from(Span::styled(err.to_string(), Styles::secondary())),
        ],
        None => vec![Line::from(Span::styled(
            "No installed software found",
            Styles::secondary(),
        ))],
    };
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

pub fn row_lines<'a>(row: &RowView<'a>) -> Vec<Line<'a>> {
    let entry = row.entry;
    let marker = if entry.selected {
        Span::styled("[✓] ", Styles::checked())
    } else {
        Span::styled("[ ] ", Styles::muted())
    };
    let name_style = if entry.is_corrupted() {
        Styles::warning()
    } else {
        Styles::title()
    };

    vec![
        Line::from(vec![
            marker,
            Span::styled(format!(" {:<2} ", row.badge), Styles::badge()),
            Span::raw(" "),
            Span::styled(entry.name.as_str(), name_style),
        ]),
        Line::from(vec![
            Span::raw("        "),
            Span::styled(entry.author.as_str(), Styles::secondary()),
            Span::styled("  •  ", Styles::muted()),
            Span::styled(entry.version.as_str(), Styles::secondary()),
        ]),
        Line::from(vec![
            Span::raw("        "),
            Span::styled(
                format!(
                    "Internal {}  •  Removable {}  •  Total {}",
                    bytesize::to_string(entry.size_internal, true),
                    bytesize::to_string(entry.size_removable, true),
                    bytesize::to_string(entry.size_total, true)
                ),
                Styles::muted(),
            ),
        ]),
    ]
}

fn render_row(f: &mut Frame, area: Rect, row: &RowView) {
    let mut paragraph = Paragraph::new(row_lines(row));
    if row.highlighted {
        paragraph = paragraph.style(Styles::selected());
    }
    f.render_widget(paragraph, area);
}

fn render_footer(f: &mut Frame, area: Rect, view: &MenuView) {
    let mut spans = vec![Span::styled(
        format!(" Selected {} / {}", view.selected_count, view.total_count),
        Styles::emphasis(),
    )];

    if let Some(result) = view.last_result {
        spans.push(Span::styled("   Last delete: ", Styles::muted()));
        spans.push(Span::styled(
            format!("{} removed", result.deleted.len()),
            Styles::success(),
        ));
        if !result.failed.is_empty() {
            spans.push(Span::styled(
                format!(", {} failed", result.failed.len()),
                Styles::error(),
            ));
        }
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
