//! Non-interactive output for `appsweep list`

use crate::model::Entry;
use crate::scanner::StorageSummary;
use serde::Serialize;
use std::fmt::Write as _;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate a string to a maximum display width (adds ellipsis if needed).
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }

    let ellipsis = "…";
    let target = max_width.saturating_sub(UnicodeWidthStr::width(ellipsis));

    let mut out = String::new();
    let mut w = 0usize;
    for ch in s.chars() {
        let cw = UnicodeWidthChar::width(ch).unwrap_or(0);
        if w + cw > target {
            break;
        }
        out.push(ch);
        w += cw;
    }
    out.push_str(ellipsis);
    out
}

/// Pad/truncate content to a specific display width (Unicode-aware).
fn pad_right_to_width(s: &str, width: usize) -> String {
    let truncated = truncate_to_width(s, width);
    let w = UnicodeWidthStr::width(truncated.as_str());
    format!("{}{}", truncated, " ".repeat(width.saturating_sub(w)))
}

fn pad_left_to_width(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", " ".repeat(width.saturating_sub(w)), s)
}

fn table_row(out: &mut String, cols: &[(String, usize, bool)]) {
    out.push('│');
    for (content, width, right) in cols {
        out.push(' ');
        if *right {
            out.push_str(&pad_left_to_width(content, *width));
        } else {
            out.push_str(&pad_right_to_width(content, *width));
        }
        out.push_str(" │");
    }
    out.push('\n');
}

/// Widths are content widths (excluding the 1-space left/right padding).
fn table_separator(out: &mut String, widths: &[usize], left: &str, mid: &str, right: &str) {
    out.push_str(left);
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            out.push_str(mid);
        }
        out.push_str(&"─".repeat(width + 2));
    }
    out.push_str(right);
    out.push('\n');
}

const NAME_WIDTH: usize = 32;
const AUTHOR_WIDTH: usize = 20;
const SIZE_WIDTH: usize = 10;

/// Render entries as a box-drawn table with a totals line.
pub fn format_table(entries: &[Entry]) -> String {
    let widths = [16, NAME_WIDTH, AUTHOR_WIDTH, 10, SIZE_WIDTH, SIZE_WIDTH, SIZE_WIDTH];
    let mut out = String::new();

    table_separator(&mut out, &widths, "┌", "┬", "┐");
    let header = ["ID", "Name", "Author", "Version", "Internal", "Removable", "Total"];
    let header_cols: Vec<(String, usize, bool)> = header
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (h, w))| (h.to_string(), w, i >= 4))
        .collect();
    table_row(&mut out, &header_cols);
    table_separator(&mut out, &widths, "├", "┼", "┤");

    for entry in entries {
        table_row(
            &mut out,
            &[
                (entry.id.to_string(), widths[0], false),
                (entry.name.clone(), widths[1], false),
                (entry.author.clone(), widths[2], false),
                (entry.version.clone(), widths[3], false),
                (bytesize::to_string(entry.size_internal, true), widths[4], true),
                (bytesize::to_string(entry.size_removable, true), widths[5], true),
                (bytesize::to_string(entry.size_total, true), widths[6], true),
            ],
        );
    }
    table_separator(&mut out, &widths, "└", "┴", "┘");

    let total = entries
        .iter()
        .fold(0u64, |acc, e| acc.saturating_add(e.size_total));
    let _ = writeln!(
        out,
        "{} entries, {} total",
        entries.len(),
        bytesize::to_string(total, true)
    );
    out
}

pub fn print_table(entries: &[Entry]) {
    print!("{}", format_table(entries));
}

#[derive(Debug, Serialize)]
pub struct EntryReport<'a> {
    pub id: String,
    pub name: &'a str,
    pub author: &'a str,
    pub version: &'a str,
    pub size_internal: u64,
    pub size_removable: u64,
    pub size_total: u64,
    pub size_human: String,
    pub corrupted: bool,
}

impl<'a> From<&'a Entry> for EntryReport<'a> {
    fn from(entry: &'a Entry) -> Self {
        Self {
            id: entry.id.to_string(),
            name: &entry.name,
            author: &entry.author,
            version: &entry.version,
            size_internal: entry.size_internal,
            size_removable: entry.size_removable,
            size_total: entry.size_total,
            size_human: bytesize::to_string(entry.size_total, true),
            corrupted: entry.is_corrupted(),
        }
    }
}

#[derive(Debug, Serialize)]
struct StorageReport {
    total: u64,
    free: u64,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    sort: &'static str,
    entries: Vec<EntryReport<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    internal: Option<StorageReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    removable: Option<StorageReport>,
}

pub fn format_json(
    entries: &[Entry],
    sort_label: &'static str,
    storage: &StorageSummary,
) -> anyhow::Result<String> {
    let to_report = |space: Option<crate::inventory::StorageSpace>| {
        space.map(|s| StorageReport {
            total: s.total,
            free: s.free,
        })
    };
    let report = JsonReport {
        version: "1.0",
        sort: sort_label,
        entries: entries.iter().map(EntryReport::from).collect(),
        internal: to_report(storage.internal),
        removable: to_report(storage.removable),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn print_json(
    entries: &[Entry],
    sort_label: &'static str,
    storage: &StorageSummary,
) -> anyhow::Result<()> {
    println!("{}", format_json(entries, sort_label, storage)?);
    Ok(())
}
