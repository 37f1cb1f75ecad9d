//! Document interpreter
//!
//! Applies a document's commands to a print session in order, then commits
//! the job (cut + flush). Each command's effect is buffered before the next
//! is applied; the first driver error aborts the rest of the job.

use receiptd_printer::{
    Alignment, BarcodeOptions, PrintResult, Session, TableCell, TextStyle,
};
use serde_json::Value;
use tracing::instrument;

use crate::document::{Command, Document, TableData};

/// Table cell alignment codes
///
/// Same code mapping as the inline `align` command, kept as its own type
/// because cells and the cursor go through different session calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellAlign {
    Left,
    Center,
    Right,
}

impl CellAlign {
    fn from_code(code: &str) -> Self {
        match code {
            "c" => CellAlign::Center,
            "r" => CellAlign::Right,
            _ => CellAlign::Left,
        }
    }
}

impl From<CellAlign> for Alignment {
    fn from(align: CellAlign) -> Self {
        match align {
            CellAlign::Left => Alignment::Left,
            CellAlign::Center => Alignment::Center,
            CellAlign::Right => Alignment::Right,
        }
    }
}

/// Map an inline alignment code; "c" center, "r" right, anything else left
fn alignment_from_code(code: &str) -> Alignment {
    match code {
        "c" => Alignment::Center,
        "r" => Alignment::Right,
        _ => Alignment::Left,
    }
}

/// Map a style code; "b" bold, "u" underline, "n" and unknown codes normal
fn style_from_code(code: &str) -> TextStyle {
    match code {
        "b" => TextStyle::Bold,
        "u" => TextStyle::Underline,
        _ => TextStyle::Normal,
    }
}

/// Apply every command in order, then cut and flush
///
/// All-or-nothing from the caller's perspective: the first error aborts the
/// remaining commands and nothing more reaches the device. Output that the
/// printer already produced physically cannot be recalled.
#[instrument(skip_all, fields(commands = document.commands.len()))]
pub async fn run<S: Session>(document: &Document, session: &mut S) -> PrintResult<()> {
    for command in &document.commands {
        apply(command, session);
    }

    session.cut();
    session.flush().await
}

fn apply<S: Session>(command: &Command, session: &mut S) {
    match command {
        Command::Align(code) => session.align(alignment_from_code(code)),
        Command::Style(style) => {
            session.set_style(style_from_code(&style.kind));
            let size = style.size.unwrap_or(1);
            session.set_scale(size, size);
        }
        Command::Text(text) => session.write_text(text),
        Command::NewLine(lines) => session.line_feed(*lines),
        Command::Barcode(data) => session.draw_barcode(data, &BarcodeOptions::default()),
        Command::QrCode(data) => session.draw_qr_code(data),
        Command::Table(table) => draw_table(table, session),
        // Unrecognized commands produce no output and no error
        Command::Ignored => {}
    }
}

/// Render a table: header row, rule, data rows in input order, rule
fn draw_table<S: Session>(table: &TableData, session: &mut S) {
    let colspan_total: u32 = table.colspans.iter().sum();

    let header: Vec<TableCell> = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, text)| cell(table, i, text.clone(), colspan_total))
        .collect();
    session.draw_table(&header);
    session.draw_rule();

    for row in &table.rows {
        // Positional zip: document key order stands in for column order,
        // key names are ignored
        let cells: Vec<TableCell> = row
            .values()
            .enumerate()
            .map(|(i, value)| cell(table, i, cell_text(value), colspan_total))
            .collect();
        session.draw_table(&cells);
    }
    session.draw_rule();
}

/// Build one cell; out-of-range columns fall back to left / zero width
/// rather than panicking (mismatched lengths render undefined, not fatal)
fn cell(table: &TableData, index: usize, text: String, colspan_total: u32) -> TableCell {
    let code = table
        .alignments
        .get(index)
        .map(String::as_str)
        .unwrap_or_default();
    let colspan = table.colspans.get(index).copied().unwrap_or(0);
    let width = if colspan_total == 0 {
        0.0
    } else {
        colspan as f32 / colspan_total as f32
    };

    TableCell {
        text,
        align: CellAlign::from_code(code).into(),
        width,
    }
}

/// Cell text; non-string values render through their JSON representation
fn cell_text(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}
