use crate::domain::capping::DAILY_CAP;
use crate::export::aggregate::{ExportReport, ExportRow};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, XlsxError};
use std::path::Path;

pub const SHEET_NAME: &str = "Meal Expenses";
pub const COLUMN_COUNT: usize = 6;
const COLUMN_WIDTHS: [f64; COLUMN_COUNT] = [15.0, 18.0, 15.0, 15.0, 40.0, 35.0];
/// Amount and Capped Amount.
const NUMERIC_COLUMNS: [usize; 2] = [2, 3];
const AMOUNT_COLUMN: usize = 2;
const NOTE_COLUMN: usize = 1;

static TRAILING_STAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_\d+(\.\w+)$").expect("valid receipt name pattern"));

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Blank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Header,
    Expense,
    /// `over_cap` marks the raw amount cell with the warning colour.
    DailyTotal { over_cap: bool },
    GrandTotal,
    Spacer,
    Note,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub kind: RowKind,
    pub cells: Vec<Cell>,
}

/// Rows and styling of the export sheet, independent of the file format.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub rows: Vec<SheetRow>,
}

impl SheetLayout {
    pub fn kinds(&self) -> Vec<RowKind> {
        self.rows.iter().map(|row| row.kind).collect()
    }
}

pub fn cap_note(currency_label: &str) -> String {
    format!("* Daily claims are capped at {currency_label}{DAILY_CAP:.2}")
}

/// Basename of a stored receipt without its trailing `_<digits>` stamp.
pub fn display_receipt_name(path: &str) -> String {
    let base = Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path);
    TRAILING_STAMP.replace(base, "$1").into_owned()
}

fn text(value: impl Into<String>) -> Cell {
    Cell::Text(value.into())
}

fn or_na(value: &str) -> Cell {
    if value.trim().is_empty() {
        text("N/A")
    } else {
        text(value)
    }
}

pub fn layout(report: &ExportReport, currency_label: &str) -> SheetLayout {
    let mut rows = vec![SheetRow {
        kind: RowKind::Header,
        cells: vec![
            text("Date"),
            text("Day"),
            text(format!("Amount ({currency_label})")),
            text(format!("Capped Amount ({currency_label})")),
            text("Place"),
            text("Receipt File"),
        ],
    }];

    for row in &report.rows {
        rows.push(match row {
            ExportRow::Expense {
                date,
                day,
                amount,
                place,
                receipt_path,
            } => SheetRow {
                kind: RowKind::Expense,
                cells: vec![
                    text(date.format("%Y-%m-%d").to_string()),
                    text(day.as_str()),
                    Cell::Number(*amount),
                    Cell::Blank,
                    or_na(place),
                    receipt_path
                        .as_deref()
                        .map(|path| text(display_receipt_name(path)))
                        .unwrap_or_else(|| text("N/A")),
                ],
            },
            ExportRow::DailyTotal {
                date,
                total,
                claimable,
            } => SheetRow {
                kind: RowKind::DailyTotal {
                    over_cap: *total > DAILY_CAP,
                },
                cells: vec![
                    text(date.format("%Y-%m-%d").to_string()),
                    text("Daily Total"),
                    Cell::Number(*total),
                    Cell::Number(*claimable),
                    Cell::Blank,
                    Cell::Blank,
                ],
            },
            ExportRow::GrandTotal { claimable } => SheetRow {
                kind: RowKind::GrandTotal,
                cells: vec![
                    text("TOTAL"),
                    Cell::Blank,
                    Cell::Blank,
                    Cell::Number(*claimable),
                    Cell::Blank,
                    Cell::Blank,
                ],
            },
        });
    }

    if !report.rows.is_empty() {
        rows.push(SheetRow {
            kind: RowKind::Spacer,
            cells: Vec::new(),
        });
    }

    let mut note = vec![Cell::Blank; COLUMN_COUNT];
    note[NOTE_COLUMN] = text(cap_note(currency_label));
    rows.push(SheetRow {
        kind: RowKind::Note,
        cells: note,
    });

    SheetLayout { rows }
}

struct Styles {
    header: Format,
    expense: Format,
    daily_total: Format,
    grand_total: Format,
    note: Format,
}

impl Styles {
    fn new() -> Styles {
        let grid = Color::RGB(0xD0D0D0);
        let bordered = Format::new()
            .set_border(FormatBorder::Thin)
            .set_border_color(grid);

        Styles {
            header: bordered
                .clone()
                .set_bold()
                .set_background_color(Color::RGB(0xD3D3D3)),
            expense: bordered.clone(),
            daily_total: bordered
                .clone()
                .set_bold()
                .set_background_color(Color::RGB(0xE3F2FD))
                .set_border_bottom(FormatBorder::Medium)
                .set_border_bottom_color(Color::Black),
            grand_total: bordered
                .set_bold()
                .set_background_color(Color::RGB(0xFFEB9C))
                .set_border_top(FormatBorder::Medium)
                .set_border_top_color(Color::Black),
            note: Format::new()
                .set_italic()
                .set_font_size(10)
                .set_align(FormatAlign::Left),
        }
    }

    fn cell_format(&self, kind: RowKind, column: usize) -> Option<Format> {
        let base = match kind {
            RowKind::Header => return Some(self.header.clone()),
            RowKind::Expense => &self.expense,
            RowKind::DailyTotal { .. } => &self.daily_total,
            RowKind::GrandTotal => &self.grand_total,
            RowKind::Note => return (column == NOTE_COLUMN).then(|| self.note.clone()),
            RowKind::Spacer => return None,
        };

        let mut format = base.clone();
        if NUMERIC_COLUMNS.contains(&column) {
            format = format.set_num_format("0.00");
        }
        if kind == (RowKind::DailyTotal { over_cap: true }) && column == AMOUNT_COLUMN {
            format = format.set_font_color(Color::Red);
        }
        Some(format)
    }
}

pub fn render_xlsx(layout: &SheetLayout) -> Result<Vec<u8>, XlsxError> {
    let styles = Styles::new();
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (column, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(column as u16, *width)?;
    }

    for (index, row) in layout.rows.iter().enumerate() {
        let row_number = index as u32;
        for (column_index, cell) in row.cells.iter().enumerate() {
            let column = column_index as u16;
            let Some(format) = styles.cell_format(row.kind, column_index) else {
                continue;
            };
            match cell {
                Cell::Text(value) => {
                    worksheet.write_string_with_format(row_number, column, value, &format)?;
                }
                Cell::Number(value) => {
                    worksheet.write_number_with_format(row_number, column, *value, &format)?;
                }
                Cell::Blank => {
                    worksheet.write_blank(row_number, column, &format)?;
                }
            }
        }
    }

    worksheet.set_freeze_panes(1, 0)?;
    worksheet.autofilter(0, 0, 0, (COLUMN_COUNT - 1) as u16)?;

    workbook.save_to_buffer()
}
