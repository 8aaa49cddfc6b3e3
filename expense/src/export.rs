//! Spreadsheet export of recorded expenses.
//!
//! `aggregate` groups expenses into per-day runs with capped totals, `sheet`
//! lays the rows out and renders them to XLSX, and `archive` bundles the
//! workbook with the receipt images.

pub mod aggregate;
pub mod archive;
pub mod sheet;

pub use aggregate::{aggregate, ExportReport, ExportRow};
pub use archive::{package, RECEIPTS_FOLDER};
pub use sheet::{layout, render_xlsx, SheetLayout};
