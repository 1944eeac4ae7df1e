use std::path::Path;

use arrow::record_batch::RecordBatch;

use crate::errors::EngineError;

mod csv_reader;
mod csv_writer;
mod xlsx_reader;
mod xlsx_writer;

pub use csv_reader::{read_csv, text_schema};
pub use csv_writer::write_csv;
pub use xlsx_reader::{range_to_batch, read_xlsx, SheetSelector};
pub use xlsx_writer::{write_xlsx, DEFAULT_SHEET_NAME};

/// Rows per Arrow batch when reading a CSV file.
const BATCH_SIZE: usize = 64 * 1024;

/// Workbook extensions that can be read. Only `.xlsx` is ever written.
const WORKBOOK_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

/// Tabular file kind, decided by extension. Anything that is not a workbook is CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Workbook,
}

impl FileKind {
    pub fn from_path(path: &Path) -> Self {
        let is_workbook = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| WORKBOOK_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if is_workbook {
            FileKind::Workbook
        } else {
            FileKind::Csv
        }
    }
}

/// Write `batch` in the format implied by the extension of `path`.
///
/// `sheet_name` names the worksheet of a workbook export.
pub fn write_record_set(
    path: impl AsRef<Path>,
    batch: &RecordBatch,
    sheet_name: Option<&str>,
) -> Result<(), EngineError> {
    let path = path.as_ref();
    match FileKind::from_path(path) {
        FileKind::Workbook => write_xlsx(path, batch, sheet_name.unwrap_or(DEFAULT_SHEET_NAME)),
        FileKind::Csv => write_csv(path, batch),
    }
}
