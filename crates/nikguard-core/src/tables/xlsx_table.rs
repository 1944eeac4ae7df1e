use std::path::{Path, PathBuf};

use arrow::record_batch::RecordBatch;

use crate::errors::EngineError;
use crate::readers::{read_xlsx, SheetSelector};
use crate::tables::{file_name_of, Table};

/// One worksheet of a workbook on disk.
pub struct XlsxTable {
    path: PathBuf,
    table_name: String,
    sheet: SheetSelector,
    header_row: usize,
    loaded_sheet: Option<String>,
}

impl XlsxTable {
    /// First sheet, header on the first row.
    pub fn new(path: impl Into<PathBuf>, table_name: String) -> Self {
        Self {
            path: path.into(),
            table_name,
            sheet: SheetSelector::First,
            header_row: 0,
            loaded_sheet: None,
        }
    }

    pub fn with_sheet(self, sheet: SheetSelector) -> Self {
        Self { sheet, ..self }
    }

    /// Set the 0-based worksheet row holding the column names
    pub fn with_header_row(self, header_row: usize) -> Self {
        Self { header_row, ..self }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Table for XlsxTable {
    fn name(&self) -> &str {
        &self.table_name
    }

    fn file_name(&self) -> String {
        file_name_of(&self.path)
    }

    fn sheet_name(&self) -> Option<&str> {
        self.loaded_sheet.as_deref()
    }

    fn load(&mut self) -> Result<RecordBatch, EngineError> {
        let (sheet_name, batch) = read_xlsx(&self.path, &self.sheet, self.header_row)?;
        self.loaded_sheet = Some(sheet_name);
        Ok(batch)
    }
}
