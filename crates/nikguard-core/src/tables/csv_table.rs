use std::path::{Path, PathBuf};

use arrow::record_batch::RecordBatch;

use crate::errors::EngineError;
use crate::readers::read_csv;
use crate::tables::{file_name_of, Table};

/// A CSV file on disk. The file is read on every `load`.
pub struct CsvTable {
    path: PathBuf,
    table_name: String,
}

impl CsvTable {
    pub fn new(path: impl Into<PathBuf>, table_name: String) -> Self {
        Self {
            path: path.into(),
            table_name,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Table for CsvTable {
    fn name(&self) -> &str {
        &self.table_name
    }

    fn file_name(&self) -> String {
        file_name_of(&self.path)
    }

    fn load(&mut self) -> Result<RecordBatch, EngineError> {
        read_csv(&self.path)
    }
}
