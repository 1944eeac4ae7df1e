use std::path::Path;

use arrow::record_batch::RecordBatch;

use crate::{config::RunConfig, errors::EngineError, results::ValidationResult};

pub mod csv_table;
pub mod memory_table;
pub mod xlsx_table;

pub use csv_table::CsvTable;
pub use memory_table::MemoryTable;
pub use xlsx_table::XlsxTable;

/// A record set source the engine can validate.
pub trait Table {
    fn name(&self) -> &str;
    /// File the record set is read from, without directories.
    fn file_name(&self) -> String {
        "-".to_string()
    }
    /// Worksheet actually read, known once the table is loaded.
    fn sheet_name(&self) -> Option<&str> {
        None
    }
    /// Load the record set, all columns as text.
    fn load(&mut self) -> Result<RecordBatch, EngineError>;
    /// Load then validate against `config`.
    fn validate(&mut self, config: &RunConfig) -> Result<ValidationResult, EngineError> {
        let batch = self.load()?;
        crate::engine::ValidationEngine::new(config).validate(&batch)
    }
    /// Column names, in record set order.
    fn column_names(&mut self) -> Result<Vec<String>, EngineError> {
        let batch = self.load()?;
        Ok(batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect())
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
