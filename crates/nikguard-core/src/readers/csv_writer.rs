use std::fs::{self, File};
use std::path::Path;

use arrow::csv::WriterBuilder;
use arrow::record_batch::RecordBatch;
use tracing::debug;

use crate::errors::EngineError;

/// Write `batch` as CSV with a header row. Missing cells are written empty.
pub fn write_csv(path: impl AsRef<Path>, batch: &RecordBatch) -> Result<(), EngineError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().with_header(true).build(file);
    writer.write(batch)?;
    debug!(path = %path.display(), rows = batch.num_rows(), "csv written");
    Ok(())
}
