//! CSV loading where every column stays text.
//!
//! Type inference is never used: a numeric-looking NIK would lose its
//! leading zeros or gain a `.0`.
use std::fs::File;
use std::io::{self, Seek};
use std::path::Path;
use std::sync::Arc;

use arrow::compute::concat_batches;
use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use tracing::debug;

use super::BATCH_SIZE;
use crate::errors::EngineError;

/// Rebuild `schema` with every field as nullable `Utf8`.
pub fn text_schema(schema: &Schema) -> Schema {
    let fields: Vec<Field> = schema
        .fields()
        .iter()
        .map(|f| Field::new(f.name(), DataType::Utf8, true))
        .collect();
    Schema::new(fields)
}

/// Header-only schema of a CSV file, all columns as text.
fn csv_generate_schema(file: &mut File) -> Result<SchemaRef, EngineError> {
    let format = Format::default().with_header(true);
    let (schema, _) = format.infer_schema(&mut *file, Some(0))?;
    if schema.fields().is_empty() {
        return Err(EngineError::IoError(io::Error::new(
            io::ErrorKind::InvalidData,
            "CSV file is empty",
        )));
    }
    file.rewind()?;
    Ok(Arc::new(text_schema(&schema)))
}

/// Read a whole CSV file into a single text record set.
///
/// Empty fields are read as missing values.
pub fn read_csv(path: impl AsRef<Path>) -> Result<RecordBatch, EngineError> {
    let path = path.as_ref();
    let mut file = File::open(path)?;
    let schema = csv_generate_schema(&mut file)?;

    let reader = ReaderBuilder::new(Arc::clone(&schema))
        .with_header(true)
        .with_batch_size(BATCH_SIZE)
        .build(file)?;
    let batches = reader.collect::<Result<Vec<_>, _>>()?;
    let batch = concat_batches(&schema, &batches)?;
    debug!(
        path = %path.display(),
        rows = batch.num_rows(),
        columns = batch.num_columns(),
        "csv loaded"
    );
    Ok(batch)
}
