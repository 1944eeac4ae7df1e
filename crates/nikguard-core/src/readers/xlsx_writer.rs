use std::fs;
use std::path::Path;

use arrow::compute;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use arrow_array::{Array, StringArray};
use rust_xlsxwriter::{Format, Workbook};
use tracing::debug;

use crate::errors::EngineError;

/// Sheet name used when the record set did not come from a workbook.
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Excel's "@" number format: the cell is text and is never read back as a number.
const TEXT_FORMAT: &str = "@";

fn cell_position(row: usize, col: usize) -> Result<(u32, u16), EngineError> {
    match (u32::try_from(row), u16::try_from(col)) {
        (Ok(row), Ok(col)) => Ok((row, col)),
        _ => Err(EngineError::InvalidConfig(
            "record set does not fit in a worksheet".to_string(),
        )),
    }
}

/// Write `batch` as a single-sheet workbook with a header row.
///
/// Every cell, headers included, is a text cell. Missing cells stay blank.
pub fn write_xlsx(
    path: impl AsRef<Path>,
    batch: &RecordBatch,
    sheet_name: &str,
) -> Result<(), EngineError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let text = Format::new().set_num_format(TEXT_FORMAT);
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    let schema = batch.schema();
    for (i, field) in schema.fields().iter().enumerate() {
        let (_, col) = cell_position(0, i)?;
        worksheet.write_string_with_format(0, col, field.name(), &text)?;

        let column = compute::cast(batch.column(i).as_ref(), &DataType::Utf8)?;
        let values = column
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| {
                EngineError::TypeCastError(field.name().clone(), "expected Utf8".to_string())
            })?;
        for (r, value) in values.iter().enumerate() {
            if let Some(value) = value {
                let (row, col) = cell_position(r + 1, i)?;
                worksheet.write_string_with_format(row, col, value, &text)?;
            }
        }
    }

    workbook.save(path)?;
    debug!(path = %path.display(), sheet = sheet_name, rows = batch.num_rows(), "workbook written");
    Ok(())
}
