//! Worksheet loading where every cell is rendered as text.
//!
//! Cells keep the text the workbook displays for them: integers and whole
//! floats lose nothing, an empty cell is a missing value.
use std::path::Path;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow_array::{ArrayRef, StringArray};
use calamine::{open_workbook_auto, Data, Range, Reader};
use tracing::debug;

use crate::errors::EngineError;

/// Which worksheet of a workbook to read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SheetSelector {
    #[default]
    First,
    /// A sheet name. A number matching no sheet name is read as a 0-based index.
    Name(String),
    Index(usize),
}

impl SheetSelector {
    /// Position of the selected sheet in `names`.
    pub fn resolve(&self, names: &[String]) -> Result<usize, EngineError> {
        match self {
            SheetSelector::First if !names.is_empty() => Ok(0),
            SheetSelector::First => Err(EngineError::SheetNotFound("<first>".to_string())),
            SheetSelector::Index(index) if *index < names.len() => Ok(*index),
            SheetSelector::Index(index) => Err(EngineError::SheetNotFound(index.to_string())),
            SheetSelector::Name(name) => names
                .iter()
                .position(|n| n == name)
                .or_else(|| name.parse::<usize>().ok().filter(|i| *i < names.len()))
                .ok_or_else(|| EngineError::SheetNotFound(name.clone())),
        }
    }
}

impl From<Option<&str>> for SheetSelector {
    fn from(value: Option<&str>) -> Self {
        match value {
            Some(name) => SheetSelector::Name(name.to_string()),
            None => SheetSelector::First,
        }
    }
}

/// Cell as text. Empty cells and empty strings are missing values.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Header names, `Unnamed: <i>` for blank cells and `<name>.<n>` for repeats.
fn header_names(header: &[Data], width: usize) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(width);
    for i in 0..width {
        let base = header
            .get(i)
            .and_then(cell_text)
            .unwrap_or_else(|| format!("Unnamed: {}", i));
        let mut name = base.clone();
        let mut n = 1;
        while names.contains(&name) {
            name = format!("{}.{}", base, n);
            n += 1;
        }
        names.push(name);
    }
    names
}

/// Record set of `range`, the header being worksheet row `header_row` (0-based).
///
/// Rows above the header are skipped, as are fully blank rows below it.
pub fn range_to_batch(range: &Range<Data>, header_row: usize) -> Result<RecordBatch, EngineError> {
    let start_row = match range.start() {
        Some((row, _)) if !range.is_empty() => row as usize,
        _ => {
            return Err(EngineError::InvalidConfig(
                "worksheet is empty".to_string(),
            ))
        }
    };
    let offset = header_row.checked_sub(start_row).ok_or_else(|| {
        EngineError::InvalidConfig(format!("header row {} is empty", header_row + 1))
    })?;

    let width = range.width();
    let mut rows = range.rows().skip(offset);
    let header = rows.next().ok_or_else(|| {
        EngineError::InvalidConfig(format!(
            "header row {} is past the end of the worksheet",
            header_row + 1
        ))
    })?;
    let names = header_names(header, width);

    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); width];
    for row in rows {
        if row.iter().all(|c| cell_text(c).is_none()) {
            continue;
        }
        for (i, column) in columns.iter_mut().enumerate() {
            column.push(row.get(i).and_then(cell_text));
        }
    }

    let fields: Vec<Field> = names
        .iter()
        .map(|n| Field::new(n.as_str(), DataType::Utf8, true))
        .collect();
    let arrays: Vec<ArrayRef> = columns
        .into_iter()
        .map(|values| Arc::new(StringArray::from(values)) as ArrayRef)
        .collect();
    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?)
}

/// Read one worksheet into a text record set.
///
/// Returns the name of the sheet actually read with the record set.
pub fn read_xlsx(
    path: impl AsRef<Path>,
    sheet: &SheetSelector,
    header_row: usize,
) -> Result<(String, RecordBatch), EngineError> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)?;
    let names = workbook.sheet_names();
    let index = sheet.resolve(&names)?;
    let sheet_name = names[index].clone();

    let range = workbook
        .worksheet_range_at(index)
        .ok_or_else(|| EngineError::SheetNotFound(sheet_name.clone()))??;
    let batch = range_to_batch(&range, header_row)?;
    debug!(
        path = %path.display(),
        sheet = %sheet_name,
        rows = batch.num_rows(),
        columns = batch.num_columns(),
        "worksheet loaded"
    );
    Ok((sheet_name, batch))
}
