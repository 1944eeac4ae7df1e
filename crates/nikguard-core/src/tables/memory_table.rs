use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use crate::errors::EngineError;
use crate::tables::Table;

/// A record set already in memory, e.g. handed over by another reader.
pub struct MemoryTable {
    table_name: String,
    batch: RecordBatch,
}

impl MemoryTable {
    pub fn new(table_name: String, batch: RecordBatch) -> Self {
        Self { table_name, batch }
    }

    /// Build from named text columns. `None` cells are missing values.
    pub fn from_columns(
        table_name: String,
        columns: Vec<(&str, Vec<Option<&str>>)>,
    ) -> Result<Self, EngineError> {
        let fields: Vec<Field> = columns
            .iter()
            .map(|(name, _)| Field::new(*name, DataType::Utf8, true))
            .collect();
        let arrays: Vec<ArrayRef> = columns
            .into_iter()
            .map(|(_, values)| Arc::new(StringArray::from(values)) as ArrayRef)
            .collect();
        let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?;
        Ok(Self::new(table_name, batch))
    }
}

impl Table for MemoryTable {
    fn name(&self) -> &str {
        &self.table_name
    }

    fn load(&mut self) -> Result<RecordBatch, EngineError> {
        Ok(self.batch.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfigBuilder;

    #[test]
    fn test_memory_table_validate() {
        let mut table = MemoryTable::from_columns(
            "people".to_string(),
            vec![("NIK", vec![Some("3201010101010001"), Some("3201010101010001")])],
        )
        .unwrap();
        let config = RunConfigBuilder::new().with_target("NIK").build().unwrap();

        let result = table.validate(&config).unwrap();
        assert_eq!(result.total_rows, 2);
        assert_eq!(table.column_names().unwrap(), vec!["NIK".to_string()]);
    }

    #[test]
    fn test_memory_table_mismatched_lengths() {
        let res = MemoryTable::from_columns(
            "people".to_string(),
            vec![("A", vec![Some("1")]), ("B", vec![Some("1"), Some("2")])],
        );
        assert!(matches!(res, Err(EngineError::ArrowError(_))));
    }
}
