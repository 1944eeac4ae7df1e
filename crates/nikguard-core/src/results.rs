use arrow::record_batch::RecordBatch;

use crate::engine::Tally;

/// Outcome of one target column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnResult {
    pub name: String,
    pub status_column: String,
    pub tally: Tally,
}

impl ColumnResult {
    pub fn new(name: String, status_column: String, tally: Tally) -> Self {
        Self {
            name,
            status_column,
            tally,
        }
    }
}

/// Annotated record set plus one tally per target column.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub table_name: String,
    pub total_rows: usize,
    batch: RecordBatch,
    column_results: Vec<ColumnResult>,
}

impl ValidationResult {
    pub fn new(table_name: String, batch: RecordBatch, column_results: Vec<ColumnResult>) -> Self {
        Self {
            table_name,
            total_rows: batch.num_rows(),
            batch,
            column_results,
        }
    }

    /// The input columns followed by the status columns.
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn into_batch(self) -> RecordBatch {
        self.batch
    }

    /// Results in target order.
    pub fn column_results(&self) -> &[ColumnResult] {
        &self.column_results
    }

    pub fn column_result(&self, name: &str) -> Option<&ColumnResult> {
        self.column_results.iter().find(|r| r.name == name)
    }

    /// True when every checked cell is `Unique`.
    pub fn is_passed(&self) -> bool {
        self.column_results.iter().all(|r| r.tally.is_clean())
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use arrow::array::StringArray;
    use arrow::datatypes::{DataType, Field, Schema};

    use super::*;
    use crate::types::StatusLabel;

    fn batch(rows: usize) -> RecordBatch {
        let array = StringArray::from(vec!["x"; rows]);
        let schema = Schema::new(vec![Field::new("NIK", DataType::Utf8, true)]);
        RecordBatch::try_new(Arc::new(schema), vec![Arc::new(array)]).unwrap()
    }

    #[test]
    fn test_validation_result_instanciation() {
        let result = ValidationResult::new("batch-1".to_string(), batch(3), Vec::new());

        assert_eq!(result.table_name, "batch-1");
        assert_eq!(result.total_rows, 3);
        assert!(result.is_passed());
        assert!(result.column_result("NIK").is_none());
    }

    #[test]
    fn test_validation_result_failed() {
        let tally: Tally = [StatusLabel::Unique, StatusLabel::Duplicate(2)]
            .iter()
            .collect();
        let column = ColumnResult::new("NIK".to_string(), "STATUS_NIK".to_string(), tally);
        let result = ValidationResult::new("batch-1".to_string(), batch(2), vec![column]);

        assert!(!result.is_passed());
        assert_eq!(
            result.column_result("NIK").map(|r| r.status_column.as_str()),
            Some("STATUS_NIK")
        );
    }
}
