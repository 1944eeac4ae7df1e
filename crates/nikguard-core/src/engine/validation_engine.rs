use std::sync::Arc;

use arrow::{
    compute,
    datatypes::{DataType, Field, FieldRef, Schema},
};
use arrow_array::{Array, ArrayRef, RecordBatch, StringArray};
use tracing::{debug, info, info_span, warn};

use crate::{
    config::RunConfig,
    engine::tally::Tally,
    errors::EngineError,
    results::{ColumnResult, ValidationResult},
    rules::{assign_ranks, CodeRules, Normalizer},
    types::{status_column_name, CleaningMode, StatusCategory, StatusLabel},
};

/// ValidationEngine - classifies the target columns of a record set.
///
/// Runs normalize, rank, then classify on each target column. Columns are
/// independent: every target is read from the input batch, never from a
/// status column produced earlier in the same run.
pub struct ValidationEngine<'a> {
    config: &'a RunConfig,
}

impl<'a> ValidationEngine<'a> {
    pub fn new(config: &'a RunConfig) -> Self {
        Self { config }
    }

    /// Validate a record set and return the annotated copy with its tallies.
    ///
    /// Every target is resolved before any row is processed, so a missing or
    /// unreadable column fails the run without partial output.
    pub fn validate(&self, batch: &RecordBatch) -> Result<ValidationResult, EngineError> {
        let source = self.config.source();
        let _span = info_span!("validate", file = %source.file, sheet = %source.sheet).entered();

        let targets = self.config.targets();
        if targets.is_empty() {
            return Err(EngineError::NoTargetColumns);
        }

        let schema = batch.schema();
        let mut text_columns: Vec<(&str, ArrayRef)> = Vec::with_capacity(targets.len());
        for target in targets {
            let index = schema
                .index_of(target)
                .map_err(|_| EngineError::ColumnNotFound(target.clone()))?;
            let array = as_text(target, batch.column(index))?;
            text_columns.push((target.as_str(), array));
        }
        debug!(
            targets = targets.len(),
            cleaning = %self.config.cleaning(),
            code_length = self.config.rules().code_length(),
            trailing_zeros = self.config.rules().trailing_zeros(),
            "run configuration"
        );

        let mut fields: Vec<FieldRef> = schema.fields().iter().cloned().collect();
        let mut columns: Vec<ArrayRef> = batch.columns().to_vec();
        let mut column_results = Vec::with_capacity(text_columns.len());

        for (name, array) in text_columns {
            let strings = array
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| {
                    EngineError::TypeCastError(name.to_string(), "expected Utf8".to_string())
                })?;
            let (labels, tally) =
                classify_column(strings, self.config.cleaning(), self.config.rules());
            info!(
                column = name,
                rows = tally.total(),
                valid = tally.get(StatusCategory::Unique),
                "column classified"
            );

            let status_name = status_column_name(name);
            let status: ArrayRef = Arc::new(StringArray::from_iter_values(
                labels.iter().map(StatusLabel::to_string),
            ));
            let field = Arc::new(Field::new(status_name.as_str(), DataType::Utf8, false));
            match fields.iter().position(|f| f.name() == &status_name) {
                Some(i) => {
                    warn!(column = %status_name, "replacing existing status column");
                    fields[i] = field;
                    columns[i] = status;
                }
                None => {
                    fields.push(field);
                    columns.push(status);
                }
            }
            column_results.push(ColumnResult::new(name.to_string(), status_name, tally));
        }

        let out_schema = Schema::new_with_metadata(fields, schema.metadata().clone());
        let annotated = RecordBatch::try_new(Arc::new(out_schema), columns)?;

        Ok(ValidationResult::new(
            source.sheet.clone(),
            annotated,
            column_results,
        ))
    }
}

/// Normalize, rank and classify one column.
///
/// Returns one label per row in row order, and the collapsed tally.
pub fn classify_column(
    array: &StringArray,
    mode: CleaningMode,
    rules: &CodeRules,
) -> (Vec<StatusLabel>, Tally) {
    let normalized = Normalizer::new(mode).normalize_array(array);
    let ranks = assign_ranks(normalized.iter().map(String::as_str));

    let mut tally = Tally::new();
    let labels: Vec<StatusLabel> = normalized
        .iter()
        .zip(ranks)
        .map(|(value, rank)| {
            let label = rules.classify(value, rank);
            tally.record(&label);
            label
        })
        .collect();
    (labels, tally)
}

/// Render any column as text. Utf8 is returned as is.
fn as_text(name: &str, array: &ArrayRef) -> Result<ArrayRef, EngineError> {
    if array.data_type() == &DataType::Utf8 {
        return Ok(Arc::clone(array));
    }
    compute::cast(array.as_ref(), &DataType::Utf8)
        .map_err(|e| EngineError::TypeCastError(name.to_string(), e.to_string()))
}
