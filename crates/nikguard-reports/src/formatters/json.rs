use chrono::Local;
use nikguard_core::ValidationResult;
use serde::{Deserialize, Serialize};
use serde_json::Error;

use crate::{Reporter, TableContext};

#[derive(Serialize, Deserialize)]
pub struct JsonFormatter {
    version: String,
    timestamp: String,
    tables: Vec<TableFormatter>,
}

#[derive(Serialize, Deserialize)]
struct TableFormatter {
    name: String,
    file: String,
    n_rows: usize,
    pass: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    columns: Vec<ColumnFormatter>,
}

#[derive(Serialize, Deserialize)]
struct ColumnFormatter {
    name: String,
    status_column: String,
    valid_percent: f64,
    categories: Vec<CategoryFormatter>,
}

#[derive(Serialize, Deserialize)]
struct CategoryFormatter {
    name: String,
    count: usize,
    percent: f64,
}

impl JsonFormatter {
    pub fn new(version: String) -> Self {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        Self {
            version,
            timestamp,
            tables: Vec::new(),
        }
    }

    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Reporter for JsonFormatter {
    fn on_start(&self) {}

    fn on_table_load(&self, _current: usize, _total: usize, _name: &str) {}

    fn on_table_result(&mut self, result: &ValidationResult, context: &TableContext) {
        let columns: Vec<ColumnFormatter> = result
            .column_results()
            .iter()
            .map(|c| ColumnFormatter {
                name: c.name.clone(),
                status_column: c.status_column.clone(),
                valid_percent: c.tally.valid_ratio() * 100.,
                categories: c
                    .tally
                    .iter()
                    .map(|(category, count)| CategoryFormatter {
                        name: category.name().to_string(),
                        count,
                        percent: c.tally.percentage(category),
                    })
                    .collect(),
            })
            .collect();
        self.tables.push(TableFormatter {
            name: result.table_name.clone(),
            file: context.file.clone(),
            n_rows: result.total_rows,
            pass: result.is_passed(),
            output: context.output.clone(),
            error: None,
            columns,
        });
    }

    fn on_table_error(&mut self, name: &str, message: &str) {
        self.tables.push(TableFormatter {
            name: name.to_string(),
            file: String::new(),
            n_rows: 0,
            pass: false,
            output: None,
            error: Some(message.to_string()),
            columns: Vec::new(),
        });
    }

    fn on_summary(&self, _clean: usize, _with_issues: usize, _failed: usize) {}
}
