pub mod formatters;
pub mod utils;

use nikguard_core::ValidationResult;
pub use formatters::{json::JsonFormatter, stdout::StdOutFormatter};

/// Where a table's result came from and where its annotated copy went.
#[derive(Debug, Clone, Default)]
pub struct TableContext {
    pub file: String,
    pub output: Option<String>,
}

pub trait Reporter {
    fn on_start(&self);
    fn on_table_load(&self, current: usize, total: usize, name: &str);
    fn on_table_result(&mut self, result: &ValidationResult, context: &TableContext);
    fn on_table_error(&mut self, name: &str, message: &str);
    /// Tables by outcome: every cell `Unique`, some cells flagged, not validated at all.
    fn on_summary(&self, clean: usize, with_issues: usize, failed: usize);
}
