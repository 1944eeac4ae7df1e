use nikguard_core::ValidationResult;
use prettytable::{Cell, Row, Table};

use crate::{
    utils::numbers::{format_numbers, format_percent},
    Reporter, TableContext,
};

pub struct StdOutFormatter {
    intro: String,
    intro_len: usize,
}

impl StdOutFormatter {
    pub fn new(version: String) -> Self {
        let s = format!("NikGuard v{} - Validation Report", version);
        let n = s.len();
        Self {
            intro: s,
            intro_len: n,
        }
    }

    pub fn print_loading_progress(&self, current: usize, total: usize, name: &str) {
        println!("  [{}/{}] {}", current, total, name);
    }

    /// One row per (column, category) hit, in target then category order.
    pub fn render_table(&self, result: &ValidationResult) -> String {
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("Column"),
            Cell::new("Status"),
            Cell::new("Rows"),
            Cell::new("% Rows"),
        ]));

        for column in result.column_results() {
            for (category, count) in column.tally.iter_nonzero() {
                table.add_row(Row::new(vec![
                    Cell::new(&column.name),
                    Cell::new(category.name()),
                    Cell::new(&format_numbers(count)),
                    Cell::new(&format_percent(column.tally.percentage(category))),
                ]));
            }
        }

        table.to_string()
    }

    pub fn print_table_result(&self, result: &ValidationResult, context: &TableContext) {
        let status = if result.is_passed() {
            "CLEAN"
        } else {
            "ISSUES FOUND"
        };
        println!(
            "\n{} [{}] ({} rows) - {}",
            result.table_name,
            context.file,
            format_numbers(result.total_rows),
            status
        );
        print!("{}", self.render_table(result));
        if let Some(output) = &context.output {
            println!("  Annotated copy: {}", output);
        }
    }

    pub fn summary_line(&self, clean: usize, with_issues: usize, failed: usize) -> String {
        let mut line = format!("Result: {} clean, {} with issues", clean, with_issues);
        if failed > 0 {
            line.push_str(&format!(", {} failed", failed));
        }
        line
    }

    pub fn print_summary(&self, clean: usize, with_issues: usize, failed: usize) {
        println!("\n===================================");
        println!("{}", self.summary_line(clean, with_issues, failed));
    }
}

impl Reporter for StdOutFormatter {
    fn on_start(&self) {
        let i = "=".repeat(self.intro_len);

        println!("{}", self.intro);
        println!("{}", i);
    }

    fn on_table_load(&self, current: usize, total: usize, name: &str) {
        self.print_loading_progress(current, total, name);
    }

    fn on_table_result(&mut self, result: &ValidationResult, context: &TableContext) {
        self.print_table_result(result, context);
    }

    fn on_table_error(&mut self, name: &str, message: &str) {
        println!("\n{} - ERROR", name);
        println!("  Error: {}", message);
    }

    fn on_summary(&self, clean: usize, with_issues: usize, failed: usize) {
        self.print_summary(clean, with_issues, failed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_result;

    #[test]
    fn test_render_table_lists_hit_categories() {
        let formatter = StdOutFormatter::new("0.1.0".to_string());
        let rendered = formatter.render_table(&sample_result());

        assert!(rendered.contains("Column"));
        assert!(rendered.contains("WrongLength"));
        assert!(rendered.contains("Duplicate"));
        assert!(rendered.contains("40.00%"));
        assert!(!rendered.contains("NotNumeric"));
    }

    #[test]
    fn test_summary_line_counts_failed_tables_apart() {
        let formatter = StdOutFormatter::new("0.1.0".to_string());
        assert_eq!(
            formatter.summary_line(2, 1, 0),
            "Result: 2 clean, 1 with issues"
        );
        assert_eq!(
            formatter.summary_line(0, 1, 2),
            "Result: 0 clean, 1 with issues, 2 failed"
        );
    }

    #[test]
    fn test_intro() {
        let formatter = StdOutFormatter::new("1.2.3".to_string());
        assert_eq!(formatter.intro, "NikGuard v1.2.3 - Validation Report");
        assert_eq!(formatter.intro_len, formatter.intro.len());
    }
}
