use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Either --config or --input must be given")]
    MissingInput,
    #[error("--input needs at least one --column")]
    NoColumns,
    #[error("{failed} of {total} table(s) could not be validated")]
    TablesFailed { failed: usize, total: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file contains no table")]
    NoTable,
    #[error("Data file not found: '{table_path}'")]
    FileNotFound { table_path: String },
    #[error("Table '{table_name}' lists no column to check")]
    NoColumns { table_name: String },
    #[error("Table '{table_name}' lists column '{column_name}' more than once")]
    RepeatedColumn {
        table_name: String,
        column_name: String,
    },
    #[error("Invalid setting '{setting}' - {message}")]
    InvalidSetting { setting: String, message: String },
}
