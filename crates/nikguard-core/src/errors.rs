use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// The run was started without any column to check
    #[error("No target column selected")]
    NoTargetColumns,

    /// Target column not found in the record set
    #[error("Column '{0}' not found in record set")]
    ColumnNotFound(String),

    /// The column could not be rendered as text
    #[error("Failed to cast column '{0}' to text: {1}")]
    TypeCastError(String, String),

    /// The Arrow kernel produced an error (e.g., schema mismatch)
    #[error("Arrow computation error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// CSV reading, export or audit log IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Workbook could not be opened or one of its sheets could not be read
    #[error("Workbook error: {0}")]
    WorkbookError(#[from] calamine::Error),

    /// The requested worksheet does not exist
    #[error("Sheet '{0}' not found in workbook")]
    SheetNotFound(String),

    /// Annotated workbook could not be written
    #[error("Workbook export error: {0}")]
    XlsxWriteError(#[from] rust_xlsxwriter::XlsxError),

    /// A run setting that cannot be honored
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
