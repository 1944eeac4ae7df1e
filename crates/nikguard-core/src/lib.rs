pub mod audit;
pub mod config;
pub mod engine;
pub mod errors;
pub mod readers;
pub mod results;
pub mod rules;
pub mod tables;
pub mod types;

pub use audit::{AuditEntry, AuditSink, FileAuditSink, MemoryAuditSink};
pub use config::{RunConfig, RunConfigBuilder, SourceInfo};
pub use engine::{classify_column, summarize, Tally, ValidationEngine};
pub use errors::EngineError;
pub use results::{ColumnResult, ValidationResult};
pub use rules::{assign_ranks, classify, normalize, CodeRules};
pub use readers::{FileKind, SheetSelector};
pub use tables::{CsvTable, MemoryTable, Table, XlsxTable};
pub use types::{status_column_name, CleaningMode, RecordSet, StatusCategory, StatusLabel};
