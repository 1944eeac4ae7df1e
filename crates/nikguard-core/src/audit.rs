//! Append-only audit trail, one line per validation run.
//!
//! Line format:
//!
//! ```text
//! [2026-10-18 09:30:00] FILE: data.csv | SHEET: batch-1 | DETAIL: [NIK: Unique:3, Duplicate:1] [NIK_KK: WrongLength:4]
//! ```
use std::{
    fmt,
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDateTime};

use crate::{config::SourceInfo, engine::Tally, errors::EngineError, results::ValidationResult};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One run, as written to the audit log.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub timestamp: NaiveDateTime,
    pub file: String,
    pub sheet: String,
    pub columns: Vec<(String, Tally)>,
}

impl AuditEntry {
    pub fn new(timestamp: NaiveDateTime, source: &SourceInfo, columns: Vec<(String, Tally)>) -> Self {
        Self {
            timestamp,
            file: source.file.clone(),
            sheet: source.sheet.clone(),
            columns,
        }
    }

    /// Entry for `result`, stamped with the local time.
    pub fn from_result(result: &ValidationResult, source: &SourceInfo) -> Self {
        let columns = result
            .column_results()
            .iter()
            .map(|r| (r.name.clone(), r.tally.clone()))
            .collect();
        Self::new(Local::now().naive_local(), source, columns)
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] FILE: {} | SHEET: {} | DETAIL:",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.file,
            self.sheet
        )?;
        for (name, tally) in &self.columns {
            let detail: Vec<String> = tally
                .iter_nonzero()
                .map(|(category, count)| format!("{}:{}", category, count))
                .collect();
            write!(f, " [{}: {}]", name, detail.join(", "))?;
        }
        Ok(())
    }
}

/// Destination of audit entries. Entries are only ever appended.
pub trait AuditSink {
    fn append(&mut self, entry: &AuditEntry) -> Result<(), EngineError>;
}

/// Audit log backed by a text file.
#[derive(Debug, Clone)]
pub struct FileAuditSink {
    path: PathBuf,
}

impl FileAuditSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whole log content, empty if the log was never written.
    pub fn read_all(&self) -> Result<String, EngineError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Truncate the log to empty.
    pub fn clear(&self) -> Result<(), EngineError> {
        File::create(&self.path)?;
        Ok(())
    }
}

impl AuditSink for FileAuditSink {
    fn append(&mut self, entry: &AuditEntry) -> Result<(), EngineError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

/// In-memory audit log.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuditSink {
    lines: Vec<String>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl AuditSink for MemoryAuditSink {
    fn append(&mut self, entry: &AuditEntry) -> Result<(), EngineError> {
        self.lines.push(entry.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use super::*;
    use crate::types::StatusLabel;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn entry() -> AuditEntry {
        let nik: Tally = [
            StatusLabel::Unique,
            StatusLabel::Unique,
            StatusLabel::Duplicate(2),
            StatusLabel::Duplicate(3),
            StatusLabel::WrongLength,
        ]
        .iter()
        .collect();
        let kk: Tally = [StatusLabel::Empty].iter().collect();
        AuditEntry::new(
            timestamp(),
            &SourceInfo::new("data.csv", "batch-1"),
            vec![("NIK".to_string(), nik), ("NIK_KK".to_string(), kk)],
        )
    }

    #[test]
    fn test_entry_line_format() {
        assert_eq!(
            entry().to_string(),
            "[2026-10-18 09:30:00] FILE: data.csv | SHEET: batch-1 | DETAIL: \
             [NIK: WrongLength:1, Unique:2, Duplicate:2] [NIK_KK: Empty:1]"
        );
    }

    #[test]
    fn test_entry_with_empty_column() {
        let entry = AuditEntry::new(
            timestamp(),
            &SourceInfo::default(),
            vec![("NIK".to_string(), Tally::new())],
        );
        assert_eq!(
            entry.to_string(),
            "[2026-10-18 09:30:00] FILE: - | SHEET: - | DETAIL: [NIK: ]"
        );
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemoryAuditSink::new();
        sink.append(&entry()).unwrap();
        sink.append(&entry()).unwrap();
        assert_eq!(sink.lines().len(), 2);
        sink.clear();
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn test_file_sink_appends_lines() {
        let dir = tempdir().unwrap();
        let mut sink = FileAuditSink::new(dir.path().join("logs/audit.log"));
        assert_eq!(sink.read_all().unwrap(), "");

        sink.append(&entry()).unwrap();
        sink.append(&entry()).unwrap();

        let content = sink.read_all().unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[2026-10-18 09:30:00] FILE: data.csv"));
    }

    #[test]
    fn test_file_sink_clear() {
        let dir = tempdir().unwrap();
        let mut sink = FileAuditSink::new(dir.path().join("audit.log"));
        sink.append(&entry()).unwrap();
        sink.clear().unwrap();
        assert_eq!(sink.read_all().unwrap(), "");

        sink.append(&entry()).unwrap();
        assert_eq!(sink.read_all().unwrap().lines().count(), 1);
    }
}
