use std::{fmt, str::FromStr};

use arrow::record_batch::RecordBatch;

use crate::errors::EngineError;

/// The record set: every column is a nullable `Utf8` array, null being a missing cell.
pub type RecordSet = RecordBatch;

/// Prefix of the status column added for every target column.
pub const STATUS_PREFIX: &str = "STATUS_";

/// Name of the status column produced for `column`.
pub fn status_column_name(column: &str) -> String {
    format!("{}{}", STATUS_PREFIX, column)
}

/// Text cleaning applied to a cell before it is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleaningMode {
    /// Keep the value as is
    Off,
    /// Strip leading and trailing whitespace
    TrimOnly,
    /// Drop a trailing `.0` then every non-digit character
    #[default]
    AggressiveDigitsOnly,
}

impl CleaningMode {
    pub fn name(&self) -> &'static str {
        match self {
            CleaningMode::Off => "off",
            CleaningMode::TrimOnly => "trim",
            CleaningMode::AggressiveDigitsOnly => "aggressive",
        }
    }
}

impl fmt::Display for CleaningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CleaningMode {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "off" | "none" => Ok(CleaningMode::Off),
            "trim" | "trim_only" => Ok(CleaningMode::TrimOnly),
            "aggressive" | "digits" => Ok(CleaningMode::AggressiveDigitsOnly),
            other => Err(EngineError::InvalidConfig(format!(
                "unknown cleaning mode '{}', expected one of: off, trim, aggressive",
                other
            ))),
        }
    }
}

/// Classification outcome for a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusLabel {
    Empty,
    WrongLength,
    NotNumeric,
    SuspiciousTrailingZeros,
    Unique,
    /// Repeat occurrence, carrying its rank (always >= 2)
    Duplicate(usize),
}

impl StatusLabel {
    /// Collapse the label into its tally bucket.
    pub fn category(&self) -> StatusCategory {
        match self {
            StatusLabel::Empty => StatusCategory::Empty,
            StatusLabel::WrongLength => StatusCategory::WrongLength,
            StatusLabel::NotNumeric => StatusCategory::NotNumeric,
            StatusLabel::SuspiciousTrailingZeros => StatusCategory::SuspiciousTrailingZeros,
            StatusLabel::Unique => StatusCategory::Unique,
            StatusLabel::Duplicate(_) => StatusCategory::Duplicate,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, StatusLabel::Unique)
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLabel::Duplicate(rank) => write!(f, "Duplicate rank {}", rank),
            other => f.write_str(other.category().name()),
        }
    }
}

/// Tally bucket. Duplicate ranks share a single bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatusCategory {
    Empty,
    WrongLength,
    NotNumeric,
    SuspiciousTrailingZeros,
    Unique,
    Duplicate,
}

impl StatusCategory {
    pub const COUNT: usize = 6;

    /// Every category, in report order.
    pub const ALL: [StatusCategory; Self::COUNT] = [
        StatusCategory::Empty,
        StatusCategory::WrongLength,
        StatusCategory::NotNumeric,
        StatusCategory::SuspiciousTrailingZeros,
        StatusCategory::Unique,
        StatusCategory::Duplicate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StatusCategory::Empty => "Empty",
            StatusCategory::WrongLength => "WrongLength",
            StatusCategory::NotNumeric => "NotNumeric",
            StatusCategory::SuspiciousTrailingZeros => "SuspiciousTrailingZeros",
            StatusCategory::Unique => "Unique",
            StatusCategory::Duplicate => "Duplicate",
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
