use arrow_array::StringArray;

use crate::types::CleaningMode;

/// Spreadsheet float artifact appended to numbers stored as cells.
const DECIMAL_ARTIFACT: &str = ".0";

/// Normalize a single cell. `None` is a missing cell and always becomes empty text.
pub fn normalize(value: Option<&str>, mode: CleaningMode) -> String {
    let Some(value) = value else {
        return String::new();
    };
    match mode {
        CleaningMode::Off => value.to_string(),
        CleaningMode::TrimOnly => value.trim().to_string(),
        CleaningMode::AggressiveDigitsOnly => {
            // whitespace is dropped below anyway, it must not hide the artifact
            let value = value.trim_end();
            let value = value.strip_suffix(DECIMAL_ARTIFACT).unwrap_or(value);
            value.chars().filter(char::is_ascii_digit).collect()
        }
    }
}

/// Column-level cleaning pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    mode: CleaningMode,
}

impl Normalizer {
    pub fn new(mode: CleaningMode) -> Self {
        Self { mode }
    }

    pub fn name(&self) -> &'static str {
        "Normalizer"
    }

    pub fn mode(&self) -> CleaningMode {
        self.mode
    }

    /// Normalized copy of every cell, in row order. Never contains nulls.
    pub fn normalize_array(&self, array: &StringArray) -> Vec<String> {
        array.iter().map(|v| normalize(v, self.mode)).collect()
    }
}
