use crate::types::StatusLabel;

/// Length of a NIK code.
pub const DEFAULT_CODE_LENGTH: usize = 16;
/// Trailing `'0'` characters that mark a padded administrative code.
pub const DEFAULT_TRAILING_ZEROS: usize = 2;

/// Structural rules applied to a normalized value.
///
/// The chain is ordered and the first failing rule wins:
/// empty, length, digits, trailing zeros, then uniqueness by rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRules {
    code_length: usize,
    trailing_zeros: usize,
    empty_check: bool,
}

impl Default for CodeRules {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            trailing_zeros: DEFAULT_TRAILING_ZEROS,
            empty_check: true,
        }
    }
}

impl CodeRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the exact number of characters a code must have
    pub fn with_code_length(self, code_length: usize) -> Self {
        Self {
            code_length,
            ..self
        }
    }

    /// Set how many trailing zeros flag a code, 0 disables the check
    pub fn with_trailing_zeros(self, trailing_zeros: usize) -> Self {
        Self {
            trailing_zeros,
            ..self
        }
    }

    /// Report blank values as `Empty` instead of letting them fail the length check
    pub fn with_empty_check(self, empty_check: bool) -> Self {
        Self {
            empty_check,
            ..self
        }
    }

    pub fn code_length(&self) -> usize {
        self.code_length
    }

    pub fn trailing_zeros(&self) -> usize {
        self.trailing_zeros
    }

    pub fn empty_check(&self) -> bool {
        self.empty_check
    }

    pub fn name(&self) -> &'static str {
        "CodeRules"
    }

    /// Classify a normalized value given its occurrence rank.
    pub fn classify(&self, value: &str, rank: usize) -> StatusLabel {
        if self.empty_check && value.is_empty() {
            StatusLabel::Empty
        } else if value.chars().count() != self.code_length {
            StatusLabel::WrongLength
        } else if !value.bytes().all(|b| b.is_ascii_digit()) {
            StatusLabel::NotNumeric
        } else if self.has_trailing_zeros(value) {
            StatusLabel::SuspiciousTrailingZeros
        } else if rank <= 1 {
            StatusLabel::Unique
        } else {
            StatusLabel::Duplicate(rank)
        }
    }

    // Only reached once the value is known to be ASCII digits.
    fn has_trailing_zeros(&self, value: &str) -> bool {
        self.trailing_zeros > 0
            && value.len() >= self.trailing_zeros
            && value.bytes().rev().take(self.trailing_zeros).all(|b| b == b'0')
    }
}

/// Classify with the default NIK rules.
pub fn classify(value: &str, rank: usize) -> StatusLabel {
    CodeRules::default().classify(value, rank)
}
