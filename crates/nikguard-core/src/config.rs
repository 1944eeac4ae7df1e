use crate::{errors::EngineError, rules::CodeRules, types::CleaningMode};

/// Identifies where a record set came from. Only used to attribute audit lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInfo {
    pub file: String,
    pub sheet: String,
}

impl SourceInfo {
    pub fn new(file: impl Into<String>, sheet: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            sheet: sheet.into(),
        }
    }
}

impl Default for SourceInfo {
    fn default() -> Self {
        Self::new("-", "-")
    }
}

/// Immutable settings for one validation run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    targets: Vec<String>,
    cleaning: CleaningMode,
    rules: CodeRules,
    source: SourceInfo,
}

impl RunConfig {
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn cleaning(&self) -> CleaningMode {
        self.cleaning
    }

    pub fn rules(&self) -> &CodeRules {
        &self.rules
    }

    pub fn source(&self) -> &SourceInfo {
        &self.source
    }
}

pub struct RunConfigBuilder {
    targets: Vec<String>,
    cleaning: CleaningMode,
    rules: CodeRules,
    source: SourceInfo,
}

impl Default for RunConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RunConfigBuilder {
    /// Create a new [`RunConfigBuilder`]
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            cleaning: CleaningMode::default(),
            rules: CodeRules::default(),
            source: SourceInfo::default(),
        }
    }

    /// Build a [`RunConfig`]
    ///
    /// Repeated target names are kept once, in first-seen order.
    pub fn build(self) -> Result<RunConfig, EngineError> {
        let mut targets: Vec<String> = Vec::with_capacity(self.targets.len());
        for target in self.targets {
            if !targets.contains(&target) {
                targets.push(target);
            }
        }
        if targets.is_empty() {
            return Err(EngineError::NoTargetColumns);
        }
        Ok(RunConfig {
            targets,
            cleaning: self.cleaning,
            rules: self.rules,
            source: self.source,
        })
    }

    pub fn with_target(mut self, column: impl Into<String>) -> Self {
        self.targets.push(column.into());
        self
    }

    pub fn with_targets<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn with_cleaning(self, cleaning: CleaningMode) -> Self {
        Self { cleaning, ..self }
    }

    pub fn with_rules(self, rules: CodeRules) -> Self {
        Self { rules, ..self }
    }

    pub fn with_source(self, source: SourceInfo) -> Self {
        Self { source, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = RunConfigBuilder::new().with_target("NIK").build().unwrap();
        assert_eq!(config.targets(), &["NIK".to_string()]);
        assert_eq!(config.cleaning(), CleaningMode::AggressiveDigitsOnly);
        assert_eq!(config.rules(), &CodeRules::default());
        assert_eq!(config.source(), &SourceInfo::new("-", "-"));
    }

    #[test]
    fn test_builder_rejects_no_target() {
        let res = RunConfigBuilder::new().build();
        assert!(matches!(res, Err(EngineError::NoTargetColumns)));
    }

    #[test]
    fn test_builder_collapses_repeated_targets() {
        let config = RunConfigBuilder::new()
            .with_targets(["NIK", "NIK_KK", "NIK"])
            .build()
            .unwrap();
        assert_eq!(config.targets(), &["NIK".to_string(), "NIK_KK".to_string()]);
    }

    #[test]
    fn test_builder_overrides() {
        let config = RunConfigBuilder::new()
            .with_target("NIK")
            .with_cleaning(CleaningMode::TrimOnly)
            .with_rules(CodeRules::new().with_trailing_zeros(3))
            .with_source(SourceInfo::new("data.csv", "batch-1"))
            .build()
            .unwrap();
        assert_eq!(config.cleaning(), CleaningMode::TrimOnly);
        assert_eq!(config.rules().trailing_zeros(), 3);
        assert_eq!(config.source().sheet, "batch-1");
    }
}
