use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::errors::ConfigError;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub run: RunSection,
    #[serde(default)]
    pub table: Vec<Table>,
}

/// Settings shared by every table of the run file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSection {
    pub cleaning: Option<String>,
    pub code_length: Option<usize>,
    pub trailing_zeros: Option<usize>,
    pub empty_check: Option<bool>,
    pub audit_log: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Table {
    pub name: String,
    pub path: String,
    pub columns: Vec<String>,
    pub output: Option<String>,
    /// Worksheet to read from a workbook, by name or 0-based index
    pub sheet: Option<String>,
    /// 1-based row holding the column names
    pub header_row: Option<usize>,
}

pub fn parse_config(path: impl AsRef<Path>) -> Result<Config> {
    let config_path = PathBuf::from(path.as_ref());
    let config_str = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let config: Config = toml::from_str(config_str.as_str())
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;
    check_config(&config)?;
    Ok(config)
}

/// Reject a run file before any table is read.
fn check_config(config: &Config) -> Result<(), ConfigError> {
    if config.table.is_empty() {
        return Err(ConfigError::NoTable);
    }
    for table in &config.table {
        if table.columns.is_empty() {
            return Err(ConfigError::NoColumns {
                table_name: table.name.clone(),
            });
        }
        for (i, column) in table.columns.iter().enumerate() {
            if table.columns[..i].contains(column) {
                return Err(ConfigError::RepeatedColumn {
                    table_name: table.name.clone(),
                    column_name: column.clone(),
                });
            }
        }
        if table.header_row == Some(0) {
            return Err(ConfigError::InvalidSetting {
                setting: format!("{}.header_row", table.name),
                message: "rows are numbered from 1".to_string(),
            });
        }
        if !Path::new(&table.path).exists() {
            return Err(ConfigError::FileNotFound {
                table_path: table.path.clone(),
            });
        }
    }
    Ok(())
}
