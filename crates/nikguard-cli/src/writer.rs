use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use nikguard_core::FileKind;

/// Prefix of the annotated copy's file name.
pub const OUTPUT_PREFIX: &str = "Hasil_";

/// Workbooks are always exported as `.xlsx`, whatever format they were read from.
fn output_file_name(input: &Path) -> String {
    let input = match FileKind::from_path(input) {
        FileKind::Workbook => input.with_extension("xlsx"),
        FileKind::Csv => input.to_path_buf(),
    };
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "result.csv".to_string());
    format!("{}{}", OUTPUT_PREFIX, name)
}

/// Where to write the annotated copy of `input`.
///
/// No path: next to the input. A directory, or a path ending with a
/// separator: inside it. Anything else is a file path whose parents are created.
pub fn resolve_output_path(input: &Path, path: Option<&str>) -> Result<PathBuf> {
    let filename = output_file_name(input);
    let Some(base_path) = path else {
        return Ok(input.with_file_name(filename));
    };
    let path = Path::new(base_path);

    let output_path = if path.exists() {
        if path.is_dir() {
            path.join(&filename)
        } else {
            path.to_path_buf()
        }
    } else if base_path.ends_with('/') || base_path.ends_with('\\') {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        path.join(filename)
    } else {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
        }
        path.to_path_buf()
    };
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_no_argument_writes_next_to_input() {
        let result = resolve_output_path(Path::new("data/people.csv"), None).unwrap();
        assert_eq!(result, PathBuf::from("data/Hasil_people.csv"));
    }

    #[test]
    fn test_workbook_output_is_xlsx() {
        let result = resolve_output_path(Path::new("data/people.xlsx"), None).unwrap();
        assert_eq!(result, PathBuf::from("data/Hasil_people.xlsx"));

        let result = resolve_output_path(Path::new("data/people.xls"), None).unwrap();
        assert_eq!(result, PathBuf::from("data/Hasil_people.xlsx"));
    }

    #[test]
    fn test_existing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path_str = temp_dir.path().to_str().unwrap().to_string();

        let result = resolve_output_path(Path::new("people.csv"), Some(&path_str)).unwrap();

        assert_eq!(result.file_name().unwrap(), "Hasil_people.csv");
        assert!(result.starts_with(temp_dir.path()));
    }

    #[test]
    fn test_existing_file_is_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("existing.csv");
        fs::write(&file_path, "test").unwrap();

        let path_str = file_path.to_str().unwrap().to_string();
        let result = resolve_output_path(Path::new("people.csv"), Some(&path_str)).unwrap();

        assert_eq!(result, file_path);
    }

    #[test]
    fn test_nonexistent_dir_with_trailing_slash() {
        let temp_dir = TempDir::new().unwrap();
        let new_dir = temp_dir.path().join("new_dir/");
        let path_str = format!("{}/", new_dir.to_str().unwrap().trim_end_matches('/'));

        let result = resolve_output_path(Path::new("people.csv"), Some(&path_str)).unwrap();

        assert!(new_dir.is_dir());
        assert_eq!(result.file_name().unwrap(), "Hasil_people.csv");
    }

    #[test]
    fn test_nonexistent_file_creates_parent() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("subdir/report.csv");
        let path_str = file_path.to_str().unwrap().to_string();

        let result = resolve_output_path(Path::new("people.csv"), Some(&path_str)).unwrap();

        assert!(file_path.parent().unwrap().exists());
        assert_eq!(result, file_path);
    }
}
