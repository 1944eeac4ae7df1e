use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use nikguard_core::{
    readers::write_record_set, AuditEntry, AuditSink, CleaningMode, CodeRules, FileAuditSink,
    RunConfigBuilder, SourceInfo, Table, ValidationEngine, ValidationResult,
};
use nikguard_reports::{JsonFormatter, Reporter, StdOutFormatter, TableContext};
use tracing::{error, info, warn};

use crate::{
    constructor::construct_table,
    errors::{CliError, ConfigError},
    parser::{parse_config, RunSection, Table as TableConfig},
    writer::resolve_output_path,
    Args, OutputFormat,
};

pub const DEFAULT_AUDIT_LOG: &str = "nikguard_audit.log";

/// A table to check: one CSV file or worksheet and its target columns.
#[derive(Debug, Clone)]
pub(crate) struct Job {
    name: String,
    path: PathBuf,
    columns: Vec<String>,
    output: Option<String>,
    sheet: Option<String>,
    /// 1-based
    header_row: usize,
}

impl From<TableConfig> for Job {
    fn from(table: TableConfig) -> Self {
        Self {
            name: table.name,
            path: PathBuf::from(table.path),
            columns: table.columns,
            output: table.output,
            sheet: table.sheet,
            header_row: table.header_row.unwrap_or(1),
        }
    }
}

/// Flags first, then the `[run]` section, then defaults.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    cleaning: CleaningMode,
    rules: CodeRules,
    audit_log: PathBuf,
}

impl Settings {
    fn resolve(args: &Args, run: &RunSection) -> Result<Self, ConfigError> {
        let cleaning = match (args.cleaning, &run.cleaning) {
            (Some(cleaning), _) => cleaning.into(),
            (None, Some(value)) => {
                value
                    .parse::<CleaningMode>()
                    .map_err(|e| ConfigError::InvalidSetting {
                        setting: "cleaning".to_string(),
                        message: e.to_string(),
                    })?
            }
            (None, None) => CleaningMode::default(),
        };

        let defaults = CodeRules::default();
        let code_length = args
            .code_length
            .or(run.code_length)
            .unwrap_or(defaults.code_length());
        if code_length == 0 {
            return Err(ConfigError::InvalidSetting {
                setting: "code_length".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        let trailing_zeros = args
            .trailing_zeros
            .or(run.trailing_zeros)
            .unwrap_or(defaults.trailing_zeros());
        let empty_check = !args.no_empty_check && run.empty_check.unwrap_or(true);

        let audit_log = args
            .audit_log
            .clone()
            .or_else(|| run.audit_log.clone())
            .unwrap_or_else(|| DEFAULT_AUDIT_LOG.to_string());

        Ok(Self {
            cleaning,
            rules: CodeRules::new()
                .with_code_length(code_length)
                .with_trailing_zeros(trailing_zeros)
                .with_empty_check(empty_check),
            audit_log: PathBuf::from(audit_log),
        })
    }
}

/// Tables by outcome.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    clean: usize,
    with_issues: usize,
    failed: usize,
}

/// Returns true when every checked cell of every table is `Unique`.
pub fn run(args: Args) -> Result<bool> {
    let (run_section, jobs) = match (&args.config, &args.input) {
        (Some(config), _) => {
            let config = parse_config(config)?;
            let jobs: Vec<Job> = config.table.into_iter().map(Job::from).collect();
            (config.run, jobs)
        }
        (None, Some(input)) => {
            if args.columns.is_empty() {
                return Err(CliError::NoColumns.into());
            }
            let job = Job {
                name: args.sheet.clone().unwrap_or_else(|| "-".to_string()),
                path: PathBuf::from(input),
                columns: args.columns.clone(),
                output: args.output_file.clone(),
                sheet: args.sheet.clone(),
                header_row: args.header_row.map_or(1, |row| row as usize),
            };
            (RunSection::default(), vec![job])
        }
        (None, None) => {
            if !args.show_log && !args.clear_log {
                return Err(CliError::MissingInput.into());
            }
            (RunSection::default(), Vec::new())
        }
    };

    let settings = Settings::resolve(&args, &run_section)?;
    let mut sink = FileAuditSink::new(&settings.audit_log);

    if args.clear_log {
        sink.clear().with_context(|| {
            format!("Failed to clear audit log: {}", settings.audit_log.display())
        })?;
        info!(path = %settings.audit_log.display(), "audit log cleared");
    }

    let mut clean = true;
    if !jobs.is_empty() {
        let version = env!("CARGO_PKG_VERSION").to_string();
        let summary = match args.format {
            OutputFormat::Stdout => {
                let mut formatter = StdOutFormatter::new(version);
                formatter.on_start();
                run_tables(&jobs, &settings, &mut formatter, &mut sink)
            }
            OutputFormat::Json => {
                let mut formatter = JsonFormatter::new(version);
                let summary = run_tables(&jobs, &settings, &mut formatter, &mut sink);
                let json = formatter.to_json().context("Failed to serialize report")?;
                match &args.json_file {
                    Some(path) => fs::write(path, json)
                        .with_context(|| format!("Failed to write JSON report: {}", path))?,
                    None => println!("{}", json),
                }
                summary
            }
        };
        if summary.failed > 0 {
            return Err(CliError::TablesFailed {
                failed: summary.failed,
                total: jobs.len(),
            }
            .into());
        }
        clean = summary.with_issues == 0;
    }

    if args.show_log {
        print!("{}", sink.read_all()?);
    }

    Ok(clean)
}

/// Check every table. A failing table is reported and the others still run.
fn run_tables<R: Reporter>(
    jobs: &[Job],
    settings: &Settings,
    reporter: &mut R,
    sink: &mut dyn AuditSink,
) -> Summary {
    let mut summary = Summary::default();
    for (i, job) in jobs.iter().enumerate() {
        reporter.on_table_load(i + 1, jobs.len(), &job.name);
        match check_table(job, settings, sink) {
            Ok((result, context)) => {
                if result.is_passed() {
                    summary.clean += 1;
                } else {
                    summary.with_issues += 1;
                }
                reporter.on_table_result(&result, &context);
            }
            Err(err) => {
                let message = format!("{:#}", err);
                error!(table = %job.name, error = %message, "table failed");
                reporter.on_table_error(&job.name, &message);
                summary.failed += 1;
            }
        }
    }
    reporter.on_summary(summary.clean, summary.with_issues, summary.failed);
    summary
}

/// Validate one table, write its annotated copy, then append the audit line.
///
/// A table that fails leaves neither an annotated copy nor an audit line.
fn check_table(
    job: &Job,
    settings: &Settings,
    sink: &mut dyn AuditSink,
) -> Result<(ValidationResult, TableContext)> {
    let mut table = construct_table(&job.path, &job.name, job.sheet.as_deref(), job.header_row)?;
    let batch = table
        .load()
        .with_context(|| format!("Failed to load table: '{}'", job.name))?;

    // a workbook reports the sheet it was read from, a CSV file its table name
    let sheet = table.sheet_name().unwrap_or(job.name.as_str()).to_string();
    let source = SourceInfo::new(table.file_name(), sheet);
    let config = RunConfigBuilder::new()
        .with_targets(job.columns.iter().cloned())
        .with_cleaning(settings.cleaning)
        .with_rules(settings.rules.clone())
        .with_source(source.clone())
        .build()?;

    let result = ValidationEngine::new(&config)
        .validate(&batch)
        .with_context(|| format!("Failed to validate table: '{}'", job.name))?;

    let output = resolve_output_path(&job.path, job.output.as_deref())?;
    write_record_set(&output, result.batch(), table.sheet_name())
        .with_context(|| format!("Failed to write annotated copy: {}", output.display()))?;
    if let Err(err) = sink.append(&AuditEntry::from_result(&result, &source)) {
        if let Err(remove_err) = fs::remove_file(&output) {
            warn!(output = %output.display(), error = %remove_err, "annotated copy left behind");
        }
        return Err(anyhow::Error::new(err).context("Failed to append to audit log"));
    }
    info!(
        table = %job.name,
        rows = result.total_rows,
        output = %output.display(),
        "table checked"
    );

    Ok((
        result,
        TableContext {
            file: source.file,
            output: Some(output.display().to_string()),
        },
    ))
}

#[cfg(test)]
mod tests {
    use std::{fs, io, path::Path};

    use clap::Parser;
    use nikguard_core::{EngineError, MemoryAuditSink};
    use tempfile::TempDir;

    use super::*;

    fn write_people(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("people.csv");
        fs::write(
            &path,
            "name,NIK\nana,3201010101010001\nbudi,3201010101010001.0\ncitra,123\n",
        )
        .unwrap();
        path
    }

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["nikguard"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    fn job(path: &Path, columns: &[&str]) -> Job {
        Job {
            name: "people".to_string(),
            path: path.to_path_buf(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            output: None,
            sheet: None,
            header_row: 1,
        }
    }

    /// Sink whose every append fails.
    struct FullDiskSink;

    impl AuditSink for FullDiskSink {
        fn append(&mut self, _entry: &AuditEntry) -> Result<(), EngineError> {
            Err(EngineError::IoError(io::Error::other("no space left on device")))
        }
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::resolve(&args(&[]), &RunSection::default()).unwrap();
        assert_eq!(settings.cleaning, CleaningMode::AggressiveDigitsOnly);
        assert_eq!(settings.rules, CodeRules::default());
        assert_eq!(settings.audit_log, PathBuf::from(DEFAULT_AUDIT_LOG));
    }

    #[test]
    fn test_flags_override_run_section() {
        let run = RunSection {
            cleaning: Some("off".to_string()),
            code_length: Some(10),
            trailing_zeros: Some(3),
            empty_check: Some(true),
            audit_log: Some("run.log".to_string()),
        };
        let settings = Settings::resolve(
            &args(&["--cleaning", "trim", "--trailing-zeros", "0", "--no-empty-check"]),
            &run,
        )
        .unwrap();
        assert_eq!(settings.cleaning, CleaningMode::TrimOnly);
        assert_eq!(settings.rules.code_length(), 10);
        assert_eq!(settings.rules.trailing_zeros(), 0);
        assert!(!settings.rules.empty_check());
        assert_eq!(settings.audit_log, PathBuf::from("run.log"));
    }

    #[test]
    fn test_invalid_run_settings() {
        let run = RunSection {
            cleaning: Some("scrub".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            Settings::resolve(&args(&[]), &run),
            Err(ConfigError::InvalidSetting { .. })
        ));
        assert!(Settings::resolve(&args(&["--code-length", "0"]), &RunSection::default()).is_err());
    }

    #[test]
    fn test_run_tables_writes_output_and_audit() {
        let dir = TempDir::new().unwrap();
        let path = write_people(&dir);
        let settings = Settings::resolve(&args(&[]), &RunSection::default()).unwrap();
        let mut reporter = JsonFormatter::new("test".to_string());
        let mut sink = MemoryAuditSink::new();

        let summary = run_tables(&[job(&path, &["NIK"])], &settings, &mut reporter, &mut sink);

        assert_eq!(
            summary,
            Summary {
                clean: 0,
                with_issues: 1,
                failed: 0
            }
        );
        let exported = fs::read_to_string(dir.path().join("Hasil_people.csv")).unwrap();
        assert_eq!(
            exported.lines().collect::<Vec<_>>(),
            vec![
                "name,NIK,STATUS_NIK",
                "ana,3201010101010001,Unique",
                "budi,3201010101010001.0,Duplicate rank 2",
                "citra,123,WrongLength",
            ]
        );
        assert_eq!(sink.lines().len(), 1);
        assert!(sink.lines()[0].contains(
            "FILE: people.csv | SHEET: people | DETAIL: [NIK: WrongLength:1, Unique:1, Duplicate:1]"
        ));
    }

    #[test]
    fn test_run_tables_failing_table_has_no_output() {
        let dir = TempDir::new().unwrap();
        let path = write_people(&dir);
        let settings = Settings::resolve(&args(&[]), &RunSection::default()).unwrap();
        let mut reporter = JsonFormatter::new("test".to_string());
        let mut sink = MemoryAuditSink::new();

        let summary = run_tables(&[job(&path, &["KTP"])], &settings, &mut reporter, &mut sink);

        assert_eq!(summary.failed, 1);
        assert!(!dir.path().join("Hasil_people.csv").exists());
        assert!(sink.lines().is_empty());
        assert!(reporter.to_json().unwrap().contains("'KTP' not found"));
    }

    #[test]
    fn test_failed_audit_append_removes_annotated_copy() {
        let dir = TempDir::new().unwrap();
        let path = write_people(&dir);
        let settings = Settings::resolve(&args(&[]), &RunSection::default()).unwrap();
        let mut reporter = JsonFormatter::new("test".to_string());
        let mut sink = FullDiskSink;

        let summary = run_tables(&[job(&path, &["NIK"])], &settings, &mut reporter, &mut sink);

        assert_eq!(summary.failed, 1);
        assert!(!dir.path().join("Hasil_people.csv").exists());
        assert!(reporter.to_json().unwrap().contains("audit log"));
    }

    #[test]
    fn test_run_tables_workbook_sheet_and_header_row() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("people.xlsx");
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Penerima").unwrap();
        sheet.write_string(0, 0, "Daftar penerima").unwrap();
        sheet.write_string(1, 0, "NIK").unwrap();
        sheet.write_number(2, 0, 3201010101010001.0).unwrap();
        sheet.write_string(3, 0, "3201010101010001").unwrap();
        workbook.save(&path).unwrap();

        let settings = Settings::resolve(&args(&[]), &RunSection::default()).unwrap();
        let mut reporter = JsonFormatter::new("test".to_string());
        let mut sink = MemoryAuditSink::new();
        let job = Job {
            sheet: Some("Penerima".to_string()),
            header_row: 2,
            ..job(&path, &["NIK"])
        };

        let summary = run_tables(&[job], &settings, &mut reporter, &mut sink);

        assert_eq!(summary.with_issues, 1);
        assert!(dir.path().join("Hasil_people.xlsx").exists());
        assert!(sink.lines()[0].contains(
            "FILE: people.xlsx | SHEET: Penerima | DETAIL: [NIK: Unique:1, Duplicate:1]"
        ));
    }

    #[test]
    fn test_run_input_mode_end_to_end() {
        let dir = TempDir::new().unwrap();
        let path = write_people(&dir);
        let log = dir.path().join("audit.log");
        let json = dir.path().join("report.json");
        let out = dir.path().join("out/");

        let clean = run(args(&[
            "--input",
            path.to_str().unwrap(),
            "--column",
            "NIK",
            "--sheet",
            "people",
            "--audit-log",
            log.to_str().unwrap(),
            "--format",
            "json",
            "--json-file",
            json.to_str().unwrap(),
            "--output-file",
            &format!("{}/", out.to_str().unwrap().trim_end_matches('/')),
        ]))
        .unwrap();

        assert!(!clean);
        assert!(out.join("Hasil_people.csv").exists());
        assert_eq!(fs::read_to_string(&log).unwrap().lines().count(), 1);
        assert!(fs::read_to_string(&json).unwrap().contains("\"STATUS_NIK\""));
    }

    #[test]
    fn test_run_clear_log_only() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("audit.log");
        fs::write(&log, "[old] line\n").unwrap();

        let clean = run(args(&["--clear-log", "--audit-log", log.to_str().unwrap()])).unwrap();

        assert!(clean);
        assert_eq!(fs::read_to_string(&log).unwrap(), "");
    }

    #[test]
    fn test_run_without_input() {
        let err = run(args(&[])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::MissingInput)
        ));
    }

    #[test]
    fn test_run_input_without_columns() {
        let err = run(args(&["--input", "people.csv"])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::NoColumns)
        ));
    }
}
