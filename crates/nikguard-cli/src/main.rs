mod constructor;
mod errors;
mod logging;
mod parser;
mod runner;
mod writer;

use clap::{Parser, ValueEnum};
use nikguard_core::CleaningMode;

/// Output format for validation results
#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    /// Print results to standard output (human-readable)
    Stdout,
    /// Output results in JSON format
    Json,
}

/// Cleaning applied to every cell before it is checked
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CleaningArg {
    /// Check values exactly as stored
    Off,
    /// Strip surrounding whitespace
    Trim,
    /// Drop a trailing ".0" and every non-digit character
    Aggressive,
}

impl From<CleaningArg> for CleaningMode {
    fn from(value: CleaningArg) -> Self {
        match value {
            CleaningArg::Off => CleaningMode::Off,
            CleaningArg::Trim => CleaningMode::TrimOnly,
            CleaningArg::Aggressive => CleaningMode::AggressiveDigitsOnly,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "nikguard",
    version,
    author = "NikGuard Contributors",
    about = "NikGuard CLI - Identity number (NIK) checker for CSV files",
    long_about = "NikGuard checks identity-number columns of CSV files: exact length, digits only, \
                  suspicious trailing zeros and duplicates. It writes an annotated copy with one \
                  STATUS_<column> per checked column and appends a line to an audit log.\n\n\
                  Example usage:\n  \
                  nikguard --input people.csv --column NIK\n  \
                  nikguard --config run.toml --format json"
)]
struct Args {
    /// Path to the TOML run file listing the tables to check
    #[arg(short, long, value_name = "FILE", conflicts_with = "input")]
    config: Option<String>,

    /// CSV file or workbook (.xlsx, .xlsm, .xls, .ods) to check
    #[arg(short, long, value_name = "FILE")]
    input: Option<String>,

    /// Column holding identity numbers (repeat for several columns)
    #[arg(long = "column", value_name = "NAME", conflicts_with = "config")]
    columns: Vec<String>,

    /// Worksheet to read, by name or 0-based index (default: first sheet).
    /// For CSV input this is only the SHEET label of the audit log
    #[arg(long, value_name = "SHEET", conflicts_with = "config")]
    sheet: Option<String>,

    /// Row holding the column names, counted from 1 (workbooks only)
    #[arg(
        long,
        value_name = "N",
        conflicts_with = "config",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    header_row: Option<u32>,

    /// Cleaning mode (default: aggressive)
    #[arg(long, value_enum)]
    cleaning: Option<CleaningArg>,

    /// Required number of digits (default: 16)
    #[arg(long, value_name = "N")]
    code_length: Option<usize>,

    /// Trailing zeros that flag a code, 0 disables the check (default: 2)
    #[arg(long, value_name = "N")]
    trailing_zeros: Option<usize>,

    /// Report blank cells as WrongLength instead of Empty
    #[arg(long)]
    no_empty_check: bool,

    /// Where to write the annotated copy (file or directory); a .xlsx path writes a workbook
    #[arg(long, value_name = "PATH", conflicts_with = "config")]
    output_file: Option<String>,

    /// Audit log file (default: nikguard_audit.log)
    #[arg(long, value_name = "PATH")]
    audit_log: Option<String>,

    /// Output format for validation results
    #[arg(short, long, value_enum, default_value = "stdout")]
    format: OutputFormat,

    /// Write the JSON report to this file instead of stdout
    #[arg(long, value_name = "PATH")]
    json_file: Option<String>,

    /// Exit with status 2 when any checked cell is not Unique
    #[arg(long)]
    strict: bool,

    /// Print the audit log
    #[arg(long)]
    show_log: bool,

    /// Truncate the audit log to empty
    #[arg(long)]
    clear_log: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Enable debug mode with detailed error chains
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    let debug = args.debug;
    let strict = args.strict;
    match runner::run(args) {
        Ok(clean) => {
            if strict && !clean {
                std::process::exit(2);
            }
        }
        Err(err) => {
            if debug {
                eprintln!("Error: {:?}", err);
            } else {
                eprintln!("Error: {:#}", err);
                eprintln!("\nHint: Run with --debug flag for detailed error chains");
            }
            std::process::exit(1);
        }
    }
}
