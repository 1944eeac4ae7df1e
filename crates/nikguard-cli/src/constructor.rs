use std::path::Path;

use anyhow::{bail, Result};
use nikguard_core::{CsvTable, FileKind, SheetSelector, Table, XlsxTable};

/// Table reading `path`, chosen by extension.
///
/// `header_row` is 1-based. CSV files always have their header on the first row.
pub fn construct_table(
    path: &Path,
    name: &str,
    sheet: Option<&str>,
    header_row: usize,
) -> Result<Box<dyn Table>> {
    if header_row == 0 {
        bail!("Header row of table '{}' must be 1 or more", name);
    }
    match FileKind::from_path(path) {
        FileKind::Workbook => Ok(Box::new(
            XlsxTable::new(path, name.to_string())
                .with_sheet(SheetSelector::from(sheet))
                .with_header_row(header_row - 1),
        )),
        FileKind::Csv => {
            if header_row != 1 {
                bail!(
                    "Table '{}': a header row can only be chosen for workbooks, not '{}'",
                    name,
                    path.display()
                );
            }
            Ok(Box::new(CsvTable::new(path, name.to_string())))
        }
    }
}
