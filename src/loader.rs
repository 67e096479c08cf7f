// 📂 Table Loader - CSV → RawTable
// Reads one delimited source file into an untyped header-named table.
// Schema is NOT assumed fixed here: column names vary across vintages of
// the same source, and reconciling them is schema.rs's job.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

// ============================================================================
// RAW TABLE
// ============================================================================

/// An untyped table exactly as read from disk: header names plus string
/// cells. Rows are padded/truncated to the header width so a short CSV
/// record reads as empty cells (missing after coercion) rather than a skew.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();

        RawTable { headers, rows }
    }

    /// Index of an exactly-named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell by row index + column name. None if the column does not exist.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| r[col].as_str())
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Read a table from any reader. Used directly by tests; `load_table` is
/// the file-path entry point.
pub fn read_table<R: Read>(reader: R) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("Failed to read CSV header row")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (line_num, result) in rdr.records().enumerate() {
        let record = result
            .with_context(|| format!("Failed to parse CSV line {}", line_num + 2))?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }

    Ok(RawTable::new(headers, rows))
}

/// Load one source table from disk. An absent or unreadable file is an
/// error here; the pipeline wraps it into its missing-source condition.
pub fn load_table(path: &Path) -> Result<RawTable> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open source file: {}", path.display()))?;

    read_table(file).with_context(|| format!("Failed to read table: {}", path.display()))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_table_basic() {
        let csv = "Year,TFR\n2018,1.14\n2019,1.14\n";
        let table = read_table(Cursor::new(csv)).unwrap();

        assert_eq!(table.headers, vec!["Year", "TFR"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(0, "TFR"), Some("1.14"));
        assert_eq!(table.cell(1, "Year"), Some("2019"));
    }

    #[test]
    fn test_read_table_pads_short_rows() {
        let csv = "Year,TFR\n2018\n2019,1.14,extra\n";
        let table = read_table(Cursor::new(csv)).unwrap();

        // Short row reads as empty cell, long row is truncated to width
        assert_eq!(table.cell(0, "TFR"), Some(""));
        assert_eq!(table.rows[1].len(), 2);
    }

    #[test]
    fn test_read_table_trims_header_whitespace() {
        let csv = " Year , TFR\n2018,1.14\n";
        let table = read_table(Cursor::new(csv)).unwrap();

        assert!(table.has_column("Year"));
        assert!(table.has_column("TFR"));
    }

    #[test]
    fn test_load_table_missing_file() {
        let result = load_table(Path::new("/nonexistent/tfr_cleaned.csv"));
        assert!(result.is_err());

        let msg = format!("{:#}", result.unwrap_err());
        assert!(msg.contains("Failed to open source file"));
    }

    #[test]
    fn test_cell_unknown_column() {
        let csv = "Year\n2018\n";
        let table = read_table(Cursor::new(csv)).unwrap();

        assert_eq!(table.cell(0, "TFR"), None);
        assert!(!table.has_column("TFR"));
    }
}
