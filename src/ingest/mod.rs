//! Spreadsheet ingestion contract.
//!
//! An ingestor turns uploaded bytes into a [`Dataset`]: first sheet only,
//! first row as headers, raw cell extraction with no type coercion or
//! schema inference. Failures are terminal for the current upload attempt;
//! nothing retries.

use tracing::debug;

use crate::core::{CellValue, Dataset};
use crate::error::{VizError, VizResult};

pub trait SpreadsheetIngestor {
    fn ingest(&self, file_name: &str, bytes: &[u8]) -> VizResult<Dataset>;
}

/// Delimited-text ingestor, the reference implementation for tests and
/// headless hosts. Real workbook formats live behind the same trait as
/// external collaborators.
///
/// Splits plainly on the delimiter with no quoted-field handling. Cells
/// that parse as numbers ingest as numbers, `true`/`false` as booleans,
/// blanks as empty cells; everything else stays text.
#[derive(Debug, Clone)]
pub struct DelimitedIngestor {
    pub delimiter: char,
}

impl DelimitedIngestor {
    #[must_use]
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }
}

impl Default for DelimitedIngestor {
    fn default() -> Self {
        Self::new(',')
    }
}

impl SpreadsheetIngestor for DelimitedIngestor {
    fn ingest(&self, file_name: &str, bytes: &[u8]) -> VizResult<Dataset> {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| VizError::UnreadableFile("file is not valid UTF-8 text".to_owned()))?;

        let mut lines = text.lines().filter(|line| !line.trim().is_empty());
        let Some(header_line) = lines.next() else {
            return Err(VizError::EmptyDataset);
        };

        let columns: Vec<String> = header_line
            .split(self.delimiter)
            .map(|h| h.trim().to_owned())
            .collect();

        let rows: Vec<Vec<CellValue>> = lines
            .map(|line| line.split(self.delimiter).map(parse_cell).collect())
            .collect();

        debug!(
            file_name,
            columns = columns.len(),
            rows = rows.len(),
            "ingested delimited text"
        );
        Dataset::new(file_name, columns, rows)
    }
}

fn parse_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        return CellValue::Number(n);
    }
    match trimmed {
        "true" => CellValue::Bool(true),
        "false" => CellValue::Bool(false),
        _ => CellValue::Text(trimmed.to_owned()),
    }
}
