use serde::{Deserialize, Serialize};

use crate::core::CellValue;
use crate::error::{VizError, VizResult};

static EMPTY_CELL: CellValue = CellValue::Empty;

/// One ingested spreadsheet: ordered header labels plus a matrix of raw
/// cells.
///
/// Header labels are not required to be unique; axis lookup resolves to the
/// first matching column. A dataset is replaced wholesale on the next upload
/// and never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub file_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    /// Builds a dataset, padding short rows with empty trailing cells so
    /// every row is at least as wide as the header.
    ///
    /// Fails with [`VizError::EmptyDataset`] when there are zero data rows.
    pub fn new(
        file_name: impl Into<String>,
        columns: Vec<String>,
        mut rows: Vec<Vec<CellValue>>,
    ) -> VizResult<Self> {
        if rows.is_empty() {
            return Err(VizError::EmptyDataset);
        }

        let width = columns.len();
        for row in &mut rows {
            if row.len() < width {
                row.resize(width, CellValue::Empty);
            }
        }

        Ok(Self {
            file_name: file_name.into(),
            columns,
            rows,
        })
    }

    /// Index of the first column with this header label.
    #[must_use]
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == label)
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Raw cell at `(row, column)`; empty when out of range.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY_CELL)
    }
}
