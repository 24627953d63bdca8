use serde::{Deserialize, Serialize};

use crate::core::Dataset;
use crate::render::Bitmap;

/// Rows per table page in a document export.
pub const ROWS_PER_PAGE: usize = 25;

/// Paginated report: the chart snapshot followed by the full row/column
/// matrix as fixed-size table pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentExport {
    pub title: String,
    pub image: Bitmap,
    pub columns: Vec<String>,
    pub pages: Vec<TablePage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablePage {
    pub index: usize,
    pub rows: Vec<Vec<String>>,
}

/// Builds the document from the live chart image and the loaded dataset.
/// Cells render through their display text; empty cells become blank
/// fields.
#[must_use]
pub fn build_document(title: &str, image: Bitmap, dataset: &Dataset) -> DocumentExport {
    let width = dataset.column_count();
    let rendered: Vec<Vec<String>> = dataset
        .rows
        .iter()
        .map(|row| {
            (0..width)
                .map(|idx| {
                    row.get(idx)
                        .and_then(|cell| cell.display_text())
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    let pages = rendered
        .chunks(ROWS_PER_PAGE)
        .enumerate()
        .map(|(index, chunk)| TablePage {
            index,
            rows: chunk.to_vec(),
        })
        .collect();

    DocumentExport {
        title: if title.is_empty() {
            "report".to_owned()
        } else {
            title.to_owned()
        },
        image,
        columns: dataset.columns.clone(),
        pages,
    }
}
