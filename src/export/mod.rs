pub mod csv;
pub mod document;

pub use csv::{dataset_to_csv, split_record};
pub use document::{DocumentExport, ROWS_PER_PAGE, TablePage, build_document};
