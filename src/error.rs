use thiserror::Error;

pub type VizResult<T> = Result<T, VizError>;

/// User-facing failure kinds. Every variant is caught at the session
/// boundary and surfaced as a status message; nothing is retried
/// automatically.
#[derive(Debug, Error)]
pub enum VizError {
    #[error("uploaded file contained no data")]
    EmptyDataset,

    #[error("could not read file as a spreadsheet: {0}")]
    UnreadableFile(String),

    #[error("invalid x/y axis selection: {column:?} is not a column of the loaded dataset")]
    InvalidAxisSelection { column: String },

    #[error("the selected y-axis column has no numeric data to plot")]
    NoNumericData,

    #[error("failed to render chart: {0}")]
    RenderFailure(String),

    #[error("nothing to export: {0}")]
    ExportFailure(String),

    #[error("history store unavailable: {0}")]
    HistoryUnavailable(String),

    #[error("session has been disposed")]
    SessionDisposed,
}
