//! History store collaborator: saved analyses keyed by user.
//!
//! The session only ever calls the three [`HistoryStore`] operations and
//! treats all other persistence as opaque. [`MemoryHistoryStore`] is the
//! in-process implementation used by tests and offline hosts; a remote
//! store implements the same trait over its own transport.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{CellValue, ChartType};
use crate::error::{VizError, VizResult};

/// Submit shape for one saved analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub file_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    pub chart_type: ChartType,
    pub x_axis: String,
    pub y_axis: String,
}

/// Stored analysis with store-assigned identity and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredEntry {
    pub id: String,
    pub user_id: String,
    #[serde(flatten)]
    pub entry: HistoryEntry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl StoredEntry {
    /// Pretty JSON payload for a per-entry download.
    pub fn to_download_json(&self) -> VizResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| VizError::HistoryUnavailable(e.to_string()))
    }
}

/// Slice of the current analysis submitted for best-effort summarization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    pub chart_type: ChartType,
    pub x_axis: String,
    pub y_axis: String,
}

pub trait HistoryStore {
    fn create(&mut self, user_id: &str, entry: HistoryEntry) -> VizResult<StoredEntry>;

    /// Saved analyses for one user, most recent first.
    fn list_by_user(&self, user_id: &str) -> VizResult<Vec<StoredEntry>>;

    /// Best-effort text summary. Callers must treat failure as non-fatal.
    fn summarize(&self, request: &SummaryRequest) -> VizResult<String>;
}

/// In-memory history store.
///
/// Entries keep insertion order; listing reverses it so the most recent
/// save comes first, matching the remote store's contract. `fail_summaries`
/// lets tests exercise the best-effort summary path.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    entries: IndexMap<String, StoredEntry>,
    next_id: u64,
    pub fail_summaries: bool,
}

impl MemoryHistoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&StoredEntry> {
        self.entries.get(id)
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn create(&mut self, user_id: &str, entry: HistoryEntry) -> VizResult<StoredEntry> {
        let id = format!("entry-{}", self.next_id);
        self.next_id += 1;

        let stored = StoredEntry {
            id: id.clone(),
            user_id: user_id.to_owned(),
            entry,
            summary: None,
            created_at: Utc::now(),
        };
        self.entries.insert(id, stored.clone());
        Ok(stored)
    }

    fn list_by_user(&self, user_id: &str) -> VizResult<Vec<StoredEntry>> {
        Ok(self
            .entries
            .values()
            .filter(|e| e.user_id == user_id)
            .rev()
            .cloned()
            .collect())
    }

    fn summarize(&self, request: &SummaryRequest) -> VizResult<String> {
        if self.fail_summaries {
            return Err(VizError::HistoryUnavailable(
                "summarizer offline".to_owned(),
            ));
        }
        Ok(format!(
            "{} chart of {:?} by {:?} over {} rows and {} columns",
            request.chart_type,
            request.y_axis,
            request.x_axis,
            request.rows.len(),
            request.columns.len(),
        ))
    }
}
