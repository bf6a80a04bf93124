//! Fail-fast errors that abort a whole run.
//!
//! Per-row failures are not errors at this level; they are recorded as
//! [`DownloadOutcome`](crate::outcome::DownloadOutcome) values.

use crate::fetcher::FetchError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CaptionsError {
    /// The caption tool could not be started or its version probe failed.
    #[error("caption tool is not available")]
    ToolUnavailable(#[source] FetchError),

    /// The input CSV does not exist.
    #[error("file not found: {}", .0.display())]
    DatasetNotFound(PathBuf),

    /// The input CSV exists but could not be read or parsed.
    #[error("error reading CSV {}", .path.display())]
    DatasetRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The configured URL column is not in the header row.
    #[error("column '{column}' not found in CSV (available columns: {})", .available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },
}
