//! Per-row outcomes and the run summary returned by the dispatcher.

use serde::Serialize;
use std::fmt;

/// Result of processing one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum DownloadOutcome {
    /// The tool ran and the caption file now exists.
    Downloaded,
    /// The caption file was already on disk; the tool was not invoked.
    AlreadyExists,
    /// No video identifier could be extracted from the URL.
    Invalid,
    /// The tool finished but no caption file was written.
    NoCaptionsAvailable,
    /// The tool did not finish within the fetch timeout.
    Timeout,
    /// The tool could not be run, or the output directory could not be created.
    Error(String),
}

/// Summary bucket an outcome is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tally {
    Downloaded,
    Skipped,
    Error,
}

impl DownloadOutcome {
    pub fn tally(&self) -> Tally {
        match self {
            DownloadOutcome::Downloaded => Tally::Downloaded,
            DownloadOutcome::AlreadyExists => Tally::Skipped,
            DownloadOutcome::Invalid
            | DownloadOutcome::NoCaptionsAvailable
            | DownloadOutcome::Timeout
            | DownloadOutcome::Error(_) => Tally::Error,
        }
    }
}

impl fmt::Display for DownloadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadOutcome::Downloaded => write!(f, "Downloaded"),
            DownloadOutcome::AlreadyExists => write!(f, "Skipped (exists)"),
            DownloadOutcome::Invalid => write!(f, "Invalid URL"),
            DownloadOutcome::NoCaptionsAvailable => write!(f, "No captions available"),
            DownloadOutcome::Timeout => write!(f, "Timeout"),
            DownloadOutcome::Error(msg) => write!(f, "Error: {}", msg),
        }
    }
}

/// One attempted row, in processing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowReport {
    /// 1-based position among the rows needing captions.
    pub position: usize,
    /// Number of rows needing captions in this run.
    pub of: usize,
    pub url: String,
    pub video_id: Option<String>,
    pub outcome: DownloadOutcome,
}

/// Which category filter selected the rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    /// `kind == "video"` and `source == "YouTube"`.
    KindAndSource,
    /// No kind/source columns: every row with a non-empty URL.
    #[default]
    AnyUrl,
}

/// Progress event streamed while a run is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// Rows were selected; sent once, before any row is processed.
    Selected {
        filter: CategoryFilter,
        total_matched: usize,
        already_have_text: usize,
        needing_captions: usize,
    },
    /// One row finished.
    Row(RowReport),
}

/// Aggregate counts for one run plus the per-row reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub filter: CategoryFilter,
    /// Rows kept by the category filter.
    pub total_matched: usize,
    /// Matched rows dropped because `fullText` was already populated.
    pub already_have_text: usize,
    pub needing_captions: usize,
    pub downloaded: usize,
    pub skipped_existing: usize,
    pub errors: usize,
    pub rows: Vec<RowReport>,
}

impl RunSummary {
    /// Count `report` and keep it.
    pub fn record(&mut self, report: RowReport) {
        match report.outcome.tally() {
            Tally::Downloaded => self.downloaded += 1,
            Tally::Skipped => self.skipped_existing += 1,
            Tally::Error => self.errors += 1,
        }
        self.rows.push(report);
    }

    /// True when the filters left nothing to download.
    pub fn nothing_to_do(&self) -> bool {
        self.needing_captions == 0
    }
}
