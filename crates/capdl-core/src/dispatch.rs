//! Row dispatcher: probe the tool, select rows, fetch captions one row at a
//! time, and aggregate outcomes into a [`RunSummary`].
//!
//! Only fail-fast conditions surface as `Err`; every per-row failure is
//! recorded as a [`DownloadOutcome`] and processing moves on.

use crate::config::CapdlConfig;
use crate::dataset::{Dataset, Row};
use crate::error::CaptionsError;
use crate::fetcher::{CaptionFetcher, FetchError, FetchRequest};
use crate::filter;
use crate::outcome::{DownloadOutcome, RowReport, RunEvent, RunSummary};
use crate::storage;
use crate::video_id::extract_id;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// Per-run options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub output_dir: PathBuf,
    pub language: String,
    pub url_column: String,
}

impl RunOptions {
    /// Options with the default language (`en`) and URL column (`url`).
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self::from_config(output_dir, &CapdlConfig::default())
    }

    pub fn from_config(output_dir: impl Into<PathBuf>, cfg: &CapdlConfig) -> Self {
        Self {
            output_dir: output_dir.into(),
            language: cfg.language.clone(),
            url_column: cfg.url_column.clone(),
        }
    }
}

/// Check the tool, load the CSV at `csv_path`, and process its rows.
pub async fn process_csv<F: CaptionFetcher>(
    csv_path: &Path,
    opts: &RunOptions,
    fetcher: &F,
    progress: Option<&mpsc::Sender<RunEvent>>,
) -> Result<RunSummary, CaptionsError> {
    ensure_tool(fetcher).await?;
    let dataset = Dataset::load(csv_path)?;
    process_rows(&dataset, opts, fetcher, progress).await
}

/// Check the tool, then process `dataset`.
pub async fn process<F: CaptionFetcher>(
    dataset: &Dataset,
    opts: &RunOptions,
    fetcher: &F,
    progress: Option<&mpsc::Sender<RunEvent>>,
) -> Result<RunSummary, CaptionsError> {
    ensure_tool(fetcher).await?;
    process_rows(dataset, opts, fetcher, progress).await
}

/// Fail the run unless the caption tool answers its version probe.
pub async fn ensure_tool<F: CaptionFetcher>(fetcher: &F) -> Result<String, CaptionsError> {
    let version = fetcher
        .probe()
        .await
        .map_err(CaptionsError::ToolUnavailable)?;
    tracing::debug!(%version, "caption tool available");
    Ok(version)
}

async fn process_rows<F: CaptionFetcher>(
    dataset: &Dataset,
    opts: &RunOptions,
    fetcher: &F,
    progress: Option<&mpsc::Sender<RunEvent>>,
) -> Result<RunSummary, CaptionsError> {
    let selection = filter::select(dataset, &opts.url_column)?;
    let needing = selection.rows.len();
    let mut summary = RunSummary {
        filter: selection.filter,
        total_matched: selection.total_matched,
        already_have_text: selection.already_have_text,
        needing_captions: needing,
        ..Default::default()
    };

    if let Some(tx) = progress {
        let _ = tx
            .send(RunEvent::Selected {
                filter: summary.filter,
                total_matched: summary.total_matched,
                already_have_text: summary.already_have_text,
                needing_captions: needing,
            })
            .await;
    }

    if needing == 0 {
        tracing::info!("no rows need captions");
        return Ok(summary);
    }
    tracing::info!(
        rows = needing,
        output_dir = %opts.output_dir.display(),
        "fetching captions"
    );

    for (idx, row) in selection.rows.into_iter().enumerate() {
        let Some(report) = process_row(row, idx + 1, needing, opts, fetcher).await else {
            continue;
        };
        if let Some(tx) = progress {
            let _ = tx.send(RunEvent::Row(report.clone())).await;
        }
        summary.record(report);
    }

    tracing::info!(
        downloaded = summary.downloaded,
        skipped = summary.skipped_existing,
        errors = summary.errors,
        "run completed"
    );
    Ok(summary)
}

/// Handle one selected row. Rows without a URL produce no report.
async fn process_row<F: CaptionFetcher>(
    row: &Row,
    position: usize,
    of: usize,
    opts: &RunOptions,
    fetcher: &F,
) -> Option<RowReport> {
    let url = row.get(&opts.url_column).unwrap_or_default();
    if url.is_empty() {
        tracing::debug!(position, "row has no url, passing over");
        return None;
    }

    let video_id = extract_id(url);
    let outcome = match video_id {
        None => {
            tracing::warn!(position, url, "no video id in url");
            DownloadOutcome::Invalid
        }
        Some(id) if !storage::is_safe_file_stem(id) => {
            tracing::warn!(
                position,
                url,
                video_id = id,
                "video id is not a usable file name"
            );
            DownloadOutcome::Invalid
        }
        Some(id) => fetch_captions(url, id, opts, fetcher).await,
    };

    Some(RowReport {
        position,
        of,
        url: url.to_string(),
        video_id: video_id.map(str::to_string),
        outcome,
    })
}

async fn fetch_captions<F: CaptionFetcher>(
    url: &str,
    video_id: &str,
    opts: &RunOptions,
    fetcher: &F,
) -> DownloadOutcome {
    let expected = storage::caption_path(&opts.output_dir, video_id, &opts.language);
    if storage::caption_exists(&expected).await {
        tracing::debug!(video_id, path = %expected.display(), "caption file exists");
        return DownloadOutcome::AlreadyExists;
    }

    if let Err(e) = storage::ensure_dir(&opts.output_dir).await {
        tracing::warn!(error = %e, dir = %opts.output_dir.display(), "cannot create output dir");
        return DownloadOutcome::Error(format!(
            "cannot create {}: {}",
            opts.output_dir.display(),
            e
        ));
    }

    let prefix = storage::output_prefix(&opts.output_dir, video_id);
    let request = FetchRequest {
        url,
        output_prefix: &prefix,
        language: &opts.language,
    };

    match fetcher.fetch(&request).await {
        Ok(exit) => {
            if exit.success && storage::caption_exists(&expected).await {
                tracing::info!(video_id, path = %expected.display(), "downloaded captions");
                return DownloadOutcome::Downloaded;
            }
            // A failed run and a clean run without subtitles look the same here.
            tracing::info!(
                video_id,
                code = ?exit.code,
                stderr = %exit.stderr,
                "no caption file produced"
            );
            DownloadOutcome::NoCaptionsAvailable
        }
        Err(FetchError::Timeout(after)) => {
            tracing::warn!(video_id, timeout_secs = after.as_secs(), "caption tool timed out");
            DownloadOutcome::Timeout
        }
        Err(e) => {
            tracing::warn!(video_id, error = %e, "caption tool failed");
            DownloadOutcome::Error(error_chain(&e))
        }
    }
}

/// `err` and its sources joined with `: `.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(s) = source {
        msg.push_str(": ");
        msg.push_str(&s.to_string());
        source = s.source();
    }
    msg
}
