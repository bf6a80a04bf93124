//! `capdl [CSV_FILE] [CAPTIONS_DIR]` – fetch captions for every eligible row.

use anyhow::Result;
use capdl_core::config::CapdlConfig;
use capdl_core::dispatch::{self, RunOptions};
use capdl_core::error::CaptionsError;
use capdl_core::fetcher::YtDlp;
use capdl_core::outcome::RunEvent;

use crate::cli::report;
use crate::cli::Cli;

pub async fn run_captions(cli: &Cli, cfg: &CapdlConfig) -> Result<()> {
    let csv_path = cli.csv_path();
    let captions_dir = cli.captions_dir();

    if !csv_path.exists() {
        eprint!(
            "{}",
            report::missing_dataset_hint(&csv_path, &cli.dataset_paths())
        );
        return Err(CaptionsError::DatasetNotFound(csv_path).into());
    }

    let tool = YtDlp::from_config(&cfg.tool);
    let opts = RunOptions::from_config(&captions_dir, cfg);

    let result = if cli.json {
        dispatch::process_csv(&csv_path, &opts, &tool, None).await
    } else {
        print!("{}", report::banner(&csv_path, &captions_dir));

        let (progress_tx, mut progress_rx) = tokio::sync::mpsc::channel::<RunEvent>(16);
        let progress_handle = tokio::spawn(async move {
            while let Some(event) = progress_rx.recv().await {
                print!("{}", report::event(&event));
            }
        });

        let result = dispatch::process_csv(&csv_path, &opts, &tool, Some(&progress_tx)).await;
        drop(progress_tx);
        let _ = progress_handle.await;
        result
    };

    let summary = match result {
        Ok(summary) => summary,
        Err(err) => {
            if matches!(err, CaptionsError::ToolUnavailable(_)) {
                eprintln!("{}", report::install_hint(&cfg.tool.program));
            }
            return Err(err.into());
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", report::summary(&summary));
    }
    tracing::info!(
        downloaded = summary.downloaded,
        skipped = summary.skipped_existing,
        errors = summary.errors,
        "capdl run finished"
    );
    Ok(())
}
