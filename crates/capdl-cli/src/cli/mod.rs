//! CLI for capdl.

mod commands;
mod report;

use anyhow::Result;
use capdl_core::config::{self, CapdlConfig, DatasetPaths};
use clap::Parser;
use std::path::PathBuf;

use commands::run_captions;

/// Top-level CLI: one batch run per invocation.
#[derive(Debug, Parser)]
#[command(name = "capdl")]
#[command(
    about = "Download .srt captions for the YouTube videos listed in a CSV",
    long_about = None
)]
pub struct Cli {
    /// CSV file with video URLs [default: <BRAIN_DIR>/<MIT_BRAIN>.csv].
    pub csv_file: Option<PathBuf>,

    /// Directory to save .srt files in [default: <INPUT_DIR>/captions].
    pub captions_dir: Option<PathBuf>,

    /// Directory holding the dataset CSV.
    #[arg(long, env = "BRAIN_DIR", default_value = config::DEFAULT_BRAIN_DIR)]
    pub brain_dir: PathBuf,

    /// Base input directory; captions go in its `captions` subdirectory.
    #[arg(long, env = "INPUT_DIR", default_value = config::DEFAULT_INPUT_DIR)]
    pub input_dir: PathBuf,

    /// Dataset name; the CSV is `<BRAIN_DIR>/<name>.csv`.
    #[arg(long, env = "MIT_BRAIN", default_value = config::DEFAULT_BRAIN_NAME)]
    pub brain_name: String,

    /// Caption language code (overrides config).
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,

    /// CSV column holding the video URL (overrides config).
    #[arg(long, value_name = "COLUMN")]
    pub url_column: Option<String>,

    /// Per-video download timeout in seconds (overrides config).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Subtitle tool program name or path (overrides config).
    #[arg(long, value_name = "PROGRAM")]
    pub tool: Option<String>,

    /// Print the run summary as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = match config::load_or_init() {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!("could not load config, using defaults: {:#}", e);
                CapdlConfig::default()
            }
        };
        let cfg = cli.apply_overrides(cfg);
        tracing::debug!("loaded config: {:?}", cfg);

        run_captions(&cli, &cfg).await
    }

    pub fn dataset_paths(&self) -> DatasetPaths {
        DatasetPaths {
            brain_dir: self.brain_dir.clone(),
            input_dir: self.input_dir.clone(),
            brain_name: self.brain_name.clone(),
        }
    }

    /// Positional CSV path, else the dataset default.
    pub fn csv_path(&self) -> PathBuf {
        self.csv_file
            .clone()
            .unwrap_or_else(|| self.dataset_paths().csv_path())
    }

    /// Positional captions directory, else the dataset default.
    pub fn captions_dir(&self) -> PathBuf {
        self.captions_dir
            .clone()
            .unwrap_or_else(|| self.dataset_paths().captions_dir())
    }

    /// Command-line flags win over the config file.
    pub fn apply_overrides(&self, mut cfg: CapdlConfig) -> CapdlConfig {
        if let Some(language) = &self.language {
            cfg.language = language.clone();
        }
        if let Some(column) = &self.url_column {
            cfg.url_column = column.clone();
        }
        if let Some(secs) = self.timeout {
            cfg.tool.fetch_timeout_secs = secs;
        }
        if let Some(tool) = &self.tool {
            cfg.tool.program = tool.clone();
        }
        cfg
    }
}

#[cfg(test)]
mod tests;
