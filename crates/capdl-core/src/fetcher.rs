//! Caption tool capability and the `yt-dlp` process implementation.
//!
//! The dispatcher only depends on [`CaptionFetcher`]; it never spawns
//! processes itself, so tests can substitute a deterministic stub.

use crate::config::ToolConfig;
use crate::storage::CAPTION_FORMAT;
use std::ffi::OsString;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;

/// How much of the tool's stderr is kept for diagnostics.
const STDERR_TAIL_BYTES: usize = 2048;

/// One caption download request.
#[derive(Debug, Clone, Copy)]
pub struct FetchRequest<'a> {
    pub url: &'a str,
    /// Output path without extension; the tool appends `.{language}.srt`.
    pub output_prefix: &'a Path,
    pub language: &'a str,
}

/// How the tool exited. A clean exit does not imply a caption file was written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolExit {
    pub success: bool,
    pub code: Option<i32>,
    /// Tail of the tool's stderr.
    pub stderr: String,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to start `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("`{program} --version` exited with {code:?}")]
    ProbeFailed { program: String, code: Option<i32> },
    #[error("timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),
    #[error("i/o error while waiting for tool")]
    Io(#[source] io::Error),
}

/// Capability to fetch captions for one URL.
pub trait CaptionFetcher {
    /// Check the tool is invocable; returns its version string.
    fn probe(&self) -> impl Future<Output = Result<String, FetchError>> + Send;

    /// Run one download. Returns `Err` only when the tool could not run to
    /// completion (spawn failure, I/O error, timeout).
    fn fetch(
        &self,
        request: &FetchRequest<'_>,
    ) -> impl Future<Output = Result<ToolExit, FetchError>> + Send;
}

/// Argument vector for a captions-only download of `request.url`.
pub fn caption_args(request: &FetchRequest<'_>) -> Vec<OsString> {
    let mut args: Vec<OsString> = [
        "--skip-download",
        "--write-subs",
        "--write-auto-subs",
        "--sub-lang",
        request.language,
        "--sub-format",
        CAPTION_FORMAT,
        "--convert-subs",
        CAPTION_FORMAT,
        "-o",
    ]
    .iter()
    .map(OsString::from)
    .collect();
    args.push(request.output_prefix.as_os_str().to_owned());
    args.push(OsString::from(request.url));
    args
}

/// `yt-dlp` invoked as a child process.
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: PathBuf,
    fetch_timeout: Duration,
    probe_timeout: Duration,
}

impl YtDlp {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        let defaults = ToolConfig::default();
        Self {
            program: program.into(),
            fetch_timeout: Duration::from_secs(defaults.fetch_timeout_secs),
            probe_timeout: Duration::from_secs(defaults.probe_timeout_secs),
        }
    }

    pub fn from_config(cfg: &ToolConfig) -> Self {
        Self {
            program: PathBuf::from(&cfg.program),
            fetch_timeout: Duration::from_secs(cfg.fetch_timeout_secs),
            probe_timeout: Duration::from_secs(cfg.probe_timeout_secs),
        }
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }

    /// Spawn with `args`, wait up to `timeout`. The child is killed if the
    /// timeout elapses.
    async fn run(&self, args: Vec<OsString>, timeout: Duration) -> Result<Output, FetchError> {
        let child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| FetchError::Spawn {
                program: self.program_name(),
                source,
            })?;

        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(res) => res.map_err(FetchError::Io),
            Err(_) => Err(FetchError::Timeout(timeout)),
        }
    }
}

impl CaptionFetcher for YtDlp {
    async fn probe(&self) -> Result<String, FetchError> {
        let output = self
            .run(vec![OsString::from("--version")], self.probe_timeout)
            .await?;
        if !output.status.success() {
            return Err(FetchError::ProbeFailed {
                program: self.program_name(),
                code: output.status.code(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    async fn fetch(&self, request: &FetchRequest<'_>) -> Result<ToolExit, FetchError> {
        tracing::debug!(
            program = %self.program.display(),
            url = request.url,
            prefix = %request.output_prefix.display(),
            "invoking caption tool"
        );
        let output = self.run(caption_args(request), self.fetch_timeout).await?;
        Ok(ToolExit {
            success: output.status.success(),
            code: output.status.code(),
            stderr: stderr_tail(&output.stderr),
        })
    }
}

fn stderr_tail(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim();
    if text.len() <= STDERR_TAIL_BYTES {
        return text.to_string();
    }
    let mut start = text.len() - STDERR_TAIL_BYTES;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    text[start..].to_string()
}
