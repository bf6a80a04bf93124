//! Deterministic stand-in for the caption tool.
//!
//! Records every URL it is asked to fetch and behaves according to a fixed
//! [`Behavior`], writing the caption file itself when told to succeed.

use capdl_core::fetcher::{CaptionFetcher, FetchError, FetchRequest, ToolExit};
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Exit 0 and write `{prefix}.{lang}.srt`.
    WriteCaption,
    /// Exit 0 without writing anything.
    ExitCleanWithoutFile,
    /// Exit 1 without writing anything.
    ExitFailure,
    /// Write the file but exit 1.
    WriteAndFail,
    /// Report a timeout.
    Timeout,
    /// The program cannot be started.
    SpawnFailure,
    /// `--version` fails; fetch must never be called.
    Unavailable,
}

pub struct StubTool {
    behavior: Behavior,
    calls: Mutex<Vec<String>>,
}

impl StubTool {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// URLs passed to `fetch`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

fn caption_file(request: &FetchRequest<'_>) -> PathBuf {
    let mut name: OsString = request.output_prefix.as_os_str().to_owned();
    name.push(format!(".{}.srt", request.language));
    PathBuf::from(name)
}

fn write_caption(request: &FetchRequest<'_>) {
    std::fs::write(
        caption_file(request),
        "1\n00:00:00,000 --> 00:00:02,000\nhello\n",
    )
    .unwrap();
}

fn exit(success: bool) -> ToolExit {
    ToolExit {
        success,
        code: Some(if success { 0 } else { 1 }),
        stderr: String::new(),
    }
}

impl CaptionFetcher for StubTool {
    async fn probe(&self) -> Result<String, FetchError> {
        match self.behavior {
            Behavior::Unavailable => Err(FetchError::Spawn {
                program: "stub-tool".to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "not installed"),
            }),
            _ => Ok("stub 2024.01.01".to_string()),
        }
    }

    async fn fetch(&self, request: &FetchRequest<'_>) -> Result<ToolExit, FetchError> {
        self.calls.lock().unwrap().push(request.url.to_string());
        match self.behavior {
            Behavior::WriteCaption => {
                write_caption(request);
                Ok(exit(true))
            }
            Behavior::ExitCleanWithoutFile => Ok(exit(true)),
            Behavior::ExitFailure => Ok(exit(false)),
            Behavior::WriteAndFail => {
                write_caption(request);
                Ok(exit(false))
            }
            Behavior::Timeout => Err(FetchError::Timeout(Duration::from_secs(60))),
            Behavior::SpawnFailure => Err(FetchError::Spawn {
                program: "stub-tool".to_string(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
            }),
            Behavior::Unavailable => panic!("fetch called on unavailable tool"),
        }
    }
}
