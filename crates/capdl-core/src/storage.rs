//! Caption file layout on disk.
//!
//! The expected output file is derived from (directory, identifier, language)
//! alone, so the same path is checked before invoking the tool (to skip work)
//! and after it exits (to confirm the download).

use std::io;
use std::path::{Path, PathBuf};

/// Subtitle format requested from the tool and used as the file extension.
pub const CAPTION_FORMAT: &str = "srt";

/// Whether `video_id` can be used as a file name inside the output directory:
/// non-empty, no path separators, not `.` or `..`.
pub fn is_safe_file_stem(video_id: &str) -> bool {
    !video_id.is_empty()
        && video_id != "."
        && video_id != ".."
        && !video_id.contains(['/', '\\', '\0'])
}

/// Path the tool is told to write to; it appends `.{lang}.srt` itself.
pub fn output_prefix(dir: &Path, video_id: &str) -> PathBuf {
    dir.join(video_id)
}

/// Expected caption file: `{dir}/{video_id}.{language}.srt`.
pub fn caption_path(dir: &Path, video_id: &str, language: &str) -> PathBuf {
    dir.join(format!("{video_id}.{language}.{CAPTION_FORMAT}"))
}

/// Whether a caption file is already on disk. Unreadable metadata counts as absent.
pub async fn caption_exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

/// Create the output directory (and parents) if missing.
pub async fn ensure_dir(dir: &Path) -> io::Result<()> {
    tokio::fs::create_dir_all(dir).await
}
