//! Console presentation of a run. Every function returns the text so the
//! formatting can be tested without capturing stdout.

use capdl_core::config::DatasetPaths;
use capdl_core::outcome::{CategoryFilter, DownloadOutcome, RowReport, RunEvent, RunSummary};
use std::fmt::Write;
use std::path::Path;

const RULE: &str = "============================================================";

pub fn banner(csv_path: &Path, captions_dir: &Path) -> String {
    format!(
        "{RULE}\nYouTube Caption Downloader\n{RULE}\nInput CSV: {}\nCaptions Directory: {}\n{RULE}\n",
        csv_path.display(),
        captions_dir.display()
    )
}

pub fn event(event: &RunEvent) -> String {
    match event {
        RunEvent::Selected {
            filter,
            already_have_text,
            needing_captions,
            ..
        } => selection(*filter, *already_have_text, *needing_captions),
        RunEvent::Row(report) => format!("{}\n", row_line(report)),
    }
}

fn selection(filter: CategoryFilter, already_have_text: usize, needing: usize) -> String {
    let mut out = String::from("\nFiltering for YouTube videos...\n");
    match filter {
        CategoryFilter::KindAndSource => {
            out.push_str("   Filtered: kind='video' AND source='YouTube'\n");
        }
        CategoryFilter::AnyUrl => {
            out.push_str("   Note: 'kind' and 'source' columns not found, processing all URLs\n");
        }
    }
    if already_have_text > 0 {
        let _ = writeln!(
            out,
            "   Skipping {already_have_text} videos (fullText already populated)"
        );
    }
    let _ = writeln!(out, "Found {needing} YouTube videos needing captions");
    if needing > 0 {
        out.push_str("\nDownloading captions...\n\n");
    }
    out
}

pub fn row_line(report: &RowReport) -> String {
    let counter = format!("[{}/{}]", report.position, report.of);
    match (&report.video_id, &report.outcome) {
        (_, DownloadOutcome::Invalid) | (None, _) => format!("  {counter} Invalid URL: {}", report.url),
        (Some(id), outcome) => format!("  {counter} {id}... {}", outcome),
    }
}

pub fn summary(summary: &RunSummary) -> String {
    if summary.nothing_to_do() {
        return "\nAll videos already have captions loaded!\n".to_string();
    }
    format!(
        "\n{RULE}\nSummary:\n   Total YouTube videos: {}\n   Videos needing captions: {}\n   Downloaded: {}\n   Skipped (file exists): {}\n   Errors: {}\n{RULE}\n\nProcessing complete!\n",
        summary.total_matched,
        summary.needing_captions,
        summary.downloaded,
        summary.skipped_existing,
        summary.errors
    )
}

pub fn missing_dataset_hint(csv_path: &Path, paths: &DatasetPaths) -> String {
    format!(
        "File not found: {csv}\n\nExpected CSV at: {csv}\n\nMake sure:\n\
         1. BRAIN_DIR is set correctly (current: {brain_dir})\n\
         2. MIT_BRAIN is set correctly (current: {brain_name})\n\
         3. Scrapers have run and created the CSV file\n",
        csv = csv_path.display(),
        brain_dir = paths.brain_dir.display(),
        brain_name = paths.brain_name,
    )
}

pub fn install_hint(program: &str) -> String {
    format!("Error: {program} is not installed\nInstall with: pip install yt-dlp --break-system-packages")
}
