//! Row selection: category filter, then redundancy skip.

use crate::dataset::{Dataset, Row};
use crate::error::CaptionsError;
use crate::outcome::CategoryFilter;

pub const KIND_COLUMN: &str = "kind";
pub const SOURCE_COLUMN: &str = "source";
pub const FULL_TEXT_COLUMN: &str = "fullText";

const VIDEO_KIND: &str = "video";
const YOUTUBE_SOURCE: &str = "YouTube";

/// Rows that still need captions, in dataset order, plus the counts that
/// explain how they were chosen.
#[derive(Debug)]
pub struct Selection<'a> {
    pub filter: CategoryFilter,
    /// Rows kept by the category filter.
    pub total_matched: usize,
    /// Matched rows dropped because their transcript text is already present.
    pub already_have_text: usize,
    pub rows: Vec<&'a Row>,
}

/// Apply the selection policy to `dataset`.
///
/// Fails only when the dataset has rows but no `url_column`.
pub fn select<'a>(dataset: &'a Dataset, url_column: &str) -> Result<Selection<'a>, CaptionsError> {
    if !dataset.is_empty() && !dataset.has_column(url_column) {
        return Err(CaptionsError::MissingColumn {
            column: url_column.to_string(),
            available: dataset.headers().to_vec(),
        });
    }

    let filter = if dataset.has_column(KIND_COLUMN) && dataset.has_column(SOURCE_COLUMN) {
        CategoryFilter::KindAndSource
    } else {
        CategoryFilter::AnyUrl
    };

    let matched: Vec<&Row> = dataset
        .rows()
        .iter()
        .filter(|row| match filter {
            CategoryFilter::KindAndSource => is_youtube_video(row),
            CategoryFilter::AnyUrl => row.get(url_column).is_some_and(|u| !u.is_empty()),
        })
        .collect();
    let total_matched = matched.len();

    let rows: Vec<&Row> = if dataset.has_column(FULL_TEXT_COLUMN) {
        matched.into_iter().filter(|row| !has_full_text(row)).collect()
    } else {
        matched
    };
    let already_have_text = total_matched - rows.len();

    tracing::debug!(
        ?filter,
        total_matched,
        already_have_text,
        needing_captions = rows.len(),
        "selected rows"
    );

    Ok(Selection {
        filter,
        total_matched,
        already_have_text,
        rows,
    })
}

fn is_youtube_video(row: &Row) -> bool {
    row.get(KIND_COLUMN) == Some(VIDEO_KIND) && row.get(SOURCE_COLUMN) == Some(YOUTUBE_SOURCE)
}

fn has_full_text(row: &Row) -> bool {
    row.get(FULL_TEXT_COLUMN)
        .is_some_and(|text| !text.trim().is_empty())
}
