//! Error types for reading the input table.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal input failures. Row-shape problems are not errors; they are logged and skipped.
#[derive(Debug, Error)]
pub enum InputError {
    /// The input file could not be opened or its first block read.
    #[error("cannot read input file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The header row names no name column or no url column.
    #[error(
        "input must include name/title/video_name and link/url/video_url columns. Found columns: {found:?}"
    )]
    MissingColumns { found: Vec<String> },

    /// A record could not be decoded (e.g. invalid UTF-8).
    #[error("malformed input record: {0}")]
    Record(#[from] csv::Error),
}
