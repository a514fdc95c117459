//! External download capability.
//!
//! The orchestrator only depends on the [`MediaFetcher`] trait; retrieval,
//! format negotiation and stream merging all happen behind it. The shipped
//! implementation is [`YtDlpFetcher`], which drives the `yt-dlp` program.

mod request;
mod ytdlp;

pub use request::{output_template, DownloadRequest, EXT_PLACEHOLDER};
pub use ytdlp::{YtDlpFetcher, YtDlpOptions, YT_DLP_BINARY};

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single download. Never fatal to the batch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The downloader process could not be started.
    #[error("failed to execute {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The downloader ran and reported failure.
    #[error("{} {}", .program.display(), exit_description(.code))]
    Exit { program: PathBuf, code: Option<i32> },
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exited with status {c}"),
        None => "was terminated by a signal".to_string(),
    }
}

/// Something that can download one media URL to a templated path.
pub trait MediaFetcher {
    /// Downloads `request.url` to `request.output_template`. Blocks until done.
    fn fetch(&self, request: &DownloadRequest) -> Result<(), FetchError>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}
