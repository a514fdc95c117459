//! `yt-dlp` process fetcher.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::{DownloadRequest, FetchError, MediaFetcher};
use crate::config::YtbatchConfig;

/// Program name looked up on `PATH` when no explicit binary is configured.
pub const YT_DLP_BINARY: &str = "yt-dlp";

/// Run-wide downloader settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YtDlpOptions {
    /// Retry budget per download, handled inside yt-dlp.
    pub retries: u32,
    /// Resume partial downloads (`--continue`).
    pub resume: bool,
    /// Container for merged video+audio downloads.
    pub merge_output_format: String,
}

impl Default for YtDlpOptions {
    fn default() -> Self {
        Self::from(&YtbatchConfig::default())
    }
}

impl From<&YtbatchConfig> for YtDlpOptions {
    fn from(cfg: &YtbatchConfig) -> Self {
        Self {
            retries: cfg.retries,
            resume: cfg.resume,
            merge_output_format: cfg.merge_output_format.clone(),
        }
    }
}

/// Fetcher that runs the external `yt-dlp` binary once per request.
///
/// Standard streams are inherited so yt-dlp's own progress output reaches
/// the terminal.
#[derive(Debug, Clone)]
pub struct YtDlpFetcher {
    binary_path: PathBuf,
    options: YtDlpOptions,
}

impl YtDlpFetcher {
    pub fn new(binary_path: PathBuf, options: YtDlpOptions) -> Self {
        Self {
            binary_path,
            options,
        }
    }

    /// Looks up `yt-dlp` on `PATH`. `None` if it is not installed.
    pub fn from_path(options: YtDlpOptions) -> Option<Self> {
        which::which(YT_DLP_BINARY)
            .ok()
            .map(|p| Self::new(p, options))
    }

    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    /// Command-line arguments for one request.
    pub fn args(&self, request: &DownloadRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-o".into(),
            request.output_template.clone().into_os_string(),
            "-f".into(),
            request.format_selector.clone().into(),
            "--no-warnings".into(),
            "--retries".into(),
            self.options.retries.to_string().into(),
        ];
        args.push(if self.options.resume {
            "--continue".into()
        } else {
            "--no-continue".into()
        });
        args.push("--merge-output-format".into());
        args.push(self.options.merge_output_format.clone().into());
        if request.overwrite {
            args.push("--force-overwrites".into());
        }
        args.push("--".into());
        args.push(request.url.clone().into());
        args
    }
}

impl MediaFetcher for YtDlpFetcher {
    fn fetch(&self, request: &DownloadRequest) -> Result<(), FetchError> {
        tracing::debug!(
            binary = %self.binary_path.display(),
            template = %request.output_template.display(),
            "spawning yt-dlp"
        );
        let status = Command::new(&self.binary_path)
            .args(self.args(request))
            .status()
            .map_err(|source| FetchError::Spawn {
                program: self.binary_path.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(FetchError::Exit {
                program: self.binary_path.clone(),
                code: status.code(),
            })
        }
    }

    fn name(&self) -> &'static str {
        "yt-dlp"
    }
}
