//! Batch orchestration: one download attempt per entry, strictly in order.
//!
//! A failing entry never stops the batch. Only an undecodable input record
//! aborts it, since the rest of the table can no longer be trusted.

mod item;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::fetch::MediaFetcher;
use crate::input::{Entry, InputError};

pub use item::process_entry;

/// Run-wide settings shared by every entry.
#[derive(Debug, Clone)]
pub struct BatchSettings {
    pub output_dir: PathBuf,
    pub format_selector: String,
    pub overwrite: bool,
}

/// Terminal state of one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// A file with the same base name was already present.
    Skipped { existing: PathBuf },
    Downloaded,
    Failed { reason: String },
}

/// Tally of a finished batch. `processed` counts every entry attempted,
/// including skipped and failed ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchReport {
    fn record(&mut self, outcome: &ItemOutcome) {
        self.processed += 1;
        match outcome {
            ItemOutcome::Skipped { .. } => self.skipped += 1,
            ItemOutcome::Downloaded => self.downloaded += 1,
            ItemOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

/// Creates the output directory (and parents) if missing.
pub fn prepare_output_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}

/// Processes every entry in order and returns the tally.
///
/// Errors only when the entry source yields an [`InputError`].
pub fn run_batch<I, F>(
    entries: I,
    fetcher: &F,
    settings: &BatchSettings,
) -> Result<BatchReport, InputError>
where
    I: IntoIterator<Item = Result<Entry, InputError>>,
    F: MediaFetcher + ?Sized,
{
    let mut report = BatchReport::default();
    tracing::info!(
        fetcher = fetcher.name(),
        output_dir = %settings.output_dir.display(),
        overwrite = settings.overwrite,
        "batch started"
    );

    for entry in entries {
        let entry = entry?;
        let outcome = process_entry(fetcher, settings, &entry);
        report.record(&outcome);
    }

    tracing::info!(
        processed = report.processed,
        downloaded = report.downloaded,
        skipped = report.skipped,
        failed = report.failed,
        "batch finished"
    );
    Ok(report)
}
