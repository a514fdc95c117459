//! Single-entry state machine: pending -> skipped | downloaded | failed.

use crate::fetch::{DownloadRequest, MediaFetcher};
use crate::input::Entry;
use crate::naming::find_existing;

use super::{BatchSettings, ItemOutcome};

/// Handles one entry: collision check, then at most one fetch call.
pub fn process_entry<F>(fetcher: &F, settings: &BatchSettings, entry: &Entry) -> ItemOutcome
where
    F: MediaFetcher + ?Sized,
{
    let request = DownloadRequest::new(
        entry,
        &settings.output_dir,
        &settings.format_selector,
        settings.overwrite,
    );

    let existing = match find_existing(&settings.output_dir, &request.safe_base_name) {
        Ok(existing) => existing,
        Err(e) => return failed(&request, format!("cannot list output directory: {e}")),
    };

    match existing {
        Some(path) if !settings.overwrite => {
            println!("[skip] {} (file exists)", request.safe_base_name);
            tracing::info!(
                name = %request.safe_base_name,
                existing = %path.display(),
                "skipped, file exists"
            );
            return ItemOutcome::Skipped { existing: path };
        }
        Some(path) => {
            tracing::info!(existing = %path.display(), "overwriting existing file");
        }
        None => {}
    }

    println!("[download] {}  <-  {}", request.safe_base_name, request.url);
    tracing::info!(
        name = %request.safe_base_name,
        url = %request.url,
        line = entry.line,
        "download started"
    );

    match fetcher.fetch(&request) {
        Ok(()) => {
            tracing::info!(name = %request.safe_base_name, "download finished");
            ItemOutcome::Downloaded
        }
        Err(e) => failed(&request, e.to_string()),
    }
}

fn failed(request: &DownloadRequest, reason: String) -> ItemOutcome {
    eprintln!(
        "[error] Failed to download '{}' from {}: {}",
        request.name, request.url, reason
    );
    tracing::error!(name = %request.name, url = %request.url, %reason, "download failed");
    ItemOutcome::Failed { reason }
}
