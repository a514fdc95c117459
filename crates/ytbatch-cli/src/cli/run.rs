//! The batch run: resolve settings, check the downloader, then process the table.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use ytbatch_core::batch::{prepare_output_dir, run_batch, BatchSettings};
use ytbatch_core::config::YtbatchConfig;
use ytbatch_core::fetch::{YtDlpFetcher, YtDlpOptions};
use ytbatch_core::input::read_entries;

use super::Cli;

pub fn run_batch_command(cli: &Cli, cfg: &YtbatchConfig) -> Result<()> {
    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| cfg.output_dir.clone());
    let format_selector = cli.format.clone().unwrap_or_else(|| cfg.format.clone());

    let fetcher = resolve_fetcher(cli.yt_dlp.as_deref(), cfg)?;
    tracing::debug!(binary = %fetcher.binary_path().display(), "using downloader");

    prepare_output_dir(&output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))?;

    let entries = read_entries(&cli.input)?;
    let settings = BatchSettings {
        output_dir,
        format_selector,
        overwrite: cli.overwrite,
    };
    let report = run_batch(entries, &fetcher, &settings)?;

    let shown = fs::canonicalize(&settings.output_dir).unwrap_or(settings.output_dir);
    println!(
        "\nDone. Processed {} item(s). Files saved to: {}",
        report.processed,
        shown.display()
    );
    if report.failed > 0 {
        tracing::warn!("{} of {} item(s) failed", report.failed, report.processed);
    }
    Ok(())
}

/// Explicit `--yt-dlp` wins, then the config file, then a `PATH` lookup.
fn resolve_fetcher(explicit: Option<&Path>, cfg: &YtbatchConfig) -> Result<YtDlpFetcher> {
    let options = YtDlpOptions::from(cfg);
    match explicit
        .map(Path::to_path_buf)
        .or_else(|| cfg.yt_dlp_path.clone())
    {
        Some(path) => Ok(YtDlpFetcher::new(path, options)),
        None => YtDlpFetcher::from_path(options)
            .context("yt-dlp is not installed (not found on PATH); install it or pass --yt-dlp <PATH>"),
    }
}
