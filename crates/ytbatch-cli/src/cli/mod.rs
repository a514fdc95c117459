//! CLI for the ytbatch batch downloader.

mod run;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use ytbatch_core::config;

pub use run::run_batch_command;

/// Batch download videos listed in a CSV of (name, link) rows.
#[derive(Debug, Parser)]
#[command(name = "ytbatch", version)]
#[command(about = "Batch download videos from a CSV with (name, link)", long_about = None)]
pub struct Cli {
    /// Path to the CSV file.
    pub input: PathBuf,

    /// Directory to save videos (default: `output_dir` from config, initially "downloads").
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// yt-dlp format selector (default: `format` from config, initially "bestvideo+bestaudio/best").
    #[arg(short = 'f', long, value_name = "SELECTOR")]
    pub format: Option<String>,

    /// Overwrite if a file with the same base name already exists.
    #[arg(long)]
    pub overwrite: bool,

    /// yt-dlp binary to run (default: `yt_dlp_path` from config, else looked up on PATH).
    #[arg(long = "yt-dlp", value_name = "PATH")]
    pub yt_dlp: Option<PathBuf>,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init().context("load config")?;
        tracing::debug!("loaded config: {:?}", cfg);

        run_batch_command(&cli, &cfg)
    }
}
