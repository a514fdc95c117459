use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Global configuration loaded from `~/.config/ytbatch/config.toml`.
///
/// Every key is optional in the file; missing keys take the defaults below.
/// Command-line flags override these values for a single run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YtbatchConfig {
    /// Directory downloads are written to when `-o` is not given.
    pub output_dir: PathBuf,
    /// Format selector passed to yt-dlp when `-f` is not given.
    pub format: String,
    /// Retry budget handed to yt-dlp for each download.
    pub retries: u32,
    /// Resume partially downloaded files instead of restarting them.
    pub resume: bool,
    /// Container used when video and audio streams are fetched separately and merged.
    pub merge_output_format: String,
    /// Explicit yt-dlp binary; if missing, the binary is looked up on `PATH`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yt_dlp_path: Option<PathBuf>,
}

/// Default format selector: best video+audio pair, else best single stream.
pub const DEFAULT_FORMAT: &str = "bestvideo+bestaudio/best";

impl Default for YtbatchConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("downloads"),
            format: DEFAULT_FORMAT.to_string(),
            retries: 5,
            resume: true,
            merge_output_format: "mp4".to_string(),
            yt_dlp_path: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ytbatch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<YtbatchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = YtbatchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: YtbatchConfig = toml::from_str(&data)?;
    Ok(cfg)
}
