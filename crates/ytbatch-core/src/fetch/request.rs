//! Per-entry download request.

use std::path::{Path, PathBuf};

use crate::input::Entry;
use crate::naming::sanitize_filename;

/// Placeholder the downloader replaces with the final file extension.
pub const EXT_PLACEHOLDER: &str = "%(ext)s";

/// Everything one download call needs. Lives only for that call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    /// Display name as given in the input.
    pub name: String,
    pub url: String,
    /// Sanitized base name the file is saved under.
    pub safe_base_name: String,
    /// `<output_dir>/<safe_base_name>.%(ext)s`
    pub output_template: PathBuf,
    /// Opaque format selector passed through to the downloader.
    pub format_selector: String,
    /// Replace an existing file instead of keeping it.
    pub overwrite: bool,
}

impl DownloadRequest {
    pub fn new(entry: &Entry, output_dir: &Path, format_selector: &str, overwrite: bool) -> Self {
        let safe_base_name = sanitize_filename(&entry.name);
        Self {
            name: entry.name.clone(),
            url: entry.url.clone(),
            output_template: output_template(output_dir, &safe_base_name),
            safe_base_name,
            format_selector: format_selector.to_string(),
            overwrite,
        }
    }
}

/// Builds the output path template for a base name.
///
/// `%` is the template field marker, so literal percent signs are doubled.
pub fn output_template(output_dir: &Path, safe_base_name: &str) -> PathBuf {
    output_dir.join(format!(
        "{}.{}",
        safe_base_name.replace('%', "%%"),
        EXT_PLACEHOLDER
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_from_entry() {
        let entry = Entry {
            name: "Q&A: part 1/2".to_string(),
            url: "https://example.com/watch?v=1".to_string(),
            line: 3,
        };
        let req = DownloadRequest::new(&entry, Path::new("downloads"), "best", false);
        assert_eq!(req.safe_base_name, "Q&A_ part 1_2");
        assert_eq!(
            req.output_template,
            PathBuf::from("downloads/Q&A_ part 1_2.%(ext)s")
        );
        assert_eq!(req.format_selector, "best");
        assert_eq!(req.name, "Q&A: part 1/2");
        assert!(!req.overwrite);
    }

    #[test]
    fn percent_is_escaped_in_template() {
        assert_eq!(
            output_template(Path::new("out"), "100% real"),
            PathBuf::from("out/100%% real.%(ext)s")
        );
    }
}
