//! Lookup of an already-downloaded file by base name, any extension.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Returns the first file in `dir` named `<base_name>.<anything>`.
///
/// The downloader picks the final extension, so the match is a plain prefix
/// test on the directory listing rather than a glob.
pub fn find_existing(dir: &Path, base_name: &str) -> io::Result<Option<PathBuf>> {
    let prefix = format!("{base_name}.");

    for dirent in fs::read_dir(dir)? {
        let dirent = dirent?;
        let file_name = dirent.file_name();
        if file_name
            .to_str()
            .is_some_and(|n| n.starts_with(&prefix))
            && !dirent.file_type()?.is_dir()
        {
            return Ok(Some(dirent.path()));
        }
    }

    Ok(None)
}
