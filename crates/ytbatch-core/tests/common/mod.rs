//! Shared fixtures for integration tests.

use std::cell::RefCell;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use ytbatch_core::fetch::{DownloadRequest, FetchError, MediaFetcher, EXT_PLACEHOLDER};

/// Fetcher that behaves like a downloader choosing `ext` as the final extension:
/// it writes a small file at the resolved template path.
pub struct FileWritingFetcher {
    pub ext: &'static str,
    pub fail_urls: Vec<String>,
    pub calls: RefCell<Vec<String>>,
}

impl FileWritingFetcher {
    pub fn new(ext: &'static str) -> Self {
        Self {
            ext,
            fail_urls: Vec::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl MediaFetcher for FileWritingFetcher {
    fn fetch(&self, request: &DownloadRequest) -> Result<(), FetchError> {
        self.calls.borrow_mut().push(request.url.clone());
        if self.fail_urls.contains(&request.url) {
            return Err(FetchError::Exit {
                program: PathBuf::from("fake-downloader"),
                code: Some(1),
            });
        }
        let template = request.output_template.to_string_lossy();
        let resolved = template
            .replace(EXT_PLACEHOLDER, self.ext)
            .replace("%%", "%");
        fs::write(resolved, request.url.as_bytes()).map_err(|source| FetchError::Spawn {
            program: PathBuf::from("fake-downloader"),
            source,
        })
    }

    fn name(&self) -> &'static str {
        "file-writing"
    }
}

/// Writes `contents` to a temp file and returns it (kept alive by the caller).
pub fn input_table(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}

/// Sorted file names in `dir`.
pub fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
