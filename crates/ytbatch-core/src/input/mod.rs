//! Tabular input reader: turns a CSV-like file into (name, url) entries.
//!
//! The first row is sniffed to decide whether it is a header. With a header,
//! the name and url columns are located through a fixed alias table; without
//! one, the first two columns are taken positionally.

mod columns;
mod error;
mod reader;
mod sniff;

pub use columns::{ColumnMapping, ColumnRole};
pub use error::InputError;
pub use reader::{read_entries, Entries, ShortRow};
pub use sniff::{has_header, read_sample, SAMPLE_BYTES};

/// One validated row of the input table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Display name; becomes the base of the local filename.
    pub name: String,
    /// Media page URL handed to the downloader.
    pub url: String,
    /// 1-based line in the input file the row started on.
    pub line: u64,
}
