//! Header sniffing over a bounded prefix of the input.
//!
//! A first row holding a URL-like field is data, never a header. Otherwise
//! two signals are checked in order:
//! 1. alias tokens: a first row holding a known column alias is a header;
//! 2. column-type vote: columns whose type (integer, float, or text of a fixed
//!    length) is consistent across the following rows vote on whether the
//!    first row breaks that pattern.
//!
//! Anything undecided means "no header".

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use super::ColumnRole;

/// Size of the prefix inspected for header detection.
pub const SAMPLE_BYTES: usize = 4096;

/// Rows after the first that take part in the type vote.
const VOTE_ROWS: usize = 20;

/// Reads up to [`SAMPLE_BYTES`] from the start of `path`.
///
/// When the file is longer than the sample, the sample is cut back to the last
/// complete line so the vote never sees a half row. A leading BOM is removed.
pub fn read_sample(path: &Path) -> io::Result<String> {
    let file = File::open(path)?;
    let mut buf = Vec::with_capacity(SAMPLE_BYTES);
    file.take(SAMPLE_BYTES as u64 + 1).read_to_end(&mut buf)?;

    if buf.len() > SAMPLE_BYTES {
        buf.truncate(SAMPLE_BYTES);
        if let Some(end) = buf.iter().rposition(|&b| b == b'\n') {
            buf.truncate(end + 1);
        }
    }

    let text = String::from_utf8_lossy(&buf);
    Ok(text.trim_start_matches('\u{feff}').to_string())
}

/// Best-effort guess whether the first row of `sample` is a header row.
pub fn has_header(sample: &str) -> bool {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(sample.as_bytes());

    let rows: Vec<Vec<String>> = reader
        .records()
        .map_while(Result::ok)
        .map(|r| r.iter().map(str::to_string).collect())
        .collect();

    let Some((first, rest)) = rows.split_first() else {
        return false;
    };

    if first.iter().any(|f| looks_like_url(f)) {
        tracing::debug!("first row holds a URL, no header");
        return false;
    }

    if first.iter().any(|f| ColumnRole::of(f).is_some()) {
        tracing::debug!("header detected from column aliases");
        return true;
    }

    let score = type_vote(first, &rest[..rest.len().min(VOTE_ROWS)]);
    tracing::debug!(score, "header type vote");
    score > 0
}

fn looks_like_url(field: &str) -> bool {
    field.contains("://")
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CellKind {
    Integer,
    Float,
    Text(usize),
}

impl CellKind {
    fn of(cell: &str) -> Self {
        let t = cell.trim();
        if t.parse::<i64>().is_ok() {
            CellKind::Integer
        } else if t.parse::<f64>().is_ok() {
            CellKind::Float
        } else {
            CellKind::Text(cell.chars().count())
        }
    }

    /// Whether a header candidate cell fits this column's kind.
    fn fits(self, cell: &str) -> bool {
        match self {
            CellKind::Integer => cell.trim().parse::<i64>().is_ok(),
            CellKind::Float => cell.trim().parse::<f64>().is_ok(),
            CellKind::Text(len) => cell.chars().count() == len,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Column {
    Unseen,
    Consistent(CellKind),
    Dropped,
}

/// Positive when the first row looks unlike the rows below it.
fn type_vote(first: &[String], rows: &[Vec<String>]) -> i32 {
    let mut columns = vec![Column::Unseen; first.len()];

    for row in rows.iter().filter(|r| r.len() == first.len()) {
        for (col, cell) in columns.iter_mut().zip(row) {
            let kind = CellKind::of(cell);
            *col = match *col {
                Column::Unseen => Column::Consistent(kind),
                Column::Consistent(k) if k == kind => Column::Consistent(k),
                _ => Column::Dropped,
            };
        }
    }

    columns
        .iter()
        .zip(first)
        .map(|(col, cell)| match col {
            Column::Consistent(kind) if kind.fits(cell) => -1,
            Column::Consistent(_) => 1,
            Column::Unseen | Column::Dropped => 0,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn alias_header_detected() {
        let sample = "Title,Link\nCat Video,https://example.com/watch?v=1\nA much longer dog video title,https://example.com/watch?v=22\n";
        assert!(has_header(sample));
    }

    #[test]
    fn alias_header_detected_without_data_rows() {
        assert!(has_header("name,url\n"));
    }

    #[test]
    fn headerless_urls_not_header() {
        let sample = "Cat Video,http://x/1\nDog Video,http://x/2\n";
        assert!(!has_header(sample));
    }

    #[test]
    fn row_with_alias_word_and_url_not_header() {
        assert!(!has_header("title,https://example.com/v\nname,https://example.com/w\n"));
    }

    #[test]
    fn url_in_first_row_never_header() {
        // Mixed link shapes make the url column's text lengths differ from the first row's.
        let sample = "My first clip,https://www.youtube.com/watch?v=dQw4w9WgXcQ\n\
                      Cat,https://youtu.be/aaaaaaaaaaa\n\
                      Dog,https://youtu.be/bbbbbbbbbbb\n";
        assert!(!has_header(sample));
    }

    #[test]
    fn numeric_column_vote_detects_header() {
        let sample = "episode,caption\n1,abc\n2,def\n3,ghi\n";
        assert!(has_header(sample));
    }

    #[test]
    fn consistent_first_row_not_header() {
        let sample = "1,abc\n2,def\n3,ghi\n";
        assert!(!has_header(sample));
    }

    #[test]
    fn single_row_defaults_to_no_header() {
        assert!(!has_header("foo,bar\n"));
    }

    #[test]
    fn empty_sample_no_header() {
        assert!(!has_header(""));
    }

    #[test]
    fn read_sample_strips_bom() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all("\u{feff}title,link\n".as_bytes()).unwrap();
        f.flush().unwrap();
        assert_eq!(read_sample(f.path()).unwrap(), "title,link\n");
    }

    #[test]
    fn read_sample_cuts_at_line_boundary() {
        let mut f = NamedTempFile::new().unwrap();
        let line = "some video name,https://example.com/watch?v=abcdef\n";
        for _ in 0..200 {
            f.write_all(line.as_bytes()).unwrap();
        }
        f.flush().unwrap();
        let sample = read_sample(f.path()).unwrap();
        assert!(sample.len() <= SAMPLE_BYTES);
        assert!(sample.ends_with('\n'));
        assert_eq!(sample.len() % line.len(), 0);
    }
}
