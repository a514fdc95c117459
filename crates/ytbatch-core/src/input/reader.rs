//! Lazy, single-pass entry iterator over the input table.

use std::fmt;
use std::fs::File;
use std::path::Path;

use super::sniff::{has_header, read_sample};
use super::{ColumnMapping, Entry, InputError};

/// How rows are turned into entries, fixed before iteration starts.
#[derive(Debug, Clone, Copy)]
enum Layout {
    /// Header row present; fields located by resolved column indices.
    Header(ColumnMapping),
    /// No header; field 0 is the name, field 1 the url.
    Positional,
}

/// A positional row dropped for having fewer than two fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortRow {
    /// 1-based line the row started on.
    pub line: u64,
    pub fields: usize,
}

impl fmt::Display for ShortRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Skipping row {}: expected 2 columns, got {}",
            self.line, self.fields
        )
    }
}

/// Iterator over the entries of an input file.
///
/// Yields `Err` only for undecodable records; callers treat that as fatal.
/// Rows with blank name or url are skipped silently. In positional layout,
/// rows with fewer than two fields are reported on stderr, recorded in
/// [`Entries::short_rows`], and skipped.
pub struct Entries {
    records: csv::StringRecordsIntoIter<File>,
    layout: Layout,
    at_start: bool,
    short_rows: Vec<ShortRow>,
}

/// Opens `path`, sniffs for a header and resolves the column layout.
///
/// Fails if the file cannot be read, or if a header is present but lacks a
/// name or url column. No entries are produced before both checks pass.
pub fn read_entries(path: &Path) -> Result<Entries, InputError> {
    let open_err = |source| InputError::Open {
        path: path.to_path_buf(),
        source,
    };

    let sample = read_sample(path).map_err(open_err)?;
    let header = has_header(&sample);
    tracing::debug!(path = %path.display(), header, "sniffed input");

    let file = File::open(path).map_err(open_err)?;
    let mut records = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file)
        .into_records();

    let layout = if header {
        match records.next() {
            Some(Ok(row)) => {
                let fields: Vec<&str> = row.iter().collect();
                let mapping = ColumnMapping::resolve(&fields)?;
                tracing::debug!(?mapping, "resolved header columns");
                Layout::Header(mapping)
            }
            Some(Err(e)) => return Err(e.into()),
            None => Layout::Positional,
        }
    } else {
        Layout::Positional
    };

    Ok(Entries {
        records,
        at_start: matches!(layout, Layout::Positional),
        layout,
        short_rows: Vec::new(),
    })
}

impl Entries {
    /// Rows skipped so far for having too few fields.
    pub fn short_rows(&self) -> &[ShortRow] {
        &self.short_rows
    }

    fn entry_from(&mut self, record: &csv::StringRecord) -> Option<Entry> {
        let line = record.position().map_or(0, |p| p.line());
        let strip_bom = std::mem::replace(&mut self.at_start, false);

        let (name, url) = match self.layout {
            Layout::Header(m) => (
                record.get(m.name).unwrap_or(""),
                record.get(m.url).unwrap_or(""),
            ),
            Layout::Positional => {
                if record.len() < 2 {
                    let skip = ShortRow {
                        line,
                        fields: record.len(),
                    };
                    eprintln!("{skip}");
                    tracing::warn!(line, fields = skip.fields, "skipping short row");
                    self.short_rows.push(skip);
                    return None;
                }
                (&record[0], &record[1])
            }
        };

        let name = if strip_bom {
            name.trim_start_matches('\u{feff}')
        } else {
            name
        };
        let (name, url) = (name.trim(), url.trim());
        if name.is_empty() || url.is_empty() {
            return None;
        }

        Some(Entry {
            name: name.to_string(),
            url: url.to_string(),
            line,
        })
    }
}

impl Iterator for Entries {
    type Item = Result<Entry, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(e) => return Some(Err(e.into())),
            };
            if let Some(entry) = self.entry_from(&record) {
                return Some(Ok(entry));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn table(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    fn pairs(path: &Path) -> Vec<(String, String)> {
        read_entries(path)
            .unwrap()
            .map(|e| {
                let e = e.unwrap();
                (e.name, e.url)
            })
            .collect()
    }

    #[test]
    fn headered_title_link() {
        let f = table("Title,Link\nCat Video,http://x/1\nDog Video,http://x/2\n");
        assert_eq!(
            pairs(f.path()),
            vec![
                ("Cat Video".to_string(), "http://x/1".to_string()),
                ("Dog Video".to_string(), "http://x/2".to_string()),
            ]
        );
    }

    #[test]
    fn headered_uppercase_and_reordered() {
        let f = table("LINK,notes,TITLE\nhttp://x/1,n/a,Cat Video\n");
        assert_eq!(
            pairs(f.path()),
            vec![("Cat Video".to_string(), "http://x/1".to_string())]
        );
    }

    #[test]
    fn headered_blank_fields_skipped() {
        let f = table("name,url\n  ,http://x/1\nDog,   \nBird,http://x/3\n");
        assert_eq!(
            pairs(f.path()),
            vec![("Bird".to_string(), "http://x/3".to_string())]
        );
    }

    #[test]
    fn headered_short_row_reads_missing_as_empty() {
        let f = table("name,url\nLonely\nBird,http://x/3\n");
        assert_eq!(
            pairs(f.path()),
            vec![("Bird".to_string(), "http://x/3".to_string())]
        );
    }

    #[test]
    fn headered_with_bom() {
        let f = table("\u{feff}video_name,video_url\nCat,http://x/1\n");
        assert_eq!(
            pairs(f.path()),
            vec![("Cat".to_string(), "http://x/1".to_string())]
        );
    }

    #[test]
    fn headerless_two_columns() {
        let f = table("Cat Video,http://x/1\n");
        let entries: Vec<Entry> = read_entries(f.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            entries,
            vec![Entry {
                name: "Cat Video".to_string(),
                url: "http://x/1".to_string(),
                line: 1,
            }]
        );
    }

    #[test]
    fn headerless_single_column_row_skipped() {
        let f = table("Cat Video,http://x/1\norphan\nDog Video,http://x/2\n");
        let mut entries = read_entries(f.path()).unwrap();
        let names: Vec<String> = entries.by_ref().map(|e| e.unwrap().name).collect();
        assert_eq!(names, vec!["Cat Video", "Dog Video"]);

        let skipped = entries.short_rows();
        assert_eq!(skipped, &[ShortRow { line: 2, fields: 1 }]);
        assert_eq!(
            skipped[0].to_string(),
            "Skipping row 2: expected 2 columns, got 1"
        );
    }

    #[test]
    fn headerless_mixed_link_shapes_are_data() {
        let f = table(
            "My first clip,https://www.youtube.com/watch?v=dQw4w9WgXcQ\n\
             Cat,https://youtu.be/aaaaaaaaaaa\n\
             Dog,https://youtu.be/bbbbbbbbbbb\n",
        );
        let names: Vec<String> = pairs(f.path()).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["My first clip", "Cat", "Dog"]);
    }

    #[test]
    fn headerless_extra_columns_ignored_and_quotes_handled() {
        let f = table("\"Cats, Part 1\",http://x/1,extra\n");
        assert_eq!(
            pairs(f.path()),
            vec![("Cats, Part 1".to_string(), "http://x/1".to_string())]
        );
    }

    #[test]
    fn headerless_bom_stripped_from_first_name() {
        let f = table("\u{feff}Cat,http://x/1\nDog,http://x/2\n");
        let names: Vec<String> = pairs(f.path()).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Cat".to_string(), "Dog".to_string()]);
    }

    #[test]
    fn missing_columns_is_fatal() {
        let f = table("title,description\nCat,fluffy\n");
        match read_entries(f.path()) {
            Err(InputError::MissingColumns { found }) => {
                assert_eq!(found, vec!["title".to_string(), "description".to_string()]);
            }
            Err(other) => panic!("expected MissingColumns, got {other:?}"),
            Ok(_) => panic!("expected MissingColumns, got entries"),
        }
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_entries(&dir.path().join("nope.csv")).err().unwrap();
        assert!(matches!(err, InputError::Open { .. }));
    }

    #[test]
    fn empty_file_yields_nothing() {
        let f = table("");
        assert!(pairs(f.path()).is_empty());
    }

    #[test]
    fn invalid_utf8_record_yields_error() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(b"Cat,http://x/1\n\xff\xfe,http://x/2\n").unwrap();
        f.flush().unwrap();
        let results: Vec<_> = read_entries(f.path()).unwrap().collect();
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(InputError::Record(_))));
    }
}
