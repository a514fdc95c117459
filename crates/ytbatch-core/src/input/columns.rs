//! Header alias table and column resolution.

use super::InputError;

/// What a header column supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Name,
    Url,
}

/// Lowercase alias -> role. Matching is exact after normalization.
const ALIASES: &[(&str, ColumnRole)] = &[
    ("name", ColumnRole::Name),
    ("title", ColumnRole::Name),
    ("video_name", ColumnRole::Name),
    ("link", ColumnRole::Url),
    ("url", ColumnRole::Url),
    ("video_url", ColumnRole::Url),
];

/// Strips a UTF-8 BOM and surrounding whitespace, then lowercases.
fn normalize(field: &str) -> String {
    field.trim_start_matches('\u{feff}').trim().to_lowercase()
}

impl ColumnRole {
    /// Role of a header field, if it is one of the known aliases.
    pub fn of(field: &str) -> Option<Self> {
        let key = normalize(field);
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .map(|(_, role)| *role)
    }
}

/// Column indices for the name and url fields of a headered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub name: usize,
    pub url: usize,
}

impl ColumnMapping {
    /// Resolves both roles from header fields. The leftmost matching column wins.
    pub fn resolve<S: AsRef<str>>(fields: &[S]) -> Result<Self, InputError> {
        let find = |role: ColumnRole| {
            fields
                .iter()
                .position(|f| ColumnRole::of(f.as_ref()) == Some(role))
        };

        match (find(ColumnRole::Name), find(ColumnRole::Url)) {
            (Some(name), Some(url)) => Ok(Self { name, url }),
            _ => Err(InputError::MissingColumns {
                found: fields
                    .iter()
                    .map(|f| f.as_ref().trim_start_matches('\u{feff}').to_string())
                    .collect(),
            }),
        }
    }
}
