//! Cross-platform filename sanitization for display names.

/// Characters reserved on Windows; a safe baseline everywhere else too.
pub const RESERVED_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Upper bound on the base name, in characters.
pub const MAX_NAME_CHARS: usize = 180;

/// Base name used when nothing usable is left.
pub const FALLBACK_NAME: &str = "video";

/// Maps an arbitrary display name to a safe file base name (no extension).
///
/// - Trims surrounding whitespace
/// - Replaces `< > : " / \ | ? *` with `_`
/// - Collapses whitespace runs to one space
/// - Strips trailing spaces and periods
/// - Limits length to 180 characters, re-stripping the cut point
/// - Falls back to `video` for empty or all-reserved input
///
/// Total and idempotent.
pub fn sanitize_filename(name: &str) -> String {
    let trimmed = name.trim();

    if trimmed
        .chars()
        .all(|c| RESERVED_CHARS.contains(&c) || c.is_whitespace())
    {
        return FALLBACK_NAME.to_string();
    }

    let mut out = String::with_capacity(trimmed.len());
    let mut prev_space = false;
    for c in trimmed.chars() {
        if c.is_whitespace() {
            if !prev_space {
                out.push(' ');
            }
            prev_space = true;
        } else if RESERVED_CHARS.contains(&c) {
            out.push('_');
            prev_space = false;
        } else {
            out.push(c);
            prev_space = false;
        }
    }

    let out = out.trim_end_matches(|c: char| c == ' ' || c == '.');

    let out = match out.char_indices().nth(MAX_NAME_CHARS) {
        Some((cut, _)) => {
            out[..cut].trim_end_matches(|c: char| c.is_whitespace() || c == '.')
        }
        None => out,
    };

    if out.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        out.to_string()
    }
}
