//! Local file naming: display name -> safe base name, and collision lookup.

mod existing;
mod sanitize;

pub use existing::find_existing;
pub use sanitize::{sanitize_filename, FALLBACK_NAME, MAX_NAME_CHARS, RESERVED_CHARS};
