//! Map raw window titles to the bucket they are counted under.

/// Character separating a document or tab name from the application name.
pub const SEPARATOR: char = '-';

/// Canonical label for a raw window title.
///
/// Titles such as `"notes.txt - Editor"` collapse to `"Editor"`: everything up
/// to and including the last [`SEPARATOR`] is dropped and the remainder is
/// trimmed. A title without a separator is returned unchanged, so applications
/// whose own names contain a hyphen are split as well.
pub fn normalize(raw: &str) -> String {
    match raw.rsplit_once(SEPARATOR) {
        Some((_, app)) => app.trim().to_string(),
        None => raw.to_string(),
    }
}
