//! Source file reading.

use std::path::Path;

/// Read the full UTF-8 content of one source script.
///
/// Fails for a missing or unreadable path and for content that is not valid
/// UTF-8. No side effects beyond the read.
pub fn read_source(path: &Path) -> crate::Result<String> {
    Ok(std::fs::read_to_string(path)?)
}
