//! Output-path derivation preserving the source directory layout.

use std::path::{Path, PathBuf};

/// Maps source scripts into the destination tree.
///
/// Pure path arithmetic: never inspects file content and never touches the
/// filesystem. Directory creation is the caller's responsibility.
#[derive(Debug, Clone)]
pub struct PathMapper {
    /// Multi-part suffix marking a convertible script, e.g. `.cy.ts`
    input_suffix: String,
    /// Replacement appended to the base name, e.g. `_gherkin.txt`
    output_marker: String,
}

impl PathMapper {
    /// Create a mapper for the given suffix pair.
    pub fn new(input_suffix: impl Into<String>, output_marker: impl Into<String>) -> Self {
        Self {
            input_suffix: input_suffix.into(),
            output_marker: output_marker.into(),
        }
    }

    /// Whether `file_name` carries the recognized input suffix.
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.input_suffix)
    }

    /// Output file name for a matching input name.
    ///
    /// Callers must filter with [`PathMapper::matches`] first; the full
    /// multi-part suffix is replaced by the output marker.
    pub fn output_file_name(&self, file_name: &str) -> String {
        debug_assert!(self.matches(file_name), "caller must filter by suffix");
        match file_name.strip_suffix(&self.input_suffix) {
            Some(base) => format!("{base}{}", self.output_marker),
            None => format!("{file_name}{}", self.output_marker),
        }
    }

    /// Destination path for `file` discovered under `source_root`.
    ///
    /// The file's directory relative to `source_root` is reproduced under
    /// `dest_root`, and the file name goes through the suffix substitution.
    pub fn map(&self, source_root: &Path, file: &Path, dest_root: &Path) -> crate::Result<PathBuf> {
        let relative = file.strip_prefix(source_root).map_err(|_| {
            crate::Error::InvalidInput(format!(
                "{} is not under the source root {}",
                file.display(),
                source_root.display()
            ))
        })?;

        let file_name = relative
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                crate::Error::InvalidInput(format!("unusable file name in {}", file.display()))
            })?;

        let mut output = dest_root.to_path_buf();
        if let Some(parent) = relative.parent() {
            if !parent.as_os_str().is_empty() {
                output.push(parent);
            }
        }
        output.push(self.output_file_name(file_name));
        Ok(output)
    }
}
