//! Batch conversion orchestration.
//!
//! Walks a source tree, converts each recognized script through the
//! generation client, and mirrors results into the destination tree. A file
//! that fails is recorded and the batch moves on; only a bad source
//! directory or an unwritable destination root refuses the whole run.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::path_map::PathMapper;
use super::report::{ConversionOutcome, ConversionReport, ConversionResult};
use crate::generation::GenerationClient;
use crate::scan::{discover, read_source};

/// Orchestrates one batch run: discovery, per-file conversion, persistence.
///
/// The generation client is an explicitly passed dependency, so tests can
/// run the full pipeline against a scripted double.
pub struct BatchConverter<C> {
    client: C,
    mapper: PathMapper,
    instruction: String,
}

impl<C: GenerationClient> BatchConverter<C> {
    /// Create a converter from its collaborators.
    pub fn new(client: C, mapper: PathMapper, instruction: impl Into<String>) -> Self {
        Self {
            client,
            mapper,
            instruction: instruction.into(),
        }
    }

    /// Run one batch, returning the ordered report.
    pub fn run(&self, source_dir: &Path, dest_dir: &Path) -> crate::Result<ConversionReport> {
        self.run_with_progress(source_dir, dest_dir, |_| {})
    }

    /// Run one batch, handing each result to `on_result` as it is produced.
    ///
    /// Results arrive in discovery order. Files are processed strictly one
    /// at a time; the callback runs between files, never concurrently.
    pub fn run_with_progress(
        &self,
        source_dir: &Path,
        dest_dir: &Path,
        mut on_result: impl FnMut(&ConversionResult),
    ) -> crate::Result<ConversionReport> {
        let candidates = discover(source_dir, &self.mapper)?;

        // An inaccessible destination root refuses the batch outright
        fs::create_dir_all(dest_dir)?;

        info!(
            candidates = candidates.len(),
            source = %source_dir.display(),
            dest = %dest_dir.display(),
            "starting batch conversion"
        );

        let mut report = ConversionReport::default();
        let mut created_dirs: HashSet<PathBuf> = HashSet::new();

        for path in candidates {
            let result = self.convert_one(source_dir, &path, dest_dir, &mut created_dirs);
            match &result.outcome {
                ConversionOutcome::Converted { output } => {
                    info!(source = %path.display(), output = %output.display(), "converted");
                }
                ConversionOutcome::Failed { reason } => {
                    warn!(source = %path.display(), %reason, "conversion failed");
                }
            }
            on_result(&result);
            report.push(result);
        }

        info!("{}", report.summary());
        Ok(report)
    }

    /// Convert a single candidate; any failure becomes a `Failed` result.
    fn convert_one(
        &self,
        source_root: &Path,
        path: &Path,
        dest_root: &Path,
        created_dirs: &mut HashSet<PathBuf>,
    ) -> ConversionResult {
        let content = match read_source(path) {
            Ok(content) => content,
            Err(e) => return ConversionResult::failed(path.to_path_buf(), e.to_string()),
        };

        let generated = match self.client.generate(&self.instruction, &content) {
            Ok(text) => text,
            Err(e) => return ConversionResult::failed(path.to_path_buf(), e.to_string()),
        };

        let output = match self.mapper.map(source_root, path, dest_root) {
            Ok(output) => output,
            Err(e) => return ConversionResult::failed(path.to_path_buf(), e.to_string()),
        };

        // Create each distinct output directory once per run
        if let Some(parent) = output.parent() {
            if !created_dirs.contains(parent) {
                if let Err(e) = fs::create_dir_all(parent) {
                    return ConversionResult::failed(
                        path.to_path_buf(),
                        format!("cannot create {}: {e}", parent.display()),
                    );
                }
                created_dirs.insert(parent.to_path_buf());
            }
        }

        if let Err(e) = fs::write(&output, &generated) {
            return ConversionResult::failed(
                path.to_path_buf(),
                format!("cannot write {}: {e}", output.display()),
            );
        }

        ConversionResult::converted(path.to_path_buf(), output)
    }
}
