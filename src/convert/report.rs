//! Per-file outcome records for one batch run.

use std::fmt;
use std::path::PathBuf;

/// What happened to one eligible source file.
///
/// Files without the recognized suffix are filtered out during discovery and
/// never appear here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// Generated text was written to `output`.
    Converted {
        /// Destination path of the written artifact
        output: PathBuf,
    },
    /// Reading, generating, or writing failed; no artifact was produced.
    Failed {
        /// Human-readable cause
        reason: String,
    },
}

/// The recorded outcome for one candidate file.
///
/// Created once per eligible file, never mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    /// Source script path
    pub source: PathBuf,
    /// Outcome of the conversion attempt
    pub outcome: ConversionOutcome,
}

impl ConversionResult {
    /// Record a successful conversion.
    pub fn converted(source: PathBuf, output: PathBuf) -> Self {
        Self {
            source,
            outcome: ConversionOutcome::Converted { output },
        }
    }

    /// Record a failed conversion.
    pub fn failed(source: PathBuf, reason: impl Into<String>) -> Self {
        Self {
            source,
            outcome: ConversionOutcome::Failed {
                reason: reason.into(),
            },
        }
    }

    /// Whether this file produced an output artifact.
    pub fn is_converted(&self) -> bool {
        matches!(self.outcome, ConversionOutcome::Converted { .. })
    }
}

impl fmt::Display for ConversionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            ConversionOutcome::Converted { output } => {
                write!(
                    f,
                    "Converted: {} -> {}",
                    self.source.display(),
                    output.display()
                )
            }
            ConversionOutcome::Failed { reason } => {
                write!(f, "Failed: {} ({reason})", self.source.display())
            }
        }
    }
}

/// Ordered results of one batch run, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct ConversionReport {
    results: Vec<ConversionResult>,
}

impl ConversionReport {
    /// Append one result.
    pub fn push(&mut self, result: ConversionResult) {
        self.results.push(result);
    }

    /// All results, in the order files were discovered.
    pub fn results(&self) -> &[ConversionResult] {
        &self.results
    }

    /// Number of files that produced an artifact.
    pub fn converted(&self) -> usize {
        self.results.iter().filter(|r| r.is_converted()).count()
    }

    /// Number of files that failed.
    pub fn failed(&self) -> usize {
        self.results.len() - self.converted()
    }

    /// Total number of eligible files processed.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether no eligible files were found.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Whether every processed file converted.
    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }

    /// One-line summary for drivers.
    pub fn summary(&self) -> String {
        format!(
            "{} file(s) processed: {} converted, {} failed",
            self.len(),
            self.converted(),
            self.failed()
        )
    }
}
