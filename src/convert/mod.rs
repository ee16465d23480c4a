//! Conversion Pipeline
//!
//! Path mapping, per-file conversion records, and the batch orchestrator.

pub mod batch;
pub mod path_map;
pub mod report;

pub use batch::BatchConverter;
pub use path_map::PathMapper;
pub use report::{ConversionOutcome, ConversionReport, ConversionResult};
