//! # Gherkin Generator
//!
//! Converts Cypress UI test suites into Gherkin/BDD feature narratives.
//! Every `*.cy.ts` script below a source directory is sent to the Anthropic
//! Messages API together with a fixed conversion instruction, and the
//! response is written to a mirrored path under the destination directory.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gherkin_generator::app::config::Config;
//! use gherkin_generator::convert::{BatchConverter, PathMapper};
//! use gherkin_generator::generation::{AnthropicClient, ClientSettings};
//! use std::path::Path;
//!
//! # fn main() -> gherkin_generator::Result<()> {
//! let config = Config::load_default()?;
//!
//! let client = AnthropicClient::new(ClientSettings::default())?;
//! let mapper = PathMapper::new(
//!     &config.conversion.input_suffix,
//!     &config.conversion.output_marker,
//! );
//!
//! let converter =
//!     BatchConverter::new(client, mapper, config.conversion.effective_instruction());
//! let report = converter.run(Path::new("cypress/e2e"), Path::new("gherkin_output"))?;
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`scan`]: candidate discovery and source reading
//! - [`generation`]: the Anthropic-backed generation client
//! - [`convert`]: path mapping, batch orchestration, and run reports
//! - [`app`]: CLI and configuration management
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────┐   ┌──────┐   ┌──────────┐   ┌──────────┐   ┌───────┐
//! │ discover │──▶│ read │──▶│ generate │──▶│ map path │──▶│ write │
//! └──────────┘   └──────┘   └──────────┘   └──────────┘   └───────┘
//!  lexical        UTF-8      one API call   mirrors the    only after
//!  order                     per script     source tree    a success
//! ```
//!
//! A file that fails to read, generate, or write is recorded in the run
//! report and the batch moves on to the next file.

pub mod app;
pub mod convert;
pub mod generation;
pub mod scan;

// Re-export commonly used types
pub use convert::{
    BatchConverter, ConversionOutcome, ConversionReport, ConversionResult, PathMapper,
};
pub use generation::{AnthropicClient, ClientSettings, GenerationClient, GenerationError};

/// Result type alias for the converter
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the converter
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Generation error: {0}")]
    Generation(#[from] generation::GenerationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
