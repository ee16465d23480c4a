//! Text Generation Boundary
//!
//! One outbound API call per source script, behind a trait seam so the test
//! suite can run the pipeline against a scripted double.

pub mod client;
pub mod prompt;

pub use client::{AnthropicClient, ClientSettings, GenerationClient, GenerationError};
pub use prompt::DEFAULT_INSTRUCTION;
