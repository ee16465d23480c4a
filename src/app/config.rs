//! Configuration Management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::generation::DEFAULT_INSTRUCTION;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Generation service settings
    pub generation: GenerationConfig,
    /// Conversion settings
    pub conversion: ConversionConfig,
}

/// Generation service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Model for the conversion
    pub model: String,
    /// Maximum tokens per response
    pub max_tokens: u32,
    /// Temperature for generation
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Conversion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// File suffix marking a convertible script
    pub input_suffix: String,
    /// Replacement for the input suffix on output files
    pub output_marker: String,
    /// Conversion instruction; empty selects the built-in rules
    #[serde(default)]
    pub instruction: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-5-20250929".to_string(),
            max_tokens: 1024,
            temperature: 0.3,
            timeout_secs: 30,
        }
    }
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            input_suffix: ".cy.ts".to_string(),
            output_marker: "_gherkin.txt".to_string(),
            instruction: String::new(),
        }
    }
}

impl ConversionConfig {
    /// The instruction actually sent, falling back to the built-in rules.
    pub fn effective_instruction(&self) -> &str {
        if self.instruction.is_empty() {
            DEFAULT_INSTRUCTION
        } else {
            &self.instruction
        }
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.generation.model.trim().is_empty() {
            return Err(crate::Error::Config("model must not be empty".to_string()));
        }
        if self.generation.max_tokens == 0 {
            return Err(crate::Error::Config("max_tokens must be > 0".to_string()));
        }
        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(crate::Error::Config(format!(
                "temperature must be in [0, 2], got {}",
                self.generation.temperature
            )));
        }
        if self.generation.timeout_secs == 0 {
            return Err(crate::Error::Config("timeout_secs must be > 0".to_string()));
        }
        if !self.conversion.input_suffix.starts_with('.') {
            return Err(crate::Error::Config(format!(
                "input_suffix must start with a dot, got {:?}",
                self.conversion.input_suffix
            )));
        }
        if self.conversion.output_marker.trim().is_empty() {
            return Err(crate::Error::Config(
                "output_marker must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Load config from file
    pub fn load(path: &Path) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<(), crate::Error> {
        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;

        // Create parent directories
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save to default location
    pub fn save_default(&self) -> Result<(), crate::Error> {
        self.save(&Self::default_path())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".gherkin_generator").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}
