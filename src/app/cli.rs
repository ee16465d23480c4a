//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gherkin Generator - Convert Cypress test suites into BDD feature narratives
#[derive(Parser, Debug)]
#[command(name = "gherkin-gen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert every Cypress script under a directory tree
    Convert {
        /// Directory containing the Cypress test scripts
        #[arg(short, long)]
        source: PathBuf,

        /// Destination directory for the generated feature files
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Prompt for directories and run a conversion
    Interactive,

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "generation.model")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "generation.model")
        key: String,

        /// Value to set
        value: String,
    },

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Destination used when no output directory is given
    pub fn default_output_dir() -> PathBuf {
        PathBuf::from("gherkin_output")
    }
}
