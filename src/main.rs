//! Gherkin Generator - Cypress to BDD conversion pipeline
//!
//! Walks a Cypress test suite and rewrites each script as a Gherkin feature
//! narrative through the Anthropic Messages API.

use anyhow::Context;
use gherkin_generator::app::cli::{Cli, Commands, ConfigAction};
use gherkin_generator::app::config::Config;
use gherkin_generator::convert::{BatchConverter, PathMapper};
use gherkin_generator::generation::client::API_KEY_ENV;
use gherkin_generator::generation::{AnthropicClient, ClientSettings};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Pick up the API key from a local .env before any client is built
    dotenvy::dotenv().ok();

    // Load config
    let config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        Config::load_default()?
    };

    // Execute command
    match cli.command {
        Commands::Convert { source, output } => {
            run_convert(&source, output, &config)?;
        }
        Commands::Interactive => {
            run_interactive(&config)?;
        }
        Commands::Init { force } => {
            run_init(force, &config)?;
        }
        Commands::Config { action } => {
            run_config(action, &config)?;
        }
    }

    Ok(())
}

/// Assemble the pipeline from config plus the environment-provided API key.
fn build_converter(config: &Config) -> anyhow::Result<BatchConverter<AnthropicClient>> {
    let settings = ClientSettings {
        model: config.generation.model.clone(),
        max_tokens: config.generation.max_tokens,
        temperature: config.generation.temperature,
        timeout_secs: config.generation.timeout_secs,
        ..ClientSettings::default()
    };

    let client = AnthropicClient::new(settings)?;
    if !client.is_configured() {
        anyhow::bail!(
            "No API key found. Set {} in the environment or a .env file.",
            API_KEY_ENV
        );
    }

    let mapper = PathMapper::new(
        &config.conversion.input_suffix,
        &config.conversion.output_marker,
    );

    Ok(BatchConverter::new(
        client,
        mapper,
        config.conversion.effective_instruction(),
    ))
}

fn run_convert(source: &Path, output: Option<PathBuf>, config: &Config) -> anyhow::Result<()> {
    let output = output.unwrap_or_else(Cli::default_output_dir);
    let converter = build_converter(config)?;

    let report = converter.run_with_progress(source, &output, |result| {
        println!("{result}");
    })?;

    println!("\n{}", report.summary());
    Ok(())
}

fn run_interactive(config: &Config) -> anyhow::Result<()> {
    let converter = build_converter(config)?;

    let source = loop {
        let entered = prompt("Enter the directory containing Cypress test files: ")?;
        let path = PathBuf::from(entered.trim());
        if path.is_dir() {
            break path;
        }
        println!("Invalid directory. Try again.");
    };

    let default_output = Cli::default_output_dir();
    let entered = prompt(&format!(
        "Destination directory [{}]: ",
        default_output.display()
    ))?;
    let output = if entered.trim().is_empty() {
        default_output
    } else {
        PathBuf::from(entered.trim())
    };

    let report = converter.run_with_progress(&source, &output, |result| {
        println!("{result}");
    })?;

    println!("\n{}", report.summary());
    println!("Conversion complete! Files saved in: {}", output.display());
    Ok(())
}

fn prompt(message: &str) -> anyhow::Result<String> {
    use std::io::Write;

    print!("{message}");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line)
}

fn run_init(force: bool, config: &Config) -> anyhow::Result<()> {
    let config_path = Config::default_path();

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {:?}. Use --force to overwrite.",
            config_path
        );
    }

    config.save_default()?;
    println!("Created config at {:?}", config_path);
    println!("\nConfig content:\n{}", config.to_toml()?);

    Ok(())
}

fn run_config(action: ConfigAction, config: &Config) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = config.to_toml()?;
            println!("Configuration ({:?}):\n", Config::default_path());
            println!("{}", toml_str);
        }
        ConfigAction::Get { key } => {
            let table: toml::Value = config
                .to_toml()?
                .parse()
                .context("current configuration does not serialize to TOML")?;
            let value = lookup_key(&table, &key)
                .ok_or_else(|| anyhow::anyhow!("Configuration key '{}' not found", key))?;
            println!("{key} = {value}");
        }
        ConfigAction::Set { key, value } => {
            let config_path = Config::default_path();
            if !config_path.exists() {
                anyhow::bail!("No config file found. Run 'gherkin-gen init' first.");
            }

            let mut table: toml::Value = std::fs::read_to_string(&config_path)?
                .parse()
                .context("config file is not valid TOML")?;
            if !set_key(&mut table, &key, &value) {
                anyhow::bail!("Failed to set '{}'. Key may not exist in config.", key);
            }

            let updated: Config = table
                .try_into()
                .context("updated value does not form a valid configuration")?;
            updated.validate()?;
            updated.save(&config_path)?;
            println!("Set {key} = {value}");
        }
        ConfigAction::Reset { force } => {
            let config_path = Config::default_path();

            if config_path.exists() && !force {
                println!("Config exists at {:?}", config_path);
                println!("Use --force to reset to defaults");
                return Ok(());
            }

            let default_config = Config::default();
            default_config.save_default()?;
            println!("Configuration reset to defaults at {:?}", config_path);
        }
    }

    Ok(())
}

/// Walk a dotted key through nested TOML tables.
fn lookup_key<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.').try_fold(value, |table, part| table.get(part))
}

/// Replace the value at a dotted key, keeping the type of the existing entry.
fn set_key(root: &mut toml::Value, key: &str, raw: &str) -> bool {
    let mut parts: Vec<&str> = key.split('.').collect();
    let leaf = match parts.pop() {
        Some(leaf) if !leaf.is_empty() => leaf,
        _ => return false,
    };

    let mut current = root;
    for part in parts {
        current = match current.get_mut(part) {
            Some(value) => value,
            None => return false,
        };
    }

    let table = match current.as_table_mut() {
        Some(table) => table,
        None => return false,
    };

    let new_value = match table.get(leaf) {
        Some(toml::Value::Integer(_)) => raw.parse::<i64>().map(toml::Value::Integer).ok(),
        Some(toml::Value::Float(_)) => raw.parse::<f64>().map(toml::Value::Float).ok(),
        Some(toml::Value::Boolean(_)) => raw.parse::<bool>().map(toml::Value::Boolean).ok(),
        Some(toml::Value::String(_)) => Some(toml::Value::String(raw.to_string())),
        _ => None,
    };

    match new_value {
        Some(value) => {
            table.insert(leaf.to_string(), value);
            true
        }
        None => false,
    }
}
