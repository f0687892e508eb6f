//! paramcheck CLI entrypoint
//! Parses command-line arguments and dispatches to the core library.

// Internal imports (std, crate)
use std::path::PathBuf;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use paramcheck_core::{Config, OutputFormat, ParameterLocation, ParameterSet, Validate};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "paramcheck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Validate the parameters declared in a file
    Validate {
        /// Path or URL to the parameter file (YAML or JSON)
        ///
        /// Example: --path parameters.yaml
        /// Example: --path https://example.com/parameters.json
        #[arg(long)]
        path: String,
        /// Resolve `$ref` members against the file's components first
        #[arg(long)]
        resolve: bool,
        /// Optional config file (YAML or TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the parameter with the given location and name
    Lookup {
        #[arg(long)]
        path: String,
        #[arg(long, value_enum)]
        location: ParameterLocation,
        #[arg(long)]
        name: String,
        #[arg(long)]
        resolve: bool,
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Re-serialize the parameters with default-valued fields removed
    Fmt {
        #[arg(long)]
        path: String,
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    match run(&cli.command).await {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(err) if is_validation_failure(&err) => {
            eprintln!("Validation failed: {err:#}");
            std::process::exit(1);
        }
        Err(err) => Err(err),
    }
}

/// Whether `err` reports an invalid document rather than one that could not
/// be read.
fn is_validation_failure(err: &anyhow::Error) -> bool {
    err.downcast_ref::<paramcheck_core::Error>()
        .is_some_and(paramcheck_core::Error::is_validation)
}

async fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(Config::new()),
    }
}

async fn load_set(path: &str, resolve: bool) -> anyhow::Result<ParameterSet> {
    tracing::info!(path, "Loading parameters");
    let mut set = ParameterSet::from_file_or_url(path)
        .await
        .with_context(|| format!("Failed to load parameters from {path}"))?;
    if resolve {
        set.resolve_refs().context("Failed to resolve references")?;
    }
    Ok(set)
}

fn render<T: serde::Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    })
}

async fn run(command: &Commands) -> anyhow::Result<String> {
    match command {
        Commands::Validate {
            path,
            resolve,
            config,
        } => {
            let config = load_config(config.as_ref()).await?;
            let set = load_set(path, *resolve || config.resolve_refs).await?;
            let parameters = set.parameters();
            parameters
                .validate()
                .with_context(|| format!("{path} is invalid"))?;
            config.check_extensions(parameters)?;
            tracing::info!(count = parameters.len(), "Validation passed");
            Ok(format!("OK: {} parameter(s) in {}", parameters.len(), path))
        }
        Commands::Lookup {
            path,
            location,
            name,
            resolve,
            format,
        } => {
            let set = load_set(path, *resolve).await?;
            let param = set
                .parameters()
                .lookup(*location, name)
                .ok_or_else(|| anyhow::anyhow!("No '{location}' parameter named '{name}'"))?;
            render(param, format.unwrap_or_default())
        }
        Commands::Fmt {
            path,
            format,
            config,
        } => {
            let config = load_config(config.as_ref()).await?;
            let set = load_set(path, config.resolve_refs).await?;
            render(set.parameters(), format.unwrap_or(config.output_format))
        }
    }
}
