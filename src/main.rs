//! # clusterlint CLI entry point
//!
//! Validates cluster and compute-node manifests from disk and reports every
//! violation found. Exit code 0 means valid, 1 means the manifest has
//! violations, 2 means it could not be read or decoded.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use clusterlint::error::ErrorList;
use clusterlint::parse;
use clusterlint::validate::{self, RulesConfig, ValidationRules};

#[derive(Parser, Debug)]
#[command(name = "clusterlint", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Rules file (YAML or JSON) overriding the platform defaults.
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// Output format for violations.
    #[arg(long, value_enum, default_value_t = Output::Text, global = true)]
    output: Output,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a cluster manifest.
    Cluster { file: PathBuf },
    /// Validate a compute node (machine) manifest.
    Machine { file: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(errors) if errors.is_empty() => ExitCode::SUCCESS,
        Ok(errors) => match report(&errors, cli.output) {
            Ok(()) => ExitCode::from(1),
            Err(e) => {
                tracing::error!("{e:#}");
                ExitCode::from(2)
            }
        },
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ErrorList> {
    let rules = load_rules(cli.rules.as_deref())?;

    let errors = match &cli.command {
        Commands::Cluster { file } => {
            let cluster = parse::parse_cluster(&read(file)?)
                .with_context(|| format!("decoding {}", file.display()))?;
            validate::validate_cluster_spec_with(&cluster, &rules)
        }
        Commands::Machine { file } => {
            let node = parse::parse_compute_node(&read(file)?)
                .with_context(|| format!("decoding {}", file.display()))?;
            validate::validate_compute_node_spec_with(&node, &rules)
        }
    };

    if errors.is_empty() {
        tracing::info!("manifest is valid");
    } else {
        tracing::info!(violations = errors.len(), "manifest is invalid");
    }
    Ok(errors)
}

fn load_rules(path: Option<&Path>) -> anyhow::Result<ValidationRules> {
    let Some(path) = path else {
        return Ok(ValidationRules::platform().clone());
    };
    let config = RulesConfig::parse(&read(path)?)
        .with_context(|| format!("decoding rules file {}", path.display()))?;
    tracing::debug!(rules = %path.display(), "loaded rules override");
    Ok(ValidationRules::from_config(&config)?)
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn report(errors: &ErrorList, output: Output) -> anyhow::Result<()> {
    match output {
        Output::Text => {
            for error in errors {
                println!("{}", error);
            }
        }
        Output::Json => println!("{}", serde_json::to_string_pretty(errors)?),
    }
    Ok(())
}
