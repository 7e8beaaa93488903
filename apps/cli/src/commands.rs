//! CLI command definitions, routing, and tracing setup.

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use jobnorm_core::Pipeline;
use jobnorm_directory::DirectoryClient;
use jobnorm_llm::ExtractionClient;
use jobnorm_shared::config::{init_config, load_config, validate_api_keys};
use jobnorm_shared::{AppConfig, JobInput, NormalizedJob};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// jobnorm — normalize messy job postings into clean, whitelisted records.
#[derive(Parser)]
#[command(
    name = "jobnorm",
    version,
    about = "Normalize job-posting records against closed vocabularies.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Normalize job records from a JSON file (or stdin).
    Normalize {
        /// Input file holding one record or an array of records.
        /// Reads stdin when omitted.
        file: Option<PathBuf>,

        /// Pretty-print the output JSON.
        #[arg(long)]
        pretty: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "jobnorm=info",
        1 => "jobnorm=debug",
        _ => "jobnorm=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Normalize { file, pretty } => cmd_normalize(file.as_deref(), pretty).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// normalize
// ---------------------------------------------------------------------------

async fn cmd_normalize(file: Option<&std::path::Path>, pretty: bool) -> Result<()> {
    let config = load_config()?;
    validate_api_keys(&config)?;

    let raw = match file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| eyre!("cannot read '{}': {e}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| eyre!("cannot read stdin: {e}"))?;
            buf
        }
    };

    let (jobs, single) = parse_input(&raw)?;
    info!(jobs = jobs.len(), "normalizing records");

    let primary = ExtractionClient::primary(&config.extraction)?;
    let fallback = ExtractionClient::fallback(&config.extraction)?;
    let directory = DirectoryClient::from_config(&config.directory)?;
    let pipeline = Pipeline::new(primary, fallback, directory)
        .with_max_extract_attempts(config.extraction.max_attempts);

    let bar = batch_progress(jobs.len());
    let mut results = Vec::with_capacity(jobs.len());
    for job in &jobs {
        results.push(pipeline.normalize(job).await);
        bar.inc(1);
    }
    bar.finish_and_clear();

    print_results(&results, single, pretty)?;

    let degraded = results.iter().filter(|r| r.error.is_some()).count();
    if degraded > 0 {
        info!(degraded, "some records were degraded");
    }

    Ok(())
}

/// Parse the input as either a single record or an array of records.
/// Returns the records plus whether the input was a single object (so the
/// output shape can mirror the input shape).
fn parse_input(raw: &str) -> Result<(Vec<JobInput>, bool)> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| eyre!("input is not valid JSON: {e}"))?;

    match value {
        serde_json::Value::Array(_) => {
            let jobs: Vec<JobInput> = serde_json::from_value(value)
                .map_err(|e| eyre!("invalid job record in array: {e}"))?;
            Ok((jobs, false))
        }
        serde_json::Value::Object(_) => {
            let job: JobInput =
                serde_json::from_value(value).map_err(|e| eyre!("invalid job record: {e}"))?;
            Ok((vec![job], true))
        }
        _ => Err(eyre!("expected a JSON object or array of objects")),
    }
}

fn print_results(results: &[NormalizedJob], single: bool, pretty: bool) -> Result<()> {
    let rendered = if single {
        let record = &results[0];
        if pretty {
            serde_json::to_string_pretty(record)?
        } else {
            serde_json::to_string(record)?
        }
    } else if pretty {
        serde_json::to_string_pretty(results)?
    } else {
        serde_json::to_string(results)?
    };
    println!("{rendered}");
    Ok(())
}

/// Progress bar for batch runs; hidden for single records.
fn batch_progress(total: usize) -> ProgressBar {
    if total <= 1 {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} [{pos}/{len}] {elapsed}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    bar
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
