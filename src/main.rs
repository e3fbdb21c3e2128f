//! relay-diag - Signal-Relay Fault Diagnosis
//!
//! Learns reference profiles from bench captures and diagnoses a live
//! capture against them.
//!
//! # Usage
//!
//! ```bash
//! # Diagnose ./live_test.csv against ./healthy.csv, gain.csv, conn.csv, power.csv
//! relay-diag diagnose
//!
//! # Reference captures elsewhere, JSON output
//! relay-diag --reference-dir bench/refs diagnose capture.csv --format json
//!
//! # Pipe a capture table in
//! cat capture.csv | relay-diag diagnose --stdin
//!
//! # Pipe the relay firmware's serial log straight in
//! relay-diag diagnose --stdin --raw < serial_log.txt
//!
//! # Inspect the learned profiles / a single capture
//! relay-diag profiles
//! relay-diag analyze capture.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RELAY_DIAG_CONFIG`: Path to a TOML config file
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;

use relay_diag::acquisition::{load_table, read_capture_stream, read_table, CsvTableSource};
use relay_diag::config::{defaults, DiagConfig};
use relay_diag::report::{terminal, DiagnosisReport};
use relay_diag::{Diagnosis, DiagnosticSession, FeatureExtractor};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "relay-diag")]
#[command(about = "Signal-relay fault diagnosis by nearest reference profile")]
#[command(version)]
struct CliArgs {
    /// Path to a TOML config file; without it, RELAY_DIAG_CONFIG, then
    /// ./relay_diag.toml, then built-in defaults are tried
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding healthy.csv, gain.csv, conn.csv and power.csv
    #[arg(long, global = true, value_name = "DIR")]
    reference_dir: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Diagnose a capture against the reference profiles
    Diagnose {
        /// Capture table to diagnose
        #[arg(default_value = defaults::LIVE_CAPTURE_FILE, conflicts_with = "stdin")]
        target: PathBuf,

        /// Read the capture from stdin instead of a file
        #[arg(long)]
        stdin: bool,

        /// Stdin carries raw firmware `sent,recv` lines rather than a table
        #[arg(long, requires = "stdin")]
        raw: bool,

        /// Diagnose even if some reference profiles could not be learned
        #[arg(long)]
        allow_partial: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Learn the reference profiles and print them
    Profiles,

    /// Print the features of a single capture
    Analyze {
        /// Capture table to analyze
        file: PathBuf,
    },

    /// Validate the effective configuration and print it as TOML
    CheckConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

// ============================================================================
// Setup
// ============================================================================

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(args: &CliArgs) -> Result<DiagConfig> {
    let mut config = match &args.config {
        Some(path) => DiagConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DiagConfig::load().context("Failed to load config")?,
    };
    if let Some(dir) = &args.reference_dir {
        config.profiles.reference_dir = dir.clone();
    }
    Ok(config)
}

// ============================================================================
// Commands
// ============================================================================

fn train(config: &DiagConfig) -> DiagnosticSession {
    println!("\n--- 1. TRAINING (LEARNING PHASE) ---");
    let session = DiagnosticSession::train(config);
    print!("{}", terminal::render_learned(session.library()));
    print!("{}", terminal::render_failures(session.failures()));
    session
}

fn run_diagnose(
    mut config: DiagConfig,
    target: PathBuf,
    stdin: bool,
    raw: bool,
    allow_partial: bool,
    format: OutputFormat,
) -> Result<()> {
    if allow_partial {
        config.profiles.allow_partial_library = true;
    }

    let session = match format {
        OutputFormat::Text => train(&config),
        OutputFormat::Json => DiagnosticSession::train(&config),
    };
    session
        .ensure_ready()
        .context("[STOP] Reference profiles missing; record them before diagnosing")?;

    let min_samples = config.features.min_samples;
    let diagnosis: Diagnosis = if stdin {
        let input = std::io::stdin().lock();
        let series = if raw {
            read_capture_stream(input, min_samples)
                .context("Failed to read firmware capture from stdin")?
        } else {
            read_table(input, "stdin", min_samples)
                .context("Failed to read capture table from stdin")?
        };
        session.diagnose(&series)?
    } else {
        let source = CsvTableSource::new(&target, min_samples);
        session
            .diagnose(&source)
            .with_context(|| format!("Cannot diagnose {}", target.display()))?
    };

    match format {
        OutputFormat::Text => {
            println!("\n--- 2. DETAILED ANALYSIS ---");
            print!("{}", terminal::render_diagnosis(&diagnosis));
        }
        OutputFormat::Json => {
            let report = DiagnosisReport::new(diagnosis);
            println!("{}", report.to_json_pretty()?);
        }
    }
    Ok(())
}

fn run_profiles(config: &DiagConfig) -> Result<()> {
    let session = train(config);
    session
        .ensure_ready()
        .context("Profile library is not usable for diagnosis")?;
    info!(profiles = session.library().len(), "All reference profiles learned");
    Ok(())
}

fn run_analyze(config: &DiagConfig, file: PathBuf) -> Result<()> {
    let series = load_table(&file, config.features.min_samples)
        .with_context(|| format!("Cannot analyze {}", file.display()))?;
    let features = FeatureExtractor::new(config.features).extract(&series);
    println!("{}", terminal::render_analysis(&features));
    Ok(())
}

fn run_check_config(config: &DiagConfig) -> Result<()> {
    config.validate()?;
    print!("{}", config.to_toml()?);
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.json_logs);

    let config = load_config(&args)?;

    match args.command {
        Command::Diagnose {
            target,
            stdin,
            raw,
            allow_partial,
            format,
        } => run_diagnose(config, target, stdin, raw, allow_partial, format),
        Command::Profiles => run_profiles(&config),
        Command::Analyze { file } => run_analyze(&config, file),
        Command::CheckConfig => run_check_config(&config),
    }
}
