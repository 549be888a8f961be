//! @ai:module:intent CLI for writing test and benchmark reports
//! @ai:module:layer presentation

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use testreport::{
    build_description,
    environment::DefinesProvider,
    JsonReportWriter, ReportEnvironment, ReportError, ReporterConfig,
    ResultRecord,
};

#[derive(Parser)]
#[command(name = "testreport")]
#[command(about = "Write test and benchmark results as an incremental JSON report")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a report from a JSON array of measured results
    Run {
        /// Path to the results file
        #[arg(short, long)]
        results: PathBuf,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Report destination (overrides the configured path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Clock frequency the tick counts were measured with
        #[arg(long)]
        ticks_per_second: Option<f64>,

        /// Send the report to the log instead of a file
        #[arg(long)]
        no_file: bool,
    },

    /// Print the build description and active build flags
    Describe,

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "reporter.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("testreport=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            results,
            config,
            output,
            ticks_per_second,
            no_file,
        } => run_report(RunArgs {
            results,
            config,
            output,
            ticks_per_second,
            no_file,
        }),
        Commands::Describe => describe(),
        Commands::Init { output } => init_config(output),
    }
}

struct RunArgs {
    results: PathBuf,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    ticks_per_second: Option<f64>,
    no_file: bool,
}

/// @ai:intent Stream every record from the results file into a report
/// @ai:effects fs:read, fs:write
fn run_report(args: RunArgs) -> Result<()> {
    let mut config = load_or_default_config(args.config)?;
    if let Some(output) = args.output {
        config.output_path = output;
    }
    if args.ticks_per_second.is_some() {
        config.ticks_per_second = args.ticks_per_second;
    }
    if args.no_file {
        config.file_output = false;
    }

    let records = load_records(&args.results)?;
    tracing::info!(
        "Loaded {} results from {}",
        records.len(),
        args.results.display()
    );

    if let Some(frequency) = config.ticks_per_second {
        if frequency <= 0.0 {
            anyhow::bail!("ticks_per_second must be positive, got {}", frequency);
        }
    }

    let destination = config.output_path.clone();
    let mut writer = JsonReportWriter::new(ReportEnvironment::detect(), config);
    writer.create(&destination);
    for record in &records {
        writer.report(record);
    }
    let fallback = writer.is_fallback();
    writer.finish();

    if !fallback {
        tracing::info!("Report written to {}", destination.display());
    }
    Ok(())
}

/// @ai:intent Parse a JSON array of result records
/// @ai:effects fs:read
fn load_records(path: &Path) -> Result<Vec<ResultRecord>> {
    let content = std::fs::read_to_string(path).map_err(|source| ReportError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let records = serde_json::from_str(&content).map_err(ReportError::from)?;
    Ok(records)
}

/// @ai:intent Print what the header of a report from this build would contain
/// @ai:effects io
fn describe() -> Result<()> {
    let env = ReportEnvironment::detect();
    println!("{}", build_description(env.build.as_ref()));
    for name in env.defines.active_defines() {
        println!("  {}", name);
    }
    Ok(())
}

/// @ai:intent Write the default configuration file
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<()> {
    let config = ReporterConfig::default();
    config.save(&output)?;
    println!("Configuration written to {}", output.display());
    Ok(())
}

fn load_or_default_config(path: Option<PathBuf>) -> Result<ReporterConfig> {
    match path {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            Ok(ReporterConfig::load(&path)?)
        }
        None => {
            let default_path = PathBuf::from("reporter.toml");
            if default_path.exists() {
                tracing::info!("Loading config from {}", default_path.display());
                Ok(ReporterConfig::load(&default_path)?)
            } else {
                Ok(ReporterConfig::default())
            }
        }
    }
}
