use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use log::info;

use corpus_compare::config::{DEFAULT_RECORDS_PER_GROUP, DEFAULT_SAMPLE_SEED};
use corpus_compare::utils::logging::{create_spinner, finish_progress_bar};
use corpus_compare::{AnalysisConfig, DataSource, ReportWriter, run};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceKind {
    /// Seeded sample corpora
    Sample,
    /// CSV or Parquet exports given by --south/--north
    Production,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Compare Global South and Global North publication corpora"
)]
struct Cli {
    /// JSON analysis configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where the corpora come from
    #[arg(long, value_enum)]
    source: Option<SourceKind>,

    /// Global South export (.csv or .parquet)
    #[arg(long)]
    south: Option<PathBuf>,

    /// Global North export (.csv or .parquet)
    #[arg(long)]
    north: Option<PathBuf>,

    /// Seed for sample corpora
    #[arg(long)]
    seed: Option<u64>,

    /// Records per group for sample corpora
    #[arg(long)]
    records: Option<usize>,

    /// Output directory
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn build_config(cli: Cli) -> Result<AnalysisConfig> {
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_json_file(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    let kind = cli.source.unwrap_or(match &config.source {
        DataSource::Sample { .. } => SourceKind::Sample,
        DataSource::Production { .. } => SourceKind::Production,
    });

    config.source = match kind {
        SourceKind::Sample => {
            let (seed, records_per_group) = match config.source {
                DataSource::Sample {
                    seed,
                    records_per_group,
                } => (seed, records_per_group),
                DataSource::Production { .. } => (DEFAULT_SAMPLE_SEED, DEFAULT_RECORDS_PER_GROUP),
            };
            DataSource::Sample {
                seed: cli.seed.unwrap_or(seed),
                records_per_group: cli.records.unwrap_or(records_per_group),
            }
        }
        SourceKind::Production => {
            let (south, north) = match config.source {
                DataSource::Production { south, north } => (Some(south), Some(north)),
                DataSource::Sample { .. } => (None, None),
            };
            match (cli.south.or(south), cli.north.or(north)) {
                (Some(south), Some(north)) => DataSource::Production { south, north },
                _ => bail!("--source production requires both --south and --north"),
            }
        }
    };

    if let Some(output) = cli.output {
        config.output_dir = output;
    }

    config.validate().context("Invalid analysis configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = build_config(Cli::parse())?;
    info!("{config}");

    let start = Instant::now();
    let spinner = create_spinner("Analysing corpora...");
    let report = run(&config).context("Analysis failed")?;

    spinner.set_message("Writing artifacts...");
    let generated_at = chrono::Local::now().naive_local();
    let written = ReportWriter::new(&config.output_dir)
        .write_all(&report, generated_at)
        .with_context(|| format!("Failed to write results to {}", config.output_dir.display()))?;
    finish_progress_bar(&spinner, "Done");

    info!(
        "Wrote {} artifacts to {} in {:?}",
        written.len(),
        config.output_dir.display(),
        start.elapsed()
    );
    Ok(())
}
