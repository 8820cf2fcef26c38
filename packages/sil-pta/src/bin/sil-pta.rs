//! sil-pta CLI
//!
//! Steensgaard points-to analysis of a SIL source file.
//!
//! # Usage
//!
//! ```bash
//! # Typing report on stdout
//! cargo run --bin sil-pta -- program.sil
//!
//! # JSON report plus the shape graph as Graphviz DOT
//! cargo run --bin sil-pta -- program.sil --format json --dot shape.dot
//!
//! # Keep the first shape on conflicts, log every statement
//! cargo run --bin sil-pta -- program.sil --conflict-policy keep-first --verbose
//! ```

use clap::Parser;
use sil_pta::config::{AnalysisConfig, ConflictPolicy};
use sil_pta::errors::Result;
use sil_pta::features::points_to::{
    DotRenderer, PointsToAnalyzer, ReportFormat, ReporterFactory,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sil-pta")]
#[command(about = "Steensgaard points-to analysis for SIL programs", long_about = None)]
struct Cli {
    /// SIL source file
    file: PathBuf,

    /// YAML configuration file (schema version 1)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the storage shape graph as Graphviz DOT
    #[arg(long)]
    dot: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Conflict policy (overrides config and env)
    #[arg(long, value_enum)]
    conflict_policy: Option<ConflictPolicy>,

    /// Debug logging, including one line per unified statement
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "analysis failed");
            eprintln!("error: {}", err);
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "sil_pta=debug" } else { "sil_pta=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<AnalysisConfig> {
    let config = match &cli.config {
        Some(path) => AnalysisConfig::from_yaml(path)?,
        None => AnalysisConfig::default(),
    };
    let mut config = config.apply_env()?;

    if let Some(policy) = cli.conflict_policy {
        config = config.with_conflict_policy(policy);
    }
    if cli.verbose {
        config = config.with_trace_statements(true);
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    let outcome = PointsToAnalyzer::new(config).analyze_path(&cli.file)?;

    if let Some(path) = &cli.dot {
        std::fs::write(path, outcome.render(&DotRenderer))?;
        info!(path = %path.display(), nodes = outcome.graph.node_count(), "wrote shape graph");
    }

    let reporter = ReporterFactory::create_boxed(cli.format);
    print!("{}", outcome.report(reporter.as_ref())?);
    Ok(())
}
