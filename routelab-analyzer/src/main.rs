use std::{error::Error, path::PathBuf};

use clap::Parser;
use routelab_core::algo::complexity::complexity_report;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{AnalyzerConfig, OutputFormat};

mod config;
mod report;

/// Measures how Dijkstra, A* and bidirectional Dijkstra scale on synthetic routes
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML file with optional [engine] and [analysis] tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Route sizes to analyse, comma separated
    #[arg(short, long, value_delimiter = ',')]
    sizes: Option<Vec<usize>>,

    /// Maximum number of sampled nodes per route
    #[arg(short, long)]
    node_budget: Option<usize>,

    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => AnalyzerConfig::load(path)?,
        None => AnalyzerConfig::default(),
    };
    if let Some(sizes) = cli.sizes {
        config.analysis.sizes = sizes;
    }
    if let Some(node_budget) = cli.node_budget {
        config.engine.node_budget = node_budget;
    }
    if let Some(format) = cli.format {
        config.analysis.format = format;
    }

    info!(
        "Analysing route sizes {:?} with node budget {}",
        config.analysis.sizes, config.engine.node_budget
    );
    let report = complexity_report(&config.analysis.sizes, &config.engine)?;

    match config.analysis.format {
        OutputFormat::Text => print!("{}", report::render_text(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
