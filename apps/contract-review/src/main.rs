//! contract-review
//!
//! Analyzes plain-text contracts clause by clause and compares two of them.
//! Results are printed to stdout as JSON; logs go to stderr.
//!
//! No external reasoning service is wired in here, so every explanation
//! comes from the rules-based fallbacks.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use clause_engine::{ComparisonEngine, ContractAnalyzer, EngineConfig, OfflineReasoner};
use shared_types::DocumentType;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for contract-review
#[derive(Parser, Debug)]
#[command(name = "contract-review")]
#[command(about = "Clause-level risk analysis for contracts")]
struct Args {
    /// Engine configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a single contract
    Analyze {
        file: PathBuf,

        /// Document type tag, e.g. rental_agreement
        #[arg(long, default_value = "rental_agreement")]
        doc_type: String,
    },
    /// Compare two contracts clause by clause
    Compare {
        file_a: PathBuf,
        file_b: PathBuf,

        /// Document type tag applied to both files
        #[arg(long, default_value = "rental_agreement")]
        doc_type: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &args.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let analyzer = ContractAnalyzer::with_reasoner(Arc::new(OfflineReasoner), &config);

    let output = match args.command {
        Command::Analyze { file, doc_type } => {
            let text = read_contract(&file)?;
            let analysis = analyzer
                .analyze(&text, DocumentType::from_tag(&doc_type))
                .await;
            serde_json::to_string_pretty(&analysis)?
        }
        Command::Compare {
            file_a,
            file_b,
            doc_type,
        } => {
            let document_type = DocumentType::from_tag(&doc_type);
            let text_a = read_contract(&file_a)?;
            let text_b = read_contract(&file_b)?;
            let first = analyzer.analyze(&text_a, document_type).await;
            let second = analyzer.analyze(&text_b, document_type).await;
            let report = ComparisonEngine::new(config.comparison.clone()).compare(&first, &second);
            serde_json::to_string_pretty(&report)?
        }
    };

    let stats = analyzer.scheduler().stats();
    info!(
        dispatched = stats.dispatched,
        retried = stats.retried,
        failed = stats.failed,
        "External calls finished"
    );

    println!("{output}");
    Ok(())
}

fn read_contract(path: &Path) -> anyhow::Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading contract {}", path.display()))?;
    info!(path = %path.display(), chars = text.len(), "Loaded contract");
    Ok(text)
}
