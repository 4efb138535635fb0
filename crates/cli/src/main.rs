//! Exam Score Predictor CLI
//!
//! A command-line tool for requesting score predictions, checking the
//! server, and inspecting pipeline artifacts.

mod client;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{health, inspect, predict};
use std::path::PathBuf;

/// Exam Score Predictor CLI
#[derive(Parser)]
#[command(name = "scorectl")]
#[command(author, version, about = "CLI for the Exam Score Predictor", long_about = None)]
pub struct Cli {
    /// API endpoint URL (can also be set via SCORE_API_URL env var)
    #[arg(long, env = "SCORE_API_URL")]
    pub api_url: Option<String>,

    /// Output format
    #[arg(long, short)]
    pub format: Option<output::OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Request a predicted exam score from the server
    Predict(predict::PredictArgs),

    /// Show server health and readiness
    Health,

    /// Load a pipeline artifact locally and describe it
    Inspect {
        /// Path to the pipeline artifact
        artifact: PathBuf,

        /// Score this JSON record with the artifact
        #[arg(long)]
        record: Option<PathBuf>,
    },
}

async fn run(cli: Cli) -> Result<()> {
    let config = config::Config::load()?;
    let format = cli
        .format
        .or_else(|| {
            config
                .default_format
                .as_deref()
                .and_then(output::OutputFormat::from_name)
        })
        .unwrap_or_default();

    match cli.command {
        Commands::Predict(args) => {
            let client = client::ApiClient::new(&config.api_url(cli.api_url))?;
            predict::predict(&client, &args, format).await
        }
        Commands::Health => {
            let client = client::ApiClient::new(&config.api_url(cli.api_url))?;
            health::show_health(&client, format).await
        }
        Commands::Inspect { artifact, record } => {
            inspect::inspect(&artifact, record.as_deref(), format)
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        output::print_error(&format!("{:#}", err));
        std::process::exit(1);
    }
}
