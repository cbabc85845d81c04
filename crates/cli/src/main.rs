//! exoquery CLI — the main entry point.
//!
//! Commands:
//! - `query`  — Run the full query pipeline over the input target lists
//! - `status` — Show resolved configuration and directory state
//! - `fields` — Print the active parameter field catalogue

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "exoquery",
    about = "exoquery — JWST target parameter query pipeline",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the archive and write the per-cycle reports
    Query {
        /// Only process this cycle number
        #[arg(short, long)]
        cycle: Option<u32>,

        /// Override the input directory
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Override the output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show resolved configuration and directory state
    Status,

    /// Print the active parameter field catalogue
    Fields {
        /// Emit the catalogue as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Query {
            cycle,
            input,
            output,
        } => commands::query::run(cycle, input, output).await?,
        Commands::Status => commands::status::run().await?,
        Commands::Fields { json } => commands::fields::run(json).await?,
    }

    Ok(())
}
