//! Gyrolog CLI: command-line interface for recording and inspecting motion sensor sessions.
//!
//! Usage:
//!   gyrolog record --events <PATH>    Record a captured event stream to CSV
//!   gyrolog session --events <PATH>   Drive a session interactively from stdin
//!   gyrolog inspect <CSV>             Summarize a CSV export

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use gyrolog_common::config::AppConfig;

mod commands;
mod terminal;

#[derive(Parser)]
#[command(
    name = "gyrolog",
    about = "Record device orientation and motion sensors to CSV",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record every motion event of a captured stream and export it as CSV
    Record {
        /// JSONL sensor event stream (`-` for stdin)
        #[arg(short, long)]
        events: PathBuf,

        /// Directory for the CSV export (defaults to the configured output dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replay events at their captured pace instead of as fast as possible
        #[arg(long)]
        realtime: bool,
    },

    /// Run a live session over an event stream, controlled by stdin commands
    Session {
        /// JSONL sensor event stream
        #[arg(short, long)]
        events: PathBuf,

        /// Directory for CSV exports (defaults to the configured output dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replay events at their captured pace instead of as fast as possible
        #[arg(long)]
        realtime: bool,
    },

    /// Summarize a CSV export
    Inspect {
        /// Path to the CSV file
        path: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load();
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    gyrolog_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Record {
            events,
            output,
            realtime,
        } => {
            let output = output.unwrap_or_else(|| config.output_dir.clone());
            commands::record::run(&config, events, output, realtime).await
        }
        Commands::Session {
            events,
            output,
            realtime,
        } => {
            let output = output.unwrap_or_else(|| config.output_dir.clone());
            commands::session::run(&config, events, output, realtime).await
        }
        Commands::Inspect { path, json } => commands::inspect::run(path, json),
    }
}
