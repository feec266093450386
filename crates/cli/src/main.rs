//! HelpDoc CLI — the main entry point.
//!
//! Commands:
//! - `onboard`  — Write a starter config file
//! - `serve`    — Start the HTTP gateway
//! - `sync`     — Fetch and parse the configured document
//! - `ask`      — Answer one question from the document
//! - `sections` — Show how a local export splits into sections
//! - `status`   — Show configuration status

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "helpdoc",
    about = "HelpDoc — answers support questions from a shared document",
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
    /// Write a default configuration file
    Onboard,

    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Fetch the document and report the sections it parses into
    Sync {
        /// Override the configured document ID
        #[arg(short, long)]
        document_id: Option<String>,
    },

    /// Ask a single question
    Ask {
        /// The question to answer
        question: String,

        /// Override the configured document ID
        #[arg(short, long)]
        document_id: Option<String>,
    },

    /// Parse a local plain-text export and list its sections
    Sections {
        /// Path to the exported text file
        file: PathBuf,
    },

    /// Show configuration status
    Status,
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
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Sync { document_id } => commands::sync::run(document_id).await?,
        Commands::Ask {
            question,
            document_id,
        } => commands::ask::run(question, document_id).await?,
        Commands::Sections { file } => commands::sections::run(file).await?,
        Commands::Status => commands::status::run().await?,
    }

    Ok(())
}
