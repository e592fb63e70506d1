use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vexa_rag::{Config, RagClient, RagError};

#[derive(Parser)]
#[command(name = "vexa-rag", version, about = "Document question answering over a local model")]
struct Cli {
    /// Path to a config file (defaults to the platform config location)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ingest every supported document under a folder (full replace)
    Ingest {
        /// Folder to scan recursively for .txt, .md, and .pdf files
        folder: PathBuf,
    },
    /// Ask a question against the ingested documents
    Ask {
        /// The question to answer
        question: String,
    },
    /// Remove all records from the index
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load_or_default()?,
    };
    config.apply_env_overrides();

    let client = RagClient::connect(config).await?;

    match cli.command {
        Command::Ingest { folder } => {
            let report = client.ingest_folder(&folder).await?;
            println!(
                "Ingested {} chunks from {} files in {} ms",
                report.chunks_ingested, report.files_scanned, report.duration_ms
            );
        }
        Command::Ask { question } => match client.ask(&question).await {
            Ok(answer) => println!("{answer}"),
            // Input problems are messages for the user, not stack traces
            Err(e @ RagError::Query(_)) => println!("{e}"),
            Err(e) => return Err(e.into()),
        },
        Command::Clear => {
            client.clear_index().await?;
            println!("Index cleared");
        }
    }

    Ok(())
}
