use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{AnalyzerSession, HttpAnalysisBackend};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod render;
mod repl;

use config::load_settings;
use render::ScreenText;

#[derive(Parser, Debug)]
#[command(name = "analyzer", about = "Analyze text and browse past analyses")]
struct Args {
    /// Overrides the configured analysis service address.
    #[arg(long)]
    backend_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit TEXT for analysis and print the result with the refreshed history.
    Analyze { text: String },
    /// Print the history, expanding the given entry ids.
    History {
        #[arg(long = "expand", value_name = "ID")]
        expand: Vec<String>,
    },
    /// Read commands from stdin until `:quit` or end of input.
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings()?;
    if let Some(url) = args.backend_url {
        settings.backend_url = url;
    }
    info!(backend_url = %settings.backend_url, "resolved analysis service address");

    let backend = HttpAnalysisBackend::new(&settings.backend_url)
        .context("failed to configure analysis backend")?;
    let session = AnalyzerSession::mount(Arc::new(backend)).await;

    match args.command {
        Command::Analyze { text } => {
            session.submission().submit(text).await;
            println!("{}", ScreenText(&session.view().await));
        }
        Command::History { expand } => {
            for raw in &expand {
                session
                    .history()
                    .toggle_disclosure(&repl::parse_entry_id(raw))
                    .await;
            }
            println!("{}", ScreenText(&session.view().await));
        }
        Command::Interactive => repl::run(&session).await?,
    }

    Ok(())
}
