//! Bookfolio search server binary.

use bookfolio::{SearchServer, ServerConfig};
use bookfolio_search::BookSearch;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Bookfolio: book search across Google Books and OpenLibrary.
#[derive(Parser)]
#[command(name = "bookfolio-server", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides the config file).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides the config file).
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Users can override with RUST_LOG=debug to see everything.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("bookfolio=info,bookfolio_search=info,hyper=warn")
        }))
        .init();

    let cli = Cli::parse();

    let mut config = ServerConfig::load(cli.config.as_deref())?;
    config.apply_env();
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    config.validate()?;

    if config.search.api_key().is_none() {
        info!("no Google Books API key configured, using anonymous quota");
    }

    let search = BookSearch::new(config.search.clone())?;
    let server = SearchServer::start(search, &config.server).await?;
    info!(port = server.port(), "bookfolio ready");

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    server.shutdown();
    Ok(())
}
