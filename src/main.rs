//! Pokedex - An interactive PokeAPI explorer
//!
//! Reads commands from stdin and answers them from the PokeAPI, caching
//! responses in memory for the configured interval.

use std::io;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::cli::Cli;
use pokedex::{repl, Cache, Config, PokeClient, Session};

/// Main entry point for the Pokedex.
///
/// # Startup Sequence
/// 1. Parse command-line flags
/// 2. Initialize tracing subscriber for logging on stderr
/// 3. Load configuration from environment variables, then apply flags
/// 4. Create the response cache, which starts its reaper
/// 5. Run the REPL on stdin/stdout until `exit` or end of input
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Defaults to "warn" so logs stay out of the way of the prompt,
    // can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = cli.apply(Config::from_env());
    info!(
        "Configuration loaded: api_url={}, cache_interval={}s, http_timeout={}s",
        config.api_url, config.cache_interval, config.http_timeout
    );

    let cache = Cache::new(config.cache_interval()).context("invalid cache interval")?;
    let client = PokeClient::new(&config.api_url, config.http_timeout(), cache.clone())
        .context("failed to build HTTP client")?;
    let mut session = Session::new(client);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();
    repl::run(&mut session, stdin, &mut stdout).await?;

    cache.stop_reaper().await;
    info!("Pokedex shutdown complete");
    Ok(())
}
