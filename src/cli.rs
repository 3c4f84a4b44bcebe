//! Command-line interface parsing for the Pokedex
//!
//! Flags given here override the environment configuration.

use clap::Parser;

use crate::cache::MAX_INTERVAL;
use crate::config::Config;

/// Pokedex - Explore the Pokemon world map from your terminal
#[derive(Parser, Debug, Default)]
#[command(name = "pokedex")]
#[command(about = "Interactive PokeAPI explorer with a response cache")]
#[command(version)]
pub struct Cli {
    /// Base URL of the PokeAPI
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Seconds a cached response lives; also how often stale entries are swept
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..=MAX_INTERVAL.as_secs()))]
    pub cache_interval: Option<u64>,

    /// HTTP request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl Cli {
    /// Layers these flags over `config`.
    pub fn apply(self, config: Config) -> Config {
        config.with_overrides(self.api_url, self.cache_interval, self.timeout)
    }
}
