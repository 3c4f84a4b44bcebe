//! Pokedex - An interactive PokeAPI explorer
//!
//! Provides a time-bounded in-memory response cache with a background reaper,
//! a cached PokeAPI client, and the REPL that drives them.

pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod repl;
pub mod tasks;

pub use cache::Cache;
pub use client::PokeClient;
pub use config::Config;
pub use error::{PokedexError, Result};
pub use repl::Session;
