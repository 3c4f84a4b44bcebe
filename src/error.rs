//! Error types for the Pokedex
//!
//! Provides unified error handling using thiserror. The response cache itself
//! never fails on get/put; everything here comes from construction, the API
//! client or the REPL.

use thiserror::Error;

// == Pokedex Error Enum ==
/// Unified error type for the Pokedex.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// Cache interval was zero or longer than the cache accepts
    #[error("cache interval must be positive and at most one year")]
    InvalidInterval,

    /// Request URL was empty
    #[error("url is empty")]
    EmptyUrl,

    /// API answered with a non-success status
    #[error("received status code {0}")]
    Status(u16),

    /// Transport-level HTTP failure
    #[error("error fetching data: {0}")]
    Http(#[from] reqwest::Error),

    /// Payload could not be (de)serialized
    #[error("error decoding JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// Command was invoked without its required argument
    #[error("{0} must be provided")]
    MissingArgument(&'static str),

    /// Writing REPL output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the Pokedex.
pub type Result<T> = std::result::Result<T, PokedexError>;
