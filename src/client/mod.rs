//! API Client Module
//!
//! HTTP access to the PokeAPI, cached through the response cache.

mod api;
pub mod models;

pub use api::PokeClient;
pub use models::{
    LocationAreaDetail, LocationAreaPage, NamedResource, PokemonDetail, PokemonEncounter,
    PokemonStat, PokemonType,
};
