//! Response models for the PokeAPI
//!
//! Only the fields the Pokedex uses are modelled; serde ignores the rest.
//! Every type round-trips through JSON because cached responses are stored
//! as their JSON encoding.

use serde::{Deserialize, Serialize};

/// A named link to another API resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// One page of the location-area listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationAreaPage {
    /// Total number of location areas
    #[serde(default)]
    pub count: u32,
    /// URL of the next page, absent on the last page
    pub next: Option<String>,
    /// URL of the previous page, absent on the first page
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

/// Details of a single location area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationAreaDetail {
    pub name: String,
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

impl LocationAreaDetail {
    /// Names of the Pokemon found in this area, deduplicated and sorted.
    ///
    /// The same Pokemon appears once per encounter method in the raw data.
    pub fn pokemon_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .pokemon_encounters
            .iter()
            .map(|encounter| encounter.pokemon.name.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonEncounter {
    pub pokemon: NamedResource,
}

/// Details of a single Pokemon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub name: String,
    /// Experience gained for defeating it; null for some alternate forms
    #[serde(default)]
    pub base_experience: Option<u32>,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub types: Vec<PokemonType>,
}

impl PokemonDetail {
    /// Upper bound of the catch roll; higher means harder to catch.
    pub fn catch_difficulty(&self) -> u32 {
        self.base_experience.unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonType {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}
