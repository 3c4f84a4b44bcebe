//! REPL session state and command handlers

use std::collections::BTreeMap;
use std::io::Write;

use rand::Rng;
use tracing::debug;

use super::Command;
use crate::client::{PokeClient, PokemonDetail};
use crate::error::{PokedexError, Result};

/// A catch succeeds when the roll lands below this value.
pub const CATCH_THRESHOLD: u32 = 40;

/// Whether the loop should keep reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Returns true if a catch roll succeeds.
pub fn catch_succeeds(roll: u32) -> bool {
    roll < CATCH_THRESHOLD
}

/// State carried between commands: the API client, the map cursor and the
/// Pokemon caught so far.
#[derive(Debug)]
pub struct Session {
    client: PokeClient,
    /// Next location-area page, None once the last page was shown
    next: Option<String>,
    /// Previous location-area page, None on the first page
    previous: Option<String>,
    pokedex: BTreeMap<String, PokemonDetail>,
}

impl Session {
    /// Starts a session positioned before the first location-area page.
    pub fn new(client: PokeClient) -> Self {
        let next = Some(client.location_areas_url());
        Self {
            client,
            next,
            previous: None,
            pokedex: BTreeMap::new(),
        }
    }

    /// Caught Pokemon keyed by name
    pub fn pokedex(&self) -> &BTreeMap<String, PokemonDetail> {
        &self.pokedex
    }

    /// Records `pokemon` as caught.
    pub fn add_to_pokedex(&mut self, pokemon: PokemonDetail) {
        self.pokedex.insert(pokemon.name.clone(), pokemon);
    }

    /// Runs `command` with its optional argument, writing output to `out`.
    pub async fn execute<W: Write>(
        &mut self,
        command: Command,
        arg: Option<&str>,
        out: &mut W,
    ) -> Result<Flow> {
        debug!("Executing command {:?} with argument {:?}", command, arg);
        match command {
            Command::Exit => {
                writeln!(out, "Exiting Pokedex... Bye bye!")?;
                return Ok(Flow::Exit);
            }
            Command::Help => self.help(out)?,
            Command::Map => self.map(out).await?,
            Command::MapBack => self.map_back(out).await?,
            Command::Explore => self.explore(arg, out).await?,
            Command::Catch => self.catch(arg, out).await?,
            Command::Inspect => self.inspect(arg, out)?,
            Command::Pokedex => self.list_pokedex(out)?,
            Command::Cache => self.cache_stats(out).await?,
        }
        Ok(Flow::Continue)
    }

    fn help<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Available commands:")?;
        for command in Command::sorted() {
            writeln!(out, "-----> {}", command.name())?;
            writeln!(out, "{}", command.description())?;
        }
        Ok(())
    }

    async fn map<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let Some(url) = self.next.clone() else {
            writeln!(out, "You are on the last page")?;
            return Ok(());
        };
        self.show_page(&url, out).await
    }

    async fn map_back<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let Some(url) = self.previous.clone() else {
            writeln!(out, "You are on the first page")?;
            return Ok(());
        };
        self.show_page(&url, out).await
    }

    /// Fetches the page at `url`, moves the cursor to it and prints its areas.
    async fn show_page<W: Write>(&mut self, url: &str, out: &mut W) -> Result<()> {
        let page = self.client.location_areas(url).await?;
        self.next = page.next;
        self.previous = page.previous;

        for area in &page.results {
            writeln!(out, "Name: {}", area.name)?;
        }
        Ok(())
    }

    async fn explore<W: Write>(&mut self, arg: Option<&str>, out: &mut W) -> Result<()> {
        let area = arg.ok_or(PokedexError::MissingArgument("an area name"))?;

        writeln!(out, "Exploring area: {}", area)?;
        let names = self.client.explore_area(area).await?;

        if names.is_empty() {
            writeln!(out, "no Pokemon found in this area")?;
        } else {
            writeln!(out, "Found pokemon:")?;
            for name in names {
                writeln!(out, "- {}", name)?;
            }
        }
        Ok(())
    }

    async fn catch<W: Write>(&mut self, arg: Option<&str>, out: &mut W) -> Result<()> {
        let name = arg
            .ok_or(PokedexError::MissingArgument("a Pokemon name"))?
            .to_lowercase();

        let pokemon = self.client.pokemon(&name).await?;
        writeln!(out, "Throwing a Pokeball at {}...", name)?;

        let roll = rand::thread_rng().gen_range(0..=pokemon.catch_difficulty());
        if catch_succeeds(roll) {
            writeln!(out, "{} was caught!", pokemon.name)?;
            self.add_to_pokedex(pokemon);
        } else {
            writeln!(out, "{} escaped!", pokemon.name)?;
        }
        Ok(())
    }

    fn inspect<W: Write>(&self, arg: Option<&str>, out: &mut W) -> Result<()> {
        let name = arg
            .ok_or(PokedexError::MissingArgument("a Pokemon name"))?
            .to_lowercase();

        let Some(pokemon) = self.pokedex.get(&name) else {
            writeln!(out, "Pokemon {} not found in your Pokedex", name)?;
            return Ok(());
        };

        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Stats:")?;
        for stat in &pokemon.stats {
            writeln!(out, " - {}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(out, "Types:")?;
        for pokemon_type in &pokemon.types {
            writeln!(out, " - {}", pokemon_type.kind.name)?;
        }
        Ok(())
    }

    fn list_pokedex<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.pokedex.is_empty() {
            writeln!(out, "Your Pokedex is empty")?;
            return Ok(());
        }

        writeln!(out, "Your Pokedex:")?;
        for name in self.pokedex.keys() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }

    async fn cache_stats<W: Write>(&self, out: &mut W) -> Result<()> {
        let cache = self.client.cache();
        let stats = cache.stats().await;

        writeln!(out, "Cache interval: {:?}", cache.interval())?;
        writeln!(out, "Entries: {}", stats.total_entries)?;
        writeln!(
            out,
            "Hits: {}, misses: {} (hit rate {:.1}%)",
            stats.hits,
            stats.misses,
            stats.hit_rate() * 100.0
        )?;
        writeln!(out, "Sweeps: {}, reaped: {}", stats.sweeps, stats.reaped)?;
        match stats.last_sweep {
            Some(at) => writeln!(out, "Last sweep: {}", at.to_rfc3339())?,
            None => writeln!(out, "Last sweep: never")?,
        }
        Ok(())
    }
}
