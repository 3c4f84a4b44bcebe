//! Command table
//!
//! Names, help text and parsing for every REPL command.

/// A REPL command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit,
    Help,
    Map,
    MapBack,
    Explore,
    Catch,
    Inspect,
    Pokedex,
    Cache,
}

impl Command {
    /// Every command, in no particular order
    pub const ALL: [Command; 9] = [
        Command::Exit,
        Command::Help,
        Command::Map,
        Command::MapBack,
        Command::Explore,
        Command::Catch,
        Command::Inspect,
        Command::Pokedex,
        Command::Cache,
    ];

    /// Parses the word typed at the prompt.
    pub fn parse(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.key() == word)
    }

    /// The word that invokes the command
    pub fn key(self) -> &'static str {
        match self {
            Command::Exit => "exit",
            Command::Help => "help",
            Command::Map => "map",
            Command::MapBack => "mapb",
            Command::Explore => "explore",
            Command::Catch => "catch",
            Command::Inspect => "inspect",
            Command::Pokedex => "pokedex",
            Command::Cache => "cache",
        }
    }

    /// Display name shown in help
    pub fn name(self) -> &'static str {
        match self {
            Command::Exit => "Exit",
            Command::Help => "Help",
            Command::Map => "Map",
            Command::MapBack => "Map Back",
            Command::Explore => "Explore",
            Command::Catch => "Catch",
            Command::Inspect => "Inspect",
            Command::Pokedex => "Pokedex",
            Command::Cache => "Cache",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::Exit => "Exit the Pokedex.",
            Command::Help => "List all commands and their descriptions.",
            Command::Map => "Page forward in the Pokedex areas.",
            Command::MapBack => "Page backward in the Pokedex areas.",
            Command::Explore => "Explore a specific area in a map area.\nUsage: explore <area_name>",
            Command::Catch => "Catch a Pokemon.\nUsage: catch <pokemon_name>",
            Command::Inspect => "Inspect a Pokemon.\nUsage: inspect <pokemon_name>",
            Command::Pokedex => "List all caught Pokemon.",
            Command::Cache => "Show response cache statistics.",
        }
    }

    /// Commands sorted by the word that invokes them
    pub fn sorted() -> Vec<Command> {
        let mut commands = Self::ALL.to_vec();
        commands.sort_by_key(|command| command.key());
        commands
    }
}
