//! REPL Module
//!
//! Line-oriented read/dispatch loop over the command table.

mod command;
mod session;

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::error::Result;

pub use command::Command;
pub use session::{catch_succeeds, Flow, Session, CATCH_THRESHOLD};

/// Prompt printed before each line is read
pub const PROMPT: &str = "Pokedex > ";

/// Lowercases `input` and splits it into words.
pub fn clean_input(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_lowercase).collect()
}

/// Reads commands from `input` until `exit` or end of input.
///
/// Command failures are reported on `out` and the loop carries on; only
/// errors reading input or writing output end it early.
pub async fn run<R, W>(session: &mut Session, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            debug!("Input closed, leaving REPL");
            writeln!(out)?;
            return Ok(());
        };

        let words = clean_input(&line);
        let Some((name, rest)) = words.split_first() else {
            continue;
        };
        let arg = rest.first().map(String::as_str);

        let Some(command) = Command::parse(name) else {
            writeln!(
                out,
                "unknown command '{}'. Type 'help' for a list of commands.",
                name
            )?;
            continue;
        };

        match session.execute(command, arg, out).await {
            Ok(Flow::Exit) => return Ok(()),
            Ok(Flow::Continue) => {}
            Err(e) => writeln!(out, "error executing command '{}': {}", name, e)?,
        }
    }
}
