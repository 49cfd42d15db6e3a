use sapper_core::{Coord, Coord2, Input};
use thiserror::Error;

pub const HELP: &str = "commands: reveal X Y (r), flag X Y (f), restart (n), help (h), quit (q)";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Play(Input),
    Help,
    Quit,
    /// Well-formed but addresses no cell, dropped without feedback.
    Ignored,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command {0:?}")]
    Unknown(String),
    #[error("Expected two cell coordinates")]
    MissingCoords,
    #[error("Not a coordinate: {0:?}")]
    InvalidNumber(String),
}

/// Parses one input line, e.g. `r 3 4` or `flag 0 8`.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(Command::Ignored);
    };

    match verb.to_ascii_lowercase().as_str() {
        "r" | "reveal" => Ok(parse_coords(words)?.map_or(Command::Ignored, |coords| {
            Command::Play(Input::RevealAt(coords))
        })),
        "f" | "flag" => Ok(parse_coords(words)?.map_or(Command::Ignored, |coords| {
            Command::Play(Input::ToggleFlagAt(coords))
        })),
        "n" | "new" | "restart" => Ok(Command::Play(Input::Restart)),
        "h" | "help" | "?" => Ok(Command::Help),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        _ => Err(CommandError::Unknown(verb.to_owned())),
    }
}

/// `None` when the numbers are valid integers but cannot address any cell.
fn parse_coords<'a>(
    mut words: impl Iterator<Item = &'a str>,
) -> Result<Option<Coord2>, CommandError> {
    let (Some(x), Some(y)) = (words.next(), words.next()) else {
        return Err(CommandError::MissingCoords);
    };

    let x = parse_axis(x)?;
    let y = parse_axis(y)?;
    Ok(x.zip(y))
}

fn parse_axis(word: &str) -> Result<Option<Coord>, CommandError> {
    let value: i64 = word
        .parse()
        .map_err(|_| CommandError::InvalidNumber(word.to_owned()))?;
    Ok(Coord::try_from(value).ok())
}
