//! Console command parser.
//!
//! Turns raw input lines into structured `Command`s that the session loop
//! dispatches on. A bare pair of coordinates is a cell activation.

use log::warn;

use crate::board::Square;

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A cell was activated: select a piece or choose a destination.
    Activate(Square),

    /// Print the board diagram.
    Board,

    /// Print the position in compact notation.
    Position,

    /// Print a JSON snapshot of the board.
    Json,

    /// Leave the game.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines, unrecognized commands, and coordinates
/// outside the board.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let first = *tokens.first()?;

    match first {
        "board" => Some(Command::Board),
        "position" => Some(Command::Position),
        "json" => Some(Command::Json),
        "quit" | "exit" => Some(Command::Quit),
        _ => parse_activate(&tokens),
    }
}

/// Parses `<x> <y>` with both coordinates in 0-7.
fn parse_activate(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        warn!("unknown command: {}", tokens.join(" "));
        return None;
    }
    let (x, y) = match (tokens[0].parse::<i32>(), tokens[1].parse::<i32>()) {
        (Ok(x), Ok(y)) => (x, y),
        _ => {
            warn!("unknown command: {}", tokens.join(" "));
            return None;
        }
    };
    match Square::checked(x, y) {
        Some(sq) => Some(Command::Activate(sq)),
        None => {
            warn!("cell ({}, {}) is off the board", x, y);
            None
        }
    }
}
