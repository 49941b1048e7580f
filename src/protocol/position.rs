//! Compact position notation.
//!
//! A position is written as `<side>:<row0>/<row1>/.../<row7>`. The side to
//! move is `a` or `b`. Each row lists its four playable cells from left to
//! right: `a`/`b` for men, `A`/`B` for kings, `.` for empty.
//!
//! The starting position is [`INITIAL_POSITION`].

use crate::board::{BoardState, CellContent, Piece, Player, Square, BOARD_SIZE};

/// The standard starting position with A to move.
pub const INITIAL_POSITION: &str = "a:aaaa/aaaa/aaaa/..../..../bbbb/bbbb/bbbb";

const CELLS_PER_ROW: usize = BOARD_SIZE / 2;

/// Errors that can occur during position parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("missing '<side>:' prefix")]
    MissingSide,

    #[error("invalid side to move: '{0}'")]
    InvalidSide(String),

    #[error("expected 8 rows separated by '/', got {0}")]
    WrongRowCount(usize),

    #[error("row {row} has {len} cells, expected 4")]
    WrongRowLength { row: usize, len: usize },

    #[error("invalid cell '{glyph}' in row {row}")]
    InvalidGlyph { row: usize, glyph: char },
}

/// The playable square for cell `k` (0-3) of row `y`.
fn playable_square(k: usize, y: usize) -> Square {
    let x = 2 * k + (y + 1) % 2;
    Square::new(x as u8, y as u8)
}

/// Parses a position string into a board and the side to move.
pub fn parse_position(s: &str) -> Result<(BoardState, Player), PositionError> {
    let (side, rows) = s.trim().split_once(':').ok_or(PositionError::MissingSide)?;
    let mut side_chars = side.chars();
    let player = match (side_chars.next(), side_chars.next()) {
        (Some(c), None) => Player::from_notation_char(c),
        _ => None,
    }
    .ok_or_else(|| PositionError::InvalidSide(side.to_string()))?;

    let rows: Vec<&str> = rows.split('/').collect();
    if rows.len() != BOARD_SIZE {
        return Err(PositionError::WrongRowCount(rows.len()));
    }

    let mut board = BoardState::empty();
    for (y, row) in rows.iter().enumerate() {
        let len = row.chars().count();
        if len != CELLS_PER_ROW {
            return Err(PositionError::WrongRowLength { row: y, len });
        }
        for (k, glyph) in row.chars().enumerate() {
            let content = match glyph {
                '.' => CellContent::Empty,
                _ => CellContent::Piece(
                    Piece::from_glyph(glyph)
                        .ok_or(PositionError::InvalidGlyph { row: y, glyph })?,
                ),
            };
            board.set(playable_square(k, y), content);
        }
    }

    Ok((board, player))
}

/// Encodes a board and side to move. Selection flags are not recorded.
pub fn encode_position(board: &BoardState, to_move: Player) -> String {
    let mut out = String::with_capacity(2 + BOARD_SIZE * (CELLS_PER_ROW + 1));
    out.push(to_move.notation_char());
    out.push(':');
    for y in 0..BOARD_SIZE {
        if y > 0 {
            out.push('/');
        }
        for k in 0..CELLS_PER_ROW {
            out.push(board.get(playable_square(k, y)).glyph());
        }
    }
    out
}
