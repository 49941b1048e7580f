//! Players, piece ranks, and cell contents.
//!
//! A cell is either non-playable (`Blocked`), `Empty`, or holds a piece
//! with an owner, a rank, and a presentation-only `selected` flag.

use std::fmt;

use serde::Serialize;

/// One of the two sides. `A` moves toward increasing rows and moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Player {
    A,
    B,
}

impl Player {
    /// Returns the other player.
    pub const fn opponent(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Row delta of a man's non-capturing step.
    pub const fn forward(self) -> i32 {
        match self {
            Player::A => 1,
            Player::B => -1,
        }
    }

    /// The row on which this player's men are crowned.
    pub const fn crowning_row(self) -> u8 {
        match self {
            Player::A => 7,
            Player::B => 0,
        }
    }

    /// Returns the lowercase notation character.
    pub const fn notation_char(self) -> char {
        match self {
            Player::A => 'a',
            Player::B => 'b',
        }
    }

    /// Parses a player from its lowercase notation character.
    pub fn from_notation_char(c: char) -> Option<Player> {
        match c {
            'a' => Some(Player::A),
            'b' => Some(Player::B),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::A => write!(f, "A"),
            Player::B => write!(f, "B"),
        }
    }
}

/// Piece rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rank {
    Man,
    King,
}

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    pub owner: Player,
    pub rank: Rank,
    /// Presentation only. Never consulted by ownership comparisons.
    pub selected: bool,
}

impl Piece {
    pub const fn man(owner: Player) -> Self {
        Piece {
            owner,
            rank: Rank::Man,
            selected: false,
        }
    }

    pub const fn king(owner: Player) -> Self {
        Piece {
            owner,
            rank: Rank::King,
            selected: false,
        }
    }

    pub const fn is_king(&self) -> bool {
        matches!(self.rank, Rank::King)
    }

    /// Returns the notation glyph: lowercase for men, uppercase for kings.
    pub fn glyph(&self) -> char {
        let c = self.owner.notation_char();
        match self.rank {
            Rank::Man => c,
            Rank::King => c.to_ascii_uppercase(),
        }
    }

    /// Parses a piece from its notation glyph.
    pub fn from_glyph(c: char) -> Option<Piece> {
        let owner = Player::from_notation_char(c.to_ascii_lowercase())?;
        if c.is_ascii_uppercase() {
            Some(Piece::king(owner))
        } else {
            Some(Piece::man(owner))
        }
    }
}

/// Contents of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CellContent {
    Blocked,
    Empty,
    Piece(Piece),
}

impl CellContent {
    /// Returns the piece in this cell, if any.
    pub fn piece(&self) -> Option<Piece> {
        match self {
            CellContent::Piece(p) => Some(*p),
            _ => None,
        }
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, CellContent::Empty)
    }

    /// Diagram glyph: `-` blocked, `.` empty, piece glyph otherwise.
    pub fn glyph(&self) -> char {
        match self {
            CellContent::Blocked => '-',
            CellContent::Empty => '.',
            CellContent::Piece(p) => p.glyph(),
        }
    }
}
