//! Board state representation.
//!
//! Owns the 8x8 grid of cells. Non-playable cells are fixed as `Blocked`
//! when the board is created and are never written afterwards.

use std::fmt;

use super::cell::{CellContent, Piece, Player};
use super::square::{Square, BOARD_SIZE};

/// Number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// The 8x8 grid.
///
/// Uses a fixed-size array indexed by [`Square::index`], so the state is
/// trivially copyable and never allocates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    cells: [CellContent; CELL_COUNT],
}

impl BoardState {
    /// Creates a board with every playable cell empty.
    pub fn empty() -> Self {
        let mut cells = [CellContent::Blocked; CELL_COUNT];
        for (idx, cell) in cells.iter_mut().enumerate() {
            if Square::from_index(idx).is_playable() {
                *cell = CellContent::Empty;
            }
        }
        BoardState { cells }
    }

    /// Creates the standard starting layout: A men on rows 0-2, B men on
    /// rows 5-7, rows 3-4 empty.
    pub fn initial() -> Self {
        let mut board = BoardState::empty();
        for idx in 0..CELL_COUNT {
            let sq = Square::from_index(idx);
            if !sq.is_playable() {
                continue;
            }
            match sq.y {
                0..=2 => board.set(sq, CellContent::Piece(Piece::man(Player::A))),
                5..=7 => board.set(sq, CellContent::Piece(Piece::man(Player::B))),
                _ => {}
            }
        }
        board
    }

    /// Returns the contents of a cell. Squares off the board read as
    /// `Blocked`.
    #[inline]
    pub fn get(&self, sq: Square) -> CellContent {
        if !sq.in_bounds() {
            return CellContent::Blocked;
        }
        self.cells[sq.index()]
    }

    /// Returns the piece on a cell, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.get(sq).piece()
    }

    /// Writes a cell. Writes to non-playable or off-board cells are dropped
    /// so that `Blocked` cells stay fixed.
    pub fn set(&mut self, sq: Square, content: CellContent) {
        if !sq.is_playable() {
            return;
        }
        self.cells[sq.index()] = content;
    }

    /// Sets or clears the `selected` flag of the piece on `sq`. Idempotent;
    /// a no-op on empty or blocked cells.
    pub fn toggle_selected(&mut self, sq: Square, on: bool) {
        if !sq.is_playable() {
            return;
        }
        if let CellContent::Piece(piece) = &mut self.cells[sq.index()] {
            piece.selected = on;
        }
    }

    /// Enumerates every cell with its address, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Square, CellContent)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| (Square::from_index(idx), *cell))
    }

    /// Counts the pieces a player has left.
    pub fn piece_count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, CellContent::Piece(p) if p.owner == player))
            .count()
    }
}

impl Default for BoardState {
    fn default() -> Self {
        BoardState::initial()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..BOARD_SIZE as u8 {
            write!(f, "{} ", y)?;
            for x in 0..BOARD_SIZE as u8 {
                let cell = self.get(Square::new(x, y));
                let mark = match cell {
                    CellContent::Piece(p) if p.selected => '*',
                    _ => ' ',
                };
                write!(f, "{}{}", cell.glyph(), mark)?;
            }
            writeln!(f)?;
        }
        write!(f, " ")?;
        for x in 0..BOARD_SIZE {
            write!(f, " {}", x)?;
        }
        writeln!(f)
    }
}
