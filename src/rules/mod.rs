//! Rule engine.
//!
//! Stateless functions over a [`BoardState`]: ownership comparison, capture
//! detection for men and kings, move classification, and promotion.

pub mod capture;
pub mod movement;

pub use capture::{can_capture, king_can_capture, man_can_capture};
pub use movement::{classify_move, MoveKind};

use crate::board::{BoardState, CellContent, Piece, Rank, Square};

/// Whether two pieces belong to the same player. Ignores `selected`.
///
/// Every friend/enemy decision in the engine goes through this predicate.
pub fn same_owner(a: &Piece, b: &Piece) -> bool {
    a.owner == b.owner
}

/// Whether `cell` holds a piece hostile to `piece`.
pub fn is_enemy(cell: CellContent, piece: &Piece) -> bool {
    match cell {
        CellContent::Piece(other) => !same_owner(&other, piece),
        _ => false,
    }
}

/// Crowns a man standing on its owner's crowning row. Returns whether a
/// promotion happened.
pub fn promote_if_needed(board: &mut BoardState, sq: Square) -> bool {
    match board.get(sq) {
        CellContent::Piece(piece)
            if !piece.is_king() && sq.y == piece.owner.crowning_row() =>
        {
            board.set(
                sq,
                CellContent::Piece(Piece {
                    rank: Rank::King,
                    ..piece
                }),
            );
            true
        }
        _ => false,
    }
}
