//! Capture detection.
//!
//! Existence checks only: each function answers whether the piece on a
//! square has at least one capture available, without enumerating them.

use crate::board::{BoardState, CellContent, Piece, Rank, Square, DIAGONALS};

use super::{is_enemy, same_owner};

/// Whether `piece`, standing on `sq`, can capture using the rules of its rank.
pub fn can_capture(board: &BoardState, sq: Square, piece: &Piece) -> bool {
    match piece.rank {
        Rank::Man => man_can_capture(board, sq, piece),
        Rank::King => king_can_capture(board, sq, piece),
    }
}

/// Whether a man on `sq` can jump an adjacent enemy in any of the four
/// diagonal directions onto an empty cell directly behind it.
pub fn man_can_capture(board: &BoardState, sq: Square, piece: &Piece) -> bool {
    DIAGONALS.iter().any(|&dir| {
        let (Some(mid), Some(land)) = (sq.step(dir, 1), sq.step(dir, 2)) else {
            return false;
        };
        board.get(land).is_empty() && is_enemy(board.get(mid), piece)
    })
}

/// Whether a flying king on `sq` can capture along any diagonal.
///
/// Each ray is walked from the king outward. Empty cells are skipped until
/// the first occupied cell; a friendly piece ends the ray. After a single
/// enemy, the first empty cell proves a capture. A second occupied cell
/// before that empty cell ends the ray.
pub fn king_can_capture(board: &BoardState, sq: Square, piece: &Piece) -> bool {
    for dir in DIAGONALS {
        let mut enemy_found = false;
        let mut steps = 1;
        while let Some(cur) = sq.step(dir, steps) {
            match board.get(cur) {
                CellContent::Empty => {
                    if enemy_found {
                        return true;
                    }
                }
                CellContent::Piece(other) => {
                    if same_owner(&other, piece) || enemy_found {
                        break;
                    }
                    enemy_found = true;
                }
                CellContent::Blocked => break,
            }
            steps += 1;
        }
    }
    false
}
