//! Move classification.
//!
//! Decides whether moving the piece on one square to another is a legal
//! single step, a legal capture, or neither.

use crate::board::{BoardState, CellContent, Direction, Piece, Rank, Square};

use super::{is_enemy, same_owner};

/// A legal single-hop move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Non-capturing move.
    Step,
    /// Capturing move removing the piece on `captured`.
    Capture { captured: Square },
}

impl MoveKind {
    pub fn is_capture(&self) -> bool {
        matches!(self, MoveKind::Capture { .. })
    }

    pub fn captured(&self) -> Option<Square> {
        match self {
            MoveKind::Capture { captured } => Some(*captured),
            MoveKind::Step => None,
        }
    }
}

/// Classifies the move of the piece on `from` to `to`.
///
/// Returns `None` when `from` holds no piece, the destination is occupied,
/// the squares are not on a common diagonal, or the move matches none of
/// the man or king patterns.
pub fn classify_move(board: &BoardState, from: Square, to: Square) -> Option<MoveKind> {
    let piece = board.piece_at(from)?;
    let (dir, distance) = Direction::between(from, to)?;
    if !board.get(to).is_empty() {
        return None;
    }

    match piece.rank {
        Rank::Man => man_move(board, from, dir, distance, &piece),
        Rank::King => king_move(board, from, dir, distance, &piece),
    }
}

/// One step forward, or a jump over an adjacent enemy in any direction.
fn man_move(
    board: &BoardState,
    from: Square,
    dir: Direction,
    distance: i32,
    piece: &Piece,
) -> Option<MoveKind> {
    match distance {
        1 if dir.dy == piece.owner.forward() => Some(MoveKind::Step),
        2 => {
            let mid = from.step(dir, 1)?;
            if is_enemy(board.get(mid), piece) {
                Some(MoveKind::Capture { captured: mid })
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Any distance along an open diagonal, passing over at most one enemy.
/// A friendly piece or a second occupied cell on the path rejects the move.
fn king_move(
    board: &BoardState,
    from: Square,
    dir: Direction,
    distance: i32,
    piece: &Piece,
) -> Option<MoveKind> {
    let mut captured = None;
    for steps in 1..distance {
        let cur = from.step(dir, steps)?;
        match board.get(cur) {
            CellContent::Empty => {}
            CellContent::Piece(other) => {
                if same_owner(&other, piece) || captured.is_some() {
                    return None;
                }
                captured = Some(cur);
            }
            CellContent::Blocked => return None,
        }
    }

    Some(match captured {
        Some(captured) => MoveKind::Capture { captured },
        None => MoveKind::Step,
    })
}

/// Returns the first piece hostile to `piece` on the open segment between
/// `from` and `to`.
///
/// Used when replaying a peer's move: no legality is checked, the sender
/// is trusted.
pub fn first_enemy_on_path(
    board: &BoardState,
    from: Square,
    to: Square,
    piece: &Piece,
) -> Option<Square> {
    let (dir, distance) = Direction::between(from, to)?;
    (1..distance)
        .filter_map(|steps| from.step(dir, steps))
        .find(|&sq| is_enemy(board.get(sq), piece))
}
