//! Board coordinates and diagonal directions.
//!
//! Squares are addressed by column `x` and row `y`, each in `0..8`. Row 0 is
//! player A's back rank; row 7 is player B's.

use std::fmt;

use serde::Serialize;

/// Number of columns and rows on the board.
pub const BOARD_SIZE: usize = 8;

/// A cell address on the 8x8 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Square {
    pub x: u8,
    pub y: u8,
}

impl Square {
    /// Creates a square without validation. Board accessors treat squares
    /// outside the board as blocked; use [`Square::checked`] for untrusted input.
    pub const fn new(x: u8, y: u8) -> Self {
        Square { x, y }
    }

    /// Creates a square from signed coordinates, returning `None` when
    /// either coordinate falls off the board.
    pub fn checked(x: i32, y: i32) -> Option<Square> {
        if in_range(x) && in_range(y) {
            Some(Square { x: x as u8, y: y as u8 })
        } else {
            None
        }
    }

    /// Returns the square `steps` cells away along `dir`, if it is on the board.
    pub fn step(self, dir: Direction, steps: i32) -> Option<Square> {
        Square::checked(
            self.x as i32 + dir.dx * steps,
            self.y as i32 + dir.dy * steps,
        )
    }

    /// Whether both coordinates lie in `0..8`.
    pub const fn in_bounds(self) -> bool {
        (self.x as usize) < BOARD_SIZE && (self.y as usize) < BOARD_SIZE
    }

    /// Whether pieces may ever stand here: on the board, with `(x + y)` odd.
    pub const fn is_playable(self) -> bool {
        self.in_bounds() && (self.x as usize + self.y as usize) % 2 == 1
    }

    /// Row-major index into a 64-cell array.
    #[inline]
    pub const fn index(self) -> usize {
        self.y as usize * BOARD_SIZE + self.x as usize
    }

    /// Inverse of [`Square::index`].
    pub const fn from_index(idx: usize) -> Square {
        Square {
            x: (idx % BOARD_SIZE) as u8,
            y: (idx / BOARD_SIZE) as u8,
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

fn in_range(v: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&v)
}

/// A unit diagonal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    pub dx: i32,
    pub dy: i32,
}

/// The four diagonal directions.
pub const DIAGONALS: [Direction; 4] = [
    Direction { dx: -1, dy: -1 },
    Direction { dx: 1, dy: -1 },
    Direction { dx: -1, dy: 1 },
    Direction { dx: 1, dy: 1 },
];

impl Direction {
    /// Returns the unit direction and distance from `from` to `to` when the
    /// two squares lie on a common diagonal, otherwise `None`.
    pub fn between(from: Square, to: Square) -> Option<(Direction, i32)> {
        let dx = to.x as i32 - from.x as i32;
        let dy = to.y as i32 - from.y as i32;
        if dx == 0 || dx.abs() != dy.abs() {
            return None;
        }
        Some((
            Direction {
                dx: dx.signum(),
                dy: dy.signum(),
            },
            dx.abs(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_board_squares_are_not_playable() {
        assert!(Square::new(7, 6).is_playable());
        assert!(!Square::new(9, 0).is_playable());
        assert!(!Square::new(0, 9).is_playable());
        assert!(!Square::new(255, 0).in_bounds());
        assert!(Square::new(7, 7).in_bounds());
    }

    #[test]
    fn playable_squares_alternate() {
        assert!(!Square::new(0, 0).is_playable());
        assert!(Square::new(1, 0).is_playable());
        assert!(Square::new(0, 1).is_playable());
        assert!(!Square::new(7, 7).is_playable());
        let playable = (0..64).filter(|&i| Square::from_index(i).is_playable()).count();
        assert_eq!(playable, 32);
    }

    #[test]
    fn index_roundtrip() {
        for i in 0..64 {
            assert_eq!(Square::from_index(i).index(), i);
        }
        assert_eq!(Square::new(3, 2).index(), 19);
    }

    #[test]
    fn checked_rejects_off_board() {
        assert_eq!(Square::checked(-1, 0), None);
        assert_eq!(Square::checked(0, 8), None);
        assert_eq!(Square::checked(7, 7), Some(Square::new(7, 7)));
    }

    #[test]
    fn step_walks_diagonals() {
        let sq = Square::new(2, 3);
        assert_eq!(sq.step(DIAGONALS[3], 2), Some(Square::new(4, 5)));
        assert_eq!(sq.step(DIAGONALS[0], 3), None);
    }

    #[test]
    fn between_requires_a_diagonal() {
        let from = Square::new(2, 3);
        assert_eq!(
            Direction::between(from, Square::new(5, 0)),
            Some((Direction { dx: 1, dy: -1 }, 3))
        );
        assert_eq!(Direction::between(from, Square::new(2, 5)), None);
        assert_eq!(Direction::between(from, from), None);
        assert_eq!(Direction::between(from, Square::new(4, 4)), None);
    }
}
