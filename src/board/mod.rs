//! Board representation.
//!
//! Contains squares and directions, cell contents, and the 8x8 board state.

pub mod cell;
pub mod square;
pub mod state;

pub use cell::{CellContent, Piece, Player, Rank};
pub use square::{Direction, Square, BOARD_SIZE, DIAGONALS};
pub use state::{BoardState, CELL_COUNT};
