//! Wire and console protocols.
//!
//! This module implements the five-byte move frame, the transport that
//! keeps two peers in step, the compact position notation, and the command
//! parser for the console loop.

pub mod frame;
pub mod parser;
pub mod position;
pub mod sync;

pub use frame::{FrameError, MoveFrame, FRAME_LEN};
pub use parser::{parse_command, Command};
pub use position::{encode_position, parse_position, PositionError, INITIAL_POSITION};
pub use sync::{MoveSync, Role, SetupError, SyncError, DEFAULT_PORT};
