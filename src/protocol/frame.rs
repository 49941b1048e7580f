//! Five-byte move frames.
//!
//! Each single hop is sent as `[fromX][fromY][toX][toY][continuation]`,
//! one raw byte per field. A chain of N hops produces N frames.

use serde::Serialize;

use crate::board::{Square, BOARD_SIZE};

/// Size of an encoded frame in bytes.
pub const FRAME_LEN: usize = 5;

/// Errors that can occur when decoding a frame.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    #[error("{field} coordinate out of range: {value}")]
    CoordinateOutOfRange { field: &'static str, value: u8 },

    #[error("invalid continuation byte: {0}")]
    InvalidContinuation(u8),
}

/// One hop of a move as it travels between peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveFrame {
    pub from: Square,
    pub to: Square,
    /// Set when the moving piece must capture again from `to`.
    pub continuation: bool,
}

impl MoveFrame {
    pub fn new(from: Square, to: Square, continuation: bool) -> Self {
        MoveFrame {
            from,
            to,
            continuation,
        }
    }

    /// Encodes the frame in wire order.
    pub fn encode(&self) -> [u8; FRAME_LEN] {
        [
            self.from.x,
            self.from.y,
            self.to.x,
            self.to.y,
            u8::from(self.continuation),
        ]
    }

    /// Decodes a complete frame, rejecting coordinates outside the board
    /// and continuation bytes other than 0 or 1.
    pub fn decode(bytes: &[u8; FRAME_LEN]) -> Result<MoveFrame, FrameError> {
        let [fx, fy, tx, ty, cont] = *bytes;
        let continuation = match cont {
            0 => false,
            1 => true,
            other => return Err(FrameError::InvalidContinuation(other)),
        };
        Ok(MoveFrame {
            from: Square::new(coord("fromX", fx)?, coord("fromY", fy)?),
            to: Square::new(coord("toX", tx)?, coord("toY", ty)?),
            continuation,
        })
    }
}

fn coord(field: &'static str, value: u8) -> Result<u8, FrameError> {
    if (value as usize) < BOARD_SIZE {
        Ok(value)
    } else {
        Err(FrameError::CoordinateOutOfRange { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_fields_in_wire_order() {
        let frame = MoveFrame::new(Square::new(2, 3), Square::new(4, 5), false);
        let bytes = frame.encode();
        assert_eq!(bytes, [2, 3, 4, 5, 0]);
        assert_eq!(MoveFrame::decode(&bytes), Ok(frame));
    }

    #[test]
    fn continuation_flag_is_last_byte() {
        let frame = MoveFrame::new(Square::new(3, 4), Square::new(5, 6), true);
        assert_eq!(frame.encode()[4], 1);
        let decoded = MoveFrame::decode(&[3, 4, 4, 5, 1]).unwrap();
        assert_eq!(decoded.from, Square::new(3, 4));
        assert_eq!(decoded.to, Square::new(4, 5));
        assert!(decoded.continuation);
    }

    #[test]
    fn rejects_off_board_coordinates() {
        assert_eq!(
            MoveFrame::decode(&[8, 0, 1, 1, 0]),
            Err(FrameError::CoordinateOutOfRange {
                field: "fromX",
                value: 8
            })
        );
        assert_eq!(
            MoveFrame::decode(&[1, 0, 2, 255, 0]),
            Err(FrameError::CoordinateOutOfRange {
                field: "toY",
                value: 255
            })
        );
    }

    #[test]
    fn rejects_bad_continuation() {
        assert_eq!(
            MoveFrame::decode(&[1, 0, 2, 1, 2]),
            Err(FrameError::InvalidContinuation(2))
        );
    }
}
