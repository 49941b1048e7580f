//! Turn control.
//!
//! Tracks whose turn it is and which piece, if any, is in hand. Local input
//! arrives as cell activations; moves replayed from the peer arrive as
//! decoded frames. Every applied move is reported back to the caller as an
//! [`AppliedMove`] so that a separate adapter can decide whether to send it.

use log::{debug, info};

use crate::board::{BoardState, CellContent, Player, Square};
use crate::protocol::frame::MoveFrame;
use crate::rules::movement::first_enemy_on_path;
use crate::rules::{can_capture, classify_move, promote_if_needed, MoveKind};

/// Selection state of the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    NoSelection,
    /// A piece is in hand and may move anywhere legal, or be put down.
    Selected(Square),
    /// The piece on this square is mid-chain and must capture again.
    ChainContinuation(Square),
}

/// A single hop that changed the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    pub player: Player,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Square>,
    pub promoted: bool,
    /// The same piece must capture again before the turn passes.
    pub continuation: bool,
}

/// Errors raised while replaying a peer's move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    #[error("peer moved from {0}, which holds no piece")]
    EmptyOrigin(Square),
    #[error("peer moved {0} onto itself")]
    SameSquare(Square),
    #[error("peer moved onto {0}, which is not a playable cell")]
    UnplayableTarget(Square),
}

/// Owns the board for one game and enforces the turn order.
#[derive(Debug, Clone)]
pub struct TurnController {
    board: BoardState,
    current: Player,
    pending: Option<Square>,
    chain: bool,
}

impl TurnController {
    /// Starts a game from the standard layout with A to move.
    pub fn new() -> Self {
        Self::from_position(BoardState::initial(), Player::A)
    }

    /// Starts from an arbitrary board with nothing selected.
    pub fn from_position(board: BoardState, to_move: Player) -> Self {
        TurnController {
            board,
            current: to_move,
            pending: None,
            chain: false,
        }
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    /// The square of the piece in hand, if any.
    pub fn pending(&self) -> Option<Square> {
        self.pending
    }

    pub fn phase(&self) -> TurnPhase {
        match (self.pending, self.chain) {
            (None, _) => TurnPhase::NoSelection,
            (Some(sq), false) => TurnPhase::Selected(sq),
            (Some(sq), true) => TurnPhase::ChainContinuation(sq),
        }
    }

    /// Handles a cell activation: picks up a piece when nothing is in hand,
    /// otherwise tries to move the piece in hand to `sq`.
    pub fn activate(&mut self, sq: Square) -> Option<AppliedMove> {
        if self.pending.is_none() {
            self.select(sq);
            None
        } else {
            self.attempt(sq)
        }
    }

    /// Picks up the piece on `sq` if it belongs to the player to move.
    /// Ignored while any piece is already in hand.
    pub fn select(&mut self, sq: Square) -> bool {
        if let Some(held) = self.pending {
            debug!("select {} ignored, {} already in hand", sq, held);
            return false;
        }
        match self.board.piece_at(sq) {
            Some(piece) if piece.owner == self.current => {
                self.board.toggle_selected(sq, true);
                self.pending = Some(sq);
                self.chain = false;
                true
            }
            _ => false,
        }
    }

    /// Tries to move the piece in hand to `target`.
    ///
    /// An illegal target puts the piece down with no other change. During a
    /// chain only a further capture is accepted and anything else is ignored.
    pub fn attempt(&mut self, target: Square) -> Option<AppliedMove> {
        let from = self.pending?;
        match classify_move(&self.board, from, target) {
            Some(kind) if !self.chain || kind.is_capture() => Some(self.apply(from, target, kind)),
            _ if self.chain => {
                debug!("chain at {} must capture, ignoring {}", from, target);
                None
            }
            _ => {
                debug!("illegal move {} -> {}, deselecting", from, target);
                self.deselect();
                None
            }
        }
    }

    /// Replays one hop received from the peer without checking legality.
    ///
    /// The first enemy between origin and destination is removed. With the
    /// continuation flag set, the destination becomes the pending chain
    /// square and the turn stays with the mover.
    pub fn apply_remote(&mut self, frame: &MoveFrame) -> Result<AppliedMove, ReplayError> {
        let piece = self
            .board
            .piece_at(frame.from)
            .ok_or(ReplayError::EmptyOrigin(frame.from))?;
        if frame.from == frame.to {
            return Err(ReplayError::SameSquare(frame.to));
        }
        if !frame.to.is_playable() {
            return Err(ReplayError::UnplayableTarget(frame.to));
        }
        self.deselect();

        let captured = first_enemy_on_path(&self.board, frame.from, frame.to, &piece);
        if let Some(sq) = captured {
            self.board.set(sq, CellContent::Empty);
        }
        self.board.set(frame.to, CellContent::Piece(piece));
        self.board.set(frame.from, CellContent::Empty);
        self.board.toggle_selected(frame.to, false);
        let promoted = promote_if_needed(&mut self.board, frame.to);

        if frame.continuation {
            self.pending = Some(frame.to);
            self.chain = true;
        } else {
            self.current = piece.owner.opponent();
        }

        let applied = AppliedMove {
            player: piece.owner,
            from: frame.from,
            to: frame.to,
            captured,
            promoted,
            continuation: frame.continuation,
        };
        log_move("remote", &applied);
        Ok(applied)
    }

    fn apply(&mut self, from: Square, to: Square, kind: MoveKind) -> AppliedMove {
        let mover = self.current;
        let content = self.board.get(from);
        self.board.set(to, content);
        self.board.set(from, CellContent::Empty);
        if let Some(sq) = kind.captured() {
            self.board.set(sq, CellContent::Empty);
        }
        self.board.toggle_selected(to, false);
        let promoted = promote_if_needed(&mut self.board, to);

        // Promotion comes first, so a freshly crowned piece is checked with king rules.
        let continuation = kind.is_capture()
            && self
                .board
                .piece_at(to)
                .is_some_and(|piece| can_capture(&self.board, to, &piece));

        if continuation {
            self.board.toggle_selected(to, true);
            self.pending = Some(to);
            self.chain = true;
        } else {
            self.pending = None;
            self.chain = false;
            self.current = mover.opponent();
        }

        let applied = AppliedMove {
            player: mover,
            from,
            to,
            captured: kind.captured(),
            promoted,
            continuation,
        };
        log_move("local", &applied);
        applied
    }

    fn deselect(&mut self) {
        if let Some(sq) = self.pending.take() {
            self.board.toggle_selected(sq, false);
        }
        self.chain = false;
    }
}

impl Default for TurnController {
    fn default() -> Self {
        TurnController::new()
    }
}

fn log_move(origin: &str, mv: &AppliedMove) {
    info!(
        "{} move by {}: {} -> {}{}{}{}",
        origin,
        mv.player,
        mv.from,
        mv.to,
        mv.captured.map(|sq| format!(" capturing {}", sq)).unwrap_or_default(),
        if mv.promoted { ", crowned" } else { "" },
        if mv.continuation { ", must capture again" } else { "" },
    );
}
