//! Game session.
//!
//! Joins a [`TurnController`] to an optional [`MoveSync`] link. The turn
//! controller only reports moves it applied; the session decides whether a
//! move goes out on the wire, polls the peer while it is the peer's turn,
//! and renders the board for the console.

use std::io::{self, Read, Write};

use log::{debug, info};
use serde::Serialize;

use crate::board::{CellContent, Player, Square};
use crate::protocol::frame::MoveFrame;
use crate::protocol::parser::Command;
use crate::protocol::position::encode_position;
use crate::protocol::sync::{MoveSync, SyncError};
use crate::turn::{AppliedMove, ReplayError, TurnController, TurnPhase};

/// Errors that end a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Replay(#[from] ReplayError),

    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),

    #[error("cannot encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Whether the loop should keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Read-only view of the game for external renderers.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// All 64 cells, row by row.
    pub cells: Vec<CellContent>,
    pub current_player: Player,
    pub pending: Option<Square>,
}

/// Converts an applied hop into its wire frame.
pub fn frame_for(mv: &AppliedMove) -> MoveFrame {
    MoveFrame::new(mv.from, mv.to, mv.continuation)
}

/// One game, either hot-seat or against a networked peer.
pub struct Session<S> {
    turn: TurnController,
    link: Option<MoveSync<S>>,
    show_board: bool,
}

impl<S: Read + Write> Session<S> {
    /// Both players share this console.
    pub fn local(turn: TurnController) -> Self {
        Session {
            turn,
            link: None,
            show_board: true,
        }
    }

    /// The local player is the one `link`'s role assigns.
    pub fn networked(turn: TurnController, link: MoveSync<S>) -> Self {
        Session {
            turn,
            link: Some(link),
            show_board: true,
        }
    }

    /// Sets whether the board is printed after every applied move.
    pub fn with_show_board(mut self, show_board: bool) -> Self {
        self.show_board = show_board;
        self
    }

    pub fn turn(&self) -> &TurnController {
        &self.turn
    }

    /// The player this console controls, or `None` in hot-seat play.
    pub fn local_player(&self) -> Option<Player> {
        self.link.as_ref().map(|link| link.local_player())
    }

    /// Whether console input may act right now.
    pub fn is_local_turn(&self) -> bool {
        self.local_player()
            .map_or(true, |player| player == self.turn.current_player())
    }

    /// Feeds a cell activation to the turn controller and sends the
    /// resulting hop, if any, to the peer.
    pub fn handle_activation(&mut self, sq: Square) -> Result<Option<AppliedMove>, SessionError> {
        if !self.is_local_turn() {
            debug!("ignoring {} while waiting for the opponent", sq);
            return Ok(None);
        }
        let applied = self.turn.activate(sq);
        if let (Some(mv), Some(link)) = (applied.as_ref(), self.link.as_mut()) {
            link.send(&frame_for(mv))?;
        }
        Ok(applied)
    }

    /// Applies at most one frame from the peer. Only polls while it is the
    /// peer's turn.
    pub fn poll_remote(&mut self) -> Result<Option<AppliedMove>, SessionError> {
        let current = self.turn.current_player();
        let Some(link) = self.link.as_mut() else {
            return Ok(None);
        };
        if link.local_player() == current {
            return Ok(None);
        }
        match link.poll()? {
            Some(frame) => Ok(Some(self.turn.apply_remote(&frame)?)),
            None => Ok(None),
        }
    }

    /// Runs one loop iteration: at most one console command, then at most
    /// one frame from the peer.
    pub fn tick<W: Write>(
        &mut self,
        input: Option<Command>,
        out: &mut W,
    ) -> Result<Flow, SessionError> {
        if let Some(cmd) = input {
            if self.handle_command(cmd, out)? == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
        if self.poll_remote()?.is_some() && self.show_board {
            self.render(out)?;
        }
        Ok(Flow::Continue)
    }

    /// Dispatches one console command.
    pub fn handle_command<W: Write>(
        &mut self,
        cmd: Command,
        out: &mut W,
    ) -> Result<Flow, SessionError> {
        match cmd {
            Command::Activate(sq) => {
                if self.handle_activation(sq)?.is_some() && self.show_board {
                    self.render(out)?;
                }
            }
            Command::Board => self.render(out)?,
            Command::Position => {
                let position = encode_position(self.turn.board(), self.turn.current_player());
                writeln!(out, "{}", position)?;
            }
            Command::Json => {
                serde_json::to_writer(&mut *out, &self.snapshot())?;
                writeln!(out)?;
            }
            Command::Quit => {
                info!("leaving the game");
                return Ok(Flow::Quit);
            }
        }
        out.flush()?;
        Ok(Flow::Continue)
    }

    /// Builds the renderer view of the board.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cells: self.turn.board().cells().map(|(_, cell)| cell).collect(),
            current_player: self.turn.current_player(),
            pending: self.turn.pending(),
        }
    }

    /// Writes the board diagram followed by a status line.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self.turn.board())?;
        let current = self.turn.current_player();
        match self.turn.phase() {
            TurnPhase::ChainContinuation(sq) => {
                writeln!(out, "{} to move, must capture again from {}", current, sq)?
            }
            _ => writeln!(out, "{} to move", current)?,
        }
        if !self.is_local_turn() {
            writeln!(out, "waiting for opponent")?;
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::position::parse_position;
    use crate::protocol::sync::testing::MemoryStream;
    use crate::protocol::sync::Role;

    fn sq(x: u8, y: u8) -> Square {
        Square::new(x, y)
    }

    fn pair(position: &str) -> (Session<MemoryStream>, Session<MemoryStream>) {
        let (board, to_move) = parse_position(position).unwrap();
        let (a, b) = MemoryStream::pair();
        let host = Session::networked(
            TurnController::from_position(board.clone(), to_move),
            MoveSync::new(a, Role::Host),
        );
        let peer = Session::networked(
            TurnController::from_position(board, to_move),
            MoveSync::new(b, Role::Peer),
        );
        (host, peer)
    }

    #[test]
    fn frame_for_copies_hop() {
        let mv = AppliedMove {
            player: Player::A,
            from: sq(2, 3),
            to: sq(4, 5),
            captured: Some(sq(3, 4)),
            promoted: false,
            continuation: true,
        };
        assert_eq!(frame_for(&mv).encode(), [2, 3, 4, 5, 1]);
    }

    #[test]
    fn hot_seat_alternates_on_one_console() {
        let mut session: Session<MemoryStream> = Session::local(TurnController::new());
        assert_eq!(session.local_player(), None);
        session.handle_activation(sq(1, 2)).unwrap();
        assert!(session.handle_activation(sq(2, 3)).unwrap().is_some());
        assert!(session.is_local_turn());
        session.handle_activation(sq(0, 5)).unwrap();
        assert!(session.handle_activation(sq(1, 4)).unwrap().is_some());
        assert_eq!(session.turn().current_player(), Player::A);
        assert_eq!(session.poll_remote().unwrap(), None);
    }

    #[test]
    fn peer_replays_host_move() {
        let (mut host, mut peer) = pair(crate::protocol::position::INITIAL_POSITION);
        assert_eq!(host.local_player(), Some(Player::A));
        assert_eq!(peer.local_player(), Some(Player::B));

        // B cannot act before A has moved.
        assert_eq!(peer.handle_activation(sq(0, 5)).unwrap(), None);
        assert_eq!(peer.turn().phase(), TurnPhase::NoSelection);

        host.handle_activation(sq(1, 2)).unwrap();
        assert_eq!(peer.poll_remote().unwrap(), None);
        host.handle_activation(sq(2, 3)).unwrap();
        let mv = peer.poll_remote().unwrap().unwrap();
        assert_eq!((mv.from, mv.to), (sq(1, 2), sq(2, 3)));
        assert_eq!(peer.turn().board(), host.turn().board());
        assert_eq!(peer.turn().current_player(), Player::B);
        assert!(peer.is_local_turn());
        assert!(!host.is_local_turn());
    }

    #[test]
    fn chain_is_mirrored_hop_by_hop() {
        let (mut host, mut peer) = pair("a:..../..../..../.a../.b../..../..b./....");
        host.handle_activation(sq(2, 3)).unwrap();
        let first = host.handle_activation(sq(4, 5)).unwrap().unwrap();
        assert!(first.continuation);

        let mirrored = peer.poll_remote().unwrap().unwrap();
        assert!(mirrored.continuation);
        assert_eq!(peer.turn().phase(), TurnPhase::ChainContinuation(sq(4, 5)));
        assert_eq!(peer.turn().current_player(), Player::A);
        assert!(!peer.is_local_turn());
        assert_eq!(peer.poll_remote().unwrap(), None);
    }

    #[test]
    fn link_is_not_polled_on_local_turn() {
        let (board, to_move) = parse_position(crate::protocol::position::INITIAL_POSITION).unwrap();
        let (a, b) = MemoryStream::pair();
        let mut host = Session::networked(
            TurnController::from_position(board, to_move),
            MoveSync::new(a, Role::Host),
        );
        b.close();
        assert_eq!(host.poll_remote().unwrap(), None);
        assert_eq!(host.turn().current_player(), Player::A);
    }

    #[test]
    fn lost_connection_ends_the_session() {
        let (board, _) = parse_position(crate::protocol::position::INITIAL_POSITION).unwrap();
        let (a, b) = MemoryStream::pair();
        let mut peer = Session::networked(
            TurnController::from_position(board, Player::A),
            MoveSync::new(b, Role::Peer),
        );
        a.close();
        assert!(matches!(
            peer.poll_remote(),
            Err(SessionError::Sync(SyncError::ConnectionClosed))
        ));
    }

    #[test]
    fn commands_write_to_output() {
        let mut session: Session<MemoryStream> =
            Session::local(TurnController::new()).with_show_board(false);
        let mut out = Vec::new();

        assert_eq!(
            session.handle_command(Command::Position, &mut out).unwrap(),
            Flow::Continue
        );
        session.handle_command(Command::Activate(sq(1, 2)), &mut out).unwrap();
        session.handle_command(Command::Activate(sq(2, 3)), &mut out).unwrap();
        session.handle_command(Command::Position, &mut out).unwrap();
        session.handle_command(Command::Board, &mut out).unwrap();
        assert_eq!(
            session.handle_command(Command::Quit, &mut out).unwrap(),
            Flow::Quit
        );

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "a:aaaa/aaaa/aaaa/..../..../bbbb/bbbb/bbbb");
        assert_eq!(lines[1], "b:aaaa/aaaa/.aaa/.a../..../bbbb/bbbb/bbbb");
        assert!(text.contains("B to move"));
    }

    #[test]
    fn json_snapshot_lists_all_cells() {
        let mut session: Session<MemoryStream> = Session::local(TurnController::new());
        session.handle_activation(sq(1, 2)).unwrap();
        let mut out = Vec::new();
        session.handle_command(Command::Json, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["cells"].as_array().unwrap().len(), 64);
        assert_eq!(value["cells"][0], "Blocked");
        assert_eq!(value["current_player"], "A");
        assert_eq!(value["pending"]["x"], 1);
        assert_eq!(value["pending"]["y"], 2);
        assert_eq!(value["cells"][17]["Piece"]["selected"], true);
    }

    #[test]
    fn tick_applies_remote_frame() {
        let (mut host, mut peer) = pair(crate::protocol::position::INITIAL_POSITION);
        let mut out = Vec::new();
        host.tick(Some(Command::Activate(sq(1, 2))), &mut out).unwrap();
        host.tick(Some(Command::Activate(sq(2, 3))), &mut out).unwrap();

        let mut peer_out = Vec::new();
        assert_eq!(peer.tick(None, &mut peer_out).unwrap(), Flow::Continue);
        assert_eq!(peer.turn().board(), host.turn().board());
        let text = String::from_utf8(peer_out).unwrap();
        assert!(text.contains("B to move"));
        assert!(!text.contains("waiting for opponent"));
    }
}
