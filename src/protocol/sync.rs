//! Move synchronization between two peers.
//!
//! One long-lived, reliable, ordered byte stream carries [`MoveFrame`]s in
//! both directions. The accepting side plays [`Player::A`] and moves first;
//! the connecting side plays [`Player::B`].
//!
//! Connection setup is the only blocking step. Once play starts, receiving
//! never blocks: [`MoveSync::poll`] returns `Ok(None)` until a whole frame
//! has arrived.

use std::io::{self, ErrorKind, Read, Write};
use std::net::{TcpListener, TcpStream, ToSocketAddrs};
use std::thread;

use log::{debug, info};

use crate::board::Player;

use super::frame::{FrameError, MoveFrame, FRAME_LEN};

/// Default TCP port for both roles.
pub const DEFAULT_PORT: u16 = 12345;

/// Errors that prevent a networked session from starting.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("cannot listen on port {port}: {source}")]
    Bind { port: u16, source: io::Error },

    #[error("failed to accept peer: {0}")]
    Accept(io::Error),

    #[error("cannot resolve '{address}': {source}")]
    Resolve { address: String, source: io::Error },

    #[error("'{0}' resolved to no addresses")]
    NoAddress(String),

    #[error("cannot connect to '{address}': {source}")]
    Connect { address: String, source: io::Error },

    #[error("failed to configure connection: {0}")]
    Configure(io::Error),
}

/// Fatal errors during play.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("connection closed by peer")]
    ConnectionClosed,

    #[error("transport error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed frame from peer: {0}")]
    BadFrame(#[from] FrameError),
}

/// Which side of the connection this process is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Listens and accepts. Always plays A.
    Host,
    /// Connects to a host. Always plays B.
    Peer,
}

impl Role {
    /// The player this role controls.
    pub const fn player(self) -> Player {
        match self {
            Role::Host => Player::A,
            Role::Peer => Player::B,
        }
    }
}

/// Frame transport over a duplex byte stream.
///
/// Partial reads are buffered across polls; a frame is only handed out once
/// all five bytes are present.
pub struct MoveSync<S> {
    stream: S,
    role: Role,
    buf: [u8; FRAME_LEN],
    filled: usize,
}

impl MoveSync<TcpStream> {
    /// Listens on every interface and blocks until one peer connects.
    pub fn host(port: u16) -> Result<Self, SetupError> {
        let listener =
            TcpListener::bind(("0.0.0.0", port)).map_err(|source| SetupError::Bind { port, source })?;
        info!("waiting for a peer on port {}", port);
        Self::accept_on(&listener)
    }

    /// Blocks until one peer connects to `listener`.
    pub fn accept_on(listener: &TcpListener) -> Result<Self, SetupError> {
        let (stream, addr) = listener.accept().map_err(SetupError::Accept)?;
        info!("peer connected from {}", addr);
        Self::from_tcp(stream, Role::Host)
    }

    /// Resolves `address` and connects on `port`.
    pub fn join(address: &str, port: u16) -> Result<Self, SetupError> {
        let addrs: Vec<_> = (address, port)
            .to_socket_addrs()
            .map_err(|source| SetupError::Resolve {
                address: address.to_string(),
                source,
            })?
            .collect();
        if addrs.is_empty() {
            return Err(SetupError::NoAddress(address.to_string()));
        }
        let stream = TcpStream::connect(&addrs[..]).map_err(|source| SetupError::Connect {
            address: address.to_string(),
            source,
        })?;
        info!("connected to {}:{}", address, port);
        Self::from_tcp(stream, Role::Peer)
    }

    fn from_tcp(stream: TcpStream, role: Role) -> Result<Self, SetupError> {
        stream.set_nodelay(true).map_err(SetupError::Configure)?;
        stream.set_nonblocking(true).map_err(SetupError::Configure)?;
        Ok(MoveSync::new(stream, role))
    }
}

impl<S: Read + Write> MoveSync<S> {
    /// Wraps an already-open stream. Reads on `stream` must report
    /// `WouldBlock` rather than block when no data is available.
    pub fn new(stream: S, role: Role) -> Self {
        info!("playing as {} ({:?})", role.player(), role);
        MoveSync {
            stream,
            role,
            buf: [0; FRAME_LEN],
            filled: 0,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn local_player(&self) -> Player {
        self.role.player()
    }

    /// Writes one frame, retrying while the stream reports `WouldBlock`.
    pub fn send(&mut self, frame: &MoveFrame) -> Result<(), SyncError> {
        let bytes = frame.encode();
        let mut written = 0;
        while written < FRAME_LEN {
            match self.stream.write(&bytes[written..]) {
                Ok(0) => return Err(SyncError::ConnectionClosed),
                Ok(n) => written += n,
                Err(e) if e.kind() == ErrorKind::WouldBlock => thread::yield_now(),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(classify_io(e)),
            }
        }
        self.stream.flush().map_err(classify_io)?;
        debug!("sent frame {:?}", bytes);
        Ok(())
    }

    /// Returns the next complete frame, or `Ok(None)` if fewer than five
    /// bytes are available. Never blocks.
    pub fn poll(&mut self) -> Result<Option<MoveFrame>, SyncError> {
        while self.filled < FRAME_LEN {
            match self.stream.read(&mut self.buf[self.filled..]) {
                Ok(0) => return Err(SyncError::ConnectionClosed),
                Ok(n) => self.filled += n,
                Err(e) if e.kind() == ErrorKind::WouldBlock => return Ok(None),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(classify_io(e)),
            }
        }
        self.filled = 0;
        debug!("received frame {:?}", self.buf);
        Ok(Some(MoveFrame::decode(&self.buf)?))
    }
}

fn classify_io(e: io::Error) -> SyncError {
    match e.kind() {
        ErrorKind::ConnectionReset
        | ErrorKind::ConnectionAborted
        | ErrorKind::BrokenPipe
        | ErrorKind::UnexpectedEof => SyncError::ConnectionClosed,
        _ => SyncError::Io(e),
    }
}
