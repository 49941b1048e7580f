//! Draughts -- a two-player checkers engine over a five-byte TCP protocol.
//!
//! This binary reads cell activations and commands from stdin, writes board
//! diagrams to stdout, and logs to stderr. One process hosts (plays A), the
//! other joins (plays B); `local` plays both sides on one console.

use std::io::{self, BufRead, Write};
use std::net::TcpStream;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use clap::{Parser, Subcommand};
use crossbeam_channel::{Receiver, TryRecvError};
use log::{error, info};

use draughts::config::{ConfigError, SessionConfig};
use draughts::protocol::parser::{parse_command, Command};
use draughts::protocol::sync::{MoveSync, SetupError};
use draughts::session::{Flow, Session, SessionError};
use draughts::turn::TurnController;

#[derive(Parser)]
#[command(name = "draughts")]
#[command(about = "Two-player draughts over a direct TCP link", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// TCP port for hosting or joining
    #[arg(long)]
    port: Option<u16>,

    /// Pause between loop iterations in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Do not print the board after every move
    #[arg(long)]
    quiet: bool,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// Both players share this console
    Local,

    /// Wait for an opponent to join; plays A and moves first
    Host,

    /// Join a hosted game; plays B
    Join {
        /// Host name or IP address of the hosting player
        address: String,
    },
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot start network game: {0}")]
    Setup(#[from] SetupError),

    #[error("game ended: {0}")]
    Session(#[from] SessionError),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Builds the session for the chosen mode, then runs the loop until quit,
/// end of input, or a fatal session error.
fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = match &cli.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_ms = tick_ms;
    }
    if cli.quiet {
        config.show_board = false;
    }

    // Connection setup is the only blocking step and happens before play.
    let turn = TurnController::new();
    let session: Session<TcpStream> = match &cli.mode {
        Mode::Local => Session::local(turn),
        Mode::Host => Session::networked(turn, MoveSync::host(config.port)?),
        Mode::Join { address } => Session::networked(turn, MoveSync::join(address, config.port)?),
    };
    let mut session = session.with_show_board(config.show_board);

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    session.render(&mut out).map_err(SessionError::from)?;

    let input = spawn_input();
    loop {
        let cmd = match input.try_recv() {
            Ok(line) => parse_command(&line),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Command::Quit),
        };
        if session.tick(cmd, &mut out)? == Flow::Quit {
            break;
        }
        out.flush().map_err(SessionError::from)?;
        thread::sleep(config.tick());
    }

    info!("session over");
    Ok(())
}

/// Reads stdin on a background thread so the loop never blocks on input.
/// The channel disconnects at end of input.
fn spawn_input() -> Receiver<String> {
    let (tx, rx) = crossbeam_channel::unbounded();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(_) => break,
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}
