//! Draughts engine library.
//!
//! Exposes the board representation, the rule engine, turn control, the
//! move-synchronization protocol, and the session loop used by the binary
//! entry point and the integration tests.

pub mod board;
pub mod config;
pub mod protocol;
pub mod rules;
pub mod session;
pub mod turn;
