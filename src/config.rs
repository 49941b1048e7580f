//! Session configuration.
//!
//! Values come from an optional JSON file; command-line flags override them.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::protocol::sync::DEFAULT_PORT;

/// Default pause between loop iterations in milliseconds.
const DEFAULT_TICK_MS: u64 = 16;

/// Errors that can occur while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Settings for one game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// TCP port used by both the accepting and the connecting side.
    pub port: u16,
    /// Pause between loop iterations (milliseconds).
    pub tick_ms: u64,
    /// Print the board after every applied move.
    pub show_board: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            port: DEFAULT_PORT,
            tick_ms: DEFAULT_TICK_MS,
            show_board: true,
        }
    }
}

impl SessionConfig {
    /// Loads a configuration from a JSON file. Missing fields keep their
    /// defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.port, 12345);
        assert_eq!(config.tick(), Duration::from_millis(16));
        assert!(config.show_board);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: SessionConfig = serde_json::from_str(r#"{"port": 4000}"#).unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.tick_ms, 16);
        assert!(config.show_board);
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join(format!("draughts-config-{}.json", std::process::id()));
        fs::write(&path, r#"{"tick_ms": 5, "show_board": false}"#).unwrap();
        let config = SessionConfig::load(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.port, 12345);
        assert_eq!(config.tick_ms, 5);
        assert!(!config.show_board);
    }

    #[test]
    fn load_reports_missing_file_and_bad_json() {
        let missing = Path::new("/definitely/not/here/draughts.json");
        assert!(matches!(
            SessionConfig::load(missing),
            Err(ConfigError::Read { .. })
        ));

        let path = std::env::temp_dir().join(format!("draughts-bad-{}.json", std::process::id()));
        fs::write(&path, "{ port: nope").unwrap();
        let result = SessionConfig::load(&path);
        fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
