//! Error types for game state restoration
//!
//! Invalid player input is not an error - it is silently declined with no
//! state change. These types cover the explicit failure modes: loading a
//! snapshot that is absent, unreadable, or inconsistent.

use std::path::PathBuf;

/// Errors surfaced when persisting or restoring a game.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// No saved game exists at the given path.
    #[error("no saved game at {path:?}")]
    NoSavedGame { path: PathBuf },

    /// The snapshot file could not be read or written.
    #[error("snapshot I/O failed: {0}")]
    SnapshotIo(#[from] std::io::Error),

    /// The snapshot file is not valid JSON for the expected layout.
    #[error("snapshot format invalid: {0}")]
    SnapshotFormat(#[from] serde_json::Error),

    /// The snapshot parsed but describes an impossible game state.
    #[error("malformed snapshot: {message}")]
    InvalidSnapshot { message: String },
}

/// Result type alias for game operations.
pub type GameResult<T> = Result<T, GameError>;
