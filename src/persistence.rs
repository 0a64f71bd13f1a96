//! Saved-game snapshot and JSON persistence
//!
//! A save is a flat list of occupied squares plus the side to move, the
//! score, and the player-count mode. No move history is persisted: saves
//! only happen between turns, so a reload never resumes mid-chain.
//!
//! # File Location
//!
//! The default path lives in the user's data directory, falling back to the
//! working directory when the system directories cannot be resolved.
//!
//! # Error Handling
//!
//! Loading never corrupts live state: the snapshot is validated into a fresh
//! board first and only then committed. A missing file, unreadable JSON, or
//! an impossible position is reported as a [`GameError`] the caller maps to
//! "start a fresh game instead".

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::board::{geometry, Board};
use crate::game::components::{Piece, PieceKind, Side};
use crate::game::error::{GameError, GameResult};
use crate::game::events::{EventSink, GameEvent};
use crate::game::master::{GameMaster, GamePhase};

/// Save filename under the data directory.
const SAVE_FILENAME: &str = "saved_game.json";

/// One occupied square in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSquare {
    pub position: (u8, u8),
    pub kind: PieceKind,
    pub side: Side,
}

/// Capture totals in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedScore {
    pub white: u32,
    pub black: u32,
}

/// The persisted game: every occupied square, the side to move, the score,
/// and the player-count mode (1 = vs computer, 2 = hotseat).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub board: Vec<SavedSquare>,
    pub current_turn: Side,
    pub score: SavedScore,
    pub players: u8,
}

impl GameMaster {
    /// Capture the current game as a snapshot. Saves are only meaningful
    /// between turns; a snapshot taken mid-chain would drop the pending
    /// captures, so that is flagged loudly.
    pub fn snapshot(&self) -> SavedGame {
        if !self.pending.is_empty() {
            warn!("[SAVE] snapshot taken mid-chain; pending captures are not persisted");
        }
        let board = Board::positions()
            .filter_map(|pos| {
                self.board.square(pos).occupant().map(|piece| SavedSquare {
                    position: pos,
                    kind: piece.kind,
                    side: piece.side,
                })
            })
            .collect();
        let (white, black) = self.score.totals();
        SavedGame {
            board,
            current_turn: self.turn.current(),
            score: SavedScore { white, black },
            players: self.players,
        }
    }

    /// Replace the running game with a validated snapshot. On error the
    /// live game is untouched.
    pub fn load_game(&mut self, saved: &SavedGame) -> GameResult<()> {
        let board = build_board(saved)?;

        self.board = board;
        self.turn.load(saved.current_turn);
        self.score.load(saved.score.white, saved.score.black);
        self.players = saved.players.clamp(1, 2);
        self.selection.clear();
        self.pending.clear();
        self.log.clear();
        self.phase = GamePhase::Idle;
        self.winner = None;

        self.sink.emit(GameEvent::TurnChanged {
            side: self.turn.current(),
        });
        self.sink.emit(GameEvent::ScoreChanged {
            white: saved.score.white,
            black: saved.score.black,
        });
        info!(
            "[SAVE] restored game: {} pieces, {:?} to move",
            saved.board.len(),
            saved.current_turn
        );
        Ok(())
    }
}

/// Validate a snapshot into a fresh board.
fn build_board(saved: &SavedGame) -> GameResult<Board> {
    let mut board = Board::empty();
    for square in &saved.board {
        let pos = square.position;
        if !geometry::in_bounds((pos.0 as i8, pos.1 as i8)) {
            return Err(GameError::InvalidSnapshot {
                message: format!("position {:?} is outside the board", pos),
            });
        }
        if !geometry::playable(pos) {
            return Err(GameError::InvalidSnapshot {
                message: format!("position {:?} is not a playable square", pos),
            });
        }
        if !board.square(pos).is_empty() {
            return Err(GameError::InvalidSnapshot {
                message: format!("position {:?} listed twice", pos),
            });
        }
        board.place_piece(
            pos,
            Piece {
                side: square.side,
                kind: square.kind,
            },
        );
    }
    Ok(board)
}

/// Default save path, e.g. `~/.local/share/draughts/saved_game.json`.
/// Falls back to the working directory when the system data directory
/// cannot be resolved.
pub fn default_save_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "draughts", "Draughts") {
        proj_dirs.data_dir().join(SAVE_FILENAME)
    } else {
        PathBuf::from(SAVE_FILENAME)
    }
}

/// Whether a save exists at `path`.
pub fn save_available(path: &Path) -> bool {
    path.exists()
}

/// Write a snapshot to `path` as pretty-printed JSON, creating parent
/// directories as needed.
pub fn save_to(path: &Path, saved: &SavedGame) -> GameResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(saved)?;
    fs::write(path, json)?;
    info!("[SAVE] saved game to {:?}", path);
    Ok(())
}

/// Read a snapshot back from `path`.
pub fn load_from(path: &Path) -> GameResult<SavedGame> {
    if !path.exists() {
        return Err(GameError::NoSavedGame {
            path: path.to_path_buf(),
        });
    }
    let contents = fs::read_to_string(path)?;
    let saved = serde_json::from_str::<SavedGame>(&contents)?;
    Ok(saved)
}
