//! Draughts game logic - rules, orchestration, and the computer opponent
//!
//! Clean separation between pure rules and stateful orchestration:
//!
//! - `components` - plain piece data (side, kind)
//! - `resources` - state owned by the orchestrator (turn, score, selection,
//!   pending captures, movement log)
//! - `rules` - pure move legality: the recursive suggestion search and the
//!   capture-priority correction passes
//! - `master` - the turn orchestrator sequencing select -> suggest -> place
//!   -> chain-check -> finish, promotion and game-over detection
//! - `ai` - the computer opponent, driving the same pipeline autonomously
//! - `events` - the outbound presentation boundary
//! - `error` - persistence-facing error types

pub mod ai;
pub mod components;
pub mod error;
pub mod events;
pub mod master;
pub mod resources;
pub mod rules;

pub use error::{GameError, GameResult};
pub use events::{EventSink, GameEvent, NullSink, RecordingSink};
pub use master::{GameMaster, GamePhase};
