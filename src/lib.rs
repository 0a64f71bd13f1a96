//! Draughts rules engine
//!
//! The move-legality and turn-resolution core of an 8x8 draughts game with
//! mandatory captures, multi-jump chains, and promotion. A presentation
//! layer (rendering, pointer input, audio) sits outside this crate: it feeds
//! square activations and hovers in, and polls square state and listens for
//! [`game::GameEvent`]s coming back out.

pub mod board;
pub mod game;
pub mod persistence;

pub use board::Board;
pub use game::components::{Piece, PieceKind, Side};
pub use game::{GameEvent, GameMaster, GamePhase};
pub use persistence::SavedGame;
