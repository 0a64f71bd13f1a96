//! Core game data types

pub mod piece;

pub use piece::{Piece, PieceKind, Side};
