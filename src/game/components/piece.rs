//! Piece data: side, kind, and the piece itself
//!
//! Plain data with no rendering identity; the presentation layer maps these
//! to sprites on its own side of the boundary.

use serde::{Deserialize, Serialize};

/// The two players. White moves toward row 0, Black toward row 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// The other player.
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Row delta of this side's forward direction: `-1` for White (up the
    /// board), `+1` for Black (down the board).
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Side::White => -1,
            Side::Black => 1,
        }
    }

    /// Back rank from this side's point of view; a man promotes on arrival.
    #[inline]
    pub fn promotion_row(self) -> u8 {
        match self {
            Side::White => 0,
            Side::Black => 7,
        }
    }
}

/// Piece rank: a man steps forward, a king slides along all four diagonals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Man,
    King,
}

/// A piece on the board. Owned by exactly one square at a time; promotion
/// rewrites `kind` in place and never changes `side`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    pub fn man(side: Side) -> Piece {
        Piece {
            side,
            kind: PieceKind::Man,
        }
    }

    pub fn king(side: Side) -> Piece {
        Piece {
            side,
            kind: PieceKind::King,
        }
    }

    #[inline]
    pub fn is_man(&self) -> bool {
        self.kind == PieceKind::Man
    }

    #[inline]
    pub fn is_king(&self) -> bool {
        self.kind == PieceKind::King
    }

    /// Man -> King. Promoting a king is a no-op; demotion does not exist.
    pub fn promote(&mut self) {
        self.kind = PieceKind::King;
    }
}
