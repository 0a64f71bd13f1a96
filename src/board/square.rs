//! A single board cell: fixed position, optional occupant, transient marker

use crate::board::geometry;
use crate::game::components::{Piece, Side};
use crate::game::rules::SuggestionEffect;

/// One cell of the 8x8 grid. Squares are created once per game and never
/// move; pieces are handed between squares by the board's move operation.
///
/// The `marker` is presentation-facing suggestion state driven by hover
/// events; it never influences legality and is cleared on every selection
/// change or hover-out.
#[derive(Debug, Clone)]
pub struct Square {
    position: (u8, u8),
    occupant: Option<Piece>,
    marker: Option<SuggestionEffect>,
}

impl Square {
    pub fn new(position: (u8, u8)) -> Square {
        Square {
            position,
            occupant: None,
            marker: None,
        }
    }

    #[inline]
    pub fn position(&self) -> (u8, u8) {
        self.position
    }

    /// Algebraic-style name used in logs, e.g. `B6`.
    pub fn name(&self) -> String {
        geometry::square_name(self.position)
    }

    #[inline]
    pub fn occupant(&self) -> Option<Piece> {
        self.occupant
    }

    /// Owner of the occupying piece, if any.
    #[inline]
    pub fn side(&self) -> Option<Side> {
        self.occupant.map(|piece| piece.side)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    /// Place a piece on an empty square.
    pub fn add_piece(&mut self, piece: Piece) {
        debug_assert!(
            self.occupant.is_none(),
            "square {} already occupied",
            self.name()
        );
        self.occupant = Some(piece);
    }

    /// Remove and return the occupying piece, if any.
    pub fn remove_piece(&mut self) -> Option<Piece> {
        self.occupant.take()
    }

    /// Promote the occupying man to a king; no-op on empty squares.
    pub fn promote(&mut self) {
        if let Some(piece) = self.occupant.as_mut() {
            piece.promote();
        }
    }

    #[inline]
    pub fn marker(&self) -> Option<SuggestionEffect> {
        self.marker
    }

    pub fn set_marker(&mut self, effect: SuggestionEffect) {
        self.marker = Some(effect);
    }

    pub fn clear_marker(&mut self) {
        self.marker = None;
    }
}
