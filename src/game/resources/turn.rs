//! Turn tracking
//!
//! Flips exactly once per completed turn — a full capture chain, not each
//! hop. White always opens a fresh game.

use crate::game::components::Side;

#[derive(Debug, Clone)]
pub struct TurnManager {
    current: Side,
}

impl Default for TurnManager {
    fn default() -> Self {
        TurnManager {
            current: Side::White,
        }
    }
}

impl TurnManager {
    pub fn new() -> TurnManager {
        TurnManager::default()
    }

    /// Side to move.
    #[inline]
    pub fn current(&self) -> Side {
        self.current
    }

    /// Side waiting for its turn.
    #[inline]
    pub fn opponent(&self) -> Side {
        self.current.opponent()
    }

    /// Hand the turn to the other side.
    pub fn finish_turn(&mut self) {
        self.current = self.current.opponent();
    }

    /// Reset for a new game.
    pub fn clear(&mut self) {
        self.current = Side::White;
    }

    /// Restore the side to move from a saved game.
    pub fn load(&mut self, side: Side) {
        self.current = side;
    }
}
