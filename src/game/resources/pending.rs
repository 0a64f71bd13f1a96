//! Captures flagged during a chain, removed at turn finish
//!
//! A jumped enemy stays on its square for the rest of the chain — it blocks
//! rays and must not be jumped a second time — and only disappears when the
//! turn is applied.

/// Ordered, duplicate-free set of squares whose occupants will be removed
/// when the current turn finishes.
#[derive(Debug, Clone, Default)]
pub struct PendingCaptures {
    squares: Vec<(u8, u8)>,
}

impl PendingCaptures {
    pub fn new() -> PendingCaptures {
        PendingCaptures::default()
    }

    /// Flag a square; duplicates are ignored.
    pub fn add(&mut self, pos: (u8, u8)) {
        if !self.squares.contains(&pos) {
            self.squares.push(pos);
        }
    }

    /// Whether `pos` is already flagged this turn.
    pub fn contains(&self, pos: (u8, u8)) -> bool {
        self.squares.contains(&pos)
    }

    /// Flagged squares in the order they were jumped.
    pub fn positions(&self) -> &[(u8, u8)] {
        &self.squares
    }

    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    pub fn len(&self) -> usize {
        self.squares.len()
    }

    /// Take all flagged squares, leaving the set empty.
    pub fn drain(&mut self) -> Vec<(u8, u8)> {
        std::mem::take(&mut self.squares)
    }

    pub fn clear(&mut self) {
        self.squares.clear();
    }
}
