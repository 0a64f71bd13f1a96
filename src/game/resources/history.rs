//! Per-turn movement log
//!
//! Records the suggestion each hop of the current turn consumed. The last
//! entry decides whether a man may search backward (it just captured) and
//! whether a chain may continue at all. Cleared when the turn finishes.

use crate::game::rules::{MoveKind, SuggestionEntry};

#[derive(Debug, Clone, Default)]
pub struct MovementLog {
    entries: Vec<SuggestionEntry>,
}

impl MovementLog {
    pub fn new() -> MovementLog {
        MovementLog::default()
    }

    pub fn push(&mut self, entry: SuggestionEntry) {
        self.entries.push(entry);
    }

    pub fn last(&self) -> Option<&SuggestionEntry> {
        self.entries.last()
    }

    /// Whether the most recent hop this turn was a capture.
    pub fn last_was_capture(&self) -> bool {
        self.last()
            .map(|entry| entry.kind == MoveKind::CaptureAfterEnemy)
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
