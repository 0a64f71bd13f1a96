//! Selection state: the chosen square and its cached suggestions

use crate::game::rules::{SuggestionEffect, SuggestionEntry};

/// Currently selected square plus the suggestion list computed for it.
///
/// The cached entries are the authority for what a placement may consume;
/// they are replaced wholesale on every selection change or chain hop.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub square: Option<(u8, u8)>,
    pub suggestions: Vec<SuggestionEntry>,
}

impl Selection {
    pub fn is_selected(&self) -> bool {
        self.square.is_some()
    }

    /// First cached entry targeting `pos`, if any.
    pub fn entry_for(&self, pos: (u8, u8)) -> Option<&SuggestionEntry> {
        self.suggestions.iter().find(|entry| entry.target == pos)
    }

    /// Whether `pos` is offered as a playable landing square.
    pub fn is_playable(&self, pos: (u8, u8)) -> bool {
        self.entry_for(pos)
            .map(|entry| entry.effect == SuggestionEffect::Shadow)
            .unwrap_or(false)
    }

    pub fn clear_suggestions(&mut self) {
        self.suggestions.clear();
    }

    pub fn clear(&mut self) {
        self.square = None;
        self.suggestions.clear();
    }
}
