//! Draughts move legality - pure rules logic without orchestration coupling
//!
//! Everything here is a pure function over a board snapshot plus an explicit
//! [`ChainContext`]; no hidden state is threaded between recursive calls, so
//! the search is independently testable.
//!
//! # Module Structure
//!
//! - [`resolver`] - the recursive suggestion search, the priority-correction
//!   pass, and the full-board capture survey
//! - the shared vocabulary types: [`MoveKind`], [`SuggestionEffect`],
//!   [`SuggestionEntry`], [`ChainContext`], [`CaptureSurvey`]

pub mod resolver;


pub use resolver::{
    classify, correct_moves, has_capture, legal_destinations, side_has_any_move, suppress_all,
    survey,
};

use crate::game::components::Side;

/// How a single target square relates to the piece being moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Empty square reachable by a quiet move.
    Normal,
    /// A not-yet-captured enemy sitting in the path - the midpoint of a
    /// potential jump, not a landing square.
    CaptureOnEnemy,
    /// The empty square just past a jumped enemy - a legal landing square.
    CaptureAfterEnemy,
    /// An enemy already flagged earlier in this turn's chain; jumping it
    /// again is illegal.
    AlreadyCaptured,
    /// Own piece, blocked, or otherwise unreachable.
    Unavailable,
}

/// How a suggestion is presented: a playable landing or a disabled marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestionEffect {
    /// Legal landing square, drawn dimmed.
    Shadow,
    /// Visible but disabled - midpoint markers, blocked squares, and quiet
    /// moves suppressed by a forced capture.
    NotAllowed,
}

/// One annotated square in a suggestion list.
///
/// `depth` counts recursion hops from the origin square (the first ring is
/// depth 1); entries past the visibility horizon are downgraded by
/// [`correct_moves`]. Generation order matters: a capture landing is pushed
/// immediately after its midpoint marker, and the chain-continuation test
/// relies on that adjacency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionEntry {
    pub target: (u8, u8),
    pub kind: MoveKind,
    pub effect: SuggestionEffect,
    /// Occupant side of the target square at generation time.
    pub owner: Option<Side>,
    pub depth: u8,
}

/// The per-turn state the search needs, threaded as an argument instead of
/// living on the searcher.
#[derive(Debug, Clone, Copy)]
pub struct ChainContext<'a> {
    /// Side whose piece is being moved.
    pub side: Side,
    /// Squares flagged as captured earlier in this turn's chain.
    pub captured: &'a [(u8, u8)],
    /// Whether the previous hop this turn was a capture; a man may then also
    /// search its two reverse diagonals, but never make a quiet move.
    pub after_capture: bool,
}

/// Full-board enumeration for one side: the selected piece's raw
/// suggestions, every other piece's suggestions that contain a capture, and
/// both sides' occupied squares.
#[derive(Debug, Clone, Default)]
pub struct CaptureSurvey {
    pub selected: Vec<SuggestionEntry>,
    pub other: Vec<SuggestionEntry>,
    pub own_squares: Vec<(u8, u8)>,
    pub opponent_squares: Vec<(u8, u8)>,
}

impl CaptureSurvey {
    /// Whether any piece other than the selected one has a capture.
    pub fn other_has_capture(&self) -> bool {
        has_capture(&self.other)
    }
}
