//! Presentation boundary: events the core emits
//!
//! The orchestrator never reaches into a renderer; it pushes [`GameEvent`]s
//! into an injected [`EventSink`]. Production wires a real presentation
//! adapter, unit tests a recording double, and [`NullSink`] drops everything.

use crate::game::components::Side;

/// One-way notifications from the rules engine to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A piece was selected and should be highlighted.
    PieceHighlighted { at: (u8, u8) },
    /// Selection and all suggestion display state were dropped.
    SelectionCleared,
    /// A piece physically relocated.
    PieceMoved { from: (u8, u8), to: (u8, u8) },
    /// A flagged enemy was removed at turn finish.
    PieceCaptured { at: (u8, u8) },
    /// A man reached the back rank and became a king.
    PiecePromoted { at: (u8, u8) },
    /// The turn passed to `side`.
    TurnChanged { side: Side },
    /// Capture totals changed.
    ScoreChanged { white: u32, black: u32 },
    /// One-shot: the game ended. No further input mutates the board.
    GameOver { winner: Side },
}

/// Receiver for [`GameEvent`]s, injected at construction.
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

/// Sink that ignores every event; the default when no presentation layer is
/// attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: GameEvent) {}
}

/// Sink that records every event in order. A test double: clone the handle,
/// hand one clone to the orchestrator, and read events back through the
/// other.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: std::rc::Rc<std::cell::RefCell<Vec<GameEvent>>>,
}

impl RecordingSink {
    /// Everything emitted so far, in order.
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    pub fn contains(&self, event: &GameEvent) -> bool {
        self.events.borrow().iter().any(|seen| seen == event)
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: GameEvent) {
        self.events.borrow_mut().push(event);
    }
}
