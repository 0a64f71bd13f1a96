//! Turn orchestration: selection, placement, chains, promotion, game over
//!
//! [`GameMaster`] owns the board, turn, score, selection, pending captures
//! and movement log; nothing else mutates them. It sequences a turn as
//! select -> suggest -> place -> chain-check -> finish-or-continue, emitting
//! [`GameEvent`]s to the injected sink along the way.
//!
//! Invalid player input (empty square, opponent's piece, non-suggested
//! target) is silently declined with no state change. Consuming a suggestion
//! that was never offered is a programming error and panics: it means the
//! suggestion cache desynchronized from the board.

use tracing::{debug, error, info};

use crate::board::geometry;
use crate::board::Board;
use crate::game::components::Side;
use crate::game::events::{EventSink, GameEvent, NullSink};
use crate::game::resources::{MovementLog, PendingCaptures, ScoreBoard, Selection, TurnManager};
use crate::game::rules::{self, resolver, ChainContext, MoveKind, SuggestionEntry};

/// Where the orchestrator is inside the current turn.
///
/// Valid transitions:
/// - `Idle -> Selected` (piece chosen)
/// - `Selected -> Selected` (switched to another piece)
/// - `Selected -> Idle` (selection cleared or toggled off)
/// - `Selected -> ChainContinuation` (a hop was placed)
/// - `ChainContinuation -> Selected` (same piece must keep jumping)
/// - `ChainContinuation -> Idle` (turn finished)
/// - any non-terminal state `-> GameOver`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// No selection; waiting for the side to move.
    #[default]
    Idle,
    /// A piece is chosen and its suggestions are cached.
    Selected,
    /// A hop was placed; deciding whether the chain continues.
    ChainContinuation,
    /// Terminal. Only an external new-game resets it.
    GameOver,
}

impl GamePhase {
    fn can_transition(self, next: GamePhase) -> bool {
        match (self, next) {
            (GamePhase::GameOver, _) => false,
            (_, GamePhase::GameOver) => true,
            (GamePhase::Idle, GamePhase::Selected) => true,
            (GamePhase::Selected, GamePhase::Selected) => true,
            (GamePhase::Selected, GamePhase::Idle) => true,
            (GamePhase::Selected, GamePhase::ChainContinuation) => true,
            (GamePhase::ChainContinuation, GamePhase::Selected) => true,
            (GamePhase::ChainContinuation, GamePhase::Idle) => true,
            _ => false,
        }
    }
}

/// The turn orchestrator.
pub struct GameMaster {
    pub(crate) board: Board,
    pub(crate) turn: TurnManager,
    pub(crate) score: ScoreBoard,
    pub(crate) selection: Selection,
    pub(crate) pending: PendingCaptures,
    pub(crate) log: MovementLog,
    pub(crate) phase: GamePhase,
    pub(crate) players: u8,
    pub(crate) winner: Option<Side>,
    pub(crate) sink: Box<dyn EventSink>,
}

impl GameMaster {
    /// A fresh game in the standard starting position. `players` is 1 for
    /// human-vs-computer (the computer plays Black) or 2 for hotseat.
    pub fn new(players: u8) -> GameMaster {
        GameMaster::with_sink(players, NullSink)
    }

    /// Like [`GameMaster::new`], with a presentation sink attached.
    pub fn with_sink(players: u8, sink: impl EventSink + 'static) -> GameMaster {
        GameMaster {
            board: Board::standard(),
            turn: TurnManager::new(),
            score: ScoreBoard::new(),
            selection: Selection::default(),
            pending: PendingCaptures::new(),
            log: MovementLog::new(),
            phase: GamePhase::Idle,
            players: players.clamp(1, 2),
            winner: None,
            sink: Box::new(sink),
        }
    }

    /// Reset everything for a new game. The only way out of `GameOver`.
    pub fn new_game(&mut self) {
        info!("[MASTER] new game ({} players)", self.players);
        self.board = Board::standard();
        self.turn.clear();
        self.score.clear();
        self.selection.clear();
        self.pending.clear();
        self.log.clear();
        self.phase = GamePhase::Idle;
        self.winner = None;
        self.sink.emit(GameEvent::TurnChanged {
            side: self.turn.current(),
        });
        self.sink.emit(GameEvent::ScoreChanged { white: 0, black: 0 });
    }

    // accessors

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_turn(&self) -> Side {
        self.turn.current()
    }

    pub fn score(&self) -> (u32, u32) {
        self.score.totals()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn players(&self) -> u8 {
        self.players
    }

    pub fn set_players(&mut self, players: u8) {
        self.players = players.clamp(1, 2);
    }

    /// Whether the computer owns the side to move (one-player mode only;
    /// the computer always plays Black).
    pub fn is_computer_turn(&self) -> bool {
        self.players == 1 && self.turn.current() == Side::Black
    }

    /// Selected square, if any.
    pub fn selected_square(&self) -> Option<(u8, u8)> {
        self.selection.square
    }

    /// Cached suggestion for `pos`, if the current selection offers one.
    /// This is the outbound per-square suggestion surface.
    pub fn suggestion_at(&self, pos: (u8, u8)) -> Option<&SuggestionEntry> {
        self.selection.entry_for(pos)
    }

    // inbound surface

    /// Pointer-down on a board cell: select a piece or place the selected
    /// one, whichever applies. Anything else is silently ignored.
    pub fn on_square_activated(&mut self, pos: (u8, u8)) {
        if !geometry::in_bounds((pos.0 as i8, pos.1 as i8)) {
            return;
        }
        if self.is_computer_turn() {
            debug!("[MASTER] input ignored, computer to move");
            return;
        }
        if self.can_select(pos) {
            self.select_square(pos);
        } else if self.can_place(pos) {
            self.place_piece(pos);
        }
    }

    /// Hover-in: mirror the cached suggestion onto the square's transient
    /// marker. Never touches authoritative state.
    pub fn on_square_hover_enter(&mut self, pos: (u8, u8)) {
        if !geometry::in_bounds((pos.0 as i8, pos.1 as i8)) || self.phase == GamePhase::GameOver {
            return;
        }
        if let Some(entry) = self.selection.entry_for(pos) {
            let effect = entry.effect;
            self.board.square_mut(pos).set_marker(effect);
        }
    }

    /// Hover-out: drop the square's transient marker.
    pub fn on_square_hover_leave(&mut self, pos: (u8, u8)) {
        if !geometry::in_bounds((pos.0 as i8, pos.1 as i8)) {
            return;
        }
        self.board.square_mut(pos).clear_marker();
    }

    // selection

    /// Whether `pos` may be selected right now: the game is running, it is a
    /// human turn, the square holds the mover's piece, and mid-chain only
    /// the chaining piece itself qualifies.
    pub fn can_select(&self, pos: (u8, u8)) -> bool {
        if !geometry::in_bounds((pos.0 as i8, pos.1 as i8)) {
            return false;
        }
        if self.phase == GamePhase::GameOver || self.is_computer_turn() {
            return false;
        }
        if self.board.square(pos).side() != Some(self.turn.current()) {
            return false;
        }
        self.pending.is_empty() || self.selection.square == Some(pos)
    }

    /// Select the piece on `pos` and compute its suggestions. Re-selecting
    /// the same square toggles the selection off, except mid-chain where the
    /// chaining piece must stay selected.
    pub fn select_square(&mut self, pos: (u8, u8)) -> bool {
        if !self.can_select(pos) {
            debug!("[MASTER] select declined at {}", geometry::square_name(pos));
            return false;
        }
        if self.selection.square == Some(pos) {
            if self.pending.is_empty() {
                self.clear_selection();
                return true;
            }
            // The chaining piece cannot be deselected.
            return false;
        }
        if self.selection.is_selected() {
            self.clear_selection();
        }

        self.selection.square = Some(pos);
        self.transition_to(GamePhase::Selected);
        self.sink.emit(GameEvent::PieceHighlighted { at: pos });
        self.compute_suggestions();
        debug!(
            "[MASTER] selected {} with {} suggestions",
            geometry::square_name(pos),
            self.selection.suggestions.len()
        );

        if let Some(winner) = self.evaluate_game_over() {
            self.declare_game_over(winner);
        }
        true
    }

    /// Drop selection, suggestions and markers.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.board.clear_markers();
        if self.phase == GamePhase::Selected {
            self.transition_to(GamePhase::Idle);
        }
        self.sink.emit(GameEvent::SelectionCleared);
    }

    /// Populate the suggestion cache for the selected square: raw search,
    /// per-piece correction, then cross-piece capture priority.
    pub(crate) fn compute_suggestions(&mut self) {
        let Some(selected) = self.selection.square else {
            self.selection.clear_suggestions();
            return;
        };
        let captured = self.pending.positions().to_vec();
        let ctx = ChainContext {
            side: self.turn.current(),
            captured: &captured,
            after_capture: self.log.last_was_capture(),
        };
        let survey = resolver::survey(&self.board, ctx, Some(selected));
        let other_has_capture = survey.other_has_capture();
        let corrected = resolver::correct_moves(survey.selected);
        let own_has_capture = rules::has_capture(&corrected);

        self.selection.suggestions = if other_has_capture && !own_has_capture {
            // Another piece is forced to capture; this one may not move.
            resolver::suppress_all(corrected)
        } else {
            corrected
        };
    }

    // placement

    /// Whether the selected piece may land on `pos`.
    pub fn can_place(&self, pos: (u8, u8)) -> bool {
        geometry::in_bounds((pos.0 as i8, pos.1 as i8))
            && self.phase != GamePhase::GameOver
            && self.selection.is_selected()
            && self.selection.is_playable(pos)
    }

    /// Land the selected piece on `pos`, flag any jumped enemy, and either
    /// continue the chain or finish the turn.
    pub fn place_piece(&mut self, pos: (u8, u8)) -> bool {
        if !self.can_place(pos) {
            debug!("[MASTER] place declined at {}", geometry::square_name(pos));
            return false;
        }
        self.move_selected(pos);
        self.flag_jumped_enemy(pos);
        self.transition_to(GamePhase::ChainContinuation);
        if self.chain_continues(pos) {
            self.transition_to(GamePhase::Selected);
        } else {
            self.finish_turn();
        }
        true
    }

    /// Physically relocate the selected piece and log the consumed
    /// suggestion. Panics when the suggestion was never offered - that is a
    /// desynchronized cache, not a reachable player input.
    pub(crate) fn move_selected(&mut self, target: (u8, u8)) {
        let from = self
            .selection
            .square
            .unwrap_or_else(|| panic!("[MASTER] placement without a selection"));
        let entry = *self.selection.entry_for(target).unwrap_or_else(|| {
            panic!(
                "[MASTER] suggestion cache desynchronized: {} was never offered",
                geometry::square_name(target)
            )
        });
        self.board.move_piece(from, target);
        self.board.clear_markers();
        self.log.push(entry);
        info!(
            "[MASTER] {:?} moved {} -> {}",
            self.turn.current(),
            geometry::square_name(from),
            geometry::square_name(target)
        );
        self.sink.emit(GameEvent::PieceMoved { from, to: target });
    }

    /// After a capture hop, walk backward from the landing square along the
    /// reverse of the move direction and flag the nearest enemy from the
    /// last computed suggestion set. First match wins.
    pub(crate) fn flag_jumped_enemy(&mut self, target: (u8, u8)) {
        if !self.log.last_was_capture() {
            self.selection.clear_suggestions();
            return;
        }
        let from = self
            .selection
            .square
            .expect("capture walk requires the chain origin");
        let back = geometry::ray_direction(target, from);
        let opponent = self.turn.current().opponent();

        let mut range: i8 = 1;
        loop {
            let point = geometry::step(target, back, range);
            if !geometry::in_bounds(point) {
                break;
            }
            let pos = (point.0 as u8, point.1 as u8);
            let flagged = self
                .selection
                .suggestions
                .iter()
                .find(|entry| entry.target == pos)
                .map(|entry| entry.owner == Some(opponent))
                .unwrap_or(false);
            if flagged {
                debug!("[MASTER] flagged capture at {}", geometry::square_name(pos));
                self.pending.add(pos);
                break;
            }
            range += 1;
        }
        self.selection.clear_suggestions();
    }

    /// Re-run the resolver from the landing square and decide whether the
    /// same piece must keep jumping. True only when the last hop was a
    /// capture and a further capture landing exists whose immediately
    /// preceding entry is a fresh midpoint marker - an already-captured
    /// enemy never extends a chain.
    pub(crate) fn chain_continues(&mut self, square: (u8, u8)) -> bool {
        self.selection.square = Some(square);
        if !self.log.last_was_capture() {
            return false;
        }
        self.compute_suggestions();

        let entries = &self.selection.suggestions;
        let mut can_move = false;
        for (index, entry) in entries.iter().enumerate() {
            if entry.kind == MoveKind::CaptureAfterEnemy
                && index > 0
                && entries[index - 1].kind == MoveKind::CaptureOnEnemy
            {
                can_move = true;
                break;
            }
        }

        if !can_move {
            self.selection.clear_suggestions();
        }
        can_move
    }

    // turn finish & game over

    /// Apply the turn: remove flagged enemies, credit the score, promote a
    /// man standing on the back rank, hand the turn over, and evaluate game
    /// over for the side now to move.
    pub(crate) fn finish_turn(&mut self) {
        let mover = self.turn.current();

        let flagged = self.pending.drain();
        for pos in flagged {
            if self.board.remove_piece(pos).is_some() {
                self.score.increment(mover);
                info!("[MASTER] captured piece at {}", geometry::square_name(pos));
                self.sink.emit(GameEvent::PieceCaptured { at: pos });
            }
        }
        let (white, black) = self.score.totals();
        self.sink.emit(GameEvent::ScoreChanged { white, black });

        if let Some(landing) = self.selection.square {
            let promotes = self
                .board
                .square(landing)
                .occupant()
                .map(|piece| {
                    piece.side == mover && piece.is_man() && landing.1 == mover.promotion_row()
                })
                .unwrap_or(false);
            if promotes {
                self.board.square_mut(landing).promote();
                info!("[MASTER] promoted at {}", geometry::square_name(landing));
                self.sink.emit(GameEvent::PiecePromoted { at: landing });
            }
        }

        self.turn.finish_turn();
        self.sink.emit(GameEvent::TurnChanged {
            side: self.turn.current(),
        });

        self.selection.clear();
        self.board.clear_markers();
        self.log.clear();
        if self.phase != GamePhase::GameOver && self.phase != GamePhase::Idle {
            self.transition_to(GamePhase::Idle);
        }

        if let Some(winner) = self.evaluate_game_over() {
            self.declare_game_over(winner);
        }
    }

    /// Game-over scan for the side to move: no pieces left on either side,
    /// or no playable destination anywhere, ends the game with the other
    /// side as winner.
    pub(crate) fn evaluate_game_over(&self) -> Option<Side> {
        let side = self.turn.current();
        let opponent = side.opponent();
        if self.board.count_side(side) == 0 {
            return Some(opponent);
        }
        if self.board.count_side(opponent) == 0 {
            return Some(side);
        }
        if !resolver::side_has_any_move(&self.board, side) {
            return Some(opponent);
        }
        None
    }

    /// One-shot terminal transition.
    pub(crate) fn declare_game_over(&mut self, winner: Side) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        info!("[MASTER] game over, {:?} wins", winner);
        self.phase = GamePhase::GameOver;
        self.winner = Some(winner);
        self.sink.emit(GameEvent::GameOver { winner });
    }

    pub(crate) fn transition_to(&mut self, next: GamePhase) {
        if !self.phase.can_transition(next) {
            error!(
                "[MASTER] invalid phase transition: {:?} -> {:?}",
                self.phase, next
            );
            #[cfg(debug_assertions)]
            panic!(
                "invalid phase transition: {:?} -> {:?}",
                self.phase, next
            );
        }
        self.phase = next;
    }
}
