//! Computer opponent
//!
//! Plays a whole turn with the same rules pipeline as human input: enumerate
//! suggestions, honor capture priority, place, and follow the chain until
//! the turn ends. Captures are picked uniformly at random among every
//! capture landing the side has; quiet moves uniformly among every quiet
//! landing. Pacing between chained hops (animation delays) is a presentation
//! concern and lives with the caller, not here.

use rand::Rng;
use tracing::{debug, info};

use crate::game::master::{GameMaster, GamePhase};
use crate::game::rules::{resolver, ChainContext, MoveKind, SuggestionEffect, SuggestionEntry};

/// A chosen hop: the piece's square and the suggestion it consumes.
type Pick = ((u8, u8), SuggestionEntry);

impl GameMaster {
    /// Play the computer's entire turn, chains included. Returns `false`
    /// when it is not the computer's turn (or the game is over), `true`
    /// after the turn was played - or conceded, when no piece had any
    /// destination left.
    pub fn make_computer_move(&mut self, rng: &mut impl Rng) -> bool {
        if self.phase == GamePhase::GameOver || !self.is_computer_turn() {
            return false;
        }
        let computer = self.turn.current();

        loop {
            let fresh = !self.selection.is_selected() && self.pending.is_empty();
            let per_piece = self.candidate_moves(fresh);

            let Some((from, entry)) = choose_hop(&per_piece, rng) else {
                info!("[AI] no legal destination left, conceding");
                self.finish_turn();
                if self.winner.is_none() {
                    self.declare_game_over(computer.opponent());
                }
                return true;
            };

            debug!(
                "[AI] {:?} plays {:?} to {:?}",
                computer, entry.kind, entry.target
            );
            self.selection.square = Some(from);
            if self.phase == GamePhase::Idle {
                self.transition_to(GamePhase::Selected);
            }
            self.compute_suggestions();
            self.move_selected(entry.target);
            self.flag_jumped_enemy(entry.target);
            self.transition_to(GamePhase::ChainContinuation);
            if self.chain_continues(entry.target) {
                self.transition_to(GamePhase::Selected);
                continue;
            }
            self.finish_turn();
            return true;
        }
    }

    /// Corrected suggestion lists for every piece the computer may move this
    /// hop: all of its pieces at the start of a turn, only the chaining
    /// piece afterwards.
    fn candidate_moves(&mut self, fresh: bool) -> Vec<((u8, u8), Vec<SuggestionEntry>)> {
        let side = self.turn.current();
        if fresh {
            let ctx = ChainContext {
                side,
                captured: &[],
                after_capture: false,
            };
            self.board
                .side_squares(side)
                .into_iter()
                .map(|pos| {
                    let entries =
                        resolver::correct_moves(resolver::legal_destinations(&self.board, ctx, pos));
                    (pos, entries)
                })
                .collect()
        } else {
            let pos = self
                .selection
                .square
                .expect("mid-chain the chaining piece stays selected");
            self.compute_suggestions();
            vec![(pos, self.selection.suggestions.clone())]
        }
    }
}

/// Capture landings first, quiet landings otherwise; uniform among whichever
/// tier applies. `None` when no piece has any playable destination.
fn choose_hop(per_piece: &[((u8, u8), Vec<SuggestionEntry>)], rng: &mut impl Rng) -> Option<Pick> {
    let captures = playable(per_piece, MoveKind::CaptureAfterEnemy);
    if !captures.is_empty() {
        return Some(captures[rng.random_range(0..captures.len())]);
    }
    let quiets = playable(per_piece, MoveKind::Normal);
    if quiets.is_empty() {
        None
    } else {
        Some(quiets[rng.random_range(0..quiets.len())])
    }
}

fn playable(per_piece: &[((u8, u8), Vec<SuggestionEntry>)], kind: MoveKind) -> Vec<Pick> {
    per_piece
        .iter()
        .flat_map(|(pos, entries)| {
            entries
                .iter()
                .filter(move |entry| {
                    entry.kind == kind && entry.effect == SuggestionEffect::Shadow
                })
                .map(move |entry| (*pos, *entry))
        })
        .collect()
}
