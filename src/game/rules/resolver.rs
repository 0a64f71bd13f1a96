//! Recursive suggestion search and capture-priority correction
//!
//! The search walks outward from a square along diagonal rays, classifying
//! each step and recursing past enemies to discover jump landings and chain
//! continuations. It returns raw entries; [`correct_moves`] applies the
//! pruning and priority rules that turn them into the final list.

use crate::board::geometry::{self, DIRECTIONS};
use crate::board::Board;
use crate::game::components::PieceKind;
use crate::game::rules::{ChainContext, MoveKind, SuggestionEffect, SuggestionEntry};

/// Suggestions deeper than this many hops from the origin are display-only
/// and get downgraded to `Unavailable`. Depth 1 is the piece's own ring,
/// depth 2 the landing of its first jump; nothing further is playable or
/// pre-selectable. Chain continuation regenerates suggestions from the
/// landing square, so the horizon never hides a legal hop.
const CHAIN_VISIBILITY_DEPTH: u8 = 2;

/// Classify `target` as seen from `ray_origin` for the side in `ctx`.
///
/// The branch order is load-bearing: a landing square is recognized by the
/// ray currently standing on an enemy square, before the enemy checks
/// themselves.
pub fn classify(
    board: &Board,
    ctx: ChainContext<'_>,
    ray_origin: (u8, u8),
    target: (u8, u8),
) -> MoveKind {
    let opponent = ctx.side.opponent();
    let origin_side = board.square(ray_origin).side();
    let target_square = board.square(target);

    if origin_side == Some(opponent) && target_square.is_empty() {
        MoveKind::CaptureAfterEnemy
    } else if target_square.side() == Some(opponent) && ctx.captured.contains(&target) {
        MoveKind::AlreadyCaptured
    } else if target_square.side() == Some(opponent) {
        MoveKind::CaptureOnEnemy
    } else if target_square.is_empty() {
        MoveKind::Normal
    } else {
        MoveKind::Unavailable
    }
}

/// Raw suggestion list for the piece on `origin`.
///
/// A man searches its two forward diagonals, plus the two reverse ones
/// immediately after a capture; a king searches all four. The result is
/// uncorrected - callers pass it through [`correct_moves`] (and the
/// cross-piece suppression where it applies) before exposing it.
pub fn legal_destinations(
    board: &Board,
    ctx: ChainContext<'_>,
    origin: (u8, u8),
) -> Vec<SuggestionEntry> {
    let Some(piece) = board.square(origin).occupant() else {
        return Vec::new();
    };

    let directions: Vec<(i8, i8)> = match piece.kind {
        PieceKind::Man => {
            let forward = piece.side.forward();
            let mut dirs = vec![(1, forward), (-1, forward)];
            if ctx.after_capture {
                dirs.push((1, -forward));
                dirs.push((-1, -forward));
            }
            dirs
        }
        PieceKind::King => DIRECTIONS.to_vec(),
    };

    let mut entries = Vec::new();
    walk(board, ctx, piece.kind, origin, &directions, 1, &mut entries);
    entries
}

/// Walk every direction in `directions` outward from `ray_origin`, pushing
/// entries at `depth` and recursing (depth+1) past enemies.
fn walk(
    board: &Board,
    ctx: ChainContext<'_>,
    piece_kind: PieceKind,
    ray_origin: (u8, u8),
    directions: &[(i8, i8)],
    depth: u8,
    entries: &mut Vec<SuggestionEntry>,
) {
    let opponent = ctx.side.opponent();

    for &dir in directions {
        let mut range: i8 = 1;
        loop {
            let point = geometry::step(ray_origin, dir, range);
            if !geometry::in_bounds(point) {
                break;
            }
            let target = (point.0 as u8, point.1 as u8);
            let target_side = board.square(target).side();

            // A second enemy directly behind the first ends the ray with no
            // landing: pieces never jump two enemies in a row.
            if board.square(ray_origin).side() == Some(opponent) && target_side == Some(opponent) {
                break;
            }

            let kind = classify(board, ctx, ray_origin, target);
            match kind {
                MoveKind::Normal => {
                    // A quiet continuation after a capture is never offered.
                    if piece_kind == PieceKind::Man && ctx.after_capture {
                        break;
                    }
                    entries.push(SuggestionEntry {
                        target,
                        kind,
                        effect: SuggestionEffect::Shadow,
                        owner: target_side,
                        depth,
                    });
                    if piece_kind == PieceKind::Man {
                        break;
                    }
                    // Kings keep sliding while the ray stays empty.
                    range += 1;
                }
                MoveKind::CaptureOnEnemy | MoveKind::AlreadyCaptured => {
                    entries.push(SuggestionEntry {
                        target,
                        kind,
                        effect: SuggestionEffect::NotAllowed,
                        owner: target_side,
                        depth,
                    });
                    // One step past the enemy to discover the landing square
                    // and anything beyond it. The ray itself is capped: the
                    // jumper lands immediately past the captured piece.
                    walk(board, ctx, piece_kind, target, &[dir], depth + 1, entries);
                    break;
                }
                MoveKind::CaptureAfterEnemy => {
                    entries.push(SuggestionEntry {
                        target,
                        kind,
                        effect: SuggestionEffect::Shadow,
                        owner: target_side,
                        depth,
                    });
                    if piece_kind == PieceKind::Man {
                        // Continuation jumps may bend in any direction except
                        // straight back the way the piece came.
                        let continuations: Vec<(i8, i8)> = DIRECTIONS
                            .iter()
                            .copied()
                            .filter(|&d| d != (-dir.0, -dir.1))
                            .collect();
                        walk(
                            board,
                            ctx,
                            piece_kind,
                            target,
                            &continuations,
                            depth + 1,
                            entries,
                        );
                    }
                    // Kings continue a chain by re-selection, not here.
                    break;
                }
                MoveKind::Unavailable => {
                    entries.push(SuggestionEntry {
                        target,
                        kind,
                        effect: SuggestionEffect::NotAllowed,
                        owner: target_side,
                        depth,
                    });
                    break;
                }
            }
        }
    }
}

/// Whether a list offers at least one capture landing.
pub fn has_capture(entries: &[SuggestionEntry]) -> bool {
    entries
        .iter()
        .any(|entry| entry.kind == MoveKind::CaptureAfterEnemy)
}

/// The correction pass, returning a new list:
///
/// 1. entries past the visibility horizon (`depth > 2`) of kinds that would
///    otherwise read as reachable are downgraded to `Unavailable`;
/// 2. a landing directly past an already-flagged enemy is downgraded too -
///    jumping the same piece twice in one turn is illegal;
/// 3. if the piece has a capture, all of its quiet moves lose their
///    `Shadow` effect - capturing takes priority even within one piece.
pub fn correct_moves(entries: Vec<SuggestionEntry>) -> Vec<SuggestionEntry> {
    let mut corrected: Vec<SuggestionEntry> = entries
        .into_iter()
        .map(|mut entry| {
            let reads_reachable = matches!(
                entry.kind,
                MoveKind::Normal | MoveKind::AlreadyCaptured | MoveKind::CaptureAfterEnemy
            );
            if entry.depth > CHAIN_VISIBILITY_DEPTH && reads_reachable {
                entry.kind = MoveKind::Unavailable;
                entry.effect = SuggestionEffect::NotAllowed;
            }
            entry
        })
        .collect();

    for index in 1..corrected.len() {
        let is_stale_landing = corrected[index].kind == MoveKind::CaptureAfterEnemy
            && corrected[index - 1].kind == MoveKind::AlreadyCaptured
            && corrected[index].depth == corrected[index - 1].depth + 1;
        if is_stale_landing {
            corrected[index].kind = MoveKind::Unavailable;
            corrected[index].effect = SuggestionEffect::NotAllowed;
        }
    }

    if has_capture(&corrected) {
        for entry in corrected
            .iter_mut()
            .filter(|entry| entry.kind == MoveKind::Normal)
        {
            entry.effect = SuggestionEffect::NotAllowed;
        }
    }

    corrected
}

/// Downgrade every entry to an unplayable marker. Applied to a piece's whole
/// list when another piece of the same side is forced to capture.
pub fn suppress_all(entries: Vec<SuggestionEntry>) -> Vec<SuggestionEntry> {
    entries
        .into_iter()
        .map(|mut entry| {
            entry.kind = MoveKind::Unavailable;
            entry.effect = SuggestionEffect::NotAllowed;
            entry
        })
        .collect()
}

/// Enumerate the whole side: the selected square's raw suggestions, the
/// suggestions of every other piece that has a capture available, and both
/// sides' occupied squares.
pub fn survey(
    board: &Board,
    ctx: ChainContext<'_>,
    selected: Option<(u8, u8)>,
) -> crate::game::rules::CaptureSurvey {
    let own_squares = board.side_squares(ctx.side);
    let opponent_squares = board.side_squares(ctx.side.opponent());

    let mut selected_entries = Vec::new();
    let mut other = Vec::new();
    for &pos in &own_squares {
        let entries = legal_destinations(board, ctx, pos);
        if Some(pos) == selected {
            selected_entries = entries;
        } else if has_capture(&entries) {
            other.extend(entries);
        }
    }

    crate::game::rules::CaptureSurvey {
        selected: selected_entries,
        other,
        own_squares,
        opponent_squares,
    }
}

/// Whether `side` has at least one playable destination anywhere on the
/// board, after per-piece correction. Used by the game-over scan.
pub fn side_has_any_move(board: &Board, side: crate::game::components::Side) -> bool {
    let ctx = ChainContext {
        side,
        captured: &[],
        after_capture: false,
    };
    board.side_squares(side).into_iter().any(|pos| {
        correct_moves(legal_destinations(board, ctx, pos))
            .iter()
            .any(|entry| {
                entry.effect == SuggestionEffect::Shadow
                    && matches!(entry.kind, MoveKind::Normal | MoveKind::CaptureAfterEnemy)
            })
    })
}
