//! Game Flow Integration Tests
//!
//! Tests for full game flows including:
//! - Turn alternation and selection gating
//! - Capture application, chains, and mandatory-capture priority
//! - Promotion and game-over conditions
//! - Computer opponent turns
//! - Save/load round trips

use rand::rngs::StdRng;
use rand::SeedableRng;

use draughts::game::events::{GameEvent, RecordingSink};
use draughts::game::rules::SuggestionEffect;
use draughts::persistence::{SavedGame, SavedScore, SavedSquare};
use draughts::{GameMaster, GamePhase, PieceKind, Side};

/// Route engine logs through the test harness; `RUST_LOG=debug` shows the
/// `[MASTER]`/`[AI]` trace of a failing flow.
fn init_logging() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Build a game in an arbitrary position through the save/load surface.
fn position(pieces: &[(Side, PieceKind, (u8, u8))], turn: Side, players: u8) -> GameMaster {
    init_logging();
    let mut master = GameMaster::new(players);
    load_into(&mut master, pieces, turn, players);
    master
}

fn position_with_sink(
    pieces: &[(Side, PieceKind, (u8, u8))],
    turn: Side,
    players: u8,
) -> (GameMaster, RecordingSink) {
    let sink = RecordingSink::default();
    let mut master = GameMaster::with_sink(players, sink.clone());
    load_into(&mut master, pieces, turn, players);
    sink.clear();
    (master, sink)
}

fn load_into(
    master: &mut GameMaster,
    pieces: &[(Side, PieceKind, (u8, u8))],
    turn: Side,
    players: u8,
) {
    let saved = SavedGame {
        board: pieces
            .iter()
            .map(|&(side, kind, pos)| SavedSquare {
                position: pos,
                kind,
                side,
            })
            .collect(),
        current_turn: turn,
        score: SavedScore { white: 0, black: 0 },
        players,
    };
    master.load_game(&saved).expect("test position loads");
}

// ============================================================================
// Turn Alternation and Selection
// ============================================================================

#[test]
fn test_fresh_game_setup() {
    let master = GameMaster::new(2);
    assert_eq!(master.current_turn(), Side::White);
    assert_eq!(master.score(), (0, 0));
    assert_eq!(master.phase(), GamePhase::Idle);
    assert_eq!(master.board().count_side(Side::White), 12);
    assert_eq!(master.board().count_side(Side::Black), 12);
}

#[test]
fn test_simple_move_flips_turn() {
    //! Opening move: select a White man, step one diagonal forward into an
    //! empty square, and the turn passes to Black.
    let mut master = GameMaster::new(2);

    assert!(master.select_square((2, 5)));
    assert_eq!(master.phase(), GamePhase::Selected);
    assert!(master.can_place((3, 4)));
    assert!(master.place_piece((3, 4)));

    assert_eq!(master.current_turn(), Side::Black);
    assert_eq!(master.phase(), GamePhase::Idle);
    assert!(master.board().square((2, 5)).is_empty());
    assert_eq!(master.board().square((3, 4)).side(), Some(Side::White));
    assert_eq!(master.score(), (0, 0));
}

#[test]
fn test_select_rejects_opponent_piece_and_empty_square() {
    let mut master = GameMaster::new(2);
    assert!(!master.select_square((1, 2)), "Black piece on White's turn");
    assert!(!master.select_square((3, 4)), "empty square");
    assert_eq!(master.phase(), GamePhase::Idle);
    assert_eq!(master.selected_square(), None);
}

#[test]
fn test_reselect_same_square_toggles_off() {
    let mut master = GameMaster::new(2);
    assert!(master.select_square((2, 5)));
    assert!(master.select_square((2, 5)), "toggle succeeds");
    assert_eq!(master.selected_square(), None);
    assert_eq!(master.phase(), GamePhase::Idle);
}

#[test]
fn test_place_on_unsuggested_square_is_ignored() {
    //! Invalid input is silently declined: no state change, no panic.
    let mut master = GameMaster::new(2);
    master.select_square((2, 5));
    assert!(!master.place_piece((2, 2)), "not a suggested landing");
    assert!(!master.place_piece((4, 4)));
    assert_eq!(master.current_turn(), Side::White);
    assert_eq!(master.board().square((2, 5)).side(), Some(Side::White));
}

// ============================================================================
// Captures
// ============================================================================

#[test]
fn test_capture_removes_enemy_and_scores() {
    //! Single jump: the landing is offered, the jumped enemy disappears at
    //! turn finish, the mover scores one, and the events arrive in order.
    let (mut master, sink) = position_with_sink(
        &[
            (Side::White, PieceKind::Man, (3, 4)),
            (Side::Black, PieceKind::Man, (2, 3)),
            (Side::Black, PieceKind::Man, (5, 0)),
        ],
        Side::White,
        2,
    );

    assert!(master.select_square((3, 4)));
    let landing = master.suggestion_at((1, 2)).expect("landing offered");
    assert_eq!(landing.effect, SuggestionEffect::Shadow);

    assert!(master.place_piece((1, 2)));
    assert_eq!(master.score(), (1, 0));
    assert_eq!(master.current_turn(), Side::Black);
    assert!(master.board().square((2, 3)).is_empty(), "enemy removed");
    assert_eq!(master.board().square((1, 2)).side(), Some(Side::White));

    let events = sink.events();
    let moved = events
        .iter()
        .position(|e| matches!(e, GameEvent::PieceMoved { from: (3, 4), to: (1, 2) }))
        .expect("move event");
    let captured = events
        .iter()
        .position(|e| matches!(e, GameEvent::PieceCaptured { at: (2, 3) }))
        .expect("capture event");
    assert!(moved < captured, "capture applies at turn finish");
    assert!(sink.contains(&GameEvent::ScoreChanged { white: 1, black: 0 }));
    assert!(sink.contains(&GameEvent::TurnChanged { side: Side::Black }));
}

#[test]
fn test_blocked_jump_offers_no_landing() {
    //! Occupied landing square: the man cannot jump, only its quiet move
    //! remains playable.
    let mut master = position(
        &[
            (Side::White, PieceKind::Man, (3, 4)),
            (Side::Black, PieceKind::Man, (2, 3)),
            (Side::White, PieceKind::Man, (1, 2)),
        ],
        Side::White,
        2,
    );

    assert!(master.select_square((3, 4)));
    assert!(!master.can_place((1, 2)), "occupied landing");
    assert!(master.can_place((4, 3)), "quiet move stays available");
}

#[test]
fn test_mandatory_capture_suppresses_other_pieces() {
    //! Capture priority across pieces: while one piece can capture, a quiet
    //! piece of the same side has no playable destination at all.
    let mut master = position(
        &[
            (Side::White, PieceKind::Man, (2, 5)),
            (Side::White, PieceKind::Man, (5, 4)),
            (Side::Black, PieceKind::Man, (4, 3)),
            (Side::Black, PieceKind::Man, (1, 0)),
        ],
        Side::White,
        2,
    );

    assert!(master.select_square((2, 5)));
    assert!(!master.can_place((1, 4)), "quiet piece is fully suppressed");
    assert!(!master.can_place((3, 4)));

    assert!(master.select_square((5, 4)), "switch to the capturing piece");
    assert!(master.can_place((3, 2)), "the capture landing is playable");
    assert!(
        !master.can_place((6, 3)),
        "the capturing piece's own quiet move is suppressed too"
    );
}

// ============================================================================
// Chains
// ============================================================================

#[test]
fn test_double_jump_chain() {
    //! Two jumps in one turn: the turn does not flip between hops, flagged
    //! enemies stay on the board until the turn finishes, and both captures
    //! score at once.
    let mut master = position(
        &[
            (Side::White, PieceKind::Man, (5, 6)),
            (Side::Black, PieceKind::Man, (4, 5)),
            (Side::Black, PieceKind::Man, (2, 3)),
            (Side::Black, PieceKind::Man, (7, 0)),
        ],
        Side::White,
        2,
    );

    assert!(master.select_square((5, 6)));
    assert!(master.place_piece((3, 4)));

    assert_eq!(master.current_turn(), Side::White, "chain keeps the turn");
    assert_eq!(master.phase(), GamePhase::Selected);
    assert_eq!(master.selected_square(), Some((3, 4)));
    assert_eq!(
        master.board().square((4, 5)).side(),
        Some(Side::Black),
        "flagged enemy stays until turn finish"
    );
    assert_eq!(master.score(), (0, 0));
    assert!(
        !master.can_place((5, 6)),
        "jumping back over the flagged enemy is not offered"
    );

    assert!(master.place_piece((1, 2)));
    assert_eq!(master.current_turn(), Side::Black);
    assert_eq!(master.score(), (2, 0));
    assert!(master.board().square((4, 5)).is_empty());
    assert!(master.board().square((2, 3)).is_empty());
    assert_eq!(master.board().square((1, 2)).side(), Some(Side::White));
}

#[test]
fn test_cannot_switch_piece_mid_chain() {
    let mut master = position(
        &[
            (Side::White, PieceKind::Man, (5, 6)),
            (Side::White, PieceKind::Man, (0, 5)),
            (Side::Black, PieceKind::Man, (4, 5)),
            (Side::Black, PieceKind::Man, (2, 3)),
            (Side::Black, PieceKind::Man, (7, 0)),
        ],
        Side::White,
        2,
    );

    master.select_square((5, 6));
    master.place_piece((3, 4));
    assert_eq!(master.selected_square(), Some((3, 4)));

    assert!(!master.select_square((0, 5)), "other piece is locked out");
    assert!(
        !master.select_square((3, 4)),
        "the chaining piece cannot toggle itself off"
    );
    assert_eq!(master.selected_square(), Some((3, 4)));
}

#[test]
fn test_chain_ends_at_board_edge() {
    //! A capture landing on the edge with no further jump finishes the turn
    //! immediately.
    let mut master = position(
        &[
            (Side::White, PieceKind::Man, (2, 5)),
            (Side::Black, PieceKind::Man, (1, 4)),
            (Side::Black, PieceKind::Man, (6, 1)),
        ],
        Side::White,
        2,
    );

    master.select_square((2, 5));
    assert!(master.place_piece((0, 3)));
    assert_eq!(master.current_turn(), Side::Black, "no chain at the edge");
    assert_eq!(master.score(), (1, 0));
    assert!(master.board().square((1, 4)).is_empty());
}

// ============================================================================
// Promotion
// ============================================================================

#[test]
fn test_man_promotes_on_back_rank() {
    let (mut master, sink) = position_with_sink(
        &[
            (Side::White, PieceKind::Man, (2, 1)),
            (Side::Black, PieceKind::Man, (5, 6)),
        ],
        Side::White,
        2,
    );

    master.select_square((2, 1));
    assert!(master.place_piece((1, 0)));

    let piece = master.board().square((1, 0)).occupant().expect("piece");
    assert_eq!(piece.kind, PieceKind::King, "man became a king");
    assert_eq!(piece.side, Side::White);
    assert!(sink.contains(&GameEvent::PiecePromoted { at: (1, 0) }));
    assert_eq!(master.current_turn(), Side::Black);
}

#[test]
fn test_king_does_not_promote_again() {
    let (mut master, sink) = position_with_sink(
        &[
            (Side::White, PieceKind::King, (2, 1)),
            (Side::Black, PieceKind::Man, (5, 6)),
        ],
        Side::White,
        2,
    );

    master.select_square((2, 1));
    assert!(master.place_piece((1, 0)));
    assert!(
        !sink.contains(&GameEvent::PiecePromoted { at: (1, 0) }),
        "kings do not re-promote"
    );
}

// ============================================================================
// Game Over
// ============================================================================

#[test]
fn test_capturing_last_piece_ends_game() {
    let (mut master, sink) = position_with_sink(
        &[
            (Side::White, PieceKind::Man, (3, 4)),
            (Side::Black, PieceKind::Man, (2, 3)),
        ],
        Side::White,
        2,
    );

    master.select_square((3, 4));
    assert!(master.place_piece((1, 2)));

    assert_eq!(master.phase(), GamePhase::GameOver);
    assert_eq!(master.winner(), Some(Side::White));
    assert!(sink.contains(&GameEvent::GameOver {
        winner: Side::White
    }));

    // Terminal: nothing mutates the board anymore.
    master.on_square_activated((1, 2));
    assert_eq!(master.selected_square(), None);
    assert!(!master.select_square((1, 2)));
    assert_eq!(master.board().square((1, 2)).side(), Some(Side::White));
}

#[test]
fn test_blocked_side_loses_by_stalemate() {
    //! A side whose every piece is stuck loses when its turn arrives.
    let (mut master, sink) = position_with_sink(
        &[
            (Side::Black, PieceKind::Man, (1, 6)),
            (Side::White, PieceKind::Man, (0, 7)),
            (Side::White, PieceKind::Man, (2, 7)),
            (Side::White, PieceKind::Man, (0, 5)),
            (Side::White, PieceKind::King, (2, 5)),
        ],
        Side::White,
        2,
    );

    master.select_square((0, 5));
    assert!(master.place_piece((1, 4)));

    assert_eq!(master.phase(), GamePhase::GameOver);
    assert_eq!(master.winner(), Some(Side::White));
    assert!(sink.contains(&GameEvent::GameOver {
        winner: Side::White
    }));
}

#[test]
fn test_game_over_fires_once() {
    let (mut master, sink) = position_with_sink(
        &[
            (Side::White, PieceKind::Man, (3, 4)),
            (Side::Black, PieceKind::Man, (2, 3)),
        ],
        Side::White,
        2,
    );
    master.select_square((3, 4));
    master.place_piece((1, 2));
    master.on_square_activated((1, 2));
    master.on_square_activated((0, 1));

    let game_over_count = sink
        .events()
        .iter()
        .filter(|e| matches!(e, GameEvent::GameOver { .. }))
        .count();
    assert_eq!(game_over_count, 1, "game over is a one-shot signal");
}

// ============================================================================
// Hover Markers
// ============================================================================

#[test]
fn test_hover_drives_transient_marker_only() {
    let mut master = GameMaster::new(2);
    master.select_square((2, 5));

    master.on_square_hover_enter((1, 4));
    assert_eq!(
        master.board().square((1, 4)).marker(),
        Some(SuggestionEffect::Shadow)
    );

    master.on_square_hover_leave((1, 4));
    assert_eq!(master.board().square((1, 4)).marker(), None);

    master.on_square_hover_enter((4, 4));
    assert_eq!(
        master.board().square((4, 4)).marker(),
        None,
        "unsuggested squares get no marker"
    );

    assert_eq!(master.board().count_side(Side::White), 12);
    assert_eq!(master.current_turn(), Side::White, "hover never mutates state");
}

// ============================================================================
// Computer Opponent
// ============================================================================

#[test]
fn test_computer_plays_black_after_human_turn() {
    let mut master = GameMaster::new(1);
    let mut rng = StdRng::seed_from_u64(7);

    assert!(
        !master.make_computer_move(&mut rng),
        "not the computer's turn yet"
    );

    master.on_square_activated((2, 5));
    master.on_square_activated((3, 4));
    assert_eq!(master.current_turn(), Side::Black);

    let before: Vec<_> = master.board().side_squares(Side::Black);
    assert!(master.make_computer_move(&mut rng));
    let after: Vec<_> = master.board().side_squares(Side::Black);

    assert_eq!(master.current_turn(), Side::White);
    assert_ne!(before, after, "some Black piece moved");
    assert_eq!(master.board().count_side(Side::Black), 12);
    assert_eq!(master.score(), (0, 0), "no capture available in the opening");
}

#[test]
fn test_computer_prefers_capture_over_quiet_moves() {
    let mut master = position(
        &[
            (Side::Black, PieceKind::Man, (2, 3)),
            (Side::Black, PieceKind::Man, (5, 0)),
            (Side::White, PieceKind::Man, (1, 4)),
            (Side::White, PieceKind::Man, (6, 5)),
        ],
        Side::Black,
        1,
    );
    let mut rng = StdRng::seed_from_u64(42);

    assert!(master.make_computer_move(&mut rng));
    assert!(
        master.board().square((1, 4)).is_empty(),
        "the capture was mandatory for the computer too"
    );
    assert_eq!(master.score(), (0, 1));
    assert_eq!(master.board().square((0, 5)).side(), Some(Side::Black));
    assert_eq!(master.current_turn(), Side::White);
}

#[test]
fn test_computer_completes_capture_chain() {
    let mut master = position(
        &[
            (Side::Black, PieceKind::Man, (1, 0)),
            (Side::White, PieceKind::Man, (2, 1)),
            (Side::White, PieceKind::Man, (2, 3)),
            (Side::White, PieceKind::Man, (6, 5)),
        ],
        Side::Black,
        1,
    );
    let mut rng = StdRng::seed_from_u64(3);

    assert!(master.make_computer_move(&mut rng));
    assert_eq!(master.score(), (0, 2), "both hops captured in one turn");
    assert!(master.board().square((2, 1)).is_empty());
    assert!(master.board().square((2, 3)).is_empty());
    assert_eq!(master.board().square((1, 4)).side(), Some(Side::Black));
    assert_eq!(master.current_turn(), Side::White);
}

#[test]
fn test_human_locked_out_while_computer_to_move() {
    let mut master = GameMaster::new(1);
    master.on_square_activated((2, 5));
    master.on_square_activated((3, 4));
    assert_eq!(master.current_turn(), Side::Black);

    master.on_square_activated((1, 2));
    assert_eq!(master.selected_square(), None, "selection attempts rejected");
    assert_eq!(master.current_turn(), Side::Black);
}

// ============================================================================
// Save / Load
// ============================================================================

#[test]
fn test_save_load_round_trip_resumes_game() {
    let mut master = GameMaster::new(2);
    master.select_square((2, 5));
    master.place_piece((3, 4));

    let saved = master.snapshot();
    assert_eq!(saved.current_turn, Side::Black);
    assert_eq!(saved.board.len(), 24);

    let mut restored = GameMaster::new(2);
    restored.load_game(&saved).expect("snapshot restores");
    assert_eq!(restored.current_turn(), Side::Black);
    assert_eq!(restored.snapshot(), saved, "round trip is lossless");
    assert_eq!(restored.board().square((3, 4)).side(), Some(Side::White));

    // The restored game is playable.
    assert!(restored.select_square((1, 2)));
    assert!(restored.place_piece((2, 3)));
    assert_eq!(restored.current_turn(), Side::White);
}

#[test]
fn test_load_preserves_player_mode_and_score() {
    let mut master = GameMaster::new(2);
    let saved = SavedGame {
        board: vec![
            SavedSquare {
                position: (2, 5),
                kind: PieceKind::King,
                side: Side::White,
            },
            SavedSquare {
                position: (1, 2),
                kind: PieceKind::Man,
                side: Side::Black,
            },
        ],
        current_turn: Side::Black,
        score: SavedScore { white: 4, black: 2 },
        players: 1,
    };
    master.load_game(&saved).unwrap();

    assert_eq!(master.players(), 1);
    assert_eq!(master.score(), (4, 2));
    assert!(master.is_computer_turn(), "one-player mode restored");
}
