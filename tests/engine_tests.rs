//! Engine scenarios driven through the public command API

use blockfall::core::{Board, PieceSource, SequenceSource};
use blockfall::engine::{EngineConfig, GameEngine, GameEvent};
use blockfall::types::{GameAction, Phase, PieceKind, BOARD_WIDTH};

fn source(kinds: &[PieceKind]) -> Box<dyn PieceSource> {
    Box::new(SequenceSource::new(kinds.to_vec()))
}

fn engine(kinds: &[PieceKind]) -> GameEngine {
    GameEngine::with_source(EngineConfig::default(), source(kinds)).unwrap()
}

fn engine_on(board: Board, kinds: &[PieceKind]) -> GameEngine {
    GameEngine::with_board(EngineConfig::default(), source(kinds), board).unwrap()
}

fn fill_row_except(board: &mut Board, y: i8, gaps: &[i8]) {
    for x in 0..BOARD_WIDTH as i8 {
        if !gaps.contains(&x) {
            board.set(x, y, Some(PieceKind::T));
        }
    }
}

/// Move the active piece horizontally by `dx` columns.
fn shift(engine: &mut GameEngine, dx: i8) {
    for _ in 0..dx.unsigned_abs() {
        let moved = if dx < 0 {
            engine.move_left()
        } else {
            engine.move_right()
        };
        assert!(moved);
    }
}

/// Run the default hold and settle delays of one clear pass.
fn finish_pass(engine: &mut GameEngine) {
    engine.advance(500);
    engine.advance(50);
}

#[test]
fn test_drop_ticks_follow_interval() {
    let mut engine = engine(&[PieceKind::T]);
    assert!(!engine.advance(559));
    assert_eq!(engine.active().unwrap().y, 0);
    assert!(engine.advance(1));
    assert_eq!(engine.active().unwrap().y, 1);

    // A long frame fires every tick it covers.
    engine.advance(560 * 3);
    assert_eq!(engine.active().unwrap().y, 4);
}

#[test]
fn test_o_pieces_clear_two_rows() {
    let mut engine = engine(&[PieceKind::O]);
    for dx in [-4, -2, 0, 2, 4] {
        shift(&mut engine, dx);
        assert!(engine.hard_drop());
    }

    assert!(engine.is_clearing());
    assert_eq!(engine.pending_clear_rows(), &[18, 19]);
    let snap = engine.snapshot();
    assert!(snap.pending_clear[18] && snap.pending_clear[19]);
    assert!(snap.active.is_none());

    finish_pass(&mut engine);
    assert_eq!(engine.score(), 300);
    assert_eq!(engine.lines(), 2);
    assert!(engine.board().cells().iter().all(|c| c.is_none()));
    assert!(engine.active().is_some());
}

#[test]
fn test_single_clear_event_order() {
    let mut board = Board::new();
    fill_row_except(&mut board, 19, &[4, 5, 6, 7]);
    let mut engine = engine_on(board, &[PieceKind::I]);
    engine.drain_events().count();

    engine.hard_drop();
    engine.advance(500);
    engine.advance(50);

    let names: Vec<&str> = engine
        .drain_events()
        .filter(|e| !matches!(e, GameEvent::PieceChanged(Some(p)) if p.y > 0))
        .map(|e| e.name())
        .collect();
    assert_eq!(
        names,
        vec![
            "piece_changed",
            "board_changed",
            "lines_pending_clear",
            "board_changed",
            "lines_cleared",
            "score_changed",
            "piece_changed",
        ]
    );
}

#[test]
fn test_landing_without_clear_does_not_commit() {
    let mut engine = engine(&[PieceKind::S]);
    engine.drain_events().count();
    engine.hard_drop();
    assert!(!engine.is_clearing());
    assert!(engine
        .drain_events()
        .all(|e| !matches!(e, GameEvent::ScoreChanged { .. })));
    assert_eq!(engine.score(), 0);
}

#[test]
fn test_tetris_crosses_level_threshold() {
    let mut board = Board::new();
    for y in 16..20 {
        fill_row_except(&mut board, y, &[0]);
    }
    let mut engine = engine_on(board, &[PieceKind::I]);

    assert!(engine.rotate_clockwise());
    shift(&mut engine, -4);
    engine.hard_drop();
    assert_eq!(engine.pending_clear_rows(), &[16, 17, 18, 19]);

    finish_pass(&mut engine);
    assert_eq!(engine.score(), 800);
    assert_eq!(engine.lines(), 4);
    assert_eq!(engine.level(), 2);
    assert_eq!(engine.drop_interval_ms(), 560.0 * 0.92);

    let level_events: Vec<_> = engine
        .drain_events()
        .filter(|e| matches!(e, GameEvent::LevelChanged { .. }))
        .collect();
    assert_eq!(
        level_events,
        vec![GameEvent::LevelChanged {
            level: 2,
            drop_interval_ms: 560.0 * 0.92
        }]
    );

    // The new piece falls at the new speed, rounded up to 516ms per row.
    let y0 = engine.active().unwrap().y;
    engine.advance(515);
    assert_eq!(engine.active().unwrap().y, y0);
    engine.advance(1);
    assert_eq!(engine.active().unwrap().y, y0 + 1);
}

#[test]
fn test_blocked_spawn_is_game_over() {
    let mut board = Board::new();
    fill_row_except(&mut board, 0, &[]);
    fill_row_except(&mut board, 1, &[]);
    let mut engine = engine_on(board, &[PieceKind::T]);

    assert_eq!(engine.phase(), Phase::GameOver);
    assert!(engine.active().is_none());
    let events: Vec<_> = engine.drain_events().collect();
    assert_eq!(events, vec![GameEvent::GameOver { score: 0 }]);

    for action in [
        GameAction::MoveLeft,
        GameAction::RotateCw,
        GameAction::HardDrop,
        GameAction::Tick,
        GameAction::Pause,
    ] {
        assert!(!engine.apply_action(action), "{:?}", action);
    }
    assert!(!engine.advance(10_000));
    assert!(engine.snapshot().game_over());
}

#[test]
fn test_reset_after_game_over_starts_fresh() {
    let mut board = Board::new();
    fill_row_except(&mut board, 0, &[]);
    let mut engine = engine_on(board, &[PieceKind::L, PieceKind::J]);
    assert_eq!(engine.phase(), Phase::GameOver);

    assert!(engine.apply_action(GameAction::Reset));
    assert_eq!(engine.phase(), Phase::Running);
    assert!(engine.board().cells().iter().all(|c| c.is_none()));
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.level(), 1);
    assert_eq!(engine.drop_interval_ms(), 560.0);
    // The source restarts with the game.
    assert_eq!(engine.active().unwrap().kind, PieceKind::L);
}

#[test]
fn test_reset_during_pending_cascade() {
    let mut board = Board::new();
    fill_row_except(&mut board, 19, &[4, 5, 6, 7]);
    let mut engine = engine_on(board, &[PieceKind::I]);
    engine.hard_drop();
    assert!(engine.is_clearing());
    engine.advance(250);

    engine.reset();
    assert!(!engine.is_clearing());
    assert!(engine.pending_clear_rows().is_empty());
    assert!(engine.board().cells().iter().all(|c| c.is_none()));
    engine.drain_events().count();

    engine.advance(2_000);
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.lines(), 0);
    assert!(engine
        .drain_events()
        .all(|e| !matches!(e, GameEvent::LinesCleared { .. } | GameEvent::ScoreChanged { .. })));
}

#[test]
fn test_pause_stops_drops_and_moves() {
    let mut engine = engine(&[PieceKind::J]);
    engine.advance(300);
    assert!(engine.toggle_pause());
    assert_eq!(engine.phase(), Phase::Paused);
    assert!(engine.snapshot().paused());

    assert!(!engine.move_left());
    assert!(!engine.soft_drop());
    engine.advance(5_000);
    assert_eq!(engine.active().unwrap().y, 0);

    // Resuming starts a full interval.
    assert!(engine.toggle_pause());
    engine.advance(559);
    assert_eq!(engine.active().unwrap().y, 0);
    engine.advance(1);
    assert_eq!(engine.active().unwrap().y, 1);

    let paused: Vec<_> = engine
        .drain_events()
        .filter(|e| matches!(e, GameEvent::Paused(_)))
        .collect();
    assert_eq!(paused, vec![GameEvent::Paused(true), GameEvent::Paused(false)]);
}

#[test]
fn test_reset_while_paused_reports_resume() {
    let mut engine = engine(&[PieceKind::Z]);
    assert!(engine.toggle_pause());
    engine.drain_events().count();

    assert!(engine.reset());
    assert_eq!(engine.phase(), Phase::Running);
    assert!(!engine.snapshot().paused());
    let paused: Vec<_> = engine
        .drain_events()
        .filter(|e| matches!(e, GameEvent::Paused(_)))
        .collect();
    assert_eq!(paused, vec![GameEvent::Paused(false)]);

    // Drops run again straight away.
    engine.advance(560);
    assert_eq!(engine.active().unwrap().y, 1);
}

#[test]
fn test_rotation_at_left_wall() {
    let mut engine = engine(&[PieceKind::I]);
    shift(&mut engine, -4);
    assert_eq!(engine.active().unwrap().x, 0);
    assert!(engine.rotate_clockwise());
    let piece = engine.active().unwrap();
    assert_eq!((piece.shape.rows(), piece.shape.cols()), (4, 1));
    assert_eq!(piece.x, 0);
}

#[test]
fn test_config_timings_are_used() {
    let config = EngineConfig {
        initial_drop_ms: 100,
        line_clear_hold_ms: 0,
        cascade_settle_ms: 0,
        ..EngineConfig::default()
    };
    let mut board = Board::new();
    fill_row_except(&mut board, 19, &[4, 5, 6, 7]);
    let mut engine = GameEngine::with_board(config, source(&[PieceKind::I]), board).unwrap();
    assert_eq!(engine.drop_interval_ms(), 100.0);

    engine.hard_drop();
    // Zero delays resolve the whole cascade on the next advance.
    engine.advance(0);
    assert_eq!(engine.score(), 100);
    assert!(!engine.is_clearing());
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = EngineConfig {
        speed_factor: 0.0,
        ..EngineConfig::default()
    };
    let err = GameEngine::new(config).unwrap_err();
    assert_eq!(err.code(), "speed_factor");
}

#[test]
fn test_seeded_games_are_reproducible() {
    let config = EngineConfig {
        seed: Some(2024),
        ..EngineConfig::default()
    };
    let mut a = GameEngine::new(config.clone()).unwrap();
    let mut b = GameEngine::new(config).unwrap();
    for _ in 0..20 {
        assert_eq!(a.active().map(|p| p.kind), b.active().map(|p| p.kind));
        a.hard_drop();
        b.hard_drop();
    }
    assert_eq!(a.snapshot(), b.snapshot());
}
