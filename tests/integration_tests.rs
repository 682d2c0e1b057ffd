//! Integration tests for the runner pieces around the engine

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};

use blockfall::config::{load_engine_config, parse_args};
use blockfall::core::{Board, SequenceSource};
use blockfall::engine::{EngineConfig, GameEngine, GameEvent, RandomizerKind};
use blockfall::highscore::{HighScore, HighScoreStore, JsonFileHighScore, HIGH_SCORE_KEY};
use blockfall::input::handle_key_event;
use blockfall::term::{GameView, Hud, Viewport};
use blockfall::types::{Phase, PieceKind};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("blockfall-{}-{}", std::process::id(), name))
}

fn press(engine: &mut GameEngine, code: KeyCode) -> bool {
    let action = handle_key_event(KeyEvent::from(code)).expect("bound key");
    engine.apply_action(action)
}

#[test]
fn test_keys_drive_the_engine() {
    let mut engine = GameEngine::with_source(
        EngineConfig::default(),
        Box::new(SequenceSource::new(vec![PieceKind::T, PieceKind::O])),
    )
    .unwrap();

    assert!(press(&mut engine, KeyCode::Left));
    assert!(press(&mut engine, KeyCode::Char('k')));
    assert!(press(&mut engine, KeyCode::Down));
    let piece = engine.active().unwrap();
    assert_eq!((piece.x, piece.y), (3, 1));
    assert_eq!(piece.shape.rows(), 3);

    assert!(press(&mut engine, KeyCode::Char(' ')));
    assert_eq!(engine.active().unwrap().kind, PieceKind::O);

    assert!(press(&mut engine, KeyCode::Char('p')));
    assert_eq!(engine.phase(), Phase::Paused);
    assert!(!press(&mut engine, KeyCode::Right));
    assert!(press(&mut engine, KeyCode::Char('p')));

    assert!(press(&mut engine, KeyCode::Char('r')));
    assert_eq!(engine.active().unwrap().kind, PieceKind::T);
    assert!(engine.board().cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_config_file_overrides_defaults() {
    let path = temp_path("config.json");
    std::fs::write(
        &path,
        r#"{ "initial_drop_ms": 800, "randomizer": "bag", "seed": 3 }"#,
    )
    .unwrap();

    let config = load_engine_config(&path).unwrap();
    assert_eq!(config.initial_drop_ms, 800);
    assert_eq!(config.randomizer, RandomizerKind::Bag);
    assert_eq!(config.line_clear_hold_ms, EngineConfig::default().line_clear_hold_ms);

    // Command-line seed wins over the file.
    let args: Vec<String> = vec![
        "--seed".into(),
        "11".into(),
        "--config".into(),
        path.display().to_string(),
    ];
    let run = parse_args(&args).unwrap().unwrap();
    assert_eq!(run.engine.seed, Some(11));
    assert_eq!(run.engine.initial_drop_ms, 800);

    let engine = GameEngine::new(run.engine).unwrap();
    assert_eq!(engine.drop_interval_ms(), 800.0);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_invalid_config_file_is_an_error() {
    let path = temp_path("bad-config.json");
    std::fs::write(&path, r#"{ "points_per_level": 0 }"#).unwrap();
    let err = load_engine_config(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("points_per_level"));

    std::fs::write(&path, "not json").unwrap();
    assert!(load_engine_config(&path).is_err());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_high_score_file_persists_best_game() {
    let path = temp_path("highscore.json");
    std::fs::write(&path, r#"{ "tetris-high-score": 700, "player": "anon" }"#).unwrap();

    let mut high = HighScore::load(JsonFileHighScore::new(&path));
    assert_eq!(high.best(), 700);
    assert!(!high.record(400).unwrap());
    assert!(high.record(1500).unwrap());

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved[HIGH_SCORE_KEY], 1500);
    assert_eq!(saved["player"], "anon");

    let reloaded = HighScore::load(JsonFileHighScore::new(&path));
    assert_eq!(reloaded.best(), 1500);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_corrupt_high_score_file_starts_from_zero() {
    let path = temp_path("corrupt-highscore.json");
    std::fs::write(&path, "{{{").unwrap();
    let store = JsonFileHighScore::new(&path);
    assert!(store.load().is_err());

    let mut high = HighScore::load(store);
    assert_eq!(high.best(), 0);
    assert!(high.record(100).unwrap());
    assert_eq!(high.store().load().unwrap(), 100);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_game_over_event_updates_high_score() {
    let path = temp_path("game-over-highscore.json");
    let _ = std::fs::remove_file(&path);
    let config = EngineConfig {
        line_clear_hold_ms: 0,
        cascade_settle_ms: 0,
        ..EngineConfig::default()
    };
    let mut board = Board::new();
    for x in 0..4 {
        board.set(x, 19, Some(PieceKind::T));
    }
    for x in 8..10 {
        board.set(x, 19, Some(PieceKind::T));
    }
    let mut engine = GameEngine::with_board(
        config,
        Box::new(SequenceSource::new(vec![PieceKind::I, PieceKind::O])),
        board,
    )
    .unwrap();
    let mut high = HighScore::load(JsonFileHighScore::new(&path));
    assert_eq!(high.best(), 0);

    // The I piece completes row 19 for a single clear.
    assert!(engine.hard_drop());
    engine.advance(0);
    assert_eq!(engine.score(), 100);

    while engine.phase() == Phase::Running {
        engine.hard_drop();
    }
    let mut game_over_score = None;
    for event in engine.drain_events() {
        if let GameEvent::GameOver { score } = event {
            game_over_score = Some(score);
            assert!(high.record(score).unwrap());
        }
    }
    assert_eq!(game_over_score, Some(100));
    assert_eq!(high.best(), 100);
    assert_eq!(JsonFileHighScore::new(&path).load().unwrap(), 100);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_engine_snapshot_renders() {
    let mut engine = GameEngine::with_source(
        EngineConfig::default(),
        Box::new(SequenceSource::new(vec![PieceKind::I])),
    )
    .unwrap();
    engine.hard_drop();

    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let fb = view.render(&engine.snapshot(), Hud { high_score: 42 }, viewport);

    let (x, y) = view.cell_origin(viewport, 4, 19);
    assert_eq!(fb.get(x, y).unwrap().ch, '█');
    let text: String = (0..fb.height()).map(|row| fb.row_text(row)).collect();
    assert!(text.contains("HIGH SCORE"));
    assert!(text.contains("42"));
}
