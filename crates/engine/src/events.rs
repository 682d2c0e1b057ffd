//! Notifications emitted by the engine for renderers, audio and persistence.
//!
//! Events are buffered inside the engine and drained by the caller after each command
//! or `advance` call.

use blockfall_core::{Board, FullRows, Piece};

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The locked grid changed (merge, row removal, reset).
    BoardChanged(Board),
    /// The active piece moved, rotated, spawned, or was consumed (`None`).
    PieceChanged(Option<Piece>),
    /// Full rows found; they stay on the board until the hold delay elapses.
    LinesPendingClear(FullRows),
    /// One removal pass of a cascade.
    LinesCleared { count: u32, points: u32 },
    ScoreChanged { score: u32, lines: u32 },
    LevelChanged { level: u32, drop_interval_ms: f64 },
    GameOver { score: u32 },
    Paused(bool),
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::BoardChanged(_) => "board_changed",
            GameEvent::PieceChanged(_) => "piece_changed",
            GameEvent::LinesPendingClear(_) => "lines_pending_clear",
            GameEvent::LinesCleared { .. } => "lines_cleared",
            GameEvent::ScoreChanged { .. } => "score_changed",
            GameEvent::LevelChanged { .. } => "level_changed",
            GameEvent::GameOver { .. } => "game_over",
            GameEvent::Paused(_) => "paused",
        }
    }
}
