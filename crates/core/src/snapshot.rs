use crate::pieces::{Piece, Shape};
use blockfall_types::{PieceKind, Phase, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

impl ActiveSnapshot {
    /// Absolute board coordinates of every mino.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .minos()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

/// Read-only copy of everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSnapshot {
    /// Piece codes per cell, 0 = empty.
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    /// Rows marked for removal by an in-progress clear.
    pub pending_clear: [bool; BOARD_HEIGHT as usize],
    pub phase: Phase,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: f64,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.pending_clear = [false; BOARD_HEIGHT as usize];
        self.phase = Phase::Running;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.drop_interval_ms = 0.0;
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            pending_clear: [false; BOARD_HEIGHT as usize],
            phase: Phase::Running,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: 0.0,
        }
    }
}
