//! Shared types and constants for the falling-block engine.
//!
//! Everything here is plain data: board dimensions, the default timing and scoring
//! tables, the seven piece kinds, the command vocabulary and the game phase.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, row 0 on top)
//! - **Spawn anchor**: `(BOARD_WIDTH / 2 - 1, 0)` = `(4, 0)`
//!
//! # Default Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame step used by the terminal runner |
//! | `INITIAL_DROP_MS` | 560 | Drop interval at level 1 |
//! | `SPEED_FACTOR` | 0.92 | Interval multiplier per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Lower bound for the drop interval |
//! | `LINE_CLEAR_HOLD_MS` | 500 | Full rows stay highlighted before removal |
//! | `CASCADE_SETTLE_MS` | 50 | Pause between a removal and the next scan |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn anchor column: `floor(W / 2) - 1`
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 1;

/// Spawn anchor row
pub const SPAWN_Y: i8 = 0;

/// Frame step of the terminal runner in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Drop interval at level 1
pub const INITIAL_DROP_MS: u32 = 560;

/// Each level multiplies the drop interval by this factor
pub const SPEED_FACTOR: f64 = 0.92;

/// Lower bound for the drop interval; the exponential decay never goes below it
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Score needed per level: `level = score / POINTS_PER_LEVEL + 1`
pub const POINTS_PER_LEVEL: u32 = 500;

/// How long full rows stay marked before they are removed
pub const LINE_CLEAR_HOLD_MS: u32 = 500;

/// Delay between a removal pass and the next scan of the cascade
pub const CASCADE_SETTLE_MS: u32 = 50;

/// Points per clear pass, indexed by `min(rows, 4)`
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Tetromino piece kinds. The kind doubles as the color identifier of occupied cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All seven kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Compact non-zero code used by `u8` board grids (0 = empty).
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::J),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::T),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }
}

/// Cell on the board (None = empty, Some = occupied by that piece kind)
pub type Cell = Option<PieceKind>;

/// Engine commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    Pause,
    Reset,
    /// Issued by the drop scheduler; behaves like a soft drop.
    Tick,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "pause" => Some(GameAction::Pause),
            "reset" | "restart" => Some(GameAction::Reset),
            "tick" => Some(GameAction::Tick),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::Pause => "pause",
            GameAction::Reset => "reset",
            GameAction::Tick => "tick",
        }
    }
}

/// Top-level game phase. `GameOver` is terminal until a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Running,
    Paused,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::GameOver => "game_over",
        }
    }
}
