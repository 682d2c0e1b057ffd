//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-block game: the playfield, the piece
//! catalog and rotation, piece sources, scoring and progression, and the line-clear
//! cascade. It has **no dependencies** on UI, timers, or I/O:
//!
//! - **Deterministic**: seeded piece sources produce identical games
//! - **Headless**: everything runs without a display
//! - **Allocation-free hot paths**: the board is a flat array, full-row sets are `ArrayVec`s
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision, merge, full-row detection and row removal
//! - [`pieces`]: tetromino shapes, clockwise rotation with four fixed kick offsets, [`Piece`]
//! - [`rng`]: uniform (default), 7-bag and scripted piece sources
//! - [`scoring`]: per-pass points, score-derived level, geometric drop interval
//! - [`cascade`]: scan / animate / remove / re-scan state machine for chained clears
//! - [`snapshot`]: copyable frame data for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Board, Piece};
//! use blockfall_types::PieceKind;
//!
//! let mut board = Board::new();
//! let mut piece = Piece::spawn(PieceKind::I);
//! while !board.collides(piece.x, piece.y + 1, &piece.shape) {
//!     piece.y += 1;
//! }
//! board.merge(&piece);
//! assert!(board.is_occupied(4, 19));
//! ```

pub mod board;
pub mod cascade;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, FullRows};
pub use cascade::{CascadePhase, CascadeTotals, ClearPass, LineClearCascade, ScanOutcome};
pub use pieces::{get_shape, try_rotate, Piece, Shape};
pub use rng::{BagRandomizer, PieceSource, SequenceSource, UniformRandomizer};
pub use scoring::{calculate_line_score, CommitResult, Progression, ProgressionParams};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
