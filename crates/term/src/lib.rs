//! Terminal game renderer.
//!
//! A small, game-oriented rendering layer: [`GameView`] paints a snapshot into a
//! [`FrameBuffer`] of styled cells, and [`TerminalRenderer`] flushes framebuffers to
//! the terminal, diffing against the previous frame. No widget toolkit is involved.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, GameView, Hud, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
