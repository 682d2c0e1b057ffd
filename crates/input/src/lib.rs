//! Terminal input (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Every press is one
//! command; key repeat comes from the terminal.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
