//! blockfall: a falling-block puzzle game (workspace facade crate).
//!
//! The rules live in dedicated crates under `crates/` and are re-exported here. This
//! crate adds what the terminal runner needs around them: argument and config-file
//! loading, a file logger and high-score persistence.

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod config;
pub mod highscore;
pub mod logging;
