//! Game engine - commands, timers and events on top of `blockfall-core`
//!
//! [`GameEngine`] is the single owner of a game. Front-ends translate input into
//! commands, feed elapsed time through [`GameEngine::advance`], and drain
//! [`GameEvent`]s to update views, sounds and persistence.
//!
//! ```
//! use blockfall_engine::{EngineConfig, GameEngine};
//!
//! let mut engine = GameEngine::new(EngineConfig { seed: Some(7), ..Default::default() })?;
//! engine.move_left();
//! engine.hard_drop();
//! engine.advance(16);
//! for event in engine.drain_events() {
//!     println!("{}", event.name());
//! }
//! # Ok::<(), blockfall_engine::ConfigError>(())
//! ```

pub mod config;
pub mod engine;
pub mod events;
pub mod scheduler;

pub use config::{ConfigError, EngineConfig, RandomizerKind};
pub use engine::GameEngine;
pub use events::GameEvent;
pub use scheduler::{DropScheduler, StepTimer};
