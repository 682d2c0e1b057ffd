//! High-score persistence.
//!
//! One integer stored under the key `tetris-high-score`. The JSON file store keeps any
//! other keys it finds in the file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const HIGH_SCORE_KEY: &str = "tetris-high-score";

pub trait HighScoreStore {
    /// Stored best score; 0 when nothing has been saved yet.
    fn load(&self) -> Result<u32>;
    fn save(&mut self, score: u32) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryHighScore {
    value: u32,
}

impl MemoryHighScore {
    pub fn new(value: u32) -> Self {
        Self { value }
    }
}

impl HighScoreStore for MemoryHighScore {
    fn load(&self) -> Result<u32> {
        Ok(self.value)
    }

    fn save(&mut self, score: u32) -> Result<()> {
        self.value = score;
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HighScoreFile {
    #[serde(rename = "tetris-high-score", default)]
    high_score: u32,
    #[serde(flatten)]
    other: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileHighScore {
    path: PathBuf,
}

impl JsonFileHighScore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<HighScoreFile> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => serde_json::from_str(&text)
                .with_context(|| format!("parsing high score file {}", self.path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HighScoreFile::default()),
            Err(e) => Err(e)
                .with_context(|| format!("reading high score file {}", self.path.display())),
        }
    }
}

impl HighScoreStore for JsonFileHighScore {
    fn load(&self) -> Result<u32> {
        Ok(self.read()?.high_score)
    }

    fn save(&mut self, score: u32) -> Result<()> {
        // A corrupt file is replaced rather than blocking the save.
        let mut file = self.read().unwrap_or_default();
        file.high_score = score;
        let text = serde_json::to_string_pretty(&file)?;
        std::fs::write(&self.path, text)
            .with_context(|| format!("writing high score file {}", self.path.display()))
    }
}

/// Best score seen so far, persisted whenever a finished game beats it.
#[derive(Debug)]
pub struct HighScore<S: HighScoreStore> {
    store: S,
    best: u32,
}

impl<S: HighScoreStore> HighScore<S> {
    /// Load the stored value. An unreadable store starts from 0.
    pub fn load(store: S) -> Self {
        let best = store.load().unwrap_or_else(|e| {
            log::warn!("high score unavailable, starting from 0: {:#}", e);
            0
        });
        Self { store, best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Record a final score. Returns true if it is a new best.
    pub fn record(&mut self, score: u32) -> Result<bool> {
        if score <= self.best {
            return Ok(false);
        }
        self.best = score;
        log::info!("new high score {}", score);
        self.store.save(score)?;
        Ok(true)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
