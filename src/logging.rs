//! File logger for the terminal runner.
//!
//! The game owns the alternate screen, so log records go to a file. The level comes
//! from `BLOCKFALL_LOG` (`off`, `error`, `warn`, `info`, `debug`, `trace`), default `info`.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{LevelFilter, Log, Metadata, Record};

pub const LOG_LEVEL_ENV: &str = "BLOCKFALL_LOG";

struct FileLogger {
    file: Mutex<File>,
    started: Instant,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = self.started.elapsed();
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(
                file,
                "[{:>6}.{:03}] {:<5} {}: {}",
                elapsed.as_secs(),
                elapsed.subsec_millis(),
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Parse a level name; anything unrecognised falls back to `info`.
pub fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| LevelFilter::from_str(v.trim()).ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install the file logger. Returns the active level.
pub fn init(path: &Path) -> Result<LevelFilter> {
    let level = parse_level(std::env::var(LOG_LEVEL_ENV).ok().as_deref());
    if level == LevelFilter::Off {
        return Ok(level);
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let logger = Box::leak(Box::new(FileLogger {
        file: Mutex::new(file),
        started: Instant::now(),
    }));
    log::set_logger(logger).map_err(|e| anyhow::anyhow!("installing logger: {}", e))?;
    log::set_max_level(level);
    Ok(level)
}
