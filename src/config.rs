//! Command-line and config-file loading for the terminal runner.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::engine::{EngineConfig, RandomizerKind};

pub const DEFAULT_HIGH_SCORE_PATH: &str = "blockfall-highscore.json";
pub const DEFAULT_LOG_PATH: &str = "blockfall.log";

pub const USAGE: &str = "\
usage: blockfall [--config <file.json>] [--seed <n>] [--randomizer uniform|bag]
                 [--high-score <file.json>] [--log <file>]";

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub engine: EngineConfig,
    pub high_score_path: PathBuf,
    pub log_path: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            high_score_path: PathBuf::from(DEFAULT_HIGH_SCORE_PATH),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
        }
    }
}

/// Parse runner arguments (without the program name).
///
/// Returns `Ok(None)` for `--help`. `--seed` and `--randomizer` override values read
/// from `--config` regardless of argument order.
pub fn parse_args(args: &[String]) -> Result<Option<RunConfig>> {
    let mut config = RunConfig::default();
    let mut config_path: Option<PathBuf> = None;
    let mut seed: Option<u64> = None;
    let mut randomizer: Option<RandomizerKind> = None;

    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        if matches!(flag, "-h" | "--help") {
            return Ok(None);
        }
        i += 1;
        let value = args
            .get(i)
            .ok_or_else(|| anyhow!("missing value for {}", flag))?;
        match flag {
            "--config" => config_path = Some(PathBuf::from(value)),
            "--seed" => {
                seed = Some(
                    value
                        .parse::<u64>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", value))?,
                );
            }
            "--randomizer" => {
                randomizer = Some(match value.as_str() {
                    "uniform" => RandomizerKind::Uniform,
                    "bag" => RandomizerKind::Bag,
                    other => return Err(anyhow!("invalid --randomizer value: {}", other)),
                });
            }
            "--high-score" => config.high_score_path = PathBuf::from(value),
            "--log" => config.log_path = PathBuf::from(value),
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }

    if let Some(path) = config_path {
        config.engine = load_engine_config(&path)?;
    }
    if seed.is_some() {
        config.engine.seed = seed;
    }
    if let Some(kind) = randomizer {
        config.engine.randomizer = kind;
    }
    config.engine.validate()?;
    Ok(Some(config))
}

/// Read and validate an engine config file. Missing fields keep their defaults.
pub fn load_engine_config(path: &Path) -> Result<EngineConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: EngineConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}
