//! Scoring module - clear points, level and drop speed
//!
//! Scoring rules:
//! - Each clear pass awards `LINE_SCORES[min(rows, 4)]` = 0/100/300/500/800.
//! - `level = score / points_per_level + 1`, so the level is derived from score, not lines.
//! - The drop interval decays geometrically per level and is floored at a minimum.

use blockfall_types::{
    DROP_INTERVAL_MIN_MS, INITIAL_DROP_MS, LINE_SCORES, POINTS_PER_LEVEL, SPEED_FACTOR,
};

/// Points for a single clear pass removing `rows` rows.
pub fn calculate_line_score(rows: usize) -> u32 {
    LINE_SCORES[rows.min(4)]
}

/// Tunables for level and speed progression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressionParams {
    pub initial_drop_ms: u32,
    pub speed_factor: f64,
    pub points_per_level: u32,
    pub min_drop_interval_ms: u32,
}

impl Default for ProgressionParams {
    fn default() -> Self {
        Self {
            initial_drop_ms: INITIAL_DROP_MS,
            speed_factor: SPEED_FACTOR,
            points_per_level: POINTS_PER_LEVEL,
            min_drop_interval_ms: DROP_INTERVAL_MIN_MS,
        }
    }
}

impl ProgressionParams {
    /// `floor(score / points_per_level) + 1`
    pub fn level_for_score(&self, score: u32) -> u32 {
        score / self.points_per_level.max(1) + 1
    }

    /// `initial_drop_ms * speed_factor^(level - 1)`, exact (level 2 is 515.2ms) and never
    /// below `min_drop_interval_ms` (nor below 1).
    pub fn drop_interval_ms(&self, level: u32) -> f64 {
        let exponent = level.saturating_sub(1).min(i32::MAX as u32) as i32;
        let raw = self.initial_drop_ms as f64 * self.speed_factor.powi(exponent);
        let floor = self.min_drop_interval_ms.max(1) as f64;
        if raw.is_finite() && raw > floor {
            raw
        } else {
            floor
        }
    }
}

/// Result of committing a cascade's accumulated score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommitResult {
    pub points: u32,
    pub score: u32,
    pub lines: u32,
    /// `Some(new_level)` when the commit crossed a level boundary.
    pub level_up: Option<u32>,
    pub drop_interval_ms: f64,
}

/// Score, lines, level and the derived drop interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progression {
    params: ProgressionParams,
    score: u32,
    lines: u32,
    level: u32,
    drop_interval_ms: f64,
}

impl Progression {
    pub fn new(params: ProgressionParams) -> Self {
        Self {
            params,
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: params.drop_interval_ms(1),
        }
    }

    pub fn params(&self) -> &ProgressionParams {
        &self.params
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn drop_interval_ms(&self) -> f64 {
        self.drop_interval_ms
    }

    /// Add a cascade's points and rows in one step and re-derive level and interval.
    pub fn commit(&mut self, points: u32, lines: u32) -> CommitResult {
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(lines);

        let level = self.params.level_for_score(self.score);
        let level_up = if level > self.level {
            self.level = level;
            self.drop_interval_ms = self.params.drop_interval_ms(level);
            Some(level)
        } else {
            None
        };

        CommitResult {
            points,
            score: self.score,
            lines: self.lines,
            level_up,
            drop_interval_ms: self.drop_interval_ms,
        }
    }

    /// Back to score 0, level 1.
    pub fn reset(&mut self) {
        *self = Self::new(self.params);
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new(ProgressionParams::default())
    }
}
