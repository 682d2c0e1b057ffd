//! Line-clear cascade state machine.
//!
//! After a piece lands the cascade alternates between scanning the board for full rows
//! and removing them, accumulating points across every pass. Nothing is committed to
//! the score until a scan comes back empty, so a chain of clears levels up at most once
//! and each pass is scored as its own clear event.
//!
//! ```text
//! Idle --begin--> Scanning --(no full rows)--> Idle            (Settled)
//!                     |
//!                     +--(full rows)--> Animating --remove--> Cascading --scan--> ...
//! ```
//!
//! The machine itself holds no timers. The engine schedules the hold between
//! `Animating` and the removal, and the settle delay between `Cascading` and the next
//! scan.

use crate::board::{Board, FullRows};
use crate::scoring::calculate_line_score;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CascadePhase {
    #[default]
    Idle,
    Scanning,
    /// Full rows are marked for the renderer but still on the board.
    Animating { rows: FullRows },
    /// Rows were removed; waiting to re-scan the shifted board.
    Cascading,
}

/// What a scan found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Full rows to highlight before removal.
    Pending(FullRows),
    /// Nothing left to clear; the accumulated totals are ready to commit.
    Settled(CascadeTotals),
}

/// Totals accumulated over a whole cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CascadeTotals {
    pub points: u32,
    pub lines: u32,
    pub passes: u32,
}

/// One removal pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearPass {
    pub rows: u32,
    pub points: u32,
}

#[derive(Debug, Clone, Default)]
pub struct LineClearCascade {
    phase: CascadePhase,
    totals: CascadeTotals,
}

impl LineClearCascade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &CascadePhase {
        &self.phase
    }

    /// True from landing until the cascade settles.
    pub fn is_active(&self) -> bool {
        !matches!(self.phase, CascadePhase::Idle)
    }

    /// Rows currently marked for removal (empty outside `Animating`).
    pub fn pending_rows(&self) -> &[u8] {
        match &self.phase {
            CascadePhase::Animating { rows } => rows.as_slice(),
            _ => &[],
        }
    }

    pub fn totals(&self) -> CascadeTotals {
        self.totals
    }

    /// Start a cascade for a freshly landed piece.
    pub fn begin(&mut self) {
        self.phase = CascadePhase::Scanning;
        self.totals = CascadeTotals::default();
    }

    /// Scan the board. Valid in `Scanning` and `Cascading`; in any other phase the
    /// current state is reported unchanged.
    pub fn scan(&mut self, board: &Board) -> ScanOutcome {
        match &self.phase {
            CascadePhase::Scanning | CascadePhase::Cascading => {}
            CascadePhase::Animating { rows } => return ScanOutcome::Pending(rows.clone()),
            CascadePhase::Idle => return ScanOutcome::Settled(self.totals),
        }

        let rows = board.full_rows();
        if rows.is_empty() {
            self.phase = CascadePhase::Idle;
            log::trace!(
                "cascade settled: passes={} lines={} points={}",
                self.totals.passes,
                self.totals.lines,
                self.totals.points
            );
            ScanOutcome::Settled(self.totals)
        } else {
            log::trace!("cascade found full rows {:?}", rows.as_slice());
            self.phase = CascadePhase::Animating { rows: rows.clone() };
            ScanOutcome::Pending(rows)
        }
    }

    /// Remove the marked rows and bank their points. Returns `None` outside `Animating`.
    pub fn remove(&mut self, board: &mut Board) -> Option<ClearPass> {
        let CascadePhase::Animating { rows } = &self.phase else {
            return None;
        };

        let removed = board.remove_rows(rows.as_slice()) as u32;
        let points = calculate_line_score(removed as usize);
        self.totals.points = self.totals.points.saturating_add(points);
        self.totals.lines = self.totals.lines.saturating_add(removed);
        self.totals.passes += 1;
        self.phase = CascadePhase::Cascading;

        Some(ClearPass {
            rows: removed,
            points,
        })
    }

    /// Abandon any in-flight cascade without committing.
    pub fn cancel(&mut self) {
        self.phase = CascadePhase::Idle;
        self.totals = CascadeTotals::default();
    }
}
