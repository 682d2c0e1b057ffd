//! Game engine - owns the board, active piece, progression, cascade and timers
//!
//! Commands are synchronous and return whether they changed state; rule violations
//! (blocked move, rejected rotation, wrong phase) simply return `false`. Time enters
//! only through [`GameEngine::advance`], which drives the drop scheduler and the
//! cascade step timer in chronological order.

use blockfall_core::{
    try_rotate, Board, CascadeTotals, GameSnapshot, LineClearCascade, Piece, PieceSource,
    Progression, ScanOutcome,
};
use blockfall_types::{GameAction, Phase, BOARD_HEIGHT};

use crate::config::{ConfigError, EngineConfig};
use crate::events::GameEvent;
use crate::scheduler::{DropScheduler, StepTimer};

pub struct GameEngine {
    config: EngineConfig,
    board: Board,
    active: Option<Piece>,
    source: Box<dyn PieceSource>,
    progression: Progression,
    cascade: LineClearCascade,
    phase: Phase,
    drop_timer: DropScheduler,
    step_timer: StepTimer,
    events: Vec<GameEvent>,
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("phase", &self.phase)
            .field("active", &self.active)
            .field("progression", &self.progression)
            .field("cascade", &self.cascade)
            .field("drop_timer", &self.drop_timer)
            .field("step_timer", &self.step_timer)
            .finish_non_exhaustive()
    }
}

impl GameEngine {
    /// Create a running game with the piece source named by `config`.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let source = config.piece_source();
        Self::with_source(config, source)
    }

    /// Create a running game drawing pieces from `source`.
    pub fn with_source(
        config: EngineConfig,
        source: Box<dyn PieceSource>,
    ) -> Result<Self, ConfigError> {
        Self::with_board(config, source, Board::new())
    }

    /// Start from a prepared board. The first spawn may end the game immediately.
    pub fn with_board(
        config: EngineConfig,
        source: Box<dyn PieceSource>,
        board: Board,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut engine = Self {
            progression: Progression::new(config.progression()),
            config,
            board,
            active: None,
            source,
            cascade: LineClearCascade::new(),
            phase: Phase::Running,
            drop_timer: DropScheduler::new(),
            step_timer: StepTimer::new(),
            events: Vec::with_capacity(16),
        };
        engine.spawn_piece();
        Ok(engine)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.progression.score()
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    pub fn lines(&self) -> u32 {
        self.progression.lines()
    }

    pub fn drop_interval_ms(&self) -> f64 {
        self.progression.drop_interval_ms()
    }

    /// Rows highlighted by an in-progress clear.
    pub fn pending_clear_rows(&self) -> &[u8] {
        self.cascade.pending_rows()
    }

    /// True between a landing and the next spawn.
    pub fn is_clearing(&self) -> bool {
        self.cascade.is_active()
    }

    /// Take every event emitted since the last drain.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.map(Into::into);
        out.pending_clear = [false; BOARD_HEIGHT as usize];
        for &row in self.cascade.pending_rows() {
            if let Some(slot) = out.pending_clear.get_mut(row as usize) {
                *slot = true;
            }
        }
        out.phase = self.phase;
        out.score = self.progression.score();
        out.level = self.progression.level();
        out.lines = self.progression.lines();
        out.drop_interval_ms = self.progression.drop_interval_ms();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Dispatch a command.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.rotate_clockwise(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Reset => self.reset(),
            GameAction::Tick => self.tick(),
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Move down one row, or land the piece if it is resting on something.
    pub fn soft_drop(&mut self) -> bool {
        let Some(piece) = self.playable_piece() else {
            return false;
        };
        if self.try_move(0, 1) {
            return true;
        }
        log::debug!("{:?} landed at ({}, {})", piece.kind, piece.x, piece.y);
        self.place_piece();
        true
    }

    /// Scheduler tick: identical to a soft drop.
    pub fn tick(&mut self) -> bool {
        log::trace!("drop tick");
        self.soft_drop()
    }

    /// Drop straight down and place immediately.
    pub fn hard_drop(&mut self) -> bool {
        let Some(mut piece) = self.playable_piece() else {
            return false;
        };
        while !self.board.collides(piece.x, piece.y + 1, &piece.shape) {
            piece.y += 1;
        }
        log::debug!("{:?} hard dropped to ({}, {})", piece.kind, piece.x, piece.y);
        self.set_active(Some(piece));
        self.place_piece();
        true
    }

    /// Rotate clockwise, trying offsets (0,0), (-1,0), (+1,0), (0,-1) in that order.
    pub fn rotate_clockwise(&mut self) -> bool {
        let Some(piece) = self.playable_piece() else {
            return false;
        };
        let board = &self.board;
        let Some((shape, (dx, dy))) =
            try_rotate(&piece.shape, piece.x, piece.y, |x, y, s| board.collides(x, y, s))
        else {
            return false;
        };
        self.set_active(Some(Piece {
            shape,
            x: piece.x + dx,
            y: piece.y + dy,
            ..piece
        }));
        true
    }

    /// Running <-> Paused. Ignored after game over.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::GameOver => false,
            Phase::Running => {
                self.phase = Phase::Paused;
                self.drop_timer.stop();
                log::debug!("paused");
                self.events.push(GameEvent::Paused(true));
                true
            }
            Phase::Paused => {
                self.phase = Phase::Running;
                if self.active.is_some() {
                    self.drop_timer.start(self.progression.drop_interval_ms());
                }
                log::debug!("resumed");
                self.events.push(GameEvent::Paused(false));
                true
            }
        }
    }

    /// Clear everything, cancel every timer and start a new game.
    pub fn reset(&mut self) -> bool {
        log::info!("reset (score was {})", self.progression.score());
        self.drop_timer.stop();
        self.step_timer.cancel();
        self.cascade.cancel();
        self.board.clear();
        self.active = None;
        self.progression.reset();
        self.source.reset();
        let was_paused = self.phase == Phase::Paused;
        self.phase = Phase::Running;
        if was_paused {
            self.events.push(GameEvent::Paused(false));
        }

        self.events.push(GameEvent::BoardChanged(self.board));
        self.events.push(GameEvent::ScoreChanged {
            score: 0,
            lines: 0,
        });
        self.events.push(GameEvent::LevelChanged {
            level: self.progression.level(),
            drop_interval_ms: self.progression.drop_interval_ms(),
        });
        self.spawn_piece();
        true
    }

    /// Feed wall-clock time into the timers, firing due steps and ticks in order.
    ///
    /// Nothing advances outside `Running`; the cascade step keeps its remaining delay
    /// across a pause. Returns true if any step or tick changed state.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        let mut left = elapsed_ms;
        let mut changed = false;

        while self.phase == Phase::Running {
            let next = [self.step_timer.until_next(), self.drop_timer.until_next()]
                .into_iter()
                .flatten()
                .min();
            let Some(next) = next else {
                break;
            };
            if next > left {
                self.step_timer.elapse(left);
                self.drop_timer.elapse(left);
                break;
            }

            left -= next;
            let step_due = self.step_timer.elapse(next);
            let drop_due = self.drop_timer.elapse(next);
            if step_due {
                self.step_cascade();
                changed = true;
            }
            if drop_due {
                changed |= self.tick();
            }
        }

        changed
    }

    /// The active piece, only while moves are allowed.
    fn playable_piece(&self) -> Option<Piece> {
        if self.phase != Phase::Running {
            return None;
        }
        self.active
    }

    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(piece) = self.playable_piece() else {
            return false;
        };
        if self.board.collides(piece.x + dx, piece.y + dy, &piece.shape) {
            return false;
        }
        self.set_active(Some(Piece {
            x: piece.x + dx,
            y: piece.y + dy,
            ..piece
        }));
        true
    }

    fn set_active(&mut self, piece: Option<Piece>) {
        if self.active != piece {
            self.active = piece;
            self.events.push(GameEvent::PieceChanged(piece));
        }
    }

    /// Spawn at the top center; a collision there ends the game.
    fn spawn_piece(&mut self) -> bool {
        let kind = self.source.next_kind();
        let piece = Piece::spawn(kind);
        if self.board.collides(piece.x, piece.y, &piece.shape) {
            log::debug!("spawn of {:?} blocked", kind);
            self.enter_game_over();
            return false;
        }
        log::debug!("spawned {:?}", kind);
        self.set_active(Some(piece));
        self.drop_timer.restart(self.progression.drop_interval_ms());
        true
    }

    fn enter_game_over(&mut self) {
        self.phase = Phase::GameOver;
        self.drop_timer.stop();
        self.step_timer.cancel();
        self.cascade.cancel();
        self.set_active(None);
        log::info!(
            "game over: score={} level={} lines={}",
            self.progression.score(),
            self.progression.level(),
            self.progression.lines()
        );
        self.events.push(GameEvent::GameOver {
            score: self.progression.score(),
        });
    }

    /// Merge the active piece and start the clear cascade.
    fn place_piece(&mut self) {
        let Some(piece) = self.active else {
            return;
        };
        self.board.merge(&piece);
        self.set_active(None);
        self.drop_timer.stop();
        self.events.push(GameEvent::BoardChanged(self.board));

        self.cascade.begin();
        self.scan_cascade();
    }

    fn scan_cascade(&mut self) {
        match self.cascade.scan(&self.board) {
            ScanOutcome::Pending(rows) => {
                log::debug!("rows pending clear: {:?}", rows.as_slice());
                self.events.push(GameEvent::LinesPendingClear(rows));
                self.step_timer.schedule(self.config.line_clear_hold_ms);
            }
            ScanOutcome::Settled(totals) => {
                self.commit(totals);
                self.spawn_piece();
            }
        }
    }

    /// Advance the cascade when its step timer fires.
    fn step_cascade(&mut self) {
        if let Some(pass) = self.cascade.remove(&mut self.board) {
            log::debug!("cleared {} rows for {} points", pass.rows, pass.points);
            self.events.push(GameEvent::BoardChanged(self.board));
            self.events.push(GameEvent::LinesCleared {
                count: pass.rows,
                points: pass.points,
            });
            self.step_timer.schedule(self.config.cascade_settle_ms);
        } else if self.cascade.is_active() {
            self.scan_cascade();
        }
    }

    fn commit(&mut self, totals: CascadeTotals) {
        if totals.passes == 0 {
            return;
        }
        let result = self.progression.commit(totals.points, totals.lines);
        self.events.push(GameEvent::ScoreChanged {
            score: result.score,
            lines: result.lines,
        });
        if let Some(level) = result.level_up {
            log::info!(
                "level {} reached, drop interval {}ms",
                level,
                result.drop_interval_ms
            );
            self.events.push(GameEvent::LevelChanged {
                level,
                drop_interval_ms: result.drop_interval_ms,
            });
        }
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}
