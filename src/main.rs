//! Terminal runner (default binary).
//!
//! Polls crossterm for keys, feeds real elapsed time into the engine, and renders
//! every frame through the framebuffer renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use blockfall::config::{parse_args, USAGE};
use blockfall::engine::{GameEngine, GameEvent};
use blockfall::highscore::{HighScore, HighScoreStore, JsonFileHighScore};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::logging;
use blockfall::term::{FrameBuffer, GameView, Hud, TerminalRenderer, Viewport};
use blockfall::types::TICK_MS;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(config) = parse_args(&args)? else {
        println!("{}", USAGE);
        return Ok(());
    };

    let level = logging::init(&config.log_path)?;
    log::info!("blockfall starting (log level {})", level);

    let mut engine = GameEngine::new(config.engine.clone())?;
    let mut high_score = HighScore::load(JsonFileHighScore::new(&config.high_score_path));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut engine, &mut high_score);

    // Always try to restore terminal state.
    let _ = term.exit();

    // The high score is only saved when a game ends, not when the runner quits.
    log::info!("blockfall exiting");
    log::logger().flush();
    result
}

fn run<S: HighScoreStore>(
    term: &mut TerminalRenderer,
    engine: &mut GameEngine,
    high_score: &mut HighScore<S>,
) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let frame = Duration::from_millis(TICK_MS as u64);
    let mut last = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let hud = Hud {
            high_score: high_score.best(),
        };
        view.render_into(&engine.snapshot(), hud, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        if event::poll(frame.saturating_sub(last.elapsed()))? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        engine.apply_action(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Only whole milliseconds are consumed; the remainder carries to the next frame.
        let elapsed_ms = last.elapsed().as_millis().min(u32::MAX as u128) as u32;
        if elapsed_ms > 0 {
            engine.advance(elapsed_ms);
            last += Duration::from_millis(elapsed_ms as u64);
        }

        for event in engine.drain_events() {
            match event {
                GameEvent::GameOver { score } => {
                    if let Err(e) = high_score.record(score) {
                        log::warn!("saving high score failed: {:#}", e);
                    }
                }
                GameEvent::LinesCleared { count, points } => {
                    log::trace!("cleared {} rows (+{})", count, points);
                }
                _ => {}
            }
        }
    }
}
