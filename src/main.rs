//! Terminal Blocktris runner (default binary).
//!
//! Keyboard in through crossterm, frames out through the framebuffer renderer.
//! Gravity runs on a fixed interval; pause stops it, restart swaps in a fresh
//! engine built from the same environment config.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blocktris::core::{apply_action, tick, EngineConfig, GameEngine, GameSnapshot};
use blocktris::input::{handle_key_event, should_pause, should_quit, should_restart};
use blocktris::term::{FrameBuffer, GameView, Overlay, TerminalRenderer, Viewport};
use blocktris::types::{GRAVITY_MS, TICK_MS};

fn main() -> Result<()> {
    let config = EngineConfig::from_env();
    // Reject bad dimensions before touching the terminal.
    let engine = config.new_engine()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, engine);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: &EngineConfig, mut engine: GameEngine) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let frame = Duration::from_millis(TICK_MS as u64);
    let gravity = Duration::from_millis(GRAVITY_MS as u64);
    let mut last_frame = Instant::now();
    let mut last_gravity = Instant::now();

    let mut paused = false;
    let mut game_over = false;
    let mut dirty = true;

    loop {
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            engine.snapshot_into(&mut snap, game_over);
            view.render_into(&snap, Overlay { paused }, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if should_restart(key) {
                        engine = config.new_engine()?;
                        game_over = false;
                        paused = false;
                        last_gravity = Instant::now();
                        dirty = true;
                    } else if should_pause(key) && !game_over {
                        paused = !paused;
                        last_gravity = Instant::now();
                        dirty = true;
                    } else if let Some(action) = handle_key_event(key) {
                        if !paused && !game_over {
                            let outcome = apply_action(&mut engine, action);
                            game_over = outcome.game_over;
                            dirty |= outcome.applied || outcome.locked;
                        }
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        if last_frame.elapsed() >= frame {
            last_frame = Instant::now();

            if !paused && !game_over && last_gravity.elapsed() >= gravity {
                last_gravity = Instant::now();
                game_over = tick(&mut engine).game_over;
                dirty = true;
            }
        }
    }
}
