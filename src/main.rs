//! Terminal runner (default binary).
//!
//! Wires the three collaborators around the core machine: key mapping in,
//! scene rendering out, and a re-armable tick clock driving gravity.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use blockfall::engine::{EngineConfig, Session, TickClock};
use blockfall::input::{map_key_press, map_key_release, should_quit};
use blockfall::term::{SceneView, TerminalRenderer, Viewport};
use blockfall::types::GameEvent;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let config = EngineConfig::from_env();
    info!("starting session ({:?} per tick)", config.base_tick);

    let mut session = Session::new(config.generator());
    let view = SceneView::default();
    let mut clock = TickClock::new(config.base_tick);

    loop {
        let scene = session.scene();
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&scene, Viewport::new(w, h));
        term.draw(&fb)?;

        // Input with timeout until the next tick is due. Once the game has
        // ended the clock stops advancing, so fall back to an idle poll.
        let timeout = if session.finished() {
            Duration::from_millis(250)
        } else {
            clock.remaining(Instant::now())
        };

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key.kind {
                    // Auto-repeat counts as key-down, same as in a browser.
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        if let Some(game_event) = map_key_press(key.code) {
                            session.apply(game_event);
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(game_event) = map_key_release(key.code) {
                            session.apply(game_event);
                        }
                    }
                }
            }
        }

        if clock.due(Instant::now()) && !session.finished() {
            session.apply(GameEvent::Tick);
            clock.advance();
        }

        // A fast-drop toggle re-arms the tick source at the new cadence.
        clock.rearm(session.fast_drop());
    }
}
