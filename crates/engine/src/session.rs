//! Session: the machine plus its command fulfillment.
//!
//! A session owns the game state machine, a piece generator, and an event
//! queue. External events are pushed onto the queue and drained one at a
//! time; `RequestPiece` commands emitted by a transition are answered by
//! appending a `PieceReady` event behind whatever is already queued. That
//! preserves the machine's contract: one event fully processed before the
//! next, fire-and-forget requests fulfilled as discrete follow-up events,
//! everything in arrival order.

use std::collections::VecDeque;
use std::mem;

use log::{debug, info, warn};

use blockfall_core::{Game, Scene};
use blockfall_types::{Command, GameEvent};

use crate::generator::PieceGenerator;

pub struct Session {
    game: Game,
    generator: PieceGenerator,
    queue: VecDeque<GameEvent>,
}

impl Session {
    /// Boot a machine and fulfill its two initial draws.
    pub fn new(generator: PieceGenerator) -> Self {
        let (game, commands) = Game::boot();
        let mut session = Self {
            game,
            generator,
            queue: VecDeque::new(),
        };
        session.fulfill(&commands);
        session.drain();
        session
    }

    /// Feed one external event, then process any follow-ups it triggered.
    pub fn apply(&mut self, event: GameEvent) {
        self.queue.push_back(event);
        self.drain();
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn scene(&self) -> Scene {
        self.game.scene()
    }

    pub fn fast_drop(&self) -> bool {
        self.game.fast_drop()
    }

    pub fn finished(&self) -> bool {
        self.game.is_terminal()
    }

    fn drain(&mut self) {
        while let Some(event) = self.queue.pop_front() {
            let was_terminal = self.game.is_terminal();
            // Park a placeholder while the real state threads through handle().
            let game = mem::replace(&mut self.game, Game::Uninitialized { first: None });
            let step = game.handle(event);

            if !was_terminal {
                match &step.game {
                    Game::GameOver { score } => info!("game over, final score {score}"),
                    Game::Fault { message } => warn!("machine fault: {message}"),
                    _ => {}
                }
            }

            self.game = step.game;
            self.fulfill(&step.commands);
        }
    }

    fn fulfill(&mut self, commands: &[Command]) {
        for command in commands {
            match command {
                Command::RequestPiece => {
                    let kind = self.generator.draw();
                    debug!("fulfilling piece request with {}", kind.as_str());
                    self.queue.push_back(GameEvent::PieceReady(kind));
                }
            }
        }
    }
}
