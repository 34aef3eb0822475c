/// Loop driver — sequences update → collide → render once per animation
/// frame and exposes the callbacks the host's timers and input source call.
///
/// The host owns scheduling: it keeps calling `on_animation_frame` while the
/// returned `Schedule` is `NextFrame`, and calls `on_spawn_timer` whenever
/// its `SpawnTimer` fires.

use std::time::{Duration, Instant};

use rand::Rng;
use tracing::info;

use crate::compute::{init_state, key_down, key_up, spawn_enemy, step};
use crate::config::GameConfig;
use crate::display::{render_frame, Surface};
use crate::entities::{GameState, GameStatus, Key};

/// What the host should do after an animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schedule {
    NextFrame,
    /// The game is over; do not request another frame.
    Halt,
}

pub struct GameLoop<R: Rng> {
    state: GameState,
    rng: R,
}

impl<R: Rng> GameLoop<R> {
    pub fn new(config: &GameConfig, rng: R) -> Self {
        Self::from_state(init_state(config), rng)
    }

    pub fn from_state(state: GameState, rng: R) -> Self {
        Self { state, rng }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn key_down(&mut self, key: Key) {
        self.state = key_down(&self.state, key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.state = key_up(&self.state, key);
    }

    /// Spawner callback.  The timer may still fire after the game ended, so
    /// the flag is checked here.  Returns whether an enemy was created.
    pub fn on_spawn_timer(&mut self) -> bool {
        if self.state.is_over() {
            return false;
        }
        self.state = spawn_enemy(&self.state, &mut self.rng);
        true
    }

    /// Animation callback: motion, collisions, then one rendered frame.
    ///
    /// The frame on which the player is hit is still drawn (with the
    /// game-over message); after that every call is a no-op.
    pub fn on_animation_frame<S: Surface>(&mut self, surface: &mut S) -> std::io::Result<Schedule> {
        if self.state.is_over() {
            return Ok(Schedule::Halt);
        }

        self.state = step(&self.state);
        render_frame(surface, &self.state)?;

        if self.state.is_over() {
            info!(
                score = self.state.score,
                frames = self.state.frame,
                "game loop halted"
            );
            Ok(Schedule::Halt)
        } else {
            Ok(Schedule::NextFrame)
        }
    }
}

// ── Spawn timer ───────────────────────────────────────────────────────────────

/// Fixed-rate wall-clock timer.  Like a browser interval it fires at most
/// once per poll; if the host stalled past several periods the missed
/// ticks are dropped rather than replayed in a burst.
#[derive(Clone, Debug)]
pub struct SpawnTimer {
    interval: Duration,
    next_due: Instant,
}

impl SpawnTimer {
    /// First tick is due one full interval after `now`.
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Returns true if the timer fired at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.interval;
        if self.next_due <= now {
            self.next_due = now + self.interval;
        }
        true
    }
}
