/// All game entity types — pure data, no logic.

use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    /// Terminal: nothing moves, spawns or reacts to input after this.
    GameOver,
}

/// Logical keys recognised by the game.  Host key codes are mapped onto
/// these by the binary; anything else never reaches the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    MoveLeft,
    MoveRight,
    Fire,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Lime,
    Yellow,
    Red,
    White,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in surface coordinates (origin top-left, y down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Strict edge comparison: rectangles that only touch do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

// ── Player, projectiles & enemies ─────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    /// Fixed after initialisation.
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal velocity in surface units per frame.
    pub dx: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

macro_rules! impl_bounds {
    ($($ty:ty),*) => {
        $(impl $ty {
            pub fn bounds(&self) -> Rect {
                Rect { x: self.x, y: self.y, width: self.width, height: self.height }
            }
        })*
    };
}

impl_bounds!(Player, Projectile, Enemy);

/// Movement keys currently held down.  Tracked so that releasing one
/// direction while the other is still held keeps the ship moving.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    /// Draw order only; game logic ignores ordering.
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub held: HeldKeys,
    /// Never decreases.
    pub score: u32,
    pub status: GameStatus,
    /// Number of motion updates applied so far.
    pub frame: u64,
    pub config: GameConfig,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}
