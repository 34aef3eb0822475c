/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG and tracing.
/// Once the state is `GameOver` every transition returns an unchanged copy.

use rand::Rng;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::entities::{Enemy, GameState, GameStatus, HeldKeys, Key, Player, Projectile};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial state: player centred horizontally, resting on the
/// bottom edge of the surface.
pub fn init_state(config: &GameConfig) -> GameState {
    GameState {
        player: Player {
            x: config.surface_width / 2.0 - config.player_width / 2.0,
            y: config.surface_height - config.player_height,
            width: config.player_width,
            height: config.player_height,
            dx: 0.0,
        },
        projectiles: Vec::new(),
        enemies: Vec::new(),
        held: HeldKeys::default(),
        score: 0,
        status: GameStatus::Running,
        frame: 0,
        config: *config,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// The latest pressed direction wins; `Fire` launches one projectile.
pub fn key_down(state: &GameState, key: Key) -> GameState {
    if state.is_over() {
        return state.clone();
    }
    let speed = state.config.player_speed;
    match key {
        Key::MoveLeft => GameState {
            player: Player { dx: -speed, ..state.player.clone() },
            held: HeldKeys { left: true, ..state.held },
            ..state.clone()
        },
        Key::MoveRight => GameState {
            player: Player { dx: speed, ..state.player.clone() },
            held: HeldKeys { right: true, ..state.held },
            ..state.clone()
        },
        Key::Fire => fire(state),
    }
}

/// Releasing a direction falls back to the opposite one if it is still held,
/// otherwise the player stops.
pub fn key_up(state: &GameState, key: Key) -> GameState {
    if state.is_over() {
        return state.clone();
    }
    let held = match key {
        Key::MoveLeft => HeldKeys { left: false, ..state.held },
        Key::MoveRight => HeldKeys { right: false, ..state.held },
        Key::Fire => return state.clone(),
    };
    let speed = state.config.player_speed;
    let dx = match (held.left, held.right) {
        (true, false) => -speed,
        (false, true) => speed,
        // Both still held: keep whatever direction was pressed last.
        (true, true) => state.player.dx,
        (false, false) => 0.0,
    };
    GameState {
        player: Player { dx, ..state.player.clone() },
        held,
        ..state.clone()
    }
}

/// Launch a projectile from the player's horizontal centre, top edge.
pub fn fire(state: &GameState) -> GameState {
    if state.is_over() {
        return state.clone();
    }
    let cfg = &state.config;
    let p = &state.player;
    let projectile = Projectile {
        x: p.x + p.width / 2.0 - cfg.projectile_width / 2.0,
        y: p.y,
        width: cfg.projectile_width,
        height: cfg.projectile_height,
    };
    let mut projectiles = state.projectiles.clone();
    projectiles.push(projectile);
    GameState {
        projectiles,
        ..state.clone()
    }
}

// ── Spawner ──────────────────────────────────────────────────────────────────

/// Drop one enemy at a uniformly random column on the top edge.
/// All randomness comes through `rng` so callers control determinism.
pub fn spawn_enemy(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.is_over() {
        return state.clone();
    }
    let cfg = &state.config;
    let max_x = (cfg.surface_width - cfg.enemy_width).max(0.0);
    let x = rng.gen_range(0.0..=max_x);
    debug!(x, frame = state.frame, "enemy spawned");

    let mut enemies = state.enemies.clone();
    enemies.push(Enemy {
        x,
        y: 0.0,
        width: cfg.enemy_width,
        height: cfg.enemy_height,
    });
    GameState {
        enemies,
        ..state.clone()
    }
}

// ── Per-frame update ─────────────────────────────────────────────────────────

/// Advance every entity by one frame and discard whatever left the surface.
///
/// Collections are rebuilt through a filter pass, so two neighbouring
/// entities leaving on the same frame are both dropped.
pub fn update_motion(state: &GameState) -> GameState {
    if state.is_over() {
        return state.clone();
    }
    let cfg = &state.config;

    // ── 1. Player, clamped to the surface ────────────────────────────────────
    let max_x = (cfg.surface_width - state.player.width).max(0.0);
    let player = Player {
        x: (state.player.x + state.player.dx).clamp(0.0, max_x),
        ..state.player.clone()
    };

    // ── 2. Projectiles rise; gone once above the top edge ────────────────────
    let projectiles: Vec<Projectile> = state
        .projectiles
        .iter()
        .map(|p| Projectile { y: p.y - cfg.projectile_speed, ..p.clone() })
        .filter(|p| p.y >= 0.0)
        .collect();

    // ── 3. Enemies fall; gone once past the bottom edge ──────────────────────
    let enemies: Vec<Enemy> = state
        .enemies
        .iter()
        .map(|e| Enemy { y: e.y + cfg.enemy_speed, ..e.clone() })
        .filter(|e| e.y <= cfg.surface_height)
        .collect();

    GameState {
        player,
        projectiles,
        enemies,
        frame: state.frame + 1,
        ..state.clone()
    }
}

/// Resolve projectile ↔ enemy hits, then test the survivors against the
/// player.
///
/// Each projectile is consumed by the first enemy (in collection order) it
/// overlaps, and an enemy can only be destroyed once per frame.  Any
/// remaining enemy overlapping the player ends the game.
pub fn resolve_collisions(state: &GameState) -> GameState {
    if state.is_over() {
        return state.clone();
    }

    // ── 1. Projectiles ↔ enemies (mark, then compact) ────────────────────────
    let mut spent = vec![false; state.projectiles.len()];
    let mut destroyed = vec![false; state.enemies.len()];

    for (pi, projectile) in state.projectiles.iter().enumerate() {
        let bounds = projectile.bounds();
        let target = (0..state.enemies.len())
            .find(|&ei| !destroyed[ei] && bounds.overlaps(&state.enemies[ei].bounds()));
        if let Some(ei) = target {
            spent[pi] = true;
            destroyed[ei] = true;
        }
    }

    let hits = destroyed.iter().filter(|&&d| d).count() as u32;
    let score = state
        .score
        .saturating_add(hits.saturating_mul(state.config.score_per_hit));
    if hits > 0 {
        debug!(hits, score, frame = state.frame, "enemies destroyed");
    }

    let projectiles: Vec<Projectile> = state
        .projectiles
        .iter()
        .zip(&spent)
        .filter(|&(_, &s)| !s)
        .map(|(p, _)| p.clone())
        .collect();
    let enemies: Vec<Enemy> = state
        .enemies
        .iter()
        .zip(&destroyed)
        .filter(|&(_, &d)| !d)
        .map(|(e, _)| e.clone())
        .collect();

    // ── 2. Enemies ↔ player ──────────────────────────────────────────────────
    let player_bounds = state.player.bounds();
    let status = if enemies.iter().any(|e| e.bounds().overlaps(&player_bounds)) {
        info!(score, frame = state.frame, "player hit, game over");
        GameStatus::GameOver
    } else {
        GameStatus::Running
    };

    GameState {
        projectiles,
        enemies,
        score,
        status,
        ..state.clone()
    }
}

/// One simulation step: motion, then collisions.
pub fn step(state: &GameState) -> GameState {
    resolve_collisions(&update_motion(state))
}
