use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::filter::EnvFilter;

use block_shooter::config::GameConfig;
use block_shooter::display::TerminalSurface;
use block_shooter::driver::{GameLoop, Schedule, SpawnTimer};
use block_shooter::entities::Key;

/// On terminals that never report key releases, a movement key counts as
/// held while press/repeat events keep arriving within this window.  It has
/// to outlast the OS delay before auto-repeat starts (typically 250–500 ms).
const HOLD_WINDOW: Duration = Duration::from_millis(600);

#[derive(Parser, Debug)]
#[command(name = "block_shooter")]
#[command(about = "Dodge the falling blocks and shoot them down")]
struct Args {
    /// JSON file overriding any of the game constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for enemy placement (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Write tracing output to this file (filter with RUST_LOG, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Animation frame rate, overriding the config's frame interval
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: Option<u32>,
}

// ── Input mapping ─────────────────────────────────────────────────────────────

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::MoveRight),
        KeyCode::Char(' ') => Some(Key::Fire),
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  The animation frame stops being scheduled
/// once the game is over, but the final frame stays on screen and input is
/// still drained so Q / Esc can exit.
///
/// Input model: the terminal delivers press / repeat / release events.
/// Keyboard-enhancement capable terminals (kitty protocol) report real
/// releases.  On classic terminals releases never arrive, so a movement key
/// is released synthetically once it has been silent for `HOLD_WINDOW`.
fn game_loop<W: Write>(
    surface: &mut TerminalSurface<W>,
    game: &mut GameLoop<StdRng>,
    config: &GameConfig,
    rx: &mpsc::Receiver<Event>,
    keyboard_enhanced: bool,
) -> std::io::Result<()> {
    let frame = Duration::from_millis(config.frame_interval_ms);
    let mut spawner = SpawnTimer::new(Duration::from_millis(config.spawn_interval_ms), Instant::now());
    // Movement key → when its last press/repeat arrived.
    let mut held: HashMap<Key, Instant> = HashMap::new();
    let mut schedule = Schedule::NextFrame;

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => {
                    if kind != KeyEventKind::Release && is_quit(code, modifiers) {
                        return Ok(());
                    }
                    let Some(key) = map_key(code) else { continue };
                    match kind {
                        KeyEventKind::Press | KeyEventKind::Repeat => {
                            if key != Key::Fire {
                                held.insert(key, frame_start);
                            }
                            game.key_down(key);
                        }
                        KeyEventKind::Release => {
                            held.remove(&key);
                            game.key_up(key);
                        }
                    }
                }
                Event::Resize(cols, rows) => surface.resize(cols, rows),
                _ => {}
            }
        }

        // ── Synthesize releases for silent keys (classic terminals) ───────────
        if !keyboard_enhanced {
            let expired: Vec<Key> = held
                .iter()
                .filter(|&(_, &seen)| frame_start.duration_since(seen) > HOLD_WINDOW)
                .map(|(&key, _)| key)
                .collect();
            for key in expired {
                held.remove(&key);
                game.key_up(key);
            }
        }

        // The spawner runs independently of the animation frame and relies
        // on the game-over check inside `on_spawn_timer`.
        if spawner.poll(frame_start) {
            game.on_spawn_timer();
        }

        if schedule == Schedule::NextFrame {
            schedule = game.on_animation_frame(surface)?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Stdout belongs to the renderer, so tracing only goes to a file.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file: {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config: {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(fps) = args.fps {
        config.frame_interval_ms = (1000 / u64::from(fps)).max(1);
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;
    let config = load_config(&args)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, ?config, "starting");
    let mut game = GameLoop::new(&config, StdRng::seed_from_u64(seed));

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = terminal::size().and_then(|(cols, rows)| {
        let mut surface = TerminalSurface::new(
            &mut out,
            cols,
            rows,
            config.surface_width,
            config.surface_height,
        );
        game_loop(&mut surface, &mut game, &config, &rx, keyboard_enhanced)
    });

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let state = game.state();
    info!(score = state.score, frames = state.frame, "exiting");
    println!("Final score: {}", state.score);

    result.context("game loop failed")
}
