/// Rendering layer.
///
/// `render_frame` translates game state into drawing calls on a `Surface`;
/// no game logic is performed here.  `TerminalSurface` is the crossterm
/// backend used by the binary: it scales the logical surface (800×600 by
/// default) onto whatever cell grid the terminal offers.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Print},
    terminal,
    QueueableCommand,
};

use crate::entities::{Color, GameState, Rect};

pub const C_PLAYER: Color = Color::Lime;
pub const C_PROJECTILE: Color = Color::Yellow;
pub const C_ENEMY: Color = Color::Red;
pub const C_SCORE: Color = Color::White;
pub const C_GAME_OVER: Color = Color::Red;

pub const SCORE_FONT_SIZE: u16 = 20;
pub const GAME_OVER_FONT_SIZE: u16 = 30;

/// A fixed-size 2D drawing target.
pub trait Surface {
    fn clear(&mut self) -> std::io::Result<()>;
    fn fill_rect(&mut self, rect: Rect, color: Color) -> std::io::Result<()>;
    /// `(x, y)` is the left end of the text baseline.
    fn fill_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font_size: u16,
        color: Color,
    ) -> std::io::Result<()>;
    /// Make everything drawn since `clear` visible.
    fn present(&mut self) -> std::io::Result<()>;
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render_frame<S: Surface>(surface: &mut S, state: &GameState) -> std::io::Result<()> {
    surface.clear()?;

    surface.fill_rect(state.player.bounds(), C_PLAYER)?;
    for projectile in &state.projectiles {
        surface.fill_rect(projectile.bounds(), C_PROJECTILE)?;
    }
    for enemy in &state.enemies {
        surface.fill_rect(enemy.bounds(), C_ENEMY)?;
    }

    surface.fill_text(
        &format!("Score: {}", state.score),
        20.0,
        30.0,
        SCORE_FONT_SIZE,
        C_SCORE,
    )?;

    if state.is_over() {
        let cfg = &state.config;
        surface.fill_text(
            "Game Over!",
            cfg.surface_width / 2.0 - 90.0,
            cfg.surface_height / 2.0,
            GAME_OVER_FONT_SIZE,
            C_GAME_OVER,
        )?;
    }

    surface.present()
}

// ── Terminal backend ──────────────────────────────────────────────────────────

fn terminal_color(color: Color) -> style::Color {
    match color {
        Color::Lime => style::Color::Green,
        Color::Yellow => style::Color::Yellow,
        Color::Red => style::Color::Red,
        Color::White => style::Color::White,
    }
}

/// Draws onto a terminal grid of `cols × rows` cells, each cell covering
/// `logical_width / cols` by `logical_height / rows` surface units.
pub struct TerminalSurface<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    logical_width: f32,
    logical_height: f32,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, cols: u16, rows: u16, logical_width: f32, logical_height: f32) -> Self {
        Self {
            out,
            cols: cols.max(1),
            rows: rows.max(1),
            logical_width,
            logical_height,
        }
    }

    /// Follow a terminal resize; the logical surface stays the same.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
    }

    pub fn grid(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Half-open cell span `[start, end)` covered by `[from, to)` on an
    /// axis of `extent` logical units split into `cells` cells.  Never empty
    /// for a visible span, so thin entities still show up.
    fn span(from: f32, to: f32, extent: f32, cells: u16) -> Option<(u16, u16)> {
        let scale = cells as f32 / extent;
        let start = (from * scale).floor().max(0.0);
        let end = (to * scale).ceil().min(cells as f32);
        if start >= cells as f32 || end <= 0.0 {
            return None;
        }
        let start = start as u16;
        let end = (end as u16).max(start + 1);
        Some((start, end))
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn clear(&mut self) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> std::io::Result<()> {
        let cols = Self::span(rect.x, rect.x + rect.width, self.logical_width, self.cols);
        let rows = Self::span(rect.y, rect.y + rect.height, self.logical_height, self.rows);
        let (Some((c0, c1)), Some((r0, r1))) = (cols, rows) else {
            return Ok(());
        };

        let line = "█".repeat((c1 - c0) as usize);
        self.out.queue(style::SetForegroundColor(terminal_color(color)))?;
        for row in r0..r1 {
            self.out.queue(cursor::MoveTo(c0, row))?;
            self.out.queue(Print(&line))?;
        }
        Ok(())
    }

    fn fill_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font_size: u16,
        color: Color,
    ) -> std::io::Result<()> {
        let col = ((x / self.logical_width) * self.cols as f32).floor().max(0.0) as u16;
        let row = ((y / self.logical_height) * self.rows as f32).floor().max(0.0) as u16;
        // Baseline sits at the bottom of the glyphs; draw on the row above.
        let row = row.saturating_sub(1).min(self.rows - 1);
        let col = col.min(self.cols - 1);

        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(terminal_color(color)))?;
        // Terminals have one font size; large text is emphasised instead.
        if font_size >= GAME_OVER_FONT_SIZE {
            self.out.queue(style::SetAttribute(Attribute::Bold))?;
        }
        self.out.queue(Print(text))?;
        self.out.queue(style::SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    fn present(&mut self) -> std::io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows - 1))?;
        self.out.flush()
    }
}
