//! Shared test helpers.
//!
//! `RecordingSurface` stands in for a real drawing target so frames can be
//! inspected call by call.

#![allow(dead_code)]

use block_shooter::compute::init_state;
use block_shooter::config::GameConfig;
use block_shooter::display::Surface;
use block_shooter::entities::{Color, Enemy, GameState, Projectile, Rect};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear,
    Rect(Rect, Color),
    Text {
        text: String,
        x: f32,
        y: f32,
        font_size: u16,
        color: Color,
    },
    Present,
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn rects(&self) -> Vec<(Rect, Color)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Rect(r, color) => Some((*r, *color)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) -> std::io::Result<()> {
        self.calls.push(DrawCall::Clear);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> std::io::Result<()> {
        self.calls.push(DrawCall::Rect(rect, color));
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
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
            font_size,
            color,
        });
        Ok(())
    }

    fn present(&mut self) -> std::io::Result<()> {
        self.calls.push(DrawCall::Present);
        Ok(())
    }
}

/// Default 800×600 game: player at (375, 550), 50×50.
pub fn make_state() -> GameState {
    init_state(&GameConfig::default())
}

pub fn projectile(x: f32, y: f32) -> Projectile {
    Projectile { x, y, width: 10.0, height: 20.0 }
}

pub fn enemy(x: f32, y: f32) -> Enemy {
    Enemy { x, y, width: 40.0, height: 40.0 }
}
