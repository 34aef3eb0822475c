/// Tunable game constants.
///
/// The defaults reproduce the classic 800×600 layout.  A JSON file may
/// override any subset of fields; anything it omits keeps its default.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub surface_width: f32,
    pub surface_height: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Horizontal distance covered per frame while a movement key is held.
    pub player_speed: f32,
    pub projectile_width: f32,
    pub projectile_height: f32,
    pub projectile_speed: f32,
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub enemy_speed: f32,
    pub score_per_hit: u32,
    pub spawn_interval_ms: u64,
    /// Target time between animation frames (≈60 Hz by default).
    pub frame_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            surface_width: 800.0,
            surface_height: 600.0,
            player_width: 50.0,
            player_height: 50.0,
            player_speed: 5.0,
            projectile_width: 10.0,
            projectile_height: 20.0,
            projectile_speed: 5.0,
            enemy_width: 40.0,
            enemy_height: 40.0,
            enemy_speed: 2.0,
            score_per_hit: 10,
            spawn_interval_ms: 1000,
            frame_interval_ms: 16,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    NonPositive { field: &'static str, value: f32 },
    TooWide { field: &'static str, width: f32, surface_width: f32 },
    TooTall { field: &'static str, height: f32, surface_height: f32 },
    ZeroInterval { field: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config: {err}"),
            Self::Parse(err) => write!(f, "invalid config JSON: {err}"),
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive (got {value})")
            }
            Self::TooWide { field, width, surface_width } => write!(
                f,
                "{field} ({width}) does not fit the surface width ({surface_width})"
            ),
            Self::TooTall { field, height, surface_height } => write!(
                f,
                "{field} ({height}) does not fit the surface height ({surface_height})"
            ),
            Self::ZeroInterval { field } => write!(f, "{field} must be at least 1 ms"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json(&text)
    }

    /// Reject geometry the update loop cannot honour, e.g. a player wider
    /// than the surface (the clamp range would be empty).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("surface_width", self.surface_width),
            ("surface_height", self.surface_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_speed", self.player_speed),
            ("projectile_width", self.projectile_width),
            ("projectile_height", self.projectile_height),
            ("projectile_speed", self.projectile_speed),
            ("enemy_width", self.enemy_width),
            ("enemy_height", self.enemy_height),
            ("enemy_speed", self.enemy_speed),
        ];
        // `!(v > 0.0)` also catches NaN.
        if let Some(&(field, value)) = positive.iter().find(|(_, v)| !(*v > 0.0)) {
            return Err(ConfigError::NonPositive { field, value });
        }

        for (field, width) in [
            ("player_width", self.player_width),
            ("enemy_width", self.enemy_width),
        ] {
            if width > self.surface_width {
                return Err(ConfigError::TooWide {
                    field,
                    width,
                    surface_width: self.surface_width,
                });
            }
        }
        if self.player_height > self.surface_height {
            return Err(ConfigError::TooTall {
                field: "player_height",
                height: self.player_height,
                surface_height: self.surface_height,
            });
        }

        if self.spawn_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval { field: "spawn_interval_ms" });
        }
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval { field: "frame_interval_ms" });
        }
        Ok(())
    }
}
