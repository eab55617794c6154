//! Starwar - a vertical arcade shooter simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (sprite pools, spawners, collisions, game-over scene)
//! - `game`: Per-frame driver wiring the simulation to audio and render collaborators
//! - `clock`: Fixed timestep accumulator
//! - `render` / `audio` / `input`: Collaborator interfaces (implemented by the host)
//! - `settings`: Startup configuration

pub mod audio;
pub mod clock;
pub mod error;
pub mod game;
pub mod hud;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::{FrameError, ReleaseError, SettingsError};
pub use game::{Game, LoopControl};
pub use settings::Settings;

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: Duration = Duration::from_nanos(16_666_667);
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest real frame time fed to the accumulator
    pub const MAX_FRAME_DT: Duration = Duration::from_millis(250);

    /// Points awarded per enemy destroyed by a laser
    pub const SCORE_PER_KILL: u64 = 10;

    /// Sprite sizes (pixels)
    pub const SPACESHIP_SIZE: (f32, f32) = (64.0, 64.0);
    pub const LASER_SIZE: (f32, f32) = (4.0, 16.0);
    pub const ENEMY_SIZE: (f32, f32) = (48.0, 48.0);
    pub const STAR_SIZE: (f32, f32) = (3.0, 3.0);

    /// Laser speed (pixels/s, upward)
    pub const LASER_SPEED: f32 = 720.0;
    /// Enemy descent speed range (pixels/s)
    pub const ENEMY_SPEED_MIN: f32 = 300.0;
    pub const ENEMY_SPEED_MAX: f32 = 600.0;
    /// Parallax star speed range (pixels/s)
    pub const STAR_SPEED_MIN: f32 = 300.0;
    pub const STAR_SPEED_MAX: f32 = 1200.0;
    /// Background scroll speed (pixels/s)
    pub const BACKGROUND_SPEED: f32 = 30.0;

    /// Star spawner interval
    pub const STAR_SPAWN_INTERVAL: Duration = Duration::from_millis(100);

    /// Explosion sprite sheet: 4x4 grid of 64px cells
    pub const EXPLOSION_CELL: u32 = 64;
    pub const EXPLOSION_FRAMES: u32 = 16;
    pub const EXPLOSION_COLUMNS: u32 = 4;
    pub const EXPLOSION_FRAME_TIME: Duration = Duration::from_millis(5);
    pub const EXPLOSION_LOOPS: u32 = 1;
}

/// Play area dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1024.0, 768.0)
    }
}
