//! Game settings
//!
//! Read once at startup from a JSON file and immutable afterwards.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::audio::DEFAULT_MUSIC_ASSET;
use crate::error::SettingsError;

/// Startup configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Enemy spawn rate (enemies per second, <= 0 disables spawning)
    pub num_of_enemies_per_second: f32,
    /// Laser fire rate while the trigger is held (lasers per second)
    pub num_of_lasers_per_second: f32,
    /// Player is invulnerable; the game-over path is disabled
    pub live_forever: bool,
    /// Draw the diagnostics overlay
    pub show_debug_info: bool,
    /// Host window preference (not used by the simulation)
    pub full_screen: bool,
    /// Background music asset name
    pub bgm_sound_effect: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            num_of_enemies_per_second: 1.0,
            num_of_lasers_per_second: 10.0,
            live_forever: false,
            show_debug_info: false,
            full_screen: false,
            bgm_sound_effect: DEFAULT_MUSIC_ASSET.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Enemy spawner interval (`None` = spawner disabled)
    pub fn enemy_interval(&self) -> Option<Duration> {
        spawn_interval(self.num_of_enemies_per_second)
    }

    /// Laser fire interval (`None` = firing disabled)
    pub fn laser_interval(&self) -> Option<Duration> {
        spawn_interval(self.num_of_lasers_per_second)
    }
}

/// Convert a per-second rate to an interval of `1000 / rate` milliseconds.
///
/// Zero, negative and non-finite rates yield `None` instead of dividing by zero.
pub fn spawn_interval(rate: f32) -> Option<Duration> {
    if !rate.is_finite() || rate <= 0.0 {
        return None;
    }
    Some(Duration::from_nanos((1e9 / rate as f64).round() as u64))
}
