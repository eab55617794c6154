//! Audio system
//!
//! The host backend does the actual mixing. `AudioManager` tracks volume and
//! which sound channels are still alive so that playback and release requests
//! on a released channel are guarded no-ops.

use crate::error::{FrameError, ReleaseError};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Laser fired
    Laser,
    /// Enemy or player destroyed
    Explosion,
    /// Looping background music
    Music,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 3] = [SoundEffect::Laser, SoundEffect::Explosion, SoundEffect::Music];

    fn index(self) -> usize {
        match self {
            SoundEffect::Laser => 0,
            SoundEffect::Explosion => 1,
            SoundEffect::Music => 2,
        }
    }
}

/// Host audio backend
pub trait AudioBackend {
    /// Fire-and-forget playback
    fn play_one_shot(&mut self, effect: SoundEffect, volume: f32) -> Result<(), FrameError>;

    /// Start looping playback of the named asset on the `effect` channel
    fn play_looped(
        &mut self,
        effect: SoundEffect,
        asset: &str,
        volume: f32,
    ) -> Result<(), FrameError>;

    /// Stop playback and free the backend resources for `effect`
    fn release(&mut self, effect: SoundEffect);
}

/// Backend that only logs requests (headless runs)
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioBackend for LogAudio {
    fn play_one_shot(&mut self, effect: SoundEffect, volume: f32) -> Result<(), FrameError> {
        log::debug!("play {:?} at {:.2}", effect, volume);
        Ok(())
    }

    fn play_looped(
        &mut self,
        effect: SoundEffect,
        asset: &str,
        volume: f32,
    ) -> Result<(), FrameError> {
        log::debug!("loop {:?} ({}) at {:.2}", effect, asset, volume);
        Ok(())
    }

    fn release(&mut self, effect: SoundEffect) {
        log::debug!("release {:?}", effect);
    }
}

/// Audio manager for the game
pub struct AudioManager<B> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_asset: String,
    released: [bool; 3],
}

/// Music asset played when none is configured
pub const DEFAULT_MUSIC_ASSET: &str = "bgm";

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            music_asset: DEFAULT_MUSIC_ASSET.to_string(),
            released: [false; 3],
        }
    }

    /// Use `asset` for the background music loop
    pub fn with_music_asset(mut self, asset: impl Into<String>) -> Self {
        self.music_asset = asset.into();
        self
    }

    pub fn music_asset(&self) -> &str {
        &self.music_asset
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = match effect {
            SoundEffect::Music => self.music_volume,
            _ => self.sfx_volume,
        };
        self.master_volume * channel
    }

    /// Whether `effect` has been released
    pub fn is_released(&self, effect: SoundEffect) -> bool {
        self.released[effect.index()]
    }

    /// Request a one-shot sound. Silently ignored once the channel is released.
    pub fn play(&mut self, effect: SoundEffect) -> Result<(), FrameError> {
        let vol = self.effective_volume(effect);
        if self.is_released(effect) || vol <= 0.0 {
            return Ok(());
        }
        self.backend.play_one_shot(effect, vol)
    }

    /// Start the background music loop
    pub fn play_music(&mut self) -> Result<(), FrameError> {
        let vol = self.effective_volume(SoundEffect::Music);
        if self.is_released(SoundEffect::Music) || vol <= 0.0 {
            return Ok(());
        }
        self.backend
            .play_looped(SoundEffect::Music, &self.music_asset, vol)
    }

    /// Release one channel. Releasing twice is reported and otherwise ignored.
    pub fn release(&mut self, effect: SoundEffect) -> Result<(), ReleaseError> {
        if self.is_released(effect) {
            return Err(ReleaseError::AlreadyReleased(effect));
        }
        self.backend.release(effect);
        self.released[effect.index()] = true;
        log::debug!("Released {:?}", effect);
        Ok(())
    }

    /// Release every channel still alive, returning how many were released
    pub fn release_all(&mut self) -> usize {
        SoundEffect::ALL
            .iter()
            .filter(|&&effect| self.release(effect).is_ok())
            .count()
    }
}
