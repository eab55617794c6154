//! Error types shared across the crate
//!
//! The taxonomy is deliberately narrow: settings can fail to load, external
//! collaborators (render/audio) can fail mid-frame, and releasing a resource
//! twice is reported but never acted on.

use std::path::PathBuf;

use thiserror::Error;

use crate::audio::SoundEffect;

/// Failure loading the settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A render or audio collaborator failed during a frame.
///
/// Surfaced to the caller of `Game::update` / `Game::draw`; the frame loop
/// never retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("render collaborator failed: {0}")]
    Render(String),
    #[error("audio collaborator failed: {0}")]
    Audio(String),
}

/// Releasing a resource that has already been released
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReleaseError {
    #[error("sound {0:?} was already released")]
    AlreadyReleased(SoundEffect),
}
