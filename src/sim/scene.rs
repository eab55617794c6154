//! Game-over scene controller
//!
//! `Running -> Triggered -> Over`, never back. The cleanup action runs exactly
//! once, on the first update where the termination predicate holds; a failing
//! cleanup is logged and the transition still completes.

use glam::Vec2;

use crate::Viewport;
use crate::error::{FrameError, ReleaseError};
use crate::render::{Color, FontId, Renderer};

pub const GAME_OVER_TEXT: &str = "GAME OVER";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePhase {
    Running,
    /// Cleanup executing (only observable from inside the cleanup action)
    Triggered,
    Over,
}

type Predicate<W> = Box<dyn Fn(&W) -> bool>;
type Cleanup<W> = Box<dyn FnMut(&mut W) -> Result<(), ReleaseError>>;

pub struct GameOverScene<W> {
    phase: ScenePhase,
    enabled: bool,
    is_over: Predicate<W>,
    cleanup: Cleanup<W>,
}

impl<W> GameOverScene<W> {
    pub fn new(
        is_over: impl Fn(&W) -> bool + 'static,
        cleanup: impl FnMut(&mut W) -> Result<(), ReleaseError> + 'static,
    ) -> Self {
        Self {
            phase: ScenePhase::Running,
            enabled: true,
            is_over: Box::new(is_over),
            cleanup: Box::new(cleanup),
        }
    }

    /// A disabled scene never triggers (player invulnerable)
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == ScenePhase::Over
    }

    /// Evaluate the predicate; on its first `true` run cleanup once.
    ///
    /// Returns whether the scene triggered during this call.
    pub fn update(&mut self, world: &mut W) -> bool {
        if !self.enabled || self.phase != ScenePhase::Running {
            return false;
        }
        if !(self.is_over)(world) {
            return false;
        }

        self.phase = ScenePhase::Triggered;
        log::info!("Game over triggered");
        if let Err(e) = (self.cleanup)(world) {
            log::warn!("Game-over cleanup incomplete: {e}");
        }
        self.phase = ScenePhase::Over;
        true
    }

    /// Draw the end-of-game overlay once over; nothing before
    pub fn draw(&self, renderer: &mut dyn Renderer, viewport: &Viewport) -> Result<(), FrameError> {
        if !self.is_over() {
            return Ok(());
        }
        let size = renderer.measure_text(FontId::Message, GAME_OVER_TEXT);
        let pos = Vec2::new(
            (viewport.width - size.x) / 2.0,
            (viewport.height - size.y) / 2.0,
        );
        renderer.draw_text(FontId::Message, GAME_OVER_TEXT, pos, Color::RED)
    }
}
