//! Entity capability set shared by every pooled sprite kind

use std::time::Duration;

use glam::Vec2;

use super::collision::Bounds;
use crate::Viewport;
use crate::error::FrameError;
use crate::render::{Renderer, TextureId};

/// Position, size and liveness common to all sprites
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub texture: TextureId,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    active: bool,
}

impl Sprite {
    pub fn new(texture: TextureId, pos: Vec2, size: Vec2) -> Self {
        Self {
            texture,
            pos,
            size,
            active: true,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.pos, self.size)
    }
}

/// A simulated object that can live in a [`SpritePool`](super::SpritePool).
///
/// Implementors provide access to their [`Sprite`] and their per-kind motion;
/// liveness, bounds and the default draw come for free.
pub trait Entity {
    fn sprite(&self) -> &Sprite;

    fn sprite_mut(&mut self) -> &mut Sprite;

    /// Advance motion/animation by `dt`. May deactivate the entity.
    fn update(&mut self, dt: Duration, viewport: &Viewport);

    fn draw(&self, renderer: &mut dyn Renderer) -> Result<(), FrameError> {
        let sprite = self.sprite();
        renderer.draw_sprite(sprite.texture, sprite.pos, None)
    }

    fn is_active(&self) -> bool {
        self.sprite().active
    }

    fn deactivate(&mut self) {
        self.sprite_mut().active = false;
    }

    fn bounds(&self) -> Bounds {
        self.sprite().bounds()
    }

    fn pos(&self) -> Vec2 {
        self.sprite().pos
    }
}
