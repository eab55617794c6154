//! Sprite pool
//!
//! Owns entities of one kind in spawn order. Deactivation only flips a flag;
//! inactive entries are hidden from every view immediately and physically
//! dropped at the start of the next `update`, so nothing is ever removed from
//! the backing vector while a pass is iterating it.

use std::time::Duration;

use super::entity::Entity;
use crate::Viewport;
use crate::error::FrameError;
use crate::render::Renderer;

#[derive(Debug, Clone)]
pub struct SpritePool<T> {
    sprites: Vec<T>,
}

impl<T> Default for SpritePool<T> {
    fn default() -> Self {
        Self {
            sprites: Vec::new(),
        }
    }
}

impl<T: Entity> SpritePool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity (spawn order is preserved)
    pub fn add(&mut self, sprite: T) {
        self.sprites.push(sprite);
    }

    /// Drop entries deactivated since the last update, then advance the rest
    pub fn update(&mut self, dt: Duration, viewport: &Viewport) {
        self.sprites.retain(|s| s.is_active());
        for sprite in &mut self.sprites {
            sprite.update(dt, viewport);
        }
    }

    /// Draw every active entity in spawn order
    pub fn draw(&self, renderer: &mut dyn Renderer) -> Result<(), FrameError> {
        for sprite in self.sprites() {
            sprite.draw(renderer)?;
        }
        Ok(())
    }

    /// Discard everything, active or not
    pub fn clear(&mut self) {
        self.sprites.clear();
    }

    /// Active entities
    pub fn sprites(&self) -> impl Iterator<Item = &T> {
        self.sprites.iter().filter(|s| s.is_active())
    }

    /// Active entities, mutable in place but not structurally.
    ///
    /// The filter is evaluated lazily, so an entity deactivated earlier in the
    /// same pass is skipped when reached.
    pub fn sprites_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.sprites.iter_mut().filter(|s| s.is_active())
    }

    /// Number of active entities
    pub fn count(&self) -> usize {
        self.sprites().count()
    }

    /// Number of entries in the backing vector, including ones awaiting removal
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}
