//! Concrete sprite kinds and their spawn factories

use std::time::Duration;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{Entity, Sprite};
use super::generator::Factory;
use crate::Viewport;
use crate::consts::*;
use crate::error::FrameError;
use crate::render::{FrameRect, Renderer, TextureId};

#[inline]
fn size_of(dims: (f32, f32)) -> Vec2 {
    Vec2::new(dims.0, dims.1)
}

/// Player laser, flies straight up
#[derive(Debug, Clone)]
pub struct Laser {
    sprite: Sprite,
    pub speed: f32,
}

impl Laser {
    pub fn new(pos: Vec2) -> Self {
        Self::with_size(pos, size_of(LASER_SIZE))
    }

    pub fn with_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            sprite: Sprite::new(TextureId::Laser, pos, size),
            speed: LASER_SPEED,
        }
    }
}

impl Entity for Laser {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }

    fn update(&mut self, dt: Duration, _viewport: &Viewport) {
        self.sprite.pos.y -= self.speed * dt.as_secs_f32();
        if self.sprite.bounds().bottom() < 0.0 {
            self.deactivate();
        }
    }
}

/// Enemy ship, descends at its own speed
#[derive(Debug, Clone)]
pub struct Enemy {
    sprite: Sprite,
    pub speed: f32,
}

impl Enemy {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self::with_size(pos, size_of(ENEMY_SIZE), speed)
    }

    pub fn with_size(pos: Vec2, size: Vec2, speed: f32) -> Self {
        Self {
            sprite: Sprite::new(TextureId::Enemy, pos, size),
            speed,
        }
    }
}

impl Entity for Enemy {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }

    fn update(&mut self, dt: Duration, viewport: &Viewport) {
        self.sprite.pos.y += self.speed * dt.as_secs_f32();
        if self.sprite.pos.y > viewport.height {
            self.deactivate();
        }
    }
}

/// Parallax star, scrolls down faster the "closer" it is
#[derive(Debug, Clone)]
pub struct Star {
    sprite: Sprite,
    pub speed: f32,
}

impl Star {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            sprite: Sprite::new(TextureId::Star, pos, size_of(STAR_SIZE)),
            speed,
        }
    }
}

impl Entity for Star {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }

    fn update(&mut self, dt: Duration, viewport: &Viewport) {
        self.sprite.pos.y += self.speed * dt.as_secs_f32();
        if self.sprite.pos.y > viewport.height {
            self.deactivate();
        }
    }
}

/// Grid layout of frames within a texture.
///
/// Always holds at least one frame and one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSheet {
    cell_width: u32,
    cell_height: u32,
    frames: u32,
    columns: u32,
}

impl SpriteSheet {
    pub fn new(cell_width: u32, cell_height: u32, frames: u32, columns: u32) -> Self {
        Self {
            cell_width,
            cell_height,
            frames: frames.max(1),
            columns: columns.max(1),
        }
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn cell_size(&self) -> Vec2 {
        Vec2::new(self.cell_width as f32, self.cell_height as f32)
    }

    /// Source rectangle of frame `index`
    pub fn frame_rect(&self, index: u32) -> FrameRect {
        let index = index.min(self.frames - 1);
        FrameRect {
            x: (index % self.columns) * self.cell_width,
            y: (index / self.columns) * self.cell_height,
            width: self.cell_width,
            height: self.cell_height,
        }
    }
}

/// Sprite-sheet animation played a fixed number of times, then deactivated
#[derive(Debug, Clone)]
pub struct AnimatedSprite {
    sprite: Sprite,
    sheet: SpriteSheet,
    frame_time: Duration,
    loops: u32,
    current_frame: u32,
    completed_loops: u32,
    frame_timer: Duration,
}

impl AnimatedSprite {
    pub fn new(
        texture: TextureId,
        pos: Vec2,
        sheet: SpriteSheet,
        frame_time: Duration,
        loops: u32,
    ) -> Self {
        Self {
            sprite: Sprite::new(texture, pos, sheet.cell_size()),
            sheet,
            frame_time,
            loops: loops.max(1),
            current_frame: 0,
            completed_loops: 0,
            frame_timer: Duration::ZERO,
        }
    }

    /// The standard explosion played where something was destroyed
    pub fn explosion(pos: Vec2) -> Self {
        Self::new(
            TextureId::Explosions,
            pos,
            SpriteSheet::new(
                EXPLOSION_CELL,
                EXPLOSION_CELL,
                EXPLOSION_FRAMES,
                EXPLOSION_COLUMNS,
            ),
            EXPLOSION_FRAME_TIME,
            EXPLOSION_LOOPS,
        )
    }

    pub fn current_frame(&self) -> u32 {
        self.current_frame
    }

    fn advance_frame(&mut self) {
        self.current_frame += 1;
        if self.current_frame >= self.sheet.frames {
            self.completed_loops += 1;
            if self.completed_loops >= self.loops {
                self.current_frame = self.sheet.frames - 1;
                self.deactivate();
            } else {
                self.current_frame = 0;
            }
        }
    }
}

impl Entity for AnimatedSprite {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }

    fn update(&mut self, dt: Duration, _viewport: &Viewport) {
        // A zero frame time plays one frame per update
        if self.frame_time.is_zero() {
            self.advance_frame();
            return;
        }
        self.frame_timer += dt;
        while self.frame_timer >= self.frame_time && self.is_active() {
            self.frame_timer -= self.frame_time;
            self.advance_frame();
        }
    }

    fn draw(&self, renderer: &mut dyn Renderer) -> Result<(), FrameError> {
        renderer.draw_sprite(
            self.sprite.texture,
            self.sprite.pos,
            Some(self.sheet.frame_rect(self.current_frame)),
        )
    }
}

/// The player ship, follows the cursor
#[derive(Debug, Clone)]
pub struct Spaceship {
    sprite: Sprite,
}

impl Spaceship {
    pub fn new(pos: Vec2) -> Self {
        Self {
            sprite: Sprite::new(TextureId::Spaceship, pos, size_of(SPACESHIP_SIZE)),
        }
    }

    /// Spawn point: horizontally centred, resting on the bottom edge
    pub fn spawn(viewport: &Viewport) -> Self {
        let size = size_of(SPACESHIP_SIZE);
        Self::new(Vec2::new(
            (viewport.width - size.x) / 2.0,
            viewport.height - size.y,
        ))
    }

    /// Centre the ship on `cursor`
    pub fn center_on(&mut self, cursor: Vec2) {
        self.sprite.pos = cursor - self.sprite.size / 2.0;
    }

    /// Where a laser of `laser_size` leaves the ship: centred, at the top edge
    pub fn muzzle(&self, laser_size: Vec2) -> Vec2 {
        Vec2::new(
            self.sprite.pos.x + (self.sprite.size.x - laser_size.x) / 2.0,
            self.sprite.pos.y,
        )
    }
}

impl Entity for Spaceship {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }

    fn update(&mut self, _dt: Duration, _viewport: &Viewport) {}
}

/// Full-screen backdrop scrolling down and wrapping around
#[derive(Debug, Clone)]
pub struct Background {
    sprite: Sprite,
    pub speed: f32,
}

impl Background {
    pub fn new(viewport: &Viewport) -> Self {
        Self {
            sprite: Sprite::new(
                TextureId::Background,
                Vec2::ZERO,
                Vec2::new(viewport.width, viewport.height),
            ),
            speed: BACKGROUND_SPEED,
        }
    }

    pub fn offset(&self) -> f32 {
        self.sprite.pos.y
    }
}

impl Entity for Background {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }

    fn update(&mut self, dt: Duration, _viewport: &Viewport) {
        let height = self.sprite.size.y;
        if height <= 0.0 {
            return;
        }
        self.sprite.pos.y = (self.sprite.pos.y + self.speed * dt.as_secs_f32()).rem_euclid(height);
    }

    fn draw(&self, renderer: &mut dyn Renderer) -> Result<(), FrameError> {
        let pos = self.sprite.pos;
        renderer.draw_sprite(self.sprite.texture, pos, None)?;
        renderer.draw_sprite(
            self.sprite.texture,
            Vec2::new(pos.x, pos.y - self.sprite.size.y),
            None,
        )
    }
}

/// Random left edge keeping a sprite of `width` inside the viewport
fn random_x(rng: &mut Pcg32, viewport_width: f32, width: f32) -> f32 {
    let max = (viewport_width - width).max(1.0);
    rng.random_range(1.0..=max)
}

/// Spawns enemies along the top edge with randomized position and speed
#[derive(Debug, Clone)]
pub struct EnemyFactory {
    rng: Pcg32,
    viewport_width: f32,
}

impl EnemyFactory {
    pub fn new(seed: u64, viewport: &Viewport) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            viewport_width: viewport.width,
        }
    }
}

impl Factory<Enemy> for EnemyFactory {
    fn create(&mut self) -> Enemy {
        let x = random_x(&mut self.rng, self.viewport_width, ENEMY_SIZE.0);
        let speed = self.rng.random_range(ENEMY_SPEED_MIN..=ENEMY_SPEED_MAX);
        Enemy::new(Vec2::new(x, 1.0), speed)
    }
}

/// Spawns parallax stars along the top edge
#[derive(Debug, Clone)]
pub struct StarFactory {
    rng: Pcg32,
    viewport_width: f32,
}

impl StarFactory {
    pub fn new(seed: u64, viewport: &Viewport) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            viewport_width: viewport.width,
        }
    }
}

impl Factory<Star> for StarFactory {
    fn create(&mut self) -> Star {
        let x = random_x(&mut self.rng, self.viewport_width, STAR_SIZE.0);
        let speed = self.rng.random_range(STAR_SPEED_MIN..=STAR_SPEED_MAX);
        Star::new(Vec2::new(x, 1.0), speed)
    }
}
