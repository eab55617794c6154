//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time is supplied by the caller
//! - Seeded RNG only
//! - Stable iteration order (spawn order within each pool)
//! - No audio, input or platform dependencies

pub mod collision;
pub mod entity;
pub mod generator;
pub mod pool;
pub mod scene;
pub mod sprites;
pub mod state;

pub use collision::{Bounds, collides, sweep_entity, sweep_pools};
pub use entity::{Entity, Sprite};
pub use generator::{Factory, SpriteGenerator};
pub use pool::SpritePool;
pub use scene::{GAME_OVER_TEXT, GameOverScene, ScenePhase};
pub use sprites::{
    AnimatedSprite, Background, Enemy, EnemyFactory, Laser, Spaceship, SpriteSheet, Star,
    StarFactory,
};
pub use state::{GameEvent, GameState};
