//! Timed sprite generator
//!
//! Owns a pool and a factory. Every `interval` of accumulated time it creates
//! one entity and adds it to the pool. The accumulator resets to zero on a
//! spawn, so an oversized frame still yields a single spawn (fixed rate, no
//! burst catch-up).

use std::time::Duration;

use super::entity::Entity;
use super::pool::SpritePool;
use crate::Viewport;
use crate::error::FrameError;
use crate::render::Renderer;

/// Produces one fresh entity per call
pub trait Factory<T> {
    fn create(&mut self) -> T;
}

impl<T, F: FnMut() -> T> Factory<T> for F {
    fn create(&mut self) -> T {
        self()
    }
}

pub struct SpriteGenerator<T, F> {
    factory: F,
    pool: SpritePool<T>,
    /// `None` = disabled (configured rate was zero or invalid)
    interval: Option<Duration>,
    elapsed: Duration,
    active: bool,
}

impl<T: Entity, F: Factory<T>> SpriteGenerator<T, F> {
    pub fn new(factory: F, interval: Option<Duration>) -> Self {
        match interval {
            Some(interval) => log::debug!("Generator interval {:?}", interval),
            None => log::info!("Generator disabled (no spawn rate)"),
        }
        Self {
            factory,
            pool: SpritePool::new(),
            interval,
            elapsed: Duration::ZERO,
            active: true,
        }
    }

    /// Accumulate time (while active), spawn at most once, then advance the pool.
    ///
    /// Returns whether an entity was spawned.
    pub fn update(&mut self, dt: Duration, viewport: &Viewport) -> bool {
        let spawned = self.tick(dt);
        self.pool.update(dt, viewport);
        spawned
    }

    fn tick(&mut self, dt: Duration) -> bool {
        if !self.active {
            return false;
        }
        let Some(interval) = self.interval else {
            return false;
        };
        self.elapsed += dt;
        if self.elapsed < interval {
            return false;
        }
        self.elapsed = Duration::ZERO;
        self.pool.add(self.factory.create());
        true
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) -> Result<(), FrameError> {
        self.pool.draw(renderer)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Freeze (or resume) spawning. Already spawned entities keep moving.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Time accumulated toward the next spawn
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn pool(&self) -> &SpritePool<T> {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut SpritePool<T> {
        &mut self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::spawn_interval;
    use crate::sim::sprites::Enemy;
    use glam::Vec2;
    use proptest::prelude::*;

    fn still_enemy() -> Enemy {
        Enemy::new(Vec2::new(10.0, 10.0), 0.0)
    }

    fn generator(rate: f32) -> SpriteGenerator<Enemy, fn() -> Enemy> {
        SpriteGenerator::new(still_enemy as fn() -> Enemy, spawn_interval(rate))
    }

    #[test]
    fn test_three_80ms_frames_spawn_once_and_reset() {
        let viewport = Viewport::default();
        let mut spawner = generator(5.0);
        assert_eq!(spawner.interval(), Some(Duration::from_millis(200)));

        let frame = Duration::from_millis(80);
        assert!(!spawner.update(frame, &viewport));
        assert!(!spawner.update(frame, &viewport));
        assert!(spawner.update(frame, &viewport));

        assert_eq!(spawner.pool().count(), 1);
        // Reset-to-zero policy: the 40 ms overshoot is dropped
        assert_eq!(spawner.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_oversized_frame_spawns_once() {
        let viewport = Viewport::default();
        let mut spawner = generator(5.0);
        assert!(spawner.update(Duration::from_secs(10), &viewport));
        assert_eq!(spawner.pool().count(), 1);
    }

    #[test]
    fn test_inactive_generator_freezes() {
        let viewport = Viewport::default();
        let mut spawner = generator(5.0);
        spawner.update(Duration::from_millis(100), &viewport);
        spawner.set_active(false);
        assert!(!spawner.update(Duration::from_secs(1), &viewport));
        assert_eq!(spawner.elapsed(), Duration::from_millis(100));
        assert_eq!(spawner.pool().count(), 0);

        spawner.set_active(true);
        assert!(spawner.update(Duration::from_millis(100), &viewport));
    }

    #[test]
    fn test_deactivation_keeps_existing_entities() {
        let viewport = Viewport::default();
        let mut spawner = generator(5.0);
        spawner.update(Duration::from_millis(200), &viewport);
        spawner.set_active(false);
        spawner.update(Duration::from_millis(200), &viewport);
        assert_eq!(spawner.pool().count(), 1);
    }

    #[test]
    fn test_zero_rate_never_spawns() {
        let viewport = Viewport::default();
        let mut spawner = generator(0.0);
        assert_eq!(spawner.interval(), None);
        for _ in 0..10 {
            assert!(!spawner.update(Duration::from_secs(1), &viewport));
        }
        assert!(spawner.pool().is_empty());
    }

    #[test]
    fn test_zero_interval_spawns_every_frame() {
        let viewport = Viewport::default();
        let mut spawner = SpriteGenerator::new(still_enemy, Some(Duration::ZERO));
        for _ in 0..3 {
            assert!(spawner.update(Duration::from_millis(1), &viewport));
        }
        assert_eq!(spawner.pool().count(), 3);
    }

    #[test]
    fn test_closure_factory() {
        let viewport = Viewport::default();
        let mut n = 0.0;
        let mut spawner = SpriteGenerator::new(
            move || {
                n += 10.0;
                Enemy::new(Vec2::new(n, 0.0), 0.0)
            },
            Some(Duration::from_millis(10)),
        );
        spawner.update(Duration::from_millis(10), &viewport);
        spawner.update(Duration::from_millis(10), &viewport);
        let xs: Vec<f32> = spawner.pool().sprites().map(|e| e.pos().x).collect();
        assert_eq!(xs, vec![10.0, 20.0]);
    }

    proptest! {
        #[test]
        fn prop_at_most_one_spawn_per_frame(
            interval_ms in 1u64..500,
            frames in proptest::collection::vec(0u64..2000, 1..40)
        ) {
            let viewport = Viewport::default();
            let interval = Duration::from_millis(interval_ms);
            let mut spawner = SpriteGenerator::new(still_enemy, Some(interval));
            let mut spawned = 0;
            for ms in frames {
                let before = spawner.pool().len();
                let did_spawn = spawner.update(Duration::from_millis(ms), &viewport);
                prop_assert!(spawner.pool().len() <= before + 1);
                if ms >= interval_ms {
                    // A frame at least one interval long always spawns
                    prop_assert!(did_spawn);
                }
                if did_spawn {
                    spawned += 1;
                }
            }
            prop_assert_eq!(spawner.pool().count(), spawned);
        }
    }
}
