//! Collision detection between pooled entities
//!
//! Axis-aligned bounding boxes only. A sweep deactivates both sides of a hit
//! before the reaction runs, so an entity hit once is filtered out of every
//! later comparison in the same sweep.

use glam::Vec2;

use super::entity::Entity;
use super::pool::SpritePool;

/// Axis-aligned bounding box (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Bounds {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict overlap: boxes that only share an edge do not intersect
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Both entities are active and their boxes overlap
pub fn collides<A: Entity + ?Sized, B: Entity + ?Sized>(a: &A, b: &B) -> bool {
    a.is_active() && b.is_active() && a.bounds().intersects(&b.bounds())
}

/// Compare every active target against every active projectile.
///
/// On overlap both are deactivated, then `react` runs once for the pair.
/// A target stops consuming projectiles as soon as it is hit. Returns the
/// number of hits.
pub fn sweep_pools<T, P, F>(
    targets: &mut SpritePool<T>,
    projectiles: &mut SpritePool<P>,
    mut react: F,
) -> usize
where
    T: Entity,
    P: Entity,
    F: FnMut(&T, &P),
{
    let mut hits = 0;
    for target in targets.sprites_mut() {
        for projectile in projectiles.sprites_mut() {
            if !target.is_active() {
                break;
            }
            if collides(&*target, &*projectile) {
                target.deactivate();
                projectile.deactivate();
                react(&*target, &*projectile);
                hits += 1;
            }
        }
    }
    hits
}

/// Compare a single entity against every active target in a pool.
///
/// Stops at the first hit since the entity is deactivated by it.
pub fn sweep_entity<T, E, F>(targets: &mut SpritePool<T>, entity: &mut E, mut react: F) -> usize
where
    T: Entity,
    E: Entity,
    F: FnMut(&T, &E),
{
    let mut hits = 0;
    for target in targets.sprites_mut() {
        if !entity.is_active() {
            break;
        }
        if collides(&*target, &*entity) {
            target.deactivate();
            entity.deactivate();
            react(&*target, &*entity);
            hits += 1;
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::sprites::{Enemy, Laser};

    fn laser(x: f32, y: f32) -> Laser {
        Laser::with_size(Vec2::new(x, y), Vec2::new(4.0, 4.0))
    }

    fn enemy(x: f32, y: f32) -> Enemy {
        Enemy::with_size(Vec2::new(x, y), Vec2::new(8.0, 8.0), 0.0)
    }

    #[test]
    fn test_bounds_intersect() {
        let a = Bounds::new(Vec2::new(100.0, 50.0), Vec2::new(4.0, 4.0));
        let b = Bounds::new(Vec2::new(98.0, 48.0), Vec2::new(8.0, 8.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_bounds_touching_edges_do_not_intersect() {
        let a = Bounds::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Bounds::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.intersects(&b));
        let c = Bounds::new(Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_inactive_never_collides() {
        let l = laser(100.0, 50.0);
        let mut e = enemy(98.0, 48.0);
        assert!(collides(&l, &e));
        e.deactivate();
        assert!(!collides(&l, &e));
    }

    #[test]
    fn test_sweep_deactivates_both_and_reacts_once() {
        let mut enemies = SpritePool::new();
        let mut lasers = SpritePool::new();
        enemies.add(enemy(98.0, 48.0));
        lasers.add(laser(100.0, 50.0));

        let mut hit_positions = Vec::new();
        let hits = sweep_pools(&mut enemies, &mut lasers, |e, _| hit_positions.push(e.pos()));

        assert_eq!(hits, 1);
        assert_eq!(hit_positions, vec![Vec2::new(98.0, 48.0)]);
        assert_eq!(enemies.count(), 0);
        assert_eq!(lasers.count(), 0);
    }

    #[test]
    fn test_projectile_hits_only_first_target() {
        // One laser overlapping two enemies scores once.
        let mut enemies = SpritePool::new();
        let mut lasers = SpritePool::new();
        enemies.add(enemy(98.0, 48.0));
        enemies.add(enemy(99.0, 49.0));
        lasers.add(laser(100.0, 50.0));

        let hits = sweep_pools(&mut enemies, &mut lasers, |_, _| {});
        assert_eq!(hits, 1);
        assert_eq!(enemies.count(), 1);
        assert_eq!(lasers.count(), 0);
    }

    #[test]
    fn test_target_consumes_only_first_projectile() {
        // One enemy overlapping two lasers is destroyed once and spares the second laser.
        let mut enemies = SpritePool::new();
        let mut lasers = SpritePool::new();
        enemies.add(enemy(98.0, 48.0));
        lasers.add(laser(100.0, 50.0));
        lasers.add(laser(101.0, 51.0));

        let hits = sweep_pools(&mut enemies, &mut lasers, |_, _| {});
        assert_eq!(hits, 1);
        assert_eq!(enemies.count(), 0);
        assert_eq!(lasers.count(), 1);
    }

    #[test]
    fn test_sweep_entity_stops_after_entity_dies() {
        let mut enemies = SpritePool::new();
        enemies.add(enemy(98.0, 48.0));
        enemies.add(enemy(99.0, 49.0));
        let mut player = laser(100.0, 50.0);

        let hits = sweep_entity(&mut enemies, &mut player, |_, _| {});
        assert_eq!(hits, 1);
        assert!(!player.is_active());
        assert_eq!(enemies.count(), 1);
    }

    #[test]
    fn test_sweep_empty_pools() {
        let mut enemies: SpritePool<Enemy> = SpritePool::new();
        let mut lasers: SpritePool<Laser> = SpritePool::new();
        assert_eq!(sweep_pools(&mut enemies, &mut lasers, |_, _| {}), 0);
    }
}
