//! Game state and per-frame simulation steps
//!
//! Pure simulation: no audio, no input devices. Each step reports what
//! happened as [`GameEvent`]s so the frame driver can request sounds.

use std::time::Duration;

use glam::Vec2;

use super::collision::{sweep_entity, sweep_pools};
use super::entity::Entity;
use super::generator::SpriteGenerator;
use super::pool::SpritePool;
use super::sprites::{
    AnimatedSprite, Background, Enemy, EnemyFactory, Laser, Spaceship, Star, StarFactory,
};
use crate::Viewport;
use crate::consts::*;
use crate::error::FrameError;
use crate::input::FrameInput;
use crate::render::Renderer;
use crate::settings::Settings;

/// Something the frame driver may want to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A laser left the ship
    LaserFired { pos: Vec2 },
    /// An enemy was shot down (score awarded)
    EnemyDestroyed { pos: Vec2 },
    /// The player collided with an enemy
    PlayerDestroyed { pos: Vec2 },
}

/// Stream ids so the enemy and star factories draw independent sequences
const ENEMY_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;
const STAR_STREAM: u64 = 0x2545_f491_4f6c_dd1d;

/// Complete simulation state
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub viewport: Viewport,
    /// Score (only written by the laser/enemy sweep)
    score: u64,
    /// Total simulated time
    pub time: Duration,
    pub background: Background,
    pub spaceship: Spaceship,
    pub lasers: SpritePool<Laser>,
    pub explosions: SpritePool<AnimatedSprite>,
    pub enemies: SpriteGenerator<Enemy, EnemyFactory>,
    pub stars: SpriteGenerator<Star, StarFactory>,
    laser_interval: Option<Duration>,
    laser_elapsed: Duration,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, settings: &Settings, viewport: Viewport) -> Self {
        let enemies = SpriteGenerator::new(
            EnemyFactory::new(seed ^ ENEMY_STREAM, &viewport),
            settings.enemy_interval(),
        );
        let stars = SpriteGenerator::new(
            StarFactory::new(seed ^ STAR_STREAM, &viewport),
            Some(STAR_SPAWN_INTERVAL),
        );
        let laser_interval = settings.laser_interval();
        if laser_interval.is_none() {
            log::info!("Laser rate is zero; firing disabled");
        }

        Self {
            seed,
            viewport,
            score: 0,
            time: Duration::ZERO,
            background: Background::new(&viewport),
            spaceship: Spaceship::spawn(&viewport),
            lasers: SpritePool::new(),
            explosions: SpritePool::new(),
            enemies,
            stars,
            laser_interval,
            laser_elapsed: Duration::ZERO,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn player_alive(&self) -> bool {
        self.spaceship.is_active()
    }

    /// Step 1: scroll the background
    pub fn advance_background(&mut self, dt: Duration) {
        self.time += dt;
        self.background.update(dt, &self.viewport);
    }

    /// Step 2: move the ship to the cursor and fire while the trigger is held.
    ///
    /// Fire time accumulates only while the trigger is held and resets to
    /// zero on each shot.
    pub fn update_player(&mut self, dt: Duration, input: &FrameInput) -> Option<GameEvent> {
        if !self.spaceship.is_active() {
            return None;
        }
        self.spaceship.center_on(input.cursor);

        if !input.fire {
            return None;
        }
        let interval = self.laser_interval?;
        self.laser_elapsed += dt;
        if self.laser_elapsed < interval {
            return None;
        }
        self.laser_elapsed = Duration::ZERO;

        let pos = self
            .spaceship
            .muzzle(Vec2::new(LASER_SIZE.0, LASER_SIZE.1));
        self.lasers.add(Laser::new(pos));
        Some(GameEvent::LaserFired { pos })
    }

    /// Step 3: enemy-vs-laser sweep, then enemy-vs-player when `player_vulnerable`.
    ///
    /// Every hit deactivates both sides and queues an explosion at the
    /// destroyed sprite's position. Only laser kills score.
    pub fn sweep_collisions(&mut self, player_vulnerable: bool) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.spaceship.is_active() {
            return events;
        }

        let score = &mut self.score;
        let explosions = &mut self.explosions;
        sweep_pools(self.enemies.pool_mut(), &mut self.lasers, |enemy, _laser| {
            *score += SCORE_PER_KILL;
            explosions.add(AnimatedSprite::explosion(enemy.pos()));
            events.push(GameEvent::EnemyDestroyed { pos: enemy.pos() });
        });

        if player_vulnerable {
            sweep_entity(
                self.enemies.pool_mut(),
                &mut self.spaceship,
                |_enemy, ship| {
                    explosions.add(AnimatedSprite::explosion(ship.pos()));
                    events.push(GameEvent::PlayerDestroyed { pos: ship.pos() });
                },
            );
        }
        events
    }

    /// Step 5: spawners and pools
    pub fn advance_pools(&mut self, dt: Duration) {
        self.enemies.update(dt, &self.viewport);
        self.lasers.update(dt, &self.viewport);
        self.explosions.update(dt, &self.viewport);
        self.stars.update(dt, &self.viewport);
    }

    /// Game-over teardown of the simulation side. Safe to repeat.
    pub fn clear_hostiles(&mut self) {
        self.enemies.pool_mut().clear();
        self.lasers.clear();
        self.explosions.clear();
        self.enemies.set_active(false);
    }

    /// Draw every sprite back to front
    pub fn draw(&self, renderer: &mut dyn Renderer) -> Result<(), FrameError> {
        self.background.draw(renderer)?;
        self.stars.draw(renderer)?;
        self.enemies.draw(renderer)?;
        if self.spaceship.is_active() {
            self.spaceship.draw(renderer)?;
        }
        self.lasers.draw(renderer)?;
        self.explosions.draw(renderer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DT: Duration = Duration::from_millis(16);

    fn quiet_settings() -> Settings {
        Settings {
            num_of_enemies_per_second: 0.0,
            ..Default::default()
        }
    }

    fn state() -> GameState {
        GameState::new(42, &quiet_settings(), Viewport::new(640.0, 480.0))
    }

    fn park_ship(state: &mut GameState) {
        let input = FrameInput {
            cursor: Vec2::new(500.0, 400.0),
            ..Default::default()
        };
        state.update_player(DT, &input);
    }

    #[test]
    fn test_laser_enemy_hit_scores_and_explodes() {
        let mut state = state();
        park_ship(&mut state);
        state
            .lasers
            .add(Laser::with_size(Vec2::new(100.0, 50.0), Vec2::new(4.0, 4.0)));
        state.enemies.pool_mut().add(Enemy::with_size(
            Vec2::new(98.0, 48.0),
            Vec2::new(8.0, 8.0),
            0.0,
        ));

        let events = state.sweep_collisions(true);

        assert_eq!(
            events,
            vec![GameEvent::EnemyDestroyed {
                pos: Vec2::new(98.0, 48.0)
            }]
        );
        assert_eq!(state.score(), SCORE_PER_KILL);
        assert_eq!(state.enemies.pool().count(), 0);
        assert_eq!(state.lasers.count(), 0);
        let explosions: Vec<Vec2> = state.explosions.sprites().map(|e| e.pos()).collect();
        assert_eq!(explosions, vec![Vec2::new(98.0, 48.0)]);
    }

    #[test]
    fn test_player_death_does_not_score() {
        let mut state = state();
        park_ship(&mut state);
        let ship_pos = state.spaceship.pos();
        state
            .enemies
            .pool_mut()
            .add(Enemy::new(ship_pos + Vec2::new(4.0, 4.0), 0.0));

        let events = state.sweep_collisions(true);
        assert_eq!(events, vec![GameEvent::PlayerDestroyed { pos: ship_pos }]);
        assert!(!state.player_alive());
        assert_eq!(state.score(), 0);
        assert_eq!(state.explosions.count(), 1);
    }

    #[test]
    fn test_invulnerable_player_survives() {
        let mut state = state();
        park_ship(&mut state);
        let ship_pos = state.spaceship.pos();
        state.enemies.pool_mut().add(Enemy::new(ship_pos, 0.0));

        assert!(state.sweep_collisions(false).is_empty());
        assert!(state.player_alive());
        assert_eq!(state.enemies.pool().count(), 1);
    }

    #[test]
    fn test_enemy_shot_this_frame_cannot_kill_player() {
        let mut state = state();
        park_ship(&mut state);
        let ship_pos = state.spaceship.pos();
        state.enemies.pool_mut().add(Enemy::new(ship_pos, 0.0));
        state.lasers.add(Laser::new(ship_pos + Vec2::new(10.0, 10.0)));

        let events = state.sweep_collisions(true);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], GameEvent::EnemyDestroyed { .. }));
        assert!(state.player_alive());
    }

    #[test]
    fn test_fire_rate_and_reset() {
        // 10 lasers/s = 100 ms
        let mut state = state();
        let input = FrameInput {
            cursor: Vec2::new(320.0, 400.0),
            fire: true,
            quit: false,
        };
        let step = Duration::from_millis(60);
        assert_eq!(state.update_player(step, &input), None);
        let fired = state.update_player(step, &input);
        assert_eq!(
            fired,
            Some(GameEvent::LaserFired {
                pos: Vec2::new(318.0, 368.0)
            })
        );
        assert_eq!(state.lasers.count(), 1);
        assert_eq!(state.update_player(step, &input), None);
    }

    #[test]
    fn test_no_fire_without_trigger_or_rate() {
        let mut state = state();
        let input = FrameInput {
            cursor: Vec2::new(320.0, 400.0),
            ..Default::default()
        };
        assert_eq!(state.update_player(Duration::from_secs(1), &input), None);

        let mut settings = quiet_settings();
        settings.num_of_lasers_per_second = 0.0;
        let mut state = GameState::new(1, &settings, Viewport::default());
        let input = FrameInput {
            fire: true,
            ..input
        };
        assert_eq!(state.update_player(Duration::from_secs(1), &input), None);
        assert!(state.lasers.is_empty());
    }

    #[test]
    fn test_clear_hostiles_freezes_enemy_spawning() {
        let settings = Settings {
            num_of_enemies_per_second: 100.0,
            ..Default::default()
        };
        let mut state = GameState::new(7, &settings, Viewport::default());
        state.advance_pools(Duration::from_millis(20));
        assert_eq!(state.enemies.pool().count(), 1);

        state.clear_hostiles();
        state.clear_hostiles();
        state.advance_pools(Duration::from_millis(20));
        assert_eq!(state.enemies.pool().count(), 0);
        assert!(!state.enemies.is_active());
        // Decorations keep going
        assert!(state.stars.is_active());
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let settings = Settings {
            num_of_enemies_per_second: 20.0,
            ..Default::default()
        };
        let mut a = GameState::new(99, &settings, Viewport::default());
        let mut b = GameState::new(99, &settings, Viewport::default());
        for _ in 0..60 {
            a.advance_pools(DT);
            b.advance_pools(DT);
        }
        let pa: Vec<Vec2> = a.enemies.pool().sprites().map(|e| e.pos()).collect();
        let pb: Vec<Vec2> = b.enemies.pool().sprites().map(|e| e.pos()).collect();
        assert!(!pa.is_empty());
        assert_eq!(pa, pb);
    }

    proptest! {
        #[test]
        fn prop_score_is_ten_per_destroyed_enemy(
            enemies in proptest::collection::vec((0.0f32..600.0, 0.0f32..300.0), 0..12),
            lasers in proptest::collection::vec((0.0f32..600.0, 0.0f32..300.0), 0..12),
        ) {
            let mut state = state();
            park_ship(&mut state);
            for (x, y) in &enemies {
                state.enemies.pool_mut().add(Enemy::with_size(Vec2::new(*x, *y), Vec2::new(40.0, 40.0), 0.0));
            }
            for (x, y) in &lasers {
                state.lasers.add(Laser::new(Vec2::new(*x, *y)));
            }

            let events = state.sweep_collisions(false);
            let kills = events
                .iter()
                .filter(|e| matches!(e, GameEvent::EnemyDestroyed { .. }))
                .count();

            prop_assert_eq!(state.score(), kills as u64 * SCORE_PER_KILL);
            prop_assert_eq!(state.enemies.pool().count(), enemies.len() - kills);
            prop_assert_eq!(state.lasers.count(), lasers.len() - kills);
            prop_assert!(kills <= enemies.len().min(lasers.len()));

            // A second sweep over the same frame never decreases or double counts
            let before = state.score();
            state.sweep_collisions(false);
            prop_assert!(state.score() >= before);
        }
    }
}
