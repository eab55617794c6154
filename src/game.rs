//! Frame driver
//!
//! Owns the simulation, the audio channels and the game-over scene, and runs
//! one frame in a fixed order:
//! 1. scroll the background
//! 2. move the ship and fire
//! 3. laser/enemy sweep, then enemy/player sweep (only if game over is enabled)
//! 4. game-over scene
//! 5. spawners and pools
//!
//! Rendering happens afterwards in `draw`, back to front.

use std::time::Duration;

use crate::Viewport;
use crate::audio::{AudioBackend, AudioManager, SoundEffect};
use crate::clock::FixedTimestep;
use crate::error::{FrameError, ReleaseError};
use crate::hud::{self, FrameCounter};
use crate::input::{FrameInput, InputSource};
use crate::render::Renderer;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameOverScene, GameState, ScenePhase};

/// Whether the host loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// Everything the game-over cleanup touches
pub struct Stage<A> {
    pub state: GameState,
    pub audio: AudioManager<A>,
}

impl<A: AudioBackend> Stage<A> {
    /// Clear hostile pools, stop enemy spawning and release sound channels.
    ///
    /// Every step runs even if an earlier release fails; the first failure is
    /// returned.
    pub fn game_over_cleanup(&mut self) -> Result<(), ReleaseError> {
        self.state.clear_hostiles();

        let mut result = Ok(());
        for effect in [SoundEffect::Explosion, SoundEffect::Laser, SoundEffect::Music] {
            if let Err(e) = self.audio.release(effect) {
                result = result.and(Err(e));
            }
        }
        result
    }
}

fn sound_for(event: &GameEvent) -> SoundEffect {
    match event {
        GameEvent::LaserFired { .. } => SoundEffect::Laser,
        GameEvent::EnemyDestroyed { .. } | GameEvent::PlayerDestroyed { .. } => {
            SoundEffect::Explosion
        }
    }
}

pub struct Game<A: AudioBackend> {
    stage: Stage<A>,
    scene: GameOverScene<Stage<A>>,
    settings: Settings,
    frame_counter: FrameCounter,
    shut_down: bool,
}

impl<A: AudioBackend + 'static> Game<A> {
    /// Build the scene and start the background music
    pub fn new(
        settings: Settings,
        viewport: Viewport,
        seed: u64,
        backend: A,
    ) -> Result<Self, FrameError> {
        let state = GameState::new(seed, &settings, viewport);
        let mut audio =
            AudioManager::new(backend).with_music_asset(settings.bgm_sound_effect.clone());
        audio.play_music()?;

        let scene = GameOverScene::new(
            |stage: &Stage<A>| !stage.state.player_alive(),
            |stage: &mut Stage<A>| stage.game_over_cleanup(),
        )
        .with_enabled(!settings.live_forever);

        log::info!(
            "Game initialized with seed: {} ({}x{}, game over {})",
            seed,
            viewport.width,
            viewport.height,
            if scene.is_enabled() { "enabled" } else { "disabled" }
        );

        Ok(Self {
            stage: Stage { state, audio },
            scene,
            settings,
            frame_counter: FrameCounter::new(),
            shut_down: false,
        })
    }

    /// Advance one simulation frame by `dt`
    pub fn update(&mut self, dt: Duration, input: &FrameInput) -> Result<LoopControl, FrameError> {
        if input.quit {
            return Ok(LoopControl::Quit);
        }
        let state = &mut self.stage.state;

        state.advance_background(dt);

        let mut events: Vec<GameEvent> = state.update_player(dt, input).into_iter().collect();
        events.extend(state.sweep_collisions(self.scene.is_enabled()));

        // Sounds are requested before the scene can release their channels
        let audio_result = self.play_events(&events);

        if self.scene.update(&mut self.stage) {
            log::info!("Final score: {}", self.stage.state.score());
        }

        self.stage.state.advance_pools(dt);

        audio_result?;
        Ok(LoopControl::Continue)
    }

    fn play_events(&mut self, events: &[GameEvent]) -> Result<(), FrameError> {
        let mut result = Ok(());
        for event in events {
            if let Err(e) = self.stage.audio.play(sound_for(event)) {
                log::warn!("Sound request failed: {e}");
                result = result.and(Err(e));
            }
        }
        result
    }

    /// Render the frame back to front, then the overlay and HUD text
    pub fn draw(&mut self, dt: Duration, renderer: &mut dyn Renderer) -> Result<(), FrameError> {
        self.frame_counter.update(dt);
        let state = &self.stage.state;

        state.draw(renderer)?;
        self.scene.draw(renderer, &state.viewport)?;
        hud::draw_score(renderer, &state.viewport, state.score())?;

        if self.settings.show_debug_info {
            let lines = hud::debug_lines(state, self.frame_counter.average_fps());
            hud::draw_debug(renderer, &lines)?;
        }
        Ok(())
    }

    /// One host frame: poll input once, run the fixed steps owed, draw once
    pub fn run_frame(
        &mut self,
        clock: &mut FixedTimestep,
        frame_dt: Duration,
        input: &mut dyn InputSource,
        renderer: &mut dyn Renderer,
    ) -> Result<LoopControl, FrameError> {
        let input = input.poll();
        if input.quit {
            return Ok(LoopControl::Quit);
        }
        for _ in 0..clock.advance(frame_dt) {
            if self.update(clock.step(), &input)? == LoopControl::Quit {
                return Ok(LoopControl::Quit);
            }
        }
        self.draw(frame_dt, renderer)?;
        Ok(LoopControl::Continue)
    }

    /// Release every remaining audio resource. Safe to call more than once.
    pub fn shutdown(&mut self) -> usize {
        let released = self.stage.audio.release_all();
        if !self.shut_down {
            log::info!("Shutdown released {} audio resources", released);
            self.shut_down = true;
        }
        released
    }

    pub fn state(&self) -> &GameState {
        &self.stage.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.stage.state
    }

    pub fn audio(&self) -> &AudioManager<A> {
        &self.stage.audio
    }

    pub fn score(&self) -> u64 {
        self.stage.state.score()
    }

    pub fn scene_phase(&self) -> ScenePhase {
        self.scene.phase()
    }

    pub fn is_over(&self) -> bool {
        self.scene.is_over()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn fps(&self) -> f32 {
        self.frame_counter.average_fps()
    }
}
