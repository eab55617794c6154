//! Starwar headless entry point
//!
//! Runs the simulation with a scripted autopilot, a recording renderer and a
//! logging audio backend, then prints a summary.
//!
//! Usage: `starwar [settings.json] [seconds] [seed]`
//!
//! A missing or malformed settings file falls back to the defaults.

use anyhow::{Context, Result};
use glam::Vec2;

use starwar::audio::LogAudio;
use starwar::clock::FixedTimestep;
use starwar::consts::SIM_DT;
use starwar::input::{FrameInput, InputSource};
use starwar::render::RecordingRenderer;
use starwar::sim::{Entity, GameState};
use starwar::{Game, LoopControl, Settings, Viewport};

const DEFAULT_SECONDS: f32 = 30.0;
const DEFAULT_SEED: u64 = 0x5354_4152;

/// Holds the trigger and keeps the ship under the lowest enemy
struct Autopilot {
    input: FrameInput,
    cruise_y: f32,
}

impl Autopilot {
    fn new(viewport: &Viewport) -> Self {
        Self {
            input: FrameInput {
                cursor: Vec2::new(viewport.width / 2.0, viewport.height - 80.0),
                fire: true,
                quit: false,
            },
            cruise_y: viewport.height - 80.0,
        }
    }

    fn observe(&mut self, state: &GameState) {
        let lowest = state
            .enemies
            .pool()
            .sprites()
            .max_by(|a, b| a.pos().y.total_cmp(&b.pos().y));
        if let Some(enemy) = lowest {
            let bounds = enemy.bounds();
            self.input.cursor = Vec2::new(bounds.pos.x + bounds.size.x / 2.0, self.cruise_y);
        }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self) -> FrameInput {
        self.input.clone()
    }
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Starwar (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(&path),
        None => Settings::default(),
    };
    let seconds: f32 = args
        .next()
        .map(|s| s.parse::<f32>())
        .transpose()
        .context("seconds must be a number")?
        .unwrap_or(DEFAULT_SECONDS);
    let seed: u64 = args
        .next()
        .map(|s| s.parse::<u64>())
        .transpose()
        .context("seed must be an unsigned integer")?
        .unwrap_or(DEFAULT_SEED);

    let viewport = Viewport::default();
    let mut game = Game::new(settings, viewport, seed, LogAudio).context("starting game")?;
    let mut clock = FixedTimestep::default();
    let mut autopilot = Autopilot::new(&viewport);
    let mut renderer = RecordingRenderer::new();

    let frames = (seconds.max(0.0) / SIM_DT.as_secs_f32()).round() as u64;
    let mut frames_run = 0u64;
    let mut sprites_drawn = 0usize;
    for _ in 0..frames {
        autopilot.observe(game.state());
        renderer.clear();
        let control = game
            .run_frame(&mut clock, SIM_DT, &mut autopilot, &mut renderer)
            .context("frame failed")?;
        if control == LoopControl::Quit {
            break;
        }
        frames_run += 1;
        sprites_drawn += renderer.sprites.len();
    }

    let released = game.shutdown();
    log::info!(
        "Ran {} frames, {} sprite draws, released {} audio resources",
        frames_run,
        sprites_drawn,
        released
    );
    println!(
        "score={} frames={} game_over={} time={:?}",
        game.score(),
        frames_run,
        game.is_over(),
        game.state().time
    );
    Ok(())
}
