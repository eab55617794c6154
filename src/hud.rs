//! HUD text: score readout, FPS counter and the diagnostics overlay

use std::collections::VecDeque;
use std::time::Duration;

use glam::Vec2;

use crate::Viewport;
use crate::error::FrameError;
use crate::render::{Color, FontId, Renderer};
use crate::sim::{Entity, GameState};

/// Number of frame samples averaged for the FPS readout
pub const FPS_SAMPLES: usize = 100;

/// Rolling average frames-per-second
#[derive(Debug, Clone, Default)]
pub struct FrameCounter {
    samples: VecDeque<f32>,
    total_frames: u64,
}

impl FrameCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame that took `dt`
    pub fn update(&mut self, dt: Duration) {
        let secs = dt.as_secs_f32();
        if secs <= 0.0 {
            return;
        }
        if self.samples.len() == FPS_SAMPLES {
            self.samples.pop_front();
        }
        self.samples.push_back(1.0 / secs);
        self.total_frames += 1;
    }

    pub fn average_fps(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f32>() / self.samples.len() as f32
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }
}

/// "Score: 0000120"
pub fn score_text(score: u64) -> String {
    format!("Score: {:07}", score)
}

/// Diagnostics overlay lines, top to bottom
pub fn debug_lines(state: &GameState, fps: f32) -> Vec<String> {
    let ship = state.spaceship.pos();
    vec![
        format!("FPS: {:.1}", fps),
        format!("[Spacecraft] X = {}, Y = {}", ship.x, ship.y),
        format!("[Laser Pool] Count = {}", state.lasers.count()),
        format!("[Enemy Pool] Count = {}", state.enemies.pool().count()),
        format!("[Expln Pool] Count = {}", state.explosions.count()),
        format!(
            "[ Viewport ] Width = {}, Height = {}",
            state.viewport.width, state.viewport.height
        ),
        format!("[ GameTime ] Total = {:?}", state.time),
    ]
}

/// Score in the top-right corner
pub fn draw_score(
    renderer: &mut dyn Renderer,
    viewport: &Viewport,
    score: u64,
) -> Result<(), FrameError> {
    let text = score_text(score);
    let size = renderer.measure_text(FontId::Score, &text);
    let pos = Vec2::new(viewport.width - size.x - 20.0, 5.0);
    renderer.draw_text(FontId::Score, &text, pos, Color::YELLOW)
}

/// Diagnostics overlay in the top-left corner
pub fn draw_debug(renderer: &mut dyn Renderer, lines: &[String]) -> Result<(), FrameError> {
    for (i, line) in lines.iter().enumerate() {
        let pos = Vec2::new(1.0, 1.0 + i as f32 * 15.0);
        renderer.draw_text(FontId::Message, line, pos, Color::YELLOW)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_text_padding() {
        assert_eq!(score_text(0), "Score: 0000000");
        assert_eq!(score_text(120), "Score: 0000120");
        assert_eq!(score_text(123_456_789), "Score: 123456789");
    }

    #[test]
    fn test_frame_counter_average() {
        let mut counter = FrameCounter::new();
        assert_eq!(counter.average_fps(), 0.0);
        counter.update(Duration::from_millis(10));
        counter.update(Duration::from_millis(20));
        assert!((counter.average_fps() - 75.0).abs() < 0.01);
        counter.update(Duration::ZERO);
        assert_eq!(counter.total_frames(), 2);
    }

    #[test]
    fn test_frame_counter_window() {
        let mut counter = FrameCounter::new();
        for _ in 0..FPS_SAMPLES {
            counter.update(Duration::from_millis(100));
        }
        for _ in 0..FPS_SAMPLES {
            counter.update(Duration::from_millis(10));
        }
        assert!((counter.average_fps() - 100.0).abs() < 0.1);
    }

    #[test]
    fn test_score_drawn_top_right() {
        use crate::render::RecordingRenderer;
        let mut renderer = RecordingRenderer::new();
        draw_score(&mut renderer, &Viewport::new(400.0, 300.0), 10).unwrap();
        let call = &renderer.texts[0];
        assert_eq!(call.text, "Score: 0000010");
        // 14 chars * 14 px
        assert_eq!(call.pos, Vec2::new(400.0 - 196.0 - 20.0, 5.0));
        assert_eq!(call.color, Color::YELLOW);
    }
}
