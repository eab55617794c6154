//! Input collaborator interface
//!
//! Polled once per frame by the host loop.

use glam::Vec2;

/// Input snapshot for a single frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Pointer position in viewport pixels
    pub cursor: Vec2,
    /// Primary action (fire) held
    pub fire: bool,
    /// Quit requested (escape / back button)
    pub quit: bool,
}

/// Source of per-frame input snapshots
pub trait InputSource {
    fn poll(&mut self) -> FrameInput;
}

/// Replays a fixed sequence of snapshots, then repeats the last one
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: Vec<FrameInput>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(frames: Vec<FrameInput>) -> Self {
        Self { frames, cursor: 0 }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> FrameInput {
        let input = self
            .frames
            .get(self.cursor)
            .or_else(|| self.frames.last())
            .cloned()
            .unwrap_or_default();
        self.cursor = (self.cursor + 1).min(self.frames.len());
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_input_repeats_last() {
        let mut input = ScriptedInput::new(vec![
            FrameInput::default(),
            FrameInput {
                fire: true,
                ..Default::default()
            },
        ]);
        assert!(!input.poll().fire);
        assert!(input.poll().fire);
        assert!(input.poll().fire);
    }

    #[test]
    fn test_empty_script_yields_default() {
        let mut input = ScriptedInput::default();
        assert_eq!(input.poll(), FrameInput::default());
    }
}
