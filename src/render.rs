//! Render collaborator interface
//!
//! The host owns textures, fonts and the actual drawing. The simulation only
//! names what to draw and where.

use glam::Vec2;

use crate::error::FrameError;

/// Texture handles owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureId {
    Spaceship,
    Laser,
    Enemy,
    Explosions,
    Background,
    Star,
}

/// Font handles owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontId {
    Message,
    Score,
}

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
}

/// Source rectangle within a texture (sprite sheet cell)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Drawing surface provided by the host
pub trait Renderer {
    /// Draw a texture (or one cell of it) with its top-left corner at `pos`
    fn draw_sprite(
        &mut self,
        texture: TextureId,
        pos: Vec2,
        frame: Option<FrameRect>,
    ) -> Result<(), FrameError>;

    /// Draw a string with its top-left corner at `pos`
    fn draw_text(
        &mut self,
        font: FontId,
        text: &str,
        pos: Vec2,
        color: Color,
    ) -> Result<(), FrameError>;

    /// Size of `text` when drawn with `font`.
    ///
    /// Defaults to a monospace estimate for hosts without font metrics.
    fn measure_text(&self, font: FontId, text: &str) -> Vec2 {
        let (w, h) = match font {
            FontId::Message => (7.0, 12.0),
            FontId::Score => (14.0, 24.0),
        };
        Vec2::new(text.chars().count() as f32 * w, h)
    }
}

/// A sprite draw call captured by [`RecordingRenderer`]
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteCall {
    pub texture: TextureId,
    pub pos: Vec2,
    pub frame: Option<FrameRect>,
}

/// A text draw call captured by [`RecordingRenderer`]
#[derive(Debug, Clone, PartialEq)]
pub struct TextCall {
    pub font: FontId,
    pub text: String,
    pub pos: Vec2,
    pub color: Color,
}

/// Renderer that records every call instead of drawing (headless runs and tests)
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub sprites: Vec<SpriteCall>,
    pub texts: Vec<TextCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame's calls
    pub fn clear(&mut self) {
        self.sprites.clear();
        self.texts.clear();
    }

    /// Number of sprites drawn with `texture`
    pub fn count(&self, texture: TextureId) -> usize {
        self.sprites.iter().filter(|s| s.texture == texture).count()
    }

    /// Draw order of textures, deduplicated into consecutive runs
    pub fn texture_layers(&self) -> Vec<TextureId> {
        let mut layers: Vec<TextureId> = Vec::new();
        for call in &self.sprites {
            if layers.last() != Some(&call.texture) {
                layers.push(call.texture);
            }
        }
        layers
    }

    /// Whether any text call contains `needle`
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.text.contains(needle))
    }
}

impl Renderer for RecordingRenderer {
    fn draw_sprite(
        &mut self,
        texture: TextureId,
        pos: Vec2,
        frame: Option<FrameRect>,
    ) -> Result<(), FrameError> {
        self.sprites.push(SpriteCall {
            texture,
            pos,
            frame,
        });
        Ok(())
    }

    fn draw_text(
        &mut self,
        font: FontId,
        text: &str,
        pos: Vec2,
        color: Color,
    ) -> Result<(), FrameError> {
        self.texts.push(TextCall {
            font,
            text: text.to_string(),
            pos,
            color,
        });
        Ok(())
    }
}
