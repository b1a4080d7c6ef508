//! Drawing surface abstraction
//!
//! The render pass only ever clears the surface and draws rotated glyphs, so
//! that is all a [`Canvas`] has to offer. The shell paints a [`DrawList`] with
//! egui; tests inspect it directly.

use glam::Vec2;

/// One glyph to draw, centered on a body
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphSprite {
    pub glyph: &'static str,
    /// Body center in pixels
    pub center: Vec2,
    /// Rotation in radians around `center`
    pub angle: f32,
    /// Font size in pixels (twice the body radius)
    pub size: f32,
    /// Downward nudge in the rotated frame to visually center the glyph
    pub baseline_offset: f32,
}

impl GlyphSprite {
    /// Sprite for a body of `radius` at `center`
    pub fn for_body(glyph: &'static str, center: Vec2, angle: f32, radius: f32) -> Self {
        Self {
            glyph,
            center,
            angle,
            size: radius * 2.0,
            baseline_offset: radius * 0.15,
        }
    }
}

/// Something the render pass can draw into
pub trait Canvas {
    /// Erase everything drawn so far
    fn clear(&mut self);

    /// Draw one glyph
    fn draw_glyph(&mut self, sprite: GlyphSprite);
}

/// Canvas that keeps the sprites of the current frame
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    sprites: Vec<GlyphSprite>,
    clears: u64,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sprites(&self) -> &[GlyphSprite] {
        &self.sprites
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// How many times the list has been cleared
    pub fn clears(&self) -> u64 {
        self.clears
    }
}

impl Canvas for DrawList {
    fn clear(&mut self) {
        self.sprites.clear();
        self.clears += 1;
    }

    fn draw_glyph(&mut self, sprite: GlyphSprite) {
        self.sprites.push(sprite);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_size_is_diameter() {
        let sprite = GlyphSprite::for_body("🐼", Vec2::new(1.0, 2.0), 0.5, 20.0);
        assert_eq!(sprite.size, 40.0);
        assert_eq!(sprite.baseline_offset, 3.0);
    }

    #[test]
    fn test_clear_empties_draw_list() {
        let mut list = DrawList::new();
        list.draw_glyph(GlyphSprite::for_body("🐼", Vec2::ZERO, 0.0, 10.0));
        assert_eq!(list.len(), 1);

        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.clears(), 1);
    }
}
