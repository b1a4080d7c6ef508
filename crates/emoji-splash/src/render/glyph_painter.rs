//! Paints the frame's glyph sprites with egui text shapes

use egui::emath::Rot2;
use egui::epaint::TextShape;
use egui::{Color32, FontId, LayerId, Order, Pos2, Vec2};

use emoji_splash_core::render::{DrawList, GlyphSprite};

const GLYPH_COLOR: Color32 = Color32::BLACK;

/// Top-left corner of a rotated text galley of `galley_size` so that its center
/// lands on the sprite's center, nudged down by the baseline offset
pub fn sprite_origin(sprite: &GlyphSprite, galley_size: Vec2) -> Pos2 {
    let rot = Rot2::from_angle(sprite.angle);
    let local = Vec2::new(0.0, sprite.baseline_offset) - galley_size * 0.5;
    Pos2::new(sprite.center.x, sprite.center.y) + rot * local
}

/// Draw every sprite behind the control bar
pub fn paint_glyphs(ctx: &egui::Context, sprites: &DrawList) {
    let painter = ctx.layer_painter(LayerId::new(Order::Background, egui::Id::new("glyphs")));

    for sprite in sprites.sprites() {
        let galley = painter.layout_no_wrap(
            sprite.glyph.to_string(),
            FontId::proportional(sprite.size),
            GLYPH_COLOR,
        );
        let origin = sprite_origin(sprite, galley.size());
        painter.add(TextShape::new(origin, galley, GLYPH_COLOR).with_angle(sprite.angle));
    }
}
