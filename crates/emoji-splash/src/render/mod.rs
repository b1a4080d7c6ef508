//! Rendering for the desktop shell

mod glyph_painter;
mod renderer;

pub use glyph_painter::{paint_glyphs, sprite_origin};
pub use renderer::Renderer;
