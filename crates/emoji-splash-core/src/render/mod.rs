//! Per-frame render pass

pub mod canvas;
pub mod count;
pub mod frame;

pub use canvas::{Canvas, DrawList, GlyphSprite};
pub use count::CountReporter;
pub use frame::{FramePass, FrameReport, collect_fallen};
