//! Shared value types for the simulation core

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// How the scene treats the bottom edge of the viewport
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisplayMode {
    /// Entities pile up on a floor and persist
    #[default]
    Accumulate,
    /// No floor; entities fall through and are reclaimed once off-screen
    Rain,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 2] = [DisplayMode::Accumulate, DisplayMode::Rain];

    /// Whether the boundary set for this mode includes a floor
    pub fn has_floor(self) -> bool {
        matches!(self, DisplayMode::Accumulate)
    }

    /// Whether fallen entities are garbage-collected each frame
    pub fn collects_fallen(self) -> bool {
        matches!(self, DisplayMode::Rain)
    }

    pub fn label(self) -> &'static str {
        match self {
            DisplayMode::Accumulate => "Pile",
            DisplayMode::Rain => "Rain",
        }
    }
}

/// Coarse classification of a body in the world
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// Static wall, floor or ceiling
    Boundary,
    /// Dynamic circular emoji
    Entity,
}

/// Size of the drawing surface in logical pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}
