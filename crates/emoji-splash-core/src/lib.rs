//! # Emoji Splash Core
//!
//! The simulation-and-render core of Emoji Splash: a 2D rigid-body world of
//! circular emoji bodies, the boundary walls that contain them, spawning,
//! shaking and clearing, the per-frame render pass and the pointer protocol
//! that decides between grabbing an existing body and spawning new ones.
//!
//! Nothing in this crate touches a window or a GPU. The desktop shell drives a
//! [`Session`] with elapsed time, pointer events and [`Command`]s, and paints
//! whatever the session draws into a [`render::Canvas`].

pub mod commands;
pub mod config;
pub mod glyphs;
pub mod input;
pub mod render;
pub mod session;
pub mod types;
pub mod world;

pub use commands::{Command, CommandSender, EdgeTrigger};
pub use config::{ConfigError, PhysicsConfig};
pub use glyphs::EmojiCategory;
pub use session::{Session, SessionSettings, TeardownReport};
pub use types::{BodyKind, DisplayMode, Viewport};

/// Common imports for internal use
pub mod prelude {
    pub use crate::config::PhysicsConfig;
    pub use crate::glyphs::EmojiCategory;
    pub use crate::types::{BodyKind, DisplayMode, Viewport};
    pub use crate::world::{BodyHandle, BodyTag, PhysicsWorld};
    pub use glam::Vec2;
}
