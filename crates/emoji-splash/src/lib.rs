//! # Emoji Splash
//!
//! Desktop shell around [`emoji_splash_core`]: a winit window with a wgpu
//! surface, an egui layer that paints the glyphs and hosts the control bar,
//! layered configuration and a headless runner.

pub mod app;
pub mod config;
pub mod headless;
pub mod render;
pub mod ui;

pub use app::App;
pub use config::AppConfig;
