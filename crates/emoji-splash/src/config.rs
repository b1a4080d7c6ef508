//! Shell configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `config.ron` file (if exists)
//! 3. Environment variables prefixed with `EMOJI_SPLASH_`
//!
//! Example environment variable: `EMOJI_SPLASH_PHYSICS__MAX_SIZE=60`

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use emoji_splash_core::{DisplayMode, EmojiCategory, PhysicsConfig, SessionSettings};

/// Top-level shell configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub physics: PhysicsConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

/// Window settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Initial window width in logical pixels
    pub width: u32,
    /// Initial window height in logical pixels
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Emoji Splash".to_string(),
        }
    }
}

/// Initial state of a mounted session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub category: EmojiCategory,
    pub mode: DisplayMode,
    /// Fixed RNG seed; random when absent
    pub seed: Option<u64>,
}

impl AppConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `config.ron` file (if exists)
    /// 3. Environment variables prefixed with `EMOJI_SPLASH_` (highest priority)
    pub fn load() -> Result<Self> {
        let builder = Config::builder()
            // Layer 1: Compiled defaults (physics falls back to PhysicsConfig::default)
            .set_default("window.width", 1280_i64)?
            .set_default("window.height", 720_i64)?
            .set_default("window.title", "Emoji Splash")?
            .set_default("session.category", "RANDOM")?
            .set_default("session.mode", "ACCUMULATE")?
            // Layer 2: Config file (optional, won't error if missing)
            .add_source(
                File::with_name("config")
                    .format(config::FileFormat::Ron)
                    .required(false),
            )
            // Layer 3: Environment variables (EMOJI_SPLASH_WINDOW__WIDTH, etc.)
            .add_source(
                Environment::with_prefix("EMOJI_SPLASH")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let config = builder.build().context("Failed to build configuration")?;

        let app: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        app.physics
            .validate()
            .context("Invalid physics configuration")?;

        Ok(app)
    }

    /// Settings a freshly mounted session starts with
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            category: self.session.category,
            mode: self.session.mode,
            ..SessionSettings::for_config(&self.physics)
        }
    }
}
