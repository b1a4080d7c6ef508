//! Physics and interaction constants
//!
//! Every fixed number the core uses lives in [`PhysicsConfig`] so the shell can
//! layer it from a config file or the environment. Velocities and the shake
//! coefficient are expressed per simulation tick, the native unit of the
//! solver loop; the helpers below convert them to per-second values.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected configuration values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("entity size range is invalid: min_size={min} max_size={max}")]
    InvalidSizeRange { min: f32, max: f32 },

    #[error("tick_rate_hz must be greater than zero")]
    ZeroTickRate,

    #[error("spawn_interval_ms must be greater than zero")]
    ZeroSpawnInterval,

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
}

/// Constants of the simulation-and-render core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Smallest entity radius in pixels
    pub min_size: f32,
    /// Largest entity radius in pixels
    pub max_size: f32,
    /// Entity bounciness
    pub restitution: f32,
    /// Entity surface friction
    pub friction: f32,
    /// Entity density (mass = density * pi * r^2)
    pub entity_density: f32,
    /// Thickness of every boundary body in pixels
    pub wall_thickness: f32,
    /// Side walls are `viewport height * factor` tall
    pub side_wall_height_factor: f32,
    /// Extra width of ceiling and floor beyond the viewport, in pixels
    pub horizontal_overscan: f32,
    /// Downward acceleration at gravity scale 1, in pixels/sec^2
    pub gravity_acceleration: f32,
    /// Scale restored when gravity is toggled back on
    pub default_gravity_scale: f32,
    /// Initial velocity components are uniform in `[-x, x]` pixels per tick
    pub spawn_speed_half_range: f32,
    /// Fixed simulation clock rate
    pub tick_rate_hz: u32,
    /// Most solver steps run for one `advance` before excess time is dropped
    pub max_catch_up_steps: u32,
    /// Period of the repeating spawn while the pointer is held
    pub spawn_interval_ms: u64,
    /// Repeated spawns land within `+-spawn_jitter` pixels of the pointer
    pub spawn_jitter: f32,
    /// Normal stiffness of the drag/grab constraint (0 disables pulling)
    pub grab_stiffness: f32,
    /// RAIN mode removes entities this far below the viewport
    pub offscreen_margin: f32,
    /// Shake impulse per unit mass, in force units of the per-tick solver
    pub shake_coefficient: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            min_size: 20.0,
            max_size: 45.0,
            restitution: 0.6,
            friction: 0.1,
            entity_density: 1.0,
            wall_thickness: 100.0,
            side_wall_height_factor: 5.0,
            horizontal_overscan: 200.0,
            gravity_acceleration: 1000.0,
            default_gravity_scale: 1.0,
            spawn_speed_half_range: 7.5,
            tick_rate_hz: 60,
            max_catch_up_steps: 5,
            spawn_interval_ms: 100,
            spawn_jitter: 20.0,
            grab_stiffness: 0.2,
            offscreen_margin: 100.0,
            shake_coefficient: 0.05,
        }
    }
}

impl PhysicsConfig {
    /// Check the values for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_size > 0.0 && self.min_size <= self.max_size) {
            return Err(ConfigError::InvalidSizeRange {
                min: self.min_size,
                max: self.max_size,
            });
        }
        if self.tick_rate_hz == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if self.spawn_interval_ms == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }

        let non_negative = [
            ("restitution", self.restitution),
            ("friction", self.friction),
            ("entity_density", self.entity_density),
            ("wall_thickness", self.wall_thickness),
            ("spawn_speed_half_range", self.spawn_speed_half_range),
            ("spawn_jitter", self.spawn_jitter),
            ("grab_stiffness", self.grab_stiffness),
            ("offscreen_margin", self.offscreen_margin),
            ("shake_coefficient", self.shake_coefficient),
            ("default_gravity_scale", self.default_gravity_scale),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        Ok(())
    }

    /// Length of one simulation tick
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate_hz.max(1) as f64)
    }

    /// Length of one simulation tick in seconds
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.tick_rate_hz.max(1) as f32
    }

    /// Period of the repeating spawn timer
    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    /// Largest initial velocity component in pixels/sec
    pub fn spawn_speed_limit(&self) -> f32 {
        self.spawn_speed_half_range * self.tick_rate_hz as f32
    }

    /// Velocity change (pixels/sec) produced by one unit of shake direction
    ///
    /// A force `F = c * m` held for one tick of `dt` milliseconds moves a body
    /// by `c * dt^2` pixels per tick, which is `c * dt^2 * rate` pixels/sec.
    pub fn shake_velocity_scale(&self) -> f32 {
        let tick_ms = 1000.0 * self.tick_seconds();
        self.shake_coefficient * tick_ms * tick_ms * self.tick_rate_hz as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PhysicsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.spawn_interval(), Duration::from_millis(100));
        assert_eq!(config.spawn_speed_limit(), 450.0);
    }

    #[test]
    fn test_inverted_size_range_rejected() {
        let config = PhysicsConfig {
            min_size: 50.0,
            max_size: 10.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidSizeRange {
                min: 50.0,
                max: 10.0
            })
        );
    }

    #[test]
    fn test_zero_rates_rejected() {
        let config = PhysicsConfig {
            tick_rate_hz: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickRate));

        let config = PhysicsConfig {
            spawn_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroSpawnInterval));
    }

    #[test]
    fn test_negative_stiffness_rejected() {
        let config = PhysicsConfig {
            grab_stiffness: -0.2,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "grab_stiffness",
                ..
            })
        ));
    }

    #[test]
    fn test_shake_scale_matches_per_tick_units() {
        let config = PhysicsConfig::default();
        // 0.05 * (1000/60)^2 * 60
        let expected = 0.05 * (1000.0f32 / 60.0).powi(2) * 60.0;
        assert!((config.shake_velocity_scale() - expected).abs() < 0.01);
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let config: PhysicsConfig = ron::from_str("(min_size: 10.0, tick_rate_hz: 120)")
            .expect("partial config should deserialize");
        assert_eq!(config.min_size, 10.0);
        assert_eq!(config.tick_rate_hz, 120);
        assert_eq!(config.max_size, 45.0);
        assert_eq!(config.grab_stiffness, 0.2);
    }
}
