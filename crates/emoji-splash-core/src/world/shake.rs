//! One-shot random impulse applied to every dynamic body

use glam::Vec2;
use rand::Rng;

use super::physics_world::PhysicsWorld;
use crate::config::PhysicsConfig;

/// Random direction of one shake impulse, before scaling
///
/// Horizontal is uniform in `[-0.5, 0.5]`; vertical is uniform in
/// `[-1.5, 0.5]`, so three quarters of the range pushes upward (`-y`).
pub fn shake_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    Vec2::new(rng.gen_range(-0.5..=0.5), rng.gen_range(-1.5..=0.5))
}

/// Kick every non-static body once
///
/// The impulse is proportional to each body's mass, so every body gets the
/// same distribution of velocity change regardless of size. Returns the number
/// of bodies kicked.
pub fn shake<R: Rng + ?Sized>(
    world: &mut PhysicsWorld,
    config: &PhysicsConfig,
    rng: &mut R,
) -> usize {
    let scale = config.shake_velocity_scale();
    let targets: Vec<_> = world
        .bodies()
        .filter(|view| !view.is_static)
        .filter_map(|view| view.entity().map(|entity| (view.handle, entity.mass)))
        .collect();

    let mut kicked = 0;
    for (handle, mass) in targets {
        let mut direction = shake_direction(rng);
        if direction == Vec2::ZERO {
            direction = Vec2::NEG_Y;
        }
        if world.apply_impulse(handle, direction * scale * mass) {
            kicked += 1;
        }
    }

    log::debug!("Shake: kicked {} bodies", kicked);
    kicked
}
