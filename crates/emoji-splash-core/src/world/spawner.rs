//! Spawning of emoji entities with randomized properties

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::physics_world::{BodyHandle, EntitySpec, PhysicsWorld};
use crate::config::PhysicsConfig;
use crate::glyphs::EmojiCategory;

/// Roll the randomized properties of a new entity at `position`
///
/// - glyph: uniform over the category's set (the combined set for `Random`)
/// - radius: uniform in `[min_size, max_size]`
/// - angle: uniform in `[0, 2pi)`
/// - velocity: each component uniform in `[-half_range, half_range]` px/tick
pub fn roll_entity<R: Rng + ?Sized>(
    category: EmojiCategory,
    position: Vec2,
    config: &PhysicsConfig,
    rng: &mut R,
) -> EntitySpec {
    let glyph = category.pick(rng);
    let radius = rng.gen_range(config.min_size..=config.max_size);
    let angle = rng.gen_range(0.0..TAU);

    let limit = config.spawn_speed_limit();
    let velocity = if limit > 0.0 {
        Vec2::new(rng.gen_range(-limit..=limit), rng.gen_range(-limit..=limit))
    } else {
        Vec2::ZERO
    };

    EntitySpec {
        glyph,
        position,
        radius,
        angle,
        velocity,
    }
}

/// Create a new entity at `position` and insert it into the world
pub fn spawn<R: Rng + ?Sized>(
    world: &mut PhysicsWorld,
    category: EmojiCategory,
    position: Vec2,
    config: &PhysicsConfig,
    rng: &mut R,
) -> BodyHandle {
    let spec = roll_entity(category, position, config, rng);
    world.insert_entity(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn test_rolled_properties_within_bounds() {
        let config = PhysicsConfig::default();
        let mut rng = Xoshiro256StarStar::seed_from_u64(12345);
        let limit = config.spawn_speed_limit();

        for _ in 0..500 {
            let spec = roll_entity(EmojiCategory::Food, Vec2::new(5.0, 6.0), &config, &mut rng);
            assert!(spec.radius >= config.min_size && spec.radius <= config.max_size);
            assert!(spec.angle >= 0.0 && spec.angle < TAU);
            assert!(spec.velocity.x.abs() <= limit);
            assert!(spec.velocity.y.abs() <= limit);
            assert!(EmojiCategory::Food.contains(spec.glyph));
            assert_eq!(spec.position, Vec2::new(5.0, 6.0));
        }
    }

    #[test]
    fn test_fixed_size_range_is_allowed() {
        let config = PhysicsConfig {
            min_size: 30.0,
            max_size: 30.0,
            ..Default::default()
        };
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);
        let spec = roll_entity(EmojiCategory::Random, Vec2::ZERO, &config, &mut rng);
        assert_eq!(spec.radius, 30.0);
    }

    #[test]
    fn test_spawn_inserts_entity_at_position() {
        let config = PhysicsConfig::default();
        let mut world = PhysicsWorld::new(&config);
        let mut rng = Xoshiro256StarStar::seed_from_u64(3);

        let handle = spawn(
            &mut world,
            EmojiCategory::Faces,
            Vec2::new(100.0, 100.0),
            &config,
            &mut rng,
        );

        let view = world.body(handle).unwrap();
        assert_eq!(view.position, Vec2::new(100.0, 100.0));
        assert!(!view.is_static);
        let entity = view.entity().unwrap();
        assert!(EmojiCategory::Faces.contains(entity.glyph));
        assert_eq!(world.entity_count(), 1);
    }

    #[test]
    fn test_same_seed_same_entity() {
        let config = PhysicsConfig::default();
        let mut a = Xoshiro256StarStar::seed_from_u64(42);
        let mut b = Xoshiro256StarStar::seed_from_u64(42);
        assert_eq!(
            roll_entity(EmojiCategory::Random, Vec2::ZERO, &config, &mut a),
            roll_entity(EmojiCategory::Random, Vec2::ZERO, &config, &mut b)
        );
    }
}
