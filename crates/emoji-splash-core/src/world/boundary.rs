//! Boundary walls derived from the viewport and display mode
//!
//! The boundary set is never edited in place. Every resize or mode change
//! removes all boundary bodies and inserts a fresh set, so stale walls can never
//! coexist with new ones. Entities are left untouched.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::physics_world::PhysicsWorld;
use crate::config::PhysicsConfig;
use crate::types::{BodyKind, DisplayMode, Viewport};

/// Which edge of the scene a boundary body guards
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundarySide {
    Left,
    Right,
    Ceiling,
    Floor,
}

/// Placement of one boundary box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryPlacement {
    pub side: BoundarySide,
    pub center: Vec2,
    /// Full width and height of the box
    pub size: Vec2,
}

/// Compute the boundary boxes for a viewport and mode
///
/// Side walls stand just outside the left and right edges and are several
/// viewport heights tall; the ceiling sits two thicknesses above the top edge.
/// Ceiling and floor overhang the viewport horizontally so fast bodies cannot
/// slip through a corner. The floor exists only in [`DisplayMode::Accumulate`].
pub fn boundary_layout(
    viewport: Viewport,
    mode: DisplayMode,
    config: &PhysicsConfig,
) -> Vec<BoundaryPlacement> {
    let Viewport { width, height } = viewport;
    let thickness = config.wall_thickness;
    let wall_height = height * config.side_wall_height_factor;
    let span = width + config.horizontal_overscan;

    let mut placements = vec![
        BoundaryPlacement {
            side: BoundarySide::Left,
            center: Vec2::new(-thickness / 2.0, height / 2.0),
            size: Vec2::new(thickness, wall_height),
        },
        BoundaryPlacement {
            side: BoundarySide::Right,
            center: Vec2::new(width + thickness / 2.0, height / 2.0),
            size: Vec2::new(thickness, wall_height),
        },
        BoundaryPlacement {
            side: BoundarySide::Ceiling,
            center: Vec2::new(width / 2.0, -thickness * 2.0),
            size: Vec2::new(span, thickness),
        },
    ];

    if mode.has_floor() {
        placements.push(BoundaryPlacement {
            side: BoundarySide::Floor,
            center: Vec2::new(width / 2.0, height + thickness / 2.0),
            size: Vec2::new(span, thickness),
        });
    }

    placements
}

/// Replace every boundary body with a freshly computed set
///
/// Returns the number of boundary bodies now in the world.
pub fn rebuild_boundaries(
    world: &mut PhysicsWorld,
    viewport: Viewport,
    mode: DisplayMode,
    config: &PhysicsConfig,
) -> usize {
    let removed = world.remove_kind(BodyKind::Boundary);

    let placements = boundary_layout(viewport, mode, config);
    for placement in &placements {
        world.insert_boundary(placement.side, placement.center, placement.size / 2.0);
    }

    log::debug!(
        "Boundaries: rebuilt for {}x{} {:?} (removed {}, added {})",
        viewport.width,
        viewport.height,
        mode,
        removed,
        placements.len()
    );

    placements.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::physics_world::{BodyTag, EntitySpec};

    fn sides(world: &PhysicsWorld) -> Vec<BoundarySide> {
        let mut sides: Vec<BoundarySide> = world
            .bodies()
            .filter_map(|view| match view.tag {
                BodyTag::Boundary(side) => Some(*side),
                BodyTag::Entity(_) => None,
            })
            .collect();
        sides.sort_by_key(|side| *side as u8);
        sides
    }

    #[test]
    fn test_accumulate_layout_has_floor() {
        let layout = boundary_layout(
            Viewport::new(800.0, 600.0),
            DisplayMode::Accumulate,
            &PhysicsConfig::default(),
        );
        assert_eq!(layout.len(), 4);

        let floor = layout
            .iter()
            .find(|p| p.side == BoundarySide::Floor)
            .unwrap();
        assert_eq!(floor.center, Vec2::new(400.0, 650.0));
        assert_eq!(floor.size, Vec2::new(1000.0, 100.0));
    }

    #[test]
    fn test_rain_layout_has_no_floor() {
        let layout = boundary_layout(
            Viewport::new(800.0, 600.0),
            DisplayMode::Rain,
            &PhysicsConfig::default(),
        );
        assert_eq!(layout.len(), 3);
        assert!(layout.iter().all(|p| p.side != BoundarySide::Floor));
    }

    #[test]
    fn test_side_walls_extend_well_beyond_viewport() {
        let layout = boundary_layout(
            Viewport::new(800.0, 600.0),
            DisplayMode::Accumulate,
            &PhysicsConfig::default(),
        );
        let left = layout
            .iter()
            .find(|p| p.side == BoundarySide::Left)
            .unwrap();
        assert_eq!(left.size.y, 3000.0);
        assert_eq!(left.center, Vec2::new(-50.0, 300.0));

        let ceiling = layout
            .iter()
            .find(|p| p.side == BoundarySide::Ceiling)
            .unwrap();
        assert_eq!(ceiling.center.y, -200.0);
        assert!(ceiling.size.x > 800.0);
    }

    #[test]
    fn test_rebuild_replaces_without_duplicates() {
        let config = PhysicsConfig::default();
        let mut world = PhysicsWorld::new(&config);
        let viewport = Viewport::new(800.0, 600.0);

        rebuild_boundaries(&mut world, viewport, DisplayMode::Accumulate, &config);
        let first = world.handles_of(BodyKind::Boundary);
        rebuild_boundaries(&mut world, viewport, DisplayMode::Accumulate, &config);
        let second = world.handles_of(BodyKind::Boundary);

        assert_eq!(world.boundary_count(), 4);
        assert!(first.iter().all(|handle| !second.contains(handle)));
    }

    #[test]
    fn test_mode_switch_toggles_floor_and_keeps_entities() {
        let config = PhysicsConfig::default();
        let mut world = PhysicsWorld::new(&config);
        let viewport = Viewport::new(800.0, 600.0);
        rebuild_boundaries(&mut world, viewport, DisplayMode::Accumulate, &config);

        let entity = world.insert_entity(EntitySpec {
            glyph: "🐸",
            position: Vec2::new(400.0, 300.0),
            radius: 25.0,
            angle: 1.0,
            velocity: Vec2::new(3.0, 4.0),
        });
        let before = world.body(entity).map(|v| (v.position, v.velocity, v.angle));

        rebuild_boundaries(&mut world, viewport, DisplayMode::Rain, &config);
        assert_eq!(
            sides(&world),
            vec![BoundarySide::Left, BoundarySide::Right, BoundarySide::Ceiling]
        );
        assert_eq!(world.entity_count(), 1);
        assert_eq!(
            world.body(entity).map(|v| (v.position, v.velocity, v.angle)),
            before
        );

        rebuild_boundaries(&mut world, viewport, DisplayMode::Accumulate, &config);
        assert!(sides(&world).contains(&BoundarySide::Floor));
        assert_eq!(world.entity_count(), 1);
    }
}
