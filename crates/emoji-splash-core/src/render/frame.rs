//! The per-frame render pass
//!
//! Each frame, in order:
//! 1. clear the canvas
//! 2. in RAIN mode, remove entities that fell past the bottom margin
//! 3. draw every remaining entity's glyph, rotated with its body
//! 4. report the entity count if it changed since the previous frame
//!
//! The pass never steps the solver; stepping is driven by the simulation clock.

use super::canvas::{Canvas, GlyphSprite};
use super::count::CountReporter;
use crate::config::PhysicsConfig;
use crate::types::{BodyKind, DisplayMode, Viewport};
use crate::world::PhysicsWorld;

/// Outcome of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Entities garbage-collected this frame
    pub removed: usize,
    /// Glyphs drawn this frame
    pub drawn: usize,
    /// Live entity count after cleanup
    pub count: usize,
    /// Set only on frames where the count changed
    pub count_changed: Option<usize>,
}

/// Remove entities whose center is more than `margin` below the viewport
pub fn collect_fallen(world: &mut PhysicsWorld, viewport: Viewport, margin: f32) -> usize {
    let limit = viewport.height + margin;
    let fallen: Vec<_> = world
        .bodies()
        .filter(|view| view.tag.kind() == BodyKind::Entity && view.position.y > limit)
        .map(|view| view.handle)
        .collect();

    if fallen.is_empty() {
        return 0;
    }

    let removed = world.remove_bodies(&fallen);
    log::trace!("Render: collected {} fallen entities", removed);
    removed
}

/// Render loop state that survives between frames
#[derive(Debug, Default)]
pub struct FramePass {
    reporter: CountReporter,
    frames: u64,
    cancelled: bool,
}

impl FramePass {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one frame. Returns `None` once the pass has been cancelled.
    pub fn run(
        &mut self,
        world: &mut PhysicsWorld,
        viewport: Viewport,
        mode: DisplayMode,
        config: &PhysicsConfig,
        canvas: &mut dyn Canvas,
    ) -> Option<FrameReport> {
        if self.cancelled {
            return None;
        }

        canvas.clear();

        let removed = if mode.collects_fallen() {
            collect_fallen(world, viewport, config.offscreen_margin)
        } else {
            0
        };

        let mut drawn = 0;
        for view in world.bodies() {
            if let Some(entity) = view.entity() {
                canvas.draw_glyph(GlyphSprite::for_body(
                    entity.glyph,
                    view.position,
                    view.angle,
                    entity.radius,
                ));
                drawn += 1;
            }
        }

        let count = drawn;
        let count_changed = self.reporter.observe(count);
        if let Some(count) = count_changed {
            log::debug!("Render: entity count is now {}", count);
        }

        self.frames += 1;
        Some(FrameReport {
            removed,
            drawn,
            count,
            count_changed,
        })
    }

    /// Stop the pass; no further frame runs afterwards
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The last count reported to the UI
    pub fn reported_count(&self) -> usize {
        self.reporter.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::canvas::DrawList;
    use crate::world::{EntitySpec, rebuild_boundaries};
    use glam::Vec2;

    fn entity(world: &mut PhysicsWorld, x: f32, y: f32) {
        world.insert_entity(EntitySpec {
            glyph: "🎾",
            position: Vec2::new(x, y),
            radius: 20.0,
            angle: 0.3,
            velocity: Vec2::ZERO,
        });
    }

    #[test]
    fn test_frame_draws_entities_not_boundaries() {
        let config = PhysicsConfig::default();
        let viewport = Viewport::new(800.0, 600.0);
        let mut world = PhysicsWorld::new(&config);
        rebuild_boundaries(&mut world, viewport, DisplayMode::Accumulate, &config);
        entity(&mut world, 100.0, 100.0);
        entity(&mut world, 200.0, 100.0);

        let mut pass = FramePass::new();
        let mut canvas = DrawList::new();
        let report = pass
            .run(&mut world, viewport, DisplayMode::Accumulate, &config, &mut canvas)
            .unwrap();

        assert_eq!(report.drawn, 2);
        assert_eq!(report.count_changed, Some(2));
        assert_eq!(canvas.len(), 2);
        assert_eq!(canvas.clears(), 1);
        assert!(canvas.sprites().iter().all(|s| s.glyph == "🎾" && s.size == 40.0));
    }

    #[test]
    fn test_rain_collects_fallen_entities() {
        let config = PhysicsConfig::default();
        let viewport = Viewport::new(800.0, 600.0);
        let mut world = PhysicsWorld::new(&config);
        entity(&mut world, 100.0, 100.0);
        entity(&mut world, 100.0, 701.0);
        entity(&mut world, 300.0, 699.0);

        let mut pass = FramePass::new();
        let mut canvas = DrawList::new();
        let report = pass
            .run(&mut world, viewport, DisplayMode::Rain, &config, &mut canvas)
            .unwrap();

        assert_eq!(report.removed, 1);
        assert_eq!(report.count, 2);
        assert_eq!(world.entity_count(), 2);
    }

    #[test]
    fn test_accumulate_never_collects() {
        let config = PhysicsConfig::default();
        let viewport = Viewport::new(800.0, 600.0);
        let mut world = PhysicsWorld::new(&config);
        entity(&mut world, 100.0, 5000.0);

        let mut pass = FramePass::new();
        let mut canvas = DrawList::new();
        let report = pass
            .run(&mut world, viewport, DisplayMode::Accumulate, &config, &mut canvas)
            .unwrap();

        assert_eq!(report.removed, 0);
        assert_eq!(world.entity_count(), 1);
    }

    #[test]
    fn test_count_reported_only_on_change() {
        let config = PhysicsConfig::default();
        let viewport = Viewport::new(800.0, 600.0);
        let mut world = PhysicsWorld::new(&config);
        let mut pass = FramePass::new();
        let mut canvas = DrawList::new();

        entity(&mut world, 100.0, 100.0);
        let first = pass
            .run(&mut world, viewport, DisplayMode::Accumulate, &config, &mut canvas)
            .unwrap();
        let second = pass
            .run(&mut world, viewport, DisplayMode::Accumulate, &config, &mut canvas)
            .unwrap();

        assert_eq!(first.count_changed, Some(1));
        assert_eq!(second.count_changed, None);
        assert_eq!(pass.reported_count(), 1);
        assert_eq!(pass.frames(), 2);
    }

    #[test]
    fn test_cancelled_pass_does_nothing() {
        let config = PhysicsConfig::default();
        let mut world = PhysicsWorld::new(&config);
        let mut pass = FramePass::new();
        let mut canvas = DrawList::new();

        pass.cancel();
        assert!(
            pass.run(
                &mut world,
                Viewport::default(),
                DisplayMode::Rain,
                &config,
                &mut canvas
            )
            .is_none()
        );
        assert_eq!(canvas.clears(), 0);
    }
}
