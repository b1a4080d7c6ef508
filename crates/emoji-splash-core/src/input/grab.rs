//! Drag/grab constraint between the pointer and a dynamic body
//!
//! While the pointer is pressed and not yet holding anything, the grab picks up
//! the first dynamic body under the pointer. Each solver tick the held body is
//! pulled toward the pointer by `stiffness` of the remaining gap. A stiffness of
//! zero leaves the body alone even while it is held.

use glam::Vec2;

use crate::world::{BodyHandle, PhysicsWorld};

/// Mouse-style grab constraint
#[derive(Debug, Clone)]
pub struct MouseGrab {
    normal_stiffness: f32,
    stiffness: f32,
    pointer: Vec2,
    pressed: bool,
    held: Option<BodyHandle>,
}

impl MouseGrab {
    pub fn new(stiffness: f32) -> Self {
        Self {
            normal_stiffness: stiffness,
            stiffness,
            pointer: Vec2::ZERO,
            pressed: false,
            held: None,
        }
    }

    pub fn press(&mut self, pointer: Vec2) {
        self.pointer = pointer;
        self.pressed = true;
    }

    /// Hold a specific body picked by the caller's own hit test
    pub fn hold(&mut self, handle: BodyHandle) {
        self.held = Some(handle);
    }

    pub fn move_to(&mut self, pointer: Vec2) {
        self.pointer = pointer;
    }

    /// Let go of the pointer and whatever body is held
    pub fn release(&mut self) {
        self.pressed = false;
        self.held = None;
    }

    pub fn set_stiffness(&mut self, stiffness: f32) {
        self.stiffness = stiffness;
    }

    pub fn restore_stiffness(&mut self) {
        self.stiffness = self.normal_stiffness;
    }

    pub fn stiffness(&self) -> f32 {
        self.stiffness
    }

    pub fn held(&self) -> Option<BodyHandle> {
        self.held
    }

    /// Pick up and pull the held body; call once per solver tick
    pub fn apply(&mut self, world: &mut PhysicsWorld, tick_rate_hz: f32) {
        if !self.pressed {
            return;
        }

        if self.held.is_none() {
            self.held = world.dynamic_bodies_at(self.pointer).first().copied();
        }

        let Some(handle) = self.held else {
            return;
        };
        let Some(position) = world.position(handle) else {
            // Body was removed while held (cleared or collected)
            self.held = None;
            return;
        };

        if self.stiffness > 0.0 {
            let pull = (self.pointer - position) * self.stiffness * tick_rate_hz;
            world.set_velocity(handle, pull);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhysicsConfig;
    use crate::world::EntitySpec;

    fn world_with_ball(at: Vec2) -> (PhysicsWorld, BodyHandle) {
        let mut world = PhysicsWorld::new(&PhysicsConfig::default());
        world.set_gravity(0.0);
        let handle = world.insert_entity(EntitySpec {
            glyph: "🐙",
            position: at,
            radius: 20.0,
            angle: 0.0,
            velocity: Vec2::ZERO,
        });
        (world, handle)
    }

    #[test]
    fn test_grab_pulls_toward_pointer() {
        let (mut world, handle) = world_with_ball(Vec2::new(100.0, 100.0));
        let mut grab = MouseGrab::new(0.2);

        grab.press(Vec2::new(100.0, 100.0));
        grab.apply(&mut world, 60.0);
        assert_eq!(grab.held(), Some(handle));

        grab.move_to(Vec2::new(300.0, 100.0));
        for _ in 0..30 {
            grab.apply(&mut world, 60.0);
            world.step();
        }
        let position = world.position(handle).unwrap();
        assert!(position.x > 250.0, "body should follow pointer, got {position:?}");
    }

    #[test]
    fn test_zero_stiffness_does_not_pull() {
        let (mut world, handle) = world_with_ball(Vec2::new(100.0, 100.0));
        let mut grab = MouseGrab::new(0.2);
        grab.set_stiffness(0.0);

        grab.press(Vec2::new(100.0, 100.0));
        grab.move_to(Vec2::new(400.0, 100.0));
        grab.apply(&mut world, 60.0);
        assert_eq!(world.velocity(handle), Some(Vec2::ZERO));

        grab.restore_stiffness();
        assert_eq!(grab.stiffness(), 0.2);
    }

    #[test]
    fn test_release_drops_body() {
        let (mut world, _) = world_with_ball(Vec2::new(100.0, 100.0));
        let mut grab = MouseGrab::new(0.2);
        grab.press(Vec2::new(100.0, 100.0));
        grab.apply(&mut world, 60.0);
        assert!(grab.held().is_some());

        grab.release();
        assert!(grab.held().is_none());
        grab.apply(&mut world, 60.0);
        assert!(grab.held().is_none());
    }

    #[test]
    fn test_removed_body_is_dropped() {
        let (mut world, handle) = world_with_ball(Vec2::new(100.0, 100.0));
        let mut grab = MouseGrab::new(0.2);
        grab.press(Vec2::new(100.0, 100.0));
        grab.apply(&mut world, 60.0);

        world.remove_body(handle);
        grab.move_to(Vec2::new(700.0, 700.0));
        grab.apply(&mut world, 60.0);
        assert!(grab.held().is_none());
    }
}
