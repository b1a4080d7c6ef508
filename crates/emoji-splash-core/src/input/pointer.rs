//! Pointer controller: grab an existing entity or spawn new ones
//!
//! Two states:
//! - `Idle`: nothing is being spawned. A pointer-down over a dynamic body stays
//!   here and leaves the body to the grab constraint.
//! - `Spawning`: the pointer went down on empty space. One entity is spawned
//!   immediately, then one more every spawn interval at the last known pointer
//!   position plus jitter, until pointer-up or pointer-leave.
//!
//! While spawning, grab stiffness is zero so freshly spawned bodies under the
//! pointer cannot be picked up and dragged.

use std::time::Duration;

use glam::Vec2;
use rand::Rng;

use super::grab::MouseGrab;
use super::spawn_timer::SpawnTimer;
use crate::config::PhysicsConfig;
use crate::glyphs::EmojiCategory;
use crate::world::{BodyHandle, PhysicsWorld, spawner};

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerState {
    Idle,
    Spawning {
        /// Last known pointer position used by the repeating spawn
        pointer: Vec2,
    },
}

/// What a pointer-down resolved to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerDown {
    /// A dynamic body was under the pointer; the grab constraint handles it
    Grab(BodyHandle),
    /// Empty space; spawning started with this first entity
    Spawn(BodyHandle),
}

/// Interprets pointer events against the world
#[derive(Debug, Clone)]
pub struct PointerController {
    state: PointerState,
    timer: SpawnTimer,
    grab: MouseGrab,
    jitter: f32,
}

impl PointerController {
    pub fn new(config: &PhysicsConfig) -> Self {
        Self {
            state: PointerState::Idle,
            timer: SpawnTimer::new(config.spawn_interval(), config.max_catch_up_steps),
            grab: MouseGrab::new(config.grab_stiffness),
            jitter: config.spawn_jitter,
        }
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    pub fn is_spawning(&self) -> bool {
        matches!(self.state, PointerState::Spawning { .. })
    }

    pub fn grab(&self) -> &MouseGrab {
        &self.grab
    }

    /// Pointer pressed at `position`
    pub fn pointer_down<R: Rng + ?Sized>(
        &mut self,
        world: &mut PhysicsWorld,
        position: Vec2,
        category: EmojiCategory,
        config: &PhysicsConfig,
        rng: &mut R,
    ) -> PointerDown {
        // A second press without a release (e.g. another touch) restarts from idle
        if self.is_spawning() {
            self.timer.cancel();
            self.state = PointerState::Idle;
            self.grab.restore_stiffness();
        }
        self.grab.press(position);

        if let Some(&handle) = world.dynamic_bodies_at(position).first() {
            log::trace!("Pointer: down on body {:?}, deferring to grab", handle);
            self.grab.hold(handle);
            return PointerDown::Grab(handle);
        }

        self.grab.set_stiffness(0.0);
        let first = spawner::spawn(world, category, position, config, rng);
        self.state = PointerState::Spawning { pointer: position };
        self.timer.start();

        log::debug!(
            "Pointer: spawning at ({:.0}, {:.0})",
            position.x,
            position.y
        );
        PointerDown::Spawn(first)
    }

    /// Pointer moved to `position`
    pub fn pointer_move(&mut self, position: Vec2) {
        self.grab.move_to(position);
        if let PointerState::Spawning { pointer } = &mut self.state {
            *pointer = position;
        }
    }

    /// Pointer released or left the surface; a no-op when already idle
    pub fn pointer_up(&mut self) {
        self.grab.release();
        if self.is_spawning() {
            log::debug!("Pointer: spawning stopped");
        }
        self.timer.cancel();
        self.state = PointerState::Idle;
        self.grab.restore_stiffness();
    }

    /// Run the repeating spawn for `elapsed` time; returns the handles spawned
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        elapsed: Duration,
        world: &mut PhysicsWorld,
        category: EmojiCategory,
        config: &PhysicsConfig,
        rng: &mut R,
    ) -> Vec<BodyHandle> {
        let PointerState::Spawning { pointer } = self.state else {
            return Vec::new();
        };

        let ticks = self.timer.advance(elapsed);
        (0..ticks)
            .map(|_| {
                let offset = if self.jitter > 0.0 {
                    Vec2::new(
                        rng.gen_range(-self.jitter..=self.jitter),
                        rng.gen_range(-self.jitter..=self.jitter),
                    )
                } else {
                    Vec2::ZERO
                };
                spawner::spawn(world, category, pointer + offset, config, rng)
            })
            .collect()
    }

    /// Drive the grab constraint; call once per solver tick
    pub fn apply_grab(&mut self, world: &mut PhysicsWorld, tick_rate_hz: f32) {
        self.grab.apply(world, tick_rate_hz);
    }

    /// Stop everything, as on teardown
    pub fn cancel(&mut self) {
        self.pointer_up();
    }
}
