//! Rigid body world backed by rapier2d
//!
//! [`PhysicsWorld`] is an arena: rapier owns the bodies and colliders, and every
//! body we insert gets a [`BodyTag`] keyed by its handle. Boundaries and
//! entities are added, queried and removed by handle only; nothing holds a
//! reference back into the world.
//!
//! Coordinates are screen pixels with `+y` pointing down, so positive gravity
//! pulls toward the bottom of the viewport.

use std::collections::HashMap;
use std::f32::consts::PI;

use glam::Vec2;
use rapier2d::prelude::*;

use super::boundary::BoundarySide;
use crate::config::PhysicsConfig;
use crate::types::BodyKind;

/// Handle of a body in the world arena
pub type BodyHandle = RigidBodyHandle;

/// Per-entity data the solver does not know about
#[derive(Debug, Clone, PartialEq)]
pub struct EmojiEntity {
    /// Glyph drawn for this body (never empty)
    pub glyph: &'static str,
    /// Collider radius in pixels
    pub radius: f32,
    /// Mass derived from radius and density
    pub mass: f32,
}

/// What a body in the arena represents
#[derive(Debug, Clone, PartialEq)]
pub enum BodyTag {
    Boundary(BoundarySide),
    Entity(EmojiEntity),
}

impl BodyTag {
    pub fn kind(&self) -> BodyKind {
        match self {
            BodyTag::Boundary(_) => BodyKind::Boundary,
            BodyTag::Entity(_) => BodyKind::Entity,
        }
    }

    pub fn as_entity(&self) -> Option<&EmojiEntity> {
        match self {
            BodyTag::Entity(entity) => Some(entity),
            BodyTag::Boundary(_) => None,
        }
    }
}

/// Everything needed to insert a new entity
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySpec {
    pub glyph: &'static str,
    pub position: Vec2,
    pub radius: f32,
    pub angle: f32,
    pub velocity: Vec2,
}

/// Read-only snapshot of one body
#[derive(Debug, Clone, Copy)]
pub struct BodyView<'a> {
    pub handle: BodyHandle,
    pub tag: &'a BodyTag,
    pub position: Vec2,
    /// Rotation in radians
    pub angle: f32,
    pub velocity: Vec2,
    pub is_static: bool,
}

impl<'a> BodyView<'a> {
    fn new(handle: BodyHandle, tag: &'a BodyTag, body: &RigidBody) -> Self {
        let translation = body.translation();
        let linvel = body.linvel();
        Self {
            handle,
            tag,
            position: Vec2::new(translation.x, translation.y),
            angle: body.rotation().angle(),
            velocity: Vec2::new(linvel.x, linvel.y),
            is_static: !body.is_dynamic(),
        }
    }

    pub fn entity(&self) -> Option<&'a EmojiEntity> {
        self.tag.as_entity()
    }
}

/// Manages the rapier2d physics world
pub struct PhysicsWorld {
    /// Rapier rigid body set
    rigid_body_set: RigidBodySet,

    /// Rapier collider set
    collider_set: ColliderSet,

    /// Physics pipeline
    pipeline: PhysicsPipeline,

    /// Integration parameters
    integration_parameters: IntegrationParameters,

    /// Island manager
    island_manager: IslandManager,

    /// Broad phase
    broad_phase: BroadPhase,

    /// Narrow phase
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver
    ccd_solver: CCDSolver,

    /// Tag of every body we inserted
    tags: HashMap<BodyHandle, BodyTag>,

    /// Vertical gravity multiplier (0 disables gravity)
    gravity_scale: f32,

    /// Downward acceleration at scale 1, pixels/sec^2
    gravity_acceleration: f32,

    restitution: f32,
    friction: f32,
    entity_density: f32,

    /// Number of solver steps taken
    steps: u64,
}

impl PhysicsWorld {
    /// Create an empty world with gravity at the configured default scale
    pub fn new(config: &PhysicsConfig) -> Self {
        let integration_parameters = IntegrationParameters {
            dt: config.tick_seconds(),
            ..Default::default()
        };

        log::debug!(
            "Physics: created world (dt={:.4}s, gravity={} px/s^2)",
            integration_parameters.dt,
            config.gravity_acceleration
        );

        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            pipeline: PhysicsPipeline::new(),
            integration_parameters,
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            tags: HashMap::new(),
            gravity_scale: config.default_gravity_scale,
            gravity_acceleration: config.gravity_acceleration,
            restitution: config.restitution,
            friction: config.friction,
            entity_density: config.entity_density,
            steps: 0,
        }
    }

    /// Set the vertical gravity scale (0 disables gravity)
    pub fn set_gravity(&mut self, scale: f32) {
        log::debug!(
            "Physics: gravity scale {} -> {}",
            self.gravity_scale,
            scale
        );
        self.gravity_scale = scale;
    }

    pub fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    /// Current gravity vector in pixels/sec^2 (horizontal is always 0)
    pub fn gravity(&self) -> Vec2 {
        Vec2::new(0.0, self.gravity_scale * self.gravity_acceleration)
    }

    /// Advance the simulation by one fixed tick
    pub fn step(&mut self) {
        let gravity = vector![0.0, self.gravity_scale * self.gravity_acceleration];
        let physics_hooks = ();
        let event_handler = ();

        self.pipeline.step(
            &gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &physics_hooks,
            &event_handler,
        );
        self.steps += 1;
    }

    /// Number of solver steps taken since creation
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Insert a static boundary box centered at `center`
    pub fn insert_boundary(
        &mut self,
        side: BoundarySide,
        center: Vec2,
        half_extents: Vec2,
    ) -> BodyHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(vector![center.x, center.y])
            .build();
        let handle = self.rigid_body_set.insert(body);

        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y)
            .friction(self.friction)
            .build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);

        self.tags.insert(handle, BodyTag::Boundary(side));
        handle
    }

    /// Insert a dynamic circular entity
    pub fn insert_entity(&mut self, spec: EntitySpec) -> BodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![spec.position.x, spec.position.y])
            .rotation(spec.angle)
            .linvel(vector![spec.velocity.x, spec.velocity.y])
            .can_sleep(false)
            .ccd_enabled(true)
            .build();
        let handle = self.rigid_body_set.insert(body);

        let collider = ColliderBuilder::ball(spec.radius)
            .restitution(self.restitution)
            .friction(self.friction)
            .density(self.entity_density)
            .build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);

        let entity = EmojiEntity {
            glyph: spec.glyph,
            radius: spec.radius,
            mass: self.entity_density * PI * spec.radius * spec.radius,
        };
        self.tags.insert(handle, BodyTag::Entity(entity));

        log::trace!(
            "Physics: inserted {} r={:.1} at ({:.1}, {:.1})",
            spec.glyph,
            spec.radius,
            spec.position.x,
            spec.position.y
        );
        handle
    }

    /// Remove one body and its colliders, returning its tag
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<BodyTag> {
        let tag = self.tags.remove(&handle)?;
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
        Some(tag)
    }

    /// Remove every listed body, returning how many existed
    pub fn remove_bodies(&mut self, handles: &[BodyHandle]) -> usize {
        handles
            .iter()
            .filter(|handle| self.remove_body(**handle).is_some())
            .count()
    }

    /// Remove every body of the given kind
    pub fn remove_kind(&mut self, kind: BodyKind) -> usize {
        let handles = self.handles_of(kind);
        self.remove_bodies(&handles)
    }

    /// Release every body in the world
    pub fn clear(&mut self) {
        let total = self.tags.len();
        let handles: Vec<BodyHandle> = self.tags.keys().copied().collect();
        self.remove_bodies(&handles);
        log::debug!("Physics: released {} bodies", total);
    }

    /// Snapshot of one body
    pub fn body(&self, handle: BodyHandle) -> Option<BodyView<'_>> {
        let tag = self.tags.get(&handle)?;
        let body = self.rigid_body_set.get(handle)?;
        Some(BodyView::new(handle, tag, body))
    }

    /// Iterate every tagged body in arena order
    pub fn bodies(&self) -> impl Iterator<Item = BodyView<'_>> + '_ {
        self.rigid_body_set.iter().filter_map(|(handle, body)| {
            let tag = self.tags.get(&handle)?;
            Some(BodyView::new(handle, tag, body))
        })
    }

    /// Handles of every body of the given kind, in arena order
    pub fn handles_of(&self, kind: BodyKind) -> Vec<BodyHandle> {
        self.bodies()
            .filter(|view| view.tag.kind() == kind)
            .map(|view| view.handle)
            .collect()
    }

    pub fn entity_count(&self) -> usize {
        self.tags
            .values()
            .filter(|tag| tag.kind() == BodyKind::Entity)
            .count()
    }

    pub fn boundary_count(&self) -> usize {
        self.tags
            .values()
            .filter(|tag| tag.kind() == BodyKind::Boundary)
            .count()
    }

    pub fn body_count(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Dynamic bodies whose shape contains `point`
    pub fn dynamic_bodies_at(&self, point: Vec2) -> Vec<BodyHandle> {
        self.bodies()
            .filter(|view| !view.is_static)
            .filter(|view| {
                view.entity()
                    .is_some_and(|entity| view.position.distance(point) <= entity.radius)
            })
            .map(|view| view.handle)
            .collect()
    }

    pub fn position(&self, handle: BodyHandle) -> Option<Vec2> {
        let translation = self.rigid_body_set.get(handle)?.translation();
        Some(Vec2::new(translation.x, translation.y))
    }

    pub fn velocity(&self, handle: BodyHandle) -> Option<Vec2> {
        let linvel = self.rigid_body_set.get(handle)?.linvel();
        Some(Vec2::new(linvel.x, linvel.y))
    }

    /// Overwrite the linear velocity of a dynamic body
    pub fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec2) -> bool {
        match self.rigid_body_set.get_mut(handle) {
            Some(body) if body.is_dynamic() => {
                body.set_linvel(vector![velocity.x, velocity.y], true);
                true
            }
            _ => false,
        }
    }

    /// Apply an instantaneous impulse to an entity; static bodies ignore it
    ///
    /// The velocity change uses the entity's recorded mass, so the impulse
    /// takes effect immediately even before the solver's next step.
    pub fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec2) -> bool {
        let Some(mass) = self
            .tags
            .get(&handle)
            .and_then(BodyTag::as_entity)
            .map(|entity| entity.mass)
        else {
            return false;
        };

        match self.rigid_body_set.get_mut(handle) {
            Some(body) if body.is_dynamic() && mass > 0.0 => {
                let delta = impulse / mass;
                let linvel = *body.linvel() + vector![delta.x, delta.y];
                body.set_linvel(linvel, true);
                true
            }
            _ => false,
        }
    }
}
