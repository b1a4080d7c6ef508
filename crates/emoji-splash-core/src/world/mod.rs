//! Rigid body world, boundaries and entity lifecycle

pub mod boundary;
pub mod clock;
pub mod physics_world;
pub mod shake;
pub mod spawner;

pub use boundary::{BoundaryPlacement, BoundarySide, boundary_layout, rebuild_boundaries};
pub use clock::SimulationClock;
pub use physics_world::{BodyHandle, BodyTag, BodyView, EmojiEntity, EntitySpec, PhysicsWorld};
pub use shake::shake;
pub use spawner::spawn;
