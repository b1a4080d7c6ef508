//! Pointer input: spawn-vs-grab disambiguation and held spawning

pub mod grab;
pub mod pointer;
pub mod spawn_timer;

pub use grab::MouseGrab;
pub use pointer::{PointerController, PointerDown, PointerState};
pub use spawn_timer::SpawnTimer;
