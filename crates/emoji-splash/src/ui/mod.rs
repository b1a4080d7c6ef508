//! UI module for the desktop shell

mod controls;

pub use controls::{ControlsState, ControlsSync, show_controls};
