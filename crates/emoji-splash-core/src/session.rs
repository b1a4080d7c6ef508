//! A mounted simulation session
//!
//! [`Session`] owns the one live [`PhysicsWorld`] together with everything that
//! acts on it: the simulation clock, the pointer controller, the render pass and
//! the command queue. All mutations happen synchronously on the caller's thread.
//!
//! The host drives it with three independent calls:
//! - [`Session::advance`] with real elapsed time (commands, held spawning and
//!   fixed-rate solver steps)
//! - [`Session::render_frame`] once per display refresh
//! - the pointer methods as input arrives
//!
//! [`Session::teardown`] consumes the session, so nothing can touch the world
//! after it has been released.

use std::time::Duration;

use glam::Vec2;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use serde::{Deserialize, Serialize};

use crate::commands::{Command, CommandReceiver, CommandSender, command_channel};
use crate::config::PhysicsConfig;
use crate::glyphs::EmojiCategory;
use crate::input::{PointerController, PointerDown};
use crate::render::{Canvas, FramePass, FrameReport};
use crate::types::{BodyKind, DisplayMode, Viewport};
use crate::world::{
    BodyHandle, PhysicsWorld, SimulationClock, rebuild_boundaries, shake, spawner,
};

/// UI-selected settings the core reads on every iteration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub category: EmojiCategory,
    pub mode: DisplayMode,
    pub gravity_scale: f32,
}

impl SessionSettings {
    /// Default category and mode with gravity at the configured default scale
    pub fn for_config(config: &PhysicsConfig) -> Self {
        Self {
            category: EmojiCategory::Random,
            mode: DisplayMode::Accumulate,
            gravity_scale: config.default_gravity_scale,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::for_config(&PhysicsConfig::default())
    }
}

/// Work done by one [`Session::advance`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    pub commands: usize,
    pub spawned: usize,
    pub steps: u32,
}

/// What [`Session::teardown`] released
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeardownReport {
    pub frames: u64,
    pub steps: u64,
    pub bodies_released: usize,
}

/// The simulation-and-render core for one mounted surface
pub struct Session {
    config: PhysicsConfig,
    world: PhysicsWorld,
    clock: SimulationClock,
    frames: FramePass,
    pointer: PointerController,
    settings: SessionSettings,
    viewport: Viewport,
    commands: CommandReceiver,
    rng: Xoshiro256StarStar,
}

impl Session {
    /// Create the world, build the initial boundaries and start the clock
    ///
    /// `seed` makes every random choice reproducible; `None` seeds from entropy.
    pub fn mount(
        config: PhysicsConfig,
        viewport: Viewport,
        settings: SessionSettings,
        seed: Option<u64>,
    ) -> (Self, CommandSender) {
        let rng = match seed {
            Some(seed) => Xoshiro256StarStar::seed_from_u64(seed),
            None => Xoshiro256StarStar::from_entropy(),
        };

        let mut world = PhysicsWorld::new(&config);
        world.set_gravity(settings.gravity_scale);
        rebuild_boundaries(&mut world, viewport, settings.mode, &config);

        let (sender, commands) = command_channel();
        let session = Self {
            clock: SimulationClock::new(&config),
            frames: FramePass::new(),
            pointer: PointerController::new(&config),
            world,
            settings,
            viewport,
            commands,
            rng,
            config,
        };

        log::info!(
            "Session: mounted {}x{} ({:?}, {:?}, gravity {})",
            viewport.width,
            viewport.height,
            settings.mode,
            settings.category,
            settings.gravity_scale
        );

        (session, sender)
    }

    // ===== Command handlers =====

    /// Apply one command immediately
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::SetCategory(category) => self.set_category(category),
            Command::SetMode(mode) => self.set_mode(mode),
            Command::SetGravityScale(scale) => self.set_gravity_scale(scale),
            Command::Resize(viewport) => self.resize(viewport),
            Command::Clear => {
                self.clear();
            }
            Command::Shake => {
                self.shake();
            }
        }
    }

    /// Drain and apply every queued command
    pub fn process_commands(&mut self) -> usize {
        let commands = self.commands.drain();
        let count = commands.len();
        for command in commands {
            self.apply(command);
        }
        count
    }

    pub fn set_category(&mut self, category: EmojiCategory) {
        log::debug!("Session: category {:?}", category);
        self.settings.category = category;
    }

    /// Switch display mode and rebuild the boundary set for it
    pub fn set_mode(&mut self, mode: DisplayMode) {
        log::info!("Session: mode {:?} -> {:?}", self.settings.mode, mode);
        self.settings.mode = mode;
        rebuild_boundaries(&mut self.world, self.viewport, mode, &self.config);
    }

    /// Set gravity scale directly (0 disables, positive restores)
    pub fn set_gravity_scale(&mut self, scale: f32) {
        log::info!("Session: gravity scale {}", scale);
        self.settings.gravity_scale = scale;
        self.world.set_gravity(scale);
    }

    /// Adopt a new viewport size and rebuild the boundaries for it
    pub fn resize(&mut self, viewport: Viewport) {
        log::debug!(
            "Session: resize {}x{} -> {}x{}",
            self.viewport.width,
            self.viewport.height,
            viewport.width,
            viewport.height
        );
        self.viewport = viewport;
        rebuild_boundaries(&mut self.world, viewport, self.settings.mode, &self.config);
    }

    /// Remove every entity; boundaries stay. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.world.remove_kind(BodyKind::Entity);
        log::info!("Session: cleared {} entities", removed);
        removed
    }

    /// Kick every dynamic body once. Returns how many were kicked.
    pub fn shake(&mut self) -> usize {
        let kicked = shake(&mut self.world, &self.config, &mut self.rng);
        log::info!("Session: shook {} entities", kicked);
        kicked
    }

    /// Spawn one entity of the current category at `position`
    pub fn spawn_at(&mut self, position: Vec2) -> BodyHandle {
        spawner::spawn(
            &mut self.world,
            self.settings.category,
            position,
            &self.config,
            &mut self.rng,
        )
    }

    // ===== Pointer =====

    pub fn pointer_down(&mut self, position: Vec2) -> PointerDown {
        self.pointer.pointer_down(
            &mut self.world,
            position,
            self.settings.category,
            &self.config,
            &mut self.rng,
        )
    }

    pub fn pointer_move(&mut self, position: Vec2) {
        self.pointer.pointer_move(position);
    }

    pub fn pointer_up(&mut self) {
        self.pointer.pointer_up();
    }

    /// Leaving the surface ends a press exactly like releasing it
    pub fn pointer_leave(&mut self) {
        self.pointer.pointer_up();
    }

    // ===== Scheduling =====

    /// Advance real time: apply commands, run held spawning, step the solver
    pub fn advance(&mut self, elapsed: Duration) -> AdvanceReport {
        let commands = self.process_commands();

        let spawned = self
            .pointer
            .advance(
                elapsed,
                &mut self.world,
                self.settings.category,
                &self.config,
                &mut self.rng,
            )
            .len();

        let steps = self.clock.advance(elapsed);
        let tick_rate = self.config.tick_rate_hz as f32;
        for _ in 0..steps {
            self.pointer.apply_grab(&mut self.world, tick_rate);
            self.world.step();
        }

        AdvanceReport {
            commands,
            spawned,
            steps,
        }
    }

    /// Run one render iteration into `canvas`
    ///
    /// Returns `None` once the render loop has been cancelled.
    pub fn render_frame(&mut self, canvas: &mut dyn Canvas) -> Option<FrameReport> {
        self.frames.run(
            &mut self.world,
            self.viewport,
            self.settings.mode,
            &self.config,
            canvas,
        )
    }

    /// Stop the render loop, the clock and the spawn timer, then release
    /// every body
    pub fn teardown(mut self) -> TeardownReport {
        self.stop()
    }

    fn stop(&mut self) -> TeardownReport {
        self.frames.cancel();
        self.clock.stop();
        self.pointer.cancel();
        let bodies_released = self.world.body_count();
        self.world.clear();

        let report = TeardownReport {
            frames: self.frames.frames(),
            steps: self.clock.total_steps(),
            bodies_released,
        };
        log::info!(
            "Session: torn down after {} frames and {} steps ({} bodies released)",
            report.frames,
            report.steps,
            report.bodies_released
        );
        report
    }

    // ===== Accessors =====

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn pointer(&self) -> &PointerController {
        &self.pointer
    }

    pub fn entity_count(&self) -> usize {
        self.world.entity_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DrawList;

    fn mount() -> (Session, CommandSender) {
        Session::mount(
            PhysicsConfig::default(),
            Viewport::new(800.0, 600.0),
            SessionSettings::default(),
            Some(77),
        )
    }

    #[test]
    fn test_mount_builds_boundaries() {
        let (session, _tx) = mount();
        assert_eq!(session.world().boundary_count(), 4);
        assert_eq!(session.entity_count(), 0);
    }

    #[test]
    fn test_commands_are_applied_on_advance() {
        let (mut session, tx) = mount();
        tx.set_mode(DisplayMode::Rain);
        tx.set_gravity_scale(0.0);
        tx.set_category(EmojiCategory::Food);

        let report = session.advance(Duration::ZERO);
        assert_eq!(report.commands, 3);
        assert_eq!(session.settings().mode, DisplayMode::Rain);
        assert_eq!(session.world().boundary_count(), 3);
        assert_eq!(session.world().gravity_scale(), 0.0);
        assert_eq!(session.settings().category, EmojiCategory::Food);
    }

    #[test]
    fn test_resize_rebuilds_boundaries() {
        let (mut session, tx) = mount();
        let before = session.world().handles_of(BodyKind::Boundary);
        tx.resize(Viewport::new(1024.0, 768.0));
        session.advance(Duration::ZERO);

        let after = session.world().handles_of(BodyKind::Boundary);
        assert_eq!(after.len(), 4);
        assert!(before.iter().all(|h| !after.contains(h)));
        assert_eq!(session.viewport(), Viewport::new(1024.0, 768.0));
    }

    #[test]
    fn test_category_change_applies_to_next_spawn() {
        let (mut session, _tx) = mount();
        session.set_category(EmojiCategory::Activities);
        let handle = session.spawn_at(Vec2::new(400.0, 300.0));
        let glyph = session.world().body(handle).unwrap().entity().unwrap().glyph;
        assert!(EmojiCategory::Activities.contains(glyph));
    }

    #[test]
    fn test_stop_halts_timer_clock_and_render_and_releases_bodies() {
        let (mut session, _tx) = mount();
        session.pointer_down(Vec2::new(400.0, 300.0));
        assert!(session.pointer().is_spawning());
        let mut canvas = DrawList::new();
        session.render_frame(&mut canvas);

        let report = session.stop();
        assert_eq!(report.frames, 1);
        // Four boundaries plus the first spawned entity
        assert_eq!(report.bodies_released, 5);

        assert!(!session.pointer().is_spawning());
        assert_eq!(session.world().body_count(), 0);

        let advanced = session.advance(Duration::from_secs(1));
        assert_eq!(advanced.spawned, 0);
        assert_eq!(advanced.steps, 0);
        assert_eq!(session.world().body_count(), 0);
        assert!(session.render_frame(&mut canvas).is_none());
        assert_eq!(canvas.clears(), 1);
    }

    #[test]
    fn test_teardown_closes_command_channel() {
        let (mut session, tx) = mount();
        session.spawn_at(Vec2::new(400.0, 300.0));
        let report = session.teardown();
        assert_eq!(report.bodies_released, 5);

        // The session is gone; commands have nowhere to go
        assert!(!tx.clear());
    }

    #[test]
    fn test_default_settings_follow_config_gravity() {
        let config = PhysicsConfig {
            default_gravity_scale: 0.5,
            ..Default::default()
        };
        let settings = SessionSettings::for_config(&config);
        assert_eq!(settings.gravity_scale, 0.5);
        assert_eq!(
            SessionSettings::default().gravity_scale,
            PhysicsConfig::default().default_gravity_scale
        );
    }
}
