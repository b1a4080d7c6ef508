//! Control bar: category selector, mode toggle, clear, shake, gravity and the
//! live entity count
//!
//! The bar only edits [`ControlsState`]. [`ControlsSync`] turns the edits into
//! session commands once per frame: value changes become `Set*` commands and
//! the clear/shake counters fire once per increment.

use egui::{Align2, Color32, RichText};

use emoji_splash_core::{Command, DisplayMode, EdgeTrigger, EmojiCategory, SessionSettings};

/// Values the control bar edits
#[derive(Debug, Clone, PartialEq)]
pub struct ControlsState {
    pub category: EmojiCategory,
    pub mode: DisplayMode,
    pub gravity_enabled: bool,
    /// Bumped on every Clear click
    pub clear_requests: u64,
    /// Bumped on every Shake click
    pub shake_requests: u64,
    /// Last count reported by the render pass
    pub count: usize,
}

impl ControlsState {
    pub fn from_settings(settings: SessionSettings) -> Self {
        Self {
            category: settings.category,
            mode: settings.mode,
            gravity_enabled: settings.gravity_scale > 0.0,
            clear_requests: 0,
            shake_requests: 0,
            count: 0,
        }
    }

    pub fn request_clear(&mut self) {
        self.clear_requests += 1;
        // The count display resets immediately, ahead of the next frame report
        self.count = 0;
    }

    pub fn request_shake(&mut self) {
        self.shake_requests += 1;
    }
}

/// Diffs [`ControlsState`] against what the session was last told
#[derive(Debug)]
pub struct ControlsSync {
    category: EmojiCategory,
    mode: DisplayMode,
    gravity_enabled: bool,
    clear: EdgeTrigger,
    shake: EdgeTrigger,
    gravity_scale: f32,
}

impl ControlsSync {
    /// Start in sync with `state`; `gravity_scale` is what "on" restores
    pub fn new(state: &ControlsState, gravity_scale: f32) -> Self {
        Self {
            category: state.category,
            mode: state.mode,
            gravity_enabled: state.gravity_enabled,
            clear: EdgeTrigger::new(state.clear_requests),
            shake: EdgeTrigger::new(state.shake_requests),
            gravity_scale,
        }
    }

    /// Commands needed to bring the session in line with `state`
    pub fn commands(&mut self, state: &ControlsState) -> Vec<Command> {
        let mut commands = Vec::new();

        if state.category != self.category {
            self.category = state.category;
            commands.push(Command::SetCategory(state.category));
        }
        if state.mode != self.mode {
            self.mode = state.mode;
            commands.push(Command::SetMode(state.mode));
        }
        if state.gravity_enabled != self.gravity_enabled {
            self.gravity_enabled = state.gravity_enabled;
            let scale = if state.gravity_enabled {
                self.gravity_scale
            } else {
                0.0
            };
            commands.push(Command::SetGravityScale(scale));
        }
        for _ in 0..self.clear.take(state.clear_requests) {
            commands.push(Command::Clear);
        }
        for _ in 0..self.shake.take(state.shake_requests) {
            commands.push(Command::Shake);
        }

        commands
    }
}

/// Show the control bar along the top of the window
pub fn show_controls(ctx: &egui::Context, state: &mut ControlsState) {
    egui::TopBottomPanel::top("controls").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("Emoji Splash");
            ui.separator();

            egui::ComboBox::from_id_salt("category")
                .selected_text(state.category.label())
                .show_ui(ui, |ui| {
                    for category in EmojiCategory::ALL {
                        ui.selectable_value(&mut state.category, category, category.label());
                    }
                });

            ui.separator();
            for mode in DisplayMode::ALL {
                ui.selectable_value(&mut state.mode, mode, mode.label());
            }

            ui.separator();
            if ui.button("🧹 Clear").clicked() {
                state.request_clear();
            }
            if ui.button("💥 Shake").clicked() {
                state.request_shake();
            }
            let gravity_label = if state.gravity_enabled {
                "🪐 Gravity on"
            } else {
                "🚀 Zero-G"
            };
            if ui.button(gravity_label).clicked() {
                state.gravity_enabled = !state.gravity_enabled;
            }
        });
    });

    egui::Area::new(egui::Id::new("count_badge"))
        .anchor(Align2::RIGHT_BOTTOM, [-12.0, -12.0])
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(Color32::from_rgba_unmultiplied(0, 0, 0, 160))
                .inner_margin(8.0)
                .corner_radius(4.0)
                .show(ui, |ui| {
                    ui.label(
                        RichText::new(format!("{} emojis", state.count))
                            .color(Color32::WHITE)
                            .strong(),
                    );
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> (ControlsState, ControlsSync) {
        let state = ControlsState::from_settings(SessionSettings::default());
        let sync = ControlsSync::new(&state, 1.0);
        (state, sync)
    }

    #[test]
    fn test_no_changes_no_commands() {
        let (state, mut sync) = fresh();
        assert!(sync.commands(&state).is_empty());
    }

    #[test]
    fn test_value_changes_emit_once() {
        let (mut state, mut sync) = fresh();
        state.category = EmojiCategory::Food;
        state.mode = DisplayMode::Rain;

        assert_eq!(
            sync.commands(&state),
            vec![
                Command::SetCategory(EmojiCategory::Food),
                Command::SetMode(DisplayMode::Rain)
            ]
        );
        assert!(sync.commands(&state).is_empty());
    }

    #[test]
    fn test_gravity_toggle_flips_between_zero_and_default() {
        let (mut state, mut sync) = fresh();
        state.gravity_enabled = false;
        assert_eq!(sync.commands(&state), vec![Command::SetGravityScale(0.0)]);
        state.gravity_enabled = true;
        assert_eq!(sync.commands(&state), vec![Command::SetGravityScale(1.0)]);
    }

    #[test]
    fn test_each_click_fires_one_command() {
        let (mut state, mut sync) = fresh();
        state.request_shake();
        state.request_shake();
        state.request_clear();

        let commands = sync.commands(&state);
        assert_eq!(
            commands,
            vec![Command::Clear, Command::Shake, Command::Shake]
        );
        assert!(sync.commands(&state).is_empty());
    }

    #[test]
    fn test_clear_resets_displayed_count() {
        let (mut state, _) = fresh();
        state.count = 42;
        state.request_clear();
        assert_eq!(state.count, 0);
    }
}
