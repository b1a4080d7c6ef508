//! Headless runner: drives a session without a window or GPU
//!
//! Holds the pointer down in the middle of the viewport for the whole run,
//! shakes once halfway through and logs every count change the render pass
//! reports.

use std::time::Duration;

use emoji_splash_core::render::DrawList;
use emoji_splash_core::{PhysicsConfig, Session, SessionSettings, Viewport};

/// Parameters of one headless run
#[derive(Debug, Clone)]
pub struct HeadlessRun {
    pub physics: PhysicsConfig,
    pub settings: SessionSettings,
    pub viewport: Viewport,
    pub seed: Option<u64>,
    pub frames: u64,
}

/// What a headless run ended with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessSummary {
    pub frames: u64,
    pub final_count: usize,
    /// Every count reported by the render pass, in order
    pub count_changes: Vec<usize>,
    pub shaken: usize,
}

pub fn run_headless(run: HeadlessRun) -> HeadlessSummary {
    let frame = Duration::from_secs_f64(1.0 / 60.0);
    let (mut session, commands) = Session::mount(run.physics, run.viewport, run.settings, run.seed);
    let mut canvas = DrawList::new();
    let mut summary = HeadlessSummary::default();

    log::info!(
        "Headless: {} frames at {}x{}",
        run.frames,
        run.viewport.width,
        run.viewport.height
    );

    session.pointer_down(run.viewport.center());
    let halfway = run.frames / 2;

    for index in 0..run.frames {
        if index == halfway && index > 0 {
            let before = session.entity_count();
            if commands.shake() {
                summary.shaken = before;
            }
        }

        session.advance(frame);
        let Some(report) = session.render_frame(&mut canvas) else {
            break;
        };
        if let Some(count) = report.count_changed {
            log::info!("Headless: frame {} count {}", index, count);
            summary.count_changes.push(count);
        }
        summary.frames += 1;
    }

    session.pointer_up();
    summary.final_count = session.entity_count();
    session.teardown();

    log::info!(
        "Headless: finished after {} frames with {} entities",
        summary.frames,
        summary.final_count
    );
    summary
}
