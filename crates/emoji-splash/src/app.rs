//! Application state and event loop for the desktop shell

use anyhow::{Context, Result};
use std::sync::Arc;
use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalPosition},
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use emoji_splash_core::render::DrawList;
use emoji_splash_core::{CommandSender, Session, Viewport};
use glam::Vec2;

use crate::config::AppConfig;
use crate::render::{Renderer, paint_glyphs};
use crate::ui::{ControlsState, ControlsSync, show_controls};

/// GPU surface plus the egui layer painted onto it
struct Surface {
    renderer: Renderer,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Surface {
    async fn new(window: &Arc<Window>) -> Result<Self> {
        let renderer = Renderer::new(window.clone()).await?;

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &renderer.device,
            renderer.surface_format(),
            egui_wgpu::RendererOptions::default(),
        );

        Ok(Self {
            renderer,
            egui_ctx,
            egui_state,
            egui_renderer,
        })
    }
}

/// Main application state
pub struct App {
    window: Arc<Window>,
    /// `None` when no drawing surface could be created; frames are then skipped
    surface: Option<Surface>,

    // Simulation
    session: Option<Session>,
    commands: CommandSender,
    sprites: DrawList,

    // UI state
    controls: ControlsState,
    sync: ControlsSync,

    // Input state
    cursor: Option<Vec2>,

    // Timing
    last_update: Instant,
}

impl App {
    /// Create the window, the surface and the mounted session
    pub async fn new(config: AppConfig) -> Result<(Self, EventLoop<()>)> {
        let event_loop = EventLoop::new().context("Failed to create event loop")?;

        let window_attrs = WindowAttributes::default()
            .with_title(config.window.title.clone())
            .with_inner_size(LogicalSize::new(config.window.width, config.window.height));
        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .context("Failed to create window")?,
        );

        let surface = match Surface::new(&window).await {
            Ok(surface) => Some(surface),
            Err(e) => {
                log::error!("No drawing surface, rendering disabled: {:#}", e);
                None
            }
        };

        let viewport = logical_viewport(&window);
        let settings = config.session_settings();
        let (session, commands) =
            Session::mount(config.physics.clone(), viewport, settings, config.session.seed);

        let controls = ControlsState::from_settings(settings);
        let sync = ControlsSync::new(&controls, config.physics.default_gravity_scale);

        Ok((
            Self {
                window,
                surface,
                session: Some(session),
                commands,
                sprites: DrawList::new(),
                controls,
                sync,
                cursor: None,
                last_update: Instant::now(),
            },
            event_loop,
        ))
    }

    /// Run the event loop
    pub fn run(event_loop: EventLoop<()>, mut app: Self) -> Result<()> {
        event_loop.run_app(&mut app)?;
        Ok(())
    }

    /// Forward control changes and advance the session by real elapsed time
    fn update(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update);
        self.last_update = now;

        for command in self.sync.commands(&self.controls) {
            self.commands.send(command);
        }

        if let Some(session) = self.session.as_mut() {
            session.advance(elapsed);
            if let Some(report) = session.render_frame(&mut self.sprites) {
                if let Some(count) = report.count_changed {
                    self.controls.count = count;
                }
            }
        }
    }

    /// Render frame
    fn render(&mut self) -> Result<()> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        let renderer = &mut surface.renderer;

        let output = renderer.begin_frame()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = renderer
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        renderer.clear(&mut encoder, &view);

        // Run egui
        let raw_input = surface.egui_state.take_egui_input(&self.window);
        let sprites = &self.sprites;
        let controls = &mut self.controls;
        let full_output = surface.egui_ctx.run(raw_input, |ctx| {
            paint_glyphs(ctx, sprites);
            show_controls(ctx, controls);
        });

        surface
            .egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = surface
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        for (id, delta) in &full_output.textures_delta.set {
            surface
                .egui_renderer
                .update_texture(&renderer.device, &renderer.queue, *id, delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [renderer.size().width, renderer.size().height],
            pixels_per_point: full_output.pixels_per_point,
        };

        surface.egui_renderer.update_buffers(
            &renderer.device,
            &renderer.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            surface.egui_renderer.render(
                &mut render_pass.forget_lifetime(),
                &paint_jobs,
                &screen_descriptor,
            );
        }

        for id in &full_output.textures_delta.free {
            surface.egui_renderer.free_texture(id);
        }

        renderer.queue.submit(std::iter::once(encoder.finish()));
        renderer.end_frame(output);

        Ok(())
    }

    fn to_logical(&self, position: PhysicalPosition<f64>) -> Vec2 {
        let logical = position.to_logical::<f32>(self.window.scale_factor());
        Vec2::new(logical.x, logical.y)
    }

    /// Unmount the session; further events find nothing to drive
    fn shutdown(&mut self) {
        if let Some(session) = self.session.take() {
            session.teardown();
        }
    }
}

/// Current inner size of `window` in logical pixels
fn logical_viewport(window: &Window) -> Viewport {
    let size = window.inner_size().to_logical::<f32>(window.scale_factor());
    Viewport::new(size.width, size.height)
}

impl ApplicationHandler for App {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {
        self.window.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui see every event; presses it consumes never reach the scene
        let consumed = match self.surface.as_mut() {
            Some(surface) => {
                surface
                    .egui_state
                    .on_window_event(&self.window, &event)
                    .consumed
            }
            None => false,
        };

        match event {
            WindowEvent::CloseRequested => {
                self.shutdown();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(surface) = self.surface.as_mut() {
                    surface.renderer.resize(size);
                }
                if size.width > 0 && size.height > 0 {
                    self.commands.resize(logical_viewport(&self.window));
                }
            }
            WindowEvent::RedrawRequested => {
                self.update();
                if let Err(e) = self.render() {
                    log::error!("Render error: {}", e);
                }
                self.window.request_redraw();
            }
            WindowEvent::CursorMoved { position, .. } => {
                let position = self.to_logical(position);
                self.cursor = Some(position);
                if let Some(session) = self.session.as_mut() {
                    session.pointer_move(position);
                }
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                if let Some(session) = self.session.as_mut() {
                    session.pointer_leave();
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let Some(session) = self.session.as_mut() else {
                    return;
                };
                match state {
                    ElementState::Pressed if !consumed => {
                        if let Some(position) = self.cursor {
                            session.pointer_down(position);
                        }
                    }
                    ElementState::Pressed => {}
                    // Releases always reach the scene so a press never sticks
                    ElementState::Released => session.pointer_up(),
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if consumed || event.state != ElementState::Pressed {
                    return;
                }
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::KeyC) => self.controls.request_clear(),
                    PhysicalKey::Code(KeyCode::KeyS) => self.controls.request_shake(),
                    PhysicalKey::Code(KeyCode::KeyG) => {
                        self.controls.gravity_enabled = !self.controls.gravity_enabled;
                    }
                    PhysicalKey::Code(KeyCode::Escape) => {
                        self.shutdown();
                        event_loop.exit();
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}
