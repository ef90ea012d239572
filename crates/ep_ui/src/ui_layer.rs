//! egui layer composited on top of the sprite pass.
//!
//! egui needs a split render because `egui_wgpu::Renderer::render()` wants a
//! `RenderPass<'static>` while `begin_render_pass` borrows the encoder:
//!
//!   1. `prepare()` runs the frame's UI closure and tessellates
//!   2. `upload()` pushes textures and buffers (borrows the encoder)
//!   3. `paint()` draws into a pass created with `forget_lifetime()`
//!   4. `cleanup()` frees textures egui dropped
//!
//! Screens draw menus, buttons and the HUD through this layer; the F3 debug
//! panel is drawn on top when `debug_visible` is set.

use ep_core::time::TimeState;
use winit::window::Window;

/// Per-frame numbers shown by the debug panel.
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    pub draw_calls: u32,
    pub texture_binds: u32,
    pub sprite_count: u32,
    pub screen: String,
    pub level: u32,
    /// Empty outside gameplay.
    pub player: String,
}

/// Tessellated output of one `prepare()` call.
pub struct UiFrame {
    pub primitives: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
}

pub struct UiLayer {
    pub egui_ctx: egui::Context,
    pub egui_winit_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,
    pub debug_visible: bool,
}

impl UiLayer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        window: &Window,
    ) -> Self {
        let egui_ctx = egui::Context::default();
        let egui_winit_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self {
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            debug_visible: false,
        }
    }

    /// Feed a window event to egui. Returns true when egui consumed it.
    pub fn handle_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        self.egui_winit_state.on_window_event(window, event).consumed
    }

    pub fn toggle_debug(&mut self) {
        self.debug_visible = !self.debug_visible;
        log::info!(
            "Debug panel: {}",
            if self.debug_visible { "ON" } else { "OFF" }
        );
    }

    pub fn prepare(
        &mut self,
        window: &Window,
        time: &TimeState,
        stats: &FrameStats,
        mut build: impl FnMut(&egui::Context),
    ) -> UiFrame {
        let raw_input = self.egui_winit_state.take_egui_input(window);
        let debug_visible = self.debug_visible;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            build(ctx);
            if debug_visible {
                debug_panel(ctx, time, stats);
            }
        });

        self.egui_winit_state
            .handle_platform_output(window, full_output.platform_output);

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        UiFrame {
            primitives,
            textures_delta: full_output.textures_delta,
        }
    }

    /// Upload textures and update buffers. Call before creating the egui render pass.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        frame: &UiFrame,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &frame.textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer.update_buffers(
            device,
            queue,
            encoder,
            &frame.primitives,
            screen_descriptor,
        );
    }

    pub fn paint(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        frame: &UiFrame,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, &frame.primitives, screen_descriptor);
    }

    pub fn cleanup(&mut self, frame: &UiFrame) {
        for id in &frame.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

fn debug_panel(ctx: &egui::Context, time: &TimeState, stats: &FrameStats) {
    egui::Window::new("Debug")
        .default_pos([10.0, 120.0])
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(format!("FPS: {:.1}", time.smoothed_fps));
            ui.label(format!("Frame time: {:.2} ms", time.smoothed_frame_time_ms));
            ui.label(format!("Steps this frame: {}", time.steps_this_frame));
            ui.label(format!("Total steps: {}", time.fixed_step_count));
            ui.separator();
            ui.label(format!("Screen: {}", stats.screen));
            if stats.level > 0 {
                ui.label(format!("Level: {}", stats.level));
            }
            if !stats.player.is_empty() {
                ui.label(format!("Player: {}", stats.player));
            }
            ui.label(format!("Sprites: {}", stats.sprite_count));
            ui.label(format!("Draw calls: {}", stats.draw_calls));
            ui.label(format!("Texture binds: {}", stats.texture_binds));
        });
}
