//! Epic Platformer Adventure -- main loop and application entry point.
//!
//! winit drives the event loop via `ApplicationHandler`. All simulation runs
//! inside `RedrawRequested` on a **fixed timestep** (see `TimeState`):
//!
//!   1. `begin_frame()` -- measure wall-clock delta, feed accumulator
//!   2. `while should_step()` -- advance the screen flow one tick at a time
//!   3. Rebuild the sprite batch from the running level, if any
//!   4. Draw the sprite pass, then composite the egui screens on top
//!
//! Input edges are cleared after every fixed step, so one click or key press
//! is seen by exactly one tick even when a frame runs several.

mod assets;
mod audio;
mod button;
mod enemy;
mod entity;
mod game_state;
mod geometry;
mod player;
#[cfg(test)]
mod replay;
mod scene_batch;
mod screens;
mod session;
mod sheet;
mod world;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use assets::AssetRegistry;
use audio::AudioSystem;
use ep_core::{load_config_from_path, GameConfig, InputState, Key, MouseBtn, TimeState};
use ep_platform::window::{create_window, PlatformConfig};
use ep_render::{
    BatchBuffers, Camera2D, GpuContext, SpriteBatch, SpritePipeline, Texture, WHITE_TEXTURE,
};
use ep_ui::{Canvas, FrameStats, UiLayer};
use screens::ScreenFlow;
use session::GameplaySession;

const CONFIG_PATH: &str = "assets/config/game.json";

struct GpuSpriteTexture {
    _texture: Texture,
    bind_group: wgpu::BindGroup,
}

/// All mutable engine state. Constructed lazily in `resumed` once the
/// window and GPU surface exist.
struct EngineState {
    window: Arc<Window>,
    gpu: GpuContext,
    time: TimeState,
    input: InputState,
    sprite_pipeline: SpritePipeline,
    ui: UiLayer,

    assets: AssetRegistry,
    audio: AudioSystem,
    flow: ScreenFlow,
    textures: HashMap<Arc<str>, GpuSpriteTexture>,

    // Rebuilt on the CPU every frame, then streamed into `buffers`.
    batch: SpriteBatch,
    buffers: BatchBuffers,
    camera_bind_group: wgpu::BindGroup,
    _camera_buffer: wgpu::Buffer,
}

impl EngineState {
    fn new(window: Arc<Window>, config: &GameConfig) -> Result<Self, String> {
        let gpu = GpuContext::new(window.clone())?;
        let sprite_pipeline = SpritePipeline::new(&gpu.device, gpu.surface_format);
        let ui = UiLayer::new(&gpu.device, gpu.surface_format, &window);

        // The canvas never scrolls, so the camera uniform is written once.
        let camera = Camera2D::screen_space(config.width, config.height);
        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[camera.build_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group =
            sprite_pipeline.create_camera_bind_group(&gpu.device, &camera_buffer);

        let mut textures = HashMap::new();
        let white = Texture::white(&gpu.device, &gpu.queue);
        let bind_group = sprite_pipeline.create_texture_bind_group(&gpu.device, &white);
        textures.insert(
            Arc::from(WHITE_TEXTURE),
            GpuSpriteTexture {
                _texture: white,
                bind_group,
            },
        );

        let assets = AssetRegistry::new(config);
        let mut audio = AudioSystem::new(&assets);
        let flow = ScreenFlow::new(config.clone(), &mut audio);
        let buffers = BatchBuffers::new(&gpu.device);

        Ok(Self {
            window,
            time: TimeState::new(config.fps),
            input: InputState::new(),
            sprite_pipeline,
            ui,
            assets,
            audio,
            flow,
            textures,
            batch: SpriteBatch::new(),
            buffers,
            camera_bind_group,
            _camera_buffer: camera_buffer,
            gpu,
        })
    }

    /// Upload any image the registry decoded since the last frame.
    fn sync_textures(&mut self) {
        for image in self.assets.images() {
            if self.textures.contains_key(&image.key) {
                continue;
            }
            let texture = Texture::from_rgba8(
                &self.gpu.device,
                &self.gpu.queue,
                &image.rgba,
                image.width,
                image.height,
                &image.key,
            );
            let bind_group = self
                .sprite_pipeline
                .create_texture_bind_group(&self.gpu.device, &texture);
            log::debug!(
                "Uploaded texture {} ({}x{}{})",
                image.key,
                image.width,
                image.height,
                if image.placeholder { ", placeholder" } else { "" }
            );
            self.textures.insert(
                image.key.clone(),
                GpuSpriteTexture {
                    _texture: texture,
                    bind_group,
                },
            );
        }
    }

    fn rebuild_batch(&mut self) {
        self.batch.clear();
        if let Some(session) = self.flow.session() {
            scene_batch::push_session(&mut self.batch, session);
        }
        self.buffers
            .upload(&self.gpu.device, &self.gpu.queue, &self.batch);
    }

    fn frame_stats(&self) -> FrameStats {
        FrameStats {
            draw_calls: self.batch.draw_calls.len() as u32,
            texture_binds: self.batch.texture_binds() as u32,
            sprite_count: self.batch.quad_count() as u32,
            screen: self.flow.current().label().to_string(),
            level: self.flow.state().current_level,
            player: self
                .flow
                .session()
                .map(GameplaySession::player_summary)
                .unwrap_or_default(),
        }
    }

    fn render(&mut self) {
        let Some((output, view)) = self.gpu.begin_frame() else {
            return;
        };

        let stats = self.frame_stats();
        let flow = &self.flow;
        let ui_frame = self
            .ui
            .prepare(&self.window, &self.time, &stats, |ctx: &egui::Context| {
                flow.draw(&Canvas::new(ctx));
            });

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.size.0, self.gpu.size.1],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut last_bound_texture_key: Option<&Arc<str>> = None;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            render_pass.set_pipeline(&self.sprite_pipeline.render_pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.buffers.vertex_buffer.slice(..));
            render_pass.set_index_buffer(
                self.buffers.index_buffer.slice(..),
                wgpu::IndexFormat::Uint32,
            );

            for draw in &self.batch.draw_calls {
                let Some(texture) = self.textures.get(&draw.texture_key) else {
                    log::trace!("Skipping draw with unknown texture {}", draw.texture_key);
                    continue;
                };
                let need_rebind = match last_bound_texture_key {
                    Some(last) => **last != *draw.texture_key,
                    None => true,
                };
                if need_rebind {
                    render_pass.set_bind_group(1, &texture.bind_group, &[]);
                    last_bound_texture_key = Some(&draw.texture_key);
                }
                render_pass.draw_indexed(
                    draw.index_start..(draw.index_start + draw.index_count),
                    0,
                    0..1,
                );
            }
        }

        self.ui.upload(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &ui_frame,
            &screen_descriptor,
        );

        {
            let mut egui_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();

            self.ui.paint(&mut egui_pass, &ui_frame, &screen_descriptor);
        }

        self.ui.cleanup(&ui_frame);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

struct App {
    config: PlatformConfig,
    game_config: GameConfig,
    state: Option<EngineState>,
}

impl App {
    fn new(game_config: GameConfig) -> Self {
        Self {
            config: PlatformConfig::with_canvas(game_config.width, game_config.height),
            game_config,
            state: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let engine = create_window(event_loop, &self.config)
            .and_then(|window| EngineState::new(window, &self.game_config));
        match engine {
            Ok(engine) => {
                log::info!(
                    "Window created: {}x{}",
                    self.config.width,
                    self.config.height
                );
                self.state = Some(engine);
            }
            Err(err) => {
                log::error!("Startup failed: {err}");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match self.state.as_mut() {
            Some(s) => s,
            None => return,
        };

        let egui_consumed = state.ui.handle_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                let w = physical_size.width;
                let h = physical_size.height;
                if w > 0 && h > 0 {
                    state.gpu.resize(w, h);
                    log::info!("Resized to {}x{}", w, h);
                }
            }

            WindowEvent::KeyboardInput { event, .. } if !egui_consumed => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(game_key) = map_key(key_code) {
                        match event.state {
                            ElementState::Pressed => state.input.key_down(game_key),
                            ElementState::Released => state.input.key_up(game_key),
                        }
                    }
                }
                if event.state == ElementState::Pressed {
                    if let Some(text) = &event.text {
                        state.input.push_text(text);
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                // Screens work in canvas (logical) pixels.
                let logical = position.to_logical::<f64>(state.window.scale_factor());
                state.input.mouse_position = (logical.x, logical.y);
            }

            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } if !egui_consumed => {
                if let Some(btn) = map_mouse_button(button) {
                    match button_state {
                        ElementState::Pressed => state.input.mouse_down(btn),
                        ElementState::Released => state.input.mouse_up(btn),
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                if state.gpu.size.0 == 0 || state.gpu.size.1 == 0 {
                    return;
                }

                state.time.begin_frame();
                while state.time.should_step() {
                    if state.input.is_just_pressed(Key::F3) {
                        state.ui.toggle_debug();
                    }
                    if !state
                        .flow
                        .step(&state.input, &mut state.assets, &mut state.audio)
                    {
                        event_loop.exit();
                        return;
                    }
                    state.input.end_frame();
                }

                state.sync_textures();
                state.rebuild_batch();
                state.render();
            }

            _ => {}
        }
    }
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        KeyCode::Space => Some(Key::Space),
        KeyCode::KeyF => Some(Key::F),
        KeyCode::Enter | KeyCode::NumpadEnter => Some(Key::Enter),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::F3 => Some(Key::F3),
        _ => None,
    }
}

fn map_mouse_button(button: MouseButton) -> Option<MouseBtn> {
    match button {
        MouseButton::Left => Some(MouseBtn::Left),
        MouseButton::Right => Some(MouseBtn::Right),
        _ => None,
    }
}

/// Config file overrides, or the built-in tuning when it is missing or bad.
fn load_game_config(path: &Path) -> GameConfig {
    match load_config_from_path(path) {
        Ok(config) => {
            log::info!("Loaded config {}", path.display());
            config
        }
        Err(err) => {
            log::warn!("{err}; using built-in defaults");
            GameConfig::default()
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Epic Platformer Adventure starting...");

    let game_config = load_game_config(Path::new(CONFIG_PATH));

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {e}");
            return;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(game_config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {e}");
    }
}
