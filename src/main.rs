//! Glyph-atlas text rendering demo
//!
//! Bakes an ASCII atlas from a TTF at startup, then draws a few lines
//! of colored text every frame through the chunked text pass.

use glam::{Mat4, Vec3, Vec4};
use glyphbatch_core::TextBatcher;
use glyphbatch_font::{bake, AtlasConfig, BakedAtlas};
use glyphbatch_wgpu::TextPass;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 600;
const WINDOW_TITLE: &str = "glyphbatch";

const FONT_PATH: &str = "assets/fonts/regular.ttf";
const ATLAS_DUMP_PATH: &str = "font_atlas.png";

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.2,
    g: 0.2,
    b: 0.2,
    a: 1.0,
};

/// Orthographic view-projection spanning [-aspect, aspect] x [-1, 1].
fn view_projection(width: u32, height: u32) -> Mat4 {
    let aspect = width as f32 / height.max(1) as f32;
    Mat4::orthographic_rh(-aspect, aspect, -1.0, 1.0, -1.0, 1.0)
}

struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    text_pass: TextPass,
    batcher: TextBatcher,
}

impl GpuState {
    async fn new(window: Arc<Window>, atlas: BakedAtlas) -> Self {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone()).unwrap();

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .unwrap();

        log::info!("✓ Using GPU: {}", adapter.get_info().name);

        // Create device and queue
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .unwrap();

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let text_pass = TextPass::new(&device, &queue, surface_format, &atlas);
        text_pass.set_view_projection(&queue, view_projection(size.width, size.height));

        let batcher = TextBatcher::new(atlas.table, size.height);

        log::info!("✓ GPU state initialized");

        Self {
            surface,
            device,
            queue,
            config,
            text_pass,
            batcher,
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.text_pass
                .set_view_projection(&self.queue, view_projection(new_size.width, new_size.height));
            self.batcher.set_window_height(new_size.height);
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.batcher.begin();
        self.batcher.draw_text(
            "This is some text rendered on the GPU.",
            Vec3::new(-1.0, 0.0, 0.0),
            Vec4::new(1.0, 1.0, 1.0, 1.0),
            0.7,
        );
        self.batcher.draw_text(
            "The color of text can be changed too!",
            Vec3::new(-0.5, -0.4, 0.0),
            Vec4::new(0.1, 0.5, 1.0, 1.0),
            0.5,
        );
        self.batcher.draw_text(
            "glyph atlas example",
            Vec3::new(-0.8, 0.4, 0.0),
            Vec4::new(0.9, 0.2, 0.3, 1.0),
            1.0,
        );

        self.text_pass.render(
            &self.device,
            &self.queue,
            &view,
            self.batcher.vertices(),
            CLEAR_COLOR,
        );

        frame.present();
        Ok(())
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    atlas: Option<BakedAtlas>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window_attributes = Window::default_attributes()
                .with_title(WINDOW_TITLE)
                .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));

            let window = Arc::new(event_loop.create_window(window_attributes).unwrap());
            self.window = Some(window.clone());

            let Some(atlas) = self.atlas.take() else {
                return;
            };
            self.gpu_state = Some(pollster::block_on(GpuState::new(window, atlas)));
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),

            WindowEvent::Resized(new_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(new_size);
                }
            }

            WindowEvent::RedrawRequested => {
                if let (Some(window), Some(gpu_state)) = (&self.window, &mut self.gpu_state) {
                    match gpu_state.render() {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost) => gpu_state.resize(window.inner_size()),
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => log::warn!("Render error: {:?}", e),
                    }
                }
            }

            _ => {}
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let font_bytes = match std::fs::read(FONT_PATH) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("Failed to read font file {}: {}", FONT_PATH, e);
            std::process::exit(1);
        }
    };

    let atlas = match bake(&font_bytes, &AtlasConfig::default()) {
        Ok(atlas) => atlas,
        Err(e) => {
            log::error!("Failed to bake glyph atlas: {}", e);
            std::process::exit(1);
        }
    };
    log::info!(
        "✓ Baked {}x{} glyph atlas from {}",
        atlas.width,
        atlas.height,
        FONT_PATH
    );

    if let Err(e) = atlas.write_png(std::path::Path::new(ATLAS_DUMP_PATH)) {
        log::warn!("Failed to dump atlas to {}: {}", ATLAS_DUMP_PATH, e);
    }

    let event_loop = EventLoop::new().unwrap();
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App {
        window: None,
        gpu_state: None,
        atlas: Some(atlas),
    };

    event_loop.run_app(&mut app).unwrap();
}
