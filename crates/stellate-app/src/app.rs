//! Core application state and lifecycle.

use std::sync::Arc;

use peniko::Color;
use stellate_core::{ControlEvent, RatingControl};
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::ui::{rating_title, render_ui};

/// Errors that stop the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("Surface creation failed: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("No suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("Device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("Surface is not supported by the adapter")]
    UnsupportedSurface,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 480,
            height: 320,
            background_color: Color::from_rgba8(250, 250, 250, 255),
        }
    }
}

/// GPU handles for the window surface.
struct Gpu {
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl Gpu {
    fn new(window: Arc<Window>, width: u32, height: u32) -> Result<Self, AppError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window)?;
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        }))?;
        let (device, queue) =
            pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default()))?;

        // egui expects a non-sRGB target
        let capabilities = surface.get_capabilities(&adapter);
        let format = capabilities
            .formats
            .iter()
            .copied()
            .find(|format| !format.is_srgb())
            .or_else(|| capabilities.formats.first().copied())
            .ok_or(AppError::UnsupportedSurface)?;
        let mut surface_config = surface
            .get_default_config(&adapter, width, height)
            .ok_or(AppError::UnsupportedSurface)?;
        surface_config.format = format;
        surface_config.present_mode = wgpu::PresentMode::AutoVsync;
        surface.configure(&device, &surface_config);

        Ok(Self {
            surface,
            surface_config,
            device,
            queue,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
    }
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    gpu: Gpu,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,

    // State
    control: RatingControl,
    config: AppConfig,
}

impl AppState {
    fn new(event_loop: &ActiveEventLoop, config: &AppConfig) -> Result<Self, AppError> {
        let mut control = RatingControl::new();

        let window_attrs = Window::default_attributes()
            .with_title(rating_title(control.value()))
            .with_inner_size(LogicalSize::new(config.width, config.height));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (config.width, config.height)
        } else {
            (size.width, size.height)
        };
        log::info!("Surface size: {}x{}", width, height);

        let gpu = Gpu::new(window.clone(), width, height)?;

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &gpu.device,
            gpu.surface_config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let listener_window = window.clone();
        control.add_listener(ControlEvent::ValueChanged, move |action| {
            listener_window.set_title(&rating_title(action.value));
        });

        Ok(Self {
            window,
            gpu,
            egui_ctx,
            egui_state,
            egui_renderer,
            control,
            config: config.clone(),
        })
    }

    fn redraw(&mut self) {
        let egui_input = self.egui_state.take_egui_input(&self.window);
        let control = &mut self.control;
        let egui_output = self.egui_ctx.run(egui_input, |ctx| {
            if render_ui(ctx, &mut *control) {
                log::info!("Rating set to {}", control.value());
            }
        });

        self.egui_state
            .handle_platform_output(&self.window, egui_output.platform_output);
        let egui_primitives = self
            .egui_ctx
            .tessellate(egui_output.shapes, egui_output.pixels_per_point);

        let surface_texture = match self.gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                let size = self.window.inner_size();
                self.gpu.resize(size.width.max(1), size.height.max(1));
                self.window.request_redraw();
                return;
            }
            Err(e) => {
                log::warn!("Failed to get surface texture: {:?}", e);
                return;
            }
        };
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let device = &self.gpu.device;
        let queue = &self.gpu.queue;

        // Update egui textures
        for (id, image_delta) in &egui_output.textures_delta.set {
            self.egui_renderer.update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.surface_config.width, self.gpu.surface_config.height],
            pixels_per_point: egui_output.pixels_per_point,
        };

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui encoder"),
        });
        self.egui_renderer.update_buffers(
            device,
            queue,
            &mut encoder,
            &egui_primitives,
            &screen_descriptor,
        );

        let [r, g, b, a] = self.config.background_color.components;
        let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("egui render pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &surface_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: f64::from(r),
                        g: f64::from(g),
                        b: f64::from(b),
                        a: f64::from(a),
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        // Use forget_lifetime to satisfy egui-wgpu's 'static requirement
        let mut render_pass = render_pass.forget_lifetime();
        self.egui_renderer
            .render(&mut render_pass, &egui_primitives, &screen_descriptor);
        drop(render_pass);

        queue.submit(std::iter::once(encoder.finish()));

        // Free egui textures
        for id in &egui_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        surface_texture.present();

        // Keep drawing while a flare is running
        let repaint_now = egui_output
            .viewport_output
            .get(&egui::ViewportId::ROOT)
            .is_some_and(|viewport| viewport.repaint_delay.is_zero());
        if repaint_now {
            self.window.request_redraw();
        }
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    error: Option<AppError>,
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            error: None,
        }
    }

    /// Run the application until the window closes.
    pub fn run(config: AppConfig) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        let mut app = App::with_config(config);
        event_loop.run_app(&mut app)?;
        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        log::info!("Creating window...");
        match AppState::new(event_loop, &self.config) {
            Ok(state) => {
                log::info!("Stellate initialized");
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("Initialization failed: {}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        // egui sees every event; the rating bar reads pointer input from it
        let egui_response = state.egui_state.on_window_event(&state.window, &event);
        if egui_response.repaint {
            state.window.request_redraw();
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                state.gpu.resize(size.width, size.height);
                state.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                state.redraw();
            }

            _ => {}
        }
    }
}
