//! Winit-based application shell
//!
//! [`App`] is a builder; [`App::run`] hands control to the winit event loop
//! and returns when the window closes.
//!
//! # Example
//!
//! ```rust,ignore
//! use walker::app::App;
//!
//! fn main() -> walker::Result<()> {
//!     env_logger::init();
//!     App::new()
//!         .with_title("Robot Walk")
//!         .with_model_path("assets/RobotExpressive.glb")
//!         .run()
//! }
//! ```
//!
//! # Per-frame order
//!
//! On every `RedrawRequested`: measure `dt`, [`Simulation::update`],
//! render, refresh the FPS in the title once a second.

pub mod input_adapter;

use std::path::PathBuf;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::assets::ModelLoad;
use crate::character::{Simulation, SimulationParams};
use crate::errors::{Result, WalkerError};
use crate::input::Key;
use crate::renderer::{RenderSettings, Renderer};
use crate::utils::{FpsCounter, Timer};

/// Window, model and renderer configuration.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub title: String,
    /// Logical window size.
    pub width: u32,
    pub height: u32,
    /// glTF / GLB file with the actor's rig and clips.
    pub model_path: PathBuf,
    pub render: RenderSettings,
    pub simulation: SimulationParams,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            title: "Robot Walk".into(),
            width: 1280,
            height: 720,
            model_path: PathBuf::from("assets/RobotExpressive.glb"),
            render: RenderSettings::default(),
            simulation: SimulationParams::default(),
        }
    }
}

/// Application builder.
pub struct App {
    settings: AppSettings,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self {
            settings: AppSettings::default(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.settings.title = title.into();
        self
    }

    #[must_use]
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings.model_path = path.into();
        self
    }

    /// Replaces every setting at once, title and model path included.
    #[must_use]
    pub fn with_settings(mut self, settings: AppSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Runs the event loop until the window is closed.
    pub fn run(self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut runner = AppRunner::new(self.settings);
        event_loop.run_app(&mut runner)?;

        match runner.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns the window and drives the simulation from winit's callbacks.
struct AppRunner {
    settings: AppSettings,
    window: Option<Arc<Window>>,
    renderer: Renderer,
    simulation: Simulation,
    timer: Timer,
    fps: FpsCounter,
    /// Set when startup fails; returned from [`App::run`].
    fatal: Option<WalkerError>,
}

impl AppRunner {
    fn new(settings: AppSettings) -> Self {
        let renderer = Renderer::new(settings.render.clone());
        let simulation = Simulation::new(settings.simulation);
        Self {
            settings,
            window: None,
            renderer,
            simulation,
            timer: Timer::new(),
            fps: FpsCounter::new(),
            fatal: None,
        }
    }

    fn start_model_load(&mut self) {
        let path = &self.settings.model_path;
        log::info!("Loading model {}", path.display());
        match ModelLoad::spawn(path.clone()) {
            Ok(load) => self.simulation.begin_load(load),
            Err(err) => {
                log::error!("Could not start model load: {err}");
                self.simulation.begin_load(ModelLoad::resolved(Err(err)));
            }
        }
    }

    fn frame(&mut self) {
        let dt = self.timer.tick();
        self.simulation.update(dt);
        self.renderer.render(&self.simulation);

        if let Some(fps) = self.fps.update()
            && let Some(window) = &self.window
        {
            window.set_title(&format!("{} | FPS: {fps:.2}", self.settings.title));
        }
    }
}

impl ApplicationHandler for AppRunner {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(&self.settings.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.settings.width,
                self.settings.height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("Failed to create window: {err}");
                self.fatal = Some(err.into());
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        log::info!("Initializing Renderer Backend...");

        let size = window.inner_size();
        if let Err(err) = pollster::block_on(self.renderer.init(window, size.width, size.height)) {
            log::error!("Fatal Renderer Error: {err}");
            self.fatal = Some(err);
            event_loop.exit();
            return;
        }
        self.simulation.resize(size.width, size.height);

        self.start_model_load();
        self.timer = Timer::new();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(physical_size) => {
                self.renderer
                    .resize(physical_size.width, physical_size.height);
                self.simulation
                    .resize(physical_size.width, physical_size.height);
            }
            WindowEvent::KeyboardInput { event, .. } => match input_adapter::key_down(&event) {
                Some(Key::Escape) => event_loop.exit(),
                Some(key) => {
                    self.simulation.handle_key(key);
                }
                None => {}
            },
            WindowEvent::RedrawRequested => {
                self.frame();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.renderer.is_initialized()
            && let Some(window) = &self.window
        {
            window.request_redraw();
        }
    }
}
