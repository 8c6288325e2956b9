//! Standalone window backed by winit.
//!
//! The window forwards pointer, wheel and key input into a [`FarmApp`] and
//! drives its frames. Drawing is left to the embedding renderer; the viewer
//! only reports the camera pose when a frame asks for a redraw.
//!
//! ```no_run
//! # use farmstead::Viewer;
//! Viewer::builder()
//!     .with_title("Farm")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use web_time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    app::FarmApp, error::FarmsteadError, options::Options, InputEvent,
    MouseButton,
};

/// How often the smoothed frame rate is logged.
const FPS_LOG_INTERVAL: Duration = Duration::from_secs(5);

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
#[derive(Debug)]
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: None,
            title: "Farmstead".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window hosting the farm demo.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to enter
/// the event loop.
#[derive(Debug)]
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed or the app exits.
    pub fn run(self) -> Result<(), FarmsteadError> {
        let event_loop = EventLoop::new()
            .map_err(|e| FarmsteadError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut handler = ViewerApp {
            window: None,
            app: None,
            options: self.options,
            title: self.title,
            cursor: (0.0, 0.0),
            last_fps_log: Instant::now(),
        };

        event_loop
            .run_app(&mut handler)
            .map_err(|e| FarmsteadError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    app: Option<FarmApp>,
    options: Options,
    title: String,
    /// Last cursor position; button events carry no coordinates.
    cursor: (f64, f64),
    last_fps_log: Instant,
}

fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ViewerApp {
    /// Forward an event; leave the loop once the app has shut down.
    fn forward(&mut self, event_loop: &ActiveEventLoop, event: &InputEvent) {
        let Some(app) = &mut self.app else {
            return;
        };
        let _ = app.handle_input(event);
        if app.has_exited() {
            log::info!("exit requested, closing window");
            event_loop.exit();
        } else if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let app = FarmApp::new(&self.options, viewport_size(window.inner_size()));

        window.request_redraw();
        self.window = Some(window);
        self.app = Some(app);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            if let Some(app) = &mut self.app {
                app.exit();
            }
            event_loop.exit();
            return;
        }

        if self.window.is_none() || self.app.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                let (w, h) = viewport_size(size);
                if let Some(app) = &mut self.app {
                    app.resize(w, h);
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(app) = &mut self.app else {
                    return;
                };
                if app.frame() {
                    let camera = app.camera();
                    log::trace!(
                        "draw: eye={:?} forward={:?}",
                        camera.position,
                        camera.forward()
                    );
                }

                let now = Instant::now();
                if now.duration_since(self.last_fps_log) >= FPS_LOG_INTERVAL {
                    log::debug!("{:.1} fps", app.fps());
                    self.last_fps_log = now;
                }

                if app.is_animating() {
                    if let Some(w) = &self.window {
                        w.request_redraw();
                    }
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                let button = MouseButton::from(button);
                let input = if state == ElementState::Pressed {
                    let (x, y) = self.cursor;
                    InputEvent::PointerDown { button, x, y }
                } else {
                    InputEvent::PointerUp { button }
                };
                self.forward(event_loop, &input);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x, position.y);
                self.forward(
                    event_loop,
                    &InputEvent::PointerMove {
                        x: position.x,
                        y: position.y,
                    },
                );
            }

            WindowEvent::MouseWheel { delta, .. } => {
                // winit reports scrolling away from the user as positive
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -f64::from(y),
                    MouseScrollDelta::PixelDelta(pos) => -pos.y * 0.01,
                };
                self.forward(event_loop, &InputEvent::Wheel { delta });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key = format!("{code:?}");
                self.forward(event_loop, &InputEvent::KeyDown { key });
            }

            _ => (),
        }
    }
}
