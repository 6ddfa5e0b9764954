use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gl, GlInit};
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "gyre".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
        }
    }
}

/// Entry point for the runtime.
///
/// Drives a single window through two states: running, then terminated
/// once the close signal arrives (window close request or an app callback
/// returning [`AppControl::Exit`]).
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, gl_init: GlInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = LoopState::new(config, gl_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct LoopState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gl_init: GlInit,
    app: A,

    window: Option<Window>,
    gl: Option<Gl>,
    clock: FrameClock,

    exit_requested: bool,
    fatal: Option<anyhow::Error>,
}

impl<A> LoopState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gl_init: GlInit, app: A) -> Self {
        Self {
            config,
            gl_init,
            app,
            window: None,
            gl: None,
            clock: FrameClock::new(),
            exit_requested: false,
            fatal: None,
        }
    }

    /// Tears down app resources while the context is still alive, then
    /// leaves the event loop.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if !self.exit_requested {
            self.exit_requested = true;
            if let Some(gl) = self.gl.as_mut() {
                self.app.on_shutdown(gl);
            }
        }
        self.gl = None;
        self.window = None;
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, e: anyhow::Error) {
        log::error!("{e:#}");
        self.fatal = Some(e);
        self.exit_requested = true;
        self.gl = None;
        self.window = None;
        event_loop.exit();
    }
}

impl<A> ApplicationHandler for LoopState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let (window, mut gl) = match Gl::new(event_loop, attrs, self.gl_init.clone()) {
            Ok(pair) => pair,
            Err(e) => {
                self.fail(event_loop, e.context("GL initialization failed"));
                return;
            }
        };

        if let Err(e) = self.app.on_ready(&mut gl) {
            self.fail(event_loop, e.context("app setup failed"));
            return;
        }

        self.clock.reset();
        window.request_redraw();
        self.window = Some(window);
        self.gl = Some(gl);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: each presented frame requests the next.
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let owns_event = self.window.as_ref().is_some_and(|w| w.id() == window_id);
        if !owns_event {
            return;
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.shutdown(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.shutdown(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                if let Some(gl) = self.gl.as_mut() {
                    gl.resize(new_size);
                }
                if let Some(window) = self.window.as_ref() {
                    window.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => {
                let (Some(window), Some(gl)) = (self.window.as_ref(), self.gl.as_mut()) else {
                    return;
                };

                let time = self.clock.tick();
                let control = {
                    let mut ctx = FrameCtx {
                        window: WindowCtx { id: window_id, window },
                        gl,
                        time,
                    };
                    self.app.on_frame(&mut ctx)
                };

                if control == AppControl::Exit {
                    self.shutdown(event_loop);
                }
            }

            _ => {}
        }
    }
}
