use anyhow::Result;
use winit::event::WindowEvent;

use crate::device::Gl;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Driver contract implemented by the demo binaries.
///
/// Lifecycle: `on_ready` once after the GL context exists, `on_frame` once
/// per presented frame while running, `on_shutdown` once on the way out.
pub trait App {
    /// One-time resource setup: compile programs, upload buffers and
    /// textures. A failure here is fatal; the loop never starts rendering.
    fn on_ready(&mut self, gl: &mut Gl) -> Result<()> {
        let _ = gl;
        Ok(())
    }

    /// Called for raw window events the driver may care about.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;

    /// Explicit resource teardown while the GL context is still alive.
    fn on_shutdown(&mut self, gl: &mut Gl) {
        let _ = gl;
    }
}
