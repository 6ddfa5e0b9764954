use winit::window::{Window, WindowId};

use crate::device::{error_name, Gl};
use crate::time::FrameTime;

use super::app::AppControl;

/// Window handle and metadata for the current frame.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Width / height of the drawable, the projection aspect ratio.
    pub fn aspect_ratio(&self) -> f32 {
        let size = self.window.inner_size();
        if size.height == 0 {
            return 1.0;
        }
        size.width as f32 / size.height as f32
    }
}

/// Per-frame context passed to [`crate::core::App::on_frame`].
pub struct FrameCtx<'a> {
    pub window: WindowCtx<'a>,
    pub gl: &'a mut Gl,
    pub time: FrameTime,
}

impl<'a> FrameCtx<'a> {
    /// Clears with `clear`, calls `draw` with the GL function table, then
    /// presents the frame.
    ///
    /// Per-frame GPU failures are not recoverable in this loop: a pending
    /// GL error after the draw, or a failed buffer swap, is logged and
    /// terminates the loop instead of rendering with broken state.
    pub fn render<F>(&mut self, clear: [f32; 4], draw: F) -> AppControl
    where
        F: FnOnce(&glow::Context),
    {
        self.gl.clear(clear);

        draw(self.gl.gl());

        if let Some(code) = self.gl.poll_error() {
            log::error!("GL error during frame {}: {}", self.time.frame_index, error_name(code));
            return AppControl::Exit;
        }

        self.window.window.pre_present_notify();

        if let Err(e) = self.gl.present() {
            log::error!("present failed: {e:#}");
            return AppControl::Exit;
        }

        AppControl::Continue
    }
}
