use std::num::NonZeroU32;

use anyhow::{anyhow, Context as _, Result};
use glow::HasContext;
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

/// Initialization parameters for the GL layer.
///
/// Keep this structure stable and minimal. Add flags only when a concrete
/// platform or demo requirement exists.
#[derive(Debug, Clone)]
pub struct GlInit {
    /// Synchronize presentation with the display refresh.
    pub vsync: bool,

    /// Requested depth buffer size in bits.
    pub depth_size: u8,

    /// Enable depth testing after context creation.
    ///
    /// 3D drivers want this; a flat driver can turn it off.
    pub depth_test: bool,

    /// Requested context version; 3.3 core is the baseline the shader
    /// sources target.
    pub gl_version: (u8, u8),
}

impl Default for GlInit {
    fn default() -> Self {
        Self {
            vsync: true,
            depth_size: 24,
            depth_test: true,
            gl_version: (3, 3),
        }
    }
}

/// Owns the GL context, the window surface, and the loaded function table.
///
/// This type is the low-level rendering context:
/// - builds the display/config/context/surface chain for a window
/// - exposes the [`glow::Context`] everything above renders through
/// - presents frames and reconfigures the surface on resize
pub struct Gl {
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
    gl: glow::Context,
    size: PhysicalSize<u32>,
}

impl Gl {
    /// Creates the window together with its GL context.
    ///
    /// Window and config must be chosen together (pixel-format constraints
    /// differ per platform), which is why this takes the event loop and the
    /// window attributes rather than a finished window.
    pub fn new(
        event_loop: &ActiveEventLoop,
        window_attributes: WindowAttributes,
        init: GlInit,
    ) -> Result<(Window, Self)> {
        let template = ConfigTemplateBuilder::new().with_depth_size(init.depth_size);

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(window_attributes))
            .build(event_loop, template, |mut configs| {
                configs.next().expect("no matching GL configs")
            })
            .map_err(|e| anyhow!("failed to create GL display: {e}"))?;

        let window = window.ok_or_else(|| anyhow!("display builder returned no window"))?;
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let raw_window_handle = window.window_handle().ok().map(|h| h.as_raw());
        let display = gl_config.display();

        let (major, minor) = init.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_profile(GlProfile::Core)
            .build(raw_window_handle);

        let not_current = unsafe { display.create_context(&gl_config, &context_attributes) }
            .context("failed to create GL context")?;

        let surface_attributes = window
            .build_surface_attributes(SurfaceAttributesBuilder::<WindowSurface>::new())
            .context("failed to build surface attributes")?;
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attributes) }
            .context("failed to create window surface")?;

        let context = not_current
            .make_current(&surface)
            .context("failed to make GL context current")?;

        if init.vsync {
            if let Err(e) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN))
            {
                log::warn!("vsync unavailable: {e}");
            }
        }

        let gl =
            unsafe { glow::Context::from_loader_function_cstr(|s| display.get_proc_address(s)) };

        unsafe {
            gl.viewport(0, 0, size.width as i32, size.height as i32);
            if init.depth_test {
                gl.enable(glow::DEPTH_TEST);
            }
            log::debug!(
                "GL context ready: {} on {}",
                gl.get_parameter_string(glow::VERSION),
                gl.get_parameter_string(glow::RENDERER),
            );
        }

        Ok((window, Gl { context, surface, gl, size }))
    }

    /// Returns the loaded GL function table.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Returns the current drawable size (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Reconfigures the surface and viewport after a resize.
    ///
    /// A zero-sized resize (minimized window) only updates internal state;
    /// surface reconfiguration is deferred until a real size arrives.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        let (Some(width), Some(height)) =
            (NonZeroU32::new(new_size.width), NonZeroU32::new(new_size.height))
        else {
            return;
        };

        self.surface.resize(&self.context, width, height);
        unsafe { self.gl.viewport(0, 0, new_size.width as i32, new_size.height as i32) };
    }

    /// Clears the color and depth buffers.
    pub fn clear(&self, color: [f32; 4]) {
        unsafe {
            self.gl.clear_color(color[0], color[1], color[2], color[3]);
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    /// Returns the pending GL error code, if any.
    ///
    /// GL errors are sticky; the loop polls once per frame after the draw
    /// so a broken frame surfaces immediately instead of rendering garbage.
    pub fn poll_error(&self) -> Option<u32> {
        let code = unsafe { self.gl.get_error() };
        (code != glow::NO_ERROR).then_some(code)
    }

    /// Swaps buffers, presenting the frame.
    ///
    /// The implicit wait for display refresh (vsync) happens here; it is
    /// the only blocking point in the loop.
    pub fn present(&self) -> Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .context("failed to swap buffers")
    }
}

/// Human-readable name for a GL error code.
pub(crate) fn error_name(code: u32) -> &'static str {
    match code {
        glow::INVALID_ENUM => "GL_INVALID_ENUM",
        glow::INVALID_VALUE => "GL_INVALID_VALUE",
        glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
        glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        _ => "unknown GL error",
    }
}
