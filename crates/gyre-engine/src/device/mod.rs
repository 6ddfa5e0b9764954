//! GL device + surface management.
//!
//! This module is responsible for:
//! - creating the GL display, context, and window surface
//! - loading the GL function pointers
//! - presenting frames and handling resizes
//!
//! Everything above this layer talks to [`glow::Context`] and never to
//! glutin directly.

mod gl;

pub use gl::{Gl, GlInit};
pub(crate) use gl::error_name;
