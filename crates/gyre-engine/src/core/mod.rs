//! Core engine-facing contracts.
//!
//! This module defines the stable interface between the runtime (platform
//! loop) and the drivers. Drivers implement [`App`]; the runtime hands them
//! a [`FrameCtx`] once per frame and owns everything else.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
