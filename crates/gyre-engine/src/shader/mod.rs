//! Shader-program lifecycle: per-stage compilation, linking, uniform upload.
//!
//! Failure reporting is part of the contract here, not incidental: compile
//! and link errors carry the driver's info log, and a program that failed
//! to link never exists as a bindable value. Intermediate stage objects are
//! released once linking succeeds.

mod error;
mod program;

pub use error::ShaderError;
pub use program::{CompiledShader, ShaderProgram, ShaderStage};
