//! Matrix math shared across the engine and drivers.
//!
//! Canonical conventions:
//! - Column-major storage (GL uniform layout, no transpose on upload)
//! - Right-handed view space, camera looking down -Z
//! - Angles in radians except where a name says degrees

mod mat4;

pub use mat4::Mat4;
