//! Per-frame transform composition.
//!
//! One `Transforms` value per driver; `mvp()` is a pure function of the
//! elapsed time and the fixed camera/projection parameters, so frames are
//! replayable and the composition is testable without a GL context.

mod transforms;

pub use transforms::Transforms;
