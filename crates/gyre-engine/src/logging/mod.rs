//! Logging utilities.
//!
//! Centralizes logger initialization behind the `log` facade so drivers
//! stay one-liner simple and diagnostics share one format.

mod init;

pub use init::{init_logging, LoggingConfig};
