use std::sync::Once;

/// Logger configuration.
///
/// `filter` follows the `env_logger` syntax (e.g. "info",
/// "gyre_engine=debug"). When unset, `RUST_LOG` applies, then the
/// `default_level` floor.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    pub default_level: Option<log::LevelFilter>,
}

static INIT: Once = Once::new();

/// Initializes the global logger once; subsequent calls are ignored.
///
/// Intended usage is the first line of `main`, before the runtime starts,
/// so context-creation diagnostics are not lost.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.filter.as_deref() {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(config.default_level.unwrap_or(log::LevelFilter::Info));
        }

        builder.init();
    });
}
