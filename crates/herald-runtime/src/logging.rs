//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! The `RUST_LOG` environment variable, when set, takes precedence over the
//! configured level; per-module filters from the configuration are applied on
//! top of either.
//!
//! ```rust,ignore
//! let config = herald_runtime::config::load_config()?;
//! herald_runtime::logging::init_from_config(&config.logging);
//! ```

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Initializes the global subscriber from the logging configuration.
///
/// Safe to call more than once; subsequent calls are no-ops.
pub fn init_from_config(config: &LoggingConfig) {
    let mut filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    for (module, level) in &config.filters {
        if let Ok(directive) = format!("{module}={level}").parse() {
            filter = filter.add_directive(directive);
        }
    }

    let _ = fmt()
        .compact()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

/// Initializes logging with a bare level string, for tools and tests.
pub fn init_with_level(level: &str) {
    init_from_config(&LoggingConfig {
        level: level.to_string(),
        filters: Default::default(),
    });
}
