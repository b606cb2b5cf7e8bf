//! Logging setup and crash reporting.
//!
//! Logging goes to stderr through `tracing-subscriber`. `RUST_LOG` wins over
//! the configured level so a single run can be traced without editing
//! `.homerisk.toml`. Stdout stays reserved for command output.

pub mod context;
pub mod panic_hook;

pub use context::{
    get_current_context, set_current_system, set_phase, ContextGuard, ScoringContext,
    ScoringPhase,
};
pub use panic_hook::install_panic_hook;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Level used for `-v` counts: 0 keeps the configured level.
pub fn level_for_verbosity(configured: &str, verbosity: u8) -> String {
    match verbosity {
        0 => configured.to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}
