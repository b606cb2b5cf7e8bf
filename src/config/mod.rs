//! Configuration for the homerisk command-line surface.
//!
//! The scoring engine itself takes every parameter explicitly; this module
//! only supplies defaults for the binary: the per-home intervention
//! threshold, the timeline horizon, the calibration version and the log
//! level. Configuration lives in `.homerisk.toml`, found in the working
//! directory or one of its ancestors.

mod core;
mod loader;

pub use self::core::{
    default_horizon_years, default_intervention_threshold, default_log_level, HomeConfig,
    HomeriskConfig, LoggingConfig, TimelineConfig,
};
pub use self::loader::{
    directory_ancestors, discover_config, load_config, load_config_from,
    parse_and_validate_config, CONFIG_FILE_NAME, DEFAULT_CONFIG_TEMPLATE,
};
