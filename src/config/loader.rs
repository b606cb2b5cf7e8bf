use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::HomeriskConfig;
use crate::core::{Error, Result, ResultExt};

pub const CONFIG_FILE_NAME: &str = ".homerisk.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::io::Result<String> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<HomeriskConfig> {
    let config = toml::from_str::<HomeriskConfig>(contents)?;
    config.validate()?;
    Ok(config)
}

/// Load an explicitly named config file; any failure is an error.
pub fn load_config_from(path: &Path) -> Result<HomeriskConfig> {
    let contents = read_config_file(path).map_err(|e| Error::FileSystem {
        message: format!("Failed to read config file: {}", e),
        path: Some(path.to_path_buf()),
        source: Some(e),
    })?;
    parse_config_at(path, &contents)
}

fn parse_config_at(path: &Path, contents: &str) -> Result<HomeriskConfig> {
    let config = parse_and_validate_config(contents)
        .context(format!("Invalid config {}", path.display()))?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Pure function to try loading config from a discovered path
///
/// A missing file is silent; an unreadable or invalid one is an error so
/// that a typo in a threshold never falls back to defaults unnoticed.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<Result<HomeriskConfig>> {
    match read_config_file(config_path) {
        Ok(contents) => Some(parse_config_at(config_path, &contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            tracing::warn!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            );
            None
        }
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.homerisk.toml`.
pub fn discover_config(start: PathBuf) -> Result<HomeriskConfig> {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            tracing::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            Ok(HomeriskConfig::default())
        })
}

/// Load config from `--config` if given, else discover from the working
/// directory.
pub fn load_config(explicit: Option<&Path>) -> Result<HomeriskConfig> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }

    match std::env::current_dir() {
        Ok(dir) => discover_config(dir),
        Err(e) => {
            tracing::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            Ok(HomeriskConfig::default())
        }
    }
}

/// Template written by `homerisk init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Homerisk Configuration

# Calibration set used for new results. Stored results keep their own tag.
calibration_version = "2024.1"

[home]
# Intervention score (dollars) at or above which an alert is eligible
intervention_threshold = 500.0

[timeline]
horizon_years = 15

[logging]
# Overridden by RUST_LOG when set
level = "warn"
"#;
