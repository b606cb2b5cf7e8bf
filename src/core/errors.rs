//! Shared error types for the engine and its command-line surface

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for homerisk operations
#[derive(Debug, Error)]
pub enum Error {
    /// A replacement window was requested for a system with no install date.
    ///
    /// The engine never fabricates an install date; the caller must supply one.
    #[error("System '{system_id}' has no install date; a replacement window cannot be computed")]
    MissingInstallDate { system_id: String },

    /// A calibration version tag that no registered calibration set carries
    #[error("Unknown calibration version '{0}'")]
    UnknownCalibrationVersion(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed input documents (not out-of-range numbers, which are clamped)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a file system error with path context
    pub fn file_system(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: None,
        }
    }

    /// Create a missing-install-date error for a system
    pub fn missing_install_date(system_id: impl Into<String>) -> Self {
        Self::MissingInstallDate {
            system_id: system_id.into(),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }

    /// Whether the error is a caller precondition violation rather than an
    /// environment failure.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::MissingInstallDate { .. } | Self::InvalidInput(_)
        )
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
