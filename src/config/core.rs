use serde::{Deserialize, Serialize};

use crate::calibration::Calibration;
use crate::core::{Dollars, Error, Result};

/// Root configuration structure for homerisk
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HomeriskConfig {
    /// Calibration version tag new results are computed under
    #[serde(default)]
    pub calibration_version: Option<String>,

    /// Per-home alerting configuration
    #[serde(default)]
    pub home: Option<HomeConfig>,

    /// Timeline display configuration
    #[serde(default)]
    pub timeline: Option<TimelineConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HomeConfig {
    /// Intervention score (dollars) at or above which an alert is eligible
    #[serde(default = "default_intervention_threshold")]
    pub intervention_threshold: f64,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            intervention_threshold: default_intervention_threshold(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineConfig {
    #[serde(default = "default_horizon_years")]
    pub horizon_years: u32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            horizon_years: default_horizon_years(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

pub fn default_intervention_threshold() -> f64 {
    500.0
}

pub fn default_horizon_years() -> u32 {
    15
}

pub fn default_log_level() -> String {
    "warn".to_string()
}

impl HomeriskConfig {
    pub fn intervention_threshold(&self) -> Dollars {
        Dollars::new(
            self.home
                .as_ref()
                .map(|h| h.intervention_threshold)
                .unwrap_or_else(default_intervention_threshold),
        )
    }

    pub fn horizon_years(&self) -> u32 {
        self.timeline
            .as_ref()
            .map(|t| t.horizon_years)
            .unwrap_or_else(default_horizon_years)
    }

    pub fn log_level(&self) -> String {
        self.logging
            .as_ref()
            .map(|l| l.level.clone())
            .unwrap_or_else(default_log_level)
    }

    /// Calibration named by the config, or the current one.
    pub fn calibration(&self) -> Result<&'static Calibration> {
        match &self.calibration_version {
            Some(tag) => Calibration::by_version(tag),
            None => Ok(Calibration::current()),
        }
    }

    // Pure function: collect every validation problem
    pub fn collect_validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if let Some(home) = &self.home {
            if !home.intervention_threshold.is_finite() || home.intervention_threshold < 0.0 {
                errors.push(format!(
                    "home.intervention_threshold must be a non-negative number, got {}",
                    home.intervention_threshold
                ));
            }
        }

        if let Some(timeline) = &self.timeline {
            if timeline.horizon_years == 0 {
                errors.push("timeline.horizon_years must be at least 1".to_string());
            }
        }

        if let Some(tag) = &self.calibration_version {
            if Calibration::by_version(tag).is_err() {
                let known: Vec<_> = Calibration::versions().collect();
                errors.push(format!(
                    "calibration_version '{}' is not registered (known: {})",
                    tag,
                    known.join(", ")
                ));
            }
        }

        errors
    }

    pub fn validate(&self) -> Result<()> {
        let errors = self.collect_validation_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Configuration(errors.join("; ")))
        }
    }
}
