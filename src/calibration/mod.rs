//! Versioned calibration constants.
//!
//! Every tunable number the engine uses lives in a [`Calibration`] value.
//! Calibration sets are `const` items registered under a version tag and
//! are never edited in place: retuning means adding a new set with a new
//! tag, so results computed under an older tag stay reproducible.

use crate::core::{Error, Result, SystemType};
use serde::Serialize;

/// Baseline lifespan distribution for one system type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LifespanBaseline {
    /// Median years from install to replacement under neutral conditions
    pub median_years: f64,
    /// Standard deviation of the lifespan around the median
    pub sigma_years: f64,
}

/// 12-month failure-probability curve for one system type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FailureCurve {
    /// Exponential decay rate per year of remaining life
    pub decay_rate: f64,
    /// Baseline probability for long-lived systems
    pub floor: f64,
    /// Probability at (or just before) end of life
    pub ceiling: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SystemCalibration {
    pub lifespan: LifespanBaseline,
    pub failure: FailureCurve,
}

/// Linear transforms from normalized indices to lifespan multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MultiplierCoefficients {
    /// Lifespan lost at climate stress 1.0
    pub climate_max_reduction: f64,
    /// Lifespan gained at maintenance score 1.0
    pub maintenance_max_bonus: f64,
    /// Fixed bonus for a verified installation
    pub verified_install_bonus: f64,
    /// Lifespan lost at usage index 1.0
    pub usage_max_reduction: f64,
    /// Lifespan lost at environment index 1.0
    pub environment_max_reduction: f64,
    /// Lifespan lost at feature completeness 0.0
    pub missing_data_max_penalty: f64,
    /// Band the product of all multipliers is clamped into
    pub total_min: f64,
    pub total_max: f64,
}

/// Percentile spread around the median lifespan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpreadCalibration {
    /// `k` in `sigma_base * (1 + k * (1 - completeness))`
    pub completeness_widening: f64,
    /// z-score of the 90th percentile of a standard normal
    pub z_p90: f64,
    /// Absolute bounds on the p10/p90 lifespans, in years
    pub min_tail_years: f64,
    pub max_tail_years: f64,
}

/// Weights of the evidence-quality confidence sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceWeights {
    pub base: f64,
    pub verified_install: f64,
    pub maintenance: f64,
    pub completeness: f64,
    pub usage_signal: f64,
}

/// Ceiling factor applied once a system is past its median lifespan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PastDueRamp {
    pub start_factor: f64,
    pub per_year_overdue: f64,
}

/// Remaining-life horizon at which probability settles on the floor.
pub const DEFAULT_LONG_LIVED_YEARS: f64 = 10.0;

/// Situational dollar add-ons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UrgencyPremiums {
    pub hurricane_season: f64,
    pub freeze_warning: f64,
    pub heat_wave: f64,
    pub peak_season: f64,
}

/// One immutable, versioned set of model constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Calibration {
    pub version: &'static str,
    pub hvac: SystemCalibration,
    pub roof: SystemCalibration,
    pub water_heater: SystemCalibration,
    pub multipliers: MultiplierCoefficients,
    pub spread: SpreadCalibration,
    pub confidence: ConfidenceWeights,
    pub past_due: PastDueRamp,
    pub long_lived_years: f64,
    pub urgency: UrgencyPremiums,
}

/// Calibration entry chosen for a system type, with the fallback flag set
/// when the type had no entry of its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationLookup<'a> {
    pub system: &'a SystemCalibration,
    pub fallback: bool,
}

impl Calibration {
    pub const V2024_1: Calibration = Calibration {
        version: "2024.1",
        hvac: SystemCalibration {
            lifespan: LifespanBaseline {
                median_years: 13.0,
                sigma_years: 3.0,
            },
            failure: FailureCurve {
                decay_rate: 0.30,
                floor: 0.02,
                ceiling: 0.45,
            },
        },
        roof: SystemCalibration {
            lifespan: LifespanBaseline {
                median_years: 22.0,
                sigma_years: 4.0,
            },
            // Roofs degrade gradually and often outlive estimates
            failure: FailureCurve {
                decay_rate: 0.18,
                floor: 0.01,
                ceiling: 0.35,
            },
        },
        water_heater: SystemCalibration {
            lifespan: LifespanBaseline {
                median_years: 10.0,
                sigma_years: 2.0,
            },
            // Sharp cutoff near end of life
            failure: FailureCurve {
                decay_rate: 0.45,
                floor: 0.03,
                ceiling: 0.60,
            },
        },
        multipliers: MultiplierCoefficients {
            climate_max_reduction: 0.18,
            maintenance_max_bonus: 0.10,
            verified_install_bonus: 0.05,
            usage_max_reduction: 0.12,
            environment_max_reduction: 0.10,
            missing_data_max_penalty: 0.08,
            total_min: 0.6,
            total_max: 1.3,
        },
        spread: SpreadCalibration {
            completeness_widening: 0.5,
            z_p90: 1.2816,
            min_tail_years: 3.0,
            max_tail_years: 30.0,
        },
        confidence: ConfidenceWeights {
            base: 0.30,
            verified_install: 0.15,
            maintenance: 0.15,
            completeness: 0.30,
            usage_signal: 0.10,
        },
        past_due: PastDueRamp {
            start_factor: 0.9,
            per_year_overdue: 0.02,
        },
        long_lived_years: DEFAULT_LONG_LIVED_YEARS,
        urgency: UrgencyPremiums {
            hurricane_season: 2500.0,
            freeze_warning: 1500.0,
            heat_wave: 1200.0,
            peak_season: 500.0,
        },
    };

    /// The calibration new results are computed under.
    pub fn current() -> &'static Calibration {
        &Self::V2024_1
    }

    /// Look up a registered calibration by its version tag.
    pub fn by_version(tag: &str) -> Result<&'static Calibration> {
        REGISTRY
            .iter()
            .copied()
            .find(|c| c.version == tag)
            .ok_or_else(|| Error::UnknownCalibrationVersion(tag.to_string()))
    }

    /// All registered version tags, oldest first.
    pub fn versions() -> impl Iterator<Item = &'static str> {
        REGISTRY.iter().map(|c| c.version)
    }

    /// Entry for a system type. Unknown types get HVAC's entry, flagged.
    pub fn for_system(&self, system_type: &SystemType) -> CalibrationLookup<'_> {
        match system_type {
            SystemType::Hvac => CalibrationLookup {
                system: &self.hvac,
                fallback: false,
            },
            SystemType::Roof => CalibrationLookup {
                system: &self.roof,
                fallback: false,
            },
            SystemType::WaterHeater => CalibrationLookup {
                system: &self.water_heater,
                fallback: false,
            },
            SystemType::Other(_) => CalibrationLookup {
                system: &self.hvac,
                fallback: true,
            },
        }
    }
}

static REGISTRY: &[&Calibration] = &[&Calibration::V2024_1];
