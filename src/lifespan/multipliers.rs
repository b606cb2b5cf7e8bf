// Pure index-to-multiplier transforms for the lifespan model

use crate::calibration::MultiplierCoefficients;
use crate::core::{SystemInstance, UnitIndex};
use serde::{Deserialize, Serialize};

/// Every multiplier applied to the baseline median, kept for provenance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiplierBreakdown {
    pub climate: f64,
    pub maintenance: f64,
    pub installation: f64,
    pub usage: f64,
    pub environment: f64,
    pub missing_data: f64,
    /// Product of the six multipliers before clamping
    pub raw_total: f64,
    /// Product after clamping into the calibration band
    pub total: f64,
    pub clamped: bool,
}

/// Climate stress 1.0 shrinks lifespan by `climate_max_reduction`.
pub fn climate_multiplier(climate_stress: UnitIndex, coeffs: &MultiplierCoefficients) -> f64 {
    1.0 - coeffs.climate_max_reduction * climate_stress.value()
}

/// A perfect maintenance record extends lifespan by `maintenance_max_bonus`.
///
/// A zero score means "no maintenance evidence", so it is neutral rather
/// than a penalty.
pub fn maintenance_multiplier(maintenance: UnitIndex, coeffs: &MultiplierCoefficients) -> f64 {
    1.0 + coeffs.maintenance_max_bonus * maintenance.value()
}

pub fn installation_multiplier(verified: bool, coeffs: &MultiplierCoefficients) -> f64 {
    if verified {
        1.0 + coeffs.verified_install_bonus
    } else {
        1.0
    }
}

pub fn usage_multiplier(usage: UnitIndex, coeffs: &MultiplierCoefficients) -> f64 {
    1.0 - coeffs.usage_max_reduction * usage.value()
}

pub fn environment_multiplier(environment: UnitIndex, coeffs: &MultiplierCoefficients) -> f64 {
    1.0 - coeffs.environment_max_reduction * environment.value()
}

/// Penalty grows as fewer indices are backed by real evidence.
pub fn missing_data_multiplier(completeness: UnitIndex, coeffs: &MultiplierCoefficients) -> f64 {
    1.0 - coeffs.missing_data_max_penalty * completeness.complement()
}

/// Clamp the combined multiplier so no combination of extreme inputs
/// produces an absurd lifespan.
pub fn clamp_total(raw_total: f64, coeffs: &MultiplierCoefficients) -> f64 {
    raw_total.clamp(coeffs.total_min, coeffs.total_max)
}

/// Compute all multipliers for an instance and their clamped product.
pub fn compute_multipliers(
    instance: &SystemInstance,
    coeffs: &MultiplierCoefficients,
) -> MultiplierBreakdown {
    let climate = climate_multiplier(instance.climate_stress_index, coeffs);
    let maintenance = maintenance_multiplier(instance.maintenance_score, coeffs);
    let installation = installation_multiplier(instance.installation_verified, coeffs);
    let usage = usage_multiplier(instance.usage_index, coeffs);
    let environment = environment_multiplier(instance.environment_index, coeffs);
    let missing_data = missing_data_multiplier(instance.feature_completeness, coeffs);

    let raw_total = climate * maintenance * installation * usage * environment * missing_data;
    let total = clamp_total(raw_total, coeffs);

    MultiplierBreakdown {
        climate,
        maintenance,
        installation,
        usage,
        environment,
        missing_data,
        raw_total,
        total,
        clamped: total != raw_total,
    }
}
