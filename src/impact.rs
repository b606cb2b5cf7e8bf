//! Estimated impact of completing a maintenance action.
//!
//! Until historical outcome data exists, estimates come from a static
//! per-type table with a generic fallback. The [`ImpactEstimator`] trait is
//! the seam a historical estimator will plug into; its output contract is
//! three optional deltas and does not change.

use crate::core::SystemType;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Where an estimate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactSource {
    /// A (system type, category) override
    CategoryDefault,
    /// Per-type default
    TypeDefault,
    /// Generic estimate for unrecognized types
    GenericFallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactEstimate {
    /// Change in health score points
    pub score_change: Option<f64>,
    /// Months of lifespan added
    pub months_added: Option<f64>,
    /// Reduction in 12-month failure probability (0-1 units)
    pub failure_prob_reduction: Option<f64>,
    pub source: ImpactSource,
}

pub trait ImpactEstimator: Send + Sync {
    fn estimate(&self, system_type: &SystemType, category: Option<&str>) -> ImpactEstimate;

    /// Name of the estimator for reporting
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Deltas {
    score_change: f64,
    months_added: f64,
    failure_prob_reduction: f64,
}

const fn deltas(score_change: f64, months_added: f64, failure_prob_reduction: f64) -> Deltas {
    Deltas {
        score_change,
        months_added,
        failure_prob_reduction,
    }
}

const GENERIC: Deltas = deltas(3.0, 3.0, 0.02);

const CATEGORY_OVERRIDES: &[(&str, &str, Deltas)] = &[
    ("hvac", "filter_replacement", deltas(3.0, 2.0, 0.02)),
    ("hvac", "tune_up", deltas(6.0, 9.0, 0.06)),
    ("roof", "gutter_cleaning", deltas(2.0, 3.0, 0.01)),
    ("roof", "inspection", deltas(3.0, 6.0, 0.02)),
    ("water_heater", "flush", deltas(4.0, 6.0, 0.04)),
    ("water_heater", "anode_rod", deltas(6.0, 18.0, 0.05)),
];

/// Calibrated placeholder table.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticImpactTable;

impl StaticImpactTable {
    fn type_default(system_type: &SystemType) -> Option<Deltas> {
        match system_type {
            SystemType::Hvac => Some(deltas(5.0, 6.0, 0.05)),
            SystemType::Roof => Some(deltas(4.0, 12.0, 0.03)),
            SystemType::WaterHeater => Some(deltas(6.0, 4.0, 0.06)),
            SystemType::Other(_) => None,
        }
    }

    fn category_override(system_type: &SystemType, category: &str) -> Option<Deltas> {
        let key = category.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        CATEGORY_OVERRIDES
            .iter()
            .find(|(t, c, _)| *t == system_type.as_str() && *c == key)
            .map(|(_, _, d)| *d)
    }
}

impl ImpactEstimator for StaticImpactTable {
    fn estimate(&self, system_type: &SystemType, category: Option<&str>) -> ImpactEstimate {
        let (found, source) = match category.and_then(|c| Self::category_override(system_type, c)) {
            Some(d) => (d, ImpactSource::CategoryDefault),
            None => match Self::type_default(system_type) {
                Some(d) => (d, ImpactSource::TypeDefault),
                None => {
                    warn!(
                        system_type = %system_type,
                        "No impact defaults for system type; using generic estimate"
                    );
                    (GENERIC, ImpactSource::GenericFallback)
                }
            },
        };

        ImpactEstimate {
            score_change: Some(found.score_change),
            months_added: Some(found.months_added),
            failure_prob_reduction: Some(found.failure_prob_reduction),
            source,
        }
    }

    fn name(&self) -> &str {
        "static-table"
    }
}

/// Estimate with the static table.
pub fn estimated_impact(system_type: &SystemType, category: Option<&str>) -> ImpactEstimate {
    StaticImpactTable.estimate(system_type, category)
}
