//! Conversion of remaining life into a 12-month failure probability.
//!
//! Two entry points feed the intervention scorer: a years-remaining figure
//! (normally from a [`ReplacementWindow`]) run through a per-type
//! exponential calibration curve, and an externally computed 0-100 risk
//! outlook that is simply rescaled. Both produce a probability in [0, 1],
//! never a percentage.
//!
//! When a caller has both for the same system, the years-remaining path is
//! canonical; the outlook is only used when no window could be computed.

use crate::calibration::{Calibration, FailureCurve, PastDueRamp};
use crate::core::SystemType;
use crate::lifespan::ReplacementWindow;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Probability of failure in the next 12 months for a system with
/// `remaining_years` until its median replacement date.
///
/// Negative `remaining_years` means the system is that many years overdue.
pub fn failure_probability_12mo(remaining_years: f64, system_type: &SystemType) -> f64 {
    failure_probability_12mo_with(remaining_years, system_type, Calibration::current())
}

pub fn failure_probability_12mo_with(
    remaining_years: f64,
    system_type: &SystemType,
    calibration: &Calibration,
) -> f64 {
    let lookup = calibration.for_system(system_type);
    if lookup.fallback {
        warn!(
            system_type = %system_type,
            "No failure curve for system type; using HVAC curve"
        );
    }
    probability_on_curve(
        remaining_years,
        &lookup.system.failure,
        &calibration.past_due,
        calibration.long_lived_years,
    )
}

/// Evaluate one calibration curve.
pub fn probability_on_curve(
    remaining_years: f64,
    curve: &FailureCurve,
    past_due: &PastDueRamp,
    long_lived_years: f64,
) -> f64 {
    let remaining_years = if remaining_years.is_nan() {
        0.0
    } else {
        remaining_years
    };

    let probability = if remaining_years <= 0.0 {
        let overdue = -remaining_years;
        let factor = (past_due.start_factor + past_due.per_year_overdue * overdue).min(1.0);
        curve.ceiling * factor
    } else if remaining_years >= long_lived_years {
        curve.floor
    } else {
        (curve.ceiling * (-curve.decay_rate * remaining_years).exp())
            .clamp(curve.floor, curve.ceiling)
    };

    probability.clamp(0.0, 1.0)
}

/// Rescale a 0-100 risk outlook into a probability.
pub fn probability_from_risk_outlook(risk_outlook_pct: f64) -> f64 {
    if risk_outlook_pct.is_nan() {
        return 0.0;
    }
    (risk_outlook_pct / 100.0).clamp(0.0, 1.0)
}

/// Failure probability for a computed window.
///
/// Uses the signed remaining life from the window's provenance, so an
/// overdue system lands on the past-due branch of the curve even though
/// `years_remaining` itself is floored at zero.
pub fn failure_probability_from_window(window: &ReplacementWindow, calibration: &Calibration) -> f64 {
    failure_probability_12mo_with(
        window.provenance.signed_years_remaining,
        &window.system_type,
        calibration,
    )
}

/// The forms a failure-risk input can take.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureProbabilityInput {
    /// Signed years until the median replacement date
    YearsRemaining(f64),
    /// Externally computed risk outlook, 0-100
    RiskOutlookPct(f64),
    /// Already a probability in [0, 1]
    Probability(f64),
}

impl FailureProbabilityInput {
    /// Pick the canonical input when both a window-derived remaining life
    /// and an external outlook may be present.
    pub fn canonical(years_remaining: Option<f64>, risk_outlook_pct: Option<f64>) -> Option<Self> {
        match (years_remaining, risk_outlook_pct) {
            (Some(years), _) => Some(Self::YearsRemaining(years)),
            (None, Some(pct)) => Some(Self::RiskOutlookPct(pct)),
            (None, None) => None,
        }
    }

    /// Resolve to a probability in [0, 1].
    pub fn resolve(&self, system_type: &SystemType, calibration: &Calibration) -> f64 {
        match *self {
            Self::YearsRemaining(years) => {
                failure_probability_12mo_with(years, system_type, calibration)
            }
            Self::RiskOutlookPct(pct) => probability_from_risk_outlook(pct),
            Self::Probability(p) => {
                if p.is_nan() {
                    0.0
                } else {
                    p.clamp(0.0, 1.0)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn long_lived_systems_sit_on_the_floor() {
        assert_eq!(failure_probability_12mo(10.0, &SystemType::Hvac), 0.02);
        assert_eq!(failure_probability_12mo(25.0, &SystemType::Roof), 0.01);
    }

    #[test]
    fn end_of_life_starts_at_ninety_percent_of_ceiling() {
        assert!(approx(failure_probability_12mo(0.0, &SystemType::Hvac), 0.45 * 0.9));
    }

    #[test]
    fn overdue_ramps_to_ceiling_and_caps() {
        let two_years = failure_probability_12mo(-2.0, &SystemType::Hvac);
        assert!(approx(two_years, 0.45 * 0.94));
        let very_late = failure_probability_12mo(-40.0, &SystemType::Hvac);
        assert!(approx(very_late, 0.45));
    }

    #[test]
    fn mid_life_follows_exponential_decay() {
        let p = failure_probability_12mo(5.0, &SystemType::Hvac);
        assert!(approx(p, 0.45 * (-1.5f64).exp()));
    }

    #[test]
    fn water_heater_curve_is_clamped_to_floor() {
        // 0.60 * e^(-0.45 * 9) is below the 0.03 floor
        assert_eq!(failure_probability_12mo(9.0, &SystemType::WaterHeater), 0.03);
    }

    #[test]
    fn spot_values_decrease_for_every_type() {
        for system_type in [SystemType::Hvac, SystemType::Roof, SystemType::WaterHeater] {
            let at_0 = failure_probability_12mo(0.0, &system_type);
            let at_5 = failure_probability_12mo(5.0, &system_type);
            let at_10 = failure_probability_12mo(10.0, &system_type);
            assert!(at_0 > at_5, "{system_type}: {at_0} vs {at_5}");
            assert!(at_5 >= at_10, "{system_type}: {at_5} vs {at_10}");
        }
    }

    #[test]
    fn unknown_type_uses_hvac_curve() {
        let other = failure_probability_12mo(3.0, &SystemType::from("pool_pump"));
        assert_eq!(other, failure_probability_12mo(3.0, &SystemType::Hvac));
    }

    #[test]
    fn risk_outlook_is_divided_by_one_hundred() {
        assert!(approx(probability_from_risk_outlook(37.0), 0.37));
        assert_eq!(probability_from_risk_outlook(140.0), 1.0);
        assert_eq!(probability_from_risk_outlook(-5.0), 0.0);
    }

    #[test]
    fn years_remaining_wins_over_outlook() {
        let input = FailureProbabilityInput::canonical(Some(4.0), Some(90.0)).unwrap();
        assert_eq!(input, FailureProbabilityInput::YearsRemaining(4.0));
        let only_outlook = FailureProbabilityInput::canonical(None, Some(90.0)).unwrap();
        assert_eq!(only_outlook, FailureProbabilityInput::RiskOutlookPct(90.0));
        assert!(FailureProbabilityInput::canonical(None, None).is_none());
    }

    #[test]
    fn input_serde_shape() {
        let json = serde_json::to_string(&FailureProbabilityInput::RiskOutlookPct(42.0)).unwrap();
        assert_eq!(json, r#"{"risk_outlook_pct":42.0}"#);
    }

    #[test]
    fn resolve_agrees_on_units() {
        let cal = Calibration::current();
        let via_outlook = FailureProbabilityInput::RiskOutlookPct(50.0).resolve(&SystemType::Hvac, cal);
        let via_probability = FailureProbabilityInput::Probability(0.5).resolve(&SystemType::Hvac, cal);
        assert_eq!(via_outlook, via_probability);
    }
}
