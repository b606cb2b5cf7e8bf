//! Intervention scoring and alert eligibility.
//!
//! Combines a 12-month failure probability, the emergency replacement cost
//! and a situational urgency premium into one dollar score, then compares
//! it against the home's own threshold. Crossing the threshold (inclusive)
//! is the only state transition here; cooldowns and snoozing belong to the
//! intervention lifecycle outside this crate.

pub mod context;
pub mod score;
pub mod snapshot;
pub mod urgency;

use crate::calibration::Calibration;
use crate::core::{Dollars, SystemType};
use crate::probability::FailureProbabilityInput;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use context::{ContextFlag, ContextFlagKind, RiskContext, UrgencyFlags, ValidityInterval};
pub use score::{intervention_score, InterventionScore};
pub use snapshot::InterventionSnapshot;
pub use urgency::{urgency_premium, urgency_premium_with, UrgencyFactors, UrgencyPremium};

/// Cost estimates supplied per home and system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostEstimates {
    pub emergency_replacement: Dollars,
    #[serde(default)]
    pub proactive_replacement: Option<Dollars>,
}

impl CostEstimates {
    pub fn emergency_only(emergency_replacement: f64) -> Self {
        Self {
            emergency_replacement: Dollars::new(emergency_replacement),
            proactive_replacement: None,
        }
    }

    /// What replacing ahead of failure saves, when a proactive quote exists.
    pub fn projected_savings(&self) -> Option<Dollars> {
        self.proactive_replacement
            .map(|proactive| Dollars::new(self.emergency_replacement.value() - proactive.value()))
    }
}

/// Live output of one eligibility call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub eligible: bool,
    pub score: f64,
    pub breakdown: InterventionScore,
    pub urgency_factors: UrgencyFactors,
    pub failure_probability_12mo: f64,
    pub threshold: f64,
    pub system_type: SystemType,
    /// Explanatory only; never part of the score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projected_savings: Option<f64>,
    pub calibration_version: String,
}

/// `score >= threshold`, boundary inclusive.
pub fn is_eligible(score: f64, threshold: Dollars) -> bool {
    score >= threshold.value()
}

pub fn intervention_eligibility(
    risk: FailureProbabilityInput,
    costs: &CostEstimates,
    system_type: &SystemType,
    flags: &UrgencyFlags,
    threshold: Dollars,
) -> EligibilityResult {
    intervention_eligibility_with(
        risk,
        costs,
        system_type,
        flags,
        threshold,
        Calibration::current(),
    )
}

/// Score one system and decide whether it should surface an alert.
pub fn intervention_eligibility_with(
    risk: FailureProbabilityInput,
    costs: &CostEstimates,
    system_type: &SystemType,
    flags: &UrgencyFlags,
    threshold: Dollars,
    calibration: &Calibration,
) -> EligibilityResult {
    let failure_probability_12mo = risk.resolve(system_type, calibration);
    let premium = urgency_premium_with(system_type, flags, &calibration.urgency);
    let breakdown = intervention_score(
        failure_probability_12mo,
        costs.emergency_replacement.value(),
        premium.amount.value(),
    );
    let eligible = is_eligible(breakdown.total, threshold);

    debug!(
        system_type = %system_type,
        failure_probability_12mo,
        score = breakdown.total,
        threshold = threshold.value(),
        eligible,
        "Scored intervention"
    );

    EligibilityResult {
        eligible,
        score: breakdown.total,
        breakdown,
        urgency_factors: premium.factors,
        failure_probability_12mo,
        threshold: threshold.value(),
        system_type: system_type.clone(),
        projected_savings: costs
            .projected_savings()
            .map(|d| d.rounded_to_cents().value()),
        calibration_version: calibration.version.to_string(),
    }
}

/// A complete scoring request as collaborators send it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRequest {
    #[serde(default)]
    pub system_id: Option<String>,
    pub system_type: SystemType,
    pub risk: FailureProbabilityInput,
    pub costs: CostEstimates,
    #[serde(default)]
    pub context: RiskContext,
    pub as_of: NaiveDate,
    /// Per-home threshold; falls back to the configured default when absent
    #[serde(default)]
    pub threshold: Option<Dollars>,
}

impl ScoringRequest {
    pub fn evaluate(&self, default_threshold: Dollars, calibration: &Calibration) -> EligibilityResult {
        let flags = self.context.flags_at(self.as_of);
        intervention_eligibility_with(
            self.risk,
            &self.costs,
            &self.system_type,
            &flags,
            self.threshold.unwrap_or(default_threshold),
            calibration,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_boundary_is_inclusive() {
        assert!(is_eligible(500.0, Dollars::new(500.0)));
        assert!(!is_eligible(499.99, Dollars::new(500.0)));
    }

    #[test]
    fn eligibility_flips_exactly_at_threshold() {
        let costs = CostEstimates::emergency_only(10_000.0);
        let flags = UrgencyFlags::default();
        let at = intervention_eligibility(
            FailureProbabilityInput::Probability(0.5),
            &costs,
            &SystemType::Hvac,
            &flags,
            Dollars::new(5000.0),
        );
        assert_eq!(at.score, 5000.0);
        assert!(at.eligible);

        let above = intervention_eligibility(
            FailureProbabilityInput::Probability(0.5),
            &costs,
            &SystemType::Hvac,
            &flags,
            Dollars::new(5000.01),
        );
        assert!(!above.eligible);
    }

    #[test]
    fn same_system_different_homes_different_sensitivity() {
        let costs = CostEstimates::emergency_only(6_000.0);
        let risk = FailureProbabilityInput::YearsRemaining(2.0);
        let flags = UrgencyFlags::default();
        let cautious = intervention_eligibility(
            risk,
            &costs,
            &SystemType::WaterHeater,
            &flags,
            Dollars::new(250.0),
        );
        let relaxed = intervention_eligibility(
            risk,
            &costs,
            &SystemType::WaterHeater,
            &flags,
            Dollars::new(5_000.0),
        );
        assert_eq!(cautious.score, relaxed.score);
        assert!(cautious.eligible);
        assert!(!relaxed.eligible);
    }

    #[test]
    fn outlook_and_premium_combine() {
        let result = intervention_eligibility(
            FailureProbabilityInput::RiskOutlookPct(40.0),
            &CostEstimates::emergency_only(15_000.0),
            &SystemType::Roof,
            &UrgencyFlags {
                hurricane_season: true,
                ..Default::default()
            },
            Dollars::new(1_000.0),
        );
        assert_eq!(result.breakdown.base_risk, 6000.0);
        assert_eq!(result.breakdown.urgency_premium, 2500.0);
        assert_eq!(result.score, 8500.0);
        assert!(result.urgency_factors.hurricane_season);
    }

    #[test]
    fn projected_savings_do_not_enter_the_score() {
        let costs = CostEstimates {
            emergency_replacement: Dollars::new(9_000.0),
            proactive_replacement: Some(Dollars::new(6_500.0)),
        };
        let result = intervention_eligibility(
            FailureProbabilityInput::Probability(0.1),
            &costs,
            &SystemType::Hvac,
            &UrgencyFlags::default(),
            Dollars::new(1_000.0),
        );
        assert_eq!(result.projected_savings, Some(2500.0));
        assert_eq!(result.score, 900.0);
    }

    #[test]
    fn request_uses_context_at_as_of_date() {
        let json = r#"{
            "system_id": "hvac-main",
            "system_type": "hvac",
            "risk": { "probability": 0.5 },
            "costs": { "emergency_replacement": 10000 },
            "context": {
                "flags": [
                    { "kind": "freeze_warning", "valid_from": "2026-01-10", "valid_until": "2026-01-14" },
                    { "kind": "heat_wave", "valid_from": "2026-07-01", "valid_until": "2026-07-09" },
                    { "kind": "peak_season_hvac", "valid_from": "2026-01-01", "valid_until": "2026-02-28" }
                ]
            },
            "as_of": "2026-01-12"
        }"#;
        let request: ScoringRequest = serde_json::from_str(json).unwrap();
        let result = request.evaluate(Dollars::new(500.0), Calibration::current());
        assert_eq!(result.breakdown.urgency_premium, 2000.0);
        assert_eq!(result.score, 7000.0);
        assert!(result.eligible);
        assert!(!result.urgency_factors.heat_wave);
    }
}
