//! Frozen copies of scoring results.
//!
//! Risk context and cost inputs move over time, so re-running the score on
//! stored inputs later would silently rewrite history. When an alert is
//! created, the live [`EligibilityResult`] is copied into an
//! [`InterventionSnapshot`]. Snapshots have read-only accessors and no way
//! to recompute themselves; a newer score is recorded with
//! [`InterventionSnapshot::supersede`], which leaves the original intact and
//! bumps the revision.

use super::score::InterventionScore;
use super::urgency::UrgencyFactors;
use super::EligibilityResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionSnapshot {
    system_id: String,
    captured_at: NaiveDate,
    revision: u32,
    result: EligibilityResult,
}

impl InterventionSnapshot {
    /// Copy a live result at the moment an intervention is created.
    pub fn capture(
        system_id: impl Into<String>,
        result: &EligibilityResult,
        captured_at: NaiveDate,
    ) -> Self {
        Self {
            system_id: system_id.into(),
            captured_at,
            revision: 1,
            result: result.clone(),
        }
    }

    /// Record an explicit recomputation as a new revision.
    pub fn supersede(&self, result: &EligibilityResult, captured_at: NaiveDate) -> Self {
        Self {
            system_id: self.system_id.clone(),
            captured_at,
            revision: self.revision + 1,
            result: result.clone(),
        }
    }

    pub fn system_id(&self) -> &str {
        &self.system_id
    }

    pub fn captured_at(&self) -> NaiveDate {
        self.captured_at
    }

    pub fn revision(&self) -> u32 {
        self.revision
    }

    pub fn score(&self) -> f64 {
        self.result.score
    }

    pub fn eligible(&self) -> bool {
        self.result.eligible
    }

    pub fn breakdown(&self) -> &InterventionScore {
        &self.result.breakdown
    }

    pub fn urgency_factors(&self) -> &UrgencyFactors {
        &self.result.urgency_factors
    }

    pub fn calibration_version(&self) -> &str {
        &self.result.calibration_version
    }

    pub fn result(&self) -> &EligibilityResult {
        &self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Dollars, SystemType};
    use crate::intervention::{intervention_eligibility, CostEstimates, UrgencyFlags};
    use crate::probability::FailureProbabilityInput;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn result_with_heat_wave(heat_wave: bool) -> EligibilityResult {
        intervention_eligibility(
            FailureProbabilityInput::Probability(0.3),
            &CostEstimates::emergency_only(12_000.0),
            &SystemType::Hvac,
            &UrgencyFlags {
                heat_wave,
                ..Default::default()
            },
            Dollars::new(4_000.0),
        )
    }

    #[test]
    fn snapshot_keeps_values_after_context_changes() {
        let live = result_with_heat_wave(true);
        let snapshot = InterventionSnapshot::capture("hvac-1", &live, date(2026, 7, 12));

        // The heat wave ends; the live score drops but the snapshot does not.
        let later = result_with_heat_wave(false);
        assert!(later.score < live.score);
        assert_eq!(snapshot.score(), 4800.0);
        assert!(snapshot.eligible());
        assert!(snapshot.urgency_factors().heat_wave);
        assert_eq!(snapshot.revision(), 1);
    }

    #[test]
    fn supersede_creates_a_new_revision() {
        let original =
            InterventionSnapshot::capture("hvac-1", &result_with_heat_wave(true), date(2026, 7, 12));
        let updated = original.supersede(&result_with_heat_wave(false), date(2026, 8, 1));

        assert_eq!(updated.revision(), 2);
        assert_eq!(updated.system_id(), "hvac-1");
        assert_eq!(updated.score(), 3600.0);
        assert_eq!(original.score(), 4800.0);
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let snapshot =
            InterventionSnapshot::capture("hvac-1", &result_with_heat_wave(true), date(2026, 7, 12));
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: InterventionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, snapshot);
        assert_eq!(restored.calibration_version(), "2024.1");
    }
}
