//! The intervention score formula.
//!
//! ```text
//! score = failure_probability_12mo * emergency_replacement_cost + urgency_premium
//! ```
//!
//! This formula is frozen. It must stay dollar-denominated and linear in
//! its inputs, and must never take engagement or anxiety signals. Any change
//! belongs in this function only, reviewed as a single diff, together with
//! the regression tests below.

use crate::core::round_cents;
use serde::{Deserialize, Serialize};

/// Score total plus the two components it is built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterventionScore {
    /// Total, in dollars, rounded to cents
    pub total: f64,
    /// `failure_probability_12mo * emergency_replacement_cost`, rounded to cents
    pub base_risk: f64,
    /// Urgency premium, rounded to cents
    pub urgency_premium: f64,
}

/// Compute the frozen intervention score.
///
/// Probability is clamped to [0, 1]; cost and premium are floored at zero.
/// Non-finite inputs count as zero.
pub fn intervention_score(
    failure_probability_12mo: f64,
    emergency_replacement_cost: f64,
    urgency_premium: f64,
) -> InterventionScore {
    let probability = finite_or_zero(failure_probability_12mo).clamp(0.0, 1.0);
    let cost = finite_or_zero(emergency_replacement_cost).max(0.0);
    let premium = finite_or_zero(urgency_premium).max(0.0);

    let base_risk = probability * cost;

    InterventionScore {
        total: round_cents(base_risk + premium),
        base_risk: round_cents(base_risk),
        urgency_premium: round_cents(premium),
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if !value.is_finite() {
        0.0
    } else {
        value
    }
}
