//! Evidence-quality confidence for a replacement window.
//!
//! Confidence measures how much we actually know about a system, not how
//! healthy it is. A thoroughly documented system in bad shape still gets a
//! high confidence; its condition shows up in the window itself.

use crate::calibration::ConfidenceWeights;
use crate::core::SystemInstance;

/// Weighted evidence sum, clamped to [0, 1].
pub fn evidence_confidence(instance: &SystemInstance, weights: &ConfidenceWeights) -> f64 {
    let verified = if instance.installation_verified {
        weights.verified_install
    } else {
        0.0
    };
    let usage_signal = if instance.has_usage_signal {
        weights.usage_signal
    } else {
        0.0
    };

    let raw = weights.base
        + verified
        + weights.maintenance * instance.maintenance_score.value()
        + weights.completeness * instance.feature_completeness.value()
        + usage_signal;

    raw.clamp(0.0, 1.0)
}
