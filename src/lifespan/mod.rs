//! Lifespan and replacement-window model.
//!
//! Converts one system instance's install date and normalized indices into
//! a probabilistic replacement window: p10/p50/p90 dates, years remaining to
//! the median, an evidence-quality confidence and a provenance record that
//! lists every baseline and multiplier used.
//!
//! The model is total over its numeric inputs (everything is clamped) with
//! one precondition: the install date must be known. A missing install date
//! is reported as [`Error::MissingInstallDate`] and never filled in.

pub mod confidence;
pub mod multipliers;

use crate::calibration::{Calibration, SpreadCalibration};
use crate::core::{Error, Result, SystemInstance, SystemType};
use crate::observability::set_current_system;
use chrono::{NaiveDate, TimeDelta};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use confidence::evidence_confidence;
pub use multipliers::{compute_multipliers, MultiplierBreakdown};

/// Mean Gregorian year length used for all date arithmetic.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Every value that went into a window, for auditability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowProvenance {
    pub calibration_version: String,
    /// Set when the system type had no calibration entry and HVAC's was used
    pub calibration_fallback: bool,
    pub as_of: NaiveDate,
    pub install_date: NaiveDate,
    pub baseline_median_years: f64,
    pub baseline_sigma_years: f64,
    pub multipliers: MultiplierBreakdown,
    pub effective_median_years: f64,
    pub sigma_effective_years: f64,
    pub p10_lifespan_years: f64,
    pub p90_lifespan_years: f64,
    pub age_years: f64,
    /// `effective_median_years - age_years`, negative once past due
    pub signed_years_remaining: f64,
}

/// Derived replacement window for one system at one point in time.
///
/// Recomputed per request; never the source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplacementWindow {
    pub system_id: String,
    pub system_type: SystemType,
    pub p10: NaiveDate,
    pub p50: NaiveDate,
    pub p90: NaiveDate,
    /// Years from `as_of` to the p50 date, never negative
    pub years_remaining: f64,
    pub confidence: f64,
    pub model_version: String,
    pub provenance: WindowProvenance,
}

impl ReplacementWindow {
    /// True when the system is already at or past its median lifespan.
    pub fn is_past_due(&self) -> bool {
        self.provenance.signed_years_remaining <= 0.0
    }
}

/// Compute the replacement window for one instance under the current
/// calibration.
pub fn compute_replacement_window(
    instance: &SystemInstance,
    now: NaiveDate,
) -> Result<ReplacementWindow> {
    compute_replacement_window_with(instance, now, Calibration::current())
}

/// Compute the replacement window under an explicit calibration set.
pub fn compute_replacement_window_with(
    instance: &SystemInstance,
    now: NaiveDate,
    calibration: &Calibration,
) -> Result<ReplacementWindow> {
    let install_date = instance
        .install_date
        .ok_or_else(|| Error::missing_install_date(&instance.id))?;

    let lookup = calibration.for_system(&instance.system_type);
    if lookup.fallback {
        warn!(
            system_id = %instance.id,
            system_type = %instance.system_type,
            "No lifespan calibration for system type; using HVAC baseline"
        );
    }
    let baseline = lookup.system.lifespan;

    let multipliers = compute_multipliers(instance, &calibration.multipliers);
    let effective_median_years = baseline.median_years * multipliers.total;
    let sigma_effective_years = effective_sigma(
        baseline.sigma_years,
        instance.feature_completeness.value(),
        &calibration.spread,
    );
    let (p10_lifespan_years, p90_lifespan_years) = tail_lifespans(
        effective_median_years,
        sigma_effective_years,
        &calibration.spread,
    );

    let age_years = age_in_years(install_date, now);
    let signed_years_remaining = effective_median_years - age_years;

    let p10 = floor_to_now(offset_by_years(install_date, p10_lifespan_years), now);
    let p50 = floor_to_now(offset_by_years(install_date, effective_median_years), now);
    let p90 = floor_to_now(offset_by_years(install_date, p90_lifespan_years), now);

    let confidence = evidence_confidence(instance, &calibration.confidence);

    debug!(
        system_id = %instance.id,
        %p10,
        %p50,
        %p90,
        multiplier = multipliers.total,
        confidence,
        "Computed replacement window"
    );

    Ok(ReplacementWindow {
        system_id: instance.id.clone(),
        system_type: instance.system_type.clone(),
        p10,
        p50,
        p90,
        years_remaining: signed_years_remaining.max(0.0),
        confidence,
        model_version: calibration.version.to_string(),
        provenance: WindowProvenance {
            calibration_version: calibration.version.to_string(),
            calibration_fallback: lookup.fallback,
            as_of: now,
            install_date,
            baseline_median_years: baseline.median_years,
            baseline_sigma_years: baseline.sigma_years,
            multipliers,
            effective_median_years,
            sigma_effective_years,
            p10_lifespan_years,
            p90_lifespan_years,
            age_years,
            signed_years_remaining,
        },
    })
}

/// Compute windows for many instances in parallel.
///
/// Output order matches input order; each instance succeeds or fails on
/// its own.
pub fn compute_replacement_windows(
    instances: &[SystemInstance],
    now: NaiveDate,
    calibration: &Calibration,
) -> Vec<Result<ReplacementWindow>> {
    instances
        .par_iter()
        .map(|instance| {
            let _system = set_current_system(&instance.id);
            compute_replacement_window_with(instance, now, calibration)
        })
        .collect()
}

/// Less evidence means a wider band.
pub fn effective_sigma(sigma_base: f64, completeness: f64, spread: &SpreadCalibration) -> f64 {
    let missing = 1.0 - completeness.clamp(0.0, 1.0);
    sigma_base * (1.0 + spread.completeness_widening * missing)
}

/// p10/p90 lifespans around the median, each clamped to the absolute tail
/// bounds and then kept on their own side of the median.
pub fn tail_lifespans(median: f64, sigma: f64, spread: &SpreadCalibration) -> (f64, f64) {
    let half_width = spread.z_p90 * sigma;
    let p10 = (median - half_width)
        .clamp(spread.min_tail_years, spread.max_tail_years)
        .min(median);
    let p90 = (median + half_width)
        .clamp(spread.min_tail_years, spread.max_tail_years)
        .max(median);
    (p10, p90)
}

/// Whole years (fractional) from install to `now`; zero for future installs.
pub fn age_in_years(install_date: NaiveDate, now: NaiveDate) -> f64 {
    let days = (now - install_date).num_days();
    (days as f64 / DAYS_PER_YEAR).max(0.0)
}

pub(crate) fn offset_by_years(date: NaiveDate, years: f64) -> NaiveDate {
    let days = (years * DAYS_PER_YEAR).round() as i64;
    date.checked_add_signed(TimeDelta::days(days))
        .unwrap_or(NaiveDate::MAX)
}

// A system already past its window is due now, not in the past
fn floor_to_now(date: NaiveDate, now: NaiveDate) -> NaiveDate {
    date.max(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UnitIndex;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hvac_installed(install: NaiveDate) -> SystemInstance {
        let mut instance = SystemInstance::new("hvac-1", SystemType::Hvac, Some(install));
        instance.feature_completeness = UnitIndex::ONE;
        instance
    }

    #[test]
    fn missing_install_date_is_rejected() {
        let instance = SystemInstance::new("roof-1", SystemType::Roof, None);
        let err = compute_replacement_window(&instance, date(2026, 1, 1)).unwrap_err();
        assert!(matches!(err, Error::MissingInstallDate { ref system_id } if system_id == "roof-1"));
    }

    #[test]
    fn neutral_new_hvac_uses_baseline_median() {
        let now = date(2026, 1, 1);
        let instance = hvac_installed(now);
        let window = compute_replacement_window(&instance, now).unwrap();

        assert!((window.provenance.effective_median_years - 13.0).abs() < 1e-9);
        assert!((window.years_remaining - 13.0).abs() < 1e-9);
        assert_eq!(window.p50, offset_by_years(now, 13.0));
        assert_eq!(window.model_version, "2024.1");
        assert!(!window.provenance.calibration_fallback);
    }

    #[test]
    fn spread_uses_z_score_at_full_completeness() {
        let now = date(2026, 1, 1);
        let window = compute_replacement_window(&hvac_installed(now), now).unwrap();
        // sigma 3.0, z 1.2816 -> +/- 3.8448 years
        assert!((window.provenance.p10_lifespan_years - 9.1552).abs() < 1e-9);
        assert!((window.provenance.p90_lifespan_years - 16.8448).abs() < 1e-9);
    }

    #[test]
    fn low_completeness_widens_the_band() {
        let now = date(2026, 1, 1);
        let full = compute_replacement_window(&hvac_installed(now), now).unwrap();
        let mut sparse_instance = hvac_installed(now);
        sparse_instance.feature_completeness = UnitIndex::ZERO;
        let sparse = compute_replacement_window(&sparse_instance, now).unwrap();

        assert!((sparse.provenance.sigma_effective_years - 4.5).abs() < 1e-9);
        let full_width = full.provenance.p90_lifespan_years - full.provenance.p10_lifespan_years;
        let sparse_width =
            sparse.provenance.p90_lifespan_years - sparse.provenance.p10_lifespan_years;
        assert!(sparse_width > full_width);
    }

    #[test]
    fn old_system_is_due_now() {
        let now = date(2026, 1, 1);
        let window = compute_replacement_window(&hvac_installed(date(1995, 6, 1)), now).unwrap();

        assert_eq!(window.p10, now);
        assert_eq!(window.p50, now);
        assert_eq!(window.p90, now);
        assert_eq!(window.years_remaining, 0.0);
        assert!(window.is_past_due());
        assert!(window.provenance.signed_years_remaining < 0.0);
    }

    #[test]
    fn partially_aged_system_keeps_future_dates() {
        let now = date(2026, 1, 1);
        let window = compute_replacement_window(&hvac_installed(date(2016, 1, 1)), now).unwrap();
        assert!(window.p10 >= now);
        assert!(window.p50 > now);
        assert!(window.p90 > window.p50);
        assert!(window.years_remaining > 2.5 && window.years_remaining < 3.5);
    }

    #[test]
    fn unknown_type_uses_hvac_baseline_and_flags_it() {
        let now = date(2026, 1, 1);
        let mut instance = hvac_installed(now);
        instance.system_type = SystemType::from("sump pump");
        let window = compute_replacement_window(&instance, now).unwrap();
        assert!(window.provenance.calibration_fallback);
        assert_eq!(window.provenance.baseline_median_years, 13.0);
    }

    #[test]
    fn future_install_has_zero_age() {
        assert_eq!(age_in_years(date(2030, 1, 1), date(2026, 1, 1)), 0.0);
    }

    #[test]
    fn tails_are_bounded() {
        let spread = Calibration::current().spread;
        let (p10, p90) = tail_lifespans(28.0, 10.0, &spread);
        assert_eq!(p90, 30.0);
        assert!(p10 >= 3.0);
        let (low, _) = tail_lifespans(6.0, 10.0, &spread);
        assert_eq!(low, 3.0);
    }

    #[test]
    fn batch_preserves_order_and_isolates_failures() {
        let now = date(2026, 1, 1);
        let instances = vec![
            hvac_installed(date(2020, 1, 1)),
            SystemInstance::new("no-date", SystemType::Roof, None),
            SystemInstance::new("wh", SystemType::WaterHeater, Some(date(2019, 3, 1))),
        ];
        let results = compute_replacement_windows(&instances, now, Calibration::current());
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().system_id, "hvac-1");
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().system_id, "wh");
    }
}
