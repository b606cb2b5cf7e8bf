//! Situational risk context scoped to a region and a validity window.
//!
//! A [`RiskContext`] is owned by an outside collaborator that refreshes it
//! (e.g. when hurricane season starts). The engine only reads it: at
//! scoring time the flags valid on the scoring date are collapsed into an
//! [`UrgencyFlags`] value.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextFlagKind {
    HurricaneSeason,
    FreezeWarning,
    HeatWave,
    PeakSeasonHvac,
    PeakSeasonRoofing,
}

/// Inclusive date interval. An inverted interval is never active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityInterval {
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
}

impl ValidityInterval {
    pub fn new(valid_from: NaiveDate, valid_until: NaiveDate) -> Self {
        Self {
            valid_from,
            valid_until,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.valid_from <= date && date <= self.valid_until
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextFlag {
    pub kind: ContextFlagKind,
    #[serde(flatten)]
    pub validity: ValidityInterval,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskContext {
    #[serde(default)]
    pub climate_zone: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub flags: Vec<ContextFlag>,
}

impl RiskContext {
    pub fn is_active(&self, kind: ContextFlagKind, date: NaiveDate) -> bool {
        self.flags
            .iter()
            .any(|flag| flag.kind == kind && flag.validity.contains(date))
    }

    /// Boolean view of the flags valid on `date`.
    pub fn flags_at(&self, date: NaiveDate) -> UrgencyFlags {
        UrgencyFlags {
            hurricane_season: self.is_active(ContextFlagKind::HurricaneSeason, date),
            freeze_warning: self.is_active(ContextFlagKind::FreezeWarning, date),
            heat_wave: self.is_active(ContextFlagKind::HeatWave, date),
            peak_season_hvac: self.is_active(ContextFlagKind::PeakSeasonHvac, date),
            peak_season_roofing: self.is_active(ContextFlagKind::PeakSeasonRoofing, date),
        }
    }
}

/// Situational flags active at one moment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgencyFlags {
    #[serde(default)]
    pub hurricane_season: bool,
    #[serde(default)]
    pub freeze_warning: bool,
    #[serde(default)]
    pub heat_wave: bool,
    #[serde(default)]
    pub peak_season_hvac: bool,
    #[serde(default)]
    pub peak_season_roofing: bool,
}
