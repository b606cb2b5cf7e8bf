pub mod errors;
pub mod unit_index;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use errors::{Error, Result, ResultExt};
pub use unit_index::{round_cents, Dollars, UnitIndex};

/// Kind of physical home system.
///
/// The set is open: records carrying a type the engine has no calibration
/// for deserialize into [`SystemType::Other`] and are scored with the
/// documented fallback calibration.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SystemType {
    Hvac,
    Roof,
    WaterHeater,
    Other(String),
}

impl SystemType {
    pub fn as_str(&self) -> &str {
        match self {
            SystemType::Hvac => "hvac",
            SystemType::Roof => "roof",
            SystemType::WaterHeater => "water_heater",
            SystemType::Other(name) => name,
        }
    }

    /// True for types with their own calibration entry.
    pub fn is_calibrated(&self) -> bool {
        !matches!(self, SystemType::Other(_))
    }

    pub fn display_name(&self) -> &str {
        match self {
            SystemType::Hvac => "HVAC",
            SystemType::Roof => "Roof",
            SystemType::WaterHeater => "Water Heater",
            SystemType::Other(name) => name,
        }
    }
}

impl From<&str> for SystemType {
    fn from(raw: &str) -> Self {
        let key = raw.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "hvac" => SystemType::Hvac,
            "roof" | "roofing" => SystemType::Roof,
            "water_heater" | "waterheater" => SystemType::WaterHeater,
            _ => SystemType::Other(key),
        }
    }
}

impl From<String> for SystemType {
    fn from(raw: String) -> Self {
        SystemType::from(raw.as_str())
    }
}

impl From<SystemType> for String {
    fn from(system_type: SystemType) -> Self {
        system_type.as_str().to_string()
    }
}

impl FromStr for SystemType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(SystemType::from(s))
    }
}

impl fmt::Display for SystemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One physical system belonging to one home.
///
/// All normalized indices are clamped on deserialization and default to
/// zero when absent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemInstance {
    pub id: String,
    pub system_type: SystemType,
    /// `None` means the install date is unknown.
    #[serde(default)]
    pub install_date: Option<NaiveDate>,
    #[serde(default)]
    pub installation_verified: bool,
    #[serde(default)]
    pub maintenance_score: UnitIndex,
    #[serde(default)]
    pub usage_index: UnitIndex,
    #[serde(default)]
    pub environment_index: UnitIndex,
    #[serde(default)]
    pub climate_stress_index: UnitIndex,
    /// How many of the indices above are known rather than defaulted.
    #[serde(default)]
    pub feature_completeness: UnitIndex,
    #[serde(default)]
    pub has_usage_signal: bool,
}

impl SystemInstance {
    /// A record with only identity, type and install date known.
    pub fn new(
        id: impl Into<String>,
        system_type: SystemType,
        install_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: id.into(),
            system_type,
            install_date,
            installation_verified: false,
            maintenance_score: UnitIndex::ZERO,
            usage_index: UnitIndex::ZERO,
            environment_index: UnitIndex::ZERO,
            climate_stress_index: UnitIndex::ZERO,
            feature_completeness: UnitIndex::ZERO,
            has_usage_signal: false,
        }
    }

    pub fn has_install_date(&self) -> bool {
        self.install_date.is_some()
    }
}
