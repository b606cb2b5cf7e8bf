// Urgency premium: additive dollar amounts keyed by (system type, active flag)

use super::context::UrgencyFlags;
use crate::calibration::{Calibration, UrgencyPremiums};
use crate::core::{Dollars, SystemType};
use serde::{Deserialize, Serialize};

/// Which premiums fired, for explaining a score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgencyFactors {
    pub hurricane_season: bool,
    pub freeze_warning: bool,
    pub heat_wave: bool,
    pub peak_season: bool,
}

impl UrgencyFactors {
    pub fn any(&self) -> bool {
        self.hurricane_season || self.freeze_warning || self.heat_wave || self.peak_season
    }

    /// Names of the fired factors, in a fixed order.
    pub fn fired(&self) -> Vec<&'static str> {
        [
            (self.hurricane_season, "hurricane_season"),
            (self.freeze_warning, "freeze_warning"),
            (self.heat_wave, "heat_wave"),
            (self.peak_season, "peak_season"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UrgencyPremium {
    pub amount: Dollars,
    pub factors: UrgencyFactors,
}

pub fn urgency_premium(system_type: &SystemType, flags: &UrgencyFlags) -> UrgencyPremium {
    urgency_premium_with(system_type, flags, &Calibration::current().urgency)
}

/// Sum the premiums that apply to this system type under these flags.
///
/// Premiums are only ever summed. Types without a calibration entry carry
/// no premiums.
pub fn urgency_premium_with(
    system_type: &SystemType,
    flags: &UrgencyFlags,
    premiums: &UrgencyPremiums,
) -> UrgencyPremium {
    let is_hvac = matches!(system_type, SystemType::Hvac);
    let is_roof = matches!(system_type, SystemType::Roof);
    let is_water_heater = matches!(system_type, SystemType::WaterHeater);

    let factors = UrgencyFactors {
        hurricane_season: flags.hurricane_season && is_roof,
        freeze_warning: flags.freeze_warning && (is_hvac || is_water_heater),
        heat_wave: flags.heat_wave && is_hvac,
        peak_season: (flags.peak_season_hvac && is_hvac)
            || (flags.peak_season_roofing && is_roof),
    };

    let amount = [
        (factors.hurricane_season, premiums.hurricane_season),
        (factors.freeze_warning, premiums.freeze_warning),
        (factors.heat_wave, premiums.heat_wave),
        (factors.peak_season, premiums.peak_season),
    ]
    .into_iter()
    .filter(|(fired, _)| *fired)
    .map(|(_, dollars)| Dollars::new(dollars))
    .sum();

    UrgencyPremium { amount, factors }
}
