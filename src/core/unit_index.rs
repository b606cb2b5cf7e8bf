//! Clamped numeric types for normalized indices and money.
//!
//! Upstream system records are frequently partial or noisy, so the engine
//! never rejects an out-of-range number. Instead every normalized index is
//! clamped into [0.0, 1.0] on construction and every dollar amount is
//! floored at zero. Non-finite input (NaN, infinity) and JSON `null`
//! collapse to the lower bound.
//!
//! # Examples
//!
//! ```rust
//! use homerisk::core::unit_index::{Dollars, UnitIndex};
//!
//! let index = UnitIndex::new(1.7);
//! assert_eq!(index.value(), 1.0);
//!
//! let cost = Dollars::new(-25.0);
//! assert_eq!(cost.value(), 0.0);
//! ```

use serde::{Deserialize, Deserializer, Serialize};

/// Normalized index on the unit interval.
///
/// Absent indices default to 0.0, meaning "no evidence of stress or usage"
/// rather than "average".
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct UnitIndex(f64);

impl UnitIndex {
    pub const ZERO: UnitIndex = UnitIndex(0.0);
    pub const ONE: UnitIndex = UnitIndex(1.0);

    /// Create a new index, clamping to [0.0, 1.0].
    pub fn new(value: f64) -> Self {
        if !value.is_finite() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the raw index value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// `1 - value`, used for "how much is missing" style terms.
    pub fn complement(self) -> f64 {
        1.0 - self.0
    }
}

impl<'de> Deserialize<'de> for UnitIndex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<f64>::deserialize(deserializer)?;
        Ok(raw.map_or(Self::ZERO, Self::new))
    }
}

impl From<f64> for UnitIndex {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

/// Non-negative currency amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Dollars(f64);

impl Dollars {
    pub const ZERO: Dollars = Dollars(0.0);

    /// Create a new amount, flooring at zero.
    pub fn new(value: f64) -> Self {
        if !value.is_finite() {
            return Self::ZERO;
        }
        Self(value.max(0.0))
    }

    /// Get the raw amount.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Round half away from zero to whole cents.
    pub fn rounded_to_cents(self) -> Self {
        Self(round_cents(self.0))
    }
}

impl<'de> Deserialize<'de> for Dollars {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<f64>::deserialize(deserializer)?;
        Ok(raw.map_or(Self::ZERO, Self::new))
    }
}

impl From<f64> for Dollars {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl std::ops::Add for Dollars {
    type Output = Dollars;

    fn add(self, rhs: Dollars) -> Dollars {
        Dollars(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Dollars {
    fn sum<I: Iterator<Item = Dollars>>(iter: I) -> Self {
        iter.fold(Dollars::ZERO, |acc, d| acc + d)
    }
}

impl std::fmt::Display for UnitIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl std::fmt::Display for Dollars {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

/// Round to two decimal places.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn unit_index_always_in_bounds(value in -1000.0..1000.0f64) {
            let index = UnitIndex::new(value);
            prop_assert!(index.value() >= 0.0 && index.value() <= 1.0);
        }

        #[test]
        fn dollars_never_negative(value in -1.0e7..1.0e7f64) {
            prop_assert!(Dollars::new(value).value() >= 0.0);
        }
    }
}
