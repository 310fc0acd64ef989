//! Currency rounding policy.
//!
//! Money is computed with [`Decimal`] at full precision and rounded exactly
//! once, when a line item is produced. Totals are sums of already rounded
//! lines, so the totals printed on a pay-slip always add up.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// How midpoints are resolved when rounding a line item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// 0.125 -> 0.13, -0.125 -> -0.13.
    #[default]
    HalfUp,
    /// 0.125 -> 0.12, 0.135 -> 0.14.
    HalfEven,
    /// Keep full decimal precision.
    Unrounded,
}

/// The rounding rule applied to every line item.
///
/// # Example
///
/// ```
/// use settlement_engine::calculation::RoundingPolicy;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let policy = RoundingPolicy::CURRENCY;
/// let amount = Decimal::from_str("1166.666666").unwrap();
/// assert_eq!(policy.apply(amount).to_string(), "1166.67");
/// assert_eq!(policy.apply(Decimal::new(1875, 0)).to_string(), "1875.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundingPolicy {
    /// Number of fractional digits kept.
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Midpoint handling.
    #[serde(default)]
    pub mode: RoundingMode,
}

fn default_decimal_places() -> u32 {
    2
}

impl RoundingPolicy {
    /// Two decimal places, midpoint away from zero.
    pub const CURRENCY: RoundingPolicy = RoundingPolicy {
        decimal_places: 2,
        mode: RoundingMode::HalfUp,
    };

    /// No rounding at all.
    pub const UNROUNDED: RoundingPolicy = RoundingPolicy {
        decimal_places: 0,
        mode: RoundingMode::Unrounded,
    };

    /// Rounds an amount and pads it to the configured number of places.
    pub fn apply(&self, amount: Decimal) -> Decimal {
        let strategy = match self.mode {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
            RoundingMode::Unrounded => return amount,
        };

        let mut rounded = amount.round_dp_with_strategy(self.decimal_places, strategy);
        rounded.rescale(self.decimal_places);
        rounded
    }
}

impl Default for RoundingPolicy {
    fn default() -> Self {
        Self::CURRENCY
    }
}
