//! Decimal coin amounts.
//!
//! Users and UTXO endpoints speak in coins with up to eight decimals; the
//! wire format speaks in atomic units. Conversion rounds to eight places,
//! half away from zero, before scaling.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Atomic units in one coin.
pub const ATOMIC_UNITS_PER_COIN: u64 = 100_000_000;

/// Decimal places an atomic unit represents.
pub const DECIMAL_PLACES: u32 = 8;

/// An amount of coin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonetaryValue(Decimal);

impl MonetaryValue {
    pub fn new(value: Decimal) -> Self {
        MonetaryValue(value)
    }

    pub fn zero() -> Self {
        MonetaryValue(Decimal::ZERO)
    }

    /// Exact coin value of `units` atomic units.
    pub fn from_atomic_units(units: u64) -> Self {
        MonetaryValue(Decimal::from_i128_with_scale(units as i128, DECIMAL_PLACES))
    }

    /// Convert to atomic units.
    ///
    /// # Returns
    /// The rounded unit count, or `InvalidAmount` when the value is negative
    /// or does not fit in a `u64`.
    pub fn to_atomic_units(&self) -> Result<u64, EngineError> {
        if self.0.is_sign_negative() && !self.0.is_zero() {
            return Err(self.invalid("amount is negative"));
        }
        let rounded = self
            .0
            .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
        rounded
            .checked_mul(Decimal::from(ATOMIC_UNITS_PER_COIN))
            .and_then(|units| units.to_u64())
            .ok_or_else(|| self.invalid("amount is too large"))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn checked_add(&self, other: MonetaryValue) -> Option<MonetaryValue> {
        self.0.checked_add(other.0).map(MonetaryValue)
    }

    fn invalid(&self, reason: &str) -> EngineError {
        EngineError::InvalidAmount {
            amount: self.0.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<Decimal> for MonetaryValue {
    fn from(value: Decimal) -> Self {
        MonetaryValue(value)
    }
}

impl FromStr for MonetaryValue {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(MonetaryValue)
            .map_err(|e| EngineError::InvalidAmount {
                amount: s.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Always eight decimals, e.g. `0.00100000`.
impl fmt::Display for MonetaryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "{:.8}", rounded)
    }
}
