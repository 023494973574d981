//! Fixed-point percentages with a `10^18` denominator.
//!
//! All products are computed in `u128`, so `amount * pct` cannot overflow
//! for any `u64` amount. Division truncates.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    CurationError, Result,
    constants::{DEFAULT_DISPENSATION_PCT, PCT_BASE, PCT_DECIMALS},
};

/// A fraction in `[0, 1]` stored as `raw / 10^18`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Pct(u64);

impl Pct {
    pub const ZERO: Self = Self(0);
    pub const HUNDRED: Self = Self(PCT_BASE);
    pub const DEFAULT_DISPENSATION: Self = Self(DEFAULT_DISPENSATION_PCT);

    /// Build from a raw fixed-point value.
    ///
    /// # Errors
    /// Returns [`CurationError::PctOutOfRange`] if `raw > 10^18`.
    pub fn new(raw: u64) -> Result<Self> {
        if raw > PCT_BASE {
            return Err(CurationError::PctOutOfRange { raw });
        }
        Ok(Self(raw))
    }

    /// Whole percent, e.g. `Pct::percent(60)` is 60%.
    ///
    /// # Errors
    /// Returns [`CurationError::PctOutOfRange`] above 100.
    pub fn percent(whole: u64) -> Result<Self> {
        let raw = whole
            .checked_mul(PCT_BASE / 100)
            .ok_or(CurationError::PctOutOfRange { raw: u64::MAX })?;
        Self::new(raw)
    }

    /// Exact conversion from a decimal fraction such as `0.6`.
    ///
    /// # Errors
    /// Returns [`CurationError::InvalidConfig`] for negative values or more
    /// than 18 fractional digits, [`CurationError::PctOutOfRange`] above 1.
    pub fn from_decimal(value: Decimal) -> Result<Self> {
        let value = value.normalize();
        if value.is_sign_negative() && !value.is_zero() {
            return Err(CurationError::InvalidConfig(format!(
                "percentage {value} is negative"
            )));
        }
        if value.scale() > PCT_DECIMALS {
            return Err(CurationError::InvalidConfig(format!(
                "percentage {value} has more than {PCT_DECIMALS} fractional digits"
            )));
        }
        let mantissa = value.mantissa().unsigned_abs();
        let raw = mantissa
            .checked_mul(10u128.pow(PCT_DECIMALS - value.scale()))
            .ok_or(CurationError::Overflow)?;
        let raw = u64::try_from(raw).map_err(|_| CurationError::PctOutOfRange { raw: u64::MAX })?;
        Self::new(raw)
    }

    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::from_i128_with_scale(i128::from(self.0), PCT_DECIMALS).normalize()
    }

    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }

    /// `floor(amount * self / 10^18)`. Never exceeds `amount`.
    #[must_use]
    pub fn apply(self, amount: u64) -> u64 {
        let scaled = u128::from(amount) * u128::from(self.0) / u128::from(PCT_BASE);
        // self <= 10^18, so scaled <= amount
        u64::try_from(scaled).unwrap_or(amount)
    }
}

impl TryFrom<u64> for Pct {
    type Error = CurationError;

    fn try_from(raw: u64) -> Result<Self> {
        Self::new(raw)
    }
}

impl From<Pct> for u64 {
    fn from(pct: Pct) -> Self {
        pct.0
    }
}

impl fmt::Display for Pct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", (self.to_decimal() * Decimal::ONE_HUNDRED).normalize())
    }
}

/// `floor(pool * stake / total)`, the pro-rata share of a reward pool.
///
/// Returns `None` when `total` is zero or the share does not fit in `u64`
/// (only possible if `stake > total`).
#[must_use]
pub fn pro_rata(pool: u64, stake: u64, total: u64) -> Option<u64> {
    if total == 0 {
        return None;
    }
    let share = u128::from(pool) * u128::from(stake) / u128::from(total);
    u64::try_from(share).ok()
}
