//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts are whole currency units (`i64`). Every percentage or multiplier
//! step runs on `Decimal` and is rounded back to a whole unit, half away from
//! zero, only at the end.

use rust_decimal::prelude::*;

/// Percentage divisor
const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Decimal places kept for progress percentages
const PERCENT_DECIMAL_PLACES: u32 = 2;

#[inline]
pub fn to_decimal(value: i64) -> Decimal {
    Decimal::from(value)
}

/// Round to a whole currency unit (half away from zero)
#[inline]
pub fn round_to_unit(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}

/// Round toward negative infinity and convert
#[inline]
pub fn floor_to_i64(value: Decimal) -> i64 {
    value.floor().to_i64().unwrap_or_default()
}

/// Clamp a percentage to [0, 100]
#[inline]
pub fn clamp_percent(percent: u32) -> u32 {
    percent.min(100)
}

/// `1 - percent/100` as a multiplier
#[inline]
pub fn discount_multiplier(percent: u32) -> Decimal {
    Decimal::ONE - Decimal::from(clamp_percent(percent)) / HUNDRED
}

/// Apply a percentage discount to an amount and round to a whole unit
pub fn apply_discount(amount: i64, percent: u32) -> i64 {
    round_to_unit(to_decimal(amount) * discount_multiplier(percent))
}

/// How far `value` has moved from `start` toward `end`, in percent.
///
/// Clamped to [0, 100]. A zero-width or inverted span counts as complete.
pub fn progress_percent(value: i64, start: i64, end: i64) -> f64 {
    if end <= start {
        return 100.0;
    }
    let ratio = (to_decimal(value) - to_decimal(start)) / (to_decimal(end) - to_decimal(start));
    let percent = (ratio * HUNDRED).clamp(Decimal::ZERO, HUNDRED);
    percent
        .round_dp_with_strategy(PERCENT_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}
