//! Discount stacking policy
//!
//! Two percentage discounts can meet on one total: the one staff enter by
//! hand and the one a membership tier grants. Visit checkout and the catalog
//! quote helper combine them differently, so the rule is named explicitly at
//! each call site.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::money::{discount_multiplier, round_to_unit, to_decimal};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountPolicy {
    /// Only the larger discount applies
    #[default]
    Highest,
    /// Both apply, one after the other: `base * (1 - a) * (1 - b)`
    Compound,
}

impl DiscountPolicy {
    /// Single percentage that describes the combined discount.
    ///
    /// For `Compound` this is informational only (rounded down), the price
    /// itself comes from [`DiscountPolicy::apply`].
    pub fn effective_percent(&self, custom: u32, membership: u32) -> u32 {
        let custom = custom.min(100);
        let membership = membership.min(100);
        match self {
            Self::Highest => custom.max(membership),
            Self::Compound => {
                let kept = discount_multiplier(custom) * discount_multiplier(membership);
                let percent = (Decimal::ONE - kept) * Decimal::ONE_HUNDRED;
                percent.floor().to_u32().unwrap_or_default()
            }
        }
    }

    /// Apply both discounts to `base` and round to a whole unit
    pub fn apply(&self, base: i64, custom: u32, membership: u32) -> i64 {
        let base = to_decimal(base);
        let discounted = match self {
            Self::Highest => base * discount_multiplier(custom.max(membership)),
            Self::Compound => {
                base * discount_multiplier(custom) * discount_multiplier(membership)
            }
        };
        round_to_unit(discounted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highest_takes_larger_discount() {
        let policy = DiscountPolicy::Highest;
        assert_eq!(policy.effective_percent(5, 10), 10);
        assert_eq!(policy.effective_percent(20, 10), 20);
        assert_eq!(policy.apply(300_000, 5, 10), 270_000);
    }

    #[test]
    fn test_compound_multiplies() {
        let policy = DiscountPolicy::Compound;
        // 100000 * 0.9 * 0.9 = 81000
        assert_eq!(policy.apply(100_000, 10, 10), 81_000);
        assert_eq!(policy.effective_percent(10, 10), 19);
    }

    #[test]
    fn test_compound_rounds_once_at_the_end() {
        // 12345 * 0.95 * 0.85 = 9968.5875 -> 9969
        assert_eq!(DiscountPolicy::Compound.apply(12_345, 5, 15), 9_969);
    }

    #[test]
    fn test_zero_base() {
        assert_eq!(DiscountPolicy::Highest.apply(0, 50, 10), 0);
        assert_eq!(DiscountPolicy::Compound.apply(0, 50, 10), 0);
    }

    #[test]
    fn test_policy_serde() {
        let json = serde_json::to_string(&DiscountPolicy::Compound).unwrap();
        assert_eq!(json, "\"compound\"");
        let policy: DiscountPolicy = serde_json::from_str("\"highest\"").unwrap();
        assert_eq!(policy, DiscountPolicy::Highest);
    }
}
