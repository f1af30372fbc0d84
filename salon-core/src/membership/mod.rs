//! Membership tier progression
//!
//! Tier lookup, progress toward the next tier, upgrade detection and loyalty
//! point accrual.

mod tier_calculator;

pub use tier_calculator::*;
