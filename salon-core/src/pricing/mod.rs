//! Visit pricing
//!
//! - [`DiscountPolicy`] - how a staff discount and a tier discount combine
//! - [`VisitPricingEngine`] - totals, duration and points for one visit

mod discount;
mod visit_pricing;

pub use discount::*;
pub use visit_pricing::*;
