//! Visit Pricing Engine
//!
//! Combines the selected service lines, a staff-entered discount and the
//! member's tier into the totals charged for one visit.

use std::sync::Arc;

use shared::models::{MembershipTier, SelectedServiceLine, Service, VisitTotals};

use crate::catalog::ServiceCatalog;
use crate::core::RulesConfig;
use crate::membership::TierCalculator;
use crate::money::clamp_percent;

/// A selected line resolved against the catalog
#[derive(Debug, Clone, Copy)]
pub struct PricedLine<'a> {
    pub line: &'a SelectedServiceLine,
    pub service: &'a Service,
    /// `custom_price` if given, else the catalog base price
    pub price: i64,
}

#[derive(Debug, Clone)]
pub struct VisitPricingEngine {
    catalog: Arc<ServiceCatalog>,
    rules: Arc<RulesConfig>,
    tiers: TierCalculator,
}

impl VisitPricingEngine {
    pub fn new(catalog: Arc<ServiceCatalog>, rules: Arc<RulesConfig>) -> Self {
        let tiers = TierCalculator::new(rules.clone());
        Self {
            catalog,
            rules,
            tiers,
        }
    }

    /// Resolve lines against the catalog; unknown service ids are dropped
    pub fn price_lines<'a>(&'a self, lines: &'a [SelectedServiceLine]) -> Vec<PricedLine<'a>> {
        lines
            .iter()
            .filter_map(|line| match self.catalog.get(line.service_id) {
                Some(service) => Some(PricedLine {
                    line,
                    service,
                    price: line.custom_price.unwrap_or(service.base_price),
                }),
                None => {
                    tracing::warn!(
                        service_id = line.service_id,
                        "Service line not in catalog, excluded from visit total"
                    );
                    None
                }
            })
            .collect()
    }

    /// Totals for one visit.
    ///
    /// The staff discount and the tier discount are combined with the
    /// configured visit policy (larger one wins by default). A selection with
    /// nothing to price yields all-zero totals, discount percentages included.
    pub fn calculate(
        &self,
        lines: &[SelectedServiceLine],
        custom_discount_percent: u32,
        tier: MembershipTier,
    ) -> VisitTotals {
        let priced = self.price_lines(lines);
        if priced.is_empty() {
            tracing::debug!(tier = %tier, "Nothing to price, returning zero totals");
            return VisitTotals::default();
        }

        let base_total = priced
            .iter()
            .fold(0i64, |total, p| total.saturating_add(p.price));
        let total_duration: u32 = priced.iter().map(|p| p.service.duration_minutes).sum();

        let custom_discount = clamp_percent(custom_discount_percent);
        let membership_discount = self.tiers.get_level_info(tier).discount_percentage;

        let policy = self.rules.visit_discount_policy;
        let total_discount = policy.effective_percent(custom_discount, membership_discount);
        let final_price = policy.apply(base_total, custom_discount, membership_discount);
        let points_earned = self.tiers.calculate_points_from_visit(final_price, tier);

        tracing::debug!(
            lines = priced.len(),
            base_total,
            custom_discount,
            membership_discount,
            total_discount,
            final_price,
            points_earned,
            tier = %tier,
            "Priced visit"
        );

        VisitTotals {
            base_total,
            membership_discount,
            custom_discount,
            total_discount,
            final_price,
            total_duration,
            points_earned,
        }
    }
}
