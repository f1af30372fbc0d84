//! Tier Calculator
//!
//! Pure functions mapping a member's visit and spend counters onto the tier
//! table. Nothing here fails: a tier the table does not define degrades to
//! the lowest row.

use std::sync::Arc;

use rust_decimal::Decimal;
use shared::models::{
    MemberCounters, MembershipTier, NextTierInfo, TierDefinition, TierProgress, UpgradeCheck,
};

use crate::core::RulesConfig;
use crate::money::{floor_to_i64, progress_percent, to_decimal};

#[derive(Debug, Clone)]
pub struct TierCalculator {
    rules: Arc<RulesConfig>,
}

impl TierCalculator {
    pub fn new(rules: Arc<RulesConfig>) -> Self {
        Self { rules }
    }

    /// Highest tier whose visit AND spending thresholds are both met.
    ///
    /// Spending alone never skips a member past a tier they lack the visits
    /// for. Falls back to the lowest tier.
    pub fn calculate_tier(&self, total_visits: i64, total_spent: i64) -> MembershipTier {
        let table = &self.rules.tiers;
        table
            .rows()
            .iter()
            .rev()
            .find(|row| total_visits >= row.min_visits && total_spent >= row.min_spending)
            .unwrap_or_else(|| table.lowest())
            .tier
    }

    /// Table row for `tier`, or the lowest row if the table lacks it
    pub fn get_level_info(&self, tier: MembershipTier) -> &TierDefinition {
        let table = &self.rules.tiers;
        match table.position(tier) {
            Some(idx) => &table.rows()[idx],
            None => {
                tracing::warn!(tier = %tier, "Tier missing from tier table, using lowest tier");
                table.lowest()
            }
        }
    }

    /// Tier above `tier` and the threshold gap between the two rows.
    ///
    /// The gap compares tier definitions only; it does not look at how far a
    /// member already is into the current tier.
    pub fn get_next_tier_info(&self, tier: MembershipTier) -> NextTierInfo {
        let rows = self.rules.tiers.rows();
        let idx = self.get_tier_rank(tier);
        let current = &rows[idx];

        match rows.get(idx + 1) {
            Some(next) => NextTierInfo {
                next_tier: Some(next.tier),
                visits_needed: next.min_visits - current.min_visits,
                spending_needed: next.min_spending - current.min_spending,
            },
            None => NextTierInfo {
                next_tier: None,
                visits_needed: 0,
                spending_needed: 0,
            },
        }
    }

    /// Progress from the current tier's thresholds toward the next tier's.
    ///
    /// Each axis is clamped to [0, 100]; overall progress is the slower axis
    /// since both thresholds gate the next tier.
    pub fn calculate_progress(
        &self,
        current_visits: i64,
        current_spent: i64,
        current_tier: MembershipTier,
    ) -> TierProgress {
        let rows = self.rules.tiers.rows();
        let idx = self.get_tier_rank(current_tier);
        let current = &rows[idx];

        let Some(next) = rows.get(idx + 1) else {
            return TierProgress {
                visit_progress: 100.0,
                spending_progress: 100.0,
                overall_progress: 100.0,
                is_max_tier: true,
            };
        };

        let visit_progress = progress_percent(current_visits, current.min_visits, next.min_visits);
        let spending_progress =
            progress_percent(current_spent, current.min_spending, next.min_spending);

        TierProgress {
            visit_progress,
            spending_progress,
            overall_progress: visit_progress.min(spending_progress),
            is_max_tier: false,
        }
    }

    /// Compare the cached tier with the one the counters qualify for.
    ///
    /// Only reports; persisting the new tier is up to the caller.
    pub fn should_upgrade(&self, counters: &MemberCounters) -> UpgradeCheck {
        let computed = self.calculate_tier(counters.total_visits, counters.total_spent);
        if computed == counters.membership_tier {
            return UpgradeCheck::unchanged();
        }

        let points_earned = self.rules.points.upgrade_bonus(computed);
        tracing::debug!(
            from = %counters.membership_tier,
            to = %computed,
            points_earned,
            "Tier change detected"
        );

        UpgradeCheck {
            should_upgrade: true,
            new_tier: Some(computed),
            points_earned: Some(points_earned),
        }
    }

    /// Loyalty points for a visit: `floor(floor(amount / unit) * multiplier)`.
    ///
    /// A non-positive amount or points unit earns nothing.
    pub fn calculate_points_from_visit(&self, visit_amount: i64, tier: MembershipTier) -> i64 {
        let points = &self.rules.points;
        if visit_amount <= 0 || points.points_unit <= 0 {
            return 0;
        }
        let base_points = visit_amount / points.points_unit;
        let multiplier: Decimal = points.multiplier(tier);
        floor_to_i64(to_decimal(base_points) * multiplier)
    }

    /// 0-based position in the tier table (lowest tier if undefined)
    pub fn get_tier_rank(&self, tier: MembershipTier) -> usize {
        self.rules.tiers.position(tier).unwrap_or(0)
    }

    /// Whether `a` ranks above `b`
    pub fn is_higher_tier(&self, a: MembershipTier, b: MembershipTier) -> bool {
        self.get_tier_rank(a) > self.get_tier_rank(b)
    }
}
