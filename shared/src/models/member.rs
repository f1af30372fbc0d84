//! Member Model

use serde::{Deserialize, Serialize};

use super::membership::MembershipTier;

/// Counters kept for one member (会员累计数据)
///
/// `membership_tier` is the cached tier as stored; it may lag the tier the
/// counters qualify for until an upgrade check is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberCounters {
    pub total_visits: i64,
    pub total_spent: i64,
    #[serde(default)]
    pub membership_tier: MembershipTier,
}

impl MemberCounters {
    pub fn new(total_visits: i64, total_spent: i64, membership_tier: MembershipTier) -> Self {
        Self {
            total_visits,
            total_spent,
            membership_tier,
        }
    }

    /// Counters after one more visit paying `final_price`
    pub fn after_visit(&self, final_price: i64) -> Self {
        Self {
            total_visits: self.total_visits + 1,
            total_spent: self.total_spent + final_price.max(0),
            membership_tier: self.membership_tier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_after_visit_keeps_cached_tier() {
        let counters = MemberCounters::new(4, 250_000, MembershipTier::Bronze);
        let next = counters.after_visit(60_000);

        assert_eq!(next.total_visits, 5);
        assert_eq!(next.total_spent, 310_000);
        assert_eq!(next.membership_tier, MembershipTier::Bronze);
        // source snapshot untouched
        assert_eq!(counters.total_visits, 4);
    }

    #[test]
    fn test_missing_tier_defaults_to_bronze() {
        let counters: MemberCounters =
            serde_json::from_str(r#"{"total_visits":3,"total_spent":1000}"#).unwrap();
        assert_eq!(counters.membership_tier, MembershipTier::Bronze);
    }
}
