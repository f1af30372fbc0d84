//! Collaborators the checkout flow talks to
//!
//! Storage lives outside this crate; these traits are the only place the
//! rules core reaches it. Implementations must be `Send + Sync` so one
//! [`VisitCheckout`](super::VisitCheckout) can serve several threads.

use shared::error::AppResult;
use shared::models::{MemberCounters, Service, VisitRecord};

/// Source of the salon's current service list
pub trait ServiceCatalogProvider: Send + Sync {
    /// Every service, active or not
    fn load_services(&self) -> AppResult<Vec<Service>>;
}

/// Source of a member's visit/spend counters (会员统计)
pub trait MemberCountersProvider: Send + Sync {
    /// Counters for `member_id`; unknown members should yield `MemberNotFound`
    fn load_counters(&self, member_id: i64) -> AppResult<MemberCounters>;
}

/// Where finished visits go
pub trait VisitSink: Send + Sync {
    fn record_visit(&self, record: &VisitRecord) -> AppResult<()>;

    /// Persist the counters after the visit, including any tier change
    fn update_counters(&self, member_id: i64, counters: &MemberCounters) -> AppResult<()>;
}
