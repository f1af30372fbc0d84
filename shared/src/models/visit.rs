//! Visit Models
//!
//! Results produced while a stylist rings up a visit, and the record handed
//! to the persistence layer afterwards.

use serde::{Deserialize, Serialize};

use super::membership::MembershipTier;

/// Totals for one visit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitTotals {
    pub base_total: i64,
    /// Discount granted by the member's tier (percent)
    pub membership_discount: u32,
    /// Discount entered by staff (percent)
    pub custom_discount: u32,
    /// Discount actually applied (percent)
    pub total_discount: u32,
    pub final_price: i64,
    pub total_duration: u32,
    pub points_earned: i64,
}

/// Outcome of checking a set of selected services
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinationCheck {
    /// False iff `conflicts` is non-empty
    pub is_valid: bool,
    pub conflicts: Vec<String>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

/// A priced service line as stored with the visit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecordLine {
    pub service_id: i64,
    pub service_name: String,
    /// Price charged before the visit discount
    pub price: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Visit record (来店记录) ready for persistence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub member_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stylist_id: Option<i64>,
    /// Tier the visit was priced with
    pub membership_tier: MembershipTier,
    pub lines: Vec<VisitRecordLine>,
    pub totals: VisitTotals,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Unix millis
    pub visited_at: i64,
}
