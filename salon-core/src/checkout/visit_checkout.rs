//! Visit Checkout
//!
//! Records one visit end to end:
//!
//! ```text
//! VisitRequest
//!     │ shape checks (discount, lines, duplicates)
//!     ▼
//! catalog + counters ──► combination check ──► pricing
//!                                                 │
//!                         counters.after_visit ◄──┘
//!                                 │ should_upgrade
//!                                 ▼
//!                          VisitSink ──► CheckoutReceipt
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    MemberCounters, SelectedServiceLine, UpgradeCheck, VisitRecord, VisitRecordLine,
};

use super::ports::{MemberCountersProvider, ServiceCatalogProvider, VisitSink};
use crate::catalog::{ServiceCatalog, ServiceCombinationValidator};
use crate::core::RulesConfig;
use crate::membership::TierCalculator;
use crate::pricing::VisitPricingEngine;

/// 来店结账请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRequest {
    pub member_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stylist_id: Option<i64>,
    pub lines: Vec<SelectedServiceLine>,
    /// Staff-entered discount, 0-100
    #[serde(default)]
    pub custom_discount_percent: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Unix millis, supplied by the caller
    pub visited_at: i64,
}

/// Everything the front desk shows after a visit is recorded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutReceipt {
    pub record: VisitRecord,
    /// Counters as persisted, tier already updated
    pub counters: MemberCounters,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
    pub upgrade: UpgradeCheck,
}

pub struct VisitCheckout {
    rules: Arc<RulesConfig>,
    tiers: TierCalculator,
    services: Arc<dyn ServiceCatalogProvider>,
    members: Arc<dyn MemberCountersProvider>,
    sink: Arc<dyn VisitSink>,
}

impl VisitCheckout {
    pub fn new(
        rules: Arc<RulesConfig>,
        services: Arc<dyn ServiceCatalogProvider>,
        members: Arc<dyn MemberCountersProvider>,
        sink: Arc<dyn VisitSink>,
    ) -> Self {
        Self {
            tiers: TierCalculator::new(rules.clone()),
            rules,
            services,
            members,
            sink,
        }
    }

    /// Validate, price and record a visit.
    ///
    /// Nothing reaches the sink unless every check passes. Advisory warnings
    /// and suggestions from the combination check are passed through on the
    /// receipt.
    pub fn checkout(&self, request: &VisitRequest) -> AppResult<CheckoutReceipt> {
        check_request_shape(request)?;

        let catalog = Arc::new(ServiceCatalog::new(self.services.load_services()?)?);
        check_services(&catalog, &request.lines)?;
        let counters = self.members.load_counters(request.member_id)?;
        let tier = counters.membership_tier;

        let service_ids: Vec<i64> = request.lines.iter().map(|l| l.service_id).collect();
        let check = ServiceCombinationValidator::new(catalog.clone(), self.rules.clone())
            .validate(&service_ids);
        if !check.is_valid {
            tracing::info!(
                member_id = request.member_id,
                conflicts = check.conflicts.len(),
                "Visit rejected by combination rules"
            );
            return Err(AppError::with_message(
                ErrorCode::ServiceCombinationConflict,
                check.conflicts.join(" "),
            )
            .with_detail("conflicts", check.conflicts));
        }

        let engine = VisitPricingEngine::new(catalog, self.rules.clone());
        let totals = engine.calculate(&request.lines, request.custom_discount_percent, tier);
        let lines = engine
            .price_lines(&request.lines)
            .into_iter()
            .map(|p| VisitRecordLine {
                service_id: p.service.id,
                service_name: p.service.name.clone(),
                price: p.price,
                notes: p.line.notes.clone(),
            })
            .collect();

        let record = VisitRecord {
            member_id: request.member_id,
            stylist_id: request.stylist_id,
            membership_tier: tier,
            lines,
            totals,
            notes: request.notes.clone(),
            visited_at: request.visited_at,
        };

        let mut updated = counters.after_visit(record.totals.final_price);
        let upgrade = self.tiers.should_upgrade(&updated);
        if upgrade.should_upgrade
            && let Some(new_tier) = upgrade.new_tier
        {
            updated.membership_tier = new_tier;
        }

        let member_id = request.member_id;
        self.sink
            .record_visit(&record)
            .map_err(|e| record_failed(member_id, "record_visit", e))?;
        self.sink
            .update_counters(member_id, &updated)
            .map_err(|e| record_failed(member_id, "update_counters", e))?;

        let actor = request
            .stylist_id
            .map(|id| format!("stylist:{}", id))
            .unwrap_or_else(|| "system".to_string());
        let resource = format!("member:{}", member_id);
        let summary = format!(
            "final_price={} discount={}% points={}",
            record.totals.final_price, record.totals.total_discount, record.totals.points_earned
        );
        crate::audit_log!(actor.as_str(), "record_visit", resource.as_str(), summary.as_str());
        if upgrade.should_upgrade {
            let change = format!("{} -> {}", tier, updated.membership_tier);
            crate::audit_log!(actor.as_str(), "tier_change", resource.as_str(), change.as_str());
        }

        tracing::info!(
            member_id,
            final_price = record.totals.final_price,
            tier = %updated.membership_tier,
            tier_changed = upgrade.should_upgrade,
            "Visit recorded"
        );

        Ok(CheckoutReceipt {
            record,
            counters: updated,
            warnings: check.warnings,
            suggestions: check.suggestions,
            upgrade,
        })
    }
}

/// Checks that need no collaborator
fn check_request_shape(request: &VisitRequest) -> AppResult<()> {
    if request.custom_discount_percent > 100 {
        return Err(AppError::with_message(
            ErrorCode::InvalidDiscount,
            format!(
                "discount must be between 0 and 100, got {}",
                request.custom_discount_percent
            ),
        )
        .with_detail("custom_discount_percent", request.custom_discount_percent));
    }
    if request.lines.is_empty() {
        return Err(AppError::invalid_request("Please select at least one service."));
    }

    let mut seen = HashSet::with_capacity(request.lines.len());
    for line in &request.lines {
        if !seen.insert(line.service_id) {
            return Err(AppError::with_message(
                ErrorCode::DuplicateService,
                format!("service {} selected more than once", line.service_id),
            )
            .with_detail("service_id", line.service_id));
        }
        if let Some(price) = line.custom_price
            && price < 0
        {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!("custom price for service {} is negative", line.service_id),
            )
            .with_detail("service_id", line.service_id)
            .with_detail("custom_price", price));
        }
    }
    Ok(())
}

fn check_services(catalog: &ServiceCatalog, lines: &[SelectedServiceLine]) -> AppResult<()> {
    for line in lines {
        let service = catalog.get(line.service_id).ok_or_else(|| {
            AppError::new(ErrorCode::ServiceNotFound).with_detail("service_id", line.service_id)
        })?;
        if !service.is_active {
            return Err(AppError::with_message(
                ErrorCode::ServiceInactive,
                format!("service '{}' is no longer offered", service.name),
            )
            .with_detail("service_id", service.id));
        }
    }
    Ok(())
}

fn record_failed(member_id: i64, step: &str, cause: AppError) -> AppError {
    tracing::error!(member_id, step, error = %cause, "Failed to persist visit");
    AppError::with_message(
        ErrorCode::VisitRecordFailed,
        format!("failed to record visit: {}", cause.message),
    )
    .with_detail("member_id", member_id)
    .with_detail("step", step)
    .with_detail("cause_code", cause.code.code())
}
