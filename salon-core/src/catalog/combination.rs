//! Service Combination Validator
//!
//! Decides whether a set of selected services can be booked together and
//! produces the advisory text shown next to the booking form. Every check
//! runs; only conflicts make a selection invalid, warnings and suggestions
//! never block it.

use std::sync::Arc;

use shared::models::{CombinationCheck, MembershipTier, Service, ServiceCategory};

use super::ServiceCatalog;
use crate::core::RulesConfig;
use crate::membership::TierCalculator;
use crate::pricing::DiscountPolicy;

pub const EMPTY_SELECTION_MESSAGE: &str = "Please select at least one service.";

#[derive(Debug, Clone)]
pub struct ServiceCombinationValidator {
    catalog: Arc<ServiceCatalog>,
    rules: Arc<RulesConfig>,
}

impl ServiceCombinationValidator {
    pub fn new(catalog: Arc<ServiceCatalog>, rules: Arc<RulesConfig>) -> Self {
        Self { catalog, rules }
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    /// Check a selection of service ids.
    ///
    /// Duplicate ids are the caller's problem; ids missing from the catalog
    /// are ignored.
    pub fn validate(&self, service_ids: &[i64]) -> CombinationCheck {
        let selected = self.catalog.resolve(service_ids);
        let mut check = CombinationCheck::default();

        if selected.is_empty() {
            check.conflicts.push(EMPTY_SELECTION_MESSAGE.to_string());
        }

        self.check_combo_redundancy(&selected, &mut check);
        self.check_haircut_prerequisite(&selected, &mut check);
        self.check_treatment_count(&selected, &mut check);
        self.check_total_duration(&selected, &mut check);
        self.suggest_combo(&selected, &mut check);

        check.is_valid = check.conflicts.is_empty();
        tracing::debug!(
            selected = selected.len(),
            conflicts = check.conflicts.len(),
            warnings = check.warnings.len(),
            suggestions = check.suggestions.len(),
            "Validated service combination"
        );
        check
    }

    /// A combo plus a service it already includes
    fn check_combo_redundancy(&self, selected: &[&Service], check: &mut CombinationCheck) {
        let combos = &self.rules.combinations;
        for combo in selected.iter().filter(|s| s.is_combo()) {
            let included = combos.included_in(&combo.name);
            let redundant: Vec<&str> = selected
                .iter()
                .filter(|s| !s.is_combo() && included.contains(&s.name))
                .map(|s| s.name.as_str())
                .collect();

            if !redundant.is_empty() {
                check.conflicts.push(format!(
                    "\"{}\" already includes {}. Remove {} or the combo.",
                    combo.name,
                    redundant.join(", "),
                    redundant.join(", ")
                ));
            }
        }
    }

    /// Perm and lift treatments booked without any haircut
    fn check_haircut_prerequisite(&self, selected: &[&Service], check: &mut CombinationCheck) {
        let combos = &self.rules.combinations;
        let needs_haircut: Vec<&str> = selected
            .iter()
            .filter(|s| combos.haircut_prerequisite_treatments.contains(&s.name))
            .map(|s| s.name.as_str())
            .collect();
        if needs_haircut.is_empty() {
            return;
        }

        let has_haircut = selected
            .iter()
            .any(|s| s.name == combos.haircut_service_name || s.is_combo());
        if has_haircut {
            return;
        }

        check.warnings.push(format!(
            "{} is usually done together with a haircut.",
            needs_haircut.join(", ")
        ));
        check.suggestions.push(format!(
            "Consider adding a {} or booking a combo service.",
            combos.haircut_service_name
        ));
    }

    /// Too many chemical treatments in one sitting
    fn check_treatment_count(&self, selected: &[&Service], check: &mut CombinationCheck) {
        let treatments = selected
            .iter()
            .filter(|s| s.category == ServiceCategory::Treatment)
            .count();
        if treatments > self.rules.combinations.max_treatments {
            check.warnings.push(format!(
                "{} chemical treatments in one visit may be too harsh on the hair.",
                treatments
            ));
        }
    }

    fn check_total_duration(&self, selected: &[&Service], check: &mut CombinationCheck) {
        let total: u32 = selected.iter().map(|s| s.duration_minutes).sum();
        if total > self.rules.combinations.max_duration_minutes {
            let hours = (total + 30) / 60;
            check.warnings.push(format!(
                "Total duration is about {} hours. Consider splitting into multiple visits.",
                hours
            ));
        }
    }

    /// Haircut + one other service when a matching combo exists
    fn suggest_combo(&self, selected: &[&Service], check: &mut CombinationCheck) {
        let combos = &self.rules.combinations;
        if selected.len() != 2 {
            return;
        }
        let Some(haircut_idx) = selected
            .iter()
            .position(|s| s.name == combos.haircut_service_name)
        else {
            return;
        };
        let other = selected[1 - haircut_idx];
        if other.is_combo() {
            return;
        }

        let combo_name = combos.haircut_combo_name(&other.name);
        if let Some(combo) = self.catalog.find_by_name(&combo_name) {
            check.suggestions.push(format!(
                "Book \"{}\" instead of {} and {} separately.",
                combo.name, combos.haircut_service_name, other.name
            ));
        }
    }

    /// Quote for a selection: flat discount first, then the tier discount
    /// on top of it (compounded), rounded to a whole unit.
    pub fn calculate_total_price(
        &self,
        service_ids: &[i64],
        discount_percent: u32,
        tier: Option<MembershipTier>,
    ) -> i64 {
        let base: i64 = self
            .catalog
            .resolve(service_ids)
            .iter()
            .map(|s| s.base_price)
            .sum();
        let tier_discount = tier
            .map(|t| {
                TierCalculator::new(self.rules.clone())
                    .get_level_info(t)
                    .discount_percentage
            })
            .unwrap_or(0);

        DiscountPolicy::Compound.apply(base, discount_percent, tier_discount)
    }

    pub fn calculate_total_duration(&self, service_ids: &[i64]) -> u32 {
        self.catalog
            .resolve(service_ids)
            .iter()
            .map(|s| s.duration_minutes)
            .sum()
    }
}
