//! 业务规则配置 - tier table, loyalty points and service-combination rules
//!
//! Everything the calculators treat as static configuration lives here and
//! is injected as `Arc<RulesConfig>`. [`RulesConfig::default`] carries the
//! salon's standard rules.

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{MembershipTier, TierDefinition};

use crate::pricing::DiscountPolicy;

/// Visit amount that earns one base point
pub const DEFAULT_POINTS_UNIT: i64 = 10_000;
/// Treatments allowed in one visit before a warning
pub const DEFAULT_MAX_TREATMENTS: usize = 2;
/// Visit length (minutes) above which splitting is suggested
pub const DEFAULT_MAX_DURATION_MINUTES: u32 = 240;
/// Name of the plain haircut service
pub const HAIRCUT_SERVICE_NAME: &str = "Haircut";

// ========== Tier table ==========

/// Ordered tier table (lowest rank first)
///
/// Construction validates that rows are in strictly increasing tier order,
/// thresholds never decrease and discounts stay within 0-100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TierDefinition>", into = "Vec<TierDefinition>")]
pub struct TierTable {
    rows: Vec<TierDefinition>,
}

impl TierTable {
    pub fn new(rows: Vec<TierDefinition>) -> AppResult<Self> {
        if rows.is_empty() {
            return Err(invalid_table("tier table must contain at least one tier"));
        }

        for row in &rows {
            if row.min_visits < 0 || row.min_spending < 0 {
                return Err(invalid_table(format!(
                    "tier {} has negative thresholds",
                    row.tier
                ))
                .with_detail("tier", row.tier.as_str()));
            }
            if row.discount_percentage > 100 {
                return Err(invalid_table(format!(
                    "tier {} discount {}% exceeds 100%",
                    row.tier, row.discount_percentage
                ))
                .with_detail("tier", row.tier.as_str()));
            }
        }

        for pair in rows.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            if upper.tier <= lower.tier {
                return Err(invalid_table(format!(
                    "tier {} listed after {}",
                    upper.tier, lower.tier
                )));
            }
            if upper.min_visits < lower.min_visits || upper.min_spending < lower.min_spending {
                return Err(invalid_table(format!(
                    "tier {} thresholds are below tier {}",
                    upper.tier, lower.tier
                ))
                .with_detail("tier", upper.tier.as_str()));
            }
        }

        Ok(Self { rows })
    }

    #[inline]
    pub fn rows(&self) -> &[TierDefinition] {
        &self.rows
    }

    /// Lowest-ranked row (the table is never empty)
    #[inline]
    pub fn lowest(&self) -> &TierDefinition {
        &self.rows[0]
    }

    /// Highest-ranked row
    #[inline]
    pub fn highest(&self) -> &TierDefinition {
        &self.rows[self.rows.len() - 1]
    }

    /// Row index of `tier`, if the table defines it
    pub fn position(&self, tier: MembershipTier) -> Option<usize> {
        self.rows.iter().position(|row| row.tier == tier)
    }
}

impl TryFrom<Vec<TierDefinition>> for TierTable {
    type Error = AppError;

    fn try_from(rows: Vec<TierDefinition>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<TierTable> for Vec<TierDefinition> {
    fn from(table: TierTable) -> Self {
        table.rows
    }
}

impl Default for TierTable {
    fn default() -> Self {
        let row = |tier, min_visits, min_spending, discount_percentage, benefits: &[&str]| {
            TierDefinition {
                tier,
                min_visits,
                min_spending,
                discount_percentage,
                benefits: benefits.iter().map(|b| b.to_string()).collect(),
            }
        };

        Self {
            rows: vec![
                row(
                    MembershipTier::Bronze,
                    0,
                    0,
                    0,
                    &["Visit history tracking", "Birthday greeting"],
                ),
                row(
                    MembershipTier::Silver,
                    5,
                    300_000,
                    5,
                    &["5% discount on all services", "Free scalp check"],
                ),
                row(
                    MembershipTier::Gold,
                    15,
                    1_000_000,
                    10,
                    &[
                        "10% discount on all services",
                        "Priority booking",
                        "Free hair treatment on birthday",
                    ],
                ),
                row(
                    MembershipTier::Platinum,
                    30,
                    2_500_000,
                    15,
                    &[
                        "15% discount on all services",
                        "Priority booking",
                        "Complimentary styling once a month",
                    ],
                ),
                row(
                    MembershipTier::Diamond,
                    50,
                    5_000_000,
                    20,
                    &[
                        "20% discount on all services",
                        "Dedicated stylist",
                        "Complimentary treatment every visit",
                        "Exclusive event invitations",
                    ],
                ),
            ],
        }
    }
}

fn invalid_table(msg: impl Into<String>) -> AppError {
    AppError::with_message(ErrorCode::InvalidTierTable, msg)
}

// ========== Loyalty points ==========

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointsConfig {
    /// Visit amount per base point (`floor(amount / unit)`)
    pub points_unit: i64,
    /// Earn multiplier per tier; tiers missing here earn at 1.0
    pub multipliers: BTreeMap<MembershipTier, Decimal>,
    /// One-off bonus reported when a member reaches a tier
    pub upgrade_bonus: BTreeMap<MembershipTier, i64>,
}

impl PointsConfig {
    pub fn multiplier(&self, tier: MembershipTier) -> Decimal {
        self.multipliers.get(&tier).copied().unwrap_or(Decimal::ONE)
    }

    pub fn upgrade_bonus(&self, tier: MembershipTier) -> i64 {
        self.upgrade_bonus.get(&tier).copied().unwrap_or_default()
    }
}

impl Default for PointsConfig {
    fn default() -> Self {
        let multipliers = BTreeMap::from([
            (MembershipTier::Bronze, Decimal::new(10, 1)),
            (MembershipTier::Silver, Decimal::new(12, 1)),
            (MembershipTier::Gold, Decimal::new(15, 1)),
            (MembershipTier::Platinum, Decimal::new(18, 1)),
            (MembershipTier::Diamond, Decimal::new(20, 1)),
        ]);
        let upgrade_bonus = BTreeMap::from([
            (MembershipTier::Bronze, 0),
            (MembershipTier::Silver, 100),
            (MembershipTier::Gold, 300),
            (MembershipTier::Platinum, 500),
            (MembershipTier::Diamond, 1_000),
        ]);

        Self {
            points_unit: DEFAULT_POINTS_UNIT,
            multipliers,
            upgrade_bonus,
        }
    }
}

// ========== Service combinations ==========

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombinationRules {
    /// Combo service name -> names of the services it already includes
    pub combo_includes: BTreeMap<String, Vec<String>>,
    /// Name of the plain haircut service
    pub haircut_service_name: String,
    /// Treatments that are normally booked together with a haircut
    pub haircut_prerequisite_treatments: Vec<String>,
    /// More treatments than this in one visit triggers a warning
    pub max_treatments: usize,
    /// Longer visits than this (minutes) trigger a warning
    pub max_duration_minutes: u32,
}

impl CombinationRules {
    pub fn included_in(&self, combo_name: &str) -> &[String] {
        self.combo_includes
            .get(combo_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Name a haircut combo for `other` would carry
    pub fn haircut_combo_name(&self, other: &str) -> String {
        format!("{} + {}", self.haircut_service_name, other)
    }
}

impl Default for CombinationRules {
    fn default() -> Self {
        let haircut = HAIRCUT_SERVICE_NAME.to_string();
        let combo = |other: &str| {
            (
                format!("{} + {}", haircut, other),
                vec![haircut.clone(), other.to_string()],
            )
        };

        Self {
            combo_includes: BTreeMap::from([
                combo("Root Lift"),
                combo("Down Perm"),
                combo("Design Perm"),
                combo("Color"),
                combo("Beard Trim"),
                combo("Shampoo"),
            ]),
            haircut_service_name: haircut.clone(),
            haircut_prerequisite_treatments: vec![
                "Root Lift".to_string(),
                "Down Perm".to_string(),
                "Design Perm".to_string(),
            ],
            max_treatments: DEFAULT_MAX_TREATMENTS,
            max_duration_minutes: DEFAULT_MAX_DURATION_MINUTES,
        }
    }
}

// ========== Aggregate ==========

/// All business rules the calculators consume
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub tiers: TierTable,
    pub points: PointsConfig,
    pub combinations: CombinationRules,
    /// How staff discounts meet tier discounts at visit checkout
    pub visit_discount_policy: DiscountPolicy,
}

impl RulesConfig {
    /// Parse rules from JSON; omitted sections keep their defaults
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        let rules: Self = serde_json::from_str(json).map_err(|e| {
            let code = if e.is_data() {
                ErrorCode::ConfigError
            } else {
                ErrorCode::InvalidFormat
            };
            AppError::with_message(code, format!("invalid rules config: {}", e))
        })?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("failed to read rules file: {}", e))
                .with_detail("path", path.display().to_string())
        })?;
        let rules = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            tiers = rules.tiers.rows().len(),
            combos = rules.combinations.combo_includes.len(),
            "Loaded rules config"
        );
        Ok(rules)
    }

    /// Checks the parts serde cannot express
    pub fn validate(&self) -> AppResult<()> {
        if self.points.points_unit <= 0 {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                "points_unit must be positive",
            )
            .with_detail("points_unit", self.points.points_unit));
        }
        if let Some((tier, _)) = self
            .points
            .multipliers
            .iter()
            .find(|(_, m)| m.is_sign_negative())
        {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!("points multiplier for {} is negative", tier),
            ));
        }
        if self.combinations.max_duration_minutes == 0 {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                "max_duration_minutes must be positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(tier: MembershipTier, visits: i64, spending: i64, discount: u32) -> TierDefinition {
        TierDefinition {
            tier,
            min_visits: visits,
            min_spending: spending,
            discount_percentage: discount,
            benefits: vec![],
        }
    }

    #[test]
    fn test_default_table_is_valid_and_monotonic() {
        let table = TierTable::default();
        let rebuilt = TierTable::new(table.rows().to_vec()).unwrap();
        assert_eq!(rebuilt, table);

        for pair in table.rows().windows(2) {
            assert!(pair[0].tier < pair[1].tier);
            assert!(pair[0].min_visits <= pair[1].min_visits);
            assert!(pair[0].min_spending <= pair[1].min_spending);
        }
        assert_eq!(table.lowest().tier, MembershipTier::Bronze);
        assert_eq!(table.highest().tier, MembershipTier::Diamond);
    }

    #[test]
    fn test_empty_table_rejected() {
        let err = TierTable::new(vec![]).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTierTable);
    }

    #[test]
    fn test_out_of_order_table_rejected() {
        let err = TierTable::new(vec![
            def(MembershipTier::Gold, 10, 100, 10),
            def(MembershipTier::Silver, 5, 50, 5),
        ])
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTierTable);
    }

    #[test]
    fn test_decreasing_threshold_rejected() {
        let err = TierTable::new(vec![
            def(MembershipTier::Bronze, 0, 0, 0),
            def(MembershipTier::Silver, 5, 500, 5),
            def(MembershipTier::Gold, 4, 1_000, 10),
        ])
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTierTable);
        assert_eq!(err.details.unwrap().get("tier").unwrap(), "gold");
    }

    #[test]
    fn test_discount_above_hundred_rejected() {
        let err = TierTable::new(vec![def(MembershipTier::Bronze, 0, 0, 101)]).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTierTable);
    }

    #[test]
    fn test_partial_table_allowed() {
        let table = TierTable::new(vec![
            def(MembershipTier::Silver, 0, 0, 5),
            def(MembershipTier::Diamond, 10, 10_000, 20),
        ])
        .unwrap();
        assert_eq!(table.position(MembershipTier::Diamond), Some(1));
        assert_eq!(table.position(MembershipTier::Gold), None);
    }

    #[test]
    fn test_rules_from_json_keeps_defaults_for_missing_sections() {
        let json = r#"{
            "tiers": [
                {"tier": "bronze", "min_visits": 0, "min_spending": 0, "discount_percentage": 0, "benefits": []},
                {"tier": "gold", "min_visits": 3, "min_spending": 1000, "discount_percentage": 10, "benefits": ["x"]}
            ],
            "visit_discount_policy": "compound"
        }"#;
        let rules = RulesConfig::from_json_str(json).unwrap();

        assert_eq!(rules.tiers.rows().len(), 2);
        assert_eq!(rules.visit_discount_policy, DiscountPolicy::Compound);
        assert_eq!(rules.points, PointsConfig::default());
        assert_eq!(rules.combinations, CombinationRules::default());
    }

    #[test]
    fn test_rules_from_json_rejects_invalid_table() {
        let json = r#"{"tiers": []}"#;
        let err = RulesConfig::from_json_str(json).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError);
        assert!(err.message.contains("at least one tier"));
    }

    #[test]
    fn test_rules_from_json_rejects_malformed_json() {
        let err = RulesConfig::from_json_str("{not json").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }

    #[test]
    fn test_points_multiplier_from_json_float() {
        let json = r#"{"points": {"multipliers": {"gold": 1.75}}}"#;
        let rules = RulesConfig::from_json_str(json).unwrap();
        assert_eq!(
            rules.points.multiplier(MembershipTier::Gold),
            Decimal::new(175, 2)
        );
        // not listed -> 1.0
        assert_eq!(rules.points.multiplier(MembershipTier::Diamond), Decimal::ONE);
        // points_unit kept from the field default
        assert_eq!(rules.points.points_unit, DEFAULT_POINTS_UNIT);
    }

    #[test]
    fn test_validate_rejects_zero_points_unit() {
        let mut rules = RulesConfig::default();
        rules.points.points_unit = 0;
        assert_eq!(
            rules.validate().unwrap_err().code,
            ErrorCode::ValueOutOfRange
        );
    }

    #[test]
    fn test_combo_lookup() {
        let rules = CombinationRules::default();
        assert_eq!(
            rules.included_in("Haircut + Root Lift"),
            ["Haircut".to_string(), "Root Lift".to_string()]
        );
        assert!(rules.included_in("Unknown Combo").is_empty());
        assert_eq!(rules.haircut_combo_name("Shampoo"), "Haircut + Shampoo");
    }
}
