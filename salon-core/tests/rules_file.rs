use std::io::Write;
use std::sync::Arc;

use salon_core::{
    Config, ErrorCode, RulesConfig, ServiceCatalog, TierCalculator, VisitPricingEngine,
};
use shared::models::{MembershipTier, SelectedServiceLine, Service, ServiceCategory};
use tempfile::NamedTempFile;

const CUSTOM_RULES: &str = r#"{
    "tiers": [
        { "tier": "bronze", "min_visits": 0, "min_spending": 0, "discount_percentage": 0 },
        {
            "tier": "gold",
            "min_visits": 3,
            "min_spending": 50000,
            "discount_percentage": 12,
            "benefits": ["Free wash"]
        }
    ],
    "points": { "points_unit": 5000 },
    "visit_discount_policy": "compound"
}"#;

fn rules_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

fn config_for(file: &NamedTempFile) -> Config {
    Config::with_rules_path(file.path())
}

#[test]
fn test_rules_file_drives_calculators() {
    let file = rules_file(CUSTOM_RULES);
    let rules = Arc::new(config_for(&file).load_rules().unwrap());

    let tiers = TierCalculator::new(rules.clone());
    assert_eq!(tiers.calculate_tier(3, 50_000), MembershipTier::Gold);
    assert_eq!(tiers.calculate_tier(2, 900_000), MembershipTier::Bronze);
    // silver is not in this table
    assert_eq!(
        tiers.get_level_info(MembershipTier::Silver).tier,
        MembershipTier::Bronze
    );
    assert!(tiers.calculate_progress(10, 90_000, MembershipTier::Gold).is_max_tier);

    let catalog = ServiceCatalog::new(vec![Service {
        id: 1,
        name: "Design Perm".into(),
        category: ServiceCategory::Treatment,
        base_price: 100_000,
        duration_minutes: 120,
        is_active: true,
    }])
    .unwrap();
    let engine = VisitPricingEngine::new(Arc::new(catalog), rules);
    let totals = engine.calculate(&[SelectedServiceLine::new(1)], 10, MembershipTier::Gold);

    // 100000 * 0.90 * 0.88
    assert_eq!(totals.final_price, 79_200);
    // floor(floor(79200 / 5000) * 1.5)
    assert_eq!(totals.points_earned, 22);
}

#[test]
fn test_sections_left_out_keep_defaults() {
    let file = rules_file(r#"{ "points": { "points_unit": 20000 } }"#);
    let config = config_for(&file);
    assert_eq!(config.rules_path.as_deref(), Some(file.path()));
    let rules = config.load_rules().unwrap();
    let defaults = RulesConfig::default();

    assert_eq!(rules.points.points_unit, 20_000);
    assert_eq!(rules.points.multipliers, defaults.points.multipliers);
    assert_eq!(rules.tiers, defaults.tiers);
    assert_eq!(rules.combinations, defaults.combinations);
    assert_eq!(rules.visit_discount_policy, defaults.visit_discount_policy);
}

#[test]
fn test_malformed_json_is_invalid_format() {
    let file = rules_file("{ \"tiers\": [");
    let err = config_for(&file).load_rules().unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidFormat);
}

#[test]
fn test_bad_values_rejected_at_load() {
    let cases = [
        (r#"{ "tiers": [] }"#, ErrorCode::ConfigError),
        (r#"{ "visit_discount_policy": "lowest" }"#, ErrorCode::ConfigError),
        (r#"{ "points": { "points_unit": 0 } }"#, ErrorCode::ValueOutOfRange),
        (
            r#"{ "combinations": { "max_duration_minutes": 0 } }"#,
            ErrorCode::ValueOutOfRange,
        ),
    ];

    for (json, code) in cases {
        let file = rules_file(json);
        let err = config_for(&file).load_rules().unwrap_err();
        assert_eq!(err.code, code, "{}", json);
    }
}

#[test]
fn test_unknown_tier_name_collapses_into_duplicate_row() {
    // "ruby" reads as bronze, which then appears twice
    let file = rules_file(
        r#"{ "tiers": [
            { "tier": "bronze", "min_visits": 0, "min_spending": 0, "discount_percentage": 0 },
            { "tier": "ruby", "min_visits": 5, "min_spending": 10, "discount_percentage": 5 }
        ] }"#,
    );
    let err = config_for(&file).load_rules().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigError);
}

#[test]
fn test_default_rules_round_trip_through_file() {
    let json = serde_json::to_string_pretty(&RulesConfig::default()).unwrap();
    let file = rules_file(&json);
    let rules = config_for(&file).load_rules().unwrap();
    assert_eq!(rules, RulesConfig::default());
}
