//! Catalog used by unit tests across the crate

use shared::models::{Service, ServiceCategory};

use super::ServiceCatalog;

pub const HAIRCUT: i64 = 1;
pub const ROOT_LIFT: i64 = 2;
pub const DOWN_PERM: i64 = 3;
pub const DESIGN_PERM: i64 = 4;
pub const COLOR: i64 = 5;
pub const BEARD_TRIM: i64 = 6;
pub const SHAMPOO: i64 = 7;
pub const BLOW_DRY: i64 = 8;
pub const CLINIC: i64 = 9;
pub const HAIRCUT_ROOT_LIFT: i64 = 10;
pub const HAIRCUT_DOWN_PERM: i64 = 11;
pub const HAIRCUT_BEARD_TRIM: i64 = 12;

fn service(
    id: i64,
    name: &str,
    category: ServiceCategory,
    base_price: i64,
    duration_minutes: u32,
) -> Service {
    Service {
        id,
        name: name.to_string(),
        category,
        base_price,
        duration_minutes,
        is_active: true,
    }
}

pub fn sample_services() -> Vec<Service> {
    use ServiceCategory::*;
    vec![
        service(HAIRCUT, "Haircut", Haircut, 20_000, 30),
        service(ROOT_LIFT, "Root Lift", Treatment, 50_000, 60),
        service(DOWN_PERM, "Down Perm", Treatment, 40_000, 60),
        service(DESIGN_PERM, "Design Perm", Treatment, 120_000, 120),
        service(COLOR, "Color", Coloring, 80_000, 90),
        service(BEARD_TRIM, "Beard Trim", Beard, 10_000, 20),
        service(SHAMPOO, "Shampoo", Wash, 5_000, 10),
        service(BLOW_DRY, "Blow Dry", Styling, 15_000, 30),
        service(CLINIC, "Clinic Treatment", Treatment, 60_000, 60),
        service(HAIRCUT_ROOT_LIFT, "Haircut + Root Lift", Combo, 65_000, 80),
        service(HAIRCUT_DOWN_PERM, "Haircut + Down Perm", Combo, 55_000, 80),
        service(HAIRCUT_BEARD_TRIM, "Haircut + Beard Trim", Combo, 27_000, 45),
    ]
}

pub fn sample_catalog() -> ServiceCatalog {
    ServiceCatalog::new(sample_services()).unwrap()
}
