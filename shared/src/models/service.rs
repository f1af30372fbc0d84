//! Service Catalog Models

use serde::{Deserialize, Serialize};

/// Service category enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Haircut,
    Styling,
    Treatment,
    Coloring,
    Beard,
    Wash,
    /// Bundles other services (see the combo inclusion table)
    Combo,
}

/// Catalog entry (服务项目)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    /// Unique within the catalog
    pub name: String,
    pub category: ServiceCategory,
    pub base_price: i64,
    pub duration_minutes: u32,
    pub is_active: bool,
}

impl Service {
    #[inline]
    pub fn is_combo(&self) -> bool {
        self.category == ServiceCategory::Combo
    }
}

/// One selected service in a visit being priced (not persisted by the core)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedServiceLine {
    pub service_id: i64,
    /// Overrides the catalog base price for this visit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SelectedServiceLine {
    pub fn new(service_id: i64) -> Self {
        Self {
            service_id,
            custom_price: None,
            notes: None,
        }
    }

    pub fn with_custom_price(mut self, price: i64) -> Self {
        self.custom_price = Some(price);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serde() {
        let json = serde_json::to_string(&ServiceCategory::Treatment).unwrap();
        assert_eq!(json, "\"treatment\"");
        let category: ServiceCategory = serde_json::from_str("\"combo\"").unwrap();
        assert_eq!(category, ServiceCategory::Combo);
    }

    #[test]
    fn test_line_optional_fields() {
        let line: SelectedServiceLine = serde_json::from_str(r#"{"service_id":3}"#).unwrap();
        assert_eq!(line, SelectedServiceLine::new(3));

        let line = SelectedServiceLine::new(3)
            .with_custom_price(15_000)
            .with_notes("short on sides");
        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains("\"custom_price\":15000"));
        assert!(json.contains("\"notes\":\"short on sides\""));
    }
}
