//! Service Catalog
//!
//! In-memory snapshot of the services a salon offers, indexed by id and name.

use std::collections::HashMap;

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::Service;

#[derive(Debug, Clone, Default)]
pub struct ServiceCatalog {
    services: Vec<Service>,
    by_id: HashMap<i64, usize>,
    by_name: HashMap<String, usize>,
}

impl ServiceCatalog {
    /// Build a catalog, rejecting duplicate ids or names
    pub fn new(services: Vec<Service>) -> AppResult<Self> {
        let mut by_id = HashMap::with_capacity(services.len());
        let mut by_name = HashMap::with_capacity(services.len());

        for (idx, service) in services.iter().enumerate() {
            if by_id.insert(service.id, idx).is_some() {
                return Err(AppError::with_message(
                    ErrorCode::AlreadyExists,
                    format!("duplicate service id {}", service.id),
                )
                .with_detail("service_id", service.id));
            }
            if by_name.insert(service.name.clone(), idx).is_some() {
                return Err(AppError::with_message(
                    ErrorCode::AlreadyExists,
                    format!("duplicate service name '{}'", service.name),
                )
                .with_detail("service_name", service.name.clone()));
            }
        }

        Ok(Self {
            services,
            by_id,
            by_name,
        })
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn get(&self, id: i64) -> Option<&Service> {
        self.by_id.get(&id).map(|&idx| &self.services[idx])
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Service> {
        self.by_name.get(name).map(|&idx| &self.services[idx])
    }

    /// Look up every id, skipping ones the catalog does not know
    pub fn resolve(&self, ids: &[i64]) -> Vec<&Service> {
        ids.iter()
            .filter_map(|&id| {
                let service = self.get(id);
                if service.is_none() {
                    tracing::warn!(service_id = id, "Selected service not in catalog, ignoring");
                }
                service
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ServiceCategory;

    fn service(id: i64, name: &str) -> Service {
        Service {
            id,
            name: name.to_string(),
            category: ServiceCategory::Haircut,
            base_price: 20_000,
            duration_minutes: 30,
            is_active: true,
        }
    }

    #[test]
    fn test_lookup_by_id_and_name() {
        let catalog = ServiceCatalog::new(vec![service(1, "Haircut"), service(2, "Wash")]).unwrap();
        assert_eq!(catalog.get(2).unwrap().name, "Wash");
        assert_eq!(catalog.find_by_name("Haircut").unwrap().id, 1);
        assert!(catalog.get(3).is_none());
        assert!(catalog.find_by_name("Perm").is_none());
    }

    #[test]
    fn test_resolve_skips_unknown_ids() {
        let catalog = ServiceCatalog::new(vec![service(1, "Haircut"), service(2, "Wash")]).unwrap();
        let resolved = catalog.resolve(&[2, 99, 1]);
        let ids: Vec<i64> = resolved.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = ServiceCatalog::new(vec![service(1, "Haircut"), service(1, "Wash")]).unwrap_err();
        assert_eq!(err.code, ErrorCode::AlreadyExists);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let err =
            ServiceCatalog::new(vec![service(1, "Haircut"), service(2, "Haircut")]).unwrap_err();
        assert_eq!(err.code, ErrorCode::AlreadyExists);
        assert_eq!(
            err.details.unwrap().get("service_name").unwrap(),
            "Haircut"
        );
    }
}
