use indexmap::IndexMap;
use tracing::{debug, info};
use validator::Validate;

use crate::models::catalog::{CatalogEntry, CatalogError, Recommendation};

/// Read-only lookup from product name to its recommended add-ons.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    entries: IndexMap<String, CatalogEntry>,
}

impl CatalogStore {
    /// Validate and index catalog entries, keeping their order.
    pub fn new(catalog: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut entries = IndexMap::with_capacity(catalog.len());
        for entry in catalog {
            entry
                .validate()
                .map_err(|source| CatalogError::ValidationError {
                    product: entry.product.clone(),
                    source,
                })?;

            let product = entry.product.clone();
            if entries.insert(product.clone(), entry).is_some() {
                return Err(CatalogError::DuplicateProduct(product));
            }
        }

        info!("Catalog loaded with {} products", entries.len());
        Ok(Self { entries })
    }

    /// `None` means "no recommendations available", not a failure.
    pub fn get_recommendations(&self, product: &str) -> Option<Vec<Recommendation>> {
        let found = self.entries.get(product).map(CatalogEntry::recommendations);

        debug!(
            "Recommendation lookup for '{}': {}",
            product,
            found.as_ref().map_or("not found".to_string(), |r| format!("{} items", r.len()))
        );
        found
    }

    /// Product names in catalog order.
    pub fn products(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
