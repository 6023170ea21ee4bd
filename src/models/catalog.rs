use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::utils::validation::is_valid_price;

/// One product and its recommended add-ons.
///
/// `items` and `prices` are parallel: `prices[i]` is the price of `items[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_catalog_entry"))]
pub struct CatalogEntry {
    #[validate(custom = "validate_product_name")]
    pub product: String,

    #[serde(default)]
    pub items: Vec<String>,

    #[serde(default)]
    pub prices: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub item: String,
    pub price: f64,
}

impl CatalogEntry {
    pub fn new(product: impl Into<String>, pairs: &[(&str, f64)]) -> Self {
        Self {
            product: product.into(),
            items: pairs.iter().map(|(item, _)| item.to_string()).collect(),
            prices: pairs.iter().map(|(_, price)| *price).collect(),
        }
    }

    pub fn recommendations(&self) -> Vec<Recommendation> {
        self.items
            .iter()
            .zip(self.prices.iter())
            .map(|(item, price)| Recommendation {
                item: item.clone(),
                price: *price,
            })
            .collect()
    }
}

fn validate_product_name(product: &str) -> Result<(), ValidationError> {
    if product.trim().is_empty() {
        return Err(ValidationError::new("product_name_required"));
    }
    Ok(())
}

fn validate_catalog_entry(entry: &CatalogEntry) -> Result<(), ValidationError> {
    if entry.items.len() != entry.prices.len() {
        return Err(ValidationError::new("items_prices_length_mismatch"));
    }

    if entry.items.iter().any(|item| item.trim().is_empty()) {
        return Err(ValidationError::new("item_name_required"));
    }

    if !entry.prices.iter().all(|price| is_valid_price(*price)) {
        return Err(ValidationError::new("price_must_be_non_negative"));
    }

    Ok(())
}

/// Initial count for one trending label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingSeed {
    pub label: String,
    pub count: u64,
}

/// Everything the widget is started with: the catalog and the trending seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopSeed {
    pub catalog: Vec<CatalogEntry>,

    #[serde(default)]
    pub trending: Vec<TrendingSeed>,
}

impl ShopSeed {
    /// Seed data the widget ships with.
    pub fn builtin() -> Self {
        Self {
            catalog: vec![
                CatalogEntry::new(
                    "Premia Tea Masala",
                    &[
                        ("Sugar Cubes", 50.0),
                        ("Elaichi", 100.0),
                        ("Ginger Powder", 75.0),
                        ("Honey", 120.0),
                        ("Milk Powder", 80.0),
                    ],
                ),
                CatalogEntry::new(
                    "Laptop",
                    &[("Mouse", 500.0), ("Keyboard", 800.0), ("Cooling Pad", 1000.0)],
                ),
            ],
            trending: [
                ("Sugar Cubes", 10),
                ("Elaichi", 20),
                ("Laptop", 15),
                ("Mouse", 12),
                ("Cooling Pad", 18),
            ]
            .iter()
            .map(|(label, count)| TrendingSeed {
                label: label.to_string(),
                count: *count,
            })
            .collect(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();
        let json = std::fs::read_to_string(&path).map_err(|source| CatalogError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

impl Default for ShopSeed {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Validation error for product '{product}': {source}")]
    ValidationError {
        product: String,
        #[source]
        source: validator::ValidationErrors,
    },

    #[error("Duplicate product in catalog: '{0}'")]
    DuplicateProduct(String),

    #[error("Duplicate trending label: '{0}'")]
    DuplicateTrendingLabel(String),

    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_validation() {
        assert!(CatalogEntry::new("Laptop", &[("Mouse", 500.0)]).validate().is_ok());
        assert!(CatalogEntry::new("Empty", &[]).validate().is_ok());
        assert!(CatalogEntry::new("  ", &[("Mouse", 500.0)]).validate().is_err());
        assert!(CatalogEntry::new("Laptop", &[("Mouse", -1.0)]).validate().is_err());
        assert!(CatalogEntry::new("Laptop", &[("", 1.0)]).validate().is_err());

        let mismatched = CatalogEntry {
            product: "Laptop".to_string(),
            items: vec!["Mouse".to_string(), "Keyboard".to_string()],
            prices: vec![500.0],
        };
        assert!(mismatched.validate().is_err());
    }

    #[test]
    fn test_recommendations_are_index_aligned() {
        let entry = CatalogEntry::new("Laptop", &[("Mouse", 500.0), ("Keyboard", 800.0)]);
        let recs = entry.recommendations();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[1].item, "Keyboard");
        assert_eq!(recs[1].price, 800.0);
    }

    #[test]
    fn test_seed_json() {
        let seed = ShopSeed::from_json_str(
            r#"{
                "catalog": [{"product": "Desk", "items": ["Lamp"], "prices": [300]}],
                "trending": [{"label": "Lamp", "count": 4}]
            }"#,
        )
        .unwrap();
        assert_eq!(seed.catalog[0].product, "Desk");
        assert_eq!(seed.catalog[0].prices, vec![300.0]);
        assert_eq!(seed.trending[0].count, 4);

        let no_trending = ShopSeed::from_json_str(r#"{"catalog": []}"#).unwrap();
        assert!(no_trending.trending.is_empty());

        assert!(matches!(
            ShopSeed::from_json_str("{not json"),
            Err(CatalogError::Parse(_))
        ));
    }
}
