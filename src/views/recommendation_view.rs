use serde::Serialize;

use crate::models::event::UiEvent;
use crate::services::catalog_store::CatalogStore;
use crate::utils::formatting::CurrencyFormat;

pub const NO_RECOMMENDATIONS: &str = "No recommendations available.";

/// One recommended add-on, with the event its "Add" button fires.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationRecord {
    pub item: String,
    pub price: f64,
    pub label: String,
    pub on_add: UiEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RecommendationRender {
    Placeholder { product: String, placeholder: String },
    Records { product: String, records: Vec<RecommendationRecord> },
}

impl RecommendationRender {
    pub fn product(&self) -> &str {
        match self {
            RecommendationRender::Placeholder { product, .. }
            | RecommendationRender::Records { product, .. } => product,
        }
    }

    /// Display records; empty for the placeholder.
    pub fn records(&self) -> &[RecommendationRecord] {
        match self {
            RecommendationRender::Placeholder { .. } => &[],
            RecommendationRender::Records { records, .. } => records,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, RecommendationRender::Placeholder { .. })
    }
}

pub fn render(catalog: &CatalogStore, product: &str, currency: &CurrencyFormat) -> RecommendationRender {
    match catalog.get_recommendations(product) {
        Some(recommendations) => RecommendationRender::Records {
            product: product.to_string(),
            records: recommendations
                .into_iter()
                .map(|rec| RecommendationRecord {
                    label: format!("{} - {}", rec.item, currency.format(rec.price)),
                    on_add: UiEvent::add(rec.item.clone(), rec.price),
                    item: rec.item,
                    price: rec.price,
                })
                .collect(),
        },
        None => RecommendationRender::Placeholder {
            product: product.to_string(),
            placeholder: NO_RECOMMENDATIONS.to_string(),
        },
    }
}
