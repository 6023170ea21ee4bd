use indexmap::IndexMap;
use tracing::debug;

use crate::models::catalog::{CatalogError, TrendingSeed};

/// Running tally of how many times each item has ever been added to a cart.
///
/// Keys keep insertion order; that order is the chart's label order.
/// Counts only go up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrendingCounter {
    counts: IndexMap<String, u64>,
}

impl TrendingCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(seed: &[TrendingSeed]) -> Result<Self, CatalogError> {
        let mut counts = IndexMap::with_capacity(seed.len());
        for TrendingSeed { label, count } in seed {
            if counts.insert(label.clone(), *count).is_some() {
                return Err(CatalogError::DuplicateTrendingLabel(label.clone()));
            }
        }
        Ok(Self { counts })
    }

    /// Bump `label` by one, appending it at zero first if unseen. Returns the new count.
    pub fn increment(&mut self, label: &str) -> u64 {
        let count = self.counts.entry(label.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        debug!("Trending count for '{}' is now {}", label, count);
        *count
    }

    /// Current count; unknown labels read as zero.
    pub fn count(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    pub fn labels(&self) -> Vec<String> {
        self.counts.keys().cloned().collect()
    }

    pub fn values(&self) -> Vec<u64> {
        self.counts.values().copied().collect()
    }

    /// The `n` highest counts, descending; ties keep key order.
    pub fn top(&self, n: usize) -> Vec<(String, u64)> {
        let mut ranked: Vec<(String, u64)> = self
            .counts
            .iter()
            .map(|(label, count)| (label.clone(), *count))
            .collect();
        // stable sort keeps insertion order among equal counts
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::ShopSeed;

    fn builtin() -> TrendingCounter {
        TrendingCounter::seeded(&ShopSeed::builtin().trending).unwrap()
    }

    #[test]
    fn test_seed_order_is_preserved() {
        let counter = builtin();
        assert_eq!(
            counter.labels(),
            vec!["Sugar Cubes", "Elaichi", "Laptop", "Mouse", "Cooling Pad"]
        );
        assert_eq!(counter.values(), vec![10, 20, 15, 12, 18]);
    }

    #[test]
    fn test_increment_existing_and_new() {
        let mut counter = builtin();
        assert_eq!(counter.increment("Mouse"), 13);
        assert_eq!(counter.increment("Keyboard"), 1);
        assert_eq!(counter.labels().last().map(String::as_str), Some("Keyboard"));
        assert_eq!(counter.count("Keyboard"), 1);
        assert_eq!(counter.len(), 6);
    }

    #[test]
    fn test_increment_keeps_existing_position() {
        let mut counter = builtin();
        counter.increment("Keyboard");
        counter.increment("Sugar Cubes");
        assert_eq!(counter.labels()[0], "Sugar Cubes");
        assert_eq!(counter.values(), vec![11, 20, 15, 12, 18, 1]);
    }

    #[test]
    fn test_unknown_label_counts_zero() {
        let counter = builtin();
        assert_eq!(counter.count("Honey"), 0);
        assert!(!counter.labels().contains(&"Honey".to_string()));
    }

    #[test]
    fn test_top_orders_by_count_then_key_order() {
        let mut counter = builtin();
        counter.increment("Laptop");
        counter.increment("Laptop");
        counter.increment("Laptop");
        // Laptop 18 ties Cooling Pad 18 and came first
        let top = counter.top(3);
        assert_eq!(
            top,
            vec![
                ("Elaichi".to_string(), 20),
                ("Laptop".to_string(), 18),
                ("Cooling Pad".to_string(), 18),
            ]
        );
        assert_eq!(counter.top(100).len(), 5);
        assert!(TrendingCounter::new().top(5).is_empty());
    }

    #[test]
    fn test_duplicate_seed_rejected() {
        let seed = vec![
            TrendingSeed { label: "Mouse".to_string(), count: 1 },
            TrendingSeed { label: "Mouse".to_string(), count: 2 },
        ];
        assert!(matches!(
            TrendingCounter::seeded(&seed),
            Err(CatalogError::DuplicateTrendingLabel(l)) if l == "Mouse"
        ));
    }
}
