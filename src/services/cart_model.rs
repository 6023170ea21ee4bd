use tracing::{debug, info};

use crate::models::cart::CartEntry;
use crate::utils::validation::clamp_quantity;

/// Ordered cart contents, at most one entry per item name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartModel {
    entries: Vec<CartEntry>,
}

impl CartModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `name`. An existing entry keeps its first-seen price.
    ///
    /// Returns the entry's quantity after the add. The trending side effect
    /// belongs to the controller, which owns both models.
    pub fn add_item(&mut self, name: &str, price: f64) -> u32 {
        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => {
                entry.quantity = entry.quantity.saturating_add(1);
                debug!("Cart: '{}' quantity raised to {}", name, entry.quantity);
                entry.quantity
            }
            None => {
                self.entries.push(CartEntry::new(name, price));
                info!("Cart: added '{}' at {}", name, price);
                1
            }
        }
    }

    /// Remove `name` if present. Returns whether anything was removed.
    pub fn remove_item(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.name != name);
        let removed = self.entries.len() != before;

        if removed {
            info!("Cart: removed '{}'", name);
        } else {
            debug!("Cart: remove of '{}' ignored, not in cart", name);
        }
        removed
    }

    /// Set the quantity of `name` from raw field text, clamped to at least 1.
    ///
    /// Returns the stored quantity, or `None` when `name` is not in the cart.
    pub fn update_quantity(&mut self, name: &str, raw: &str) -> Option<u32> {
        let entry = match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry,
            None => {
                debug!("Cart: quantity edit for '{}' ignored, not in cart", name);
                return None;
            }
        };

        entry.quantity = clamp_quantity(raw);
        debug!("Cart: '{}' quantity set to {} from '{}'", name, entry.quantity, raw);
        Some(entry.quantity)
    }

    /// Empty the cart, returning how many entries were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        dropped
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&CartEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Sum of quantities across entries.
    pub fn item_count(&self) -> u64 {
        self.entries.iter().map(|entry| entry.quantity as u64).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_same_item_twice_keeps_first_price() {
        let mut cart = CartModel::new();
        assert_eq!(cart.add_item("Mouse", 500.0), 1);
        assert_eq!(cart.add_item("Mouse", 650.0), 2);

        assert_eq!(cart.len(), 1);
        let mouse = cart.get("Mouse").unwrap();
        assert_eq!(mouse.price, 500.0);
        assert_eq!(mouse.quantity, 2);
        assert_eq!(cart.total(), 1000.0);
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let mut cart = CartModel::new();
        cart.add_item("Honey", 120.0);
        cart.add_item("Elaichi", 100.0);
        cart.add_item("Honey", 120.0);

        let names: Vec<&str> = cart.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Honey", "Elaichi"]);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = CartModel::new();
        cart.add_item("Keyboard", 800.0);
        assert!(cart.remove_item("Keyboard"));
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0.0);

        assert!(!cart.remove_item("Keyboard"));
    }

    #[test]
    fn test_update_quantity_clamps() {
        let mut cart = CartModel::new();
        cart.add_item("Mouse", 500.0);

        assert_eq!(cart.update_quantity("Mouse", "4"), Some(4));
        assert_eq!(cart.total(), 2000.0);
        assert_eq!(cart.update_quantity("Mouse", "-5"), Some(1));
        cart.update_quantity("Mouse", "3");
        assert_eq!(cart.update_quantity("Mouse", "abc"), Some(1));
        assert_eq!(cart.get("Mouse").unwrap().quantity, 1);
    }

    #[test]
    fn test_update_quantity_unknown_name_is_noop() {
        let mut cart = CartModel::new();
        cart.add_item("Mouse", 500.0);
        let before = cart.clone();

        assert_eq!(cart.update_quantity("Keyboard", "9"), None);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = CartModel::new();
        cart.add_item("Mouse", 500.0);
        cart.add_item("Honey", 120.0);

        assert_eq!(cart.clear(), 2);
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.clear(), 0);
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        assert_eq!(CartModel::new().total(), 0.0);
    }
}
