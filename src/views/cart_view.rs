use serde::Serialize;

use crate::models::event::UiEvent;
use crate::services::cart_model::CartModel;
use crate::utils::formatting::CurrencyFormat;
use crate::utils::validation::MIN_QUANTITY;

pub const EMPTY_CART: &str = "Your cart is empty.";

/// Editable quantity input of a cart row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuantityField {
    pub name: String,
    pub value: u32,
    pub min: u32,
}

impl QuantityField {
    /// The event fired when the field's text changes to `raw`.
    pub fn edit(&self, raw: impl Into<String>) -> UiEvent {
        UiEvent::update_quantity(self.name.clone(), raw)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartRecord {
    pub name: String,
    pub price: f64,
    pub label: String,
    pub quantity: QuantityField,
    pub line_total: f64,
    pub on_remove: UiEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CartBody {
    Empty { placeholder: String },
    Entries(Vec<CartRecord>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartRender {
    pub body: CartBody,
    pub total: f64,
    pub total_text: String,
}

impl CartRender {
    pub fn records(&self) -> &[CartRecord] {
        match &self.body {
            CartBody::Empty { .. } => &[],
            CartBody::Entries(records) => records,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.body, CartBody::Empty { .. })
    }
}

pub fn render(cart: &CartModel, currency: &CurrencyFormat) -> CartRender {
    let body = if cart.is_empty() {
        CartBody::Empty {
            placeholder: EMPTY_CART.to_string(),
        }
    } else {
        CartBody::Entries(
            cart.entries()
                .iter()
                .map(|entry| CartRecord {
                    name: entry.name.clone(),
                    price: entry.price,
                    label: format!("{} - {} x", entry.name, currency.format(entry.price)),
                    quantity: QuantityField {
                        name: entry.name.clone(),
                        value: entry.quantity,
                        min: MIN_QUANTITY,
                    },
                    line_total: entry.line_total(),
                    on_remove: UiEvent::remove(entry.name.clone()),
                })
                .collect(),
        )
    };

    let total = cart.total();
    CartRender {
        body,
        total,
        total_text: currency.format(total),
    }
}
