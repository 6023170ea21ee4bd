use serde::{Deserialize, Serialize};

/// Input surface of the widget. Every user interaction is one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UiEvent {
    SelectProduct { product: String },
    AddItem { name: String, price: f64 },
    RemoveItem { name: String },
    UpdateQuantity { name: String, raw: String },
    SubmitOrder,
}

impl UiEvent {
    pub fn select(product: impl Into<String>) -> Self {
        UiEvent::SelectProduct { product: product.into() }
    }

    pub fn add(name: impl Into<String>, price: f64) -> Self {
        UiEvent::AddItem { name: name.into(), price }
    }

    pub fn remove(name: impl Into<String>) -> Self {
        UiEvent::RemoveItem { name: name.into() }
    }

    pub fn update_quantity(name: impl Into<String>, raw: impl Into<String>) -> Self {
        UiEvent::UpdateQuantity {
            name: name.into(),
            raw: raw.into(),
        }
    }

    pub fn submit_order() -> Self {
        UiEvent::SubmitOrder
    }
}

impl std::fmt::Display for UiEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UiEvent::SelectProduct { product } => write!(f, "select '{}'", product),
            UiEvent::AddItem { name, price } => write!(f, "add '{}' at {}", name, price),
            UiEvent::RemoveItem { name } => write!(f, "remove '{}'", name),
            UiEvent::UpdateQuantity { name, raw } => write!(f, "quantity '{}' -> '{}'", name, raw),
            UiEvent::SubmitOrder => write!(f, "submit order"),
        }
    }
}
