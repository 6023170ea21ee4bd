pub mod recommendation_view;
pub mod cart_view;

pub use recommendation_view::{RecommendationRecord, RecommendationRender, NO_RECOMMENDATIONS};
pub use cart_view::{CartBody, CartRecord, CartRender, QuantityField, EMPTY_CART};
