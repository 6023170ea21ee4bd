pub mod catalog_store;
pub mod trending_counter;
pub mod cart_model;
pub mod shop_controller;

pub use catalog_store::*;
pub use trending_counter::*;
pub use cart_model::*;
pub use shop_controller::*;
