pub mod catalog;
pub mod cart;
pub mod event;

pub use catalog::*;
pub use cart::*;
pub use event::*;
