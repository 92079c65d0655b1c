//! Aggregates module
pub mod cart;
pub mod order;

pub use cart::{Cart, CartError, CartLineItem, CartQuote, LineQuote};
pub use order::{Order, OrderCodeRegistry};
