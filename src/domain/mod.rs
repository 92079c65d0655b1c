//! Domain layer: value objects, pricing services and cart/order aggregates.
pub mod aggregates;
pub mod services;
pub mod value_objects;
