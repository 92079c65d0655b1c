//! Stateless pricing services.
pub mod currency;
pub mod delivery;
pub mod order_code;
pub mod shipping;
