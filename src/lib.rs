//! KOTO AFRICA Logistics
//!
//! Pricing core of the KOTO AFRICA storefront.
//!
//! ## Features
//! - Shipping cost by weight (air) or volume (sea)
//! - USD to FCFA conversion and display formatting
//! - Cart quotes with immediate or split payment
//! - Display order codes (`KA-225-XXXXXX`) with collision retry
//! - Delivery date estimates
//! - HTTP quote service

pub mod api;
pub mod config;
pub mod domain;

use thiserror::Error;

pub use config::AppConfig;
pub use domain::aggregates::{Cart, CartLineItem, CartQuote, LineQuote, Order, OrderCodeRegistry};
pub use domain::services::currency::{
    calculate_product_price, convert_to_fcfa, format_fcfa, format_usd, USD_TO_FCFA,
};
pub use domain::services::delivery::{calculate_estimated_delivery, estimated_delivery};
pub use domain::services::order_code::generate_order_code;
pub use domain::services::shipping::{
    calculate_shipping_cost, calculate_shipping_cost_lenient, ShippingCalculation,
};
pub use domain::value_objects::{DeliveryMethod, OrderCode, PaymentMode, RateEntry, ShippingMode};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LogisticsError {
    #[error("Unknown shipping mode: {0}")]
    UnknownShippingMode(String),

    #[error("Unknown delivery method: {0}")]
    UnknownDeliveryMethod(String),

    #[error("Unknown payment mode: {0}")]
    UnknownPaymentMode(String),

    #[error("Malformed order code: {0}")]
    InvalidOrderCode(String),

    #[error("No free order code after {attempts} attempts")]
    OrderCodeExhausted { attempts: u32 },

    #[error("Invalid configuration for {key}: {message}")]
    InvalidConfig { key: String, message: String },
}

pub type Result<T> = std::result::Result<T, LogisticsError>;
