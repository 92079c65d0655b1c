//! Cart Aggregate
//!
//! Holds the lines a customer picked and prices them into a [`CartQuote`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::domain::services::currency::calculate_product_price;
use crate::domain::services::shipping::{calculate_shipping_cost, ShippingCalculation};
use crate::domain::value_objects::{PaymentMode, ShippingMode};

#[derive(Clone, Debug)]
pub struct Cart {
    id: String,
    customer_id: Option<String>,
    items: Vec<CartLineItem>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// One product line as selected on the cart page. Weight and volume are per unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub product_id: String,
    pub name: String,
    pub price_usd: f64,
    pub weight_kg: f64,
    pub volume_m3: f64,
    pub quantity: u32,
    #[serde(default)]
    pub shipping_mode: ShippingMode,
    #[serde(default)]
    pub payment_mode: PaymentMode,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineQuote {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price_fcfa: i64,
    pub products_fcfa: i64,
    pub shipping: ShippingCalculation,
    pub payment_mode: PaymentMode,
    pub due_now_fcfa: i64,
    pub due_on_delivery_fcfa: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CartQuote {
    pub lines: Vec<LineQuote>,
    pub products_fcfa: i64,
    pub shipping_fcfa: i64,
    pub grand_total_fcfa: i64,
    pub due_now_fcfa: i64,
    pub due_on_delivery_fcfa: i64,
}

impl CartLineItem {
    /// Prices the line. Shipping is computed on the line's total weight and
    /// volume; split payment defers the shipping part to delivery.
    pub fn quote(&self) -> LineQuote {
        let qty = f64::from(self.quantity);
        let unit_price_fcfa = calculate_product_price(self.price_usd);
        let products_fcfa = unit_price_fcfa.saturating_mul(i64::from(self.quantity));
        let shipping = calculate_shipping_cost(self.weight_kg * qty, self.volume_m3 * qty, self.shipping_mode);
        let (due_now_fcfa, due_on_delivery_fcfa) = match self.payment_mode {
            PaymentMode::Immediate => (products_fcfa.saturating_add(shipping.total_fcfa), 0),
            PaymentMode::Split => (products_fcfa, shipping.total_fcfa),
        };
        LineQuote {
            product_id: self.product_id.clone(),
            name: self.name.clone(),
            quantity: self.quantity,
            unit_price_fcfa,
            products_fcfa,
            shipping,
            payment_mode: self.payment_mode,
            due_now_fcfa,
            due_on_delivery_fcfa,
        }
    }
}

impl CartQuote {
    /// Sums the priced lines. Totals saturate at `i64::MAX` instead of wrapping.
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a CartLineItem>) -> Self {
        items.into_iter().map(CartLineItem::quote).fold(Self::default(), |mut quote, line| {
            quote.products_fcfa = quote.products_fcfa.saturating_add(line.products_fcfa);
            quote.shipping_fcfa = quote.shipping_fcfa.saturating_add(line.shipping.total_fcfa);
            quote.grand_total_fcfa = quote.grand_total_fcfa.saturating_add(line.products_fcfa.saturating_add(line.shipping.total_fcfa));
            quote.due_now_fcfa = quote.due_now_fcfa.saturating_add(line.due_now_fcfa);
            quote.due_on_delivery_fcfa = quote.due_on_delivery_fcfa.saturating_add(line.due_on_delivery_fcfa);
            quote.lines.push(line);
            quote
        })
    }
}

impl Cart {
    pub fn new() -> Self {
        Self { id: Uuid::new_v4().to_string(), customer_id: None, items: vec![], created_at: Utc::now(), updated_at: Utc::now() }
    }

    pub fn for_customer(customer_id: impl Into<String>) -> Self {
        let mut cart = Self::new();
        cart.customer_id = Some(customer_id.into());
        cart
    }

    pub fn from_items(items: Vec<CartLineItem>) -> Self {
        let mut cart = Self::new();
        items.into_iter().for_each(|item| cart.add_item(item));
        cart
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn customer_id(&self) -> Option<&str> { self.customer_id.as_deref() }
    pub fn items(&self) -> &[CartLineItem] { &self.items }
    pub fn item_count(&self) -> usize { self.items.len() }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }

    /// Lines for the same product shipped and paid the same way are merged.
    pub fn add_item(&mut self, item: CartLineItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| {
            i.product_id == item.product_id && i.shipping_mode == item.shipping_mode && i.payment_mode == item.payment_mode
        }) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
        } else {
            self.items.push(item);
        }
        self.touch();
    }

    pub fn update_quantity(&mut self, product_id: &str, quantity: u32) -> Result<(), CartError> {
        if !self.items.iter().any(|i| i.product_id == product_id) { return Err(CartError::ItemNotFound); }
        if quantity == 0 {
            self.items.retain(|i| i.product_id != product_id);
        } else {
            self.items.iter_mut().filter(|i| i.product_id == product_id).for_each(|i| i.quantity = quantity);
        }
        self.touch();
        Ok(())
    }

    pub fn set_shipping_mode(&mut self, product_id: &str, mode: ShippingMode) -> Result<(), CartError> {
        let item = self.items.iter_mut().find(|i| i.product_id == product_id).ok_or(CartError::ItemNotFound)?;
        item.shipping_mode = mode;
        self.touch();
        Ok(())
    }

    pub fn remove_item(&mut self, product_id: &str) -> Result<(), CartError> {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        if self.items.len() == before { return Err(CartError::ItemNotFound); }
        self.touch();
        Ok(())
    }

    pub fn clear(&mut self) { self.items.clear(); self.touch(); }

    pub fn quote(&self) -> CartQuote {
        let quote = CartQuote::from_items(&self.items);
        debug!(cart_id = %self.id, lines = quote.lines.len(), total = quote.grand_total_fcfa, "quoted cart");
        quote
    }

    fn touch(&mut self) { self.updated_at = Utc::now(); }
}

impl Default for Cart {
    fn default() -> Self { Self::new() }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub enum CartError { ItemNotFound }
impl std::error::Error for CartError {}
impl std::fmt::Display for CartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "Item not found") }
}
