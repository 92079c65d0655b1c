//! HTTP quote service
//!
//! JSON endpoints over the calculator. Bodies are validated here so the
//! pricing functions only ever see sane, non-negative inputs.

use axum::{extract::State, http::StatusCode, routing::{get, post}, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use validator::{Validate, ValidationErrors};

use crate::domain::aggregates::{Cart, CartLineItem, CartQuote, Order, OrderCodeRegistry};
use crate::domain::services::currency::{calculate_product_price, convert_to_fcfa, format_fcfa, format_usd};
use crate::domain::services::delivery::{calculate_estimated_delivery, delay_days};
use crate::domain::services::shipping::{calculate_shipping_cost, ShippingCalculation, SHIPPING_RATES};
use crate::domain::value_objects::{DeliveryMethod, PaymentMode, ShippingMode};
use crate::LogisticsError;

#[derive(Clone)]
pub struct AppState { pub registry: Arc<OrderCodeRegistry> }

impl AppState {
    pub fn new(registry: OrderCodeRegistry) -> Self { Self { registry: Arc::new(registry) } }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "koto-logistics"})) }))
        .route("/api/v1/shipping/rates", get(list_rates))
        .route("/api/v1/shipping/quote", post(shipping_quote))
        .route("/api/v1/currency/convert", post(convert_currency))
        .route("/api/v1/cart/quote", post(cart_quote))
        .route("/api/v1/delivery/estimate", post(delivery_estimate))
        .route("/api/v1/orders", post(place_order))
        .layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()).with_state(state)
}

type ApiError = (StatusCode, String);

fn reject(e: LogisticsError) -> ApiError {
    let status = match e {
        LogisticsError::OrderCodeExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
        LogisticsError::InvalidConfig { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    };
    (status, e.to_string())
}

fn invalid(e: ValidationErrors) -> ApiError { (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()) }

/// Absent mode keeps the storefront default; a misspelled one is rejected.
fn parse_mode(raw: Option<&str>) -> Result<ShippingMode, ApiError> {
    raw.map_or(Ok(ShippingMode::default()), |m| m.parse().map_err(reject))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RateView { pub mode: ShippingMode, pub basis: String, pub rate: f64, pub min_days: u32, pub max_days: u32, pub delivery_days: String }

async fn list_rates() -> Json<Vec<RateView>> {
    Json(SHIPPING_RATES.iter().map(|(mode, rate)| RateView {
        mode: *mode,
        basis: if mode.is_air() { "per_kg" } else { "per_m3" }.to_string(),
        rate: if mode.is_air() { rate.per_kg } else { rate.per_m3 },
        min_days: rate.min_days,
        max_days: rate.max_days,
        delivery_days: rate.delivery_days(),
    }).collect())
}

#[derive(Debug, Deserialize, Validate)]
pub struct ShippingQuoteRequest {
    #[serde(default)] #[validate(range(min = 0.0))] pub weight_kg: f64,
    #[serde(default)] #[validate(range(min = 0.0))] pub volume_m3: f64,
    pub mode: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShippingQuoteResponse { #[serde(flatten)] pub calculation: ShippingCalculation, pub total_formatted: String }

async fn shipping_quote(Json(r): Json<ShippingQuoteRequest>) -> Result<Json<ShippingQuoteResponse>, ApiError> {
    r.validate().map_err(invalid)?;
    let calculation = calculate_shipping_cost(r.weight_kg, r.volume_m3, parse_mode(r.mode.as_deref())?);
    let total_formatted = format_fcfa(calculation.total_fcfa as f64);
    Ok(Json(ShippingQuoteResponse { calculation, total_formatted }))
}

#[derive(Debug, Deserialize)] pub struct ConvertRequest { pub amount_usd: f64 }
#[derive(Debug, Serialize, Deserialize)]
pub struct ConvertResponse { pub amount_usd: f64, pub amount_fcfa: i64, pub product_price_fcfa: i64, pub formatted_fcfa: String, pub formatted_usd: String }

async fn convert_currency(Json(r): Json<ConvertRequest>) -> Json<ConvertResponse> {
    let amount_fcfa = convert_to_fcfa(r.amount_usd);
    Json(ConvertResponse {
        amount_usd: r.amount_usd,
        amount_fcfa,
        product_price_fcfa: calculate_product_price(r.amount_usd),
        formatted_fcfa: format_fcfa(amount_fcfa as f64),
        formatted_usd: format_usd(r.amount_usd),
    })
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CartLineItemRequest {
    #[validate(length(min = 1))] pub product_id: String,
    #[serde(default)] pub name: String,
    #[validate(range(min = 0.0))] pub price_usd: f64,
    #[serde(default)] #[validate(range(min = 0.0))] pub weight_kg: f64,
    #[serde(default)] #[validate(range(min = 0.0))] pub volume_m3: f64,
    #[validate(range(min = 1))] pub quantity: u32,
    pub shipping_mode: Option<String>,
    pub payment_mode: Option<String>,
}

impl CartLineItemRequest {
    fn into_item(self) -> Result<CartLineItem, ApiError> {
        self.validate().map_err(invalid)?;
        let shipping_mode = parse_mode(self.shipping_mode.as_deref())?;
        let payment_mode = self.payment_mode.as_deref().map_or(Ok(PaymentMode::default()), |p| p.parse().map_err(reject))?;
        Ok(CartLineItem {
            product_id: self.product_id, name: self.name, price_usd: self.price_usd, weight_kg: self.weight_kg,
            volume_m3: self.volume_m3, quantity: self.quantity, shipping_mode, payment_mode,
        })
    }
}

fn into_items(items: Vec<CartLineItemRequest>) -> Result<Vec<CartLineItem>, ApiError> {
    items.into_iter().map(CartLineItemRequest::into_item).collect()
}

#[derive(Debug, Deserialize, Validate)]
pub struct CartQuoteRequest { #[validate(length(min = 1))] pub items: Vec<CartLineItemRequest> }

async fn cart_quote(Json(r): Json<CartQuoteRequest>) -> Result<Json<CartQuote>, ApiError> {
    r.validate().map_err(invalid)?;
    let items = into_items(r.items)?;
    Ok(Json(Cart::from_items(items).quote()))
}

#[derive(Debug, Deserialize)]
pub struct DeliveryEstimateRequest { pub order_date: Option<DateTime<Utc>>, pub method: String, pub use_max_delay: Option<bool> }

#[derive(Debug, Serialize, Deserialize)]
pub struct DeliveryEstimateResponse { pub order_date: DateTime<Utc>, pub method: DeliveryMethod, pub delay_days: u32, pub estimated_delivery: DateTime<Utc> }

async fn delivery_estimate(Json(r): Json<DeliveryEstimateRequest>) -> Result<Json<DeliveryEstimateResponse>, ApiError> {
    let method: DeliveryMethod = r.method.parse().map_err(reject)?;
    let order_date = r.order_date.unwrap_or_else(Utc::now);
    let use_max_delay = r.use_max_delay.unwrap_or(true);
    Ok(Json(DeliveryEstimateResponse {
        order_date,
        method,
        delay_days: delay_days(method, use_max_delay),
        estimated_delivery: calculate_estimated_delivery(order_date, method, use_max_delay),
    }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct PlaceOrderRequest { #[validate(length(min = 1))] pub items: Vec<CartLineItemRequest>, pub delivery_method: Option<String> }

async fn place_order(State(s): State<AppState>, Json(r): Json<PlaceOrderRequest>) -> Result<(StatusCode, Json<Order>), ApiError> {
    r.validate().map_err(invalid)?;
    let delivery_method = r.delivery_method.as_deref().map(str::parse::<DeliveryMethod>).transpose().map_err(reject)?;
    let quote = Cart::from_items(into_items(r.items)?).quote();
    let code = s.registry.issue().map_err(reject)?;
    Ok((StatusCode::CREATED, Json(Order::place(code, quote, delivery_method))))
}
