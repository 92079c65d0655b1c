use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use koto_logistics::api::{router, AppState};
use koto_logistics::OrderCodeRegistry;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router { router(AppState::new(OrderCodeRegistry::default())) }

async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::post(uri).header("content-type", "application/json").body(Body::from(body.to_string())).unwrap();
    send(app, req).await
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn health() {
    let (status, body) = send(app(), Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn rates_list_all_four_tiers() {
    let (status, body) = send(app(), Request::get("/api/v1/shipping/rates").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    let rates = body.as_array().unwrap();
    assert_eq!(rates.len(), 4);
    assert_eq!(rates[0]["mode"], "air_rapide");
    assert_eq!(rates[0]["basis"], "per_kg");
    assert_eq!(rates[3]["mode"], "sea_with_motor");
    assert_eq!(rates[3]["rate"], 260000.0);
    assert_eq!(rates[3]["delivery_days"], "40-70 jours");
}

#[tokio::test]
async fn shipping_quote_by_weight() {
    let (status, body) = post(app(), "/api/v1/shipping/quote", json!({"weight_kg": 10.0, "mode": "air_rapide"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_fcfa"], 170000);
    assert_eq!(body["volume_cost"], 0.0);
    assert_eq!(body["delivery_days"], "10-17 jours");
    assert_eq!(body["total_formatted"], "170 000 FCFA");
}

#[tokio::test]
async fn shipping_quote_without_mode_uses_air_rapide() {
    let (status, body) = post(app(), "/api/v1/shipping/quote", json!({"weight_kg": 1.0})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "air_rapide");
    assert_eq!(body["total_fcfa"], 17000);
}

#[tokio::test]
async fn shipping_quote_rejects_unknown_mode() {
    let (status, _) = post(app(), "/api/v1/shipping/quote", json!({"weight_kg": 1.0, "mode": "bogus_mode"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn shipping_quote_rejects_negative_weight() {
    let (status, _) = post(app(), "/api/v1/shipping/quote", json!({"weight_kg": -1.0, "mode": "air_rapide"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn currency_convert() {
    let (status, body) = post(app(), "/api/v1/currency/convert", json!({"amount_usd": 100.0})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["amount_fcfa"], 66128);
    assert_eq!(body["product_price_fcfa"], 66128);
    assert_eq!(body["formatted_fcfa"], "66 128 FCFA");
    assert_eq!(body["formatted_usd"], "$100.00");
}

#[tokio::test]
async fn cart_quote_with_split_payment() {
    let body = json!({"items": [
        {"product_id": "P1", "name": "Boubou", "price_usd": 100.0, "weight_kg": 2.0, "quantity": 1, "shipping_mode": "air_express"},
        {"product_id": "P2", "name": "Sac", "price_usd": 100.0, "volume_m3": 0.5, "quantity": 1, "shipping_mode": "sea_no_motor", "payment_mode": "split"}
    ]});
    let (status, quote) = post(app(), "/api/v1/cart/quote", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quote["lines"].as_array().unwrap().len(), 2);
    assert_eq!(quote["grand_total_fcfa"], 2 * 66128 + 54000 + 110000);
    assert_eq!(quote["due_on_delivery_fcfa"], 110000);
    assert_eq!(quote["due_now_fcfa"], 2 * 66128 + 54000);
}

#[tokio::test]
async fn cart_quote_rejects_empty_and_zero_quantity() {
    let (status, _) = post(app(), "/api/v1/cart/quote", json!({"items": []})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let item = json!({"product_id": "P1", "price_usd": 1.0, "quantity": 0});
    let (status, _) = post(app(), "/api/v1/cart/quote", json!({"items": [item]})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn delivery_estimate_defaults_to_max_delay() {
    let body = json!({"order_date": "2024-03-01T12:00:00Z", "method": "maritime"});
    let (status, res) = post(app(), "/api/v1/delivery/estimate", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["delay_days"], 60);
    assert_eq!(res["estimated_delivery"], "2024-04-30T12:00:00Z");

    let body = json!({"order_date": "2024-03-01T12:00:00Z", "method": "express", "use_max_delay": false});
    let (_, res) = post(app(), "/api/v1/delivery/estimate", body).await;
    assert_eq!(res["delay_days"], 5);

    let (status, _) = post(app(), "/api/v1/delivery/estimate", json!({"method": "teleport"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn place_orders_get_distinct_codes() {
    let app = app();
    let body = json!({"items": [{"product_id": "P1", "price_usd": 10.0, "weight_kg": 1.0, "quantity": 2}], "delivery_method": "air"});
    let (status, first) = post(app.clone(), "/api/v1/orders", body.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, second) = post(app, "/api/v1/orders", body).await;
    let code = first["code"].as_str().unwrap();
    assert!(code.starts_with("KA-225-") && code.len() == 13);
    assert_ne!(first["code"], second["code"]);
    assert_eq!(first["quote"]["shipping_fcfa"], 34000);
    assert!(first["estimated_delivery"].is_string());
}

#[tokio::test]
async fn cart_quote_merges_duplicate_lines() {
    let line = json!({"product_id": "P1", "price_usd": 100.0, "weight_kg": 1.0, "quantity": 1});
    let (status, quote) = post(app(), "/api/v1/cart/quote", json!({"items": [line.clone(), line]})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quote["lines"].as_array().unwrap().len(), 1);
    assert_eq!(quote["lines"][0]["quantity"], 2);
    assert_eq!(quote["grand_total_fcfa"], 2 * 66128 + 34000);
}

#[tokio::test]
async fn cart_quote_with_huge_price_saturates() {
    let line = json!({"product_id": "P1", "price_usd": 1e16, "quantity": 2});
    let (status, quote) = post(app(), "/api/v1/cart/quote", json!({"items": [line]})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quote["products_fcfa"], i64::MAX);
    assert_eq!(quote["grand_total_fcfa"], i64::MAX);
}
