//! KOTO AFRICA Logistics - shipping and pricing quote service

use anyhow::Result;
use koto_logistics::api::{router, AppState};
use koto_logistics::{AppConfig, OrderCodeRegistry};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_filter.as_str().into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState::new(OrderCodeRegistry::with_capacity(config.order_code_attempts, config.order_code_capacity));
    let app = router(state);

    let addr = config.bind_address();
    tracing::info!("KOTO logistics listening on {}", addr);
    axum::serve(tokio::net::TcpListener::bind(&addr).await?, app).await?;
    Ok(())
}
