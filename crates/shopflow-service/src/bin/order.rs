//! Order service - the order saga and order queries.

use std::sync::Arc;

use shopflow_auth::AuthRelay;
use shopflow_client::{AuthClient, BillingClient, ClientOptions};
use shopflow_service::server::{init_tracing, open_stores, serve};
use shopflow_service::{create_order_router, OrderCoordinator, OrderState, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    tracing::info!("Starting order service");

    let config = ServiceConfig::from_env("0.0.0.0:8002");

    tracing::info!(
        listen_addr = %config.listen_addr,
        auth_url = %config.auth_url,
        billing_url = %config.billing_url,
        database = config.database_url.is_some(),
        "Service configuration loaded"
    );

    let options = ClientOptions::with_timeout(config.upstream_timeout_seconds);
    let relay = AuthRelay::new(Arc::new(AuthClient::with_options(
        &config.auth_url,
        &options,
    )?));
    let billing = BillingClient::with_options(&config.billing_url, &options)?;
    let stores = open_stores(&config).await?;

    let coordinator = OrderCoordinator::new(
        relay.clone(),
        Arc::new(billing),
        Arc::clone(&stores.orders),
    );

    let state = OrderState {
        relay,
        coordinator,
        orders: stores.orders,
        config: config.clone(),
    };

    serve(create_order_router(state), &config.listen_addr).await?;

    Ok(())
}
