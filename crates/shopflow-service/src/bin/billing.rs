//! Billing service - the balance ledger.

use std::sync::Arc;

use shopflow_auth::AuthRelay;
use shopflow_client::{AuthClient, ClientOptions};
use shopflow_service::server::{init_tracing, open_stores, serve};
use shopflow_service::{create_billing_router, BillingState, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    tracing::info!("Starting billing service");

    let config = ServiceConfig::from_env("0.0.0.0:8001");

    tracing::info!(
        listen_addr = %config.listen_addr,
        auth_url = %config.auth_url,
        database = config.database_url.is_some(),
        "Service configuration loaded"
    );

    let options = ClientOptions::with_timeout(config.upstream_timeout_seconds);
    let auth = AuthClient::with_options(&config.auth_url, &options)?;
    let stores = open_stores(&config).await?;

    let state = BillingState {
        relay: AuthRelay::new(Arc::new(auth)),
        balances: stores.balances,
        config: config.clone(),
    };

    serve(create_billing_router(state), &config.listen_addr).await?;

    Ok(())
}
