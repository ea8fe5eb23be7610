//! Auth service - users, login and token verification.

use std::sync::Arc;

use shopflow_auth::TokenAuthority;
use shopflow_service::server::{init_tracing, open_stores, serve};
use shopflow_service::{create_auth_router, AuthState, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    tracing::info!("Starting auth service");

    let config = ServiceConfig::from_env("0.0.0.0:8000");
    let authority = Arc::new(TokenAuthority::new(config.require_jwt_secret()?));

    tracing::info!(
        listen_addr = %config.listen_addr,
        database = config.database_url.is_some(),
        "Service configuration loaded"
    );

    let stores = open_stores(&config).await?;
    let state = AuthState::new(authority, stores.users, config.clone());

    serve(create_auth_router(state), &config.listen_addr).await?;

    Ok(())
}
