//! Router configuration.
//!
//! One router per service, all with the same middleware stack.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::handlers::{balance, health, orders, users};
use crate::state::{AuthState, BillingState, OrderState};

/// Maximum in-flight API requests per service.
const MAX_CONCURRENT_REQUESTS: usize = 512;

/// Create the auth service router.
///
/// # Routes
///
/// - `GET /health` - Health check
/// - `POST /verify` - Verify or rotate a token pair
/// - `POST /user` - Register
/// - `POST /login` - Exchange credentials for a token pair
/// - `GET|PUT|DELETE /user/:username` - Own profile (authenticated)
pub fn create_auth_router(state: AuthState) -> Router {
    let config = state.config.clone();

    let api = Router::new()
        .route("/verify", post(users::verify))
        .route("/user", post(users::create_user))
        .route("/login", post(users::login))
        .route(
            "/user/:username",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
        .with_state(Arc::new(state));

    with_middleware(
        Router::new()
            .route("/health", get(health::auth_health))
            .merge(api),
        &config,
    )
}

/// Create the billing service router.
///
/// # Routes
///
/// - `GET /health` - Health check
/// - `GET /balance` - Caller's balance (authenticated)
/// - `POST /balance` - Deposit or debit (authenticated)
pub fn create_billing_router(state: BillingState) -> Router {
    let config = state.config.clone();

    let api = Router::new()
        .route(
            "/balance",
            get(balance::get_balance).post(balance::change_balance),
        )
        .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
        .with_state(Arc::new(state));

    with_middleware(
        Router::new()
            .route("/health", get(health::billing_health))
            .merge(api),
        &config,
    )
}

/// Create the order service router.
///
/// # Routes
///
/// - `GET /health` - Health check
/// - `POST /order` - Place an order
/// - `GET /order/:order_id` - Get one order (authenticated)
/// - `DELETE /order/:order_id` - Delete an order (authenticated)
/// - `GET /orders` - List orders (authenticated)
pub fn create_order_router(state: OrderState) -> Router {
    let config = state.config.clone();

    let api = Router::new()
        .route("/order", post(orders::create_order))
        .route(
            "/order/:order_id",
            get(orders::get_order).delete(orders::delete_order),
        )
        .route("/orders", get(orders::list_orders))
        .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
        .with_state(Arc::new(state));

    with_middleware(
        Router::new()
            .route("/health", get(health::order_health))
            .merge(api),
        &config,
    )
}

fn with_middleware(router: Router, config: &ServiceConfig) -> Router {
    router
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&config.cors_origins))
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_seconds,
        )))
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
