//! Common test utilities for shopflow integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::http::HeaderValue;
use axum_test::TestServer;

use shopflow_auth::{AuthRelay, TokenAuthority};
use shopflow_core::{Identity, TokenPair};
use shopflow_service::{
    create_auth_router, create_billing_router, create_order_router, AuthState, BillingState,
    OrderCoordinator, OrderState, ServiceConfig,
};
use shopflow_store::{BalanceStore, MemoryStore, StoreLedger};

/// Signing secret shared by every service in the harness.
pub const SECRET: &[u8] = b"integration-test-secret";

/// Test harness running the three services over one in-memory store.
pub struct TestHarness {
    /// Auth service.
    pub auth: TestServer,
    /// Billing service.
    pub billing: TestServer,
    /// Order service.
    pub orders: TestServer,
    /// Backing storage, for arranging and inspecting state.
    pub store: Arc<MemoryStore>,
    /// The authority the services verify against.
    pub authority: Arc<TokenAuthority>,
}

impl TestHarness {
    /// Create a harness with empty storage.
    pub fn new() -> Self {
        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            jwt_secret: Some(String::from_utf8_lossy(SECRET).into_owned()),
            ..ServiceConfig::default()
        };

        let store = Arc::new(MemoryStore::new());
        let authority = Arc::new(TokenAuthority::new(SECRET));
        let verifier: Arc<TokenAuthority> = Arc::clone(&authority);
        let relay = AuthRelay::new(verifier);

        let auth_state = AuthState::new(
            Arc::clone(&authority),
            Arc::clone(&store) as _,
            config.clone(),
        );

        let billing_state = BillingState {
            relay: relay.clone(),
            balances: Arc::clone(&store) as _,
            config: config.clone(),
        };

        let coordinator = OrderCoordinator::new(
            relay.clone(),
            Arc::new(StoreLedger::new(Arc::clone(&store))),
            Arc::clone(&store) as _,
        );
        let order_state = OrderState {
            relay,
            coordinator,
            orders: Arc::clone(&store) as _,
            config,
        };

        Self {
            auth: TestServer::new(create_auth_router(auth_state))
                .expect("Failed to create auth server"),
            billing: TestServer::new(create_billing_router(billing_state))
                .expect("Failed to create billing server"),
            orders: TestServer::new(create_order_router(order_state))
                .expect("Failed to create order server"),
            store,
            authority,
        }
    }

    /// A fresh token pair for `login`.
    pub fn tokens_for(&self, login: &str) -> TokenPair {
        self.authority
            .issue_pair(&Identity::new(login, format!("{login}@example.com")))
            .expect("Failed to issue tokens")
    }

    /// `Authorization` header value for `login`.
    pub fn auth_header(&self, login: &str) -> HeaderValue {
        header_value(&self.tokens_for(login).authorization_value())
    }

    /// Put money on `login`'s balance directly in storage.
    pub async fn deposit(&self, login: &str, amount: i64) {
        self.store
            .apply_delta(login, amount)
            .await
            .expect("Failed to deposit");
    }

    /// Current balance of `login`, read from storage.
    pub async fn balance(&self, login: &str) -> i64 {
        self.store
            .get_balance(login)
            .await
            .expect("Failed to read balance")
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a header value from a string.
pub fn header_value(value: &str) -> HeaderValue {
    HeaderValue::from_str(value).expect("Invalid header value")
}
