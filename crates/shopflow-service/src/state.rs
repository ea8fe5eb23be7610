//! Application state for the three services.

use std::sync::Arc;

use shopflow_auth::{AuthRelay, TokenAuthority};
use shopflow_store::{BalanceStore, OrderStore, UserStore};

use crate::config::ServiceConfig;
use crate::coordinator::OrderCoordinator;

/// State that can authenticate callers.
pub trait RelayState: Send + Sync + 'static {
    /// The relay protected routes run through.
    fn relay(&self) -> &AuthRelay;
}

/// Auth service state.
#[derive(Clone)]
pub struct AuthState {
    /// Issues and verifies tokens.
    pub authority: Arc<TokenAuthority>,

    /// Relay over `authority`, for the user routes.
    pub relay: AuthRelay,

    /// User storage.
    pub users: Arc<dyn UserStore>,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AuthState {
    /// Create auth state. The relay verifies in-process against `authority`.
    #[must_use]
    pub fn new(
        authority: Arc<TokenAuthority>,
        users: Arc<dyn UserStore>,
        config: ServiceConfig,
    ) -> Self {
        let verifier: Arc<TokenAuthority> = Arc::clone(&authority);
        let relay = AuthRelay::new(verifier);
        Self {
            authority,
            relay,
            users,
            config,
        }
    }
}

impl RelayState for AuthState {
    fn relay(&self) -> &AuthRelay {
        &self.relay
    }
}

/// Billing service state.
#[derive(Clone)]
pub struct BillingState {
    /// Authenticates callers against the auth service.
    pub relay: AuthRelay,

    /// Balance storage.
    pub balances: Arc<dyn BalanceStore>,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl RelayState for BillingState {
    fn relay(&self) -> &AuthRelay {
        &self.relay
    }
}

/// Order service state.
#[derive(Clone)]
pub struct OrderState {
    /// Authenticates callers for the query routes.
    pub relay: AuthRelay,

    /// Runs `POST /order`.
    pub coordinator: OrderCoordinator,

    /// Order storage for queries and deletes.
    pub orders: Arc<dyn OrderStore>,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl RelayState for OrderState {
    fn relay(&self) -> &AuthRelay {
        &self.relay
    }
}
