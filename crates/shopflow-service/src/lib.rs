//! shopflow HTTP services.
//!
//! One library, three routers:
//!
//! - **auth**: users, login, and `POST /verify` backed by a `TokenAuthority`
//! - **billing**: the balance ledger behind `GET|POST /balance`
//! - **order**: the `OrderCoordinator` saga behind `POST /order`, plus order
//!   queries
//!
//! # Authentication
//!
//! Every protected route reads `Authorization: Bearer <access>;<refresh>` and
//! runs it through an `AuthRelay`. The auth service verifies in-process; the
//! billing and order services verify over HTTP and fail closed when the auth
//! service is unreachable.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Health handlers need async for the router

pub mod config;
pub mod coordinator;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod password;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{ConfigError, ServiceConfig};
pub use coordinator::{DebitOutcome, OrderCoordinator, PlacedOrder};
pub use error::ApiError;
pub use routes::{create_auth_router, create_billing_router, create_order_router};
pub use state::{AuthState, BillingState, OrderState};
