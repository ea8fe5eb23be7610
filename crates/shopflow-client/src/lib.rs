//! HTTP clients used between shopflow services.
//!
//! - `AuthClient` calls `POST /verify` on the auth service and implements
//!   `TokenVerifier`, so an `AuthRelay` can run against a remote authority.
//! - `BillingClient` calls `/balance` on the billing service and implements
//!   `BalanceLedger`, forwarding the caller's token pair.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use shopflow_auth::AuthRelay;
//! use shopflow_client::AuthClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let auth = AuthClient::new("http://auth-service:8000")?;
//! let relay = AuthRelay::new(Arc::new(auth));
//! let caller = relay.authenticate(Some("Bearer access;refresh")).await?;
//! println!("authenticated {}", caller.login());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod auth;
mod billing;
mod error;
mod response;
mod types;

pub use auth::AuthClient;
pub use billing::BillingClient;
pub use error::ClientError;
pub use response::ClientOptions;
pub use types::*;
