//! Authentication for shopflow.
//!
//! - `TokenAuthority` issues and verifies signed access/refresh pairs.
//! - `parse_bearer_pair` reads the `Bearer <access>;<refresh>` header.
//! - `AuthRelay` turns a header into a verified `Caller`, failing closed.
//!
//! The relay reaches the authority through the `TokenVerifier` trait, so the
//! same relay works in-process (the auth service itself) and over HTTP (the
//! billing and order services, via `shopflow-client`).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use shopflow_auth::{AuthRelay, TokenAuthority};
//! use shopflow_core::Identity;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let authority = Arc::new(TokenAuthority::new(b"secret"));
//! let pair = authority.issue_pair(&Identity::new("maria", "maria@example.com"))?;
//!
//! let relay = AuthRelay::new(authority);
//! let caller = relay
//!     .authenticate(Some(&pair.authorization_value()))
//!     .await?;
//! assert_eq!(caller.login(), "maria");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod header;
pub mod relay;
pub mod tokens;

pub use header::parse_bearer_pair;
pub use relay::{AuthRelay, TokenVerifier, VerifyError};
pub use tokens::{
    TokenAuthority, TokenError, TokenKind, Verified, VerifyResponse, ACCESS_TOKEN_TTL,
    REFRESH_TOKEN_TTL,
};
