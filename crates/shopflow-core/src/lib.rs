//! Core types and utilities for shopflow.
//!
//! This crate provides the foundational types shared by the auth, billing and
//! order services:
//!
//! - **Identifiers**: `OrderId`
//! - **Identity**: `Identity`, `TokenPair`, `Caller`
//! - **Orders**: `Order`, `OrderRequest`, `OrderStatus`
//! - **Users**: `UserRecord`, `UserProfile`
//! - **Ledger**: the `BalanceLedger` capability used by the order saga
//!
//! # Money
//!
//! Amounts are stored as `i64` in the smallest currency unit. Balances never
//! go negative; the ledger rejects any delta that would make them so.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod identity;
pub mod ids;
pub mod ledger;
pub mod order;
pub mod user;

pub use error::{Result, ShopError};
pub use identity::{Caller, Identity, TokenPair, BEARER_PREFIX, TOKEN_SEPARATOR};
pub use ids::{IdError, OrderId};
pub use ledger::BalanceLedger;
pub use order::{Order, OrderRequest, OrderStatus, DEFAULT_PAGE_SIZE};
pub use user::{UserProfile, UserRecord};
