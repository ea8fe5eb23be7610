//! Storage layer for shopflow.
//!
//! Each service owns exactly one kind of row and reaches it through a narrow
//! trait:
//!
//! - `BalanceStore`: balances, keyed by `username` (billing service)
//! - `OrderStore`: orders, keyed by `order_id` (order service)
//! - `UserStore`: users, keyed by `username` (auth service)
//!
//! Two backends implement all three: `PgStore` (PostgreSQL via `sqlx`) for
//! production and `MemoryStore` for tests and local runs.
//!
//! # Example
//!
//! ```no_run
//! use shopflow_store::{BalanceStore, MemoryStore};
//!
//! # async fn example() -> shopflow_store::Result<()> {
//! let store = MemoryStore::new();
//! store.apply_delta("maria", 1000).await?;
//! assert_eq!(store.get_balance("maria").await?, 1000);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod ledger;
pub mod memory;
pub mod postgres;
pub mod schema;

pub use error::{Result, StoreError};
pub use ledger::StoreLedger;
pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;

use shopflow_core::{Order, OrderId, UserRecord};

/// Balance storage.
///
/// Implementations must serialize the read-compute-write of `apply_delta` for
/// a given username: two concurrent calls never observe the same starting
/// balance.
#[async_trait]
pub trait BalanceStore: Send + Sync {
    /// Get the current balance of a user.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the user has no balance row.
    async fn get_balance(&self, username: &str) -> Result<i64>;

    /// Apply a signed delta and return the new balance.
    ///
    /// A missing row counts as a zero balance for credits; it is created on
    /// the first successful credit.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if `delta < 0` and the user has no row.
    /// - `StoreError::InsufficientFunds` if the result would be negative.
    ///   Nothing is written in that case.
    /// - `StoreError::InvalidAmount` on `i64` overflow.
    async fn apply_delta(&self, username: &str, delta: i64) -> Result<i64>;
}

/// Order storage.
///
/// Orders are write-once: there is no update operation.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a new order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyExists` if the id is taken.
    async fn save_order(&self, order: &Order) -> Result<()>;

    /// Get an order by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    async fn get_order(&self, order_id: &OrderId) -> Result<Option<Order>>;

    /// List all orders of a user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    async fn list_orders_by_user(&self, username: &str) -> Result<Vec<Order>>;

    /// List orders of every user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    async fn list_orders(&self, limit: usize, offset: usize) -> Result<Vec<Order>>;

    /// Delete an order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the order doesn't exist.
    async fn delete_order(&self, order_id: &OrderId) -> Result<()>;
}

/// User storage.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyExists` if the username is taken.
    async fn create_user(&self, user: &UserRecord) -> Result<()>;

    /// Get a user by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    async fn get_user(&self, username: &str) -> Result<Option<UserRecord>>;

    /// Replace the user stored under `username`. The record may carry a new
    /// username.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if `username` doesn't exist.
    /// - `StoreError::AlreadyExists` if the new username is taken.
    async fn update_user(&self, username: &str, user: &UserRecord) -> Result<()>;

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the user doesn't exist.
    async fn delete_user(&self, username: &str) -> Result<()>;
}
