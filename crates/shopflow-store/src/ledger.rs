//! Adapter from a `BalanceStore` to the `BalanceLedger` capability.

use std::sync::Arc;

use async_trait::async_trait;

use shopflow_core::{BalanceLedger, Caller};

use crate::error::{Result, StoreError};
use crate::BalanceStore;

/// In-process ledger keyed by the caller's login.
///
/// The order service uses this when it shares a database with billing; the
/// networked alternative lives in `shopflow-client`.
pub struct StoreLedger<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> StoreLedger<S> {
    /// Wrap a balance store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S: ?Sized> Clone for StoreLedger<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

#[async_trait]
impl<S> BalanceLedger for StoreLedger<S>
where
    S: BalanceStore + ?Sized,
{
    async fn apply_delta(&self, caller: &Caller, delta: i64) -> shopflow_core::Result<i64> {
        self.store
            .apply_delta(caller.login(), delta)
            .await
            .map_err(Into::into)
    }
}

/// Compute the balance after applying `delta` to `current`.
///
/// Shared by every backend so they agree on overflow and overdraft rules.
pub(crate) fn next_balance(current: i64, delta: i64) -> Result<i64> {
    let next = current
        .checked_add(delta)
        .ok_or_else(|| StoreError::InvalidAmount(format!("balance overflow applying {delta}")))?;

    if next < 0 {
        return Err(StoreError::InsufficientFunds {
            balance: current,
            required: delta.saturating_neg(),
        });
    }

    Ok(next)
}
