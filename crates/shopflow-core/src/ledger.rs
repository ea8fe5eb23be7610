//! The ledger capability used by the order saga.

use async_trait::async_trait;

use crate::error::Result;
use crate::identity::Caller;

/// Something that can move money on an authenticated caller's account.
///
/// The in-process implementation keys the balance by `caller.login()`; the
/// networked one forwards `caller.tokens` so the billing service can
/// authenticate the caller itself.
#[async_trait]
pub trait BalanceLedger: Send + Sync {
    /// Apply a signed delta to the caller's balance and return the new amount.
    ///
    /// # Errors
    ///
    /// - `ShopError::NotFound` when debiting an account with no history.
    /// - `ShopError::InsufficientFunds` when the balance would go negative;
    ///   nothing is written in that case.
    /// - Any other kind for infrastructure failures.
    async fn apply_delta(&self, caller: &Caller, delta: i64) -> Result<i64>;
}
