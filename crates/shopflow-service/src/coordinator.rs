//! The order-placement saga.
//!
//! Three steps, strictly sequential, with no shared transaction:
//!
//! 1. authenticate the caller (failure aborts with no side effects)
//! 2. debit `price × quantity` from the caller's balance
//! 3. persist the order as `success` or `failed` depending on step 2
//!
//! A failed debit never stops the saga; it only decides the order status, so
//! every authenticated request that passes validation yields an order id.
//! There is no retry and no compensation: if the debit succeeds and the order
//! write then fails, the money stays spent.

use std::sync::Arc;

use shopflow_auth::AuthRelay;
use shopflow_core::{BalanceLedger, Order, OrderId, OrderRequest, OrderStatus, ShopError};
use shopflow_store::OrderStore;

/// How the debit step resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebitOutcome {
    /// The balance was debited.
    Debited {
        /// Balance after the debit.
        balance: i64,
    },
    /// The balance was too low; nothing was written.
    InsufficientFunds,
    /// The caller has never deposited money.
    AccountNotFound,
    /// The ledger could not be reached or failed.
    Failed(String),
}

impl DebitOutcome {
    fn from_result(result: Result<i64, ShopError>) -> Self {
        match result {
            Ok(balance) => Self::Debited { balance },
            Err(ShopError::InsufficientFunds { .. }) => Self::InsufficientFunds,
            Err(ShopError::NotFound(_)) => Self::AccountNotFound,
            Err(other) => Self::Failed(other.to_string()),
        }
    }

    /// Order status implied by this outcome.
    #[must_use]
    pub fn status(&self) -> OrderStatus {
        match self {
            Self::Debited { .. } => OrderStatus::Success,
            _ => OrderStatus::Failed,
        }
    }

    /// Human-readable message returned to the client.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Debited { .. } => "order was successfully created",
            Self::InsufficientFunds => "order creation failed: not enough funds to write off",
            Self::AccountNotFound => {
                "order creation failed: user account not found; to register you need to deposit money into your account"
            }
            Self::Failed(_) => "order creation failed: billing service unavailable",
        }
    }
}

/// Result of a saga run that reached the order write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    /// Identifier of the persisted order.
    pub order_id: OrderId,
    /// Persisted status.
    pub status: OrderStatus,
    /// How the debit resolved.
    pub outcome: DebitOutcome,
}

/// Runs the order saga over an auth relay, a ledger, and an order store.
#[derive(Clone)]
pub struct OrderCoordinator {
    relay: AuthRelay,
    ledger: Arc<dyn BalanceLedger>,
    orders: Arc<dyn OrderStore>,
}

impl std::fmt::Debug for OrderCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderCoordinator").finish_non_exhaustive()
    }
}

impl OrderCoordinator {
    /// Create a coordinator.
    #[must_use]
    pub fn new(
        relay: AuthRelay,
        ledger: Arc<dyn BalanceLedger>,
        orders: Arc<dyn OrderStore>,
    ) -> Self {
        Self {
            relay,
            ledger,
            orders,
        }
    }

    /// Place an order for the caller identified by `header`.
    ///
    /// # Errors
    ///
    /// - `ShopError::BadRequest` for a malformed header or request. No side
    ///   effects.
    /// - `ShopError::Forbidden` if authentication fails. No side effects.
    /// - `ShopError::Internal` if the order write fails. The debit, if it
    ///   happened, is not reversed.
    pub async fn place_order(
        &self,
        header: Option<&str>,
        request: OrderRequest,
    ) -> Result<PlacedOrder, ShopError> {
        let caller = self.relay.authenticate(header).await?;
        let total_cost = request.total_cost()?;

        let outcome =
            DebitOutcome::from_result(self.ledger.apply_delta(&caller, -total_cost).await);

        match &outcome {
            DebitOutcome::Debited { balance } => tracing::info!(
                username = %caller.login(),
                total_cost,
                balance,
                "Order debit succeeded"
            ),
            other => tracing::warn!(
                username = %caller.login(),
                total_cost,
                outcome = ?other,
                "Order debit failed"
            ),
        }

        let order = Order::new(caller.login(), &request, total_cost, outcome.status());

        self.orders.save_order(&order).await.map_err(|err| {
            tracing::error!(
                order_id = %order.order_id,
                username = %order.username,
                status = %order.status,
                error = %err,
                "Order write failed after debit attempt"
            );
            ShopError::Internal(err.to_string())
        })?;

        tracing::info!(
            order_id = %order.order_id,
            username = %order.username,
            status = %order.status,
            "Order recorded"
        );

        Ok(PlacedOrder {
            order_id: order.order_id,
            status: order.status,
            outcome,
        })
    }
}
