//! Billing service handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use shopflow_client::{BalanceDeltaRequest, BalanceDeltaResponse, BalanceResponse};

use crate::error::ApiError;
use crate::extract::{AuthCaller, ValidatedJson};
use crate::state::BillingState;

/// Get the caller's balance.
pub async fn get_balance(
    State(state): State<Arc<BillingState>>,
    AuthCaller(caller): AuthCaller,
) -> Result<Json<BalanceResponse>, ApiError> {
    let balance = state.balances.get_balance(caller.login()).await?;

    Ok(Json(BalanceResponse {
        username: caller.identity.login,
        balance,
    }))
}

/// Apply a signed delta to the caller's balance.
///
/// A positive amount deposits (and opens the account on first use); a
/// negative amount debits and never drives the balance below zero.
pub async fn change_balance(
    State(state): State<Arc<BillingState>>,
    AuthCaller(caller): AuthCaller,
    ValidatedJson(request): ValidatedJson<BalanceDeltaRequest>,
) -> Result<Json<BalanceDeltaResponse>, ApiError> {
    let balance = state
        .balances
        .apply_delta(caller.login(), request.amount)
        .await?;

    tracing::info!(
        username = %caller.login(),
        amount = request.amount,
        balance,
        "Balance changed"
    );

    Ok(Json(BalanceDeltaResponse {
        success: format!("balance for user '{}' updated", caller.login()),
        balance,
    }))
}
