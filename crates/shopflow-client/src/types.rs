//! Wire types shared by the billing service and its client.

use serde::{Deserialize, Serialize};

/// Body of `GET /balance`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceResponse {
    /// Owner of the balance.
    pub username: String,
    /// Current amount in the smallest currency unit.
    pub balance: i64,
}

/// Body of `POST /balance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceDeltaRequest {
    /// Signed delta; negative debits the account.
    pub amount: i64,
}

/// Response of `POST /balance`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceDeltaResponse {
    /// Human-readable confirmation.
    pub success: String,
    /// Balance after the delta.
    pub balance: i64,
}

/// API error response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// Error details.
    pub error: ApiErrorBody,
}

/// API error body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
    /// Additional details.
    pub details: Option<serde_json::Value>,
}
