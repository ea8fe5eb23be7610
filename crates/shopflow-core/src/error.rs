//! Error types for shopflow.

/// Result type for shopflow operations.
pub type Result<T> = std::result::Result<T, ShopError>;

/// Errors returned by core operations.
///
/// Each variant is a *kind* of failure rather than a transport status; the
/// HTTP layer decides how a kind is rendered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShopError {
    /// Malformed or missing input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Authentication failed, including an unreachable token authority.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Unknown user or order.
    #[error("not found: {0}")]
    NotFound(String),

    /// A debit was rejected because it would make the balance negative.
    #[error("not enough funds to write off: balance={balance}, required={required}")]
    InsufficientFunds {
        /// Current balance.
        balance: i64,
        /// Amount the debit asked for.
        required: i64,
    },

    /// The resource already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Storage or unexpected failure.
    #[error("internal error: {0}")]
    Internal(String),
}
