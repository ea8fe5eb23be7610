//! Error types for shopflow storage.

use shopflow_core::ShopError;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Record not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity type ("balance", "order", "user").
        entity: &'static str,
        /// The key that was looked up.
        id: String,
    },

    /// Record already exists.
    #[error("{entity} already exists: {id}")]
    AlreadyExists {
        /// Entity type.
        entity: &'static str,
        /// The conflicting key.
        id: String,
    },

    /// Debit rejected; the balance is unchanged.
    #[error("insufficient funds: balance={balance}, required={required}")]
    InsufficientFunds {
        /// Current balance.
        balance: i64,
        /// Amount the debit asked for.
        required: i64,
    },

    /// The amount cannot be applied (overflow).
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}

impl StoreError {
    pub(crate) fn balance_not_found(username: &str) -> Self {
        Self::NotFound {
            entity: "balance",
            id: username.to_string(),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<StoreError> for ShopError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound {
                entity: "balance", ..
            } => Self::NotFound(
                "user account not found: to register you need to deposit money into your account"
                    .into(),
            ),
            StoreError::NotFound { .. } => Self::NotFound(err.to_string()),
            StoreError::AlreadyExists { .. } => Self::Conflict(err.to_string()),
            StoreError::InsufficientFunds { balance, required } => {
                Self::InsufficientFunds { balance, required }
            }
            StoreError::InvalidAmount(msg) => Self::BadRequest(msg),
            StoreError::Database(msg) => Self::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_balance_maps_to_not_found() {
        let err: ShopError = StoreError::balance_not_found("maria").into();
        assert!(matches!(err, ShopError::NotFound(msg) if msg.contains("deposit money")));
    }

    #[test]
    fn database_errors_are_internal() {
        let err: ShopError = StoreError::Database("boom".into()).into();
        assert_eq!(err, ShopError::Internal("boom".into()));
    }
}
